// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

// Shared ownership of ids. `Arc` lets a frozen model be queried across
// threads.
#[cfg(feature = "arc")]
pub use std::sync::Arc as Rc;
#[cfg(not(feature = "arc"))]
pub use std::rc::Rc;

pub mod facts;
pub mod inference;
pub mod type_model;

pub use facts::{DiscoveredObjectType, Element, ElementKind, Id, Relation, RelationKind};
pub use inference::{InferenceOptions, InferenceTypeModelFactory};
pub use type_model::{
    Distribution, ObjectDescription, Result, TypeKey, TypeModel, TypeModelBuilder,
    TypeModelError, TypeTag,
};

#[cfg(test)]
mod tests;
