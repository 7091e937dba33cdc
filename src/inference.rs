// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Rule engine that turns syntactic facts into a [`TypeModel`].
//!
//! [`InferenceTypeModelFactory::resolve_types`] runs a fixed pipeline:
//!
//! 1. index discovered shapes by property name,
//! 2. seed every literal with the tag of its kind,
//! 3. union identifier uses with their declarations,
//! 4. register every relation and the ids it involves,
//! 5. score accessed objects against matching shapes,
//! 6. apply the per-kind rules in priority order.
//!
//! Files:
//!
//! * `options.rs` holds [`InferenceOptions`].
//! * `bindings.rs` is the alias table consulted by every later step.
//! * `structural.rs` implements duck-typed shape matching.
//! * `ordering.rs` fixes the order relations are resolved in.
//! * `rules/` has one handler per relation kind, grouped by family.
//!
//! [`TypeModel`]: crate::type_model::TypeModel

mod bindings;
mod factory;
mod options;
mod ordering;
mod rules;
mod structural;

pub use bindings::BindingTable;
pub use factory::InferenceTypeModelFactory;
pub use options::InferenceOptions;
pub use ordering::resolution_order;
pub use structural::{accessed_property_name, PropertyIndex};
