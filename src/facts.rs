// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Syntactic facts consumed by the inference engine.
//!
//! Facts are produced once per analysed unit by an AST walk that lives
//! outside this crate. They are plain immutable records:
//!
//! * [`Element`] is a literal or an identifier reference.
//! * [`Relation`] links elements and other relations under a
//!   [`RelationKind`] (operators, definitions, accesses, ...).
//! * [`DiscoveredObjectType`] is a structural shape found for an object
//!   literal, a class, or a function used as a namespace.
//!
//! All records derive `serde` traits so fixtures can be written as YAML or
//! JSON, but the engine only ever sees in-memory maps.

mod discovered;
mod element;
mod relation;

pub use discovered::{DiscoveredObjectKind, DiscoveredObjectType};
pub use element::{Element, ElementKind};
pub use relation::{Arity, Relation, RelationKind};

use crate::Rc;

/// Opaque identity of an element, relation, or discovered shape.
pub type Id = Rc<str>;

/// Placeholder used in [`Relation::involved`] for slots that are absent in
/// the source, e.g. the name of an anonymous function.
pub const ANONYMOUS_ID: &str = "anonymous";

/// Whether `id` is the [`ANONYMOUS_ID`] placeholder.
pub fn is_anonymous(id: &str) -> bool {
    id == ANONYMOUS_ID
}
