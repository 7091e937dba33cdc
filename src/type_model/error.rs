// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::facts::{Arity, Id, RelationKind};

/// Failures raised while building or querying a type model.
///
/// None of these are recoverable locally. They point at either a defect in
/// fact extraction or a defect in rule application.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeModelError {
    #[error("id `{id}` is not registered in the type model")]
    UnregisteredId { id: Id },

    #[error("`{id}` is bound to `{existing}` and cannot be rebound to `{conflicting}`")]
    BindingConflict {
        id: Id,
        existing: Id,
        conflicting: Id,
    },

    #[error("no discovered object type for `{id}`")]
    MissingDiscoveredType { id: Id },

    #[error("internal: probabilities of `{id}` sum to {total} instead of 1")]
    ProbabilityInvariant { id: Id, total: f64 },

    #[error("relation `{id}` ({kind:?}) expects {expected} involved ids, found {found}")]
    MalformedRelation {
        id: Id,
        kind: RelationKind,
        expected: Arity,
        found: usize,
    },

    #[error("relation `{relation}` involves unknown id `{id}`")]
    UnknownInvolvedId { relation: Id, id: Id },
}

pub type Result<T> = core::result::Result<T, TypeModelError>;
