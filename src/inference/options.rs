// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::type_model::{DEFAULT_PRIOR_WEIGHT, DEFAULT_PROBABILITY_TOLERANCE};

/// Knobs of [`InferenceTypeModelFactory`](super::InferenceTypeModelFactory).
#[derive(Clone, Debug, PartialEq)]
pub struct InferenceOptions {
    /// Weight of each primitive tag seeded on every identity.
    pub prior_weight: f64,
    /// Allowed deviation of a computed distribution from 1.
    pub probability_tolerance: f64,
    /// Score objects against discovered shapes by the properties accessed
    /// on them.
    pub structural_matching: bool,
    /// Treat well-known builtin property names (`length`, `push`, `call`,
    /// ...) as evidence of string, array or function types.
    pub builtin_property_hints: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            prior_weight: DEFAULT_PRIOR_WEIGHT,
            probability_tolerance: DEFAULT_PROBABILITY_TOLERANCE,
            structural_matching: true,
            builtin_property_hints: true,
        }
    }
}
