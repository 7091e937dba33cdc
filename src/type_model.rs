// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Probabilistic type model.
//!
//! Every identity (element, relation, or binding) carries weighted evidence
//! about its type. Evidence comes in three channels:
//!
//! * direct type scores, keyed by [`TypeKey`],
//! * symmetric relation scores between identities whose types are
//!   correlated,
//! * optional execution scores recorded from runtime feedback.
//!
//! Distributions are not stored. They are computed on demand by
//! [`TypeModel::calculate_probabilities_for_element`], which folds the
//! distributions of related identities into the direct evidence. The
//! relation graph may contain cycles; each edge is followed at most once per
//! query and contributions beyond the first traversal are dropped.
//!
//! The module is split as follows:
//!
//! * `types.rs` holds [`TypeTag`], [`TypeKey`] and [`ObjectDescription`].
//! * `graph.rs` owns the score tables shared by builder and model.
//! * `hints.rs` maps well-known builtin property names to type tags.
//! * `builder.rs` is the mutable construction surface.
//! * `probability.rs` and `sampling.rs` implement the query surface.

mod builder;
mod error;
mod graph;
mod hints;
mod probability;
mod sampling;
mod types;

pub use builder::TypeModelBuilder;
pub use error::{Result, TypeModelError};
pub use probability::Distribution;
pub use types::{ObjectDescription, TypeKey, TypeTag};

use indexmap::IndexMap;

use crate::facts::{DiscoveredObjectType, Id};
use graph::ScoreGraph;

/// Weight of each primitive tag seeded by `add_id`.
pub const DEFAULT_PRIOR_WEIGHT: f64 = 0.1;

/// Allowed deviation of a normalized distribution from 1.
pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 1e-4;

/// Frozen type model produced by [`TypeModelBuilder::build`].
///
/// All queries take `&self`. Execution feedback is the only mutation and
/// requires exclusive access.
#[derive(Clone, Debug)]
pub struct TypeModel {
    graph: ScoreGraph,
    discovered: IndexMap<Id, DiscoveredObjectType>,
    tolerance: f64,
}

impl TypeModel {
    pub fn contains(&self, id: &str) -> bool {
        self.graph.contains(id)
    }

    /// Registered identities in id order.
    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.graph.ids()
    }

    pub fn type_scores(&self, id: &str) -> Result<&IndexMap<TypeKey, f64>> {
        self.graph.type_scores(id)
    }

    pub fn relation_scores(&self, id: &str) -> Result<&IndexMap<Id, f64>> {
        self.graph.relation_scores(id)
    }

    /// Weight of the edge between `a` and `b`, zero when unrelated.
    pub fn relation_score(&self, a: &str, b: &str) -> Result<f64> {
        self.graph.ensure_registered(b)?;
        Ok(self
            .graph
            .relation_scores(a)?
            .get(b)
            .copied()
            .unwrap_or(0.0))
    }

    pub fn execution_scores(&self, id: &str) -> Result<&IndexMap<TypeTag, f64>> {
        self.graph.execution_scores(id)
    }

    pub fn get_discovered_object_type(&self, id: &str) -> Result<&DiscoveredObjectType> {
        self.discovered
            .get(id)
            .ok_or_else(|| TypeModelError::MissingDiscoveredType { id: id.into() })
    }

    pub fn discovered_types(&self) -> &IndexMap<Id, DiscoveredObjectType> {
        &self.discovered
    }

    /// Properties, elements, parameters and returns observed for `id`.
    pub fn get_object_description(&self, id: &str) -> Result<&ObjectDescription> {
        self.graph.description(id)
    }

    /// Record runtime feedback that `id` was observed as `tag`.
    pub fn add_execution_score(&mut self, id: &str, tag: TypeTag, weight: f64) -> Result<()> {
        self.graph.add_execution_score(id, tag, weight)
    }
}
