// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use indexmap::IndexMap;

use super::error::{Result, TypeModelError};
use super::graph::ScoreGraph;
use super::types::{TypeKey, TypeTag};
use super::{TypeModel, DEFAULT_PRIOR_WEIGHT, DEFAULT_PROBABILITY_TOLERANCE};
use crate::facts::{DiscoveredObjectType, Id};

/// Mutable construction surface of a [`TypeModel`].
///
/// Every mutation is additive. Scoring an identity that was not registered
/// with [`add_id`](Self::add_id) fails with
/// [`TypeModelError::UnregisteredId`].
#[derive(Clone, Debug)]
pub struct TypeModelBuilder {
    graph: ScoreGraph,
    discovered: IndexMap<Id, DiscoveredObjectType>,
    tolerance: f64,
}

impl TypeModelBuilder {
    pub fn new(discovered: IndexMap<Id, DiscoveredObjectType>) -> Self {
        TypeModelBuilder {
            graph: ScoreGraph::new(DEFAULT_PRIOR_WEIGHT, true),
            discovered,
            tolerance: DEFAULT_PROBABILITY_TOLERANCE,
        }
    }

    /// Weight of each primitive seeded by subsequent `add_id` calls.
    pub fn with_prior_weight(mut self, weight: f64) -> Self {
        self.graph.set_prior_weight(weight);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_builtin_property_hints(mut self, enabled: bool) -> Self {
        self.graph.set_property_hints(enabled);
        self
    }

    /// Register `id`. Registering twice is a no-op.
    pub fn add_id(&mut self, id: &Id) {
        self.graph.add_id(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.graph.contains(id)
    }

    pub fn add_type_score(&mut self, id: &str, tag: TypeTag, weight: f64) -> Result<()> {
        self.graph.add_type_score(id, tag, weight)
    }

    /// Evidence that `id` has the discovered shape `shape`.
    pub fn add_shape_score(&mut self, id: &str, shape: &str, weight: f64) -> Result<()> {
        let (shape, _) = self
            .discovered
            .get_key_value(shape)
            .ok_or_else(|| TypeModelError::MissingDiscoveredType { id: shape.into() })?;
        let key = TypeKey::Shape(shape.clone());
        self.graph.add_type_key(id, key, weight)
    }

    pub fn add_relation_score(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        self.graph.add_relation_score(a, b, weight)
    }

    pub fn add_execution_score(&mut self, id: &str, tag: TypeTag, weight: f64) -> Result<()> {
        self.graph.add_execution_score(id, tag, weight)
    }

    pub fn add_property(&mut self, owner: &str, name: &str, member: &str) -> Result<()> {
        self.graph.add_property(owner, name, member)
    }

    /// Declared member of a class body. Instance members say nothing about
    /// the constructor's own type, so `owner` is not scored.
    pub fn add_member(&mut self, owner: &str, name: &str, member: &str) -> Result<()> {
        self.graph.add_member(owner, name, member)
    }

    pub fn add_element(&mut self, owner: &str, element: &str) -> Result<()> {
        self.graph.add_element(owner, element)
    }

    pub fn add_parameter(&mut self, owner: &str, index: usize, param: &str) -> Result<()> {
        self.graph.add_parameter(owner, index, param)
    }

    pub fn add_return(&mut self, owner: &str, value: &str) -> Result<()> {
        self.graph.add_return(owner, value)
    }

    pub fn discovered_types(&self) -> &IndexMap<Id, DiscoveredObjectType> {
        &self.discovered
    }

    pub fn build(self) -> TypeModel {
        TypeModel {
            graph: self.graph,
            discovered: self.discovered,
            tolerance: self.tolerance,
        }
    }
}
