// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::error::{Result, TypeModelError};
use super::hints::property_hints;
use super::types::{ObjectDescription, TypeKey, TypeTag};
use crate::facts::Id;

/// Per-identity evidence tables.
///
/// Identities are registered by `add_id`; every other table is keyed by a
/// registered identity only. Edges are stored id-to-id in both directions.
#[derive(Clone, Debug)]
pub(super) struct ScoreGraph {
    prior_weight: f64,
    property_hints: bool,
    type_score: BTreeMap<Id, IndexMap<TypeKey, f64>>,
    relation_score: BTreeMap<Id, IndexMap<Id, f64>>,
    execution_score: BTreeMap<Id, IndexMap<TypeTag, f64>>,
    descriptions: BTreeMap<Id, ObjectDescription>,
}

impl ScoreGraph {
    pub(super) fn new(prior_weight: f64, property_hints: bool) -> Self {
        ScoreGraph {
            prior_weight,
            property_hints,
            type_score: BTreeMap::new(),
            relation_score: BTreeMap::new(),
            execution_score: BTreeMap::new(),
            descriptions: BTreeMap::new(),
        }
    }

    pub(super) fn set_prior_weight(&mut self, weight: f64) {
        self.prior_weight = weight;
    }

    pub(super) fn set_property_hints(&mut self, enabled: bool) {
        self.property_hints = enabled;
    }

    pub(super) fn contains(&self, id: &str) -> bool {
        self.type_score.contains_key(id)
    }

    pub(super) fn ids(&self) -> impl Iterator<Item = &Id> {
        self.type_score.keys()
    }

    pub(super) fn ensure_registered(&self, id: &str) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(unregistered(id))
        }
    }

    /// Register `id` with the primitive prior. Returns `false` if it was
    /// already present, in which case nothing changes.
    pub(super) fn add_id(&mut self, id: &Id) -> bool {
        if self.contains(id) {
            return false;
        }

        let prior = TypeTag::PRIMITIVES
            .iter()
            .map(|tag| (TypeKey::Primitive(*tag), self.prior_weight))
            .collect();
        self.type_score.insert(id.clone(), prior);
        self.relation_score.insert(id.clone(), IndexMap::new());
        self.execution_score.insert(id.clone(), IndexMap::new());
        self.descriptions
            .insert(id.clone(), ObjectDescription::default());
        true
    }

    pub(super) fn add_type_key(&mut self, id: &str, key: TypeKey, weight: f64) -> Result<()> {
        let scores = self
            .type_score
            .get_mut(id)
            .ok_or_else(|| unregistered(id))?;
        *scores.entry(key).or_insert(0.0) += weight;
        Ok(())
    }

    pub(super) fn add_type_score(&mut self, id: &str, tag: TypeTag, weight: f64) -> Result<()> {
        let owner = self.registered_key(id)?;
        self.add_type_key(id, TypeKey::for_tag(&owner, tag), weight)
    }

    pub(super) fn add_relation_score(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        let a = self.registered_key(a)?;
        let b = self.registered_key(b)?;
        // A self edge is both directions of one cell and accumulates twice.
        for (from, to) in [(&a, &b), (&b, &a)] {
            if let Some(edges) = self.relation_score.get_mut(from) {
                *edges.entry(to.clone()).or_insert(0.0) += weight;
            }
        }
        Ok(())
    }

    pub(super) fn add_execution_score(&mut self, id: &str, tag: TypeTag, weight: f64) -> Result<()> {
        let scores = self
            .execution_score
            .get_mut(id)
            .ok_or_else(|| unregistered(id))?;
        *scores.entry(tag).or_insert(0.0) += weight;
        Ok(())
    }

    pub(super) fn type_scores(&self, id: &str) -> Result<&IndexMap<TypeKey, f64>> {
        self.type_score.get(id).ok_or_else(|| unregistered(id))
    }

    pub(super) fn relation_scores(&self, id: &str) -> Result<&IndexMap<Id, f64>> {
        self.relation_score.get(id).ok_or_else(|| unregistered(id))
    }

    pub(super) fn execution_scores(&self, id: &str) -> Result<&IndexMap<TypeTag, f64>> {
        self.execution_score.get(id).ok_or_else(|| unregistered(id))
    }

    pub(super) fn description(&self, id: &str) -> Result<&ObjectDescription> {
        self.descriptions.get(id).ok_or_else(|| unregistered(id))
    }

    /// Record that `owner.name` evaluates to `member`. Accessing a property
    /// is evidence of an object, and of a string, array or function when the
    /// name is a well-known builtin.
    pub(super) fn add_property(&mut self, owner: &str, name: &str, member: &str) -> Result<()> {
        self.add_member(owner, name, member)?;
        self.add_type_score(owner, TypeTag::Object, 1.0)?;
        if self.property_hints {
            for tag in property_hints(name) {
                self.add_type_score(owner, tag, 1.0)?;
            }
        }
        Ok(())
    }

    /// Record `member` under `name` without scoring `owner`.
    pub(super) fn add_member(&mut self, owner: &str, name: &str, member: &str) -> Result<()> {
        let member = self.registered_key(member)?;
        self.description_mut(owner)?
            .properties
            .insert(name.into(), member);
        Ok(())
    }

    pub(super) fn add_element(&mut self, owner: &str, element: &str) -> Result<()> {
        let element = self.registered_key(element)?;
        self.description_mut(owner)?.elements.insert(element);
        self.add_type_score(owner, TypeTag::Array, 1.0)
    }

    pub(super) fn add_parameter(&mut self, owner: &str, index: usize, param: &str) -> Result<()> {
        let param = self.registered_key(param)?;
        self.description_mut(owner)?.parameters.insert(index, param);
        self.add_type_score(owner, TypeTag::Function, 1.0)
    }

    pub(super) fn add_return(&mut self, owner: &str, value: &str) -> Result<()> {
        let value = self.registered_key(value)?;
        self.description_mut(owner)?.returns.insert(value);
        self.add_type_score(owner, TypeTag::Function, 1.0)
    }

    fn description_mut(&mut self, id: &str) -> Result<&mut ObjectDescription> {
        self.descriptions
            .get_mut(id)
            .ok_or_else(|| unregistered(id))
    }

    /// The stored key for `id`, so callers holding a `&str` can reuse the
    /// shared allocation.
    pub(super) fn registered_key(&self, id: &str) -> Result<Id> {
        self.type_score
            .get_key_value(id)
            .map(|(key, _)| key.clone())
            .ok_or_else(|| unregistered(id))
    }
}

fn unregistered(id: &str) -> TypeModelError {
    TypeModelError::UnregisteredId { id: id.into() }
}
