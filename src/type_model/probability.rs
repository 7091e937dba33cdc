// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use log::warn;

use super::error::{Result, TypeModelError};
use super::types::{TypeKey, TypeTag};
use super::TypeModel;
use crate::facts::Id;

/// Normalized mapping from type key to likelihood, in first-seen order.
pub type Distribution = IndexMap<TypeKey, f64>;

/// Edges already followed in the current query, keyed by source id.
type Visited = BTreeMap<Id, BTreeSet<Id>>;

/// An identity whose distribution is being computed.
struct Frame {
    key: Id,
    total: f64,
    /// Edges claimed by this identity, in edge order.
    usable: Vec<(Id, f64)>,
    /// Index of the next related identity to fold in.
    next: usize,
    distribution: Distribution,
}

impl TypeModel {
    /// Probability distribution over the possible types of `id`.
    ///
    /// Direct type scores and the distributions of related identities are
    /// folded together, each related identity weighted by the score of the
    /// edge. An edge is followed at most once per call, so the contribution
    /// of a cycle past its first traversal is dropped.
    ///
    /// With `incorporate_execution_score`, the result is then reweighted by
    /// the runtime feedback recorded for `id`. Feedback is relative: scores
    /// are shifted so the least observed tag weighs zero, so a single
    /// observed tag, or equal observations, leave the distribution as is.
    pub fn calculate_probabilities_for_element(
        &self,
        incorporate_execution_score: bool,
        id: &str,
    ) -> Result<Distribution> {
        // Pending queries live on the heap so the depth of the relation
        // graph is not bounded by the native stack.
        let mut visited = Visited::new();
        let mut pending: Vec<Frame> = Vec::new();
        let mut frame = self.open(id, &mut visited)?;

        loop {
            if let Some((other, _)) = frame.usable.get(frame.next) {
                let child = self.open(other, &mut visited)?;
                pending.push(std::mem::replace(&mut frame, child));
                continue;
            }

            let distribution = self.close(incorporate_execution_score, frame)?;
            let Some(parent) = pending.pop() else {
                return Ok(distribution);
            };
            frame = parent;

            let weight = frame.usable[frame.next].1 / frame.total;
            for (type_key, probability) in distribution {
                *frame.distribution.entry(type_key).or_insert(0.0) += probability * weight;
            }
            frame.next += 1;
        }
    }

    /// Start the query for `id`: claim its unvisited edges and fold in its
    /// direct type scores.
    fn open(&self, id: &str, visited: &mut Visited) -> Result<Frame> {
        let key = self.graph.registered_key(id)?;
        let scores = self.graph.type_scores(id)?;
        let edges = self.graph.relation_scores(id)?;

        let seen = visited.entry(key.clone()).or_default();
        let usable: Vec<(Id, f64)> = edges
            .iter()
            .filter(|(other, _)| seen.insert((*other).clone()))
            .map(|(other, weight)| (other.clone(), *weight))
            .collect();

        let total: f64 =
            scores.values().sum::<f64>() + usable.iter().map(|(_, weight)| weight).sum::<f64>();
        if total == 0.0 {
            return Err(TypeModelError::ProbabilityInvariant { id: key, total });
        }

        let mut distribution = Distribution::new();
        for (type_key, score) in scores {
            *distribution.entry(type_key.clone()).or_insert(0.0) += score / total;
        }

        Ok(Frame {
            key,
            total,
            usable,
            next: 0,
            distribution,
        })
    }

    /// Finish the query of a frame whose related identities are all folded in.
    fn close(&self, incorporate_execution_score: bool, frame: Frame) -> Result<Distribution> {
        let sum: f64 = frame.distribution.values().sum();
        if (sum - 1.0).abs() >= self.tolerance {
            return Err(TypeModelError::ProbabilityInvariant {
                id: frame.key,
                total: sum,
            });
        }

        if incorporate_execution_score {
            self.apply_execution_scores(&frame.key, frame.distribution)
        } else {
            Ok(frame.distribution)
        }
    }

    fn apply_execution_scores(&self, id: &Id, distribution: Distribution) -> Result<Distribution> {
        let execution = self.graph.execution_scores(id)?;
        if execution.is_empty() {
            return Ok(distribution);
        }

        let min = execution.values().copied().fold(f64::INFINITY, f64::min);
        let shifted_total: f64 = execution.values().map(|score| score - min).sum();
        if shifted_total <= 0.0 {
            return Ok(distribution);
        }

        let share = |tag: TypeTag| {
            execution
                .get(&tag)
                .map_or(0.0, |score| (score - min) / shifted_total)
        };

        let weighted: Distribution = distribution
            .iter()
            .map(|(key, probability)| {
                let tag = key.tag().unwrap_or(TypeTag::Object);
                (key.clone(), probability * share(tag))
            })
            .collect();

        let total: f64 = weighted.values().sum();
        if total <= 0.0 {
            warn!("execution scores of `{id}` exclude every inferred type; ignoring them");
            return Ok(distribution);
        }

        Ok(weighted
            .into_iter()
            .map(|(key, probability)| (key, probability / total))
            .collect())
    }
}
