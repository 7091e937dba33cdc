// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use rand::Rng;

use super::error::{Result, TypeModelError};
use super::types::{TypeKey, TypeTag};
use super::TypeModel;

impl TypeModel {
    /// Draw a type for `id` at random, weighted by its distribution.
    ///
    /// When `match_tag` is given, only keys matching it are candidates and
    /// their probabilities are renormalized over that subset. Returns `None`
    /// if no candidate remains.
    pub fn get_random_type<R: Rng + ?Sized>(
        &self,
        incorporate_execution_score: bool,
        id: &str,
        match_tag: Option<TypeTag>,
        rng: &mut R,
    ) -> Result<Option<TypeKey>> {
        let distribution = self.calculate_probabilities_for_element(incorporate_execution_score, id)?;
        let mut candidates: Vec<(TypeKey, f64)> = distribution
            .into_iter()
            .filter(|(key, probability)| {
                *probability > 0.0 && match_tag.map_or(true, |tag| key.matches(tag))
            })
            .collect();

        let total: f64 = candidates.iter().map(|(_, probability)| probability).sum();
        if total <= 0.0 {
            return Ok(None);
        }

        let mut choice = rng.gen::<f64>() * total;
        for (key, probability) in &candidates {
            if choice < *probability {
                return Ok(Some(key.clone()));
            }
            choice -= probability;
        }

        // Rounding can leave a sliver past the last bucket.
        Ok(candidates.pop().map(|(key, _)| key))
    }

    /// Most likely type of `id`. Ties go to the key seen first.
    pub fn get_highest_probability_type(
        &self,
        incorporate_execution_score: bool,
        id: &str,
    ) -> Result<TypeKey> {
        let distribution = self.calculate_probabilities_for_element(incorporate_execution_score, id)?;
        let mut best: Option<(TypeKey, f64)> = None;
        for (key, probability) in distribution {
            match &best {
                Some((_, top)) if probability <= *top => {}
                _ => best = Some((key, probability)),
            }
        }

        best.map(|(key, _)| key)
            .ok_or_else(|| TypeModelError::ProbabilityInvariant {
                id: id.into(),
                total: 0.0,
            })
    }
}
