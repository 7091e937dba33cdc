// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::facts::Id;
use crate::type_model::{Result, TypeModelError};

/// Union of identifier uses with their declarations.
///
/// A use may only ever be bound to one declaration. Declarations may
/// themselves be bound further, so resolution follows chains to the root.
/// Bindings that would close a cycle are dropped, which keeps every chain
/// finite.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    bindings: BTreeMap<Id, Id>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to `target`. Binding an id to itself records nothing.
    pub fn bind(&mut self, id: &Id, target: &Id) -> Result<()> {
        if id == target {
            return Ok(());
        }

        match self.bindings.get(id) {
            Some(existing) if existing != target => Err(TypeModelError::BindingConflict {
                id: id.clone(),
                existing: existing.clone(),
                conflicting: target.clone(),
            }),
            Some(_) => Ok(()),
            // `target` already resolves to `id`: the two are one alias set.
            None if self.resolve(target) == id => Ok(()),
            None => {
                self.bindings.insert(id.clone(), target.clone());
                Ok(())
            }
        }
    }

    /// Root declaration of `id`, or `id` itself when unbound.
    pub fn resolve<'a>(&'a self, id: &'a Id) -> &'a Id {
        let mut current = id;
        while let Some(next) = self.bindings.get(current) {
            current = next;
        }
        current
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.bindings.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
