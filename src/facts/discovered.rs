// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Id;
use crate::Rc;

/// Syntax the shape was discovered from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveredObjectKind {
    #[default]
    Object,
    Class,
    Function,
}

/// Structural shape used as a duck-typing match target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredObjectType {
    pub id: Id,
    #[serde(default)]
    pub kind: DiscoveredObjectKind,
    /// Property name to the id of the member bound to that name.
    #[serde(default)]
    pub properties: BTreeMap<Rc<str>, Id>,
}

impl DiscoveredObjectType {
    pub fn new(id: impl Into<Id>, kind: DiscoveredObjectKind) -> Self {
        DiscoveredObjectType {
            id: id.into(),
            kind,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<Rc<str>>, member: impl Into<Id>) -> Self {
        self.properties.insert(name.into(), member.into());
        self
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &Rc<str>> {
        self.properties.keys()
    }
}
