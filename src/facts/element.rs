// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

use super::Id;
use crate::Rc;

/// Kind of a leaf syntactic unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    String,
    Numeric,
    Null,
    Boolean,
    #[serde(rename = "regex")]
    RegExp,
    Template,
    #[serde(rename = "bigint")]
    BigInt,
    Decimal,
    Undefined,
    Identifier,
}

impl ElementKind {
    pub fn is_identifier(self) -> bool {
        matches!(self, ElementKind::Identifier)
    }

    pub fn is_literal(self) -> bool {
        !self.is_identifier()
    }
}

/// A literal or an identifier reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: Id,
    pub kind: ElementKind,
    /// Identifier name, or the literal text without quotes.
    #[serde(default = "empty_value")]
    pub value: Rc<str>,
    /// Declaration an identifier resolves to. `None` means the identifier
    /// is unresolved (global) and binds to itself.
    #[serde(default)]
    pub binding_id: Option<Id>,
}

fn empty_value() -> Rc<str> {
    Rc::from("")
}

impl Element {
    pub fn literal(id: impl Into<Id>, kind: ElementKind, value: impl Into<Rc<str>>) -> Self {
        Element {
            id: id.into(),
            kind,
            value: value.into(),
            binding_id: None,
        }
    }

    pub fn identifier(id: impl Into<Id>, name: impl Into<Rc<str>>, binding_id: Option<Id>) -> Self {
        Element {
            id: id.into(),
            kind: ElementKind::Identifier,
            value: name.into(),
            binding_id,
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.kind.is_identifier()
    }

    /// The id all scoring for this element is redirected to. Literals are
    /// never bound.
    pub fn binding(&self) -> Option<&Id> {
        if !self.is_identifier() {
            return None;
        }
        Some(self.binding_id.as_ref().unwrap_or(&self.id))
    }
}
