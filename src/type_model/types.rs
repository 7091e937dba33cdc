// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::facts::Id;
use crate::Rc;

/// Type label assigned to evidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Numeric,
    String,
    Boolean,
    Null,
    Undefined,
    Regex,
    Object,
    Array,
    Function,
}

impl TypeTag {
    /// Tags seeded as a uniform prior on every identity.
    pub const PRIMITIVES: [TypeTag; 6] = [
        TypeTag::Numeric,
        TypeTag::String,
        TypeTag::Boolean,
        TypeTag::Null,
        TypeTag::Undefined,
        TypeTag::Regex,
    ];

    /// Object, array and function evidence is namespaced by its owner.
    pub fn is_structured(self) -> bool {
        matches!(self, TypeTag::Object | TypeTag::Array | TypeTag::Function)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Numeric => "numeric",
            TypeTag::String => "string",
            TypeTag::Boolean => "boolean",
            TypeTag::Null => "null",
            TypeTag::Undefined => "undefined",
            TypeTag::Regex => "regex",
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::Function => "function",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of a type-score table or a distribution.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKey {
    Primitive(TypeTag),
    /// Object, array or function evidence carried by `owner`.
    Structured { owner: Id, tag: TypeTag },
    /// Match against a discovered object shape.
    Shape(Id),
}

impl TypeKey {
    /// Key under which evidence of `tag` is stored for `owner`.
    pub fn for_tag(owner: &Id, tag: TypeTag) -> Self {
        if tag.is_structured() {
            TypeKey::Structured {
                owner: owner.clone(),
                tag,
            }
        } else {
            TypeKey::Primitive(tag)
        }
    }

    /// Tag of the key. Shapes have none.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            TypeKey::Primitive(tag) | TypeKey::Structured { tag, .. } => Some(*tag),
            TypeKey::Shape(_) => None,
        }
    }

    /// Typed form of the `"<owner>::OBJECT".ends_with(tag)` test: structured
    /// keys match their tag whatever their owner, shapes match nothing.
    pub fn matches(&self, tag: TypeTag) -> bool {
        self.tag() == Some(tag)
    }

    /// Identity whose description or shape backs this key.
    pub fn owner(&self) -> Option<&Id> {
        match self {
            TypeKey::Primitive(_) => None,
            TypeKey::Structured { owner, .. } | TypeKey::Shape(owner) => Some(owner),
        }
    }
}

impl From<TypeTag> for TypeKey {
    fn from(tag: TypeTag) -> Self {
        TypeKey::Primitive(tag)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Primitive(tag) => write!(f, "{tag}"),
            TypeKey::Structured { owner, tag } => {
                write!(f, "{owner}::{}", tag.as_str().to_uppercase())
            }
            TypeKey::Shape(id) => write!(f, "{id}"),
        }
    }
}

/// What has been observed about an identity used as an object, array, or
/// function.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ObjectDescription {
    pub properties: BTreeMap<Rc<str>, Id>,
    pub elements: BTreeSet<Id>,
    pub parameters: BTreeMap<usize, Id>,
    pub returns: BTreeSet<Id>,
}

impl ObjectDescription {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.elements.is_empty()
            && self.parameters.is_empty()
            && self.returns.is_empty()
    }
}
