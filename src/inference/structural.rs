// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Duck-typed matching of accessed properties against discovered shapes.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use log::trace;

use super::bindings::BindingTable;
use crate::facts::{DiscoveredObjectType, Element, ElementKind, Id, Relation};
use crate::type_model::{Result, TypeModelBuilder};
use crate::Rc;

/// Reverse index from property name to the shapes declaring it.
#[derive(Clone, Debug, Default)]
pub struct PropertyIndex {
    shapes_by_property: BTreeMap<Rc<str>, BTreeSet<Id>>,
}

impl PropertyIndex {
    pub fn new(discovered: &IndexMap<Id, DiscoveredObjectType>) -> Self {
        let mut shapes_by_property: BTreeMap<Rc<str>, BTreeSet<Id>> = BTreeMap::new();
        for (shape_id, shape) in discovered {
            for name in shape.property_names() {
                shapes_by_property
                    .entry(name.clone())
                    .or_default()
                    .insert(shape_id.clone());
            }
        }
        Self { shapes_by_property }
    }

    pub fn shapes_with(&self, name: &str) -> Option<&BTreeSet<Id>> {
        self.shapes_by_property.get(name)
    }

    /// Shapes that declare every name in `names`.
    pub fn shapes_with_all<'a, I>(&self, names: I) -> BTreeSet<Id>
    where
        I: IntoIterator<Item = &'a Rc<str>>,
    {
        let mut candidates: Option<BTreeSet<Id>> = None;
        for name in names {
            let Some(shapes) = self.shapes_with(name) else {
                return BTreeSet::new();
            };
            candidates = Some(match candidates {
                Some(current) => current.intersection(shapes).cloned().collect(),
                None => shapes.clone(),
            });
        }
        candidates.unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.shapes_by_property.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes_by_property.is_empty()
    }
}

/// Name of the property read by an accessor relation, when statically
/// known. Bracket accesses only count when the key is a string or numeric
/// literal.
pub fn accessed_property_name(
    relation: &Relation,
    elements: &IndexMap<Id, Element>,
) -> Option<Rc<str>> {
    let property = elements.get(relation.slot(1)?)?;
    let named = if relation.computed {
        matches!(
            property.kind,
            ElementKind::String | ElementKind::Template | ElementKind::Numeric
        )
    } else {
        matches!(property.kind, ElementKind::Identifier | ElementKind::String)
    };
    named.then(|| property.value.clone())
}

/// Score every accessed object against the discovered shapes that declare
/// all of its accessed properties. Returns the number of shape scores added.
pub fn match_shapes(
    builder: &mut TypeModelBuilder,
    index: &PropertyIndex,
    bindings: &BindingTable,
    elements: &IndexMap<Id, Element>,
    relations: &IndexMap<Id, Relation>,
) -> Result<usize> {
    let mut groups: IndexMap<Id, Vec<Rc<str>>> = IndexMap::new();
    for relation in relations.values() {
        if !relation.kind.is_property_accessor() {
            continue;
        }
        let Some(object) = relation.slot(0) else {
            continue;
        };
        let Some(name) = accessed_property_name(relation, elements) else {
            continue;
        };
        groups
            .entry(bindings.resolve(object).clone())
            .or_default()
            .push(name);
    }

    let mut matched = 0;
    for (object, names) in &groups {
        let candidates = index.shapes_with_all(names);
        // Discovery order keeps the resulting type scores deterministic.
        let shapes: Vec<Id> = builder
            .discovered_types()
            .keys()
            .filter(|shape| candidates.contains(*shape))
            .cloned()
            .collect();
        for shape in shapes {
            trace!("`{object}` matches shape `{shape}` on {} accesses", names.len());
            builder.add_shape_score(object, &shape, names.len() as f64)?;
            matched += 1;
        }
    }
    Ok(matched)
}
