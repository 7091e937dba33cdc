// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use indexmap::IndexMap;

use crate::facts::{Id, Relation, RelationKind};

/// Kinds resolved ahead of everything else, in this order. Definitions come
/// first so that member and access rules see their evidence.
const PRIORITY: &[RelationKind] = &[
    RelationKind::ClassDefinition,
    RelationKind::ObjectDefinition,
    RelationKind::ArrayDefinition,
    RelationKind::FunctionDefinition,
    RelationKind::ArrowFunctionDefinition,
    RelationKind::ClassProperty,
    RelationKind::ObjectProperty,
    RelationKind::ClassMethod,
    RelationKind::ObjectMethod,
    RelationKind::ClassGetter,
    RelationKind::ObjectGetter,
    RelationKind::ClassSetter,
    RelationKind::ObjectSetter,
    RelationKind::ClassConstructor,
    RelationKind::Return,
    RelationKind::PropertyAccessor,
    RelationKind::OptionalPropertyAccessor,
];

fn rank(kind: RelationKind) -> usize {
    PRIORITY
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(PRIORITY.len())
}

/// Relations in resolution order. The sort is stable, so relations of the
/// same rank keep their encounter order.
pub fn resolution_order(relations: &IndexMap<Id, Relation>) -> Vec<&Relation> {
    let mut ordered: Vec<&Relation> = relations.values().collect();
    ordered.sort_by_key(|relation| rank(relation.kind));
    ordered
}
