// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-kind scoring rules.
//!
//! Every relation kind has exactly one arm in [`RelationResolver::resolve`].
//! Handlers receive the involved ids already resolved through the binding
//! table, with anonymous slots as `None`.

mod assignment;
mod definitions;
mod expressions;
mod operators;

use indexmap::IndexMap;
use log::trace;

use super::bindings::BindingTable;
use crate::facts::{is_anonymous, Element, Id, Relation, RelationKind};
use crate::type_model::{Result, TypeModelBuilder, TypeTag};

pub(super) struct RelationResolver<'a> {
    builder: &'a mut TypeModelBuilder,
    bindings: &'a BindingTable,
    elements: &'a IndexMap<Id, Element>,
    relations: &'a IndexMap<Id, Relation>,
}

/// Involved id at `index`, if present and not anonymous.
fn slot(involved: &[Option<Id>], index: usize) -> Option<&Id> {
    involved.get(index).and_then(Option::as_ref)
}

impl<'a> RelationResolver<'a> {
    pub(super) fn new(
        builder: &'a mut TypeModelBuilder,
        bindings: &'a BindingTable,
        elements: &'a IndexMap<Id, Element>,
        relations: &'a IndexMap<Id, Relation>,
    ) -> Self {
        Self {
            builder,
            bindings,
            elements,
            relations,
        }
    }

    pub(super) fn resolve(&mut self, relation: &Relation) -> Result<()> {
        use RelationKind::*;

        trace!("resolving {:?} `{}`", relation.kind, relation.id);
        let id = &relation.id;
        let involved = self.involved(relation);
        let first = slot(&involved, 0);
        let second = slot(&involved, 1);

        match relation.kind {
            ClassDefinition => self.class_definition(id, &involved),
            ObjectDefinition => self.object_definition(id, &involved),
            ArrayDefinition => self.array_definition(id, &involved),
            FunctionDefinition | ArrowFunctionDefinition => {
                self.function_definition(id, &involved)
            }

            ObjectProperty | ClassProperty => self.link(Some(id), second),
            ObjectMethod | ClassMethod | ClassConstructor => self.method(id, &involved),
            ObjectGetter | ClassGetter => self.score(Some(id), TypeTag::Function, 1.0),
            ObjectSetter | ClassSetter => self.method(id, &involved),

            Return => self.return_value(id, first, second),
            PropertyAccessor | OptionalPropertyAccessor => {
                self.property_access(id, relation, first, second)
            }
            Call | OptionalCall => self.call(id, first),
            New => self.construct(id, first),
            This => self.this(id, &involved),
            Spread | Await => self.link(Some(id), first),
            Sequence => self.link(Some(id), involved.last().and_then(Option::as_ref)),
            Yield | DelegateYield => Ok(()),
            TemplateLiteral => self.score(Some(id), TypeTag::String, 1.0),
            TaggedTemplate => self.score(first, TypeTag::Function, 1.0),
            Conditional => self.conditional(id, first, second, slot(&involved, 2)),

            PlusPlusPostfix | MinusMinusPostfix | PlusPlusPrefix | MinusMinusPrefix
            | PlusPrefix | MinusPrefix | BitwiseNotPrefix => self.numeric_unary(id, first),
            LogicalNotPrefix | Delete => self.score(Some(id), TypeTag::Boolean, 1.0),
            TypeOf => self.score(Some(id), TypeTag::String, 1.0),
            Void => self.score(Some(id), TypeTag::Undefined, 1.0),

            Addition => self.addition(id, first, second),
            Subtraction | Multiplication | Division | Remainder | Exponentiation => {
                self.arithmetic(id, first, second)
            }
            LeftShift | RightShift | UnsignedRightShift | BitwiseAnd | BitwiseOr | BitwiseXor => {
                self.bitwise(id, first, second)
            }
            Less | LessOrEqual | Greater | GreaterOrEqual => self.comparison(id, first, second),
            InstanceOf => self.instance_of(id, first, second),
            In => self.membership(id, first, second),
            Equality | Inequality | StrictEquality | StrictInequality => {
                self.equality(id, first, second)
            }
            LogicalAnd | LogicalOr => self.logical(id, first, second),
            NullishCoalescing => self.nullish(id, first, second),

            Assignment
            | AdditionAssignment
            | SubtractionAssignment
            | MultiplicationAssignment
            | DivisionAssignment
            | RemainderAssignment
            | ExponentiationAssignment
            | LeftShiftAssignment
            | RightShiftAssignment
            | UnsignedRightShiftAssignment
            | BitwiseAndAssignment
            | BitwiseOrAssignment
            | BitwiseXorAssignment
            | LogicalAndAssignment
            | LogicalOrAssignment
            | NullishAssignment => self.assignment(relation.kind, id, first, second),

            ObjectPattern => self.score(Some(id), TypeTag::Object, 1.0),
            ArrayPattern => self.array_definition(id, &involved),
            RestElement => self.score(first, TypeTag::Array, 1.0),
            AssignmentPattern => self.link(first, second),

            PrivateName => Ok(()),
        }
    }

    fn involved(&self, relation: &Relation) -> Vec<Option<Id>> {
        relation
            .involved
            .iter()
            .map(|id| (!is_anonymous(id)).then(|| self.bindings.resolve(id).clone()))
            .collect()
    }

    fn score(&mut self, id: Option<&Id>, tag: TypeTag, weight: f64) -> Result<()> {
        match id {
            Some(id) => self.builder.add_type_score(id, tag, weight),
            None => Ok(()),
        }
    }

    fn link(&mut self, a: Option<&Id>, b: Option<&Id>) -> Result<()> {
        match (a, b) {
            (Some(a), Some(b)) => self.builder.add_relation_score(a, b, 1.0),
            _ => Ok(()),
        }
    }
}
