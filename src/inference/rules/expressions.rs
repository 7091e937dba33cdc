// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::RelationResolver;
use crate::facts::{ElementKind, Id, Relation};
use crate::inference::structural::accessed_property_name;
use crate::type_model::{Result, TypeTag};

impl RelationResolver<'_> {
    /// `[function, value]`. A bare `return;` yields `undefined`.
    pub(super) fn return_value(
        &mut self,
        id: &Id,
        function: Option<&Id>,
        value: Option<&Id>,
    ) -> Result<()> {
        let returned = match value {
            Some(value) => {
                self.link(Some(value), Some(id))?;
                value
            }
            None => {
                self.score(Some(id), TypeTag::Undefined, 1.0)?;
                id
            }
        };

        match function {
            Some(function) => self.builder.add_return(function, returned),
            None => Ok(()),
        }
    }

    /// `[object, property]`. A numeric literal key indexes an array, any
    /// other statically known key names a property of the object.
    pub(super) fn property_access(
        &mut self,
        id: &Id,
        relation: &Relation,
        object: Option<&Id>,
        property: Option<&Id>,
    ) -> Result<()> {
        let elements = self.elements;
        if let Some(object) = object {
            let key = relation.slot(1).and_then(|key| elements.get(key));
            if key.is_some_and(|key| key.kind == ElementKind::Numeric) {
                self.builder.add_element(object, id)?;
            } else if let Some(name) = accessed_property_name(relation, elements) {
                self.builder.add_property(object, &name, id)?;
            }
        }
        self.link(Some(id), property)
    }

    /// The call's value is what the callee returns.
    pub(super) fn call(&mut self, id: &Id, callee: Option<&Id>) -> Result<()> {
        match callee {
            Some(callee) => self.builder.add_return(callee, id),
            None => Ok(()),
        }
    }

    /// The instance is evidenced by whatever the constructor is.
    pub(super) fn construct(&mut self, id: &Id, callee: Option<&Id>) -> Result<()> {
        self.score(callee, TypeTag::Function, 1.0)?;
        self.link(Some(id), callee)
    }

    /// `[...enclosing definitions]`, innermost first. Arrow functions do not
    /// bind `this` and are skipped.
    pub(super) fn this(&mut self, id: &Id, enclosing: &[Option<Id>]) -> Result<()> {
        let relations = self.relations;
        let owner = enclosing.iter().flatten().find(|candidate| {
            relations
                .get(*candidate)
                .is_some_and(|relation| relation.kind.binds_this())
        });
        self.link(Some(id), owner)
    }

    pub(super) fn conditional(
        &mut self,
        id: &Id,
        test: Option<&Id>,
        consequent: Option<&Id>,
        alternate: Option<&Id>,
    ) -> Result<()> {
        self.score(test, TypeTag::Boolean, 1.0)?;
        self.link(Some(id), consequent)?;
        self.link(Some(id), alternate)
    }
}
