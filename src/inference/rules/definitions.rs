// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{slot, RelationResolver};
use crate::facts::{Id, Relation, RelationKind};
use crate::type_model::{Result, TypeTag};
use crate::Rc;

impl RelationResolver<'_> {
    /// `[name, superclass, ...members]`
    pub(super) fn class_definition(&mut self, id: &Id, involved: &[Option<Id>]) -> Result<()> {
        self.score(Some(id), TypeTag::Function, 1.0)?;
        self.link(Some(id), slot(involved, 0))?;
        self.score(slot(involved, 1), TypeTag::Function, 1.0)?;
        self.record_members(id, involved.iter().skip(2), false)
    }

    /// `[...members]`
    pub(super) fn object_definition(&mut self, id: &Id, involved: &[Option<Id>]) -> Result<()> {
        self.score(Some(id), TypeTag::Object, 1.0)?;
        self.record_members(id, involved.iter(), true)
    }

    /// `[...elements]`, also used for array patterns.
    pub(super) fn array_definition(&mut self, id: &Id, involved: &[Option<Id>]) -> Result<()> {
        self.score(Some(id), TypeTag::Array, 1.0)?;
        for element in involved.iter().flatten() {
            self.builder.add_element(id, element)?;
        }
        Ok(())
    }

    /// `[name, ...params]`
    pub(super) fn function_definition(&mut self, id: &Id, involved: &[Option<Id>]) -> Result<()> {
        self.score(Some(id), TypeTag::Function, 1.0)?;
        self.link(Some(id), slot(involved, 0))?;
        self.record_parameters(id, involved)
    }

    /// Methods, constructors and setters: `[key, ...params]`.
    pub(super) fn method(&mut self, id: &Id, involved: &[Option<Id>]) -> Result<()> {
        self.score(Some(id), TypeTag::Function, 1.0)?;
        self.record_parameters(id, involved)
    }

    fn record_parameters(&mut self, id: &Id, involved: &[Option<Id>]) -> Result<()> {
        for (index, param) in involved.iter().skip(1).enumerate() {
            if let Some(param) = param {
                self.builder.add_parameter(id, index, param)?;
            }
        }
        Ok(())
    }

    /// Record named members of a class body or object literal in the
    /// description of `owner`. Properties point at their value, everything
    /// else at the member itself. Only object literal members are evidence
    /// that `owner` is an object.
    fn record_members<'i, I>(&mut self, owner: &Id, members: I, scored: bool) -> Result<()>
    where
        I: Iterator<Item = &'i Option<Id>>,
    {
        use RelationKind::*;

        let relations = self.relations;
        let bindings = self.bindings;
        for member in members.flatten() {
            let Some(member) = relations.get(member) else {
                continue;
            };
            let Some(name) = self.member_name(member) else {
                continue;
            };

            let target = match member.kind {
                ObjectProperty | ClassProperty => member
                    .slot(1)
                    .map(|value| bindings.resolve(value))
                    .unwrap_or(&member.id),
                ObjectMethod | ObjectGetter | ObjectSetter | ClassMethod | ClassGetter
                | ClassSetter | ClassConstructor => &member.id,
                _ => continue,
            };
            if scored {
                self.builder.add_property(owner, &name, target)?;
            } else {
                self.builder.add_member(owner, &name, target)?;
            }
        }
        Ok(())
    }

    /// Key of a member, `#name` for private members.
    fn member_name(&self, member: &Relation) -> Option<Rc<str>> {
        let key = member.slot(0)?;
        if let Some(element) = self.elements.get(key) {
            return Some(element.value.clone());
        }

        let private = self
            .relations
            .get(key)
            .filter(|relation| relation.kind == RelationKind::PrivateName)?;
        let name = self.elements.get(private.slot(0)?)?;
        Some(format!("#{}", name.value).into())
    }
}
