// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::RelationResolver;
use crate::facts::Id;
use crate::type_model::{Result, TypeTag};

impl RelationResolver<'_> {
    /// `+` concatenates as readily as it adds.
    pub(super) fn addition(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        for operand in [left, right] {
            self.score(operand, TypeTag::Numeric, 1.0)?;
            self.score(operand, TypeTag::String, 1.0)?;
        }
        self.score(Some(id), TypeTag::Numeric, 1.0)?;
        self.link(Some(id), left)?;
        self.link(Some(id), right)
    }

    /// `-`, `*`, `/`, `%` and `**` are numeric in all but contrived code.
    pub(super) fn arithmetic(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        self.score(left, TypeTag::Numeric, 1.0)?;
        self.score(right, TypeTag::Numeric, 1.0)?;
        self.score(Some(id), TypeTag::Numeric, 2.0)?;
        self.link(Some(id), left)?;
        self.link(Some(id), right)
    }

    pub(super) fn bitwise(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        self.score(left, TypeTag::Numeric, 1.0)?;
        self.score(right, TypeTag::Numeric, 1.0)?;
        self.score(Some(id), TypeTag::Numeric, 2.0)
    }

    pub(super) fn comparison(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        self.score(left, TypeTag::Numeric, 1.0)?;
        self.score(right, TypeTag::Numeric, 1.0)?;
        self.score(Some(id), TypeTag::Boolean, 1.0)
    }

    pub(super) fn instance_of(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        self.score(left, TypeTag::Object, 1.0)?;
        self.score(right, TypeTag::Function, 1.0)?;
        self.score(Some(id), TypeTag::Boolean, 1.0)
    }

    /// `key in object`.
    pub(super) fn membership(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        self.score(left, TypeTag::String, 1.0)?;
        self.score(right, TypeTag::Object, 1.0)?;
        self.score(Some(id), TypeTag::Boolean, 1.0)
    }

    /// Compared operands are presumed to share a type.
    pub(super) fn equality(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        self.link(left, right)?;
        self.score(Some(id), TypeTag::Boolean, 1.0)
    }

    /// `&&` and `||` yield one of their operands.
    pub(super) fn logical(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        self.score(left, TypeTag::Boolean, 1.0)?;
        self.score(right, TypeTag::Boolean, 1.0)?;
        self.link(Some(id), left)?;
        self.link(Some(id), right)?;
        self.score(Some(id), TypeTag::Boolean, 1.0)
    }

    pub(super) fn nullish(&mut self, id: &Id, left: Option<&Id>, right: Option<&Id>) -> Result<()> {
        self.link(Some(id), left)?;
        self.link(Some(id), right)
    }

    pub(super) fn numeric_unary(&mut self, id: &Id, argument: Option<&Id>) -> Result<()> {
        self.score(argument, TypeTag::Numeric, 1.0)?;
        self.score(Some(id), TypeTag::Numeric, 1.0)
    }
}
