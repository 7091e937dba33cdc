// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::RelationResolver;
use crate::facts::{Id, RelationKind};
use crate::type_model::{Result, TypeTag};

/// Compound operators that only make sense on numbers.
fn is_numeric_compound(kind: RelationKind) -> bool {
    use RelationKind::*;
    matches!(
        kind,
        SubtractionAssignment
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
    )
}

impl RelationResolver<'_> {
    pub(super) fn assignment(
        &mut self,
        kind: RelationKind,
        id: &Id,
        left: Option<&Id>,
        right: Option<&Id>,
    ) -> Result<()> {
        self.link(left, right)?;
        self.link(Some(id), right)?;

        if is_numeric_compound(kind) {
            self.score(left, TypeTag::Numeric, 1.0)?;
            self.score(right, TypeTag::Numeric, 1.0)?;
        } else if kind == RelationKind::AdditionAssignment {
            for side in [left, right] {
                self.score(side, TypeTag::Numeric, 1.0)?;
                self.score(side, TypeTag::String, 1.0)?;
            }
        }
        Ok(())
    }
}
