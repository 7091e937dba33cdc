// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{is_anonymous, Id};

/// Syntactic construct a [`Relation`] stands for.
///
/// The layout of [`Relation::involved`] is fixed per kind; see
/// [`RelationKind::arity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    // Definitions.
    /// `[name, superclass, ...members]`
    ClassDefinition,
    /// `[...members]`
    ObjectDefinition,
    /// `[...elements]`
    ArrayDefinition,
    /// `[name, ...params]`
    FunctionDefinition,
    /// `[name, ...params]`
    ArrowFunctionDefinition,

    // Members.
    /// `[key, value]`
    ObjectProperty,
    /// `[key, ...params]`
    ObjectMethod,
    /// `[key]`
    ObjectGetter,
    /// `[key, param]`
    ObjectSetter,
    /// `[key, value]`
    ClassProperty,
    /// `[key, ...params]`
    ClassMethod,
    /// `[key]`
    ClassGetter,
    /// `[key, param]`
    ClassSetter,
    /// `[key, ...params]`
    ClassConstructor,

    // Expressions.
    /// `[function, value]`
    Return,
    /// `[object, property]`
    PropertyAccessor,
    /// `[object, property]`
    OptionalPropertyAccessor,
    /// `[callee, ...args]`
    Call,
    /// `[callee, ...args]`
    OptionalCall,
    /// `[callee, ...args]`
    New,
    /// `[...enclosing definitions]`, innermost first.
    This,
    Spread,
    Await,
    Yield,
    DelegateYield,
    /// `[...expressions]`
    TemplateLiteral,
    /// `[tag, quasi]`
    TaggedTemplate,
    /// `[...expressions]`
    Sequence,
    /// `[test, consequent, alternate]`
    Conditional,

    // Unary.
    PlusPlusPostfix,
    MinusMinusPostfix,
    PlusPlusPrefix,
    MinusMinusPrefix,
    PlusPrefix,
    MinusPrefix,
    BitwiseNotPrefix,
    LogicalNotPrefix,
    TypeOf,
    Delete,
    Void,

    // Arithmetic.
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
    Exponentiation,

    // Bitwise.
    LeftShift,
    RightShift,
    UnsignedRightShift,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,

    // Relational.
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    InstanceOf,
    In,

    // Equality.
    Equality,
    Inequality,
    StrictEquality,
    StrictInequality,

    // Logical.
    LogicalAnd,
    LogicalOr,
    NullishCoalescing,

    // Assignment.
    Assignment,
    AdditionAssignment,
    SubtractionAssignment,
    MultiplicationAssignment,
    DivisionAssignment,
    RemainderAssignment,
    ExponentiationAssignment,
    LeftShiftAssignment,
    RightShiftAssignment,
    UnsignedRightShiftAssignment,
    BitwiseAndAssignment,
    BitwiseOrAssignment,
    BitwiseXorAssignment,
    LogicalAndAssignment,
    LogicalOrAssignment,
    NullishAssignment,

    // Patterns.
    /// `[...members]`
    ObjectPattern,
    /// `[...elements]`
    ArrayPattern,
    RestElement,
    /// `[left, right]`
    AssignmentPattern,

    /// `[name]`
    PrivateName,
}

/// Number of involved ids a relation kind accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
            Arity::Any => write!(f, "any number of"),
        }
    }
}

impl RelationKind {
    pub fn arity(self) -> Arity {
        use RelationKind::*;
        match self {
            ObjectDefinition | ArrayDefinition | TemplateLiteral | ObjectPattern | ArrayPattern
            | This => Arity::Any,

            ClassDefinition => Arity::AtLeast(2),
            FunctionDefinition | ArrowFunctionDefinition | ObjectMethod | ClassMethod
            | ClassConstructor | Call | OptionalCall | New | Sequence => Arity::AtLeast(1),

            ObjectGetter | ClassGetter | PrivateName => Arity::Exact(1),

            Spread | Await | Yield | DelegateYield | RestElement => Arity::Exact(1),

            PlusPlusPostfix | MinusMinusPostfix | PlusPlusPrefix | MinusMinusPrefix
            | PlusPrefix | MinusPrefix | BitwiseNotPrefix | LogicalNotPrefix | TypeOf | Delete
            | Void => Arity::Exact(1),

            Conditional => Arity::Exact(3),

            ObjectProperty | ObjectSetter | ClassProperty | ClassSetter | Return
            | PropertyAccessor | OptionalPropertyAccessor | TaggedTemplate | AssignmentPattern => {
                Arity::Exact(2)
            }

            Addition | Subtraction | Multiplication | Division | Remainder | Exponentiation
            | LeftShift | RightShift | UnsignedRightShift | BitwiseAnd | BitwiseOr | BitwiseXor
            | Less | LessOrEqual | Greater | GreaterOrEqual | InstanceOf | In | Equality
            | Inequality | StrictEquality | StrictInequality | LogicalAnd | LogicalOr
            | NullishCoalescing => Arity::Exact(2),

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
            | NullishAssignment => Arity::Exact(2),
        }
    }

    pub fn is_property_accessor(self) -> bool {
        matches!(
            self,
            RelationKind::PropertyAccessor | RelationKind::OptionalPropertyAccessor
        )
    }

    /// Definitions that give `this` a meaning inside their body.
    pub fn binds_this(self) -> bool {
        use RelationKind::*;
        matches!(
            self,
            ClassDefinition
                | FunctionDefinition
                | ObjectMethod
                | ObjectGetter
                | ObjectSetter
                | ClassMethod
                | ClassGetter
                | ClassSetter
                | ClassConstructor
        )
    }
}

/// A composite syntactic fact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: Id,
    pub kind: RelationKind,
    /// Participating element or relation ids. Missing slots hold
    /// [`ANONYMOUS_ID`](super::ANONYMOUS_ID).
    #[serde(default)]
    pub involved: Vec<Id>,
    /// Property access through a bracket key.
    #[serde(default)]
    pub computed: bool,
}

impl Relation {
    pub fn new<I>(id: impl Into<Id>, kind: RelationKind, involved: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        Relation {
            id: id.into(),
            kind,
            involved: involved.into_iter().map(Into::into).collect(),
            computed: false,
        }
    }

    pub fn with_computed(mut self, computed: bool) -> Self {
        self.computed = computed;
        self
    }

    /// Involved id at `index`, unless the slot is missing or anonymous.
    pub fn slot(&self, index: usize) -> Option<&Id> {
        self.involved.get(index).filter(|id| !is_anonymous(id))
    }

    pub fn is_well_formed(&self) -> bool {
        self.kind.arity().accepts(self.involved.len())
    }
}
