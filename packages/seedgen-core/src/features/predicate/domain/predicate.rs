//! Predicate Domain Models
//!
//! A predicate is one abstracted branch guard over a single variable:
//! `Len > 0`, `Flags & 0x01`, `This != NULL`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Variable identifier in predicates
pub type VarId = String;

/// Guard kinds recognised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateKind {
    /// var == operand
    #[serde(alias = "eq")]
    Equal,
    /// var != operand
    #[serde(alias = "neq")]
    NotEqual,
    /// var < operand (signed)
    #[serde(alias = "lt")]
    Less,
    /// var > operand (signed)
    #[serde(alias = "gt")]
    Greater,
    /// var <= operand (signed)
    #[serde(alias = "le")]
    LessOrEqual,
    /// var >= operand (signed)
    #[serde(alias = "ge")]
    GreaterOrEqual,
    /// var != 0
    #[serde(alias = "null", alias = "not_null")]
    NonNull,
    /// (var & operand) != 0
    #[serde(alias = "flags", alias = "flag")]
    BitmaskSet,
}

impl PredicateKind {
    /// Branch-flip negation
    ///
    /// An involution on the six ordering/equality kinds. `NonNull` and
    /// `BitmaskSet` map to themselves: this is NOT their logical negation
    /// ("is null" / "mask clear"). The engine keeps the fixed point so that
    /// generated inputs match the established pipeline output.
    pub fn negate(self) -> Self {
        match self {
            Self::Equal => Self::NotEqual,
            Self::NotEqual => Self::Equal,
            Self::Less => Self::GreaterOrEqual,
            Self::GreaterOrEqual => Self::Less,
            Self::Greater => Self::LessOrEqual,
            Self::LessOrEqual => Self::Greater,
            Self::NonNull => Self::NonNull,
            Self::BitmaskSet => Self::BitmaskSet,
        }
    }

    /// Kinds that compare against a constant
    pub fn requires_operand(self) -> bool {
        !matches!(self, Self::NonNull)
    }

    /// The six ordering/equality kinds
    pub fn is_relational(self) -> bool {
        !matches!(self, Self::NonNull | Self::BitmaskSet)
    }

    /// Map a C relational operator token to its kind
    pub fn from_operator(op: &str) -> Option<Self> {
        match op {
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "<" => Some(Self::Less),
            ">" => Some(Self::Greater),
            "<=" => Some(Self::LessOrEqual),
            ">=" => Some(Self::GreaterOrEqual),
            _ => None,
        }
    }

    pub fn all() -> [Self; 8] {
        [
            Self::Equal,
            Self::NotEqual,
            Self::Less,
            Self::Greater,
            Self::LessOrEqual,
            Self::GreaterOrEqual,
            Self::NonNull,
            Self::BitmaskSet,
        ]
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "=="),
            Self::NotEqual => write!(f, "!="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::LessOrEqual => write!(f, "<="),
            Self::GreaterOrEqual => write!(f, ">="),
            Self::NonNull => write!(f, "is not null"),
            Self::BitmaskSet => write!(f, "&"),
        }
    }
}

/// Where a predicate came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    /// Function whose body holds the guard
    pub function: String,
    /// 0-based line within the extracted body; `None` for hand-authored hints
    pub line: Option<usize>,
}

impl Origin {
    pub fn at(function: impl Into<String>, line: usize) -> Self {
        Self {
            function: function.into(),
            line: Some(line),
        }
    }

    pub fn hint(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            line: None,
        }
    }

    pub fn is_hint(&self) -> bool {
        self.line.is_none()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.function, line),
            None => write!(f, "{}:hint", self.function),
        }
    }
}

/// Branch guard over one variable
///
/// Immutable once created: fields are only reachable through accessors, and
/// negation builds a new predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    variable: VarId,
    kind: PredicateKind,
    operand: Option<i64>,
    origin: Origin,
}

impl Predicate {
    pub fn new(
        variable: impl Into<VarId>,
        kind: PredicateKind,
        operand: Option<i64>,
        origin: Origin,
    ) -> Self {
        Self {
            variable: variable.into(),
            kind,
            operand,
            origin,
        }
    }

    fn untagged(variable: impl Into<VarId>, kind: PredicateKind, operand: Option<i64>) -> Self {
        let variable = variable.into();
        Self {
            origin: Origin::hint(""),
            variable,
            kind,
            operand,
        }
    }

    pub fn equal(variable: impl Into<VarId>, value: i64) -> Self {
        Self::untagged(variable, PredicateKind::Equal, Some(value))
    }

    pub fn not_equal(variable: impl Into<VarId>, value: i64) -> Self {
        Self::untagged(variable, PredicateKind::NotEqual, Some(value))
    }

    pub fn less(variable: impl Into<VarId>, value: i64) -> Self {
        Self::untagged(variable, PredicateKind::Less, Some(value))
    }

    pub fn greater(variable: impl Into<VarId>, value: i64) -> Self {
        Self::untagged(variable, PredicateKind::Greater, Some(value))
    }

    pub fn less_or_equal(variable: impl Into<VarId>, value: i64) -> Self {
        Self::untagged(variable, PredicateKind::LessOrEqual, Some(value))
    }

    pub fn greater_or_equal(variable: impl Into<VarId>, value: i64) -> Self {
        Self::untagged(variable, PredicateKind::GreaterOrEqual, Some(value))
    }

    pub fn non_null(variable: impl Into<VarId>) -> Self {
        Self::untagged(variable, PredicateKind::NonNull, None)
    }

    pub fn bitmask_set(variable: impl Into<VarId>, mask: i64) -> Self {
        Self::untagged(variable, PredicateKind::BitmaskSet, Some(mask))
    }

    /// Same guard, tagged with a different origin
    pub fn with_origin(self, origin: Origin) -> Self {
        Self { origin, ..self }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    pub fn operand(&self) -> Option<i64> {
        self.operand
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Branch-flip negation; the receiver is left untouched
    pub fn negated(&self) -> Self {
        Self {
            variable: self.variable.clone(),
            kind: self.kind.negate(),
            operand: self.operand,
            origin: self.origin.clone(),
        }
    }

    /// Evaluate against a concrete value
    ///
    /// Returns `None` when the kind needs an operand that is missing.
    pub fn evaluate(&self, value: i64) -> Option<bool> {
        Some(match (self.kind, self.operand) {
            (PredicateKind::NonNull, _) => value != 0,
            (_, None) => return None,
            (PredicateKind::Equal, Some(op)) => value == op,
            (PredicateKind::NotEqual, Some(op)) => value != op,
            (PredicateKind::Less, Some(op)) => value < op,
            (PredicateKind::Greater, Some(op)) => value > op,
            (PredicateKind::LessOrEqual, Some(op)) => value <= op,
            (PredicateKind::GreaterOrEqual, Some(op)) => value >= op,
            (PredicateKind::BitmaskSet, Some(mask)) => (value as u64) & (mask as u64) != 0,
        })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.operand) {
            (PredicateKind::NonNull, _) => write!(f, "{} != NULL", self.variable),
            (PredicateKind::BitmaskSet, Some(mask)) => {
                write!(f, "({} & {:#x}) != 0", self.variable, mask as u64)
            }
            (kind, Some(operand)) => write!(f, "{} {} {}", self.variable, kind, operand),
            (kind, None) => write!(f, "{} {} ?", self.variable, kind),
        }
    }
}
