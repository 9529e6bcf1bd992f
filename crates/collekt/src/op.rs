//! Comparison operators for `where` filters.
//!
//! The [`Op`] enum defines the eight operators accepted by `where_op`. They
//! parse from their script spelling (`"=="`, `"!=="`, `">="`…); any other
//! spelling is rejected with [`CollectionError::UnknownOperator`].

use std::cmp::Ordering;
use std::str::FromStr;

use serde_json::Value;

use crate::error::CollectionError;
use crate::ordering::compare_values;
use crate::value::{loose_eq, strict_eq};

/// Comparison operator for a `where` clause.
///
/// - **Equality**: `LooseEq` (`==`), `StrictEq` (`===`)
/// - **Inequality**: `LooseNe` (`!=`), `StrictNe` (`!==`)
/// - **Relational**: `Lt`, `Lte`, `Gt`, `Gte`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `==`, equality after coercion.
    LooseEq,
    /// `===`, equality without coercion. Default for two-argument `where`.
    StrictEq,
    /// `!=`
    LooseNe,
    /// `!==`
    StrictNe,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
}

impl Op {
    /// Returns `true` for the four relational operators.
    pub fn is_relational(self) -> bool {
        matches!(self, Op::Lt | Op::Lte | Op::Gt | Op::Gte)
    }

    /// Evaluates a relational operator given an ordering result.
    ///
    /// Unordered comparisons (`None`, e.g. against `NaN`) are always false.
    pub fn eval_ordering(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (_, None) => false,
            (Op::Lt, Some(o)) => o == Ordering::Less,
            (Op::Lte, Some(o)) => o != Ordering::Greater,
            (Op::Gt, Some(o)) => o == Ordering::Greater,
            (Op::Gte, Some(o)) => o != Ordering::Less,
            _ => false, // Not an ordering-based operator
        }
    }

    /// Tests a property value (possibly absent) against `value`.
    pub fn matches(self, field: Option<&Value>, value: &Value) -> bool {
        match self {
            Op::LooseEq => loose_eq(field, Some(value)),
            Op::StrictEq => strict_eq(field, Some(value)),
            Op::LooseNe => !loose_eq(field, Some(value)),
            Op::StrictNe => !strict_eq(field, Some(value)),
            _ => self.eval_ordering(compare_values(field, Some(value))),
        }
    }

    /// Returns the script spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::LooseEq => "==",
            Op::StrictEq => "===",
            Op::LooseNe => "!=",
            Op::StrictNe => "!==",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Gt => ">",
            Op::Gte => ">=",
        }
    }
}

impl FromStr for Op {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Op::LooseEq),
            "===" => Ok(Op::StrictEq),
            "!=" => Ok(Op::LooseNe),
            "!==" => Ok(Op::StrictNe),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Lte),
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Gte),
            other => Err(CollectionError::UnknownOperator(other.to_string())),
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
