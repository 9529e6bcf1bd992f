//! Ordering helpers for sorting collections.
//!
//! Provides [`Dir`] for sort direction, [`compare_values`] for relational
//! comparison, [`sort_order`] for the key order used by `sort_by`, and
//! [`default_order`] for the string-based order used by `sort` without a
//! comparator.

use std::cmp::Ordering;

use serde_json::Value;

use crate::value::Primitive;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order. Applied by reversing the ascending result, so equal
    /// elements also come out reversed.
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an already ascending-sorted list.
    pub fn apply<T>(self, sorted: &mut [T]) {
        if self.is_desc() {
            sorted.reverse();
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relational comparison of two optional values.
///
/// Two strings compare by UTF-16 code units. Anything else is converted to a
/// number first; if either side is `NaN` the values are unordered and `None`
/// is returned.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Option<Ordering> {
    let (a, b) = (Primitive::of(a), Primitive::of(b));
    if let (Primitive::String(a), Primitive::String(b)) = (&a, &b) {
        return Some(a.encode_utf16().cmp(b.encode_utf16()));
    }
    a.to_number().partial_cmp(&b.to_number())
}

/// Total order over resolved sort keys.
///
/// Agrees with [`compare_values`] whenever both keys are strings or both are
/// non-`NaN` numbers. Mixed or unordered keys fall back to a class rank
/// (numbers, then strings, then `NaN` / absent), which keeps the order total
/// so stable sorting is well defined.
pub fn sort_order(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = (SortKey::of(a), SortKey::of(b));
    match (&a, &b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        (SortKey::String(x), SortKey::String(y)) => x.encode_utf16().cmp(y.encode_utf16()),
        _ => a.rank().cmp(&b.rank()),
    }
}

enum SortKey<'a> {
    Number(f64),
    String(std::borrow::Cow<'a, str>),
    Unordered,
}

impl<'a> SortKey<'a> {
    fn of(value: Option<&'a Value>) -> Self {
        match Primitive::of(value) {
            Primitive::String(s) => SortKey::String(s),
            other => match other.to_number() {
                n if n.is_nan() => SortKey::Unordered,
                n => SortKey::Number(n),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::String(_) => 1,
            SortKey::Unordered => 2,
        }
    }
}

/// Default sort order: both values converted to strings, compared by UTF-16
/// code units. Numbers therefore sort lexically (`10` before `9`).
pub fn default_order(a: &Value, b: &Value) -> Ordering {
    let a = Primitive::of(Some(a)).into_string();
    let b = Primitive::of(Some(b)).into_string();
    a.encode_utf16().cmp(b.encode_utf16())
}
