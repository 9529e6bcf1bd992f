//! Script-style value semantics over JSON values.
//!
//! Collection elements are [`serde_json::Value`]s, but the operations built on
//! them follow the coercion rules of a dynamically typed host: property lookup
//! that may find nothing, `==` versus `===`, numeric conversion that yields
//! `NaN`, and string conversion used when a value becomes a mapping key.
//!
//! A property lookup that finds nothing is modeled as `None` (the host's
//! `undefined`), which is distinct from `Some(&Value::Null)`.

use std::borrow::Cow;

use serde_json::{Number, Value};

/// Primitive view of an element, after the host's to-primitive conversion.
///
/// Arrays become their comma-joined string form and objects become
/// `"[object Object]"`, so relational and loose comparisons only ever see
/// these five shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive<'a> {
    /// Property was absent.
    Undefined,
    /// JSON `null`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value, always widened to `f64`.
    Number(f64),
    /// String value (borrowed when possible).
    String(Cow<'a, str>),
}

impl<'a> Primitive<'a> {
    /// Converts an optional element to its primitive form.
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => Primitive::Undefined,
            Some(Value::Null) => Primitive::Null,
            Some(Value::Bool(b)) => Primitive::Bool(*b),
            Some(Value::Number(n)) => Primitive::Number(n.as_f64().unwrap_or(f64::NAN)),
            Some(Value::String(s)) => Primitive::String(Cow::Borrowed(s)),
            Some(Value::Array(list)) => Primitive::String(Cow::Owned(join(list, ","))),
            Some(Value::Object(_)) => Primitive::String(Cow::Borrowed("[object Object]")),
        }
    }

    /// Returns `true` if this is `Undefined` or `Null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Primitive::Undefined | Primitive::Null)
    }

    /// Numeric conversion. Unparseable strings and `undefined` become `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Primitive::Undefined => f64::NAN,
            Primitive::Null => 0.0,
            Primitive::Bool(b) => f64::from(u8::from(*b)),
            Primitive::Number(n) => *n,
            Primitive::String(s) => string_to_number(s),
        }
    }

    /// String conversion, as used for mapping keys.
    pub fn into_string(self) -> Cow<'a, str> {
        match self {
            Primitive::Undefined => Cow::Borrowed("undefined"),
            Primitive::Null => Cow::Borrowed("null"),
            Primitive::Bool(true) => Cow::Borrowed("true"),
            Primitive::Bool(false) => Cow::Borrowed("false"),
            Primitive::Number(n) => Cow::Owned(format_number(n)),
            Primitive::String(s) => s,
        }
    }

    /// Loose (`==`) equality between two primitives.
    pub fn loose_eq(&self, other: &Primitive<'_>) -> bool {
        match (self, other) {
            (a, b) if a.is_nullish() && b.is_nullish() => true,
            (a, b) if a.is_nullish() || b.is_nullish() => false,
            (Primitive::String(a), Primitive::String(b)) => a == b,
            (Primitive::Bool(a), Primitive::Bool(b)) => a == b,
            _ => self.to_number() == other.to_number(),
        }
    }
}

/// Parses a canonical array index (`"0"`, `"12"`, but not `"01"` or `"+1"`).
///
/// Indices stop below `2^32 - 1`; larger numeric keys are ordinary property
/// names.
pub fn parse_index(key: &str) -> Option<usize> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index as usize)
}

/// Looks up property `key` on `item`.
///
/// Objects resolve by key. Arrays resolve canonical indices and `length`.
/// Strings do the same, with indices and `length` counted in characters,
/// each index yielding a one-character string. Every other value owns no
/// properties.
pub fn prop<'a>(item: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
    match item {
        Value::Object(map) => map.get(key).map(Cow::Borrowed),
        Value::Array(list) if key == "length" => Some(Cow::Owned(Value::from(list.len()))),
        Value::Array(list) => parse_index(key)
            .and_then(|index| list.get(index))
            .map(Cow::Borrowed),
        Value::String(s) if key == "length" => Some(Cow::Owned(Value::from(s.chars().count()))),
        Value::String(s) => parse_index(key)
            .and_then(|index| s.chars().nth(index))
            .map(|c| Cow::Owned(Value::String(c.to_string()))),
        _ => None,
    }
}

/// Returns `true` if `item` owns a property named `key`.
pub fn has_own(item: &Value, key: &str) -> bool {
    prop(item, key).is_some()
}

/// Own enumerable property names of `item`, in enumeration order. `length`
/// is owned but not enumerable, so it is never listed.
pub fn own_keys(item: &Value) -> Vec<String> {
    match item {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(list) => (0..list.len()).map(|index| index.to_string()).collect(),
        Value::String(s) => (0..s.chars().count()).map(|index| index.to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Converts a value to the string used when it becomes a mapping key.
pub fn property_key(value: Option<&Value>) -> String {
    Primitive::of(value).into_string().into_owned()
}

/// Numeric conversion of an optional element.
pub fn to_number(value: Option<&Value>) -> f64 {
    Primitive::of(value).to_number()
}

/// Truthiness of an optional element.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Strict (`===`) equality.
///
/// Primitives compare by type and value, numbers numerically. JSON values
/// have no reference identity, so arrays and objects compare element-wise
/// under the same strict rule.
pub fn strict_eq(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => strict_eq_values(a, b),
        _ => false,
    }
}

fn strict_eq_values(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| strict_eq_values(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, x)| y.get(key).is_some_and(|y| strict_eq_values(x, y)))
        }
        _ => a == b,
    }
}

fn number_eq(x: &Number, y: &Number) -> bool {
    match (x.as_i64(), y.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => match (x.as_u64(), y.as_u64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
    }
}

/// Loose (`==`) equality.
pub fn loose_eq(a: Option<&Value>, b: Option<&Value>) -> bool {
    if is_compound(a) && is_compound(b) {
        return strict_eq(a, b);
    }
    Primitive::of(a).loose_eq(&Primitive::of(b))
}

fn is_compound(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Array(_) | Value::Object(_)))
}

/// Joins elements with `separator`. `null` elements contribute an empty string.
pub fn join<'a, I>(values: I, separator: &str) -> String
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut out = String::new();
    for (index, value) in values.into_iter().enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        if !value.is_null() {
            out.push_str(&Primitive::of(Some(value)).into_string());
        }
    }
    out
}

/// Formats a number the way the host prints it: integral values without a
/// fraction, and `NaN` / `Infinity` spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        name.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) =>
        {
            trimmed.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}
