//! The [`Collection`] wrapper: construction, access, iteration and
//! serialization.
//!
//! The operation families live in sibling modules, each adding an
//! `impl Collection` block:
//!
//! - `transform`: pure transformers (`map`, `filter`, `group_by`, `flatten`…)
//! - `aggregate`: numeric reductions (`sum`, `avg`, `median`, `mode`…)
//! - `set`: filtering and set algebra (`unique`, `diff`, `where_op`, `merge`…)
//! - `mutate`: in-place mutators (`push`, `put`, `splice`, `shuffle`…)

mod aggregate;
mod mutate;
mod set;
mod transform;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::items::{Items, Iter};
use crate::value::{loose_eq, property_key, strict_eq, truthy};

/// A fluent wrapper over a sequence or a keyed mapping of JSON values.
///
/// Methods are either **mutators**, which change the receiver in place and
/// return `&mut Self` for chaining (`push`, `put`, `forget`, `transform`,
/// `shuffle`…), or **pure transformers**, which leave the receiver untouched
/// and return a new `Collection` or a plain value (`map`, `filter`,
/// `group_by`, `sum`…). `chunk` and `splice` are transformers by shape but
/// also consume or rewrite the receiver.
///
/// # Example
///
/// ```
/// use collekt::collect;
/// use serde_json::json;
///
/// let people = collect(json!([
///     {"name": "Ada", "age": 36},
///     {"name": "Alan", "age": 41},
///     {"name": "Grace", "age": 17},
/// ]));
///
/// let adults = people.where_op("age", ">=", 18).unwrap();
/// assert_eq!(adults.implode_by("name", ", "), "Ada, Alan");
/// assert_eq!(people.avg_by("age"), 94.0 / 3.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Items,
}

/// Wraps `items` in a collection. The container is taken as-is, not copied.
pub fn collect(items: impl Into<Items>) -> Collection {
    Collection {
        items: items.into(),
    }
}

impl Collection {
    /// Creates an empty collection (an empty sequence).
    pub fn new() -> Self {
        Collection::default()
    }

    /// Parses a JSON array or object into a collection.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the underlying container.
    pub fn all(&self) -> &Items {
        &self.items
    }

    /// Consumes the collection and returns the underlying container.
    pub fn into_items(self) -> Items {
        self.items
    }

    /// Returns the value stored at `key`, or `null` if there is none.
    ///
    /// In sequence mode `key` is an index (`"0"`, `"1"`…).
    pub fn get(&self, key: &str) -> Value {
        self.items.lookup(key).cloned().unwrap_or(Value::Null)
    }

    /// Returns the value at `key`, or `default` if there is none.
    ///
    /// A falsy default (`false`, `0`, `""`) collapses to `null`.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.items.lookup(key) {
            Some(value) => value.clone(),
            None => {
                let default = default.into();
                if truthy(Some(&default)) {
                    default
                } else {
                    Value::Null
                }
            }
        }
    }

    /// Returns the value at `key`, or the result of `default` if there is none.
    pub fn get_or_else<F>(&self, key: &str, default: F) -> Value
    where
        F: FnOnce() -> Value,
    {
        self.items.lookup(key).cloned().unwrap_or_else(default)
    }

    /// In sequence mode, `true` if any element owns a property named `key`.
    /// In mapping mode, `true` if `key` is one of the mapping's keys.
    pub fn has(&self, key: &str) -> bool {
        match &self.items {
            Items::Sequence(list) => list.iter().any(|item| crate::value::has_own(item, key)),
            Items::Mapping(map) => map.contains_key(key),
        }
    }

    /// In sequence mode, `true` if some element strictly equals `value`.
    /// In mapping mode, `true` if `value` (converted to a key) is a key.
    pub fn contains(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        match &self.items {
            Items::Sequence(list) => list.iter().any(|item| strict_eq(Some(item), Some(&value))),
            Items::Mapping(map) => map.contains_key(&property_key(Some(&value))),
        }
    }

    /// `true` if `key` is present and its value strictly equals `value`.
    pub fn contains_entry(&self, key: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.items
            .lookup(key)
            .is_some_and(|found| strict_eq(Some(found), Some(&value)))
    }

    /// `true` if any `(element, index)` satisfies `predicate`.
    pub fn contains_where<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, usize) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .any(|(index, item)| predicate(item, index))
    }

    /// First element (first value, for a mapping).
    pub fn first(&self) -> Option<&Value> {
        self.items.iter().next()
    }

    /// First element satisfying `predicate`.
    pub fn first_where<F>(&self, mut predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value) -> bool,
    {
        self.items.iter().find(|&item| predicate(item))
    }

    /// Last element (last value, for a mapping).
    pub fn last(&self) -> Option<&Value> {
        self.items.iter().last()
    }

    /// Last element satisfying `predicate`.
    pub fn last_where<F>(&self, mut predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value) -> bool,
    {
        self.items.iter().filter(|&item| predicate(item)).last()
    }

    /// Number of elements or entries.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no elements or entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if there is at least one element or entry.
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// `true` if every element satisfies `predicate` (vacuously true when
    /// empty).
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        self.items.iter().all(|item| predicate(item))
    }

    /// Folds left with `reducer(carry, item)`, starting from `initial` or
    /// `null`. An empty collection returns `null` regardless of `initial`.
    pub fn reduce<F>(&self, mut reducer: F, initial: Option<Value>) -> Value
    where
        F: FnMut(Value, &Value) -> Value,
    {
        let mut carry = initial.unwrap_or(Value::Null);
        let mut reduced = false;
        for item in self.items.iter() {
            carry = reducer(carry, item);
            reduced = true;
        }
        if reduced {
            carry
        } else {
            Value::Null
        }
    }

    /// Passes the collection to `f` and returns whatever `f` returns.
    pub fn pipe<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&Self) -> R,
    {
        f(self)
    }

    // ========================================================================
    // Serialization & iteration
    // ========================================================================

    /// Serializes the container as a JSON array or object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Joins the elements with `glue`. `null` elements contribute nothing.
    pub fn implode(&self, glue: &str) -> String {
        crate::value::join(self.items.iter(), glue)
    }

    /// Plucks `key` from each element, then joins the results with `glue`.
    pub fn implode_by(&self, key: &str, glue: &str) -> String {
        self.pluck(key).implode(glue)
    }

    /// In sequence mode, the distinct property names owned by the elements,
    /// in first-seen order. In mapping mode, the mapping's keys.
    pub fn keys(&self) -> Collection {
        match &self.items {
            Items::Sequence(list) => {
                let names: Vec<Value> = list
                    .iter()
                    .flat_map(crate::value::own_keys)
                    .map(Value::String)
                    .collect();
                collect(names).unique()
            }
            Items::Mapping(map) => collect(
                map.keys()
                    .cloned()
                    .map(Value::String)
                    .collect::<Vec<_>>(),
            ),
        }
    }

    /// All values, in order, as a sequence.
    pub fn values(&self) -> Collection {
        collect(self.items.to_vec())
    }

    /// Position of the first element loosely (`==`) equal to `value`.
    pub fn search(&self, value: impl Into<Value>) -> Option<usize> {
        let value = value.into();
        self.items
            .iter()
            .position(|item| loose_eq(Some(item), Some(&value)))
    }

    /// Position of the first element strictly (`===`) equal to `value`.
    pub fn search_strict(&self, value: impl Into<Value>) -> Option<usize> {
        let value = value.into();
        self.items
            .iter()
            .position(|item| strict_eq(Some(item), Some(&value)))
    }

    /// Finds the first element satisfying `predicate`, then returns the
    /// position of the first element loosely equal to it. That can be an
    /// earlier position than the match itself (`"1"` before `1`).
    pub fn search_where<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(&Value, usize) -> bool,
    {
        let found = self
            .items
            .iter()
            .enumerate()
            .find(|&(index, item)| predicate(item, index))
            .map(|(_, item)| item)?;
        self.items
            .iter()
            .position(|item| loose_eq(Some(item), Some(found)))
    }

    /// Iterates the current values in order. Each call starts a fresh cursor.
    pub fn iter(&self) -> Iter<'_> {
        self.items.iter()
    }
}

impl AsRef<Items> for Collection {
    fn as_ref(&self) -> &Items {
        &self.items
    }
}

impl AsRef<Items> for Items {
    fn as_ref(&self) -> &Items {
        self
    }
}

impl From<Items> for Collection {
    fn from(items: Items) -> Self {
        Collection { items }
    }
}

impl From<Collection> for Items {
    fn from(collection: Collection) -> Self {
        collection.items
    }
}

impl From<Vec<Value>> for Collection {
    fn from(list: Vec<Value>) -> Self {
        collect(list)
    }
}

impl From<Map<String, Value>> for Collection {
    fn from(map: Map<String, Value>) -> Self {
        collect(map)
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        collect(value)
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        collect(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_construction_is_sequence() {
        let collection = Collection::new();
        assert!(collection.all().is_sequence());
        assert!(collection.is_empty());
        assert!(!collection.is_not_empty());
    }

    #[test]
    fn get_with_defaults() {
        let collection = collect(json!({"name": "Ada", "zero": 0}));
        assert_eq!(collection.get("name"), json!("Ada"));
        assert_eq!(collection.get("missing"), Value::Null);
        assert_eq!(collection.get_or("missing", "x"), json!("x"));
        assert_eq!(collection.get_or("missing", 0), Value::Null);
        assert_eq!(collection.get_or("zero", 5), json!(0));
        assert_eq!(collection.get_or_else("missing", || json!(false)), json!(false));
    }

    #[test]
    fn has_by_mode() {
        let list = collect(json!([{"a": 1}, {"b": 2}]));
        assert!(list.has("b"));
        assert!(!list.has("c"));

        let map = collect(json!({"a": null}));
        assert!(map.has("a"));
        assert!(!map.has("b"));
    }

    #[test]
    fn has_and_keys_agree_on_strings_and_arrays() {
        let words = collect(json!(["ab"]));
        assert_eq!(words.keys().all(), &Items::from(json!(["0", "1"])));
        assert!(words.has("1"));
        assert!(words.has("length"));
        assert!(!words.has("2"));

        let lists = collect(json!([[1]]));
        assert!(lists.has("length"));
        assert!(!collect(json!([{"a": 1}])).has("length"));
    }

    #[test]
    fn contains_forms() {
        let list = collect(json!([1, "2", 3]));
        assert!(list.contains(1));
        assert!(!list.contains(2));
        assert!(list.contains_where(|item, index| index == 2 && item == &json!(3)));

        let map = collect(json!({"a": 1, "1": true}));
        assert!(map.contains("a"));
        assert!(map.contains(1));
        assert!(map.contains_entry("a", 1));
        assert!(!map.contains_entry("a", "1"));
    }

    #[test]
    fn first_and_last() {
        let list = collect(json!([1, 2, 3, 4]));
        assert_eq!(list.first(), Some(&json!(1)));
        assert_eq!(list.last(), Some(&json!(4)));
        assert_eq!(list.first_where(|v| v.as_i64() > Some(1)), Some(&json!(2)));
        assert_eq!(list.last_where(|v| v.as_i64() < Some(3)), Some(&json!(2)));
        assert_eq!(list.first_where(|v| v.is_string()), None);
        assert_eq!(Collection::new().first(), None);
    }

    #[test]
    fn reduce_and_every() {
        let list = collect(json!([1, 2, 3]));
        let total = list.reduce(
            |carry, item| json!(carry.as_i64().unwrap_or(0) + item.as_i64().unwrap_or(0)),
            Some(json!(10)),
        );
        assert_eq!(total, json!(16));
        assert_eq!(Collection::new().reduce(|c, _| c, Some(json!(1))), Value::Null);
        assert!(list.every(Value::is_number));
        assert!(Collection::new().every(|_| false));
    }

    #[test]
    fn pipe_returns_result() {
        let list = collect(json!([1, 2]));
        assert_eq!(list.pipe(Collection::count), 2);
    }

    #[test]
    fn keys_by_mode() {
        let list = collect(json!([{"a": 1, "b": 2}, {"b": 3, "c": 4}]));
        assert_eq!(list.keys().all(), &Items::from(json!(["a", "b", "c"])));

        let map = collect(json!({"x": 1, "y": 2}));
        assert_eq!(map.keys().all(), &Items::from(json!(["x", "y"])));
    }

    #[test]
    fn values_from_mapping() {
        let map = collect(json!({"x": 1, "y": [2]}));
        assert_eq!(map.values().all(), &Items::from(json!([1, [2]])));
    }

    #[test]
    fn search_variants() {
        let list = collect(json!(["1", 1, 2]));
        assert_eq!(list.search(1), Some(0));
        assert_eq!(list.search_strict(1), Some(1));
        assert_eq!(list.search(9), None);
        assert_eq!(list.search_where(|item, _| item.is_number()), Some(0));
        assert_eq!(list.search_where(|item, _| item.is_boolean()), None);
    }

    #[test]
    fn implode_forms() {
        let list = collect(json!([1, null, "x"]));
        assert_eq!(list.implode("-"), "1--x");

        let records = collect(json!([{"n": "a"}, {"m": 1}, {"n": "b"}]));
        assert_eq!(records.implode_by("n", ","), "a,b");
    }

    #[test]
    fn json_round_trip() {
        let map = collect(json!({"b": 1, "a": [true, null]}));
        let text = map.to_json().unwrap();
        assert_eq!(text, r#"{"b":1,"a":[true,null]}"#);
        assert_eq!(Collection::from_json(&text).unwrap(), map);
        assert!(Collection::from_json("42").is_err());
    }

    #[test]
    fn iteration_is_restartable() {
        let list = collect(json!([1, 2, 3]));
        let first: Vec<_> = list.iter().collect();
        let second: Vec<_> = (&list).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(list.count(), 3);

        let owned: Vec<Value> = list.into_iter().collect();
        assert_eq!(owned, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn from_iterator() {
        let collection: Collection = (1..=3).map(Value::from).collect();
        assert_eq!(collection.all(), &Items::from(json!([1, 2, 3])));
    }
}
