//! The container held by a [`Collection`](crate::Collection).
//!
//! [`Items`] is either an ordered sequence or an insertion-ordered mapping of
//! string keys to values. Operations branch on the variant explicitly rather
//! than collapsing both into one container type, because several of them
//! (`keys`, `values`, `merge`, `union`, `flatten`) mean different things in
//! each mode.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value::parse_index;

/// Underlying storage of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// Ordered, index-addressable list.
    Sequence(Vec<Value>),
    /// String keys bound to values, in insertion order.
    Mapping(Map<String, Value>),
}

impl Default for Items {
    fn default() -> Self {
        Items::Sequence(Vec::new())
    }
}

impl Items {
    /// Returns `true` in sequence mode.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Items::Sequence(_))
    }

    /// Returns `true` in mapping mode.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Items::Mapping(_))
    }

    /// Extracts the sequence, if present.
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Items::Sequence(list) => Some(list),
            Items::Mapping(_) => None,
        }
    }

    /// Extracts the mapping, if present.
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Items::Sequence(_) => None,
            Items::Mapping(map) => Some(map),
        }
    }

    /// Number of elements (sequence) or entries (mapping).
    pub fn len(&self) -> usize {
        match self {
            Items::Sequence(list) => list.len(),
            Items::Mapping(map) => map.len(),
        }
    }

    /// Returns `true` if there are no elements or entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates values in order: elements of a sequence, or the values of a
    /// mapping in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        match self {
            Items::Sequence(list) => Iter::Sequence(list.iter()),
            Items::Mapping(map) => Iter::Mapping(map.values()),
        }
    }

    /// Keys in order. A sequence's keys are its indices as strings.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Items::Sequence(list) => (0..list.len()).map(|index| index.to_string()).collect(),
            Items::Mapping(map) => map.keys().cloned().collect(),
        }
    }

    /// `(key, value)` pairs in order.
    pub fn entries(&self) -> Vec<(String, &Value)> {
        match self {
            Items::Sequence(list) => list
                .iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value))
                .collect(),
            Items::Mapping(map) => map.iter().map(|(key, value)| (key.clone(), value)).collect(),
        }
    }

    /// Looks up `key` directly on the container.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        match self {
            Items::Sequence(list) => parse_index(key).and_then(|index| list.get(index)),
            Items::Mapping(map) => map.get(key),
        }
    }

    /// Returns `true` if `key` is an own key of the container.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Copies the values into a new list, in order.
    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }

    /// Consumes the container and returns its values, in order.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Items::Sequence(list) => list,
            Items::Mapping(map) => map.into_iter().map(|(_, value)| value).collect(),
        }
    }

    /// Copies the container into a mapping. A sequence becomes an
    /// index-keyed mapping.
    pub fn to_mapping(&self) -> Map<String, Value> {
        match self {
            Items::Sequence(list) => list
                .iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value.clone()))
                .collect(),
            Items::Mapping(map) => map.clone(),
        }
    }

    /// Consumes the container and returns it as a mapping, index-keying a
    /// sequence.
    pub fn into_mapping(self) -> Map<String, Value> {
        match self {
            Items::Sequence(list) => list
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value))
                .collect(),
            Items::Mapping(map) => map,
        }
    }

    /// Converts to a JSON value of the same shape.
    pub fn to_value(&self) -> Value {
        match self {
            Items::Sequence(list) => Value::Array(list.clone()),
            Items::Mapping(map) => Value::Object(map.clone()),
        }
    }
}

impl From<Vec<Value>> for Items {
    fn from(list: Vec<Value>) -> Self {
        Items::Sequence(list)
    }
}

impl From<Map<String, Value>> for Items {
    fn from(map: Map<String, Value>) -> Self {
        Items::Mapping(map)
    }
}

/// Arrays become sequences, objects become mappings, `null` becomes an empty
/// sequence and any other scalar a one-element sequence.
impl From<Value> for Items {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(list) => Items::Sequence(list),
            Value::Object(map) => Items::Mapping(map),
            Value::Null => Items::Sequence(Vec::new()),
            scalar => Items::Sequence(vec![scalar]),
        }
    }
}

impl<'a> IntoIterator for &'a Items {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the values of an [`Items`].
pub enum Iter<'a> {
    /// Cursor over a sequence.
    Sequence(std::slice::Iter<'a, Value>),
    /// Cursor over mapping values.
    Mapping(serde_json::map::Values<'a>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Sequence(iter) => iter.next(),
            Iter::Mapping(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Sequence(iter) => iter.size_hint(),
            Iter::Mapping(iter) => iter.size_hint(),
        }
    }
}
