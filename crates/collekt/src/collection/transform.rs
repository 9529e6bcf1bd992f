//! Pure transformers.
//!
//! Everything here returns a new collection or plain value and leaves the
//! receiver alone, except [`Collection::chunk`], which drains it.

use std::borrow::Cow;
use std::cmp::Ordering;

use log::trace;
use serde_json::{Map, Value};

use super::{collect, Collection};
use crate::items::Items;
use crate::key::Key;
use crate::ordering::{default_order, sort_order, Dir};
use crate::value::{prop, property_key};

impl Collection {
    // ========================================================================
    // Element-wise
    // ========================================================================

    /// Applies `f` to every value. A mapping keeps its keys.
    pub fn map<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Value) -> Value,
    {
        let items = match &self.items {
            Items::Sequence(list) => Items::Sequence(list.iter().map(&mut f).collect()),
            Items::Mapping(map) => Items::Mapping(
                map.iter()
                    .map(|(key, value)| (key.clone(), f(value)))
                    .collect(),
            ),
        };
        collect(items)
    }

    /// Keeps the values satisfying `predicate`. A mapping keeps the keys of
    /// the surviving entries.
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Value) -> bool,
    {
        let items = match &self.items {
            Items::Sequence(list) => {
                Items::Sequence(list.iter().filter(|&item| predicate(item)).cloned().collect())
            }
            Items::Mapping(map) => Items::Mapping(
                map.iter()
                    .filter(|&(_, value)| predicate(value))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
        };
        collect(items)
    }

    /// Keeps the values *not* satisfying `predicate`.
    pub fn reject<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Value) -> bool,
    {
        self.filter(|item| !predicate(item))
    }

    /// Calls `f` on every value for its side effects.
    pub fn each<F>(&self, f: F) -> &Self
    where
        F: FnMut(&Value),
    {
        self.items.iter().for_each(f);
        self
    }

    /// Builds a mapping from the `(key, value)` pair `f` returns for each
    /// element. Keys are converted to strings; later pairs overwrite earlier
    /// ones.
    pub fn map_with_keys<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Value) -> (Value, Value),
    {
        let mut map = Map::new();
        for item in self.items.iter() {
            let (key, value) = f(item);
            map.insert(property_key(Some(&key)), value);
        }
        collect(map)
    }

    /// Collects `item[value]` from every element that owns that property,
    /// in order. Elements without it are skipped.
    pub fn pluck(&self, value: &str) -> Collection {
        collect(
            self.items
                .iter()
                .filter_map(|item| prop(item, value).map(Cow::into_owned))
                .collect::<Vec<_>>(),
        )
    }

    /// Builds a mapping `item[key] → item[value]` over every element.
    pub fn pluck_keyed(&self, value: &str, key: &str) -> Collection {
        let mut map = Map::new();
        for item in self.items.iter() {
            map.insert(
                property_key(prop(item, key).as_deref()),
                prop(item, value).map(Cow::into_owned).unwrap_or(Value::Null),
            );
        }
        collect(map)
    }

    /// Builds a mapping from each element's resolved key to the element.
    /// On a key collision the last element wins.
    pub fn key_by<'f>(&self, key: impl Into<Key<'f>>) -> Collection {
        let key = key.into();
        let mut map = Map::new();
        for item in self.items.iter() {
            map.insert(property_key(key.resolve(item).as_ref()), item.clone());
        }
        collect(map)
    }

    /// Builds a mapping from each resolved key to the list of elements that
    /// resolved to it, both in first-seen order.
    pub fn group_by<'f>(&self, key: impl Into<Key<'f>>) -> Collection {
        let key = key.into();
        let mut map = Map::new();
        for item in self.items.iter() {
            let group = map
                .entry(property_key(key.resolve(item).as_ref()))
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(members) = group {
                members.push(item.clone());
            }
        }
        collect(map)
    }

    /// Splits the values into `(matching, rest)`. Plain lists, not
    /// collections.
    pub fn partition<F>(&self, mut predicate: F) -> (Vec<Value>, Vec<Value>)
    where
        F: FnMut(&Value) -> bool,
    {
        self.items
            .iter()
            .cloned()
            .partition(|item| predicate(item))
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sorts a copy of the values by their string forms (`10` sorts before
    /// `9`).
    pub fn sort(&self) -> Collection {
        self.sort_with(default_order)
    }

    /// Sorts a copy of the values with a custom comparator. Stable.
    pub fn sort_with<F>(&self, mut compare: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut sorted = self.items.to_vec();
        sorted.sort_by(|a, b| compare(a, b));
        collect(sorted)
    }

    /// Stable ascending sort of a copy, by resolved key.
    pub fn sort_by<'f>(&self, key: impl Into<Key<'f>>) -> Collection {
        self.sorted(&key.into(), Dir::Asc)
    }

    /// Sorts ascending by resolved key, then reverses the whole result.
    pub fn sort_by_desc<'f>(&self, key: impl Into<Key<'f>>) -> Collection {
        self.sorted(&key.into(), Dir::Desc)
    }

    fn sorted(&self, key: &Key<'_>, dir: Dir) -> Collection {
        let mut keyed: Vec<(Option<Value>, Value)> = self
            .items
            .iter()
            .map(|item| (key.resolve(item), item.clone()))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| sort_order(a.as_ref(), b.as_ref()));

        let mut sorted: Vec<Value> = keyed.into_iter().map(|(_, item)| item).collect();
        dir.apply(&mut sorted);
        collect(sorted)
    }

    /// Reversed copy of the values.
    pub fn reverse(&self) -> Collection {
        let mut reversed = self.items.to_vec();
        reversed.reverse();
        collect(reversed)
    }

    // ========================================================================
    // Reshaping
    // ========================================================================

    /// Drains the receiver into lists of `size` elements (the last may be
    /// shorter). The receiver is left empty.
    ///
    /// A mapping, or a `size` of zero, yields an empty collection and leaves
    /// the receiver untouched.
    pub fn chunk(&mut self, size: usize) -> Collection {
        let Items::Sequence(list) = &mut self.items else {
            return Collection::new();
        };
        if size == 0 {
            return Collection::new();
        }

        let drained = std::mem::take(list);
        trace!("chunk: consuming {} elements into chunks of {size}", drained.len());

        let mut rest = drained.into_iter();
        let mut chunks = Vec::new();
        loop {
            let chunk: Vec<Value> = rest.by_ref().take(size).collect();
            if chunk.is_empty() {
                break;
            }
            chunks.push(Value::Array(chunk));
        }
        collect(chunks)
    }

    /// Flattens exactly one level of nested lists.
    pub fn collapse(&self) -> Collection {
        let mut flat = Vec::new();
        for item in self.items.iter() {
            concat(&mut flat, item);
        }
        collect(flat)
    }

    /// Flattens nested lists and objects until no element is a list or an
    /// object. Strings stay atomic; objects contribute their values.
    pub fn flatten(&self) -> Collection {
        self.flatten_until(None)
    }

    /// Like [`flatten`](Self::flatten), but stops after `depth` passes. A
    /// depth of zero still performs one pass.
    pub fn flatten_depth(&self, depth: usize) -> Collection {
        self.flatten_until(Some(depth))
    }

    fn flatten_until(&self, depth: Option<usize>) -> Collection {
        let mut remaining = depth.map(|depth| depth.saturating_sub(1));
        let mut current = flatten_pass(self.items.iter());
        while remaining != Some(0) && !is_flat(&current) {
            current = flatten_pass(current.iter());
            remaining = remaining.map(|depth| depth - 1);
        }
        collect(current)
    }

    /// Passes *all* values to `f` at once and re-associates its output with
    /// the original keys by position. The result is always a mapping; keys
    /// past the end of `f`'s output map to `null`.
    pub fn flat_map<F>(&self, f: F) -> Collection
    where
        F: FnOnce(Vec<Value>) -> Vec<Value>,
    {
        let mapped = f(self.items.to_vec());
        let map: Map<String, Value> = self
            .items
            .keys()
            .into_iter()
            .enumerate()
            .map(|(index, key)| (key, mapped.get(index).cloned().unwrap_or(Value::Null)))
            .collect();
        collect(map)
    }

    /// Uses the elements as keys and pairs each with `values[index]`
    /// (`null` past the end).
    pub fn combine(&self, values: &[Value]) -> Collection {
        let map: Map<String, Value> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, key)| {
                (
                    property_key(Some(key)),
                    values.get(index).cloned().unwrap_or(Value::Null),
                )
            })
            .collect();
        collect(map)
    }

    /// Swaps keys and values. A sequence's keys are its indices.
    pub fn flip(&self) -> Collection {
        let map: Map<String, Value> = self
            .items
            .entries()
            .into_iter()
            .map(|(key, value)| (property_key(Some(value)), Value::String(key)))
            .collect();
        collect(map)
    }

    /// Pairs each element with `other[index]` (`null` past the end).
    pub fn zip(&self, other: &[Value]) -> Collection {
        collect(
            self.items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    Value::Array(vec![
                        item.clone(),
                        other.get(index).cloned().unwrap_or(Value::Null),
                    ])
                })
                .collect::<Vec<_>>(),
        )
    }

    /// Splits a copy of the values into `groups` lists of
    /// `round(len / groups)` elements each. Trailing groups may be short or
    /// empty, and elements beyond `groups` full lists are dropped.
    pub fn split(&self, groups: usize) -> Vec<Vec<Value>> {
        if groups == 0 {
            return Vec::new();
        }
        let per_group = (self.items.len() as f64 / groups as f64).round() as usize;
        let mut rest = self.items.to_vec().into_iter();
        (0..groups)
            .map(|_| rest.by_ref().take(per_group).collect())
            .collect()
    }

    /// Every `step`-th element, starting at `offset`. A `step` of zero
    /// selects nothing.
    pub fn nth(&self, step: usize, offset: usize) -> Collection {
        if step == 0 {
            return Collection::new();
        }
        collect(
            self.items
                .iter()
                .skip(offset)
                .step_by(step)
                .cloned()
                .collect::<Vec<_>>(),
        )
    }

    /// Elements of 1-indexed `page` when split into pages of `size`.
    pub fn for_page(&self, page: usize, size: usize) -> Collection {
        let len = self.items.len();
        let end = page.saturating_mul(size).min(len);
        let start = page.saturating_sub(1).saturating_mul(size).min(end);
        self.range(start..end)
    }

    /// Elements from `start`, at most `limit` of them.
    pub fn slice(&self, start: usize, limit: Option<usize>) -> Collection {
        let len = self.items.len();
        let start = start.min(len);
        let end = limit.map_or(len, |limit| start.saturating_add(limit).min(len));
        self.range(start..end)
    }

    /// First `n` elements, or the last `|n|` when `n` is negative.
    pub fn take(&self, n: isize) -> Collection {
        let len = self.items.len();
        let range = if n < 0 {
            slice_range(len, n as i64, None)
        } else {
            slice_range(len, 0, Some(n as i64))
        };
        self.range(range)
    }

    fn range(&self, range: std::ops::Range<usize>) -> Collection {
        collect(
            self.items
                .iter()
                .skip(range.start)
                .take(range.len())
                .cloned()
                .collect::<Vec<_>>(),
        )
    }
}

/// Resolves slice bounds where negative indices count from the end.
fn slice_range(len: usize, start: i64, end: Option<i64>) -> std::ops::Range<usize> {
    let resolve = |index: i64| -> usize {
        if index < 0 {
            len.saturating_sub(index.unsigned_abs() as usize)
        } else {
            (index as usize).min(len)
        }
    };
    let start = resolve(start);
    let end = end.map_or(len, resolve);
    start..end.max(start)
}

/// Appends `value` to `out`, spreading it if it is a list.
fn concat(out: &mut Vec<Value>, value: &Value) {
    match value {
        Value::Array(list) => out.extend(list.iter().cloned()),
        other => out.push(other.clone()),
    }
}

fn flatten_pass<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<Value> {
    let mut out = Vec::new();
    for item in values {
        match item {
            Value::Object(map) => map.values().for_each(|value| concat(&mut out, value)),
            other => concat(&mut out, other),
        }
    }
    out
}

fn is_flat(values: &[Value]) -> bool {
    !values
        .iter()
        .any(|value| value.is_array() || value.is_object())
}
