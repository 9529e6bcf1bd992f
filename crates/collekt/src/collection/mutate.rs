//! In-place mutators.
//!
//! These change the receiver's storage directly. Most return `&mut Self`
//! for chaining; `pop`, `shift`, `pull`, `random` and `splice` return what
//! they took out instead.

use log::trace;
use rand::Rng;
use serde_json::{Map, Value};

use super::Collection;
use crate::items::Items;
use crate::value::{parse_index, truthy};

impl Collection {
    // ========================================================================
    // Adding
    // ========================================================================

    /// Appends `value`. A mapping stores it under the next free index key.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match &mut self.items {
            Items::Sequence(list) => list.push(value),
            Items::Mapping(map) => {
                let key = next_index_key(map);
                map.insert(key, value);
            }
        }
        self
    }

    /// Stores `value` at `key`.
    ///
    /// On a sequence, an index key replaces that element, padding with
    /// `null` when it lies past the end. Any other key, or an index whose
    /// padding cannot be allocated, turns the sequence into an index-keyed
    /// mapping first.
    pub fn put(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        if let Items::Sequence(list) = &mut self.items {
            if let Some(index) = parse_index(key) {
                if let Some(slot) = list.get_mut(index) {
                    *slot = value;
                    return self;
                }
                let grow = (index - list.len()).saturating_add(1);
                if list.try_reserve(grow).is_ok() {
                    list.resize(index, Value::Null);
                    list.push(value);
                    return self;
                }
                trace!("put: cannot pad to index {index}, keying by index instead");
            }
            self.items = Items::Mapping(std::mem::take(&mut self.items).into_mapping());
        }
        if let Items::Mapping(map) = &mut self.items {
            map.insert(key.to_string(), value);
        }
        self
    }

    /// Inserts `value` at the front. A mapping gets it under the next free
    /// index key, placed before the existing entries.
    pub fn prepend(&mut self, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match &mut self.items {
            Items::Sequence(list) => list.insert(0, value),
            Items::Mapping(map) => {
                let mut front = Map::new();
                front.insert(next_index_key(map), value);
                front.extend(std::mem::take(map));
                *map = front;
            }
        }
        self
    }

    /// Same as [`put`](Self::put).
    pub fn prepend_with_key(&mut self, value: impl Into<Value>, key: &str) -> &mut Self {
        self.put(key, value)
    }

    /// Appends `f(1)`, `f(2)`, … `f(n)`.
    pub fn times<F>(&mut self, n: usize, mut f: F) -> &mut Self
    where
        F: FnMut(usize) -> Value,
    {
        for iteration in 1..=n {
            self.push(f(iteration));
        }
        self
    }

    // ========================================================================
    // Removing
    // ========================================================================

    /// Removes and returns the last element (last entry's value, for a
    /// mapping).
    pub fn pop(&mut self) -> Option<Value> {
        match &mut self.items {
            Items::Sequence(list) => list.pop(),
            Items::Mapping(map) => {
                let key = map.keys().next_back()?.clone();
                map.shift_remove(&key)
            }
        }
    }

    /// Removes and returns the first element (first entry's value, for a
    /// mapping).
    pub fn shift(&mut self) -> Option<Value> {
        match &mut self.items {
            Items::Sequence(list) if list.is_empty() => None,
            Items::Sequence(list) => Some(list.remove(0)),
            Items::Mapping(map) => {
                let key = map.keys().next()?.clone();
                map.shift_remove(&key)
            }
        }
    }

    /// Removes `key` and returns its value, or `null` if there was none.
    /// Falsy values (`0`, `""`, `false`) are also returned as `null`.
    pub fn pull(&mut self, key: &str) -> Value {
        let value = self
            .items
            .lookup(key)
            .filter(|&value| truthy(Some(value)))
            .cloned()
            .unwrap_or(Value::Null);
        self.forget(key);
        value
    }

    /// Removes `key`. On a sequence the slot is cleared to `null` rather
    /// than closed up, so later indices do not move.
    pub fn forget(&mut self, key: &str) -> &mut Self {
        match &mut self.items {
            Items::Sequence(list) => {
                if let Some(slot) = parse_index(key).and_then(|index| list.get_mut(index)) {
                    *slot = Value::Null;
                }
            }
            Items::Mapping(map) => {
                map.shift_remove(key);
            }
        }
        self
    }

    /// Removes `limit` elements starting at `index` and returns them.
    ///
    /// See [`splice_with`](Self::splice_with).
    pub fn splice(&mut self, index: usize, limit: usize) -> Collection {
        self.splice_with(index, limit, Vec::new())
    }

    /// Removes `limit` elements starting at `index`, inserts `replacement`
    /// at `index`, and returns the removed elements.
    ///
    /// Removal is by value: *every* element strictly equal to one of the
    /// removed ones is dropped, including duplicates outside the range. A
    /// mapping is left untouched and yields an empty collection.
    pub fn splice_with(&mut self, index: usize, limit: usize, replacement: Vec<Value>) -> Collection {
        if self.items.is_mapping() {
            return Collection::new();
        }

        let removed = self.slice(index, Some(limit));
        let remaining = self.diff(&removed);
        trace!(
            "splice at {index}: removed {}, inserting {}",
            self.count() - remaining.count(),
            replacement.len()
        );

        let mut list = remaining.items.into_values();
        for (offset, value) in replacement.into_iter().enumerate() {
            let at = (index + offset).min(list.len());
            list.insert(at, value);
        }
        self.items = Items::Sequence(list);
        removed
    }

    // ========================================================================
    // Rewriting
    // ========================================================================

    /// Replaces every value with `f(value)`. A mapping keeps its keys.
    pub fn transform<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&Value) -> Value,
    {
        self.items = self.map(f).items;
        self
    }

    /// Shuffles a sequence in place using the thread-local generator.
    /// A mapping keeps its order.
    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::rng())
    }

    /// Shuffles a sequence in place (Fisher–Yates) using `rng`.
    pub fn shuffle_with<R>(&mut self, rng: &mut R) -> &mut Self
    where
        R: Rng + ?Sized,
    {
        if let Items::Sequence(list) = &mut self.items {
            trace!("shuffle: {} elements", list.len());
            for upper in (1..=list.len()).rev() {
                let pick = rng.random_range(0..upper);
                list.swap(upper - 1, pick);
            }
        }
        self
    }

    /// Shuffles, then returns the first element.
    pub fn random(&mut self) -> Option<Value> {
        self.random_with(&mut rand::rng())
    }

    /// Like [`random`](Self::random), drawing from `rng`.
    pub fn random_with<R>(&mut self, rng: &mut R) -> Option<Value>
    where
        R: Rng + ?Sized,
    {
        self.shuffle_with(rng);
        self.first().cloned()
    }

    /// Shuffles, then keeps only the last `n` elements.
    pub fn random_n(&mut self, n: usize) -> &mut Self {
        self.random_n_with(n, &mut rand::rng())
    }

    /// Like [`random_n`](Self::random_n), drawing from `rng`.
    pub fn random_n_with<R>(&mut self, n: usize, rng: &mut R) -> &mut Self
    where
        R: Rng + ?Sized,
    {
        self.shuffle_with(rng);
        if let Items::Sequence(list) = &mut self.items {
            let excess = list.len().saturating_sub(n);
            list.drain(..excess);
        }
        self
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// Calls `f` with the collection, then returns it for further chaining.
    pub fn tap<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        f(self);
        self
    }

    /// Calls `f` with the collection when `condition` holds. Unlike
    /// [`tap`](Self::tap) this ends the chain.
    pub fn when<F>(&mut self, condition: bool, f: F)
    where
        F: FnOnce(&mut Self),
    {
        if condition {
            f(self);
        }
    }
}

/// Smallest index key, counting up from the entry count, not already taken.
fn next_index_key(map: &Map<String, Value>) -> String {
    (map.len()..)
        .map(|index| index.to_string())
        .find(|key| !map.contains_key(key))
        .unwrap_or_default()
}
