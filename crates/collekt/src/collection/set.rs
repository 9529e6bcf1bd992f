//! Filtering by key and set algebra.
//!
//! Membership tests use strict equality. Filters keep a mapping's keys for
//! the entries that survive; projections (`only`, `except`) always produce a
//! mapping.

use std::borrow::Borrow;

use log::debug;
use serde_json::{Map, Value};

use super::{collect, Collection};
use crate::error::Result;
use crate::items::Items;
use crate::key::Key;
use crate::op::Op;
use crate::value::{prop, strict_eq};

impl Collection {
    // ========================================================================
    // Deduplication
    // ========================================================================

    /// Drops repeated elements, keeping the first occurrence of each.
    pub fn unique(&self) -> Collection {
        let mut seen: Vec<&Value> = Vec::new();
        let mut kept = Vec::new();
        for item in self.items.iter() {
            if !seen.iter().any(|&earlier| strict_eq(Some(earlier), Some(item))) {
                seen.push(item);
                kept.push(item.clone());
            }
        }
        collect(kept)
    }

    /// Keeps the first element for each distinct resolved key. Elements
    /// missing a `Field` key share one "absent" key.
    pub fn unique_by<'f>(&self, key: impl Into<Key<'f>>) -> Collection {
        let key = key.into();
        let mut seen: Vec<Option<Value>> = Vec::new();
        let mut kept = Vec::new();
        for item in self.items.iter() {
            let resolved = key.resolve(item);
            if !seen.iter().any(|earlier| strict_eq(earlier.as_ref(), resolved.as_ref())) {
                seen.push(resolved);
                kept.push(item.clone());
            }
        }
        collect(kept)
    }

    // ========================================================================
    // Set algebra
    // ========================================================================

    /// Elements not strictly equal to any of `values`.
    pub fn diff<I>(&self, values: I) -> Collection
    where
        I: IntoIterator,
        I::Item: Borrow<Value>,
    {
        let values: Vec<I::Item> = values.into_iter().collect();
        self.filter(|item| !is_member(&values, item))
    }

    /// Elements strictly equal to one of `values`.
    pub fn intersect<I>(&self, values: I) -> Collection
    where
        I: IntoIterator,
        I::Item: Borrow<Value>,
    {
        let values: Vec<I::Item> = values.into_iter().collect();
        self.filter(|item| is_member(&values, item))
    }

    /// Entries whose key is not a key of `other`.
    pub fn diff_keys(&self, other: impl AsRef<Items>) -> Collection {
        let other = other.as_ref();
        let keys: Vec<String> = self
            .items
            .keys()
            .into_iter()
            .filter(|key| !other.contains_key(key))
            .collect();
        self.only(keys)
    }

    // ========================================================================
    // Where clauses
    // ========================================================================

    /// Elements whose `key` property strictly equals `value`.
    pub fn where_eq(&self, key: &str, value: impl Into<Value>) -> Collection {
        self.where_cmp(key, Op::StrictEq, value)
    }

    /// Elements whose `key` property satisfies `operator` against `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::UnknownOperator`](crate::CollectionError::UnknownOperator)
    /// if `operator` is not one of `== === != !== < <= > >=`.
    pub fn where_op(&self, key: &str, operator: &str, value: impl Into<Value>) -> Result<Collection> {
        let op = operator.parse::<Op>().inspect_err(|err| {
            debug!("where_op on '{key}' rejected: {err}");
        })?;
        Ok(self.where_cmp(key, op, value))
    }

    /// Elements whose `key` property satisfies `op` against `value`. A
    /// missing property compares as absent.
    pub fn where_cmp(&self, key: &str, op: Op, value: impl Into<Value>) -> Collection {
        let value = value.into();
        self.filter(|item| op.matches(prop(item, key).as_deref(), &value))
    }

    /// Elements whose `key` property strictly equals one of `values`.
    pub fn where_in(&self, key: &str, values: &[Value]) -> Collection {
        self.filter(|item| prop(item, key).is_some_and(|found| is_member(values, &found)))
    }

    /// Elements whose `key` property equals none of `values`, including
    /// elements without that property.
    pub fn where_not_in(&self, key: &str, values: &[Value]) -> Collection {
        self.filter(|item| !prop(item, key).is_some_and(|found| is_member(values, &found)))
    }

    // ========================================================================
    // Projection
    // ========================================================================

    /// Mapping of the entries whose key is listed in `keys`, in the
    /// receiver's order. A sequence is keyed by index.
    pub fn only<I, S>(&self, keys: I) -> Collection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<S> = keys.into_iter().collect();
        self.project(|key| keys.iter().any(|wanted| wanted.as_ref() == key))
    }

    /// Mapping of the entries whose key is *not* listed in `keys`.
    pub fn except<I, S>(&self, keys: I) -> Collection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<S> = keys.into_iter().collect();
        self.project(|key| !keys.iter().any(|unwanted| unwanted.as_ref() == key))
    }

    fn project<F>(&self, mut keep: F) -> Collection
    where
        F: FnMut(&str) -> bool,
    {
        let map: Map<String, Value> = self
            .items
            .entries()
            .into_iter()
            .filter(|(key, _)| keep(key.as_str()))
            .map(|(key, value)| (key, value.clone()))
            .collect();
        collect(map)
    }

    // ========================================================================
    // Combining
    // ========================================================================

    /// With a sequence, appends its elements to a copy of the values. With
    /// a mapping, copies the receiver as a mapping and overwrites it with
    /// every entry of `other`.
    pub fn merge(&self, other: impl Into<Items>) -> Collection {
        let other: Items = other.into();
        match other {
            Items::Sequence(list) => {
                let mut merged = self.items.to_vec();
                merged.extend(list);
                collect(merged)
            }
            Items::Mapping(map) => {
                let mut merged = self.items.to_mapping();
                merged.extend(map);
                collect(merged)
            }
        }
    }

    /// Copies the receiver as a mapping and adds the entries of `other`
    /// whose keys it lacks. Existing keys win. A sequence argument is keyed
    /// by index.
    pub fn union(&self, other: impl Into<Items>) -> Collection {
        let other: Items = other.into();
        let mut merged = self.items.to_mapping();
        for (key, value) in other.into_mapping() {
            if !self.items.contains_key(&key) {
                merged.insert(key, value);
            }
        }
        collect(merged)
    }
}

fn is_member<T: Borrow<Value>>(values: &[T], item: &Value) -> bool {
    values
        .iter()
        .any(|value| strict_eq(Some(value.borrow()), Some(item)))
}
