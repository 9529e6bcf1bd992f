//! Numeric aggregation.
//!
//! Aggregates never fail. Empty input and values that do not convert to a
//! number produce `NaN`, `Infinity` or `-Infinity` under ordinary
//! floating-point rules, and `mode` of an empty collection is `None`.

use serde_json::Value;

use super::Collection;
use crate::key::Key;
use crate::value::{strict_eq, to_number};

impl Collection {
    /// Sum of the elements, each converted to a number.
    pub fn sum(&self) -> f64 {
        self.items.iter().map(|item| to_number(Some(item))).sum()
    }

    /// Sum of each element's resolved key. An element missing a `Field` key
    /// contributes `NaN`.
    pub fn sum_by<'f>(&self, key: impl Into<Key<'f>>) -> f64 {
        let key = key.into();
        self.items
            .iter()
            .map(|item| to_number(key.resolve(item).as_ref()))
            .sum()
    }

    /// `sum() / count()`; `NaN` when empty.
    pub fn avg(&self) -> f64 {
        self.sum() / self.items.len() as f64
    }

    /// Sum of the resolved keys present, divided by the total element count.
    /// Elements missing a `Field` key are skipped in the sum but still
    /// counted.
    pub fn avg_by<'f>(&self, key: impl Into<Key<'f>>) -> f64 {
        let key = key.into();
        self.projected(&key).iter().sum::<f64>() / self.items.len() as f64
    }

    /// Alias for [`avg`](Self::avg).
    pub fn average(&self) -> f64 {
        self.avg()
    }

    /// Alias for [`avg_by`](Self::avg_by).
    pub fn average_by<'f>(&self, key: impl Into<Key<'f>>) -> f64 {
        self.avg_by(key)
    }

    /// Middle element, or mean of the two middle elements, **in current
    /// order**. Sort first for a numeric median.
    ///
    /// Every element goes through numeric conversion first, so a middle
    /// element that is not numeric yields `NaN` even for odd lengths.
    pub fn median(&self) -> f64 {
        let values: Vec<f64> = self.items.iter().map(|item| to_number(Some(item))).collect();
        middle(&values)
    }

    /// Like [`median`](Self::median), over each element's resolved key.
    pub fn median_by<'f>(&self, key: impl Into<Key<'f>>) -> f64 {
        let key = key.into();
        let values: Vec<f64> = self
            .items
            .iter()
            .map(|item| to_number(key.resolve(item).as_ref()))
            .collect();
        middle(&values)
    }

    /// All values tied for the highest frequency, in first-seen order.
    /// `None` when the collection is empty.
    pub fn mode(&self) -> Option<Vec<Value>> {
        self.tally(|item| Some(item.clone()))
    }

    /// Like [`mode`](Self::mode), over each element's resolved key. A missing
    /// key is tallied as its own value and reported as `null`.
    pub fn mode_by<'f>(&self, key: impl Into<Key<'f>>) -> Option<Vec<Value>> {
        let key = key.into();
        self.tally(|item| key.resolve(item))
    }

    /// Largest element; `-Infinity` when empty, `NaN` if any element is not
    /// numeric.
    pub fn max(&self) -> f64 {
        extreme(self.items.iter().map(|item| to_number(Some(item))), f64::NEG_INFINITY, |a, b| a > b)
    }

    /// Largest resolved key, over the elements that have one.
    pub fn max_by<'f>(&self, key: impl Into<Key<'f>>) -> f64 {
        extreme(self.projected(&key.into()).into_iter(), f64::NEG_INFINITY, |a, b| a > b)
    }

    /// Smallest element; `Infinity` when empty, `NaN` if any element is not
    /// numeric.
    pub fn min(&self) -> f64 {
        extreme(self.items.iter().map(|item| to_number(Some(item))), f64::INFINITY, |a, b| a < b)
    }

    /// Smallest resolved key, over the elements that have one.
    pub fn min_by<'f>(&self, key: impl Into<Key<'f>>) -> f64 {
        extreme(self.projected(&key.into()).into_iter(), f64::INFINITY, |a, b| a < b)
    }

    /// Numeric projections of the elements that resolve `key`, as `pluck`
    /// would select them.
    fn projected(&self, key: &Key<'_>) -> Vec<f64> {
        self.items
            .iter()
            .filter_map(|item| key.resolve(item))
            .map(|value| to_number(Some(&value)))
            .collect()
    }

    fn tally<F>(&self, mut resolve: F) -> Option<Vec<Value>>
    where
        F: FnMut(&Value) -> Option<Value>,
    {
        if self.items.is_empty() {
            return None;
        }

        let mut counts: Vec<(Option<Value>, usize)> = Vec::new();
        let mut highest = 1;
        for item in self.items.iter() {
            let resolved = resolve(item);
            match counts
                .iter()
                .position(|(seen, _)| strict_eq(seen.as_ref(), resolved.as_ref()))
            {
                Some(index) => {
                    counts[index].1 += 1;
                    highest = highest.max(counts[index].1);
                }
                None => counts.push((resolved, 1)),
            }
        }

        Some(
            counts
                .into_iter()
                .filter(|(_, count)| *count == highest)
                .map(|(value, _)| value.unwrap_or(Value::Null))
                .collect(),
        )
    }
}

fn middle(values: &[f64]) -> f64 {
    let len = values.len();
    let at = |index: Option<usize>| index.and_then(|i| values.get(i)).copied().unwrap_or(f64::NAN);
    if len % 2 == 0 {
        (at((len / 2).checked_sub(1)) + at(Some(len / 2))) / 2.0
    } else {
        at(Some(len / 2))
    }
}

/// Folds to the extreme value, propagating `NaN` as soon as it appears.
fn extreme<I, F>(values: I, start: f64, better: F) -> f64
where
    I: Iterator<Item = f64>,
    F: Fn(f64, f64) -> bool,
{
    let mut best = start;
    for value in values {
        if value.is_nan() {
            return f64::NAN;
        }
        if better(value, best) {
            best = value;
        }
    }
    best
}
