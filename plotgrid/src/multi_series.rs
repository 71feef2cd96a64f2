// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging several rows of series data into one key index.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::series::{Key, KeyDomain, Series, ValueDomain};

/// Hashable view of a key used while deduplicating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum KeyRef<'a> {
    Number(u64),
    Label(&'a str),
}

impl<'a> KeyRef<'a> {
    fn of(key: &'a Key) -> Option<Self> {
        match key {
            // `-0.0` and `0.0` are the same key.
            Key::Number(n) if n.is_finite() => Some(Self::Number((*n + 0.0).to_bits())),
            Key::Number(_) => None,
            Key::Label(s) => Some(Self::Label(s)),
        }
    }
}

/// Several parallel rows merged onto one ordered key set.
///
/// Numeric keys are sorted by value; as soon as any key is a label the whole
/// index is ordinal and keys keep their first-seen order. Values are stored
/// densely per row so lookups by `(key index, row)` are constant time.
///
/// Stacked extrema are derived on every call rather than cached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiSeriesIndex {
    keys: Vec<Key>,
    ordinal: bool,
    values: Vec<Vec<Option<f64>>>,
}

impl MultiSeriesIndex {
    /// Merges `rows` into one index.
    ///
    /// Non-finite values are treated as gaps and non-finite numeric keys are dropped.
    pub fn merge(rows: &[Series]) -> Self {
        let entries: Vec<Vec<(Key, Option<f64>)>> =
            rows.iter().map(|r| r.entries().collect()).collect();
        let ordinal = entries
            .iter()
            .flatten()
            .any(|(k, _)| matches!(k, Key::Label(_)));

        let mut keys: Vec<Key> = Vec::new();
        let mut seen: HashSet<KeyRef<'_>> = HashSet::new();
        for (key, _) in entries.iter().flatten() {
            if KeyRef::of(key).is_some_and(|r| seen.insert(r)) {
                keys.push(key.clone());
            }
        }
        if !ordinal {
            keys.sort_by(|a, b| {
                let a = a.as_number().unwrap_or(0.0);
                let b = b.as_number().unwrap_or(0.0);
                a.total_cmp(&b)
            });
        }

        let mut values = vec![vec![None; keys.len()]; rows.len()];
        {
            let positions: HashMap<KeyRef<'_>, usize> = keys
                .iter()
                .enumerate()
                .filter_map(|(i, k)| KeyRef::of(k).map(|r| (r, i)))
                .collect();
            for (row, row_entries) in entries.iter().enumerate() {
                for (key, value) in row_entries {
                    let Some(&i) = KeyRef::of(key).and_then(|r| positions.get(&r)) else {
                        continue;
                    };
                    values[row][i] = value.filter(|v| v.is_finite());
                }
            }
        }

        tracing::trace!(keys = keys.len(), rows = rows.len(), ordinal, "series merged");
        Self {
            keys,
            ordinal,
            values,
        }
    }

    /// Whether keys are positioned by index rather than by value.
    pub fn is_ordinal(&self) -> bool {
        self.ordinal
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no keys at all.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys in index order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// The key at integer position `i`.
    pub fn key(&self, i: usize) -> Option<&Key> {
        self.keys.get(i)
    }

    /// Maps a (possibly fractional) grid position back to a key.
    ///
    /// Numeric keys are positioned by value, so the position is the key. Ordinal
    /// positions are rounded to the nearest slot and return `None` past either end.
    pub fn key_at(&self, position: f64) -> Option<Key> {
        if !position.is_finite() {
            return None;
        }
        if !self.ordinal {
            return Some(Key::Number(position));
        }
        let r = position.round();
        if r < 0.0 || r >= self.keys.len() as f64 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
        let i = r as usize;
        self.keys.get(i).cloned()
    }

    /// Value of `row` at key index `key_index`, if present.
    pub fn value(&self, key_index: usize, row: usize) -> Option<f64> {
        self.values.get(row)?.get(key_index).copied().flatten()
    }

    /// Iterates over the present values of one row with their key index.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .get(row)
            .into_iter()
            .flat_map(|r| r.iter().enumerate())
            .filter_map(|(i, v)| v.map(|v| (i, v)))
    }

    /// Largest value across all rows.
    pub fn max_value(&self) -> Option<f64> {
        self.all_values().reduce(f64::max)
    }

    /// Smallest value across all rows.
    pub fn min_value(&self) -> Option<f64> {
        self.all_values().reduce(f64::min)
    }

    /// Largest per-key sum of the positive values across rows.
    ///
    /// This sizes stacked charts. It is not [`max_value`](Self::max_value): for rows
    /// `[{a: 3, b: -1}, {a: 2, b: 4}]` the stacked max is `5` while the plain max is `4`.
    pub fn max_stacked_value(&self) -> Option<f64> {
        self.stacked(|v| v > 0.0).reduce(f64::max)
    }

    /// Smallest per-key sum of the non-positive values across rows.
    pub fn min_stacked_value(&self) -> Option<f64> {
        self.stacked(|v| v <= 0.0).reduce(f64::min)
    }

    /// Largest key: the numeric maximum, or the last index for ordinal keys.
    pub fn max_key(&self) -> Option<f64> {
        if self.ordinal {
            return self.keys.len().checked_sub(1).map(|n| n as f64);
        }
        self.keys.last().and_then(Key::as_number)
    }

    /// Smallest key: the numeric minimum, or `0` for ordinal keys.
    pub fn min_key(&self) -> Option<f64> {
        if self.ordinal {
            return (!self.keys.is_empty()).then_some(0.0);
        }
        self.keys.first().and_then(Key::as_number)
    }

    /// Value range, plain or stacked.
    pub fn value_domain(&self, stacked: bool) -> Option<ValueDomain> {
        let (min, max) = if stacked {
            (self.min_stacked_value()?, self.max_stacked_value()?)
        } else {
            (self.min_value()?, self.max_value()?)
        };
        Some(ValueDomain { min, max })
    }

    /// Key range and count.
    pub fn key_domain(&self) -> Option<KeyDomain> {
        Some(KeyDomain {
            min: self.min_key()?,
            max: self.max_key()?,
            count: self.keys.len(),
        })
    }

    fn all_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().filter_map(|v| *v)
    }

    fn stacked<'a>(
        &'a self,
        keep: impl Fn(f64) -> bool + 'a,
    ) -> impl Iterator<Item = f64> + 'a {
        let rows = &self.values;
        (0..self.keys.len())
            .filter(move |&i| rows.iter().any(|r| r[i].is_some()))
            .map(move |i| {
                rows.iter()
                    .filter_map(|r| r[i])
                    .filter(|&v| keep(v))
                    .sum::<f64>()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesItem;

    fn ab(a: f64, b: f64) -> Series {
        Series::keyed([("a", a), ("b", b)])
    }

    #[test]
    fn stacked_max_sums_positive_values_per_key() {
        let idx = MultiSeriesIndex::merge(&[ab(3.0, -1.0), ab(2.0, 4.0)]);
        assert_eq!(idx.max_stacked_value(), Some(5.0));
        assert_eq!(idx.max_value(), Some(4.0));
        assert_eq!(idx.min_stacked_value(), Some(-1.0));
        assert_eq!(idx.min_value(), Some(-1.0));
    }

    #[test]
    fn stacked_min_is_zero_without_negatives() {
        let idx = MultiSeriesIndex::merge(&[ab(3.0, 1.0), ab(2.0, 4.0)]);
        assert_eq!(idx.min_stacked_value(), Some(0.0));
    }

    #[test]
    fn ordinal_keys_keep_first_seen_order() {
        let rows = [
            Series::keyed([("mar", 1.0), ("jan", 2.0)]),
            Series::keyed([("jan", 5.0), ("feb", 3.0)]),
        ];
        let idx = MultiSeriesIndex::merge(&rows);
        assert!(idx.is_ordinal());
        assert_eq!(
            idx.keys(),
            &[Key::from("mar"), Key::from("jan"), Key::from("feb")]
        );
        assert_eq!(idx.value(1, 1), Some(5.0));
        assert_eq!(idx.value(2, 0), None);
        assert_eq!(idx.max_key(), Some(2.0));
        assert_eq!(idx.min_key(), Some(0.0));
    }

    #[test]
    fn numeric_keys_are_sorted_and_deduplicated() {
        let rows = [
            Series::keyed([(10.0, 1.0), (-0.0, 2.0)]),
            Series::keyed([(0.0, 3.0), (5.0, 4.0)]),
        ];
        let idx = MultiSeriesIndex::merge(&rows);
        assert!(!idx.is_ordinal());
        assert_eq!(idx.key_count(), 3);
        assert_eq!(idx.min_key(), Some(0.0));
        assert_eq!(idx.max_key(), Some(10.0));
        assert_eq!(idx.value(0, 1), Some(3.0));
    }

    #[test]
    fn key_at_rounds_ordinal_positions() {
        let idx = MultiSeriesIndex::merge(&[Series::keyed([("x", 1.0), ("y", 2.0)])]);
        assert_eq!(idx.key_at(0.4), Some(Key::from("x")));
        assert_eq!(idx.key_at(1.4), Some(Key::from("y")));
        assert_eq!(idx.key_at(1.6), None);
        assert_eq!(idx.key_at(-0.6), None);
    }

    #[test]
    fn key_at_is_identity_for_numeric_keys() {
        let idx = MultiSeriesIndex::merge(&[Series::Scalar(alloc::vec![1.0, 2.0])]);
        assert_eq!(idx.key_at(7.5), Some(Key::Number(7.5)));
    }

    #[test]
    fn gaps_are_not_values() {
        let rows = [Series::Keyed(alloc::vec![
            SeriesItem::new("a", 1.0),
            SeriesItem::gap("b"),
            SeriesItem::new("c", f64::NAN),
        ])];
        let idx = MultiSeriesIndex::merge(&rows);
        assert_eq!(idx.key_count(), 3);
        assert_eq!(idx.value_domain(false), Some(ValueDomain { min: 1.0, max: 1.0 }));
        assert_eq!(idx.row(0).collect::<Vec<_>>(), alloc::vec![(0, 1.0)]);
    }

    #[test]
    fn empty_index_has_no_domains() {
        let idx = MultiSeriesIndex::merge(&[]);
        assert!(idx.is_empty());
        assert_eq!(idx.value_domain(true), None);
        assert_eq!(idx.key_domain(), None);
    }
}
