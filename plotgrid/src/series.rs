// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series data model.
//!
//! A chart owns an ordered list of rows. Each row is a [`Series`], resolved once at
//! ingestion into either plain values (implicit keys `0..n`) or explicit key/value items.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::format::format_tick_with_step;

/// A data key: a number (positioned by value) or a label (positioned by index).
#[derive(Clone, Debug, PartialEq)]
pub enum Key {
    /// Numeric key.
    Number(f64),
    /// Ordinal key.
    Label(String),
}

impl Key {
    /// Returns the numeric value of a numeric key.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Label(_) => None,
        }
    }

    /// Returns display text for the key.
    pub fn to_label(&self) -> String {
        match self {
            Self::Number(n) => format_tick_with_step(*n, *n),
            Self::Label(s) => s.clone(),
        }
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Label(String::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

/// Opaque reference to a renderer-side style (colour, marker, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleRef(pub u32);

/// One data point.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesItem {
    /// The point's key.
    pub key: Key,
    /// The point's value; `None` marks a gap.
    pub value: Option<f64>,
    /// Optional style override.
    pub style: Option<StyleRef>,
}

impl SeriesItem {
    /// Creates an unstyled item.
    pub fn new(key: impl Into<Key>, value: f64) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
            style: None,
        }
    }

    /// Creates a gap at `key`.
    pub fn gap(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            value: None,
            style: None,
        }
    }

    /// Sets the style reference.
    pub fn with_style(mut self, style: StyleRef) -> Self {
        self.style = Some(style);
        self
    }
}

/// One row of chart data.
#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    /// Values keyed by their position.
    Scalar(Vec<f64>),
    /// Explicitly keyed items, in authored order.
    Keyed(Vec<SeriesItem>),
}

impl Series {
    /// Builds a keyed series from `(key, value)` pairs.
    pub fn keyed<K: Into<Key>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self::Keyed(
            pairs
                .into_iter()
                .map(|(k, v)| SeriesItem::new(k, v))
                .collect(),
        )
    }

    /// Number of entries in the row, gaps included.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(v) => v.len(),
            Self::Keyed(items) => items.len(),
        }
    }

    /// Whether the row has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(key, value)` pairs in row order.
    pub fn entries(&self) -> impl Iterator<Item = (Key, Option<f64>)> + '_ {
        let (scalar, keyed) = match self {
            Self::Scalar(v) => (Some(v), None),
            Self::Keyed(items) => (None, Some(items)),
        };
        let scalar = scalar
            .into_iter()
            .flat_map(|v| v.iter().enumerate())
            .map(|(i, v)| (Key::Number(i as f64), Some(*v)));
        let keyed = keyed
            .into_iter()
            .flatten()
            .map(|item| (item.key.clone(), item.value));
        scalar.chain(keyed)
    }
}

/// Observed value range across one or more series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueDomain {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl ValueDomain {
    /// Creates a domain, ordering the bounds.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Widens the domain to include `value` (e.g. a guideline).
    pub fn extend(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Returns the domain widened to include zero.
    pub fn with_zero(self) -> Self {
        Self {
            min: self.min.min(0.0),
            max: self.max.max(0.0),
        }
    }
}

/// Key range: numeric bounds (or index bounds for ordinal keys) and the key count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyDomain {
    /// Smallest key (or `0` for ordinal keys).
    pub min: f64,
    /// Largest key (or `count - 1` for ordinal keys).
    pub max: f64,
    /// Number of distinct keys.
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn scalar_rows_have_positional_keys() {
        let s = Series::Scalar(vec![4.0, 5.0]);
        let entries: Vec<_> = s.entries().collect();
        assert_eq!(
            entries,
            vec![(Key::Number(0.0), Some(4.0)), (Key::Number(1.0), Some(5.0))]
        );
    }

    #[test]
    fn keyed_rows_keep_gaps() {
        let s = Series::Keyed(vec![SeriesItem::new("a", 1.0), SeriesItem::gap("b")]);
        let entries: Vec<_> = s.entries().collect();
        assert_eq!(entries[1], (Key::from("b"), None));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn domain_extends_by_guidelines() {
        let mut d = ValueDomain::new(10.0, 2.0);
        assert_eq!(d, ValueDomain { min: 2.0, max: 10.0 });
        d.extend(15.0);
        d.extend(f64::NAN);
        assert_eq!(d.max, 15.0);
        assert_eq!(d.with_zero().min, 0.0);
    }
}
