// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid line placement.
//!
//! Offsets here are measured from the axis origin (left edge for horizontal axes,
//! bottom edge for vertical ones). The layout maps them to canvas coordinates.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::{AxisGrid, is_whole};
use crate::options::Orientation;

/// Subdivision counts tried from finest to coarsest.
const SUBDIVISIONS: [u32; 4] = [10, 5, 4, 2];

/// Upper bound on lines per axis, so a near-zero spacing cannot run away.
const MAX_LINES: usize = 10_000;

/// Relative tolerance for a regular line landing on the end of an uneven axis.
const EDGE_SLACK: f64 = 1e-9;

/// One tick on an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct GridPoint {
    /// Canvas coordinate of the line (x for horizontal axes, y for vertical ones).
    pub position: f64,
    /// Display text for the tick.
    pub label: String,
    /// Data value at the tick.
    pub value: f64,
}

/// Major and minor grid lines for both axes.
///
/// Each sequence is ordered from the axis origin outward: left to right
/// horizontally, bottom to top vertically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridPoints {
    /// Major lines crossing the horizontal axis.
    pub horizontal: Vec<GridPoint>,
    /// Major lines crossing the vertical axis.
    pub vertical: Vec<GridPoint>,
    /// Minor lines crossing the horizontal axis.
    pub horizontal_subdivisions: Vec<GridPoint>,
    /// Minor lines crossing the vertical axis.
    pub vertical_subdivisions: Vec<GridPoint>,
}

impl GridPoints {
    /// Major points along `orientation`.
    pub fn major(&self, orientation: Orientation) -> &[GridPoint] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    /// Major points whose label should be drawn.
    ///
    /// A label is skipped when its line is closer than `min_spacing` to the
    /// previous line (the irregular last line of an uneven axis). With
    /// `centred` labels sit between lines, so the last line has none.
    pub fn labelled(
        &self,
        orientation: Orientation,
        min_spacing: f64,
        centred: bool,
    ) -> Vec<&GridPoint> {
        let points = self.major(orientation);
        let last = points.len().saturating_sub(1);
        let mut prev: Option<f64> = None;
        let mut out = Vec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            let spaced = prev.is_none_or(|q| (p.position - q).abs() >= min_spacing);
            if spaced && !(centred && i == last) {
                out.push(p);
            }
            prev = Some(p.position);
        }
        out
    }
}

/// Major line offsets as `(offset, value)` pairs.
///
/// Lines sit every `spacing` pixels up to `length` (with half a spacing of
/// slack for rounding). Uneven axes stop at `length` and get one more line at
/// the far end.
pub(crate) fn major_offsets(grid: &AxisGrid, length: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    if !(grid.spacing.is_finite() && grid.spacing > 0.0) {
        out.push((0.0, grid.value_at(0.0)));
        return out;
    }
    let limit = if grid.uneven {
        length + EDGE_SLACK * length.max(1.0)
    } else {
        length + grid.spacing / 2.0
    };
    let mut c = 0_usize;
    loop {
        let offset = c as f64 * grid.spacing;
        let past = if grid.uneven {
            offset > limit
        } else {
            offset >= limit
        };
        if past || c >= MAX_LINES {
            break;
        }
        out.push((offset, grid.value_at(offset)));
        c += 1;
    }
    if grid.uneven {
        let near_end = out.last().is_some_and(|(o, _)| (o - length).abs() < 0.5);
        if !near_end {
            out.push((length, grid.value_at(length)));
        }
    }
    out
}

/// Picks how many parts to split each major division into.
///
/// `fixed` wins when it is at least 2. Otherwise the finest of 10, 5, 4 or 2
/// whose pixel spacing is at least `min_spacing`. With `whole_steps` the minor
/// step must also be a whole number of data units.
pub(crate) fn subdivision_count(
    grid: &AxisGrid,
    min_spacing: f64,
    fixed: Option<u32>,
    whole_steps: bool,
) -> Option<u32> {
    if let Some(n) = fixed {
        return (n >= 2).then_some(n);
    }
    SUBDIVISIONS.into_iter().find(|&n| {
        let n = f64::from(n);
        grid.spacing / n >= min_spacing && (!whole_steps || is_whole(grid.step / n))
    })
}

/// Minor line offsets as `(offset, value)` pairs, excluding the major lines.
pub(crate) fn subdivision_offsets(grid: &AxisGrid, length: f64, parts: u32) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    if parts < 2 || !(grid.spacing.is_finite() && grid.spacing > 0.0) {
        return out;
    }
    let sub = grid.spacing / f64::from(parts);
    let intervals = (length / grid.spacing).ceil();
    let mut c = 0.0;
    while c < intervals && out.len() < MAX_LINES {
        for k in 1..parts {
            let offset = c * grid.spacing + f64::from(k) * sub;
            if offset < length - 1e-9 {
                out.push((offset, grid.value_at(offset)));
            }
        }
        c += 1.0;
    }
    out
}
