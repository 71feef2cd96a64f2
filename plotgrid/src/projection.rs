// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Oblique projection for 3-D charts.
//!
//! Depth runs "into" the screen at a fixed angle: a point `depth` units back is
//! drawn up and to the right of its front-face position. Reserving room for that
//! offset shrinks the usable grid.

use core::f64::consts::PI;

use kurbo::Point;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Default projection angle, in degrees.
pub const DEFAULT_ANGLE_DEGREES: f64 = 30.0;

/// Bar and group spacing for grouped 3-D bars.
///
/// When several series share one key slot, each series' bar is narrower than the
/// slot, so the depth of the whole group shrinks to one bar's share.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGrouping {
    /// Number of bars per slot.
    pub series_count: usize,
    /// Gap between neighbouring slots, in pixels.
    pub bar_space: f64,
    /// Gap between bars inside one slot, in pixels.
    pub group_space: f64,
}

/// Oblique 3-D projection settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection3D {
    angle_degrees: f64,
    /// Depth of the chart, in key slots.
    pub depth: f64,
    /// Grouped-bar spacing; overrides `depth` when set.
    pub grouping: Option<BarGrouping>,
}

impl Default for Projection3D {
    fn default() -> Self {
        Self {
            angle_degrees: DEFAULT_ANGLE_DEGREES,
            depth: 1.0,
            grouping: None,
        }
    }
}

/// Grid size left over once depth has been reserved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthAdjustment {
    /// Usable grid width in pixels.
    pub width: f64,
    /// Usable grid height in pixels.
    pub height: f64,
    /// Pixel width of one key slot.
    pub depth_unit: f64,
    /// Depth in key slots actually used.
    pub depth: f64,
}

impl DepthAdjustment {
    /// Depth in pixels.
    pub fn depth_pixels(&self) -> f64 {
        self.depth * self.depth_unit
    }
}

impl Projection3D {
    /// Creates a projection with the given angle, clamped to `[0, 90]` degrees.
    pub fn new(angle_degrees: f64) -> Self {
        Self::default().with_angle(angle_degrees)
    }

    /// Sets the angle, clamped to `[0, 90]` degrees.
    pub fn with_angle(mut self, angle_degrees: f64) -> Self {
        self.angle_degrees = if angle_degrees.is_finite() {
            angle_degrees.clamp(0.0, 90.0)
        } else {
            DEFAULT_ANGLE_DEGREES
        };
        self
    }

    /// Sets the depth in key slots.
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth.max(0.0);
        self
    }

    /// Sets grouped-bar spacing.
    pub fn with_grouping(mut self, grouping: BarGrouping) -> Self {
        self.grouping = Some(grouping);
        self
    }

    /// Projection angle in degrees.
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Projection angle in radians.
    pub fn angle_radians(&self) -> f64 {
        self.angle_degrees * PI / 180.0
    }

    /// Projects `(x, y)` at depth `z` (pixels) onto the screen.
    ///
    /// Zero depth leaves the point unchanged.
    pub fn project(&self, x: f64, y: f64, z: f64) -> Point {
        if z == 0.0 {
            return Point::new(x, y);
        }
        let a = self.angle_radians();
        Point::new(x + z * a.cos(), y - z * a.sin())
    }

    /// Depth in key slots for a grid `width` pixels wide holding `slots` slots.
    pub fn depth_for(&self, width: f64, slots: f64) -> f64 {
        let Some(g) = self.grouping else {
            return self.depth;
        };
        if slots <= 0.0 || g.series_count == 0 {
            return self.depth;
        }
        let n = g.series_count as f64;
        let block = width / slots;
        let bar = ((block - g.bar_space - (n - 1.0) * g.group_space) / n).max(0.0);
        ((g.bar_space + bar) / block).max(0.0)
    }

    /// Shrinks a `length_x` by `length_y` grid to leave room for the depth offset.
    pub fn adjust_for_depth(&self, length_x: f64, length_y: f64, slots: f64) -> DepthAdjustment {
        let a = self.angle_radians();
        let slots = slots.max(1.0);
        let depth = self.depth_for(length_x, slots);
        let depth_unit = length_x / (slots + depth * a.cos());
        DepthAdjustment {
            width: slots * depth_unit,
            height: length_y - depth * depth_unit * a.sin(),
            depth_unit,
            depth,
        }
    }
}
