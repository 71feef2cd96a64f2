// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid layout configuration.
//!
//! All options are plain data with builder-style setters. Defaults match a small
//! chart: 10 px padding, 15 px minimum grid spacing, 10 px label font.

use core::fmt;

use smallvec::SmallVec;

use crate::projection::Projection3D;

/// Default padding on each side of the plot area, in pixels.
pub const DEFAULT_PADDING: f64 = 10.0;
/// Default minimum distance between major grid lines, in pixels.
pub const DEFAULT_MIN_GRID_SPACING: f64 = 15.0;
/// Default axis label font size, in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;
/// Default minimum distance between subdivision lines, in pixels.
pub const DEFAULT_MIN_SUBDIVISION_SPACING: f64 = 5.0;

/// An axis direction on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left to right.
    Horizontal,
    /// Bottom to top.
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

/// Space reserved around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    /// Space above.
    pub top: f64,
    /// Space below.
    pub bottom: f64,
    /// Space to the left.
    pub left: f64,
    /// Space to the right.
    pub right: f64,
}

impl Padding {
    /// Same padding on every side.
    pub fn uniform(p: f64) -> Self {
        Self {
            top: p,
            bottom: p,
            left: p,
            right: p,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(DEFAULT_PADDING)
    }
}

/// Axis label settings used when reserving padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelOptions {
    /// Reserve room for horizontal axis labels (below the plot).
    pub show_horizontal: bool,
    /// Reserve room for vertical axis labels (left of the plot).
    pub show_vertical: bool,
    /// Label font size in pixels.
    pub font_size: f64,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            show_horizontal: true,
            show_vertical: true,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Minor grid line settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubdivisionOptions {
    /// Whether to compute subdivisions at all.
    pub enabled: bool,
    /// Minimum distance between subdivision lines, in pixels.
    pub minimum_spacing: f64,
    /// Fixed number of subdivisions per horizontal division.
    pub horizontal: Option<u32>,
    /// Fixed number of subdivisions per vertical division.
    pub vertical: Option<u32>,
}

impl Default for SubdivisionOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            minimum_spacing: DEFAULT_MIN_SUBDIVISION_SPACING,
            horizontal: None,
            vertical: None,
        }
    }
}

/// Caller overrides for one on-screen axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisOverrides {
    /// Explicit lower bound.
    pub min: Option<f64>,
    /// Explicit upper bound.
    pub max: Option<f64>,
    /// Fixed grid step; switches the axis to a [`FixedAxis`](crate::FixedAxis).
    pub division: Option<f64>,
    /// Minimum grid spacing for this axis only.
    pub minimum_spacing: Option<f64>,
}

impl AxisOverrides {
    /// Sets both explicit bounds.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Sets a fixed grid step. Non-positive steps are ignored.
    pub fn with_division(mut self, step: f64) -> Self {
        self.division = (step > 0.0).then_some(step);
        self
    }

    /// Sets a per-axis minimum grid spacing.
    pub fn with_minimum_spacing(mut self, spacing: f64) -> Self {
        self.minimum_spacing = Some(spacing);
        self
    }
}

/// Options for a [`GridLayout`](crate::GridLayout).
#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Padding before label space is added.
    pub padding: Padding,
    /// Minimum major grid spacing for both axes.
    pub minimum_grid_spacing: f64,
    /// Overrides for the horizontal (screen x) axis.
    pub horizontal: AxisOverrides,
    /// Overrides for the vertical (screen y) axis.
    pub vertical: AxisOverrides,
    /// Put keys on the vertical axis and values on the horizontal one.
    pub flip_axes: bool,
    /// Label padding settings.
    pub labels: LabelOptions,
    /// Minor grid settings.
    pub subdivisions: SubdivisionOptions,
    /// Extra values the value axis must include.
    pub guidelines: SmallVec<[f64; 4]>,
    /// Oblique projection for 3-D charts.
    pub projection: Option<Projection3D>,
}

impl GridOptions {
    /// Creates options for a `width` by `height` canvas.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
            minimum_grid_spacing: DEFAULT_MIN_GRID_SPACING,
            horizontal: AxisOverrides::default(),
            vertical: AxisOverrides::default(),
            flip_axes: false,
            labels: LabelOptions::default(),
            subdivisions: SubdivisionOptions::default(),
            guidelines: SmallVec::new(),
            projection: None,
        }
    }

    /// Sets the padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the minimum major grid spacing.
    pub fn with_minimum_grid_spacing(mut self, spacing: f64) -> Self {
        self.minimum_grid_spacing = spacing;
        self
    }

    /// Sets the horizontal axis overrides.
    pub fn with_horizontal(mut self, overrides: AxisOverrides) -> Self {
        self.horizontal = overrides;
        self
    }

    /// Sets the vertical axis overrides.
    pub fn with_vertical(mut self, overrides: AxisOverrides) -> Self {
        self.vertical = overrides;
        self
    }

    /// Swaps the key and value axes (horizontal bar charts).
    pub fn with_flip_axes(mut self, flip: bool) -> Self {
        self.flip_axes = flip;
        self
    }

    /// Sets the label options.
    pub fn with_labels(mut self, labels: LabelOptions) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the subdivision options.
    pub fn with_subdivisions(mut self, subdivisions: SubdivisionOptions) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Adds a guideline value.
    pub fn with_guideline(mut self, value: f64) -> Self {
        self.guidelines.push(value);
        self
    }

    /// Enables the oblique 3-D projection.
    pub fn with_projection(mut self, projection: Projection3D) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Returns the overrides for an on-screen axis.
    pub fn overrides(&self, orientation: Orientation) -> &AxisOverrides {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    /// Minimum grid spacing for an on-screen axis.
    ///
    /// A fixed division forces 1 px so the fixed step is never coarsened.
    pub fn minimum_spacing(&self, orientation: Orientation) -> f64 {
        let o = self.overrides(orientation);
        if o.division.is_some() {
            1.0
        } else {
            o.minimum_spacing.unwrap_or(self.minimum_grid_spacing)
        }
    }
}
