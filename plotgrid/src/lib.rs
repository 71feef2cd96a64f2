// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis scaling and grid layout for charts.
//!
//! This crate turns a data range and a pixel area into a readable grid:
//! - **Axes** pick "nice" grid steps, the zero offset and the pixel scale.
//! - **Series** from several rows are merged into one ordered key set.
//! - **Layout** reserves label space, sizes both axes, and maps keys and values
//!   to canvas coordinates, optionally with an oblique 3-D projection.
//!
//! Drawing is out of scope; renderers consume [`GridAxes`] and [`GridPoints`].
//!
//! ```
//! use plotgrid::{CalcMode, GridLayout, GridOptions, HeuristicTextMeasurer, Key};
//! use plotgrid::{MultiSeriesIndex, Series};
//!
//! let data = MultiSeriesIndex::merge(&[Series::keyed([("a", 12.0), ("b", 30.0)])]);
//! let layout = GridLayout::new(GridOptions::new(300.0, 200.0));
//! let axes = layout
//!     .calc_axes(&data, &HeuristicTextMeasurer::default(), CalcMode::bars())
//!     .unwrap();
//! let top = axes.point(&Key::from("b"), 1, 30.0).unwrap();
//! assert!(top.y < axes.grid_rect().y1);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod error;
mod fixed_axis;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod grid_points;
mod layout;
#[cfg(test)]
mod layout_tests;
mod measure;
mod multi_series;
mod options;
mod projection;
mod series;

pub use axis::{Axis, AxisGrid, AxisSpec, LayoutAxis};
pub use error::{GridError, InvalidAxisReason, Result};
pub use fixed_axis::FixedAxis;
pub use format::format_tick_with_step;
pub use grid_points::{GridPoint, GridPoints};
pub use layout::{AxisLines, BarExtent, CalcMode, GridAxes, GridLayout};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use multi_series::MultiSeriesIndex;
pub use options::{
    AxisOverrides, DEFAULT_FONT_SIZE, DEFAULT_MIN_GRID_SPACING, DEFAULT_MIN_SUBDIVISION_SPACING,
    DEFAULT_PADDING, GridOptions, LabelOptions, Orientation, Padding, SubdivisionOptions,
};
pub use projection::{BarGrouping, DEFAULT_ANGLE_DEGREES, DepthAdjustment, Projection3D};
pub use series::{Key, KeyDomain, Series, SeriesItem, StyleRef, ValueDomain};
