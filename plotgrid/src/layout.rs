// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid layout: sizes both axes of a chart and maps data onto the canvas.
//!
//! A chart has a key axis (categories or numeric keys) and a value axis. Normally
//! keys run left to right and values bottom to top; `flip_axes` swaps them for
//! horizontal bar charts. Layout runs in three steps:
//! - **Padding**: reserve room for axis labels around the plot.
//! - **Depth**: for 3-D charts, shrink the grid to leave room for the projection.
//! - **Axes**: build one [`Axis`] or [`FixedAxis`] per dimension and size its grid.
//!
//! The result is an immutable [`GridAxes`] that renderers query for positions.

extern crate alloc;

use core::cell::OnceCell;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::axis::{Axis, AxisGrid, AxisSpec, LayoutAxis};
use crate::error::{GridError, InvalidAxisReason, Result};
use crate::fixed_axis::FixedAxis;
use crate::format::format_tick_with_step;
use crate::grid_points::{
    GridPoint, GridPoints, major_offsets, subdivision_count, subdivision_offsets,
};
use crate::measure::TextMeasurer;
use crate::multi_series::MultiSeriesIndex;
use crate::options::{GridOptions, Orientation, Padding, SubdivisionOptions};
use crate::projection::{DepthAdjustment, Projection3D};
use crate::series::{Key, KeyDomain, ValueDomain};

/// Relative tolerance for "on the axis" checks.
const EDGE_EPSILON: f64 = 1e-9;

/// How a chart wants its axes sized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalcMode {
    /// Size the key axis by key count (`0..=count-1`) instead of key values.
    pub count_keys: bool,
    /// Bar slots: each key owns `[k, k + 1)`, so the key axis gets one extra unit.
    pub bar: bool,
    /// Size the value axis from stacked per-key sums.
    pub stacked: bool,
}

impl CalcMode {
    /// Points and lines: keys by value, no slots.
    pub fn points() -> Self {
        Self::default()
    }

    /// Side-by-side bars.
    pub fn bars() -> Self {
        Self {
            bar: true,
            ..Self::default()
        }
    }

    /// Stacked bars.
    pub fn stacked_bars() -> Self {
        Self {
            bar: true,
            stacked: true,
            ..Self::default()
        }
    }

    /// Sets whether the key axis is sized by key count.
    pub fn with_count_keys(mut self, count_keys: bool) -> Self {
        self.count_keys = count_keys;
        self
    }
}

/// The clamped extent of a bar along the value axis, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarExtent {
    /// Smaller canvas coordinate (top for vertical bars, left for horizontal ones).
    pub start: f64,
    /// Extent in pixels; never negative.
    pub length: f64,
}

impl BarExtent {
    /// Larger canvas coordinate.
    pub fn end(&self) -> f64 {
        self.start + self.length
    }
}

/// Where the zero lines sit, if they fall inside the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLines {
    /// Canvas y of the horizontal axis line.
    pub horizontal: Option<f64>,
    /// Canvas x of the vertical axis line.
    pub vertical: Option<f64>,
}

/// Computed axes for one chart render.
#[derive(Clone, Debug, PartialEq)]
pub struct GridAxes {
    canvas: Rect,
    plot: Rect,
    grid: Rect,
    key: AxisGrid,
    value: AxisGrid,
    flip: bool,
    ordinal: bool,
    depth: Option<(Projection3D, DepthAdjustment)>,
    min_spacing_h: f64,
    min_spacing_v: f64,
    subdivisions: SubdivisionOptions,
}

impl GridAxes {
    /// Sizes both axes for `data`.
    ///
    /// Fails with [`GridError::NoData`] if there is nothing to plot,
    /// [`GridError::InvalidAxis`] if explicit bounds are inverted or exclude all
    /// data, [`GridError::NoRoom`] if padding leaves no grid, and
    /// [`GridError::Domain`] if an axis has no extent.
    pub fn compute(
        options: &GridOptions,
        data: &MultiSeriesIndex,
        measurer: &dyn TextMeasurer,
        mode: CalcMode,
    ) -> Result<Self> {
        let mut values = data.value_domain(mode.stacked).ok_or(GridError::NoData)?;
        for &g in &options.guidelines {
            values.extend(g);
        }
        let keys = data.key_domain().ok_or(GridError::NoData)?;
        validate_overrides(options, &keys, &values)?;

        let padding = label_padding(options, data, &keys, &values, measurer);
        let canvas = Rect::new(0.0, 0.0, options.width, options.height);
        let plot = Rect::new(
            padding.left,
            padding.top,
            options.width - padding.right,
            options.height - padding.bottom,
        );
        check_room(&plot)?;

        let flip = options.flip_axes;
        let (key_orientation, value_orientation) = if flip {
            (Orientation::Vertical, Orientation::Horizontal)
        } else {
            (Orientation::Horizontal, Orientation::Vertical)
        };
        let key_overrides = options.overrides(key_orientation);
        let value_overrides = options.overrides(value_orientation);

        let depth = options.projection.map(|p| {
            let slots = match (key_overrides.min, key_overrides.max) {
                (None, None) => keys.count as f64,
                (min, max) => max.unwrap_or(keys.max) - min.unwrap_or(keys.min) + 1.0,
            };
            (p, p.adjust_for_depth(plot.width(), plot.height(), slots))
        });
        let grid = match &depth {
            Some((_, adj)) => Rect::new(
                plot.x0,
                plot.y1 - adj.height,
                plot.x0 + adj.width,
                plot.y1,
            ),
            None => plot,
        };
        check_room(&grid)?;
        let (key_length, value_length) = if flip {
            (grid.height(), grid.width())
        } else {
            (grid.width(), grid.height())
        };

        let (key_min, key_max) = if mode.count_keys {
            (0.0, keys.count.saturating_sub(1) as f64)
        } else {
            (keys.min.min(0.0), keys.max.max(0.0))
        };
        let key_min = key_overrides.min.unwrap_or(key_min);
        let key_max = key_overrides.max.unwrap_or(key_max);
        let key_axis: LayoutAxis = match key_overrides.division {
            Some(step) => {
                // Fixed axes ignore round-up, so the last slot is added here.
                let max = if mode.bar { key_max + 1.0 } else { key_max };
                FixedAxis::new(key_length, max, key_min, step)?.into()
            }
            None => Axis::new(
                AxisSpec::new(key_length, key_max, key_min)
                    .with_min_unit(1.0)
                    .with_fit_to_length(true),
            )?
            .into(),
        };

        let value_max = value_overrides.max.unwrap_or(values.max.max(0.0));
        let value_min = value_overrides.min.unwrap_or(values.min.min(0.0));
        let value_axis: LayoutAxis = match value_overrides.division {
            Some(step) => FixedAxis::new(value_length, value_max, value_min, step)?.into(),
            None => Axis::new(AxisSpec::new(value_length, value_max, value_min))?.into(),
        };

        let key = key_axis.grid(options.minimum_spacing(key_orientation), mode.bar);
        let value = value_axis.grid(options.minimum_spacing(value_orientation), false);

        tracing::debug!(
            flip,
            width = grid.width(),
            height = grid.height(),
            key_step = key.step,
            key_zero = key.zero,
            key_unit = key.unit,
            value_step = value.step,
            value_zero = value.zero,
            value_unit = value.unit,
            uneven = key.uneven || value.uneven,
            "grid axes computed"
        );

        Ok(Self {
            canvas,
            plot,
            grid,
            key,
            value,
            flip,
            ordinal: data.is_ordinal(),
            depth,
            min_spacing_h: options.minimum_spacing(Orientation::Horizontal),
            min_spacing_v: options.minimum_spacing(Orientation::Vertical),
            subdivisions: options.subdivisions,
        })
    }

    /// The whole canvas.
    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// The canvas minus padding and label space.
    pub fn plot_area(&self) -> Rect {
        self.plot
    }

    /// The front face of the grid. Equals [`plot_area`](Self::plot_area) unless depth is reserved.
    pub fn grid_rect(&self) -> Rect {
        self.grid
    }

    /// Grid of the key axis.
    pub fn key_grid(&self) -> &AxisGrid {
        &self.key
    }

    /// Grid of the value axis.
    pub fn value_grid(&self) -> &AxisGrid {
        &self.value
    }

    /// Grid of the axis running along `orientation`.
    pub fn grid_for(&self, orientation: Orientation) -> &AxisGrid {
        if self.holds_keys(orientation) {
            &self.key
        } else {
            &self.value
        }
    }

    /// Whether keys run vertically.
    pub fn is_flipped(&self) -> bool {
        self.flip
    }

    /// Whether keys are positioned by index.
    pub fn is_ordinal(&self) -> bool {
        self.ordinal
    }

    /// Pixel width of one key unit (one bar slot).
    pub fn slot_width(&self) -> f64 {
        self.key.unit
    }

    /// Minimum major grid spacing used along `orientation`.
    pub fn minimum_spacing(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.min_spacing_h,
            Orientation::Vertical => self.min_spacing_v,
        }
    }

    /// Depth reserved for a 3-D projection.
    pub fn depth(&self) -> Option<&DepthAdjustment> {
        self.depth.as_ref().map(|(_, adj)| adj)
    }

    /// The 3-D projection, if any.
    pub fn projection(&self) -> Option<&Projection3D> {
        self.depth.as_ref().map(|(p, _)| p)
    }

    /// Offset of a mark along the key axis, from the axis origin.
    ///
    /// Ordinal data is placed by `index`, numeric data by the key's value. Returns
    /// `None` when the offset falls outside the axis; such marks are skipped.
    pub fn position(&self, key: &Key, index: usize) -> Option<f64> {
        let k = if self.ordinal {
            index as f64
        } else {
            key.as_number()?
        };
        let offset = self.key.offset_of(k);
        let length = self.length(self.key_orientation());
        let slack = EDGE_EPSILON * length.max(1.0);
        (offset >= -slack && offset <= length + slack).then_some(offset)
    }

    /// Offset of `value` along the value axis, from the axis origin. Not clamped.
    pub fn value_offset(&self, value: f64) -> f64 {
        self.value.offset_of(value)
    }

    /// Canvas point for a data item, or `None` if its key is off the grid.
    pub fn point(&self, key: &Key, index: usize, value: f64) -> Option<Point> {
        let k = self.position(key, index)?;
        Some(self.to_canvas(k, self.value_offset(value)))
    }

    /// Converts axis offsets to a canvas point.
    pub fn to_canvas(&self, key_offset: f64, value_offset: f64) -> Point {
        if self.flip {
            Point::new(self.grid.x0 + value_offset, self.grid.y1 - key_offset)
        } else {
            Point::new(self.grid.x0 + key_offset, self.grid.y1 - value_offset)
        }
    }

    /// Clamps a canvas y into the grid.
    pub fn clamp_vertical(&self, y: f64) -> f64 {
        y.clamp(self.grid.y0, self.grid.y1)
    }

    /// Clamps a canvas x into the grid.
    pub fn clamp_horizontal(&self, x: f64) -> f64 {
        x.clamp(self.grid.x0, self.grid.x1)
    }

    /// Clamped extent of a bar from value `from` to value `to`.
    ///
    /// Stacked bars pass the running total as `from`.
    pub fn bar_span(&self, from: f64, to: f64) -> BarExtent {
        let a = self.value_offset(from);
        let b = self.value_offset(to);
        let (l1, l2) = if self.flip {
            (
                self.clamp_horizontal(self.grid.x0 + a),
                self.clamp_horizontal(self.grid.x0 + b),
            )
        } else {
            (
                self.clamp_vertical(self.grid.y1 - a),
                self.clamp_vertical(self.grid.y1 - b),
            )
        };
        BarExtent {
            start: l1.min(l2),
            length: (l1 - l2).abs(),
        }
    }

    /// Clamped extent of a bar from the zero line to `value`.
    pub fn bar_extent(&self, value: f64) -> BarExtent {
        self.bar_span(0.0, value)
    }

    /// Canvas positions of the zero lines that fall inside the grid.
    pub fn axis_lines(&self) -> AxisLines {
        let inside = |orientation: Orientation| {
            let zero = self.grid_for(orientation).zero;
            (zero >= 0.0 && zero <= self.length(orientation)).then_some(zero)
        };
        AxisLines {
            horizontal: inside(Orientation::Vertical).map(|z| self.grid.y1 - z),
            vertical: inside(Orientation::Horizontal).map(|z| self.grid.x0 + z),
        }
    }

    /// Projects a canvas point `z` pixels into the chart. Identity without depth.
    pub fn project(&self, x: f64, y: f64, z: f64) -> Point {
        match &self.depth {
            Some((p, _)) => p.project(x, y, z),
            None => Point::new(x, y),
        }
    }

    /// Major and minor grid lines with labels.
    ///
    /// Ordinal key axes are labelled with the key nearest each line.
    pub fn grid_points(&self, data: &MultiSeriesIndex) -> GridPoints {
        let mut out = GridPoints::default();
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let grid = self.grid_for(orientation);
            let length = self.length(orientation);
            let is_key = self.holds_keys(orientation);
            let label = |value: f64| -> String {
                if is_key && self.ordinal {
                    data.key_at(value).map(|k| k.to_label()).unwrap_or_default()
                } else {
                    format_tick_with_step(value, grid.step)
                }
            };
            let to_point = |(offset, value): (f64, f64)| GridPoint {
                position: self.canvas_coord(orientation, offset),
                label: label(value),
                value,
            };

            let major: Vec<GridPoint> = major_offsets(grid, length)
                .into_iter()
                .map(&to_point)
                .collect();
            let fixed = match orientation {
                Orientation::Horizontal => self.subdivisions.horizontal,
                Orientation::Vertical => self.subdivisions.vertical,
            };
            let minor: Vec<GridPoint> = if self.subdivisions.enabled {
                subdivision_count(grid, self.subdivisions.minimum_spacing, fixed, is_key)
                    .map(|parts| {
                        subdivision_offsets(grid, length, parts)
                            .into_iter()
                            .map(&to_point)
                            .collect()
                    })
                    .unwrap_or_default()
            } else {
                Vec::new()
            };

            match orientation {
                Orientation::Horizontal => {
                    out.horizontal = major;
                    out.horizontal_subdivisions = minor;
                }
                Orientation::Vertical => {
                    out.vertical = major;
                    out.vertical_subdivisions = minor;
                }
            }
        }
        out
    }

    fn key_orientation(&self) -> Orientation {
        if self.flip {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    fn holds_keys(&self, orientation: Orientation) -> bool {
        orientation == self.key_orientation()
    }

    fn length(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.grid.width(),
            Orientation::Vertical => self.grid.height(),
        }
    }

    fn canvas_coord(&self, orientation: Orientation, offset: f64) -> f64 {
        match orientation {
            Orientation::Horizontal => self.grid.x0 + offset,
            Orientation::Vertical => self.grid.y1 - offset,
        }
    }
}

/// A chart's grid layout, computed once and cached.
///
/// [`calc_axes`](Self::calc_axes) is idempotent: later calls return the axes from
/// the first successful call, whatever data they are given.
#[derive(Clone, Debug)]
pub struct GridLayout {
    options: GridOptions,
    axes: OnceCell<GridAxes>,
}

impl GridLayout {
    /// Creates a layout with the given options.
    pub fn new(options: GridOptions) -> Self {
        Self {
            options,
            axes: OnceCell::new(),
        }
    }

    /// Returns the layout options.
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Returns the axes if they have been computed.
    pub fn axes(&self) -> Option<&GridAxes> {
        self.axes.get()
    }

    /// Computes the axes on first call and returns the cached result afterwards.
    pub fn calc_axes(
        &self,
        data: &MultiSeriesIndex,
        measurer: &dyn TextMeasurer,
        mode: CalcMode,
    ) -> Result<&GridAxes> {
        if let Some(axes) = self.axes.get() {
            return Ok(axes);
        }
        let axes = GridAxes::compute(&self.options, data, measurer, mode)?;
        Ok(self.axes.get_or_init(|| axes))
    }
}

fn check_room(rect: &Rect) -> Result<()> {
    if rect.width() > 0.0 && rect.height() > 0.0 {
        Ok(())
    } else {
        Err(GridError::NoRoom {
            width: rect.width(),
            height: rect.height(),
        })
    }
}

/// Rejects explicit bounds that are inverted or leave no data visible.
fn validate_overrides(options: &GridOptions, keys: &KeyDomain, values: &ValueDomain) -> Result<()> {
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let o = options.overrides(orientation);
        if matches!((o.min, o.max), (Some(min), Some(max)) if max <= min) {
            return Err(InvalidAxisReason::Inverted { orientation }.into());
        }
        let holds_keys = (orientation == Orientation::Horizontal) != options.flip_axes;
        let (lo, hi) = if holds_keys {
            (keys.min, keys.max + 1.0)
        } else {
            (values.min, values.max)
        };
        let below = o.max.is_some_and(|max| max < lo);
        let above = o.min.is_some_and(|min| min >= hi);
        if below || above {
            return Err(InvalidAxisReason::NoValuesInRange { orientation }.into());
        }
    }
    Ok(())
}

/// Padding grown by room for the axis labels.
///
/// The vertical axis labels sit left of the grid, so the left padding grows by
/// the widest label plus one glyph. Horizontal labels take one line below.
fn label_padding(
    options: &GridOptions,
    data: &MultiSeriesIndex,
    keys: &KeyDomain,
    values: &ValueDomain,
    measurer: &dyn TextMeasurer,
) -> Padding {
    let mut padding = options.padding;
    let font = options.labels.font_size;
    let width = |text: &str| measurer.measure(text, font).0;

    if options.labels.show_vertical {
        padding.left += if options.flip_axes && data.is_ordinal() {
            data.keys()
                .iter()
                .map(|k| width(&k.to_label()))
                .fold(0.0, f64::max)
        } else {
            let (a, b) = if options.flip_axes {
                (keys.min, keys.max)
            } else {
                (values.min, values.max)
            };
            let widest = width(&Key::Number(a).to_label()).max(width(&Key::Number(b).to_label()));
            widest + width("0")
        };
    }
    if options.labels.show_horizontal {
        padding.bottom += measurer.measure("0", font).1;
    }
    padding
}
