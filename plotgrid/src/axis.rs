// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis sizing: turns a value range and a pixel length into a "nice" grid.
//!
//! An [`Axis`] searches for a division of its range into a whole number of grid
//! steps such that:
//! - each step is a human-friendly number (whole, or a single digit with one decimal),
//! - adjacent grid lines are at least `min_spacing` pixels apart,
//! - the zero line lands exactly on a grid line when the range straddles zero.
//!
//! The search is bounded. Ranges that cannot be tiled evenly (large primes, odd
//! unit constraints) fall back to coarsening the grid and flag the result as
//! [`AxisGrid::uneven`], which tells grid drawing to add one irregular final line.

use core::cell::OnceCell;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::{GridError, Result};
use crate::fixed_axis::FixedAxis;

/// Maximum number of division-search passes before the uneven fallback runs.
const SEARCH_GUARD: u32 = 20;

/// Tolerance used when deciding whether a float is a whole number.
const WHOLE_EPSILON: f64 = 1e-9;

/// Immutable input to one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSpec {
    /// Axis length in pixels.
    pub length: f64,
    /// Largest value the axis must show.
    pub max: f64,
    /// Smallest value the axis must show.
    pub min: f64,
    /// Smallest allowed grid step in data units (`0` for none).
    ///
    /// Key axes use `1` so grid lines land on whole key positions.
    pub min_unit: f64,
    /// Divide the range itself rather than rounding both ends out to the magnitude.
    pub fit_to_length: bool,
}

impl AxisSpec {
    /// Creates an axis spec with no minimum unit and rounded ends.
    pub fn new(length: f64, max: f64, min: f64) -> Self {
        Self {
            length,
            max,
            min,
            min_unit: 0.0,
            fit_to_length: false,
        }
    }

    /// Sets the minimum grid step in data units.
    pub fn with_min_unit(mut self, min_unit: f64) -> Self {
        self.min_unit = min_unit.max(0.0);
        self
    }

    /// Enables or disables fit-to-length division.
    pub fn with_fit_to_length(mut self, fit: bool) -> Self {
        self.fit_to_length = fit;
        self
    }

    fn validate(&self) -> Result<()> {
        let finite = self.max.is_finite()
            && self.min.is_finite()
            && (self.max - self.min).is_finite()
            && self.length.is_finite();
        if !finite || (self.max <= self.min && self.min_unit == 0.0) {
            return Err(GridError::Domain {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// The computed grid for one axis.
///
/// Invariants:
/// - `unit * step * count == length` (up to float rounding),
/// - `zero` lies within `[0, length]` whenever the range contains zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGrid {
    /// Pixel distance between adjacent major grid lines.
    pub spacing: f64,
    /// Data distance between adjacent major grid lines.
    pub step: f64,
    /// Number of grid divisions along the axis (may be fractional for uneven axes).
    pub count: f64,
    /// Pixel offset of the value `0` from the start of the axis.
    pub zero: f64,
    /// Pixels per data unit.
    pub unit: f64,
    /// Whether the bounded search gave up and the last division is irregular.
    pub uneven: bool,
}

impl AxisGrid {
    /// Pixel offset of `value` from the start of the axis.
    pub fn offset_of(&self, value: f64) -> f64 {
        self.zero + value * self.unit
    }

    /// Data value at pixel offset `offset` from the start of the axis.
    pub fn value_at(&self, offset: f64) -> f64 {
        if self.unit == 0.0 {
            return 0.0;
        }
        (offset - self.zero) / self.unit
    }

    /// Axis length covered by the divisions, in pixels.
    pub fn length(&self) -> f64 {
        self.spacing * self.count
    }
}

/// Search state threaded through the division passes.
#[derive(Clone, Copy, Debug)]
struct Division {
    count: f64,
    neg_count: f64,
    magnitude: f64,
}

/// A nice-number axis.
///
/// `grid` is pure: calling it twice with the same arguments yields the same result.
/// [`Axis::unit`], [`Axis::zero`] and [`Axis::uneven`] read a lazily computed
/// `grid(1.0, false)`.
#[derive(Clone, Debug)]
pub struct Axis {
    spec: AxisSpec,
    default_grid: OnceCell<AxisGrid>,
}

impl Axis {
    /// Creates an axis, rejecting degenerate ranges.
    ///
    /// Fails with [`GridError::Domain`] if `max <= min` and there is no minimum unit.
    pub fn new(spec: AxisSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            default_grid: OnceCell::new(),
        })
    }

    /// Returns the axis input.
    pub fn spec(&self) -> &AxisSpec {
        &self.spec
    }

    /// Computes the grid for a minimum pixel spacing.
    ///
    /// With `round_up`, the maximum is extended by one minimum unit so that the
    /// last key slot of a bar chart gets its own division.
    pub fn grid(&self, min_spacing: f64, round_up: bool) -> AxisGrid {
        let AxisSpec {
            length,
            min,
            min_unit,
            fit_to_length,
            ..
        } = self.spec;
        let max = if round_up {
            self.spec.max + min_unit
        } else {
            self.spec.max
        };
        let negative = min < 0.0;
        let min_sub = min_spacing.max(length / 200.0);
        let scale = max - min;

        let mut magnitude = floor_power_of_ten(scale).max(min_unit);
        let mut count = if fit_to_length {
            ceil_snapped(scale / magnitude)
        } else {
            ceil_snapped(max / magnitude) - floor_snapped(min / magnitude)
        };
        if count <= 5.0 && magnitude > min_unit {
            magnitude *= 0.1;
            // Rounded-ends count even when fitting to length.
            count = ceil_snapped(max / magnitude) - floor_snapped(min / magnitude);
        }

        let mut div = Division {
            count: count.max(1.0),
            neg_count: if negative {
                ceil_snapped(-min / magnitude)
            } else {
                0.0
            },
            magnitude,
        };

        self.find_division(min_sub, &mut div);
        let mut spacing = length / div.count;
        let mut uneven = false;

        let mut guard = SEARCH_GUARD;
        while spacing < min_spacing {
            guard -= 1;
            if guard == 0 {
                break;
            }
            self.find_division(min_sub, &mut div);
            spacing = length / div.count;
        }

        if guard == 0 {
            tracing::warn!(
                length,
                min,
                max,
                count = div.count,
                "no even grid division found, coarsening"
            );
            while spacing < min_spacing && div.count > 1.0 {
                div.count *= 0.5;
                div.neg_count *= 0.5;
                div.magnitude *= 2.0;
                spacing = length / div.count;
                uneven = true;
            }
        } else if !fit_to_length && div.magnitude > min_unit && spacing / min_spacing > 2.0 {
            // Still coarse; split every division once.
            div.magnitude *= 0.5;
            div.count *= 2.0;
            div.neg_count *= 2.0;
            spacing = length / div.count;
        }

        let unit = length / (div.magnitude * div.count);
        let zero = if negative {
            div.neg_count * spacing
        } else {
            -min * spacing / div.magnitude
        };

        AxisGrid {
            spacing,
            step: div.magnitude,
            count: div.count,
            zero,
            unit,
            uneven,
        }
    }

    /// Pixels per data unit for the default grid.
    pub fn unit(&self) -> f64 {
        self.default_grid().unit
    }

    /// Pixel offset of zero for the default grid.
    pub fn zero(&self) -> f64 {
        self.default_grid().zero
    }

    /// Whether the default grid needed the uneven fallback.
    pub fn uneven(&self) -> bool {
        self.default_grid().uneven
    }

    fn default_grid(&self) -> &AxisGrid {
        self.default_grid.get_or_init(|| self.grid(1.0, false))
    }

    /// Whether `m` is an acceptable multiplier for the current magnitude.
    fn is_nice(&self, m: f64) -> bool {
        let min_unit = self.spec.min_unit;
        if min_unit > 0.0 && !is_whole(m / min_unit) {
            return false;
        }
        is_whole(m) || (m >= 0.0 && m < 10.0 && is_whole(m * 10.0))
    }

    /// One pass of the division search.
    ///
    /// Looks for the largest `c < count` that merges divisions into a nice
    /// multiple of the magnitude while keeping `length / c >= min_spacing` and the
    /// zero line on a division boundary. If none exists, grows the count by one
    /// and nudges the negative share so the next pass has a different shape.
    fn find_division(&self, min_spacing: f64, div: &mut Division) {
        let length = self.spec.length;
        if !div.count.is_finite() || length / div.count >= min_spacing {
            return;
        }

        let count = div.count;
        let mut c = count - 1.0;
        let mut inc = 0.0;
        while c > 1.0 {
            let m = (count + inc) / c;
            let below = if div.neg_count != 0.0 {
                c * div.neg_count / count
            } else {
                1.0
            };
            if self.is_nice(m) {
                if length / c >= min_spacing && is_whole(below) {
                    tracing::trace!(from = count, to = c, multiplier = m, "grid division found");
                    div.magnitude *= m;
                    div.neg_count *= c / count;
                    div.count = c;
                    return;
                }
                c -= 1.0;
                inc = 0.0;
            } else if !self.spec.fit_to_length && is_odd(count) && inc == 0.0 {
                inc = 1.0;
            } else {
                c -= 1.0;
                inc = 0.0;
            }
        }

        // Balance the positive and negative sides a bit before the next pass.
        if div.neg_count != 0.0 {
            let next = count + 1.0;
            let positive = count - div.neg_count;
            if positive > div.neg_count && (div.neg_count == 1.0 || next % div.neg_count != 0.0) {
                div.neg_count += 1.0;
            }
            div.count += 1.0;
        }
    }
}

/// Either kind of axis the grid layout can build for one dimension.
#[derive(Clone, Debug)]
pub enum LayoutAxis {
    /// Nice-number search.
    Nice(Axis),
    /// Caller-fixed step.
    Fixed(FixedAxis),
}

impl From<Axis> for LayoutAxis {
    fn from(value: Axis) -> Self {
        Self::Nice(value)
    }
}

impl From<FixedAxis> for LayoutAxis {
    fn from(value: FixedAxis) -> Self {
        Self::Fixed(value)
    }
}

impl LayoutAxis {
    /// Computes the grid for a minimum pixel spacing.
    pub fn grid(&self, min_spacing: f64, round_up: bool) -> AxisGrid {
        match self {
            Self::Nice(a) => a.grid(min_spacing, round_up),
            Self::Fixed(a) => a.grid(min_spacing, round_up),
        }
    }

    /// Returns the axis input.
    pub fn spec(&self) -> &AxisSpec {
        match self {
            Self::Nice(a) => a.spec(),
            Self::Fixed(a) => a.spec(),
        }
    }
}

/// Largest power of ten not above `x` (`0` for non-positive input).
fn floor_power_of_ten(x: f64) -> f64 {
    if !x.is_finite() || x <= 0.0 {
        return 0.0;
    }
    let e = x.log10().floor().clamp(-307.0, 308.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the normal f64 exponents")]
    let e = e as i32;
    10_f64.powi(e)
}

/// Snaps values within rounding noise of a whole number onto it.
fn snap(x: f64) -> f64 {
    let r = x.round();
    if (x - r).abs() <= WHOLE_EPSILON * r.abs().max(1.0) {
        r
    } else {
        x
    }
}

pub(crate) fn ceil_snapped(x: f64) -> f64 {
    snap(x).ceil()
}

pub(crate) fn floor_snapped(x: f64) -> f64 {
    snap(x).floor()
}

pub(crate) fn is_whole(x: f64) -> bool {
    x.is_finite() && (x - x.round()).abs() <= WHOLE_EPSILON * x.abs().max(1.0)
}

fn is_odd(x: f64) -> bool {
    is_whole(x) && (x.round() % 2.0).abs() == 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn degenerate_axis_is_a_domain_error() {
        let err = Axis::new(AxisSpec::new(100.0, 5.0, 5.0)).unwrap_err();
        assert_eq!(err, GridError::Domain { min: 5.0, max: 5.0 });
        assert!(Axis::new(AxisSpec::new(100.0, 0.0, 3.0)).is_err());
    }

    #[test]
    fn overflowing_span_is_a_domain_error() {
        let err = Axis::new(AxisSpec::new(300.0, f64::MAX, -f64::MAX)).unwrap_err();
        assert_eq!(
            err,
            GridError::Domain {
                min: -f64::MAX,
                max: f64::MAX
            }
        );
    }

    #[test]
    fn huge_finite_span_gets_a_grid() {
        let axis = Axis::new(AxisSpec::new(300.0, 1e307, -1e307)).unwrap();
        let g = axis.grid(15.0, false);
        assert!(g.step.is_finite() && g.step > 0.0, "step {}", g.step);
        assert!(g.count.is_finite(), "count {}", g.count);
        assert!(g.spacing >= 15.0, "spacing {}", g.spacing);
        assert!(g.zero >= 0.0 && g.zero <= 300.0, "zero {}", g.zero);
    }

    #[test]
    fn zero_span_is_allowed_with_a_minimum_unit() {
        let axis = Axis::new(AxisSpec::new(100.0, 0.0, 0.0).with_min_unit(1.0)).unwrap();
        let g = axis.grid(15.0, true);
        assert!(g.step >= 1.0, "step {}", g.step);
        assert!(approx(g.unit * g.step * g.count, 100.0));
    }

    #[test]
    fn ninety_seven_over_three_hundred_pixels_uses_a_round_step() {
        let axis = Axis::new(AxisSpec::new(300.0, 97.0, 0.0)).unwrap();
        let g = axis.grid(15.0, false);
        assert!(
            [10.0, 20.0, 25.0, 50.0].iter().any(|s| approx(*s, g.step)),
            "awkward step {}",
            g.step
        );
        assert!(g.spacing >= 15.0);
        assert!(!g.uneven);
        assert!(approx(g.zero, 0.0));
        assert!(g.step * g.count >= 97.0);
    }

    #[test]
    fn grid_is_idempotent() {
        let axis = Axis::new(AxisSpec::new(280.0, 43.0, -17.0)).unwrap();
        let a = axis.grid(20.0, false);
        let b = axis.grid(20.0, false);
        assert_eq!(a, b);
    }

    #[test]
    fn negative_range_puts_zero_on_a_grid_line() {
        let axis = Axis::new(AxisSpec::new(200.0, 30.0, -10.0)).unwrap();
        let g = axis.grid(15.0, false);
        assert!(g.zero > 0.0 && g.zero <= 200.0, "zero {}", g.zero);
        let lines_below = g.zero / g.spacing;
        assert!(is_whole(lines_below), "zero between lines: {lines_below}");
        // -10 must still be on the axis.
        assert!(g.offset_of(-10.0) >= -1e-9);
        assert!(g.offset_of(30.0) <= 200.0 + 1e-9);
    }

    #[test]
    fn positive_minimum_shifts_zero_below_the_axis() {
        let axis = Axis::new(AxisSpec::new(100.0, 50.0, 10.0)).unwrap();
        let g = axis.grid(10.0, false);
        assert!(g.zero < 0.0);
        assert!(approx(g.offset_of(10.0), 0.0));
    }

    #[test]
    fn cramped_axis_takes_the_uneven_fallback() {
        // 13 keys in 40px at a 15px minimum spacing cannot be tiled by a nice step.
        let axis = Axis::new(
            AxisSpec::new(40.0, 13.0, 0.0)
                .with_min_unit(1.0)
                .with_fit_to_length(true),
        )
        .unwrap();
        let g = axis.grid(15.0, false);
        assert!(g.uneven);
        assert!(approx(g.step, 8.0), "step {}", g.step);
        assert!(approx(g.count, 1.625), "count {}", g.count);
        assert!(g.spacing >= 15.0);
        assert!(approx(g.unit * g.step * g.count, 40.0));
    }

    #[test]
    fn key_axis_in_bar_mode_gives_each_key_a_slot() {
        let axis = Axis::new(
            AxisSpec::new(400.0, 7.0, 0.0)
                .with_min_unit(1.0)
                .with_fit_to_length(true),
        )
        .unwrap();
        let g = axis.grid(15.0, true);
        assert!(approx(g.unit, 50.0), "unit {}", g.unit);
        assert!(approx(g.zero, 0.0));
        assert!(is_whole(g.step));
    }

    #[test]
    fn lazy_accessors_match_a_one_pixel_grid() {
        let axis = Axis::new(AxisSpec::new(150.0, 12.0, -3.0)).unwrap();
        let g = axis.grid(1.0, false);
        assert_eq!(axis.unit(), g.unit);
        assert_eq!(axis.zero(), g.zero);
        assert_eq!(axis.uneven(), g.uneven);
    }

    #[test]
    fn nice_multipliers() {
        let axis = Axis::new(AxisSpec::new(100.0, 10.0, 0.0)).unwrap();
        assert!(axis.is_nice(2.0));
        assert!(axis.is_nice(2.5));
        assert!(axis.is_nice(40.0));
        assert!(!axis.is_nice(4.0 / 3.0));
        assert!(!axis.is_nice(12.5));

        let keys = Axis::new(AxisSpec::new(100.0, 10.0, 0.0).with_min_unit(1.0)).unwrap();
        assert!(!keys.is_nice(2.5));
        assert!(keys.is_nice(3.0));
    }
}
