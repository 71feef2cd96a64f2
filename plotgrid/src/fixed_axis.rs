// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis with a caller-supplied grid step.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::{AxisGrid, AxisSpec, ceil_snapped, floor_snapped};
use crate::error::{GridError, Result};

/// An axis whose grid step is fixed by the caller.
///
/// No niceness search runs: the range is widened outward until both ends sit on
/// multiples of the step, and every division is exactly one step.
#[derive(Clone, Debug)]
pub struct FixedAxis {
    spec: AxisSpec,
    step: f64,
}

impl FixedAxis {
    /// Creates a fixed-step axis.
    ///
    /// Fails with [`GridError::Domain`] for an empty range and
    /// [`GridError::InvalidStep`] for a step that is not a positive finite number.
    pub fn new(length: f64, max: f64, min: f64, step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(GridError::InvalidStep { step });
        }
        let spec = AxisSpec::new(length, max, min);
        if !max.is_finite() || !min.is_finite() || max <= min {
            return Err(GridError::Domain { min, max });
        }
        Ok(Self { spec, step })
    }

    /// Returns the axis input (before widening).
    pub fn spec(&self) -> &AxisSpec {
        &self.spec
    }

    /// Returns the grid step in data units.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the widened `(min, max)` the grid is laid out over.
    ///
    /// When both bounds share a sign, the bound nearer zero anchors the range and
    /// the farther one is pushed out by whole steps. Otherwise each bound is pushed
    /// out to its own multiple of the step. Either way both ends are multiples of
    /// the step.
    pub fn bounds(&self) -> (f64, f64) {
        let AxisSpec { max, min, .. } = self.spec;
        let step = self.step;
        if max * min > 0.0 {
            if max.abs() > min.abs() {
                let lo = floor_snapped(min / step) * step;
                let hi = lo + step * ceil_snapped((max - lo) / step);
                (lo, hi)
            } else {
                let hi = ceil_snapped(max / step) * step;
                let lo = hi - step * ceil_snapped((hi - min) / step);
                (lo, hi)
            }
        } else {
            (
                floor_snapped(min / step) * step,
                ceil_snapped(max / step) * step,
            )
        }
    }

    /// Computes the grid. The spacing preference and round-up flag do not apply.
    pub fn grid(&self, _min_spacing: f64, _round_up: bool) -> AxisGrid {
        let length = self.spec.length;
        let (lo, hi) = self.bounds();
        let span = hi - lo;
        let count = (span / self.step).round().max(1.0);
        let spacing = length / count;
        AxisGrid {
            spacing,
            step: self.step,
            count,
            zero: (-lo / self.step) * spacing,
            unit: length / span,
            uneven: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_multiple(v: f64, step: f64) -> bool {
        let q = v / step;
        (q - q.round()).abs() < 1e-9
    }

    #[test]
    fn straddling_range_widens_both_ends() {
        let axis = FixedAxis::new(200.0, 23.0, -7.0, 5.0).unwrap();
        assert_eq!(axis.bounds(), (-10.0, 25.0));
        let g = axis.grid(15.0, false);
        assert!((g.count - 7.0).abs() < 1e-9);
        assert!((g.zero - 2.0 * g.spacing).abs() < 1e-9);
        assert!((g.unit * 35.0 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn positive_range_anchors_the_bound_nearer_zero() {
        let axis = FixedAxis::new(100.0, 17.0, 3.0, 5.0).unwrap();
        let (lo, hi) = axis.bounds();
        assert_eq!((lo, hi), (0.0, 20.0));
        assert!(lo <= 3.0 && hi >= 17.0);
    }

    #[test]
    fn negative_range_anchors_the_bound_nearer_zero() {
        let axis = FixedAxis::new(100.0, -12.0, -31.0, 10.0).unwrap();
        let (lo, hi) = axis.bounds();
        assert_eq!((lo, hi), (-40.0, -10.0));
        let g = axis.grid(1.0, false);
        assert!(g.zero > 100.0, "zero lies past the top of an all-negative axis");
    }

    #[test]
    fn bad_steps_are_rejected() {
        assert_eq!(
            FixedAxis::new(100.0, 10.0, 0.0, 0.0).unwrap_err(),
            GridError::InvalidStep { step: 0.0 }
        );
        assert!(FixedAxis::new(100.0, 10.0, 0.0, f64::NAN).is_err());
        assert!(matches!(
            FixedAxis::new(100.0, 0.0, 10.0, 1.0),
            Err(GridError::Domain { .. })
        ));
    }

    #[test]
    fn fractional_steps_land_on_multiples() {
        let axis = FixedAxis::new(300.0, 1.13, -0.42, 0.25).unwrap();
        let (lo, hi) = axis.bounds();
        assert!(is_multiple(lo, 0.25) && is_multiple(hi, 0.25));
        assert!(lo <= -0.42 && hi >= 1.13);
    }
}
