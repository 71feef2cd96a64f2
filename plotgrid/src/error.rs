// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while sizing axes.
//!
//! Every error here is fatal to a single chart render: the renderer is expected to
//! fall back to an error display. Off-grid lookups are not errors; they return `None`.

use crate::options::Orientation;

/// Errors returned by axis and grid construction.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum GridError {
    /// The axis has no extent (`max <= min`) and no minimum unit to fall back on.
    #[error("zero length axis: max {max} is not above min {min}")]
    Domain {
        /// Lower bound that was requested.
        min: f64,
        /// Upper bound that was requested.
        max: f64,
    },
    /// Caller-specified axis bounds are unusable.
    #[error("invalid axis: {0}")]
    InvalidAxis(InvalidAxisReason),
    /// The data model has no finite values to size an axis from.
    #[error("no values to plot")]
    NoData,
    /// Padding and depth leave no room for the grid.
    #[error("no room for the grid: {width} x {height} pixels")]
    NoRoom {
        /// Usable grid width.
        width: f64,
        /// Usable grid height.
        height: f64,
    },
    /// A fixed grid step that is zero, negative or not finite.
    #[error("invalid fixed grid step {step}")]
    InvalidStep {
        /// The rejected step.
        step: f64,
    },
}

/// Why explicit axis bounds were rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidAxisReason {
    /// The explicit maximum is not above the explicit minimum.
    #[error("{orientation} axis maximum is not above its minimum")]
    Inverted {
        /// Which axis carried the bounds.
        orientation: Orientation,
    },
    /// The explicit bounds exclude every observed value.
    #[error("no values in {orientation} grid range")]
    NoValuesInRange {
        /// Which axis carried the bounds.
        orientation: Orientation,
    },
}

impl From<InvalidAxisReason> for GridError {
    fn from(reason: InvalidAxisReason) -> Self {
        Self::InvalidAxis(reason)
    }
}

/// Result alias for grid operations.
pub type Result<T, E = GridError> = core::result::Result<T, E>;
