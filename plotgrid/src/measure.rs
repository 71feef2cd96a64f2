// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for label padding.
//!
//! Shaping and layout stay downstream, so the grid layout accepts a measurer
//! to estimate how much room axis labels need before the axes are sized.

/// A minimal text measurement interface used to reserve label space.
///
/// Callers can plug in a real text measurement backend, or use
/// [`HeuristicTextMeasurer`].
pub trait TextMeasurer {
    /// Returns `(width, height)` in pixels.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A tiny heuristic text measurer for monospace-ish axis labels.
///
/// Each glyph is `glyph_aspect` em wide and one em high.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicTextMeasurer {
    /// Approximate ratio of glyph width to font size.
    pub glyph_aspect: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self { glyph_aspect: 0.6 }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = self.glyph_aspect * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}
