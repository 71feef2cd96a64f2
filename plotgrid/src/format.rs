// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const MAX_DECIMALS: usize = 10;

/// Returns the number of decimal places needed to print multiples of `step` exactly.
pub(crate) fn decimals_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let mut scale = 1.0_f64;
    for d in 0..MAX_DECIMALS {
        let scaled = step * scale;
        if (scaled - scaled.round()).abs() <= 1e-6 * scaled.max(1.0) {
            return d;
        }
        scale *= 10.0;
    }
    MAX_DECIMALS
}

/// Formats a tick value so that consecutive ticks `step` apart read cleanly.
///
/// Whole numbers get thousands separators (`12,500`); fractional steps print just
/// enough decimals for the step (`0.25`, `1.5`). Negative zero prints as `0`.
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return alloc::format!("{value}");
    }
    let decimals = decimals_for_step(step);
    let mut text = alloc::format!("{value:.decimals$}");
    if text.starts_with('-') && text[1..].bytes().all(|b| b == b'0' || b == b'.') {
        text.remove(0);
    }
    group_thousands(&text)
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(dot) => rest.split_at(dot),
        None => (rest, ""),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac_part);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_get_thousands_separators() {
        assert_eq!(format_tick_with_step(12_500.0, 500.0), "12,500");
        assert_eq!(format_tick_with_step(-1_000_000.0, 1.0), "-1,000,000");
        assert_eq!(format_tick_with_step(100.0, 10.0), "100");
    }

    #[test]
    fn fractional_steps_keep_needed_decimals() {
        assert_eq!(format_tick_with_step(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick_with_step(2.5, 0.25), "2.50");
        assert_eq!(format_tick_with_step(1500.5, 0.5), "1,500.5");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_tick_with_step(-0.000_000_1, 1.0), "0");
        assert_eq!(format_tick_with_step(-0.0, 0.5), "0.0");
    }

    #[test]
    fn decimals_follow_the_step() {
        assert_eq!(decimals_for_step(20.0), 0);
        assert_eq!(decimals_for_step(0.5), 1);
        assert_eq!(decimals_for_step(0.025), 3);
    }
}
