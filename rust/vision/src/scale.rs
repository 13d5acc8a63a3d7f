// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pixel-per-millimeter scale heuristic

use drawscan_core::DimensionLine;

/// Scale assumed when no dimension was read (1:100 drawing printed on A3)
pub const DEFAULT_SCALE: f64 = 0.1;
pub const MIN_SCALE: f64 = 0.01;
pub const MAX_SCALE: f64 = 10.0;

/// Estimate pixels per millimeter from the image size and the largest dimension value
///
/// Assumes the largest labeled dimension spans roughly a tenth of the image
/// diagonal; the estimate is clamped to [`MIN_SCALE`, `MAX_SCALE`].
pub fn estimate_scale(width: u32, height: u32, dimensions: &[DimensionLine]) -> f64 {
    let Some(max_value) = dimensions.iter().map(|d| d.value).max() else {
        return DEFAULT_SCALE;
    };

    let w = width as f64;
    let h = height as f64;
    let diagonal = (w * w + h * h).sqrt();

    (diagonal / (max_value as f64 * 10.0)).clamp(MIN_SCALE, MAX_SCALE)
}
