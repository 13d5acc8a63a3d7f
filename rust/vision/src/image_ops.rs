// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image decoding and binarization for drawing recognition

use crate::types::VisionConfig;
use drawscan_core::{Error, Result};
use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;

/// Decode image bytes (PNG, JPEG, ...) into an RGB image
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgb8())
        .map_err(|e| Error::ImageLoad(e.to_string()))
}

/// Convert an RGB image to intensity using ITU-R BT.601 weights
pub fn rgb_to_grayscale(rgb: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(rgb.width(), rgb.height());

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let r = pixel.0[0] as f32;
        let g = pixel.0[1] as f32;
        let b = pixel.0[2] as f32;
        let luma = (0.299 * r + 0.587 * g + 0.114 * b).round().min(255.0) as u8;
        gray.put_pixel(x, y, Luma([luma]));
    }

    gray
}

/// Inverted binary threshold: pixels at or below `level` become white (ink), the rest black
pub fn threshold_inverted(image: &GrayImage, level: u8) -> GrayImage {
    let mut result = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if pixel.0[0] <= level { 255 } else { 0 };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}

/// Dilate with a 3x3 square element, `iterations` times
pub fn dilate(image: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return image.clone();
    }
    imageproc::morphology::dilate(image, Norm::LInf, iterations)
}

/// Erode with a 3x3 square element, `iterations` times
pub fn erode(image: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return image.clone();
    }
    imageproc::morphology::erode(image, Norm::LInf, iterations)
}

/// Morphological closing (dilate then erode), fills small gaps in strokes
pub fn morphological_close(image: &GrayImage, iterations: u8) -> GrayImage {
    let dilated = dilate(image, iterations);
    erode(&dilated, iterations)
}

/// Morphological opening (erode then dilate), removes isolated specks
pub fn morphological_open(image: &GrayImage, iterations: u8) -> GrayImage {
    let eroded = erode(image, iterations);
    dilate(&eroded, iterations)
}

/// Apply Canny edge detection
pub fn canny_edges(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    imageproc::edges::canny(image, low_threshold, high_threshold)
}

/// Binary ink mask used for outline extraction
///
/// Thresholds the intensity image, closes stroke gaps, then removes specks.
pub fn preprocess(gray: &GrayImage, config: &VisionConfig) -> GrayImage {
    let binary = threshold_inverted(gray, config.binary_threshold);
    let closed = morphological_close(&binary, config.close_iterations);
    morphological_open(&closed, config.open_iterations)
}
