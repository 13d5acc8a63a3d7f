// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration and intermediate types for raster drawing analysis

use drawscan_core::{Error, Point2D, Result};
use serde::{Deserialize, Serialize};

/// Circle found by the door-arc detector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DetectedCircle {
    /// Center in pixels (integer grid)
    pub center: Point2D,
    /// Radius in pixels (integer)
    pub radius: f64,
    /// Accumulator votes at the center
    pub votes: u32,
}

/// Configuration for the raster analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisionConfig {
    /// Intensity at or below which a pixel counts as ink
    pub binary_threshold: u8,
    /// 3x3 closing iterations applied after thresholding
    pub close_iterations: u8,
    /// 3x3 opening iterations applied after closing
    pub open_iterations: u8,
    /// Minimum enclosed contour area (square pixels)
    pub min_contour_area: f64,
    /// Maximum number of outlines kept, largest first
    pub max_outlines: usize,
    /// Simplification tolerance as a fraction of contour perimeter
    pub simplify_tolerance: f64,
    /// Text fragments that mark an entrance (case-insensitive)
    pub entrance_keywords: Vec<String>,
    /// Fragments that turn a matched entrance into a back door (case-insensitive)
    pub back_door_keywords: Vec<String>,
    /// Canny edge detection low threshold
    pub canny_low: f32,
    /// Canny edge detection high threshold
    pub canny_high: f32,
    /// Smallest door swing radius in pixels
    pub min_door_radius: u32,
    /// Largest door swing radius in pixels
    pub max_door_radius: u32,
    /// Minimum distance between detected door swing centers
    pub min_door_distance: f64,
    /// Accumulator votes a door swing center needs
    pub door_vote_threshold: u32,
    /// Maximum number of door swings reported
    pub max_door_arcs: usize,
    /// Horizontal extension of synthesized dimension segments on each side of the label
    pub dimension_padding: f64,
    /// Tesseract languages, e.g. `jpn+eng`
    pub tesseract_language: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            binary_threshold: 200,
            close_iterations: 2,
            open_iterations: 1,
            min_contour_area: 5000.0,
            max_outlines: 3,
            simplify_tolerance: 0.01,
            entrance_keywords: ["玄関", "勝手口", "入口", "出入口", "ENTRANCE", "DOOR"]
                .into_iter()
                .map(String::from)
                .collect(),
            back_door_keywords: vec!["勝手口".into(), "back".into()],
            canny_low: 50.0,
            canny_high: 150.0,
            min_door_radius: 20,
            max_door_radius: 100,
            min_door_distance: 50.0,
            door_vote_threshold: 30,
            max_door_arcs: 5,
            dimension_padding: 50.0,
            tesseract_language: "jpn+eng".into(),
        }
    }
}

impl VisionConfig {
    /// Parse a (possibly partial) JSON configuration; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_door_radius == 0 || self.min_door_radius > self.max_door_radius {
            return Err(Error::Config(format!(
                "door radius range {}..={} is empty",
                self.min_door_radius, self.max_door_radius
            )));
        }
        if self.canny_low > self.canny_high {
            return Err(Error::Config(format!(
                "canny_low ({}) exceeds canny_high ({})",
                self.canny_low, self.canny_high
            )));
        }
        if self.max_outlines == 0 {
            return Err(Error::Config("max_outlines must be at least 1".to_string()));
        }
        if !(0.0..).contains(&self.min_contour_area) {
            return Err(Error::Config(format!(
                "min_contour_area {} is negative",
                self.min_contour_area
            )));
        }
        if !(0.0..).contains(&self.dimension_padding) {
            return Err(Error::Config(format!(
                "dimension_padding {} is negative",
                self.dimension_padding
            )));
        }
        if !(0.0..1.0).contains(&self.simplify_tolerance) {
            return Err(Error::Config(format!(
                "simplify_tolerance {} outside [0, 1)",
                self.simplify_tolerance
            )));
        }
        Ok(())
    }
}
