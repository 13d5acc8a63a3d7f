// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types shared by the raster and vector analysis paths

use crate::bounds::Bounds;
use crate::floor::floor_color;
use crate::ids::stable_id;
use serde::{Deserialize, Serialize};

/// Smallest architecturally plausible dimension value in millimeters
pub const MIN_DIMENSION_MM: u32 = 100;
/// Largest architecturally plausible dimension value in millimeters
pub const MAX_DIMENSION_MM: u32 = 30_000;
/// Entrance width used when it is not derived from geometry
pub const DEFAULT_ENTRANCE_WIDTH_MM: u32 = 900;

/// A 2D point in pixel units (raster path) or drawing units (vector path)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Simplified building boundary for one floor
///
/// Stored open: the closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outline {
    pub vertices: Vec<Point2D>,
    pub floor: u32,
    pub color: String,
}

impl Outline {
    /// Build an outline tagged with `floor` and its palette color.
    /// Returns `None` for fewer than three vertices.
    pub fn new(vertices: Vec<Point2D>, floor: u32) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        Some(Self {
            vertices,
            floor,
            color: floor_color(floor).to_string(),
        })
    }

    /// Enclosed area using the shoelace formula
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }
}

/// Polygon area using the shoelace formula
pub fn polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }

    (area / 2.0).abs()
}

/// Entrance classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EntranceKind {
    MainEntrance,
    BackDoor,
    Other,
}

/// Detected door or entrance marker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entrance {
    pub id: String,
    pub position: Point2D,
    #[serde(rename = "type")]
    pub kind: EntranceKind,
    /// Opening width in millimeters
    pub width: u32,
    pub label: String,
}

impl Entrance {
    /// Build the `index`-th entrance of a result list
    pub fn new(
        index: usize,
        position: Point2D,
        kind: EntranceKind,
        width: u32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: stable_id("entrance", index, &[position.x, position.y]),
            position,
            kind,
            width,
            label: label.into(),
        }
    }
}

/// Measurement label with an approximate segment
///
/// On the raster path the segment is a labeled-position proxy synthesized
/// around the text box, not a measured line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionLine {
    pub id: String,
    pub start: Point2D,
    pub end: Point2D,
    /// Value in millimeters, always within [`MIN_DIMENSION_MM`, `MAX_DIMENSION_MM`]
    pub value: u32,
    pub label: String,
}

impl DimensionLine {
    /// Build the `index`-th dimension of a result list.
    /// Returns `None` when `value` lies outside the plausible range.
    pub fn new(index: usize, start: Point2D, end: Point2D, value: u32) -> Option<Self> {
        if !Self::is_plausible(value) {
            return None;
        }
        Some(Self {
            id: stable_id(
                "dimension",
                index,
                &[start.x, start.y, end.x, end.y, value as f64],
            ),
            start,
            end,
            value,
            label: format!("{}mm", format_millimeters(value)),
        })
    }

    #[inline]
    pub fn is_plausible(value: u32) -> bool {
        (MIN_DIMENSION_MM..=MAX_DIMENSION_MM).contains(&value)
    }
}

/// Format an integer with comma thousands separators (`3640` -> `3,640`)
pub fn format_millimeters(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fold full-width digits and separators (U+FF10..=U+FF19, `，`, `．`) to ASCII
///
/// OCR of Japanese drawings often yields `３，６４０` for `3,640`. Other
/// characters pass through unchanged.
pub fn fold_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{FF10}'..='\u{FF19}' => char::from(b'0' + (c as u32 - 0xFF10) as u8),
            '\u{FF0C}' => ',',
            '\u{FF0E}' => '.',
            other => other,
        })
        .collect()
}

/// Output of every analysis path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub outlines: Vec<Outline>,
    pub entrances: Vec<Entrance>,
    pub dimensions: Vec<DimensionLine>,
    /// Pixels per millimeter on the raster path, 1.0 (drawing units) on the vector path
    pub scale: f64,
    pub bounds: Bounds,
}

impl AnalysisResult {
    /// Assemble a result, deriving bounds from the outlines
    pub fn new(
        outlines: Vec<Outline>,
        entrances: Vec<Entrance>,
        dimensions: Vec<DimensionLine>,
        scale: f64,
    ) -> Self {
        let bounds = Bounds::from_outlines(&outlines);
        Self {
            outlines,
            entrances,
            dimensions,
            scale,
            bounds,
        }
    }

    /// A result with nothing detected
    pub fn empty(scale: f64) -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), scale)
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty() && self.entrances.is_empty() && self.dimensions.is_empty()
    }
}
