// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # DrawScan CAD
//!
//! Vector (DXF) ingestion for architectural drawings. Produces the same
//! [`AnalysisResult`] as the raster pipeline, directly from entities:
//!
//! - `LWPOLYLINE` / `POLYLINE` become floor 1 outlines
//! - dimension entities become dimension lines valued from their text
//! - `LINE` endpoints are collected on [`VectorDrawing`] but not emitted
//!
//! Coordinates stay in drawing units, so the reported scale is always 1.0.
//! Entrances are never produced on this path.

#[cfg(feature = "dxf")]
mod reader;

use drawscan_core::{
    fold_digits, AnalysisRequest, AnalysisResult, Capability, DimensionLine, DrawingProducer, Error,
    Outline, Point2D, Result,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Scale reported for vector drawings (drawing units, no conversion)
pub const VECTOR_SCALE: f64 = 1.0;

/// Floor assigned to every vector outline
pub const VECTOR_FLOOR: u32 = 1;

static DIMENSION_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("valid dimension text regex"));

/// Entities recovered from a vector document before assembly into a result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorDrawing {
    /// Start and end point of every `LINE`, in document order
    pub line_vertices: Vec<Point2D>,
    pub outlines: Vec<Outline>,
    pub dimensions: Vec<DimensionLine>,
    /// Entities that looked relevant but could not be used
    pub skipped: usize,
}

impl VectorDrawing {
    /// Add a polyline outline; a repeated closing vertex is dropped.
    /// Polylines with fewer than three distinct vertices are skipped.
    pub fn push_polyline(&mut self, mut vertices: Vec<Point2D>) {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        match Outline::new(vertices, VECTOR_FLOOR) {
            Some(outline) => self.outlines.push(outline),
            None => {
                debug!("skipping polyline with fewer than 3 vertices");
                self.skipped += 1;
            }
        }
    }

    /// Add a dimension valued from its entity text
    pub fn push_dimension(&mut self, start: Point2D, end: Point2D, text: &str) {
        let value = match dimension_text_value(text) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(text, "dimension without numeric text");
                self.skipped += 1;
                return;
            }
            Err(e) => {
                warn!(error = %e, "skipping dimension entity");
                self.skipped += 1;
                return;
            }
        };

        match DimensionLine::new(self.dimensions.len(), start, end, value) {
            Some(line) => self.dimensions.push(line),
            None => {
                debug!(value, "dimension value out of range");
                self.skipped += 1;
            }
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult::new(self.outlines, Vec::new(), self.dimensions, VECTOR_SCALE)
    }
}

/// First integer in a dimension's text override
///
/// Full-width digits count. `Ok(None)` when the text carries no digits
/// (e.g. the `<>` placeholder).
pub fn dimension_text_value(text: &str) -> Result<Option<u32>> {
    let folded = fold_digits(text);
    let Some(found) = DIMENSION_TEXT.find(&folded) else {
        return Ok(None);
    };
    found
        .as_str()
        .parse::<u32>()
        .map(Some)
        .map_err(|e| Error::malformed(text, e.to_string()))
}

/// DXF document adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct DxfAdapter;

impl DxfAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Whether DXF parsing is available in this build
    pub fn probe(&self) -> Result<()> {
        if cfg!(feature = "dxf") {
            Ok(())
        } else {
            Err(Error::unavailable(
                Capability::CadParsing,
                "built without the `dxf` feature",
            ))
        }
    }

    /// Parse a DXF document into its relevant entities
    #[cfg(feature = "dxf")]
    pub fn parse(&self, bytes: &[u8]) -> Result<VectorDrawing> {
        reader::read_drawing(bytes)
    }

    #[cfg(not(feature = "dxf"))]
    pub fn parse(&self, _bytes: &[u8]) -> Result<VectorDrawing> {
        self.probe().map(|_| VectorDrawing::default())
    }
}

impl DrawingProducer for DxfAdapter {
    fn name(&self) -> &'static str {
        "dxf"
    }

    /// The floor in `request` is ignored: vector outlines are always floor 1.
    fn analyze(&self, bytes: &[u8], _request: &AnalysisRequest) -> Result<AnalysisResult> {
        if let Err(e) = self.probe() {
            warn!(error = %e, "vector drawing not analyzed");
            return Ok(AnalysisResult::empty(VECTOR_SCALE));
        }

        let drawing = self.parse(bytes)?;
        debug!(
            lines = drawing.line_vertices.len() / 2,
            outlines = drawing.outlines.len(),
            dimensions = drawing.dimensions.len(),
            skipped = drawing.skipped,
            "vector analysis complete"
        );
        Ok(drawing.into_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(closed: bool) -> Vec<Point2D> {
        let mut pts = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(9100.0, 0.0),
            Point2D::new(9100.0, 7280.0),
            Point2D::new(0.0, 7280.0),
        ];
        if closed {
            pts.push(Point2D::new(0.0, 0.0));
        }
        pts
    }

    #[test]
    fn test_closing_vertex_dropped() {
        let mut drawing = VectorDrawing::default();
        drawing.push_polyline(square(true));
        drawing.push_polyline(square(false));

        assert_eq!(drawing.outlines.len(), 2);
        assert_eq!(drawing.outlines[0], drawing.outlines[1]);
        assert_eq!(drawing.outlines[0].vertices.len(), 4);
    }

    #[test]
    fn test_degenerate_polyline_skipped() {
        let mut drawing = VectorDrawing::default();
        drawing.push_polyline(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 0.0),
        ]);
        assert!(drawing.outlines.is_empty());
        assert_eq!(drawing.skipped, 1);
    }

    #[test]
    fn test_dimension_text_values() {
        assert_eq!(dimension_text_value("3640").unwrap(), Some(3640));
        assert_eq!(dimension_text_value("W 910").unwrap(), Some(910));
        assert_eq!(dimension_text_value("<>").unwrap(), None);
        assert_eq!(dimension_text_value("").unwrap(), None);
        assert!(dimension_text_value("99999999999").is_err());
        assert_eq!(dimension_text_value("２７３０").unwrap(), Some(2730));
        assert!(dimension_text_value("٢٧٣٠").is_err());
    }

    #[test]
    fn test_dimension_range_enforced() {
        let mut drawing = VectorDrawing::default();
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3640.0, 0.0);
        drawing.push_dimension(a, b, "3640");
        drawing.push_dimension(a, b, "50");
        drawing.push_dimension(a, b, "<>");

        assert_eq!(drawing.dimensions.len(), 1);
        assert_eq!(drawing.dimensions[0].label, "3,640mm");
        assert_eq!(drawing.skipped, 2);
    }

    #[test]
    fn test_into_result() {
        let mut drawing = VectorDrawing::default();
        drawing.push_polyline(square(true));

        let result = drawing.into_result();

        assert!(result.entrances.is_empty());
        assert_eq!(result.scale, 1.0);
        assert_eq!(result.outlines[0].floor, 1);
        assert_eq!(result.bounds.max_x, 9100.0);
        assert_eq!(result.bounds.max_y, 7280.0);
    }
}
