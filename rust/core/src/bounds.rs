// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounds over outline vertices

use crate::types::{Outline, Point2D};
use serde::{Deserialize, Serialize};

/// Bounding box of all outline vertices, in the result's coordinate units
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of a point set; the zero box when there are no points
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        bounds
    }

    /// Bounds over every vertex of every outline
    pub fn from_outlines(outlines: &[Outline]) -> Self {
        Self::from_points(outlines.iter().flat_map(|o| o.vertices.iter()))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_outline() -> Outline {
        Outline::new(
            vec![
                Point2D::new(50.0, 50.0),
                Point2D::new(750.0, 50.0),
                Point2D::new(750.0, 550.0),
                Point2D::new(50.0, 550.0),
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_outlines_zero_box() {
        assert_eq!(Bounds::from_outlines(&[]), Bounds::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_rectangle_bounds() {
        let bounds = Bounds::from_outlines(&[rect_outline()]);
        assert_eq!(bounds, Bounds::new(50.0, 50.0, 750.0, 550.0));
        assert_eq!(bounds.width(), 700.0);
        assert_eq!(bounds.height(), 500.0);
    }

    #[test]
    fn test_bounds_span_multiple_outlines() {
        let second = Outline::new(
            vec![
                Point2D::new(-10.0, 600.0),
                Point2D::new(20.0, 600.0),
                Point2D::new(20.0, 900.0),
            ],
            2,
        )
        .unwrap();
        let bounds = Bounds::from_outlines(&[rect_outline(), second]);
        assert_eq!(bounds, Bounds::new(-10.0, 50.0, 750.0, 900.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&Bounds::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json, r#"{"minX":1.0,"minY":2.0,"maxX":3.0,"maxY":4.0}"#);
    }
}
