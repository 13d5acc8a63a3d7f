// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building outline extraction via external contour finding

use crate::types::VisionConfig;
use drawscan_core::{polygon_area, Outline, Point2D};
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use tracing::debug;

/// Extract up to `config.max_outlines` building outlines from a binary ink mask
///
/// Only outer borders without a parent are considered, so rooms inside the
/// building never compete with its outer wall. Contours are ranked by
/// enclosed area (largest first, ties in discovery order) and simplified
/// with a tolerance proportional to their perimeter.
pub fn extract_outlines(binary: &GrayImage, floor: u32, config: &VisionConfig) -> Vec<Outline> {
    let mut candidates: Vec<(f64, Vec<Point2D>)> = find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            c.points
                .iter()
                .map(|p| Point2D::new(p.x as f64, p.y as f64))
                .collect::<Vec<_>>()
        })
        .map(|points| (polygon_area(&points), points))
        .filter(|(area, _)| *area >= config.min_contour_area)
        .collect();

    // Stable, so equal areas keep discovery order
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
    candidates.truncate(config.max_outlines);

    let outlines: Vec<Outline> = candidates
        .into_iter()
        .filter_map(|(area, contour)| {
            let epsilon = config.simplify_tolerance * closed_perimeter(&contour);
            let simplified = simplify_closed(&contour, epsilon);
            debug!(
                area,
                contour_points = contour.len(),
                vertices = simplified.len(),
                "simplified outline"
            );
            Outline::new(simplified, floor)
        })
        .collect();

    debug!(count = outlines.len(), floor, "extracted outlines");
    outlines
}

/// Arc length of a closed polygon, including the closing edge
pub fn closed_perimeter(points: &[Point2D]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.distance_to(b))
        .sum()
}

/// Douglas-Peucker simplification of a closed polygon
///
/// The ring is split at the vertex farthest from the first vertex and both
/// chains are simplified independently. The result is open (first vertex not
/// repeated).
pub fn simplify_closed(points: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let anchor = points[0];
    let mut split = 0;
    let mut max_dist = 0.0;
    for (i, point) in points.iter().enumerate().skip(1) {
        let dist = point.distance_to(&anchor);
        if dist > max_dist {
            max_dist = dist;
            split = i;
        }
    }

    if split == 0 {
        return vec![anchor];
    }

    let mut closing: Vec<Point2D> = points[split..].to_vec();
    closing.push(anchor);

    let mut result = douglas_peucker(&points[..=split], epsilon);
    let back = douglas_peucker(&closing, epsilon);

    // `back` starts at the split vertex and ends at the anchor, both already present
    result.extend_from_slice(&back[1..back.len() - 1]);
    result
}

/// Douglas-Peucker over an open chain; both endpoints are always kept
fn douglas_peucker(chain: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    if chain.len() < 3 {
        return chain.to_vec();
    }

    let mut keep = vec![false; chain.len()];
    keep[0] = true;
    keep[chain.len() - 1] = true;

    let mut spans = vec![(0, chain.len() - 1)];
    while let Some((lo, hi)) = spans.pop() {
        // First vertex wins on ties
        let mut farthest = (lo, 0.0);
        for i in lo + 1..hi {
            let d = line_distance(chain[i], chain[lo], chain[hi]);
            if d > farthest.1 {
                farthest = (i, d);
            }
        }

        let (i, d) = farthest;
        if i != lo && d > epsilon {
            keep[i] = true;
            spans.push((lo, i));
            spans.push((i, hi));
        }
    }

    chain
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Distance from `p` to the line through `a` and `b` (to `a` if they coincide)
fn line_distance(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let span = a.distance_to(&b);
    if span < 1e-5 {
        return p.distance_to(&a);
    }
    ((p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)).abs() / span
}
