// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Circle detection for door swing arcs

use crate::types::DetectedCircle;
use drawscan_core::Point2D;
use image::GrayImage;

/// Parameters for gradient-directed circle detection
#[derive(Debug, Clone, Copy)]
pub struct CircleParams {
    pub min_radius: u32,
    pub max_radius: u32,
    /// Minimum distance between accepted centers
    pub min_distance: f64,
    /// Votes a center needs, and edge support a radius needs
    pub threshold: u32,
    /// Stop after this many circles
    pub max_circles: usize,
}

/// Half-width of the radius histogram window, so both flanks of a drawn stroke count together
const RADIUS_WINDOW: usize = 2;

/// Gaussian smoothing applied before estimating gradient directions
const GRADIENT_SIGMA: f32 = 1.4;

/// Detect circles using a gradient-directed Hough transform
///
/// Every edge pixel votes for candidate centers along its gradient direction
/// (both ways) at every radius in range. Local accumulator maxima above the
/// threshold become centers, strongest first, skipping any closer than
/// `min_distance` to an accepted one. Each center's radius is the distance
/// most supported by edge pixels.
pub fn detect_circles(
    gray: &GrayImage,
    edges: &GrayImage,
    params: &CircleParams,
) -> Vec<DetectedCircle> {
    let width = edges.width() as i32;
    let height = edges.height() as i32;
    if width == 0 || height == 0 || params.min_radius > params.max_radius {
        return Vec::new();
    }

    let smoothed = imageproc::filter::gaussian_blur_f32(gray, GRADIENT_SIGMA);
    let gx = imageproc::gradients::horizontal_sobel(&smoothed);
    let gy = imageproc::gradients::vertical_sobel(&smoothed);

    // Collect edge points
    let mut edge_points: Vec<(i32, i32)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if edges.get_pixel(x as u32, y as u32).0[0] > 128 {
                edge_points.push((x, y));
            }
        }
    }

    // Vote for centers
    let mut accumulator = vec![0u32; (width * height) as usize];
    for &(x, y) in &edge_points {
        let dx = gx.get_pixel(x as u32, y as u32).0[0] as f64;
        let dy = gy.get_pixel(x as u32, y as u32).0[0] as f64;
        let magnitude = (dx * dx + dy * dy).sqrt();
        if magnitude < 1e-6 {
            continue;
        }
        let (ux, uy) = (dx / magnitude, dy / magnitude);

        for r in params.min_radius..=params.max_radius {
            for sign in [1.0, -1.0] {
                let cx = (x as f64 + sign * ux * r as f64).round() as i32;
                let cy = (y as f64 + sign * uy * r as f64).round() as i32;
                if cx >= 0 && cx < width && cy >= 0 && cy < height {
                    accumulator[(cy * width + cx) as usize] += 1;
                }
            }
        }
    }

    // Local maxima above threshold
    let at = |x: i32, y: i32| accumulator[(y * width + x) as usize];
    let mut peaks: Vec<(i32, i32, u32)> = Vec::new();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let votes = at(x, y);
            if votes > params.threshold
                && votes > at(x - 1, y)
                && votes >= at(x + 1, y)
                && votes > at(x, y - 1)
                && votes >= at(x, y + 1)
            {
                peaks.push((x, y, votes));
            }
        }
    }

    // Sort by votes (descending), raster order among equals
    peaks.sort_by(|a, b| b.2.cmp(&a.2));

    let mut circles: Vec<DetectedCircle> = Vec::new();
    for (x, y, votes) in peaks {
        if circles.len() >= params.max_circles {
            break;
        }

        let center = Point2D::new(x as f64, y as f64);
        if circles
            .iter()
            .any(|c| c.center.distance_to(&center) < params.min_distance)
        {
            continue;
        }

        if let Some(radius) = estimate_radius(&edge_points, center, params) {
            circles.push(DetectedCircle {
                center,
                radius: radius as f64,
                votes,
            });
        }
    }

    circles
}

/// Radius around `center` best supported by edge pixels, if support reaches the threshold
fn estimate_radius(edge_points: &[(i32, i32)], center: Point2D, params: &CircleParams) -> Option<u32> {
    let max_r = params.max_radius as usize + RADIUS_WINDOW;
    let mut histogram = vec![0u32; max_r + 1];

    for &(x, y) in edge_points {
        let d = center.distance_to(&Point2D::new(x as f64, y as f64)).round() as usize;
        if d <= max_r {
            histogram[d] += 1;
        }
    }

    let mut best: Option<(u32, u32)> = None;
    for r in params.min_radius..=params.max_radius {
        let lo = (r as usize).saturating_sub(RADIUS_WINDOW);
        let hi = r as usize + RADIUS_WINDOW;
        let support: u32 = histogram[lo..=hi].iter().sum();
        if best.map_or(true, |(_, s)| support > s) {
            best = Some((r, support));
        }
    }

    best.filter(|&(_, support)| support >= params.threshold)
        .map(|(r, _)| r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_ops::canny_edges;
    use image::Luma;
    use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_circle_mut};
    use imageproc::rect::Rect;

    fn params() -> CircleParams {
        CircleParams {
            min_radius: 20,
            max_radius: 100,
            min_distance: 50.0,
            threshold: 30,
            max_circles: 5,
        }
    }

    fn white(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([255]))
    }

    #[test]
    fn test_detects_single_ring() {
        let mut gray = white(200, 200);
        for r in 39..=41 {
            draw_hollow_circle_mut(&mut gray, (100, 100), r, Luma([0]));
        }
        let edges = canny_edges(&gray, 50.0, 150.0);

        let circles = detect_circles(&gray, &edges, &params());

        assert!(!circles.is_empty());
        let c = circles[0];
        assert!((c.center.x - 100.0).abs() <= 3.0, "center x {}", c.center.x);
        assert!((c.center.y - 100.0).abs() <= 3.0, "center y {}", c.center.y);
        assert!((c.radius - 40.0).abs() <= 3.0, "radius {}", c.radius);
    }

    #[test]
    fn test_blank_image_has_no_circles() {
        let gray = white(120, 120);
        let edges = canny_edges(&gray, 50.0, 150.0);
        assert!(detect_circles(&gray, &edges, &params()).is_empty());
    }

    #[test]
    fn test_straight_edges_are_not_circles() {
        let mut gray = white(300, 300);
        draw_filled_rect_mut(&mut gray, Rect::at(60, 60).of_size(181, 181), Luma([0]));
        let edges = canny_edges(&gray, 50.0, 150.0);

        assert!(detect_circles(&gray, &edges, &params()).is_empty());
    }

    #[test]
    fn test_estimate_radius_requires_support() {
        let edge_points = vec![(10, 0), (0, 10)];
        let radius = estimate_radius(&edge_points, Point2D::new(0.0, 0.0), &params());
        assert!(radius.is_none());
    }
}
