// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # DrawScan Core
//!
//! Shared data model for architectural drawing extraction.
//!
//! Every input path (scanned raster drawings, rendered PDF pages, DXF vector
//! documents) produces the same [`AnalysisResult`]: building outlines,
//! entrance markers, dimension lines, an estimated scale and the bounding box
//! of all outline vertices.
//!
//! ## Overview
//!
//! - **Types**: [`Point2D`], [`Outline`], [`Entrance`], [`DimensionLine`], [`Bounds`]
//! - **Rules**: the dimension value band, the floor palette and stable record ids
//! - **Producers**: the [`DrawingProducer`] trait implemented by each input path
//!
//! ## Quick Start
//!
//! ```rust
//! use drawscan_core::{AnalysisResult, Bounds, Outline, Point2D};
//!
//! let outline = Outline::new(
//!     vec![
//!         Point2D::new(50.0, 50.0),
//!         Point2D::new(750.0, 50.0),
//!         Point2D::new(750.0, 550.0),
//!         Point2D::new(50.0, 550.0),
//!     ],
//!     1,
//! )
//! .unwrap();
//!
//! let result = AnalysisResult::new(vec![outline], Vec::new(), Vec::new(), 0.1);
//! assert_eq!(result.bounds, Bounds::new(50.0, 50.0, 750.0, 550.0));
//! ```

pub mod bounds;
pub mod error;
pub mod floor;
pub mod ids;
pub mod producer;
pub mod types;

pub use bounds::Bounds;
pub use error::{Capability, Error, Result};
pub use floor::{floor_color, resolve_floor, DEFAULT_FLOOR};
pub use ids::stable_id;
pub use producer::{AnalysisRequest, DrawingProducer};
pub use types::{
    fold_digits, format_millimeters, polygon_area, AnalysisResult, DimensionLine, Entrance, EntranceKind,
    Outline, Point2D, DEFAULT_ENTRANCE_WIDTH_MM, MAX_DIMENSION_MM, MIN_DIMENSION_MM,
};
