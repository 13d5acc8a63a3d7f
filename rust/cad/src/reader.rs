// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DXF entity extraction

use crate::VectorDrawing;
use drawscan_core::{Error, Point2D, Result};
use dxf::entities::EntityType;
use dxf::Drawing;
use std::io::Cursor;

fn point(p: &dxf::Point) -> Point2D {
    Point2D::new(p.x, p.y)
}

/// Parse DXF bytes (ASCII or binary) and collect lines, polylines and dimensions
pub(crate) fn read_drawing(bytes: &[u8]) -> Result<VectorDrawing> {
    let mut cursor = Cursor::new(bytes);
    let drawing = Drawing::load(&mut cursor).map_err(|e| Error::Parse {
        format: "dxf",
        reason: e.to_string(),
    })?;

    let mut out = VectorDrawing::default();

    for entity in drawing.entities() {
        match entity.specific {
            EntityType::Line(ref line) => {
                out.line_vertices.push(point(&line.p1));
                out.line_vertices.push(point(&line.p2));
            }
            EntityType::LwPolyline(ref poly) => {
                let vertices = poly
                    .vertices
                    .iter()
                    .map(|v| Point2D::new(v.x, v.y))
                    .collect();
                out.push_polyline(vertices);
            }
            EntityType::Polyline(ref poly) => {
                let vertices = poly.vertices().map(|v| point(&v.location)).collect();
                out.push_polyline(vertices);
            }
            EntityType::RotatedDimension(ref dim) => out.push_dimension(
                point(&dim.dimension_base.definition_point_1),
                point(&dim.definition_point_2),
                &dim.dimension_base.text,
            ),
            EntityType::RadialDimension(ref dim) => out.push_dimension(
                point(&dim.dimension_base.definition_point_1),
                point(&dim.definition_point_2),
                &dim.dimension_base.text,
            ),
            EntityType::DiameterDimension(ref dim) => out.push_dimension(
                point(&dim.dimension_base.definition_point_1),
                point(&dim.definition_point_2),
                &dim.dimension_base.text,
            ),
            EntityType::AngularThreePointDimension(ref dim) => out.push_dimension(
                point(&dim.dimension_base.definition_point_1),
                point(&dim.definition_point_2),
                &dim.dimension_base.text,
            ),
            EntityType::OrdinateDimension(ref dim) => out.push_dimension(
                point(&dim.dimension_base.definition_point_1),
                point(&dim.definition_point_2),
                &dim.dimension_base.text,
            ),
            _ => {}
        }
    }

    Ok(out)
}
