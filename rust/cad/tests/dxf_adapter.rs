// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DXF adapter tests against inline and generated documents.

#![cfg(feature = "dxf")]

use drawscan_cad::DxfAdapter;
use drawscan_core::{AnalysisRequest, Bounds, DrawingProducer, Error, Point2D};
use dxf::entities::{Entity, EntityType, LwPolyline, RotatedDimension};
use dxf::enums::AcadVersion;
use dxf::{Drawing, LwPolylineVertex};

const LINES_AND_POLYLINE_DXF: &str = r"0
SECTION
2
HEADER
9
$ACADVER
1
AC1015
0
ENDSEC
0
SECTION
2
TABLES
0
ENDSEC
0
SECTION
2
ENTITIES
0
LINE
8
0
10
0.0
20
0.0
30
0.0
11
10.0
21
10.0
31
0.0
0
LWPOLYLINE
8
0
90
4
70
1
10
0.0
20
0.0
10
9100.0
20
0.0
10
9100.0
20
7280.0
10
0.0
20
7280.0
0
ENDSEC
0
EOF
";

fn lw_vertex(x: f64, y: f64) -> LwPolylineVertex {
    LwPolylineVertex {
        x,
        y,
        ..Default::default()
    }
}

fn rotated_dimension(p1: (f64, f64), p2: (f64, f64), text: &str) -> Entity {
    let mut dim = RotatedDimension::default();
    dim.dimension_base.definition_point_1 = dxf::Point::new(p1.0, p1.1, 0.0);
    dim.definition_point_2 = dxf::Point::new(p2.0, p2.1, 0.0);
    dim.dimension_base.text = text.to_string();
    Entity::new(EntityType::RotatedDimension(dim))
}

/// Floor plan with a closed footprint, an annex and three dimensions
fn generated_plan() -> Vec<u8> {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2000;

    let mut footprint = LwPolyline::default();
    footprint.vertices = vec![
        lw_vertex(0.0, 0.0),
        lw_vertex(9100.0, 0.0),
        lw_vertex(9100.0, 7280.0),
        lw_vertex(0.0, 7280.0),
        lw_vertex(0.0, 0.0),
    ];
    drawing.add_entity(Entity::new(EntityType::LwPolyline(footprint)));

    let mut annex = LwPolyline::default();
    annex.vertices = vec![
        lw_vertex(9100.0, 0.0),
        lw_vertex(12740.0, 0.0),
        lw_vertex(12740.0, 3640.0),
    ];
    drawing.add_entity(Entity::new(EntityType::LwPolyline(annex)));

    drawing.add_entity(rotated_dimension((0.0, -500.0), (9100.0, -500.0), "9100"));
    drawing.add_entity(rotated_dimension((0.0, 7780.0), (3640.0, 7780.0), "3,640"));
    drawing.add_entity(rotated_dimension((0.0, 0.0), (10.0, 0.0), "5"));

    let mut bytes = Vec::new();
    drawing.save(&mut bytes).expect("save dxf");
    bytes
}

#[test]
fn lines_collected_polylines_become_outlines() {
    let drawing = DxfAdapter::new()
        .parse(LINES_AND_POLYLINE_DXF.as_bytes())
        .expect("parse dxf");

    assert_eq!(
        drawing.line_vertices,
        vec![Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0)]
    );
    assert_eq!(drawing.outlines.len(), 1);
    assert_eq!(drawing.outlines[0].vertices.len(), 4);
}

#[test]
fn generated_plan_result() {
    let result = DxfAdapter::new()
        .analyze(&generated_plan(), &AnalysisRequest::default())
        .expect("analyze dxf");

    assert_eq!(result.outlines.len(), 2);
    assert_eq!(result.outlines[0].vertices.len(), 4);
    assert_eq!(result.outlines[1].vertices.len(), 3);
    assert!(result.outlines.iter().all(|o| o.color == "#3b82f6"));

    assert!(result.entrances.is_empty());
    assert_eq!(result.scale, 1.0);
    assert_eq!(result.bounds, Bounds::new(0.0, 0.0, 12740.0, 7280.0));

    // "5" is below the plausible range; "3,640" only yields its leading "3"
    let values: Vec<u32> = result.dimensions.iter().map(|d| d.value).collect();
    assert_eq!(values, vec![9100]);
}

#[test]
fn dimension_endpoints_from_definition_points() {
    let drawing = DxfAdapter::new().parse(&generated_plan()).unwrap();

    let first = &drawing.dimensions[0];
    assert_eq!(first.start, Point2D::new(0.0, -500.0));
    assert_eq!(first.end, Point2D::new(9100.0, -500.0));
    assert_eq!(first.label, "9,100mm");
}

/// Vector outlines ignore the requested floor and always report floor 1.
#[test]
fn vector_outlines_always_first_floor() {
    let result = DxfAdapter::new()
        .analyze(&generated_plan(), &AnalysisRequest::for_floor(3))
        .unwrap();

    assert!(result.outlines.iter().all(|o| o.floor == 1));
}

#[test]
fn malformed_document_is_parse_error() {
    let err = DxfAdapter::new()
        .analyze(b"this is not\na dxf file\n", &AnalysisRequest::default())
        .unwrap_err();

    assert!(matches!(err, Error::Parse { format: "dxf", .. }));
}

#[test]
fn repeated_analysis_is_byte_identical() {
    let bytes = generated_plan();
    let adapter = DxfAdapter::new();

    let a = adapter.analyze(&bytes, &AnalysisRequest::default()).unwrap();
    let b = adapter.analyze(&bytes, &AnalysisRequest::default()).unwrap();

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
