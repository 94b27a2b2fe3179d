// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end export tests: files are read back and checked as graphs

mod common;

use std::io::{self, Write};

use approx::assert_relative_eq;
use common::{Graph, Value};
use ifc_export_core::ElementType;
use ifc_export_engine::{
    collect_export_objects, export_model, CancelFlag, Error, ExportConfig, ExportObject,
    Exporter, MemoryStore, StoredElement,
};
use ifc_export_geometry::{CircularExtrusion, Color, Material, Point3, TriangleMesh, Vector3};

const TIMESTAMP: &str = "2024-01-01T00:00:00";

fn config() -> ExportConfig {
    ExportConfig::default().deterministic(TIMESTAMP)
}

fn triangle() -> TriangleMesh {
    TriangleMesh::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![0, 1, 2])
}

/// `n` disjoint triangles along the x axis
fn strip(n: u32) -> TriangleMesh {
    let mut positions = Vec::new();
    let mut indices = Vec::new();
    for i in 0..n {
        let x = i as f32;
        positions.extend_from_slice(&[x, 0.0, 0.0, x + 1.0, 0.0, 0.0, x, 1.0, 0.0]);
        indices.extend_from_slice(&[3 * i, 3 * i + 1, 3 * i + 2]);
    }
    TriangleMesh::new(positions, indices)
}

fn export(objects: &[ExportObject]) -> Graph {
    let bytes = export_model(&Vector3::zeros(), &Vector3::y(), objects, &config()).unwrap();
    let graph = Graph::from_bytes(&bytes);
    graph.assert_topological();
    graph
}

fn is_io_error(err: &Error) -> bool {
    matches!(
        err,
        Error::Core(ifc_export_core::Error::Io(_))
            | Error::Geometry(ifc_export_geometry::Error::Core(ifc_export_core::Error::Io(_)))
    )
}

#[test]
fn test_single_triangle_scenario() {
    let placement = Vector3::new(5.0, 0.0, 0.0);
    let wall = ExportObject::new(ElementType::Wall, 1, placement, vec![triangle()]);
    let graph = export(&[wall]);

    assert_eq!(graph.lines.len(), 42);
    assert_eq!(graph.lines[0].id, 1);
    assert_eq!(graph.lines.last().unwrap().id, 42);

    // 3 mesh vertices, world origin, hierarchy origin, product origin
    assert_eq!(graph.count("IFCCARTESIANPOINT"), 6);
    assert_eq!(graph.count("IFCPOLYLOOP"), 1);
    assert_eq!(graph.count("IFCFACEOUTERBOUND"), 1);
    assert_eq!(graph.count("IFCFACE"), 1);
    assert_eq!(graph.count("IFCCLOSEDSHELL"), 1);
    assert_eq!(graph.count("IFCFACETEDBREP"), 1);
    assert_eq!(graph.count("IFCSHAPEREPRESENTATION"), 1);
    assert_eq!(graph.count("IFCPRODUCTDEFINITIONSHAPE"), 1);
    assert_eq!(graph.count("IFCLOCALPLACEMENT"), 2);
    assert_eq!(graph.count("IFCSIUNIT"), 8);
    assert_eq!(graph.count("IFCRELAGGREGATES"), 3);
    assert_eq!(graph.count("IFCRELCONTAINEDINSPATIALSTRUCTURE"), 1);
    assert_eq!(graph.count("IFCSTYLEDITEM"), 0);

    let wall = graph.one("IFCWALL");
    assert_eq!(graph.placement_origin(wall.attr_ref(5)), vec![5.0, 0.0, 0.0]);
    assert_eq!(wall.attrs[7], Value::Text("1".into()));

    let shape = graph.get(wall.attr_ref(6));
    assert_eq!(shape.type_name, "IFCPRODUCTDEFINITIONSHAPE");
    let rep = graph.get(shape.attr_refs(2)[0]);
    assert_eq!(rep.attrs[1], Value::Text("Body".into()));
    assert_eq!(rep.attrs[2], Value::Text("Brep".into()));
    assert_eq!(graph.get(rep.attr_refs(3)[0]).type_name, "IFCFACETEDBREP");

    let face = graph.one("IFCFACE");
    let bound = graph.get(face.attr_refs(0)[0]);
    let poly = graph.get(bound.attr_ref(0));
    let corners: Vec<Vec<f64>> = poly.attr_refs(0).into_iter().map(|p| graph.point(p)).collect();
    assert_eq!(
        corners,
        vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]
    );
}

#[test]
fn test_zero_objects_minimal_graph() {
    let graph = export(&[]);
    // context scaffold 8, units 9, project, hierarchy placement 3,
    // site/building/storey, three aggregations
    assert_eq!(graph.lines.len(), 27);
    graph.one("IFCGEOMETRICREPRESENTATIONCONTEXT");
    graph.one("IFCUNITASSIGNMENT");
    graph.one("IFCPROJECT");
    graph.one("IFCSITE");
    graph.one("IFCBUILDING");
    graph.one("IFCBUILDINGSTOREY");
    assert_eq!(graph.count("IFCSIUNIT"), 8);
    assert_eq!(graph.count("IFCGEOMETRICREPRESENTATIONSUBCONTEXT"), 4);
    assert_eq!(graph.count("IFCRELCONTAINEDINSPATIALSTRUCTURE"), 0);
    assert_eq!(graph.count("IFCRELAGGREGATES"), 3);
}

#[test]
fn test_hierarchy_completeness() {
    let objects: Vec<ExportObject> = [ElementType::Wall, ElementType::Slab, ElementType::Door]
        .into_iter()
        .enumerate()
        .map(|(i, kind)| {
            let placement = Vector3::new(i as f64, 0.0, 0.0);
            ExportObject::new(kind, i as u32 + 10, placement, vec![triangle()])
        })
        .collect();
    let graph = export(&objects);

    let project = graph.one("IFCPROJECT").id;
    let site = graph.one("IFCSITE").id;
    let building = graph.one("IFCBUILDING").id;
    let storey = graph.one("IFCBUILDINGSTOREY").id;
    let products: Vec<u32> = ["IFCWALL", "IFCSLAB", "IFCDOOR"]
        .iter()
        .map(|t| graph.one(t).id)
        .collect();

    for product in &products {
        let containers: Vec<u32> = graph
            .of_type("IFCRELCONTAINEDINSPATIALSTRUCTURE")
            .filter(|rel| rel.attr_refs(4).contains(product))
            .map(|rel| rel.attr_ref(5))
            .collect();
        assert_eq!(containers, vec![storey]);
    }

    let parent_of = |child: u32| -> Vec<u32> {
        graph
            .of_type("IFCRELAGGREGATES")
            .filter(|rel| rel.attr_refs(5).contains(&child))
            .map(|rel| rel.attr_ref(4))
            .collect()
    };
    assert_eq!(parent_of(storey), vec![building]);
    assert_eq!(parent_of(building), vec![site]);
    assert_eq!(parent_of(site), vec![project]);
    assert!(parent_of(project).is_empty());

    // Containers share one placement; products are placed under it
    let shared = graph.get(site).attr_ref(5);
    assert_eq!(graph.get(building).attr_ref(5), shared);
    assert_eq!(graph.get(storey).attr_ref(5), shared);
    for product in &products {
        let placement = graph.get(graph.get(*product).attr_ref(5));
        assert_eq!(placement.attr_ref(0), shared);
    }

    // Door keeps the trailing window/door attributes
    assert_eq!(graph.one("IFCDOOR").attrs.len(), 13);
}

#[test]
fn test_triangle_conservation() {
    for n in [1, 7, 250] {
        let object = ExportObject::new(ElementType::Slab, 1, Vector3::zeros(), vec![strip(n)]);
        let graph = export(&[object]);
        assert_eq!(graph.count("IFCFACE"), n as usize);
        assert_eq!(graph.count("IFCFACEOUTERBOUND"), n as usize);
        assert_eq!(graph.count("IFCPOLYLOOP"), n as usize);
        assert_eq!(graph.one("IFCCLOSEDSHELL").attr_refs(0).len(), n as usize);
    }
}

#[test]
fn test_opacity_round_trip() {
    for opacity in [0.0, 0.3, 0.55, 1.0] {
        let object = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()])
            .with_materials(vec![Material::new(Color::new(0.2, 0.4, 0.6), opacity)]);
        let graph = export(&[object]);
        let shading = graph.one("IFCSURFACESTYLESHADING");
        let transparency = shading.attrs[1].as_real().unwrap();
        assert_relative_eq!(transparency, 1.0 - opacity, epsilon = 1e-12);
        assert_relative_eq!(1.0 - transparency, opacity, epsilon = 1e-12);

        let colour = graph.get(shading.attr_ref(0));
        let rgb: Vec<f64> = colour.attrs[1..].iter().filter_map(Value::as_real).collect();
        assert_eq!(rgb, vec![0.2, 0.4, 0.6]);

        let styled = graph.one("IFCSTYLEDITEM");
        assert_eq!(styled.attr_ref(0), graph.one("IFCFACETEDBREP").id);
    }
}

#[test]
fn test_material_without_color_is_unstyled() {
    let object = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()])
        .with_materials(vec![Material::default()]);
    let graph = export(&[object]);
    assert_eq!(graph.count("IFCSTYLEDITEM"), 0);
    assert_eq!(graph.count("IFCCOLOURRGB"), 0);
}

#[test]
fn test_unit_set_is_fixed() {
    let graph = export(&[]);
    let units: Vec<(String, String)> = graph
        .of_type("IFCSIUNIT")
        .map(|u| match (&u.attrs[1], &u.attrs[3]) {
            (Value::Enum(kind), Value::Enum(name)) => (kind.clone(), name.clone()),
            other => panic!("unexpected unit attributes {:?}", other),
        })
        .collect();
    let expected = [
        ("LENGTHUNIT", "METRE"),
        ("AREAUNIT", "SQUARE_METRE"),
        ("VOLUMEUNIT", "CUBIC_METRE"),
        ("MASSUNIT", "GRAM"),
        ("SOLIDANGLEUNIT", "STERADIAN"),
        ("TIMEUNIT", "SECOND"),
        ("THERMODYNAMICTEMPERATUREUNIT", "DEGREE_CELSIUS"),
        ("LUMINOUSINTENSITYUNIT", "LUMEN"),
    ];
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(k, n)| (k.to_string(), n.to_string()))
        .collect();
    assert_eq!(units, expected);

    let assignment = graph.one("IFCUNITASSIGNMENT");
    let unit_ids: Vec<u32> = graph.of_type("IFCSIUNIT").map(|u| u.id).collect();
    assert_eq!(assignment.attr_refs(0), unit_ids);
    assert_eq!(graph.one("IFCPROJECT").attr_ref(8), assignment.id);
}

#[test]
fn test_context_and_true_north() {
    let bytes = export_model(
        &Vector3::new(1.0, 2.0, 3.0),
        &Vector3::new(0.0, 1.0, 0.0),
        &[],
        &config(),
    )
    .unwrap();
    let graph = Graph::from_bytes(&bytes);
    let context = graph.one("IFCGEOMETRICREPRESENTATIONCONTEXT");
    assert_eq!(context.attrs[1], Value::Text("Model".into()));
    assert_eq!(context.attrs[2], Value::Integer(3));
    let wcs = graph.get(context.attr_ref(4));
    assert_eq!(graph.point(wcs.attr_ref(0)), vec![1.0, 2.0, 3.0]);
    let north = graph.get(context.attr_ref(5));
    assert_eq!(north.type_name, "IFCDIRECTION");

    let views: Vec<&str> = graph
        .of_type("IFCGEOMETRICREPRESENTATIONSUBCONTEXT")
        .map(|c| c.attrs[0].as_text().unwrap())
        .collect();
    assert_eq!(views, vec!["Axis", "Body", "Box", "Footprint"]);
    assert_eq!(
        graph.one("IFCPROJECT").attr_refs(7),
        vec![context.id]
    );
}

#[test]
fn test_malformed_mesh_aborts_without_output() {
    let good = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()]);
    let mut bad = good.clone();
    bad.meshes[0].indices = vec![0, 1, 3];
    let result = export_model(&Vector3::zeros(), &Vector3::y(), &[good, bad], &config());
    match result {
        Err(Error::InvalidObject { index, source }) => {
            assert_eq!(index, 1);
            assert!(matches!(
                source,
                ifc_export_geometry::Error::IndexOutOfRange { index: 3, .. }
            ));
        }
        other => panic!("expected InvalidObject, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_malformed_mesh_writes_nothing_to_stream() {
    let mut bad = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()]);
    bad.meshes[0].indices.pop();
    let mut out = Vec::new();
    let result = Exporter::new(config()).export_to_writer(
        &mut out,
        &Vector3::zeros(),
        &Vector3::y(),
        &[bad],
    );
    assert!(matches!(result, Err(Error::InvalidObject { index: 0, .. })));
    assert!(out.is_empty());
}

#[test]
fn test_invalid_project_frame_writes_nothing_to_stream() {
    let wall = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()]);
    let frames = [
        (Vector3::zeros(), Vector3::zeros()),
        (Vector3::zeros(), Vector3::new(0.0, f64::INFINITY, 0.0)),
        (Vector3::new(f64::NAN, 0.0, 0.0), Vector3::y()),
    ];
    for (origin, north) in frames {
        let mut out = Vec::new();
        let result = Exporter::new(config()).export_to_writer(
            &mut out,
            &origin,
            &north,
            std::slice::from_ref(&wall),
        );
        assert!(matches!(result, Err(Error::Geometry(_))), "{:?}", result.map(|(_, s)| s));
        assert!(out.is_empty(), "header written for origin {origin:?}, north {north:?}");
    }
}

/// Accepts `budget` bytes, then fails every write
struct FailingWriter {
    budget: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() > self.budget {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.budget -= buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure_propagates() {
    let wall = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()]);
    for budget in [0, 600, 1200] {
        let result = Exporter::new(config()).export_to_writer(
            FailingWriter { budget },
            &Vector3::zeros(),
            &Vector3::y(),
            std::slice::from_ref(&wall),
        );
        let err = result.err().expect("export should fail");
        assert!(is_io_error(&err), "unexpected error {:?}", err);
    }
}

#[test]
fn test_cancelled_export_produces_nothing() {
    let cancel = CancelFlag::new();
    cancel.cancel();
    let wall = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()]);
    let result = Exporter::new(config())
        .with_cancel_flag(cancel)
        .export(&Vector3::zeros(), &Vector3::y(), &[wall]);
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[test]
fn test_deterministic_output_is_reproducible() {
    let objects = vec![
        ExportObject::new(ElementType::Wall, 1, Vector3::new(5.0, 0.0, 0.0), vec![strip(20)])
            .with_materials(vec![Material::new(Color::new(1.0, 0.0, 0.0), 0.5)]),
        ExportObject::new(ElementType::Column, 2, Vector3::zeros(), Vec::new())
            .with_extrusion(CircularExtrusion::vertical(Point3::origin(), 0.2, 3.0)),
    ];
    let a = export_model(&Vector3::zeros(), &Vector3::y(), &objects, &config()).unwrap();
    let b = export_model(&Vector3::zeros(), &Vector3::y(), &objects, &config()).unwrap();
    assert_eq!(a, b);
    assert!(String::from_utf8(a).unwrap().contains(TIMESTAMP));
}

#[test]
fn test_streaming_matches_in_memory() {
    let objects = vec![
        ExportObject::new(ElementType::Slab, 4, Vector3::new(0.0, 0.0, 3.0), vec![strip(5)]),
        ExportObject::new(ElementType::Roof, 5, Vector3::zeros(), vec![triangle(), strip(2)]),
    ];
    let exporter = Exporter::new(config());
    let (in_memory, summary) = exporter
        .export(&Vector3::zeros(), &Vector3::y(), &objects)
        .unwrap();
    let (streamed, streamed_summary) = exporter
        .export_to_writer(Vec::new(), &Vector3::zeros(), &Vector3::y(), &objects)
        .unwrap();
    assert_eq!(in_memory, streamed);
    assert_eq!(summary, streamed_summary);
    assert_eq!(summary.products, 2);
    assert_eq!(summary.triangles, 8);
    assert_eq!(summary.records, Graph::from_bytes(&streamed).lines.len());
}

#[test]
fn test_random_global_ids_are_unique() {
    let objects: Vec<ExportObject> = (0..20)
        .map(|i| ExportObject::new(ElementType::Member, i, Vector3::zeros(), vec![triangle()]))
        .collect();
    let bytes = export_model(
        &Vector3::zeros(),
        &Vector3::y(),
        &objects,
        &ExportConfig::default(),
    )
    .unwrap();
    let graph = Graph::from_bytes(&bytes);
    let tagged = [
        "IFCPROJECT",
        "IFCSITE",
        "IFCBUILDING",
        "IFCBUILDINGSTOREY",
        "IFCMEMBER",
        "IFCRELAGGREGATES",
        "IFCRELCONTAINEDINSPATIALSTRUCTURE",
    ];
    let mut tags: Vec<String> = graph
        .lines
        .iter()
        .filter(|l| tagged.contains(&l.type_name.as_str()))
        .map(|l| l.attrs[0].as_text().unwrap().to_string())
        .collect();
    assert_eq!(tags.len(), 4 + 20 + 3 + 1);
    assert!(tags.iter().all(|t| t.len() == 22));
    tags.sort();
    tags.dedup();
    assert_eq!(tags.len(), 28);
}

#[test]
fn test_id_seed_offsets_every_identifier() {
    let mut config = config();
    config.id_seed = 1000;
    let wall = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()]);
    let bytes = export_model(&Vector3::zeros(), &Vector3::y(), &[wall], &config).unwrap();
    let graph = Graph::from_bytes(&bytes);
    graph.assert_topological();
    let ids: Vec<u32> = graph.lines.iter().map(|l| l.id).collect();
    assert_eq!(ids, (1000..1042).collect::<Vec<_>>());
}

#[test]
fn test_extruded_column() {
    let column = ExportObject::new(ElementType::Column, 9, Vector3::new(2.0, 2.0, 0.0), Vec::new())
        .with_extrusion(CircularExtrusion::vertical(Point3::origin(), 0.25, 3.0));
    let graph = export(&[column]);
    let solid = graph.one("IFCEXTRUDEDAREASOLID");
    assert_eq!(solid.attrs[3], Value::Real(3.0));
    let profile = graph.get(solid.attr_ref(0));
    assert_eq!(profile.type_name, "IFCCIRCLEPROFILEDEF");
    assert_eq!(profile.attrs[0], Value::Enum("AREA".into()));
    assert_eq!(profile.attrs[3], Value::Real(0.25));
    let rep = graph.one("IFCSHAPEREPRESENTATION");
    assert_eq!(rep.attrs[2], Value::Text("SweptSolid".into()));
    assert_eq!(graph.count("IFCFACETEDBREP"), 0);
}

#[test]
fn test_text_is_escaped() {
    let mut config = config();
    config.project_name = "O'Brien \\ Partners".into();
    let wall = ExportObject::new(ElementType::Wall, 1, Vector3::zeros(), vec![triangle()])
        .with_name("Wand Ü1");
    let bytes = export_model(&Vector3::zeros(), &Vector3::y(), &[wall], &config).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("'O''Brien \\\\ Partners'"));
    assert!(text.contains("'Wand \\X2\\00DC\\X0\\1'"));
    let graph = Graph::parse(&text);
    assert_eq!(
        graph.one("IFCPROJECT").attrs[2],
        Value::Text("O'Brien \\\\ Partners".into())
    );
}

#[test]
fn test_export_from_store() {
    let mut store = MemoryStore::new();
    store.insert(
        12,
        StoredElement {
            element_type: ElementType::Beam,
            placement: Vector3::new(0.0, 0.0, 3.0),
            meshes: vec![(strip(3), Some(Material::new(Color::new(0.5, 0.5, 0.5), 0.9)))],
        },
    );
    store.insert(
        11,
        StoredElement {
            element_type: ElementType::Column,
            placement: Vector3::zeros(),
            meshes: vec![(triangle(), None)],
        },
    );
    let objects = collect_export_objects(&store, &store.element_ids()).unwrap();
    let graph = export(&objects);
    assert_eq!(graph.one("IFCCOLUMN").attrs[7], Value::Text("11".into()));
    let beam = graph.one("IFCBEAM");
    assert_eq!(beam.attrs[7], Value::Text("12".into()));
    assert_eq!(graph.placement_origin(beam.attr_ref(5)), vec![0.0, 0.0, 3.0]);
    assert_eq!(graph.count("IFCSTYLEDITEM"), 1);
    assert!(graph.one("IFCCOLUMN").id < beam.id);
}

#[test]
fn test_scene_json() {
    let json = r#"[
        {
            "meshes": [{ "positions": [0, 0, 0, 1, 0, 0, 0, 1, 0], "indices": [0, 1, 2] }],
            "element_type": "IfcWall",
            "element_id": 1,
            "placement": [5, 0, 0]
        },
        {
            "meshes": [],
            "extrusions": [
                { "position": [0, 0, 0], "direction": [0, 0, 1], "radius": 0.3, "depth": 2.5 }
            ],
            "element_type": "COLUMN",
            "element_id": 2,
            "placement": [1, 1, 0],
            "name": "C-01"
        }
    ]"#;
    let objects: Vec<ExportObject> = serde_json::from_str(json).unwrap();
    let graph = export(&objects);
    graph.one("IFCWALL");
    assert_eq!(graph.one("IFCCOLUMN").attrs[2], Value::Text("C-01".into()));
}
