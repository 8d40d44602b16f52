use curvenet::{EntityKind, Error, Graph, LayoutConfig};

#[test]
fn unknown_ids_are_rejected_without_change() {
    let mut g = Graph::new();
    let a = g.add_vertex(0.0, 0.0).unwrap();
    let ver = g.geom_version();

    match g.add_edge(a, 99, false) {
        Err(Error::NotFound { kind: EntityKind::Vertex, id: 99 }) => {}
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(g.remove_edge(7), Err(Error::NotFound { kind: EntityKind::Edge, id: 7 })));
    assert!(g.move_vertex(42, 1.0, 1.0, true).is_err());
    assert!(g.remove_vertex(42).is_err());
    assert!(g.set_edge_directed(3, true).is_err());
    assert!(g.remove_annotation(5).is_err());
    assert!(g.attachment(42).is_err());

    assert_eq!(g.geom_version(), ver);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn non_finite_input_is_an_invalid_argument() {
    let mut g = Graph::new();
    let a = g.add_vertex(5.0, 5.0).unwrap();
    let ver = g.geom_version();
    let err = g.move_vertex(a, f64::NAN, 0.0, false).unwrap_err();
    assert_eq!(err.code(), "invalid_argument");
    assert!(matches!(err, Error::InvalidArgument { param: "x", .. }));
    assert!(g.add_vertex(0.0, f64::INFINITY).is_err());
    assert!(g.add_vertex_with_radius(0.0, 0.0, -1.0).is_err());
    assert!(g.resize_vertex(a, f64::NAN).is_err());
    assert!(g.add_annotation(1e12, 0.0).is_err());
    assert_eq!(g.geom_version(), ver);
    assert_eq!(g.vertex_center(a).unwrap().x, 5.0);
}

#[test]
fn bad_zoom_keeps_the_old_scale() {
    let mut g = Graph::new();
    let a = g.add_vertex(100.0, 100.0).unwrap();
    for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let err = g.set_zoom(bad).unwrap_err();
        assert_eq!(err.code(), "invalid_argument");
    }
    assert_eq!(g.zoom_percent(), 100.0);
    assert_eq!(g.vertex_center(a).unwrap().x, 100.0);
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(Error::vertex_not_found(1).code(), "invalid_id");
    assert_eq!(Error::invalid("x", "nope").code(), "invalid_argument");
    let err = LayoutConfig::from_json_str("{ not json").unwrap_err();
    assert_eq!(err.code(), "invalid_config");
    assert_eq!(Error::edge_not_found(3).to_string(), "edge 3 not found");
}

#[test]
fn config_is_validated_before_use() {
    let cfg = LayoutConfig { offset_distance: -5.0, ..LayoutConfig::default() };
    assert!(Graph::with_config(cfg.clone()).is_err());

    let mut g = Graph::new();
    let ver = g.geom_version();
    assert!(g.set_config(cfg).is_err());
    assert_eq!(g.config().offset_distance, 20.0);
    assert_eq!(g.geom_version(), ver);

    let cfg = LayoutConfig::from_json_str(r#"{"offsetDistance": 30, "vpasEnabled": false}"#).unwrap();
    assert_eq!(cfg.offset_distance, 30.0);
    assert!(!cfg.vpas_enabled);
    assert_eq!(cfg.loop_offset_distance, 20.0);
    let g = Graph::with_config(cfg).unwrap();
    assert_eq!(g.config().offset_distance, 30.0);
}
