use curvenet::{Disc, Graph, Vec2};

fn all_finite(g: &Graph) -> bool {
    g.edge_ids().into_iter().all(|id| {
        let e = g.edge(id).unwrap();
        e.support.is_finite()
            && e.label.is_finite()
            && e.curve.iter().all(|p| p.is_finite())
    }) && g.vertex_ids().into_iter().all(|id| g.attachment(id).unwrap().is_finite())
}

#[test]
fn coincident_vertices_do_not_panic() {
    let mut g = Graph::new();
    let a = g.add_vertex(10.0, 10.0).unwrap();
    let b = g.add_vertex(10.0, 10.0).unwrap();
    let e1 = g.add_edge(a, b, false).unwrap();
    g.add_edge(a, b, true).unwrap();
    g.add_edge(b, a, false).unwrap();
    assert!(all_finite(&g));
    let e = g.edge(e1).unwrap();
    assert!(e.support.dist(Vec2::new(10.0, 10.0)) < 1e-9);
}

#[test]
fn zero_radius_vertex() {
    let mut g = Graph::new();
    let a = g.add_vertex_with_radius(0.0, 0.0, 0.0).unwrap();
    let b = g.add_vertex(50.0, 0.0).unwrap();
    let e = g.add_edge(a, b, false).unwrap();
    g.add_edge(a, a, false).unwrap();
    assert!(all_finite(&g));
    assert!((g.edge(e).unwrap().start.x - 2.0).abs() < 1e-9);
    assert_eq!(g.attachment(a).unwrap().dist(Vec2::ZERO), 0.0);
}

#[test]
fn sub_pixel_radius_truncates_to_zero() {
    let mut g = Graph::new();
    let a = g.add_vertex_with_radius(0.0, 0.0, 0.7).unwrap();
    assert_eq!(g.vertex(a).unwrap().radius(), 0.0);
}

#[test]
fn tiny_zoom_keeps_geometry_finite() {
    let mut g = Graph::new();
    let a = g.add_vertex(0.0, 0.0).unwrap();
    let b = g.add_vertex(30.0, 40.0).unwrap();
    g.add_edge(a, b, false).unwrap();
    g.add_edge(a, b, false).unwrap();
    g.add_edge(b, b, true).unwrap();
    g.set_zoom(0.5).unwrap();
    assert!(all_finite(&g));
    g.set_zoom(100.0).unwrap();
    assert!(all_finite(&g));
}

#[test]
fn overlapping_collinear_edges_yield_no_crossing() {
    let mut g = Graph::new();
    let a = g.add_vertex(0.0, 0.0).unwrap();
    let b = g.add_vertex(100.0, 0.0).unwrap();
    let c = g.add_vertex(200.0, 0.0).unwrap();
    let ab = g.add_edge(a, b, false).unwrap();
    let ac = g.add_edge(a, c, false).unwrap();
    let rec = g.intersection(ab, ac).unwrap();
    assert!(!rec.intersects());
    assert_eq!(g.edge(ab).unwrap().label, g.edge(ab).unwrap().support);
}

// Deterministic op soup: a simple LCG drives adds, moves, removals and zoom
// changes. Geometry must stay finite and the incidence lists consistent.
#[test]
fn random_ops_keep_invariants() {
    let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as u32
    };
    let mut g = Graph::new();
    for _ in 0..400 {
        let vs = g.vertex_ids();
        let es = g.edge_ids();
        match next() % 9 {
            0 | 1 => {
                let _ = g.add_vertex((next() % 800) as f64, (next() % 600) as f64);
            }
            2 | 3 | 4 if !vs.is_empty() => {
                let a = vs[next() as usize % vs.len()];
                let b = vs[next() as usize % vs.len()];
                let _ = g.add_edge(a, b, next() % 2 == 0);
            }
            5 if !vs.is_empty() => {
                let a = vs[next() as usize % vs.len()];
                let _ = g.move_vertex(a, (next() % 800) as f64, (next() % 600) as f64, next() % 2 == 0);
            }
            6 if !es.is_empty() => {
                let _ = g.remove_edge(es[next() as usize % es.len()]);
            }
            7 if !vs.is_empty() && next() % 4 == 0 => {
                let _ = g.remove_vertex(vs[next() as usize % vs.len()]);
            }
            8 => {
                let _ = g.set_zoom([50.0, 75.0, 100.0, 150.0][next() as usize % 4]);
            }
            _ => {}
        }
        assert!(all_finite(&g));
        for id in g.edge_ids() {
            let e = g.edge(id).unwrap();
            assert!(g.vertex(e.pred).unwrap().edges.contains(&id));
            assert!(g.vertex(e.succ).unwrap().edges.contains(&id));
            assert_eq!(e.is_loop, e.pred == e.succ);
        }
        for v in g.vertex_ids() {
            let vx = g.vertex(v).unwrap();
            let d = g.attachment(v).unwrap().dist(vx.center());
            assert!((d - vx.radius()).abs() < 1e-6, "vertex {v}: {d} vs {}", vx.radius());
        }
    }
}
