use curvenet::Graph;
use std::time::Instant;

fn build_grid_graph(edges_target: usize) -> curvenet::Result<(Graph, Vec<u32>)> {
    let mut g = Graph::new();
    // Grid of vertices; horizontal edges, every third one doubled so pairs fan out
    let w = 40usize; let h = 40usize;
    let mut vertices = Vec::with_capacity(w * h);
    for j in 0..h { for i in 0..w { vertices.push(g.add_vertex(i as f64 * 60.0, j as f64 * 45.0)?); } }
    let mut ecount = 0usize;
    'outer: for j in 0..h {
        for i in 0..(w - 1) {
            let a = vertices[j * w + i]; let b = vertices[j * w + i + 1];
            g.add_edge(a, b, i % 2 == 0)?; ecount += 1;
            if i % 3 == 0 { g.add_edge(b, a, false)?; ecount += 1; }
            if ecount >= edges_target { break 'outer; }
        }
    }
    Ok((g, vertices))
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn main() -> curvenet::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut edges = 300usize;
    let mut moves = 200usize;
    let mut dynamic = true;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--edges=") { if let Ok(v) = val.parse() { edges = v; } }
        else if let Some(val) = a.strip_prefix("--moves=") { if let Ok(v) = val.parse() { moves = v; } }
        else if a == "--static-labels" { dynamic = false; }
        else if let Some(val) = a.strip_prefix("--assert-ms=") { if let Ok(v) = val.parse() { assert_ms = Some(v); } }
    }

    let t_build = Instant::now();
    let (mut g, vertices) = build_grid_graph(edges)?;
    g.set_dynamic_labeling(dynamic);
    let build_ms = t_build.elapsed().as_secs_f64() * 1000.0;

    // Drag vertices in small circles so their edges keep crossing neighbours
    let mut times_ms: Vec<f64> = Vec::with_capacity(moves);
    let start_all = Instant::now();
    for k in 0..moves {
        let v = vertices[(k * 7) % vertices.len().min(edges.max(1))];
        let Some(c) = g.vertex_center(v) else { continue };
        let a = k as f64 * 0.7;
        let t0 = Instant::now();
        g.move_vertex(v, c.x + 30.0 * a.cos(), c.y + 30.0 * a.sin(), true)?;
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(f64::total_cmp);
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    let last = g.last_stats();
    println!(
        "edges={} moves={} dynamic={} build_ms={:.3} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4} last_rebuilt={} last_tested={} cached_pairs={}",
        g.edge_count(), moves, dynamic, build_ms, dur_all, med, p90, p99, last.edges_rebuilt, last.pairs_tested, g.cached_pairs()
    );
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
    Ok(())
}
