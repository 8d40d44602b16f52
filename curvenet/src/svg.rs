use crate::Graph;
use std::fmt::Write;

/// One SVG path per edge, in edge-id order: the sampled curve as a polyline,
/// followed by a closed arrowhead subpath for directed edges.
pub fn to_svg_paths_impl(g: &Graph) -> Vec<String> {
    let mut paths = Vec::new();
    for (_, e) in g.model.edges() {
        let mut pts = e.curve.iter();
        let Some(first) = pts.next() else {
            continue;
        };
        let mut d = format!("M {} {}", first.x, first.y);
        for p in pts {
            let _ = write!(d, " L {} {}", p.x, p.y);
        }
        if let Some(a) = e.arrow {
            let _ = write!(
                d,
                " M {} {} L {} {} L {} {} Z",
                a.left.x, a.left.y, a.tip.x, a.tip.y, a.right.x, a.right.y
            );
        }
        paths.push(d);
    }
    paths
}
