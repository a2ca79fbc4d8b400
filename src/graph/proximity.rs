use std::cmp::Ordering;

use crate::foundation::core::Point;

/// Edge opacity at zero distance.
pub const MAX_EDGE_OPACITY: f64 = 0.8;

/// Derived, per-frame connection between two entities; `from < to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Edge {
    /// Lower entity index.
    pub from: usize,
    /// Higher entity index.
    pub to: usize,
    /// Euclidean distance in pixels.
    pub distance: f64,
    /// See [`edge_opacity`].
    pub opacity: f64,
}

/// Quadratic falloff: `MAX_EDGE_OPACITY` at distance 0, exactly 0 at or past `threshold`.
pub fn edge_opacity(distance: f64, threshold: f64) -> f64 {
    if distance.partial_cmp(&threshold) != Some(Ordering::Less) {
        return 0.0;
    }
    let falloff = 1.0 - distance / threshold;
    falloff * falloff * MAX_EDGE_OPACITY
}

/// All pairs closer than `threshold`, ordered by `from` then `to`.
///
/// O(N²) per call. Entity counts are capped at composition mount and frames
/// render offline, so the quadratic pass is an accepted scaling limit.
pub fn build_edges(positions: &[Point], threshold: f64) -> Vec<Edge> {
    let mut edges = Vec::new();
    if threshold.partial_cmp(&0.0) != Some(Ordering::Greater) {
        return edges;
    }
    for (i, a) in positions.iter().enumerate() {
        for (j, b) in positions.iter().enumerate().skip(i + 1) {
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < threshold {
                edges.push(Edge {
                    from: i,
                    to: j,
                    distance,
                    opacity: edge_opacity(distance, threshold),
                });
            }
        }
    }
    edges
}

#[cfg(test)]
#[path = "../../tests/unit/graph/proximity.rs"]
mod tests;
