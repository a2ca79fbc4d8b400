use super::*;

#[test]
fn opacity_hits_documented_extremes() {
    assert_eq!(edge_opacity(0.0, 300.0), 0.8);
    assert_eq!(edge_opacity(300.0, 300.0), 0.0);
    assert_eq!(edge_opacity(450.0, 300.0), 0.0);
    assert!((edge_opacity(150.0, 300.0) - 0.2).abs() < 1e-12);
}

#[test]
fn coincident_points_get_full_opacity() {
    let edges = build_edges(&[Point::new(5.0, 5.0), Point::new(5.0, 5.0)], 10.0);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].opacity, 0.8);
}

#[test]
fn points_exactly_at_threshold_are_not_connected() {
    let edges = build_edges(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)], 5.0);
    assert!(edges.is_empty());
}

#[test]
fn pair_is_symmetric_under_input_order() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(30.0, 40.0);
    let ab = build_edges(&[a, b], 100.0);
    let ba = build_edges(&[b, a], 100.0);
    assert_eq!(ab.len(), 1);
    assert_eq!(ba.len(), 1);
    assert_eq!((ab[0].from, ab[0].to), (0, 1));
    assert_eq!((ba[0].from, ba[0].to), (0, 1));
    assert_eq!(ab[0].opacity, ba[0].opacity);
}

#[test]
fn edges_are_unique_ordered_and_free_of_self_loops() {
    let pts: Vec<Point> = (0..20)
        .map(|i| Point::new((i % 5) as f64 * 10.0, (i / 5) as f64 * 10.0))
        .collect();
    let edges = build_edges(&pts, 25.0);
    assert!(!edges.is_empty());
    for e in &edges {
        assert!(e.from < e.to);
        assert!(e.opacity > 0.0 && e.opacity <= 0.8);
    }
    for w in edges.windows(2) {
        assert!((w[0].from, w[0].to) < (w[1].from, w[1].to));
    }
}

#[test]
fn complete_graph_when_threshold_is_large() {
    let pts: Vec<Point> = (0..10).map(|i| Point::new(i as f64, 0.0)).collect();
    assert_eq!(build_edges(&pts, 1e6).len(), 45);
}

#[test]
fn degenerate_inputs_yield_no_edges() {
    assert!(build_edges(&[], 100.0).is_empty());
    assert!(build_edges(&[Point::ZERO], 100.0).is_empty());
    assert!(build_edges(&[Point::ZERO, Point::ZERO], 0.0).is_empty());
    assert!(build_edges(&[Point::ZERO, Point::ZERO], f64::NAN).is_empty());
}
