use super::*;

fn spec(start: f64, end: f64, progress: f64) -> GaugeSpec {
    GaugeSpec {
        center: Point::new(200.0, 200.0),
        radius: 100.0,
        start_angle: start,
        end_angle: end,
        progress,
        tick_count: 12,
        stroke_width: 10.0,
    }
}

#[test]
fn background_flag_is_evaluated_on_full_span() {
    let g = arc_path(&spec(0.0, 200.0, 1.0), 0.0).unwrap();
    assert!(g.background.large_arc);
    let g = arc_path(&spec(0.0, 90.0, 1.0), 0.0).unwrap();
    assert!(!g.background.large_arc);
}

#[test]
fn progress_flag_is_evaluated_independently() {
    let g = spec(-135.0, 135.0, 0.5).geometry(0.0);
    assert!(g.background.large_arc);
    assert!(!g.progress.large_arc);
    assert!((g.progress_angle - 0.0).abs() < 1e-12);

    let g = spec(-135.0, 135.0, 0.9).geometry(0.0);
    assert!(g.progress.large_arc);
}

#[test]
fn progress_zero_is_a_point() {
    let g = spec(-120.0, 120.0, 0.0).geometry(0.0);
    assert!(g.progress.is_empty());
    assert!(!g.background.is_empty());
}

#[test]
fn ticks_cover_both_ends() {
    let s = spec(-120.0, 120.0, 0.5);
    let ticks = s.ticks(0.0);
    assert_eq!(ticks.len(), 13);
    assert_eq!(ticks[0].angle, -120.0);
    assert!((ticks[12].angle - 120.0).abs() < 1e-12);
    for t in &ticks {
        assert_eq!(t.major, t.index % 3 == 0);
        assert!(t.width > 0.0);
    }
}

#[test]
fn ticks_up_to_progress_are_active_and_pulse() {
    let s = spec(0.0, 240.0, 0.5);
    let ticks = s.ticks(std::f64::consts::FRAC_PI_2);
    for t in &ticks {
        let fraction = f64::from(t.index) / 12.0;
        assert_eq!(t.active, fraction <= 0.5);
        if t.active {
            assert!((t.opacity - 1.0).abs() < 1e-12);
        } else if t.major {
            assert_eq!(t.opacity, INACTIVE_MAJOR_OPACITY);
        } else {
            assert_eq!(t.opacity, INACTIVE_MINOR_OPACITY);
        }
    }
    let dimmed = s.ticks(-std::f64::consts::FRAC_PI_2);
    assert!((dimmed[0].opacity - 0.6).abs() < 1e-12);
}

#[test]
fn major_ticks_are_longer() {
    let ticks = spec(0.0, 90.0, 0.0).ticks(0.0);
    let len = |t: &Tick| (t.outer - t.inner).hypot();
    assert!(len(&ticks[0]) > len(&ticks[1]));
}

#[test]
fn degenerate_span_does_not_loop_or_divide() {
    let mut s = spec(30.0, 30.0, 0.7);
    let g = s.geometry(1.0);
    assert!(g.background.is_empty());
    assert!(g.progress.is_empty());
    assert_eq!(g.ticks.len(), 13);
    assert!(g.ticks.iter().all(|t| t.angle == 30.0));

    s.tick_count = 0;
    let g = s.geometry(1.0);
    assert_eq!(g.ticks.len(), 1);
    assert!(g.ticks[0].active);
}

#[test]
fn invalid_specs_are_configuration_errors() {
    assert!(arc_path(&spec(0.0, 90.0, 1.5), 0.0).unwrap_err().is_config());
    assert!(arc_path(&spec(0.0, 90.0, -0.1), 0.0).unwrap_err().is_config());
    let mut s = spec(0.0, 90.0, 0.5);
    s.radius = 0.0;
    assert!(arc_path(&s, 0.0).is_err());
    s.radius = 10.0;
    s.end_angle = f64::INFINITY;
    assert!(arc_path(&s, 0.0).is_err());
}
