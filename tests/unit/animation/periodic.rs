use super::*;
use crate::foundation::core::{Canvas, Fps, FrameIndex, Timeline};

fn timeline(total: u64) -> Timeline {
    Timeline::new(
        total,
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 100,
            height: 100,
        },
    )
    .unwrap()
}

#[test]
fn looping_pulse_is_seamless() {
    let tl = timeline(90);
    let p = Pulse::looping(3, 0.2, 0.8).with_phase(1.1);
    assert_eq!(
        p.sample(&tl.at(FrameIndex(0))).to_bits(),
        p.sample(&tl.at(FrameIndex(90))).to_bits()
    );
}

#[test]
fn pulse_stays_within_amplitude() {
    let tl = timeline(120);
    let p = Pulse::looping(2, 0.2, 0.8);
    for f in 0..120 {
        let v = p.sample(&tl.at(FrameIndex(f)));
        assert!((0.6 - 1e-12..=1.0 + 1e-12).contains(&v));
    }
}

#[test]
fn hz_pulse_tracks_wall_clock() {
    let tl = timeline(300);
    let p = Pulse::at_hz(1.0, 1.0, 0.0);
    // Frame 7 sits just before the quarter-second peak.
    assert!(p.sample(&tl.at(FrameIndex(7))) > 0.99);
    assert!(p.sample(&tl.at(FrameIndex(30))).abs() < 1e-9);
}

#[test]
fn sampling_is_order_independent() {
    let tl = timeline(60);
    let p = Pulse::looping(1, 1.0, 0.0);
    let forward: Vec<u64> = (0..60)
        .map(|f| p.sample(&tl.at(FrameIndex(f))).to_bits())
        .collect();
    for f in (0..60).rev() {
        assert_eq!(p.sample(&tl.at(FrameIndex(f))).to_bits(), forward[f as usize]);
    }
}
