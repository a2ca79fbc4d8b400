use super::*;
use crate::foundation::core::{Canvas, FrameIndex, Fps};

fn timeline(total: u64) -> Timeline {
    Timeline::new(
        total,
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 1280,
            height: 720,
        },
    )
    .unwrap()
}

fn panel() -> InstrumentPanel {
    InstrumentPanel::new(InstrumentPanelConfig::default(), timeline(150)).unwrap()
}

fn texts(scene: &SceneGraph) -> Vec<String> {
    fn walk(node: &SceneNode, out: &mut Vec<String>) {
        match node {
            SceneNode::Text { content, .. } => out.push(content.clone()),
            SceneNode::Group { children, .. } => children.iter().for_each(|c| walk(c, out)),
            _ => {}
        }
    }
    let mut out = Vec::new();
    scene.nodes.iter().for_each(|n| walk(n, &mut out));
    out
}

#[test]
fn clock_formats_and_wraps_at_midnight() {
    assert_eq!(format_clock(0), "00:00:00");
    assert_eq!(format_clock(36_000), "10:00:00");
    assert_eq!(format_clock(36_000 + 3_661), "11:01:01");
    assert_eq!(format_clock(86_399), "23:59:59");
    assert_eq!(format_clock(86_400), "00:00:00");
}

#[test]
fn clock_advances_with_whole_seconds() {
    let p = panel();
    let tl = timeline(150);
    assert_eq!(p.clock_at(&tl.at(FrameIndex(0))), "10:00:00");
    assert_eq!(p.clock_at(&tl.at(FrameIndex(45))), "10:00:01");
}

#[test]
fn levels_hit_keyframes_exactly() {
    let p = panel();
    let cpu = &InstrumentPanelConfig::default().channels[0].levels;
    assert_eq!(p.level(0, 0), Some(cpu[0]));
    // Five levels over 150 frames land on 0, 37.5, 75, 112.5, 150.
    assert_eq!(p.level(0, 75), Some(cpu[2]));
    assert_eq!(p.level(0, 150), Some(cpu[4]));
    assert_eq!(p.level(3, 0), None);
}

#[test]
fn levels_stay_clamped_past_the_timeline() {
    let p = panel();
    assert_eq!(p.level(1, 10_000), p.level(1, 150));
}

#[test]
fn config_rejects_bad_channels() {
    let empty = InstrumentPanelConfig {
        channels: Vec::new(),
        ..Default::default()
    };
    assert!(empty.validate().unwrap_err().is_config());

    let mut out_of_range = InstrumentPanelConfig::default();
    out_of_range.channels[1].levels[2] = 1.5;
    let msg = out_of_range.validate().unwrap_err().to_string();
    assert!(msg.contains("MEM"), "{msg}");

    let mut single = InstrumentPanelConfig::default();
    single.channels[0].levels.truncate(1);
    assert!(single.validate().is_err());

    let seven = InstrumentPanelConfig {
        channels: vec![InstrumentPanelConfig::default().channels[0].clone(); MAX_CHANNELS + 1],
        ..Default::default()
    };
    assert!(seven.validate().is_err());
}

#[test]
fn render_shows_clock_and_labels() {
    let p = panel();
    let scene = p.render(&timeline(150).at(FrameIndex(0)));
    let t = texts(&scene);
    assert_eq!(t[0], "10:00:00");
    for label in ["CPU", "MEM", "NET"] {
        assert!(t.iter().any(|s| s == label), "{label} missing from {t:?}");
    }
}

#[test]
fn hot_channel_uses_warning_color() {
    let cfg = InstrumentPanelConfig {
        channels: vec![ChannelConfig::new("HOT", &[0.95, 0.95])],
        ..Default::default()
    };
    let warning = cfg.warning;
    let p = InstrumentPanel::new(cfg, timeline(30)).unwrap();
    let scene = p.render(&timeline(30).at(FrameIndex(5)));
    let uses_warning = scene.nodes.iter().any(|n| {
        matches!(n, SceneNode::Path { stroke: Some(s), .. } if s.color == warning)
    });
    assert!(uses_warning);
}

#[test]
fn base_time_must_fall_within_one_day() {
    for base_time in [86_400, u64::MAX] {
        let cfg = InstrumentPanelConfig {
            base_time,
            ..Default::default()
        };
        let err = InstrumentPanel::new(cfg, timeline(150)).err().unwrap();
        assert!(err.is_config(), "{err}");
    }

    let cfg = InstrumentPanelConfig {
        base_time: 86_399,
        ..Default::default()
    };
    let late = InstrumentPanel::new(cfg, timeline(150)).unwrap();
    assert_eq!(late.clock_at(&timeline(150).at(FrameIndex(0))), "23:59:59");
    assert_eq!(late.clock_at(&timeline(150).at(FrameIndex(60))), "00:00:01");
}
