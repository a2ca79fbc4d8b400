use super::*;

#[test]
fn every_preset_parses_by_name() {
    for p in Preset::ALL {
        assert_eq!(p.name().parse::<Preset>().unwrap(), p);
        assert_eq!(p.to_string(), p.name());
        assert!(!p.describe().is_empty());
    }
}

#[test]
fn unknown_preset_lists_valid_names() {
    let err = "spin".parse::<Preset>().unwrap_err();
    assert!(err.is_config());
    let msg = err.to_string();
    assert!(msg.contains("'spin'"));
    for p in Preset::ALL {
        assert!(msg.contains(p.name()), "{msg}");
    }
}

#[test]
fn ken_burns_is_the_default() {
    assert_eq!(Preset::default(), Preset::KenBurns);
    let m = Preset::KenBurns.motion();
    assert_eq!(m.scale, (1.0, 1.25));
    assert_eq!(m.offset_x, (0.0, -5.0));
    assert_eq!(m.offset_y, (0.0, -3.0));
}

#[test]
fn zooms_mirror_each_other() {
    let zin = Preset::ZoomIn.motion();
    let zout = Preset::ZoomOut.motion();
    assert_eq!(zin.scale, (1.0, 1.3));
    assert_eq!(zout.scale, (1.3, 1.0));
    assert_eq!(zin.offset_x, (0.0, 0.0));
    assert_eq!(zout.offset_y, (0.0, 0.0));
}

#[test]
fn pans_hold_scale_and_move_one_axis() {
    for (p, x, y) in [
        (Preset::PanLeft, (5.0, -5.0), (0.0, 0.0)),
        (Preset::PanRight, (-5.0, 5.0), (0.0, 0.0)),
        (Preset::PanUp, (0.0, 0.0), (5.0, -5.0)),
        (Preset::PanDown, (0.0, 0.0), (-5.0, 5.0)),
    ] {
        let m = p.motion();
        assert_eq!(m.scale, (1.15, 1.15), "{p}");
        assert_eq!(m.offset_x, x, "{p}");
        assert_eq!(m.offset_y, y, "{p}");
    }
}

#[test]
fn presets_deserialize_from_kebab_case() {
    let p: Preset = serde_json::from_value(serde_json::json!("pan-down")).unwrap();
    assert_eq!(p, Preset::PanDown);
    assert!(serde_json::from_value::<Preset>(serde_json::json!("PanDown")).is_err());
}
