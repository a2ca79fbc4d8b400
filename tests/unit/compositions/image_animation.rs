use super::*;
use crate::foundation::core::{Canvas, FrameIndex, Fps, Point};

fn timeline(total: u64) -> Timeline {
    Timeline::new(
        total,
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 1920,
            height: 1080,
        },
    )
    .unwrap()
}

fn animation(preset: Preset) -> ImageAnimation {
    ImageAnimation::new(
        ImageAnimationConfig {
            image: "photo.jpg".to_owned(),
            preset,
            ..Default::default()
        },
        timeline(150),
    )
    .unwrap()
}

#[test]
fn ken_burns_follows_its_keyframes() {
    let a = animation(Preset::KenBurns);
    assert_eq!(
        a.camera(0),
        CameraState {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0
        }
    );
    let mid = a.camera(75);
    assert_eq!(mid.scale, 1.125);
    assert_eq!(mid.offset_x, -2.5);
    assert_eq!(mid.offset_y, -1.5);
    // The last rendered frame stops one frame short of the end values.
    let last = a.camera(149);
    assert!((last.scale - (1.0 + 0.25 * 149.0 / 150.0)).abs() < 1e-12);
    assert!(last.scale < 1.25);
}

#[test]
fn camera_clamps_outside_the_timeline() {
    let a = animation(Preset::ZoomOut);
    assert_eq!(a.camera(0).scale, 1.3);
    assert_eq!(a.camera(150).scale, 1.0);
    assert_eq!(a.camera(10_000).scale, 1.0);
}

#[test]
fn eased_presets_keep_their_endpoints() {
    let a = ImageAnimation::new(
        ImageAnimationConfig {
            image: "photo.jpg".to_owned(),
            preset: Preset::PanLeft,
            ease: Ease::InOutCubic,
            background: None,
        },
        timeline(150),
    )
    .unwrap();
    assert_eq!(a.camera(0).offset_x, 5.0);
    assert_eq!(a.camera(75).offset_x, 0.0);
    assert_eq!(a.camera(150).offset_x, -5.0);
    assert!(a.camera(15).offset_x > 5.0 - 10.0 * 0.1);
}

#[test]
fn transform_scales_about_the_canvas_center() {
    let camera = CameraState {
        scale: 2.0,
        offset_x: 10.0,
        offset_y: 0.0,
    };
    let size = Vec2::new(200.0, 100.0);
    let m = camera.transform(size).to_affine();
    let c = m * Point::new(100.0, 50.0);
    assert!((c.x - 120.0).abs() < 1e-9 && (c.y - 50.0).abs() < 1e-9, "{c:?}");
    let corner = m * Point::new(0.0, 0.0);
    assert!((corner.x - -80.0).abs() < 1e-9 && (corner.y - -50.0).abs() < 1e-9);
}

#[test]
fn missing_image_is_a_config_error() {
    let err = ImageAnimationConfig::default().validate().unwrap_err();
    assert!(err.is_config());
}

#[test]
fn render_places_one_full_canvas_image() {
    let a = animation(Preset::KenBurns);
    let scene = a.render(&timeline(150).at(FrameIndex(0)));
    assert_eq!(scene.image_hrefs(), ["photo.jpg"]);
    assert_eq!(scene.leaf_count(), 1);
    match &scene.nodes[0] {
        SceneNode::Group {
            transform,
            children,
            ..
        } => {
            assert_eq!(transform.as_coeffs(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
            assert!(matches!(
                &children[0],
                SceneNode::Image { rect, .. } if *rect == Rect::new(0.0, 0.0, 1920.0, 1080.0)
            ));
        }
        other => panic!("expected camera group, got {other:?}"),
    }
}

#[test]
fn image_href_is_declared_up_front() {
    assert_eq!(animation(Preset::PanUp).image_hrefs(), ["photo.jpg"]);
}
