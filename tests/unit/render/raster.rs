use super::*;
use crate::foundation::core::{Canvas, Point};
use crate::scene::model::Fill;

fn rasterizer() -> Rasterizer {
    // No fonts needed for shape-only scenes.
    Rasterizer::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
}

fn canvas() -> Canvas {
    Canvas {
        width: 4,
        height: 4,
    }
}

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn solid_rect(rect: Rect, color: Color) -> SceneNode {
    SceneNode::Rect {
        rect,
        corner_radius: 0.0,
        fill: Fill::solid(color),
    }
}

#[test]
fn background_fills_every_pixel() {
    let scene = SceneGraph::new(canvas(), Color::rgb(255, 0, 0));
    let frame = rasterizer().render(&scene, &ImageStore::default()).unwrap();
    assert_eq!((frame.width, frame.height), (4, 4));
    assert!(frame.premultiplied);
    assert!(frame.data.chunks_exact(4).all(|p| p == [255, 0, 0, 255]));
}

#[test]
fn vector_nodes_are_painted_over_background() {
    let mut scene = SceneGraph::new(canvas(), Color::BLACK);
    scene.push(solid_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::rgb(0, 0, 255)));
    let frame = rasterizer().render(&scene, &ImageStore::default()).unwrap();
    assert_eq!(px(&frame, 2, 2), [0, 0, 255, 255]);
}

#[test]
fn group_transform_moves_children() {
    let mut scene = SceneGraph::new(canvas(), Color::BLACK);
    scene.push(SceneNode::group(
        Affine::translate((2.0, 0.0)),
        vec![solid_rect(Rect::new(0.0, 0.0, 2.0, 4.0), Color::WHITE)],
    ));
    let frame = rasterizer().render(&scene, &ImageStore::default()).unwrap();
    assert_eq!(px(&frame, 0, 1), [0, 0, 0, 255]);
    assert_eq!(px(&frame, 3, 1), [255, 255, 255, 255]);
}

#[test]
fn group_opacity_blends_with_background() {
    let mut scene = SceneGraph::new(canvas(), Color::BLACK);
    scene.push(SceneNode::Group {
        transform: Affine::IDENTITY,
        opacity: 0.5,
        children: vec![solid_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE)],
    });
    let frame = rasterizer().render(&scene, &ImageStore::default()).unwrap();
    let [r, _, _, a] = px(&frame, 1, 1);
    assert!((126..=130).contains(&r), "{r}");
    assert_eq!(a, 255);
}

#[test]
fn images_are_drawn_from_the_store() {
    let mut store = ImageStore::default();
    store.insert(
        "green",
        PreparedImage {
            width: 2,
            height: 2,
            rgba8_premul: Arc::new([0u8, 255, 0, 255].repeat(4)),
        },
    );
    let mut scene = SceneGraph::new(canvas(), Color::BLACK);
    scene.push(SceneNode::Image {
        href: "green".to_owned(),
        rect: Rect::new(0.0, 0.0, 4.0, 4.0),
        opacity: 1.0,
    });
    let frame = rasterizer().render(&scene, &store).unwrap();
    for (x, y) in [(0, 0), (1, 2), (3, 3)] {
        let [r, g, b, _] = px(&frame, x, y);
        assert!(r <= 5 && g >= 250 && b <= 5, "{:?}", px(&frame, x, y));
    }
}

#[test]
fn vectors_after_an_image_stay_on_top() {
    let mut store = ImageStore::default();
    store.insert(
        "green",
        PreparedImage {
            width: 1,
            height: 1,
            rgba8_premul: Arc::new(vec![0, 255, 0, 255]),
        },
    );
    let mut scene = SceneGraph::new(canvas(), Color::BLACK);
    scene.push(SceneNode::Image {
        href: "green".to_owned(),
        rect: Rect::new(0.0, 0.0, 4.0, 4.0),
        opacity: 1.0,
    });
    scene.push(SceneNode::filled_circle(
        Point::new(2.0, 2.0),
        10.0,
        Fill::solid(Color::rgb(255, 0, 0)),
    ));
    let frame = rasterizer().render(&scene, &store).unwrap();
    assert_eq!(px(&frame, 2, 2), [255, 0, 0, 255]);
}

#[test]
fn unprepared_image_is_a_render_error() {
    let mut scene = SceneGraph::new(canvas(), Color::BLACK);
    scene.push(SceneNode::Image {
        href: "missing".to_owned(),
        rect: Rect::new(0.0, 0.0, 4.0, 4.0),
        opacity: 1.0,
    });
    let err = rasterizer().render(&scene, &ImageStore::default()).unwrap_err();
    assert!(matches!(err, FramewrightError::Render(_)));
}

#[test]
fn straight_alpha_conversion_undoes_premultiplication() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![128, 0, 0, 128]);
    let straight = FrameRGBA {
        premultiplied: false,
        ..frame
    };
    assert_eq!(straight.to_straight_rgba8(), vec![64, 0, 0, 128]);
}

#[test]
fn save_png_writes_a_readable_file() {
    let path = std::env::temp_dir().join(format!("framewright_raster_{}.png", std::process::id()));
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 0, 255, 255],
        premultiplied: true,
    };
    frame.save_png(&path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.into_raw(), frame.data);
    std::fs::remove_file(&path).ok();
}

fn one_pixel(rgba: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: rgba.to_vec(),
        premultiplied,
    }
}

#[test]
fn flatten_composites_over_the_matte() {
    let mut out = vec![9u8; 16];
    // Half-transparent red, premultiplied and straight, over black.
    one_pixel([128, 0, 0, 128], true).flatten_onto(Color::BLACK, &mut out);
    assert_eq!(out, [128, 0, 0, 255]);
    one_pixel([255, 0, 0, 128], false).flatten_onto(Color::BLACK, &mut out);
    assert_eq!(out, [128, 0, 0, 255]);
    // Transparent shows the matte; opaque hides it.
    one_pixel([0, 0, 0, 0], true).flatten_onto(Color::rgb(10, 20, 30), &mut out);
    assert_eq!(out, [10, 20, 30, 255]);
    one_pixel([1, 2, 3, 255], true).flatten_onto(Color::WHITE, &mut out);
    assert_eq!(out, [1, 2, 3, 255]);
}
