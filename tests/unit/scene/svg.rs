use super::*;
use crate::{
    foundation::core::{Point, Rect},
    scene::model::SceneGraph,
};

fn canvas() -> Canvas {
    Canvas {
        width: 100,
        height: 50,
    }
}

#[test]
fn document_carries_canvas_and_background() {
    let svg = SceneGraph::new(canvas(), Color::rgb(1, 2, 3)).to_svg();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"width="100" height="50""#));
    assert!(svg.contains(r#"fill="rgb(1,2,3)""#));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn leaves_serialize_with_paint() {
    let mut s = SceneGraph::new(canvas(), Color::BLACK);
    s.push(SceneNode::Circle {
        center: Point::new(10.0, 20.0),
        radius: 5.0,
        fill: Some(Fill::with_opacity(Color::WHITE, 0.5)),
        stroke: None,
    });
    s.push(SceneNode::Line {
        from: Point::new(0.0, 0.0),
        to: Point::new(10.5, 0.0),
        stroke: Stroke::new(Color::rgb(255, 0, 0), 2.0).opacity(0.25).round(),
    });
    s.push(SceneNode::stroked_path("M 0 0 A 5 5 0 0 1 5 5", Stroke::new(Color::WHITE, 3.0)));
    let svg = s.to_svg();
    assert!(svg.contains(r#"<circle cx="10" cy="20" r="5" fill="rgb(255,255,255)" fill-opacity="0.5"/>"#));
    assert!(svg.contains(r#"x2="10.5""#));
    assert!(svg.contains(r#"stroke-opacity="0.25""#));
    assert!(svg.contains(r#"stroke-linecap="round""#));
    assert!(svg.contains(r#"<path d="M 0 0 A 5 5 0 0 1 5 5" fill="none""#));
}

#[test]
fn text_is_escaped() {
    let mut s = SceneGraph::new(canvas(), Color::BLACK);
    s.push(SceneNode::text(
        Point::new(1.0, 2.0),
        "a<b & \"c\"",
        TextStyle::new(10.0, Color::WHITE).anchor(TextAnchor::Middle),
    ));
    let svg = s.to_svg();
    assert!(svg.contains("a&lt;b &amp; &quot;c&quot;</text>"));
    assert!(svg.contains(r#"text-anchor="middle""#));
}

#[test]
fn groups_emit_transform_and_opacity() {
    let mut s = SceneGraph::new(canvas(), Color::BLACK);
    s.push(SceneNode::Group {
        transform: Affine::translate((3.0, 4.0)),
        opacity: 0.5,
        children: vec![SceneNode::Image {
            href: "img.png".to_string(),
            rect: Rect::new(0.0, 0.0, 100.0, 50.0),
            opacity: 1.0,
        }],
    });
    let svg = s.to_svg();
    assert!(svg.contains(r#"<g transform="matrix(1 0 0 1 3 4)" opacity="0.5">"#));
    assert!(svg.contains(r#"xlink:href="img.png""#));
}

#[test]
fn identity_group_has_no_transform_attr() {
    let mut out = String::new();
    write_node(&mut out, &SceneNode::group(Affine::IDENTITY, vec![]));
    assert_eq!(out, "<g></g>");
}
