use std::fmt::Write as _;

use crate::{
    foundation::core::{Affine, Canvas, Color},
    geometry::arc::fmt_num,
    scene::model::{Fill, LineCap, SceneGraph, SceneNode, Stroke, TextAnchor, TextStyle},
};

/// Serialize a whole frame as a standalone SVG document.
pub fn write_svg(scene: &SceneGraph) -> String {
    let mut body = String::new();
    for node in &scene.nodes {
        write_node(&mut body, node);
    }
    svg_document(scene.canvas, Some(scene.background), &body)
}

pub(crate) fn svg_document(canvas: Canvas, background: Option<Color>, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 256);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    if let Some(bg) = background {
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"{}/>"#,
            canvas.width,
            canvas.height,
            bg.svg_rgb(),
            opacity_attr("fill-opacity", bg.alpha_f64()),
        );
    }
    out.push_str(body);
    out.push_str("</svg>");
    out
}

pub(crate) fn write_node(out: &mut String, node: &SceneNode) {
    match node {
        SceneNode::Rect {
            rect,
            corner_radius,
            fill,
        } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                fmt_num(rect.x0),
                fmt_num(rect.y0),
                fmt_num(rect.width()),
                fmt_num(rect.height()),
            );
            if *corner_radius > 0.0 {
                let _ = write!(out, r#" rx="{}""#, fmt_num(*corner_radius));
            }
            write_paint(out, Some(fill), None);
            out.push_str("/>");
        }
        SceneNode::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(radius.max(0.0)),
            );
            write_paint(out, fill.as_ref(), stroke.as_ref());
            out.push_str("/>");
        }
        SceneNode::Line { from, to, stroke } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                fmt_num(from.x),
                fmt_num(from.y),
                fmt_num(to.x),
                fmt_num(to.y),
            );
            write_paint(out, None, Some(stroke));
            out.push_str("/>");
        }
        SceneNode::Path { d, fill, stroke } => {
            let _ = write!(out, r#"<path d="{}""#, escape(d));
            write_paint(out, fill.as_ref(), stroke.as_ref());
            out.push_str("/>");
        }
        SceneNode::Text {
            position,
            content,
            style,
        } => {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}""#,
                fmt_num(position.x),
                fmt_num(position.y)
            );
            write_text_style(out, style);
            let _ = write!(out, ">{}</text>", escape(content));
        }
        SceneNode::Image {
            href,
            rect,
            opacity,
        } => {
            let _ = write!(
                out,
                r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" xlink:href="{}"{}/>"#,
                fmt_num(rect.x0),
                fmt_num(rect.y0),
                fmt_num(rect.width()),
                fmt_num(rect.height()),
                escape(href),
                opacity_attr("opacity", *opacity),
            );
        }
        SceneNode::Group {
            transform,
            opacity,
            children,
        } => {
            out.push_str("<g");
            if *transform != Affine::IDENTITY {
                let _ = write!(out, r#" transform="{}""#, matrix_attr(*transform));
            }
            out.push_str(&opacity_attr("opacity", *opacity));
            out.push('>');
            for c in children {
                write_node(out, c);
            }
            out.push_str("</g>");
        }
    }
}

pub(crate) fn matrix_attr(t: Affine) -> String {
    let [a, b, c, d, e, f] = t.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_coeff(a),
        fmt_coeff(b),
        fmt_coeff(c),
        fmt_coeff(d),
        fmt_num(e),
        fmt_num(f)
    )
}

// Scale terms need more precision than pixel positions.
fn fmt_coeff(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

pub(crate) fn opacity_attr(name: &str, opacity: f64) -> String {
    let o = opacity.clamp(0.0, 1.0);
    if o >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, fmt_num(o))
    }
}

fn write_paint(out: &mut String, fill: Option<&Fill>, stroke: Option<&Stroke>) {
    match fill {
        Some(f) => {
            let _ = write!(out, r#" fill="{}""#, f.color.svg_rgb());
            out.push_str(&opacity_attr("fill-opacity", f.opacity * f.color.alpha_f64()));
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(s) = stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            s.color.svg_rgb(),
            fmt_num(s.width)
        );
        out.push_str(&opacity_attr("stroke-opacity", s.opacity * s.color.alpha_f64()));
        if s.cap == LineCap::Round {
            out.push_str(r#" stroke-linecap="round""#);
        }
    }
}

fn write_text_style(out: &mut String, style: &TextStyle) {
    let family = if style.monospace {
        "DejaVu Sans Mono, Menlo, Consolas, monospace"
    } else {
        "Inter, DejaVu Sans, Helvetica, Arial, sans-serif"
    };
    let anchor = match style.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        r#" font-family="{}" font-size="{}" font-weight="{}" text-anchor="{}" fill="{}""#,
        family,
        fmt_num(style.size_px),
        style.weight,
        anchor,
        style.color.svg_rgb(),
    );
    out.push_str(&opacity_attr(
        "fill-opacity",
        style.opacity * style.color.alpha_f64(),
    ));
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
