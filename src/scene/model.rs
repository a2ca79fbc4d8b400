use crate::{
    foundation::core::{Affine, Canvas, Color, Point, Rect},
    foundation::math::Fnv1a64,
};

/// Fully evaluated frame: everything the raster backend needs, nothing more.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneGraph {
    /// Output size.
    pub canvas: Canvas,
    /// Opaque fill under every node.
    pub background: Color,
    /// Painter's order.
    pub nodes: Vec<SceneNode>,
}

/// Solid paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Fill {
    /// Paint color.
    pub color: Color,
    /// Multiplied into the color alpha.
    pub opacity: f64,
}

impl Fill {
    /// Fully opaque fill.
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    /// Fill with `opacity` clamped to `[0, 1]`.
    pub fn with_opacity(color: Color, opacity: f64) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }
}

/// Stroke end style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum LineCap {
    /// Flat, flush with the endpoint.
    #[default]
    Butt,
    /// Semicircle past the endpoint.
    Round,
}

/// Outline paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Stroke {
    /// Paint color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
    /// Multiplied into the color alpha.
    pub opacity: f64,
    /// End style.
    pub cap: LineCap,
}

impl Stroke {
    /// Opaque butt-capped stroke.
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            cap: LineCap::Butt,
        }
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Use round caps.
    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}

/// Horizontal alignment of a text run on its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum TextAnchor {
    /// Text begins at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Font and paint of a text run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextStyle {
    /// Font size.
    pub size_px: f64,
    /// Fill color.
    pub color: Color,
    /// Multiplied into the color alpha.
    pub opacity: f64,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// CSS font weight.
    pub weight: u16,
    /// Use the monospace family.
    pub monospace: bool,
}

impl TextStyle {
    /// Regular, start-anchored, opaque.
    pub fn new(size_px: f64, color: Color) -> Self {
        Self {
            size_px,
            color,
            opacity: 1.0,
            anchor: TextAnchor::Start,
            weight: 400,
            monospace: false,
        }
    }

    /// Set the anchor.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the weight.
    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    /// Switch to the monospace family.
    pub fn monospace(mut self) -> Self {
        self.monospace = true;
        self
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// One drawable, or a group of them.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    /// Filled axis-aligned rectangle.
    Rect {
        /// Bounds in canvas pixels.
        rect: Rect,
        /// Radius of rounded corners; 0 for square.
        corner_radius: f64,
        /// Paint.
        fill: Fill,
    },
    /// Circle with optional fill and outline.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Interior paint.
        fill: Option<Fill>,
        /// Outline paint.
        stroke: Option<Stroke>,
    },
    /// Straight segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Paint.
        stroke: Stroke,
    },
    /// Arbitrary SVG path.
    Path {
        /// SVG path data.
        d: String,
        /// Interior paint.
        fill: Option<Fill>,
        /// Outline paint.
        stroke: Option<Stroke>,
    },
    /// Single-line text run.
    Text {
        /// Baseline anchor point.
        position: Point,
        /// Text to draw.
        content: String,
        /// Font and paint.
        style: TextStyle,
    },
    /// Still image drawn into `rect`; `href` keys into the image store.
    Image {
        /// Image store key.
        href: String,
        /// Destination; the image covers it, centered and clipped.
        rect: Rect,
        /// Image opacity.
        opacity: f64,
    },
    /// Children drawn under a shared transform and opacity.
    Group {
        /// Applied to every child.
        transform: Affine,
        /// Multiplied into every child.
        opacity: f64,
        /// Painter's order.
        children: Vec<SceneNode>,
    },
}

impl SceneNode {
    /// Circle with a fill and no outline.
    pub fn filled_circle(center: Point, radius: f64, fill: Fill) -> Self {
        Self::Circle {
            center,
            radius,
            fill: Some(fill),
            stroke: None,
        }
    }

    /// Outlined path with no fill.
    pub fn stroked_path(d: impl Into<String>, stroke: Stroke) -> Self {
        Self::Path {
            d: d.into(),
            fill: None,
            stroke: Some(stroke),
        }
    }

    /// Single-line text run.
    pub fn text(position: Point, content: impl Into<String>, style: TextStyle) -> Self {
        Self::Text {
            position,
            content: content.into(),
            style,
        }
    }

    /// Fully opaque transformed group.
    pub fn group(transform: Affine, children: Vec<SceneNode>) -> Self {
        Self::Group {
            transform,
            opacity: 1.0,
            children,
        }
    }

    fn count_leaves(&self) -> usize {
        match self {
            Self::Group { children, .. } => children.iter().map(Self::count_leaves).sum(),
            _ => 1,
        }
    }

    fn collect_hrefs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Image { href, .. } => {
                if !out.contains(&href.as_str()) {
                    out.push(href);
                }
            }
            Self::Group { children, .. } => {
                for c in children {
                    c.collect_hrefs(out);
                }
            }
            _ => {}
        }
    }
}

impl SceneGraph {
    /// Empty graph.
    pub fn new(canvas: Canvas, background: Color) -> Self {
        Self {
            canvas,
            background,
            nodes: Vec::new(),
        }
    }

    /// Append on top of everything drawn so far.
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Drawable leaves, groups flattened.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().map(SceneNode::count_leaves).sum()
    }

    /// Distinct image hrefs in painter's order.
    pub fn image_hrefs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for n in &self.nodes {
            n.collect_hrefs(&mut out);
        }
        out
    }

    /// Stable 64-bit digest of the frame, for determinism checks.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        // to_vec only fails on non-string map keys; the model has none.
        match serde_json::to_vec(self) {
            Ok(bytes) => h.write_bytes(&bytes),
            Err(_) => h.write_bytes(format!("{self:?}").as_bytes()),
        }
        h.write_u64(self.nodes.len() as u64);
        h.finish()
    }

    /// Standalone SVG document of the frame.
    pub fn to_svg(&self) -> String {
        crate::scene::svg::write_svg(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
