use std::{path::Path, sync::Arc};

use anyhow::Context;
use resvg::tiny_skia;

use crate::{
    assets::store::{ImageStore, PreparedImage},
    foundation::core::{Affine, Color, Rect, Vec2},
    foundation::error::{FramewrightError, FramewrightResult},
    foundation::math::{mul_div255_u8, unpremultiply_rgba8_in_place},
    scene::model::{SceneGraph, SceneNode},
    scene::svg::{matrix_attr, opacity_attr, svg_document, write_node},
};

/// One rendered frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Pixels per row.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Row-major RGBA8.
    pub data: Vec<u8>,
    /// Color channels are scaled by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image files expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Composite over an opaque `matte` into `out` (cleared first); every
    /// output pixel has alpha 255. The matte's own alpha is ignored.
    pub fn flatten_onto(&self, matte: Color, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.data.len());
        for px in self.data.chunks_exact(4) {
            let a = u16::from(px[3]);
            let channel = |fg: u8, bg: u8| {
                let fg = if self.premultiplied {
                    fg
                } else {
                    mul_div255_u8(u16::from(fg), a)
                };
                fg.saturating_add(mul_div255_u8(u16::from(bg), 255 - a))
            };
            out.extend_from_slice(&[
                channel(px[0], matte.r),
                channel(px[1], matte.g),
                channel(px[2], matte.b),
                255,
            ]);
        }
    }

    /// Write a straight-alpha PNG.
    pub fn save_png(&self, path: &Path) -> FramewrightResult<()> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| FramewrightError::render("frame buffer does not match its dimensions"))?;
        img.save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Scene graph to pixels. Vector content goes through SVG and `resvg`; still
/// images are composited directly with `tiny-skia`.
///
/// Holds only immutable state and can be shared across render threads.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Leaf node with its accumulated transform and opacity.
struct Placed<'a> {
    node: &'a SceneNode,
    transform: Affine,
    opacity: f64,
}

impl Rasterizer {
    /// Rasterizer backed by the system font database.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::with_fontdb(Arc::new(db))
    }

    /// Rasterizer over a caller-supplied font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Render `scene` into premultiplied RGBA8. Every image href must be in `images`.
    pub fn render(&self, scene: &SceneGraph, images: &ImageStore) -> FramewrightResult<FrameRGBA> {
        let (w, h) = (scene.canvas.width, scene.canvas.height);
        let mut pixmap = tiny_skia::Pixmap::new(w, h).ok_or_else(|| {
            FramewrightError::render(format!("failed to allocate {w}x{h} pixmap"))
        })?;
        pixmap.fill(to_skia_color(scene.background));

        let mut leaves = Vec::new();
        for node in &scene.nodes {
            flatten(node, Affine::IDENTITY, 1.0, &mut leaves);
        }

        let mut run = String::new();
        for placed in leaves {
            match placed.node {
                SceneNode::Image {
                    href,
                    rect,
                    opacity,
                } => {
                    self.flush_vectors(scene, &mut run, &mut pixmap)?;
                    draw_image(
                        &mut pixmap,
                        images.get(href)?,
                        *rect,
                        placed.transform,
                        placed.opacity * opacity,
                    )?;
                }
                node => push_vector(&mut run, node, placed.transform, placed.opacity),
            }
        }
        self.flush_vectors(scene, &mut run, &mut pixmap)?;

        Ok(FrameRGBA {
            width: w,
            height: h,
            data: pixmap.take(),
            premultiplied: true,
        })
    }

    fn flush_vectors(
        &self,
        scene: &SceneGraph,
        run: &mut String,
        pixmap: &mut tiny_skia::Pixmap,
    ) -> FramewrightResult<()> {
        if run.is_empty() {
            return Ok(());
        }
        let doc = svg_document(scene.canvas, None, run);
        run.clear();

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(doc.as_bytes(), &opts)
            .map_err(|e| FramewrightError::render(format!("scene svg rejected: {e}")))?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
        Ok(())
    }
}

fn flatten<'a>(node: &'a SceneNode, transform: Affine, opacity: f64, out: &mut Vec<Placed<'a>>) {
    match node {
        SceneNode::Group {
            transform: local,
            opacity: group_opacity,
            children,
        } => {
            let t = transform * *local;
            let o = opacity * group_opacity.clamp(0.0, 1.0);
            for child in children {
                flatten(child, t, o, out);
            }
        }
        leaf => out.push(Placed {
            node: leaf,
            transform,
            opacity,
        }),
    }
}

fn push_vector(run: &mut String, node: &SceneNode, transform: Affine, opacity: f64) {
    if transform == Affine::IDENTITY && opacity >= 1.0 {
        write_node(run, node);
        return;
    }
    run.push_str("<g");
    if transform != Affine::IDENTITY {
        run.push_str(&format!(r#" transform="{}""#, matrix_attr(transform)));
    }
    run.push_str(&opacity_attr("opacity", opacity));
    run.push('>');
    write_node(run, node);
    run.push_str("</g>");
}

/// Draw `image` covering `rect` (centered, aspect preserved, cropped to `rect`).
fn draw_image(
    pixmap: &mut tiny_skia::Pixmap,
    image: &PreparedImage,
    rect: Rect,
    transform: Affine,
    opacity: f64,
) -> FramewrightResult<()> {
    if image.width == 0 || image.height == 0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Ok(());
    }
    let size = tiny_skia::IntSize::from_wh(image.width, image.height)
        .ok_or_else(|| FramewrightError::render("image has invalid dimensions"))?;
    let src = tiny_skia::Pixmap::from_vec(image.rgba8_premul.as_ref().clone(), size)
        .ok_or_else(|| FramewrightError::render("prepared image byte length mismatch"))?;

    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    let scale = (rect.width() / iw).max(rect.height() / ih);
    let offset = Vec2::new(
        rect.x0 + (rect.width() - iw * scale) * 0.5,
        rect.y0 + (rect.height() - ih * scale) * 0.5,
    );
    let image_to_canvas = transform * Affine::translate(offset) * Affine::scale(scale);

    let mut clip = tiny_skia::Mask::new(pixmap.width(), pixmap.height())
        .ok_or_else(|| FramewrightError::render("failed to allocate clip mask"))?;
    let clip_rect = tiny_skia::Rect::from_ltrb(
        rect.x0 as f32,
        rect.y0 as f32,
        rect.x1 as f32,
        rect.y1 as f32,
    )
    .ok_or_else(|| FramewrightError::render("image rect is not finite"))?;
    clip.fill_path(
        &tiny_skia::PathBuilder::from_rect(clip_rect),
        tiny_skia::FillRule::Winding,
        true,
        to_skia_transform(transform),
    );

    let paint = tiny_skia::PixmapPaint {
        opacity: opacity.clamp(0.0, 1.0) as f32,
        quality: tiny_skia::FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(
        0,
        0,
        src.as_ref(),
        &paint,
        to_skia_transform(image_to_canvas),
        Some(&clip),
    );
    Ok(())
}

fn to_skia_transform(t: Affine) -> tiny_skia::Transform {
    let [a, b, c, d, e, f] = t.as_coeffs();
    tiny_skia::Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
