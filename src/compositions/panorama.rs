use std::{f64::consts::TAU, fmt::Write as _};

use crate::{
    animation::interpolate::{InterpolateOpts, KeyframeTable},
    animation::periodic::Pulse,
    compositions::{Composition, CompositionId},
    foundation::core::{Affine, Color, FrameContext, Point, Timeline, Vec2},
    foundation::error::{FramewrightError, FramewrightResult},
    geometry::arc::fmt_num,
    procgen::seeded::{SEED_STRIDE, SeedStream},
    scene::model::{Fill, SceneGraph, SceneNode},
};

/// Fraction of the pan applied to the star layer.
pub const STAR_PARALLAX: f64 = 0.2;
/// Fraction of the pan applied to the far ridge.
pub const FAR_RIDGE_PARALLAX: f64 = 0.5;
/// Fraction of the pan applied to the near ridge.
pub const NEAR_RIDGE_PARALLAX: f64 = 1.0;
/// Upper bound on `star_count`.
pub const MAX_STARS: usize = 5_000;
/// Upper bound on total pan travel, in canvas widths.
pub const MAX_TRAVEL_WIDTHS: f64 = 64.0;
const RIDGE_STEP: f64 = 40.0;

/// Parameters of the `panorama` composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanoramaConfig {
    /// Multiplier on the distance panned over the timeline.
    pub pan_speed: f64,
    /// Scene width in canvas widths, at least 1.
    pub scene_width_factor: f64,
    /// Stars in the sky layer.
    pub star_count: usize,
    /// Seed for stars and ridges.
    pub seed: i64,
    /// Canvas fill.
    pub sky: Color,
    /// Star fill.
    pub star_color: Color,
    /// Far silhouette fill.
    pub far_ridge: Color,
    /// Near silhouette fill.
    pub near_ridge: Color,
}

impl Default for PanoramaConfig {
    fn default() -> Self {
        Self {
            pan_speed: 1.0,
            scene_width_factor: 3.0,
            star_count: 120,
            seed: 0,
            sky: Color::rgb(0x0f, 0x17, 0x2a),
            star_color: Color::rgb(0xfe, 0xf9, 0xc3),
            far_ridge: Color::rgb(0x1e, 0x29, 0x3b),
            near_ridge: Color::rgb(0x02, 0x06, 0x17),
        }
    }
}

impl PanoramaConfig {
    /// Non-negative speed, width factor >= 1, bounded travel and star count.
    pub fn validate(&self) -> FramewrightResult<()> {
        if !(self.pan_speed.is_finite() && self.pan_speed >= 0.0) {
            return Err(FramewrightError::config("pan_speed must be finite and >= 0"));
        }
        if !(self.scene_width_factor.is_finite() && self.scene_width_factor >= 1.0) {
            return Err(FramewrightError::config("scene_width_factor must be >= 1"));
        }
        let travel_widths = (self.scene_width_factor - 1.0) * self.pan_speed;
        if !(travel_widths <= MAX_TRAVEL_WIDTHS) {
            return Err(FramewrightError::config(format!(
                "pan travel (scene_width_factor - 1) * pan_speed must be <= {MAX_TRAVEL_WIDTHS} canvas widths, got {travel_widths}"
            )));
        }
        if self.star_count > MAX_STARS {
            return Err(FramewrightError::config(format!(
                "star_count must be <= {MAX_STARS}, got {}",
                self.star_count
            )));
        }
        Ok(())
    }
}

/// One star of the sky layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Position in layer space.
    pub position: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Opacity pulse.
    pub twinkle: Pulse,
}

/// Horizontally panning night landscape with parallax layers.
pub struct Panorama {
    config: PanoramaConfig,
    timeline: Timeline,
    pan: KeyframeTable<f64>,
    stars: Vec<Star>,
    far_ridge: String,
    near_ridge: String,
}

impl Panorama {
    /// Precompute the pan table, the star field and both ridge outlines.
    pub fn new(config: PanoramaConfig, timeline: Timeline) -> FramewrightResult<Self> {
        config.validate()?;
        timeline.validate()?;
        let w = f64::from(timeline.canvas.width);
        let h = f64::from(timeline.canvas.height);
        let travel = w * (config.scene_width_factor - 1.0) * config.pan_speed;
        let pan = KeyframeTable::new(
            vec![0.0, timeline.total_frames as f64],
            vec![0.0, -travel],
            InterpolateOpts::clamped(),
        )?;

        let star_w = w + travel * STAR_PARALLAX;
        let stars = (0..config.star_count)
            .map(|i| {
                let s = SeedStream::for_entity(config.seed, i);
                Star {
                    position: Point::new(s.range(1, 0.0, star_w), s.range(2, 0.0, h * 0.6)),
                    radius: s.range(3, 0.6, 2.2),
                    twinkle: Pulse::looping(1 + s.pick(4, 3) as u32, 0.35, 0.6)
                        .with_phase(s.range(5, 0.0, TAU)),
                }
            })
            .collect();

        let far_ridge = ridge_path(
            SeedStream::new(config.seed.wrapping_sub(SEED_STRIDE)),
            w + travel * FAR_RIDGE_PARALLAX,
            h,
            h * 0.62,
            h * 0.12,
        );
        let near_ridge = ridge_path(
            SeedStream::new(config.seed.wrapping_sub(2 * SEED_STRIDE)),
            w + travel * NEAR_RIDGE_PARALLAX,
            h,
            h * 0.78,
            h * 0.08,
        );

        tracing::debug!(stars = config.star_count, travel, "mounted panorama");
        Ok(Self {
            config,
            timeline,
            pan,
            stars,
            far_ridge,
            near_ridge,
        })
    }

    /// Horizontal camera offset at `frame`; zero at the start, then non-increasing.
    pub fn pan_offset(&self, frame: u64) -> f64 {
        self.pan.sample(frame as f64)
    }

    /// The generated star field.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    fn layer(&self, pan: f64, parallax: f64, children: Vec<SceneNode>) -> SceneNode {
        SceneNode::group(Affine::translate(Vec2::new(pan * parallax, 0.0)), children)
    }
}

/// Closed silhouette: layered sines sampled every `RIDGE_STEP` px, filled down to `bottom`.
fn ridge_path(s: SeedStream, width: f64, bottom: f64, base_y: f64, amplitude: f64) -> String {
    let waves = [
        (s.range(1, 0.002, 0.004), s.range(2, 0.0, TAU), 0.6),
        (s.range(3, 0.006, 0.012), s.range(4, 0.0, TAU), 0.3),
        (s.range(5, 0.02, 0.04), s.range(6, 0.0, TAU), 0.1),
    ];
    let steps = (width / RIDGE_STEP).ceil() as usize + 1;
    let mut d = format!("M 0 {}", fmt_num(bottom));
    for i in 0..=steps {
        let x = i as f64 * RIDGE_STEP;
        let y = base_y
            + amplitude
                * waves
                    .iter()
                    .map(|(freq, phase, weight)| weight * (x * freq + phase).sin())
                    .sum::<f64>();
        let _ = write!(d, " L {} {}", fmt_num(x), fmt_num(y));
    }
    let _ = write!(d, " L {} {} Z", fmt_num(steps as f64 * RIDGE_STEP), fmt_num(bottom));
    d
}

impl Composition for Panorama {
    fn id(&self) -> CompositionId {
        CompositionId::Panorama
    }

    fn timeline(&self) -> Timeline {
        self.timeline
    }

    fn render(&self, ctx: &FrameContext) -> SceneGraph {
        let cfg = &self.config;
        let mut scene = SceneGraph::new(ctx.canvas, cfg.sky);
        let pan = self.pan_offset(ctx.frame.0);

        let stars = self
            .stars
            .iter()
            .map(|star| {
                SceneNode::filled_circle(
                    star.position,
                    star.radius,
                    Fill::with_opacity(cfg.star_color, star.twinkle.sample(ctx)),
                )
            })
            .collect();
        scene.push(self.layer(pan, STAR_PARALLAX, stars));

        for (d, color, parallax) in [
            (&self.far_ridge, cfg.far_ridge, FAR_RIDGE_PARALLAX),
            (&self.near_ridge, cfg.near_ridge, NEAR_RIDGE_PARALLAX),
        ] {
            let ridge = SceneNode::Path {
                d: d.clone(),
                fill: Some(Fill::solid(color)),
                stroke: None,
            };
            scene.push(self.layer(pan, parallax, vec![ridge]));
        }
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/panorama.rs"]
mod tests;
