use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOpts, KeyframeTable},
    compositions::{Composition, CompositionId, GaugeColors, gauge_nodes, rolling_readout},
    foundation::core::{Color, FrameContext, Point, Timeline},
    foundation::error::{FramewrightError, FramewrightResult},
    geometry::gauge::GaugeSpec,
    scene::model::{SceneGraph, SceneNode, TextAnchor, TextStyle},
};

const DIAL_START: f64 = -135.0;
const DIAL_END: f64 = 135.0;
/// Upper bound on `tick_count`.
pub const MAX_TICKS: u32 = 360;

/// Parameters of the `speedometer` composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeedometerConfig {
    /// Speed at full deflection.
    pub max_speed: f64,
    /// Ticks around the 270° dial.
    pub tick_count: u32,
    /// Label under the readout.
    pub unit: String,
    /// Speed as a fraction of `max_speed`, spread evenly across the timeline.
    pub profile: Vec<f64>,
    /// Easing between profile keyframes.
    pub ease: Ease,
    /// Progress arc and active ticks.
    pub accent: Color,
    /// Readout and inactive ticks.
    pub foreground: Color,
    /// Canvas fill.
    pub background: Color,
}

impl Default for SpeedometerConfig {
    fn default() -> Self {
        Self {
            max_speed: 240.0,
            tick_count: 24,
            unit: "km/h".to_owned(),
            profile: vec![0.0, 0.35, 0.8, 0.6, 0.95, 0.0],
            ease: Ease::InOutCubic,
            accent: Color::rgb(0xef, 0x44, 0x44),
            foreground: Color::rgb(0xf8, 0xfa, 0xfc),
            background: Color::rgb(0x09, 0x09, 0x0b),
        }
    }
}

impl SpeedometerConfig {
    /// Positive finite `max_speed`, bounded ticks, at least two profile points in `[0, 1]`.
    pub fn validate(&self) -> FramewrightResult<()> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(FramewrightError::config("max_speed must be > 0"));
        }
        if self.tick_count == 0 || self.tick_count > MAX_TICKS {
            return Err(FramewrightError::config(format!(
                "tick_count must be within 1..={MAX_TICKS}, got {}",
                self.tick_count
            )));
        }
        if self.profile.len() < 2 {
            return Err(FramewrightError::config(
                "speed profile needs at least 2 points",
            ));
        }
        if let Some(bad) = self.profile.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(FramewrightError::config(format!(
                "speed profile value {bad} is outside [0, 1]"
            )));
        }
        self.ease.validate()
    }

    /// Readout width: enough digits for `max_speed`.
    pub fn digit_count(&self) -> u32 {
        (self.max_speed.log10().floor().max(0.0) as u32) + 1
    }
}

/// Single 270° dial with a rolling speed readout.
pub struct Speedometer {
    config: SpeedometerConfig,
    timeline: Timeline,
    profile: KeyframeTable<f64>,
}

impl Speedometer {
    /// Builds the speed profile table over the timeline.
    pub fn new(config: SpeedometerConfig, timeline: Timeline) -> FramewrightResult<Self> {
        config.validate()?;
        timeline.validate()?;
        let total = timeline.total_frames as f64;
        let last = (config.profile.len() - 1) as f64;
        let input = (0..config.profile.len())
            .map(|i| total * i as f64 / last)
            .collect();
        let profile = KeyframeTable::new(
            input,
            config.profile.clone(),
            InterpolateOpts::clamped().with_ease(config.ease),
        )?;
        Ok(Self {
            config,
            timeline,
            profile,
        })
    }

    /// Needle position in `[0, 1]` at `frame`.
    pub fn progress(&self, frame: u64) -> f64 {
        self.profile.sample(frame as f64).clamp(0.0, 1.0)
    }

    /// Speed in `unit` at `frame`.
    pub fn speed(&self, frame: u64) -> f64 {
        self.progress(frame) * self.config.max_speed
    }

    /// Dial geometry for a needle at `progress`.
    pub fn gauge_spec(&self, progress: f64) -> GaugeSpec {
        let canvas = self.timeline.canvas;
        let radius = f64::from(canvas.width.min(canvas.height)) * 0.38;
        GaugeSpec {
            center: canvas.center(),
            radius,
            start_angle: DIAL_START,
            end_angle: DIAL_END,
            progress,
            tick_count: self.config.tick_count,
            stroke_width: radius * 0.06,
        }
    }
}

impl Composition for Speedometer {
    fn id(&self) -> CompositionId {
        CompositionId::Speedometer
    }

    fn timeline(&self) -> Timeline {
        self.timeline
    }

    fn render(&self, ctx: &FrameContext) -> SceneGraph {
        let cfg = &self.config;
        let mut scene = SceneGraph::new(ctx.canvas, cfg.background);
        let progress = self.progress(ctx.frame.0);
        let spec = self.gauge_spec(progress);
        let geom = spec.geometry(ctx.loop_phase() * 6.0);

        for node in gauge_nodes(
            &geom,
            spec.stroke_width,
            GaugeColors {
                track: cfg.foreground,
                progress: cfg.accent,
            },
        ) {
            scene.push(node);
        }

        let digit_size = spec.radius * 0.32;
        scene.push(rolling_readout(
            Point::new(spec.center.x, spec.center.y + digit_size * 0.35),
            self.speed(ctx.frame.0),
            cfg.digit_count(),
            &TextStyle::new(digit_size, cfg.foreground).monospace().weight(700),
        ));
        scene.push(SceneNode::text(
            Point::new(spec.center.x, spec.center.y + spec.radius * 0.45),
            cfg.unit.clone(),
            TextStyle::new(spec.radius * 0.1, cfg.foreground)
                .anchor(TextAnchor::Middle)
                .opacity(0.6),
        ));
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/speedometer.rs"]
mod tests;
