use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOpts, KeyframeTable},
    compositions::{Composition, CompositionId, GaugeColors, gauge_nodes, rolling_readout},
    foundation::core::{Color, FrameContext, Point, Timeline},
    foundation::error::{FramewrightError, FramewrightResult},
    geometry::gauge::GaugeSpec,
    scene::model::{SceneGraph, SceneNode, TextAnchor, TextStyle},
};

/// Most gauges one panel lays out.
pub const MAX_CHANNELS: usize = 6;
const SECONDS_PER_DAY: u64 = 86_400;
const GAUGE_START: f64 = -120.0;
const GAUGE_END: f64 = 120.0;
const GAUGE_TICKS: u32 = 24;
/// Channels above this level switch to the warning color.
const WARNING_LEVEL: f64 = 0.8;

/// One gauge: levels in `[0, 1]`, spread evenly across the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// Caption under the gauge.
    pub label: String,
    /// At least two levels in `[0, 1]`.
    pub levels: Vec<f64>,
}

impl ChannelConfig {
    fn new(label: &str, levels: &[f64]) -> Self {
        Self {
            label: label.to_owned(),
            levels: levels.to_vec(),
        }
    }
}

/// Parameters of the `instrument-panel` composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstrumentPanelConfig {
    /// Clock start, seconds since midnight.
    pub base_time: u64,
    /// Progress arc and active ticks.
    pub accent: Color,
    /// Replaces the accent above 80 %.
    pub warning: Color,
    /// Readouts and labels.
    pub foreground: Color,
    /// Canvas fill.
    pub background: Color,
    /// Easing between channel levels.
    pub ease: Ease,
    /// One gauge per channel, 1 to 6.
    pub channels: Vec<ChannelConfig>,
}

impl Default for InstrumentPanelConfig {
    fn default() -> Self {
        Self {
            base_time: 36_000,
            accent: Color::rgb(0x22, 0xd3, 0xee),
            warning: Color::rgb(0xf9, 0x73, 0x16),
            foreground: Color::rgb(0xe2, 0xe8, 0xf0),
            background: Color::rgb(0x0a, 0x0f, 0x1a),
            ease: Ease::InOutCubic,
            channels: vec![
                ChannelConfig::new("CPU", &[0.2, 0.65, 0.4, 0.85, 0.2]),
                ChannelConfig::new("MEM", &[0.45, 0.5, 0.7, 0.6, 0.45]),
                ChannelConfig::new("NET", &[0.1, 0.9, 0.3, 0.7, 0.1]),
            ],
        }
    }
}

impl InstrumentPanelConfig {
    /// Checks the clock start, channel count, levels and ease.
    pub fn validate(&self) -> FramewrightResult<()> {
        if self.base_time >= SECONDS_PER_DAY {
            return Err(FramewrightError::config(format!(
                "base_time is seconds since midnight and must be < {SECONDS_PER_DAY}, got {}",
                self.base_time
            )));
        }
        if self.channels.is_empty() || self.channels.len() > MAX_CHANNELS {
            return Err(FramewrightError::config(format!(
                "instrument panel needs 1..={MAX_CHANNELS} channels, got {}",
                self.channels.len()
            )));
        }
        for ch in &self.channels {
            if ch.levels.len() < 2 {
                return Err(FramewrightError::config(format!(
                    "channel '{}' needs at least 2 levels",
                    ch.label
                )));
            }
            if let Some(bad) = ch.levels.iter().find(|v| !(0.0..=1.0).contains(*v)) {
                return Err(FramewrightError::config(format!(
                    "channel '{}' level {bad} is outside [0, 1]",
                    ch.label
                )));
            }
        }
        self.ease.validate()
    }
}

/// `HH:MM:SS` for a count of seconds since midnight; wraps at 24h.
pub fn format_clock(seconds: u64) -> String {
    let s = seconds % SECONDS_PER_DAY;
    format!("{:02}:{:02}:{:02}", s / 3600, (s / 60) % 60, s % 60)
}

struct Channel {
    label: String,
    level: KeyframeTable<f64>,
}

/// Row of arc gauges under a running clock.
pub struct InstrumentPanel {
    config: InstrumentPanelConfig,
    timeline: Timeline,
    channels: Vec<Channel>,
}

impl InstrumentPanel {
    /// Builds one clamped level table per channel.
    pub fn new(config: InstrumentPanelConfig, timeline: Timeline) -> FramewrightResult<Self> {
        config.validate()?;
        timeline.validate()?;
        let total = timeline.total_frames as f64;
        let opts = InterpolateOpts::clamped().with_ease(config.ease);
        let channels = config
            .channels
            .iter()
            .map(|ch| {
                let last = (ch.levels.len() - 1) as f64;
                let input = (0..ch.levels.len())
                    .map(|i| total * i as f64 / last)
                    .collect();
                Ok(Channel {
                    label: ch.label.clone(),
                    level: KeyframeTable::new(input, ch.levels.clone(), opts)?,
                })
            })
            .collect::<FramewrightResult<Vec<_>>>()?;
        Ok(Self {
            config,
            timeline,
            channels,
        })
    }

    /// Level of channel `index` at `frame`, or `None` for an unknown channel.
    pub fn level(&self, index: usize, frame: u64) -> Option<f64> {
        self.channels
            .get(index)
            .map(|ch| ch.level.sample(frame as f64).clamp(0.0, 1.0))
    }

    /// Clock text at `ctx`: base time plus elapsed whole seconds.
    pub fn clock_at(&self, ctx: &FrameContext) -> String {
        let elapsed = ctx.seconds().floor() as u64 % SECONDS_PER_DAY;
        format_clock(self.config.base_time % SECONDS_PER_DAY + elapsed)
    }

    fn gauge_spec(&self, index: usize, progress: f64) -> GaugeSpec {
        let canvas = self.timeline.canvas;
        let cell_w = f64::from(canvas.width) / self.channels.len() as f64;
        let h = f64::from(canvas.height);
        let radius = (cell_w * 0.35).min(h * 0.3);
        GaugeSpec {
            center: Point::new(cell_w * (index as f64 + 0.5), h * 0.55),
            radius,
            start_angle: GAUGE_START,
            end_angle: GAUGE_END,
            progress,
            tick_count: GAUGE_TICKS,
            stroke_width: radius * 0.08,
        }
    }
}

impl Composition for InstrumentPanel {
    fn id(&self) -> CompositionId {
        CompositionId::InstrumentPanel
    }

    fn timeline(&self) -> Timeline {
        self.timeline
    }

    fn render(&self, ctx: &FrameContext) -> SceneGraph {
        let cfg = &self.config;
        let mut scene = SceneGraph::new(ctx.canvas, cfg.background);
        let h = f64::from(ctx.canvas.height);
        let pulse_phase = ctx.loop_phase() * 4.0;

        scene.push(SceneNode::text(
            Point::new(ctx.canvas.center().x, h * 0.14),
            self.clock_at(ctx),
            TextStyle::new(h * 0.07, cfg.foreground)
                .anchor(TextAnchor::Middle)
                .monospace()
                .weight(600),
        ));

        for (i, ch) in self.channels.iter().enumerate() {
            let progress = self.level(i, ctx.frame.0).unwrap_or(0.0);
            let spec = self.gauge_spec(i, progress);
            let colors = GaugeColors {
                track: cfg.foreground,
                progress: if progress > WARNING_LEVEL {
                    cfg.warning
                } else {
                    cfg.accent
                },
            };
            for node in gauge_nodes(&spec.geometry(pulse_phase), spec.stroke_width, colors) {
                scene.push(node);
            }

            let digit_size = spec.radius * 0.35;
            scene.push(rolling_readout(
                Point::new(spec.center.x, spec.center.y + digit_size * 0.35),
                progress * 100.0,
                3,
                &TextStyle::new(digit_size, cfg.foreground).monospace().weight(700),
            ));
            scene.push(SceneNode::text(
                Point::new(spec.center.x, spec.center.y + spec.radius * 0.55),
                ch.label.clone(),
                TextStyle::new(spec.radius * 0.14, cfg.foreground)
                    .anchor(TextAnchor::Middle)
                    .opacity(0.7),
            ));
        }
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/instrument_panel.rs"]
mod tests;
