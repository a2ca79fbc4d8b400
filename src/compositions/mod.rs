//! Concrete scenes: each composition turns a typed parameter bag plus a
//! [`FrameContext`] into a [`SceneGraph`].
//!
//! Mounting validates the configuration and precomputes everything that is
//! constant for the lifetime of the composition (entities, star fields,
//! keyframe tables). Rendering is then a pure function of the frame.

use std::{fmt, str::FromStr};

use serde::de::DeserializeOwned;

use crate::{
    foundation::core::{Affine, Color, FrameContext, FrameIndex, Point, Timeline},
    foundation::error::{FramewrightError, FramewrightResult},
    geometry::gauge::GaugeGeometry,
    geometry::rolling::rolling_digits,
    scene::model::{SceneGraph, SceneNode, Stroke, TextAnchor, TextStyle},
};

/// Still image under a preset camera move.
pub mod image_animation;
/// Row of gauges with a running clock.
pub mod instrument_panel;
/// Orbiting nodes joined by proximity edges.
pub mod node_network;
/// Parallax night landscape.
pub mod panorama;
/// Camera preset table.
pub mod presets;
/// Single dial with a rolling speed readout.
pub mod speedometer;

/// Registered composition names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositionId {
    /// `node-network`
    NodeNetwork,
    /// `instrument-panel`
    InstrumentPanel,
    /// `speedometer`
    Speedometer,
    /// `panorama`
    Panorama,
    /// `image-animation`
    ImageAnimation,
}

impl CompositionId {
    /// Every registered composition.
    pub const ALL: [Self; 5] = [
        Self::NodeNetwork,
        Self::InstrumentPanel,
        Self::Speedometer,
        Self::Panorama,
        Self::ImageAnimation,
    ];

    /// Kebab-case name used on the command line and in parameter files.
    pub fn name(self) -> &'static str {
        match self {
            Self::NodeNetwork => "node-network",
            Self::InstrumentPanel => "instrument-panel",
            Self::Speedometer => "speedometer",
            Self::Panorama => "panorama",
            Self::ImageAnimation => "image-animation",
        }
    }
}

impl fmt::Display for CompositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompositionId {
    type Err = FramewrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|id| id.name()).collect();
                FramewrightError::config(format!(
                    "unknown composition '{s}' (expected one of: {})",
                    names.join(", ")
                ))
            })
    }
}

/// A mounted composition. Holds only immutable, precomputed state.
pub trait Composition: Send + Sync {
    /// Registry name of this composition.
    fn id(&self) -> CompositionId;

    /// Timeline it was mounted with.
    fn timeline(&self) -> Timeline;

    /// Build the frame described by `ctx`. Must not depend on any earlier call.
    fn render(&self, ctx: &FrameContext) -> SceneGraph;

    /// Images referenced by any frame, for up-front decoding.
    fn image_hrefs(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Deserialize a composition parameter bag; `null` means all defaults.
pub fn parse_params<T>(params: &serde_json::Value) -> FramewrightResult<T>
where
    T: DeserializeOwned + Default,
{
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params.clone())
        .map_err(|e| FramewrightError::config(format!("invalid parameters: {e}")))
}

/// Validate `params` for `id` and precompute its static state.
#[tracing::instrument(skip(params))]
pub fn mount(
    id: CompositionId,
    timeline: Timeline,
    params: &serde_json::Value,
) -> FramewrightResult<Box<dyn Composition>> {
    timeline.validate()?;
    let comp: Box<dyn Composition> = match id {
        CompositionId::NodeNetwork => Box::new(node_network::NodeNetwork::new(
            parse_params(params)?,
            timeline,
        )?),
        CompositionId::InstrumentPanel => Box::new(instrument_panel::InstrumentPanel::new(
            parse_params(params)?,
            timeline,
        )?),
        CompositionId::Speedometer => Box::new(speedometer::Speedometer::new(
            parse_params(params)?,
            timeline,
        )?),
        CompositionId::Panorama => Box::new(panorama::Panorama::new(
            parse_params(params)?,
            timeline,
        )?),
        CompositionId::ImageAnimation => Box::new(image_animation::ImageAnimation::new(
            parse_params(params)?,
            timeline,
        )?),
    };
    Ok(comp)
}

/// Render one frame of an already mounted composition.
pub fn render_mounted(comp: &dyn Composition, frame: FrameIndex) -> FramewrightResult<SceneGraph> {
    let timeline = comp.timeline();
    if frame.0 >= timeline.total_frames {
        return Err(FramewrightError::evaluation(format!(
            "frame {} is out of bounds for a {}-frame timeline",
            frame.0, timeline.total_frames
        )));
    }
    Ok(comp.render(&timeline.at(frame)))
}

/// Engine entry point: mount `id` with `params` and render the frame in `ctx`.
///
/// Mounting is repeated per call; drivers rendering many frames should
/// [`mount`] once and call [`render_mounted`].
#[tracing::instrument(skip(params), fields(frame = ctx.frame.0))]
pub fn render_frame(
    id: CompositionId,
    ctx: &FrameContext,
    params: &serde_json::Value,
) -> FramewrightResult<SceneGraph> {
    let comp = mount(id, ctx.timeline(), params)?;
    render_mounted(comp.as_ref(), ctx.frame)
}

/// Odometer-style numeric readout centred on `center` (text baseline).
pub(crate) fn rolling_readout(
    center: Point,
    value: f64,
    digit_count: u32,
    style: &TextStyle,
) -> SceneNode {
    let rolls = rolling_digits(value, digit_count);
    let advance = style.size_px * 0.62;
    let cell = style.size_px * 1.1;
    let total_w = advance * rolls.len() as f64;
    let x0 = center.x - total_w * 0.5 + advance * 0.5;

    let mut children = Vec::new();
    for (i, roll) in rolls.iter().enumerate() {
        let x = x0 + advance * i as f64;
        let (out_dy, in_dy) = roll.offsets(cell);
        let base = style.clone().anchor(TextAnchor::Middle);
        children.push(SceneNode::text(
            Point::new(x, center.y + out_dy),
            roll.digit.to_string(),
            base.clone().opacity(style.opacity * (1.0 - roll.fraction)),
        ));
        if roll.fraction > 0.0 {
            children.push(SceneNode::text(
                Point::new(x, center.y + in_dy),
                roll.next.to_string(),
                base.opacity(style.opacity * roll.fraction),
            ));
        }
    }
    SceneNode::group(Affine::IDENTITY, children)
}

/// Colors used to draw a gauge.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GaugeColors {
    /// Background arc and inactive ticks.
    pub track: Color,
    /// Progress arc and active ticks.
    pub progress: Color,
}

/// Track, progress arc and ticks of one gauge, in painter's order.
pub(crate) fn gauge_nodes(geom: &GaugeGeometry, stroke_width: f64, colors: GaugeColors) -> Vec<SceneNode> {
    let mut nodes = vec![SceneNode::stroked_path(
        geom.background.descriptor.clone(),
        Stroke::new(colors.track, stroke_width).opacity(0.15).round(),
    )];
    if !geom.progress.is_empty() {
        nodes.push(SceneNode::stroked_path(
            geom.progress.descriptor.clone(),
            Stroke::new(colors.progress, stroke_width).round(),
        ));
    }
    for tick in &geom.ticks {
        let color = if tick.active {
            colors.progress
        } else {
            colors.track
        };
        nodes.push(SceneNode::Line {
            from: tick.inner,
            to: tick.outer,
            stroke: Stroke::new(color, tick.width).opacity(tick.opacity),
        });
    }
    nodes
}

#[cfg(test)]
#[path = "../../tests/unit/compositions/registry.rs"]
mod tests;
