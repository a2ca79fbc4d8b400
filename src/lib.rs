//! Framewright is a deterministic procedural scene engine for short looping videos.
//!
//! Every frame is a pure function of `(composition, parameters, frame index)`:
//! no per-frame mutable state, no wall-clock input, no global random source.
//! That lets frames render out of order, in parallel, and loop without a seam.
//!
//! # Pipeline overview
//!
//! 1. **Mount**: parameter bag `->` validated config `->` precomputed static state
//!    (seeded entities, star fields, keyframe tables).
//! 2. **Compose**: `FrameContext -> SceneGraph` (kinematics, proximity edges,
//!    gauges, rolling readouts).
//! 3. **Rasterize**: `SceneGraph -> FrameRGBA` via SVG + `resvg`.
//! 4. **Encode** (optional): stream frames to the system `ffmpeg` binary.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same inputs produce bit-identical scene graphs.
//! - **No IO while rendering**: images are decoded up front into an [`ImageStore`].
//! - **Premultiplied RGBA8** out of the rasterizer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation {
    pub mod ease;
    pub mod interpolate;
    pub mod periodic;
}
mod assets {
    pub mod decode;
    pub mod store;
}
mod compositions;
mod encode {
    pub mod ffmpeg;
}
mod foundation {
    pub mod core;
    pub mod error;
    pub(crate) mod math;
}
mod geometry {
    pub mod arc;
    pub mod gauge;
    pub mod rolling;
}
mod graph {
    pub mod proximity;
}
mod procgen {
    pub mod entity;
    pub mod kinematics;
    pub mod seeded;
}
mod render {
    pub mod pipeline;
    pub mod raster;
}
mod scene {
    pub mod model;
    pub mod svg;
}

pub use animation::ease::Ease;
pub use animation::interpolate::{
    Extrapolate, InterpolateOpts, KeyframeTable, Lerp, interpolate,
};
pub use animation::periodic::{Pulse, PulseRate};
pub use assets::decode::decode_image;
pub use assets::store::{ImageStore, PreparedImage};
pub use compositions::image_animation::{CameraState, ImageAnimation, ImageAnimationConfig};
pub use compositions::instrument_panel::{
    ChannelConfig, InstrumentPanel, InstrumentPanelConfig, format_clock,
};
pub use compositions::node_network::{MAX_NODES, NodeNetwork, NodeNetworkConfig};
pub use compositions::panorama::{Panorama, PanoramaConfig, Star};
pub use compositions::presets::{Preset, PresetMotion};
pub use compositions::speedometer::{Speedometer, SpeedometerConfig};
pub use compositions::{
    Composition, CompositionId, mount, parse_params, render_frame, render_mounted,
};
pub use encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir};
pub use foundation::core::{
    Affine, BezPath, Canvas, Color, Fps, FrameContext, FrameIndex, FrameRange, Point, Rect,
    Timeline, Transform2D, Vec2,
};
pub use foundation::error::{FramewrightError, FramewrightResult};
pub use geometry::arc::{ArcSegment, polar_to_cartesian};
pub use geometry::gauge::{GaugeGeometry, GaugeSpec, Tick, arc_path};
pub use geometry::rolling::{DigitRoll, MAX_ROLLING_DIGITS, rolling_digits};
pub use graph::proximity::{Edge, MAX_EDGE_OPACITY, build_edges, edge_opacity};
pub use procgen::entity::{EDGE_MARGIN, Entity, EntityGenParams, Orbit, generate_entities};
pub use procgen::kinematics::{WOBBLE_Y_RATIO, position, positions};
pub use procgen::seeded::{SEED_STRIDE, SeedStream, seeded_random};
pub use render::pipeline::{
    RenderThreading, RenderToMp4Opts, render_frame_rgba, render_frames, render_to_mp4,
};
pub use render::raster::{FrameRGBA, Rasterizer};
pub use scene::model::{
    Fill, LineCap, SceneGraph, SceneNode, Stroke, TextAnchor, TextStyle,
};
pub use scene::svg::write_svg;
