use std::{fmt, str::FromStr};

use crate::foundation::error::{FramewrightError, FramewrightResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Zero-based frame number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open span of frames `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Fails when `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> FramewrightResult<Self> {
        if start.0 > end.0 {
            return Err(FramewrightError::config("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// True when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// True when `f` lies in `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Frame rate as a rational `num / den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds); must be > 0.
    pub den: u32,
}

impl Fps {
    /// Both parts must be non-zero.
    pub fn new(num: u32, den: u32) -> FramewrightResult<Self> {
        if den == 0 {
            return Err(FramewrightError::config("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FramewrightError::config("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Length of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Wall-clock time of `frames` frames.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Frame count covering `secs`, rounded to the nearest frame and never below one.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(1.0) as u64
    }
}

/// Output size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Size as a vector, for layout math.
    pub fn size(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// Center point of the canvas.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }
}

/// Immutable render settings shared by every frame of one composition instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Frames in one loop; > 0.
    pub total_frames: u64,
    /// Playback rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
}

impl Timeline {
    /// Build and validate in one step.
    pub fn new(total_frames: u64, fps: Fps, canvas: Canvas) -> FramewrightResult<Self> {
        let tl = Self {
            total_frames,
            fps,
            canvas,
        };
        tl.validate()?;
        Ok(tl)
    }

    /// Rejects zero frames, a zero frame rate or an empty canvas.
    pub fn validate(&self) -> FramewrightResult<()> {
        if self.total_frames == 0 {
            return Err(FramewrightError::config("total_frames must be > 0"));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(FramewrightError::config("fps must be > 0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FramewrightError::config("canvas width/height must be non-zero"));
        }
        Ok(())
    }

    /// Context for rendering `frame`. Does not bounds-check.
    pub fn at(&self, frame: FrameIndex) -> FrameContext {
        FrameContext {
            frame,
            total_frames: self.total_frames,
            fps: self.fps,
            canvas: self.canvas,
        }
    }

    /// Every frame of the timeline.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames),
        }
    }
}

/// Per-call render input. Read-only; everything a frame depends on lives here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameContext {
    /// Frame being rendered.
    pub frame: FrameIndex,
    /// Frames in one loop; > 0.
    pub total_frames: u64,
    /// Playback rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
}

impl FrameContext {
    /// The timeline this context was taken from.
    pub fn timeline(&self) -> Timeline {
        Timeline {
            total_frames: self.total_frames,
            fps: self.fps,
            canvas: self.canvas,
        }
    }

    /// Wall-clock time of this frame.
    pub fn seconds(&self) -> f64 {
        self.fps.frames_to_secs(self.frame.0)
    }

    /// Angular loop time in `[0, 2π)`; frame `total_frames` maps back onto frame 0.
    pub fn loop_phase(&self) -> f64 {
        loop_phase(self.frame.0, self.total_frames)
    }

    /// Position within the timeline in `[0, 1]` (not wrapped).
    pub fn progress(&self) -> f64 {
        (self.frame.0 as f64 / self.total_frames.max(1) as f64).min(1.0)
    }
}

pub(crate) fn loop_phase(frame: u64, total_frames: u64) -> f64 {
    let total = total_frames.max(1);
    ((frame % total) as f64 / total as f64) * std::f64::consts::TAU
}

/// Straight-alpha RGBA8 color, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (straight, not premultiplied).
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// CSS-style `rgb(..)` for SVG attributes; alpha goes into a separate opacity.
    pub fn svg_rgb(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Alpha in `[0, 1]`.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl FromStr for Color {
    type Err = FramewrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| FramewrightError::config(format!("color '{s}' must start with '#'")))?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(FramewrightError::config(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| FramewrightError::config(format!("color '{s}' has invalid hex digits")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 255 },
        })
    }
}

impl TryFrom<String> for Color {
    type Error = FramewrightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Decomposed 2D transform, applied about `anchor`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Offset applied last.
    pub translate: Vec2,
    /// Rotation in radians.
    pub rotation_rad: f64,
    /// Per-axis scale; default `(1, 1)`.
    pub scale: Vec2,
    /// Pivot for rotation and scale, in local space.
    pub anchor: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    /// Compose into a single affine matrix.
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
