use crate::{
    foundation::core::Point,
    foundation::error::{FramewrightError, FramewrightResult},
    geometry::arc::{ArcSegment, polar_to_cartesian},
};

/// Every third tick (starting with the first) is major.
pub const MAJOR_TICK_EVERY: u32 = 3;
/// Opacity of inactive major/minor ticks.
pub const INACTIVE_MAJOR_OPACITY: f64 = 0.4;
/// Opacity of inactive minor ticks.
pub const INACTIVE_MINOR_OPACITY: f64 = 0.2;

/// Circular instrument whose filled fraction encodes `progress`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GaugeSpec {
    /// Dial center.
    pub center: Point,
    /// Track radius; ticks sit inside it.
    pub radius: f64,
    /// Degrees, 0° up, clockwise.
    pub start_angle: f64,
    /// Angle at full progress.
    pub end_angle: f64,
    /// Filled fraction in `[0, 1]`.
    pub progress: f64,
    /// Intervals between ticks; `tick_count + 1` ticks are drawn.
    pub tick_count: u32,
    /// Track and progress stroke width.
    pub stroke_width: f64,
}

/// One tick mark of a gauge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Tick {
    /// Position from the start angle.
    pub index: u32,
    /// Degrees.
    pub angle: f64,
    /// Inner end; major ticks are twice as long.
    pub inner: Point,
    /// Outer end, one stroke width inside the track.
    pub outer: Point,
    /// Index is a multiple of [`MAJOR_TICK_EVERY`].
    pub major: bool,
    /// At or behind the progress angle.
    pub active: bool,
    /// Pulsing when active, else the inactive major or minor opacity.
    pub opacity: f64,
    /// Stroke width.
    pub width: f64,
}

/// Resolved arcs and ticks of a [`GaugeSpec`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GaugeGeometry {
    /// Full track.
    pub background: ArcSegment,
    /// Filled part of the track.
    pub progress: ArcSegment,
    /// End angle of `progress`.
    pub progress_angle: f64,
    /// Tick marks, start to end.
    pub ticks: Vec<Tick>,
}

impl GaugeSpec {
    /// Positive radius and stroke, finite angles, progress in `[0, 1]`.
    pub fn validate(&self) -> FramewrightResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(FramewrightError::config("gauge radius must be > 0"));
        }
        if !(self.start_angle.is_finite() && self.end_angle.is_finite()) {
            return Err(FramewrightError::config("gauge angles must be finite"));
        }
        if !(0.0..=1.0).contains(&self.progress) {
            return Err(FramewrightError::config(format!(
                "gauge progress must be within [0, 1], got {}",
                self.progress
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(FramewrightError::config("gauge stroke width must be > 0"));
        }
        Ok(())
    }

    /// Degrees from start to end.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle reached by the progress arc. Progress is clamped into `[0, 1]`.
    pub fn progress_angle(&self) -> f64 {
        self.start_angle + self.span() * self.progress.clamp(0.0, 1.0)
    }

    /// Arc and tick geometry; active ticks pulse with `0.8 + 0.2 * sin(pulse_phase)`.
    pub fn geometry(&self, pulse_phase: f64) -> GaugeGeometry {
        let progress_angle = self.progress_angle();
        GaugeGeometry {
            background: ArcSegment::new(self.center, self.radius, self.start_angle, self.end_angle),
            progress: ArcSegment::new(self.center, self.radius, self.start_angle, progress_angle),
            progress_angle,
            ticks: self.ticks(pulse_phase),
        }
    }

    /// `tick_count + 1` evenly spaced ticks over the full span, both ends included.
    pub fn ticks(&self, pulse_phase: f64) -> Vec<Tick> {
        let progress = self.progress.clamp(0.0, 1.0);
        let active_opacity = 0.8 + 0.2 * pulse_phase.sin();
        let outer_r = (self.radius - self.stroke_width).max(0.0);
        let major_len = self.radius * 0.12;
        let minor_len = self.radius * 0.06;

        (0..=self.tick_count)
            .map(|index| {
                let fraction = if self.tick_count == 0 {
                    0.0
                } else {
                    f64::from(index) / f64::from(self.tick_count)
                };
                let angle = self.start_angle + self.span() * fraction;
                let major = index % MAJOR_TICK_EVERY == 0;
                let active = fraction <= progress;
                let len = if major { major_len } else { minor_len };
                let inner_r = (outer_r - len).max(0.0);
                Tick {
                    index,
                    angle,
                    inner: polar_to_cartesian(self.center, inner_r, angle),
                    outer: polar_to_cartesian(self.center, outer_r, angle),
                    major,
                    active,
                    opacity: match (active, major) {
                        (true, _) => active_opacity,
                        (false, true) => INACTIVE_MAJOR_OPACITY,
                        (false, false) => INACTIVE_MINOR_OPACITY,
                    },
                    width: if major { 3.0 } else { 1.5 },
                }
            })
            .collect()
    }
}

/// Validate `spec` and build its geometry in one step.
pub fn arc_path(spec: &GaugeSpec, pulse_phase: f64) -> FramewrightResult<GaugeGeometry> {
    spec.validate()?;
    Ok(spec.geometry(pulse_phase))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/gauge.rs"]
mod tests;
