use std::f64::consts::TAU;

use crate::foundation::core::FrameContext;

/// Sinusoidal signal `offset + amplitude * sin(phase_of(frame) + phase)`.
///
/// Unlike keyframe tables these have no domain and no extrapolation. In
/// looping mode the signal completes a whole number of cycles per timeline,
/// so frame `total_frames` reproduces frame 0.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pulse {
    /// Peak deviation from `offset`.
    pub amplitude: f64,
    /// Phase shift in radians.
    pub phase: f64,
    /// Center value.
    pub offset: f64,
    /// How fast the angle advances.
    pub rate: PulseRate,
}

/// Angular speed of a [`Pulse`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PulseRate {
    /// Whole cycles per timeline loop.
    CyclesPerLoop(u32),
    /// Free-running frequency in Hz of wall-clock frame time.
    Hz(f64),
}

impl Pulse {
    /// Loop-safe pulse with `cycles` whole periods per timeline.
    pub fn looping(cycles: u32, amplitude: f64, offset: f64) -> Self {
        Self {
            amplitude,
            phase: 0.0,
            offset,
            rate: PulseRate::CyclesPerLoop(cycles),
        }
    }

    /// Free-running pulse; does not close the loop in general.
    pub fn at_hz(freq_hz: f64, amplitude: f64, offset: f64) -> Self {
        Self {
            amplitude,
            phase: 0.0,
            offset,
            rate: PulseRate::Hz(freq_hz),
        }
    }

    /// Same pulse shifted by `phase` radians.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Raw angle fed into `sin` for this frame.
    pub fn angle(&self, ctx: &FrameContext) -> f64 {
        let base = match self.rate {
            PulseRate::CyclesPerLoop(cycles) => ctx.loop_phase() * f64::from(cycles),
            PulseRate::Hz(freq_hz) => TAU * freq_hz * ctx.seconds(),
        };
        base + self.phase
    }

    /// Signal value at `ctx`.
    pub fn sample(&self, ctx: &FrameContext) -> f64 {
        self.offset + self.amplitude * self.angle(ctx).sin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/periodic.rs"]
mod tests;
