use crate::foundation::error::{FramewrightError, FramewrightResult};

/// Easing curve remapping normalized segment position `[0, 1]` onto `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// `t²`.
    InQuad,
    /// Mirror of `InQuad`.
    OutQuad,
    /// Quadratic in, quadratic out.
    InOutQuad,
    /// `t³`.
    InCubic,
    /// Mirror of `InCubic`.
    OutCubic,
    /// Cubic in, cubic out.
    InOutCubic,
    /// Quarter sine in.
    InSine,
    /// Quarter sine out.
    OutSine,
    /// Half cosine.
    InOutSine,
    /// CSS-style cubic Bezier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Ease {
    /// The CSS `ease` curve.
    pub const STANDARD: Self = Self::CubicBezier(0.25, 0.1, 0.25, 1.0);

    /// Bezier control points must be finite with x in `[0, 1]`.
    pub fn validate(self) -> FramewrightResult<()> {
        if let Self::CubicBezier(x1, y1, x2, y2) = self {
            if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                return Err(FramewrightError::config(
                    "cubic bezier control points must be finite",
                ));
            }
            // x must stay monotonic for the curve to be a function of time.
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(FramewrightError::config(
                    "cubic bezier x control points must be within [0, 1]",
                ));
            }
        }
        Ok(())
    }

    /// Remap `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::OutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::CubicBezier(x1, y1, x2, y2) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = solve_bezier_param(t, x1, x2);
                bezier_coord(u, y1, y2)
            }
        }
    }
}

fn bezier_coord(u: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * u * p1 + 3.0 * inv * u * u * p2 + u * u * u
}

fn bezier_slope(u: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * p1 + 6.0 * inv * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}

/// Curve parameter whose x coordinate equals `x`.
fn solve_bezier_param(x: f64, x1: f64, x2: f64) -> f64 {
    const EPS: f64 = 1e-7;

    let mut u = x;
    for _ in 0..8 {
        let err = bezier_coord(u, x1, x2) - x;
        if err.abs() < EPS {
            return u;
        }
        let slope = bezier_slope(u, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        u -= err / slope;
    }

    // Newton stalled on a flat region; bisection always converges since x is monotonic.
    let (mut lo, mut hi) = (0.0, 1.0);
    u = x;
    for _ in 0..64 {
        let v = bezier_coord(u, x1, x2);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = u;
        } else {
            hi = u;
        }
        u = (lo + hi) * 0.5;
    }
    u
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
