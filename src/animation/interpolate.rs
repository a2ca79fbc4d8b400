use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Vec2},
    foundation::error::{FramewrightError, FramewrightResult},
};

/// Values that can be blended along a keyframe segment.
pub trait Lerp: Sized {
    /// Blend from `a` (t = 0) to `b` (t = 1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;

    /// The value used by [`Extrapolate::Identity`]; `None` when the type has no scalar form.
    fn identity(_input: f64) -> Option<Self> {
        None
    }
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }

    fn identity(input: f64) -> Option<Self> {
        Some(input)
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }

    fn identity(input: f64) -> Option<Self> {
        Some(input as f32)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Behaviour outside the keyframe domain, chosen per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extrapolate {
    /// Continue the slope of the nearest segment.
    #[default]
    Extend,
    /// Pin to the nearest boundary output.
    Clamp,
    /// Return the input unchanged (scalar tables only).
    Identity,
}

/// Extrapolation per side plus the easing applied inside each segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOpts {
    /// Policy below the first input.
    #[serde(default)]
    pub extrapolate_left: Extrapolate,
    /// Policy above the last input.
    #[serde(default)]
    pub extrapolate_right: Extrapolate,
    /// Easing within each segment.
    #[serde(default)]
    pub ease: Ease,
}

impl InterpolateOpts {
    /// Clamp on both sides, linear inside.
    pub fn clamped() -> Self {
        Self {
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
            ease: Ease::Linear,
        }
    }

    /// Same policies with a different ease.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Piecewise-linear function of frame defined by `(input, output)` control points.
///
/// Validated once on construction; sampling never fails.
#[derive(Clone, Debug, serde::Serialize)]
pub struct KeyframeTable<T> {
    input: Vec<f64>,
    output: Vec<T>,
    opts: InterpolateOpts,
}

impl<T> KeyframeTable<T>
where
    T: Lerp + Clone,
{
    /// Validates lengths, ordering and options.
    /// || Errors are `Config`: mismatched lengths, fewer than two points, a
    /// non-finite or non-increasing input, or identity extrapolation on a
    /// non-scalar table.
    pub fn new(input: Vec<f64>, output: Vec<T>, opts: InterpolateOpts) -> FramewrightResult<Self> {
        if input.len() != output.len() {
            return Err(FramewrightError::config(format!(
                "keyframe input range has {} entries but output range has {}",
                input.len(),
                output.len()
            )));
        }
        if input.len() < 2 {
            return Err(FramewrightError::config(
                "keyframe table needs at least 2 points",
            ));
        }
        if !input.iter().all(|v| v.is_finite()) {
            return Err(FramewrightError::config(
                "keyframe input range must be finite",
            ));
        }
        if let Some(pos) = input.windows(2).position(|w| w[0] >= w[1]) {
            return Err(FramewrightError::config(format!(
                "keyframe input range must be strictly increasing (index {} -> {}: {} >= {})",
                pos,
                pos + 1,
                input[pos],
                input[pos + 1]
            )));
        }
        let wants_identity = opts.extrapolate_left == Extrapolate::Identity
            || opts.extrapolate_right == Extrapolate::Identity;
        if wants_identity && T::identity(0.0).is_none() {
            return Err(FramewrightError::config(
                "identity extrapolation is only valid for scalar tables",
            ));
        }
        opts.ease.validate()?;

        Ok(Self {
            input,
            output,
            opts,
        })
    }

    /// Control point inputs, strictly increasing.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Control point outputs.
    pub fn output(&self) -> &[T] {
        &self.output
    }

    /// Value at `x`, extrapolated per side outside the domain.
    pub fn sample(&self, x: f64) -> T {
        let n = self.input.len();
        let first = self.input[0];
        let last = self.input[n - 1];

        if x < first {
            return self.extrapolate(x, self.opts.extrapolate_left, 0, &self.output[0]);
        }
        if x > last {
            return self.extrapolate(x, self.opts.extrapolate_right, n - 2, &self.output[n - 1]);
        }

        let idx = self.input.partition_point(|v| *v <= x);
        let seg = idx.saturating_sub(1).min(n - 2);
        let t = self.segment_t(seg, x);
        let te = self.opts.ease.apply(t);
        blend(&self.output[seg], &self.output[seg + 1], te)
    }

    fn segment_t(&self, seg: usize, x: f64) -> f64 {
        let a = self.input[seg];
        let b = self.input[seg + 1];
        (x - a) / (b - a)
    }

    fn extrapolate(&self, x: f64, policy: Extrapolate, seg: usize, boundary: &T) -> T {
        match policy {
            Extrapolate::Clamp => boundary.clone(),
            // Guarded in `new`.
            Extrapolate::Identity => T::identity(x).unwrap_or_else(|| boundary.clone()),
            Extrapolate::Extend => {
                let t = self.segment_t(seg, x);
                T::lerp(&self.output[seg], &self.output[seg + 1], t)
            }
        }
    }
}

fn blend<T: Lerp + Clone>(a: &T, b: &T, t: f64) -> T {
    if t <= 0.0 {
        a.clone()
    } else if t >= 1.0 {
        b.clone()
    } else {
        T::lerp(a, b, t)
    }
}

/// One-shot scalar interpolation. Validates the table on every call; build a
/// [`KeyframeTable`] once when sampling the same table per frame.
pub fn interpolate(
    x: f64,
    input: &[f64],
    output: &[f64],
    opts: InterpolateOpts,
) -> FramewrightResult<f64> {
    Ok(KeyframeTable::new(input.to_vec(), output.to_vec(), opts)?.sample(x))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
