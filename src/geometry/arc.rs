use std::fmt::Write as _;

use crate::foundation::core::{BezPath, Point, Vec2};

/// Convert a gauge angle to a point. 0° points up and angles grow clockwise on screen.
pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0).to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// One circular arc with its SVG path descriptor.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ArcSegment {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Degrees, 0° up, clockwise.
    pub start_angle: f64,
    /// Degrees; may be below `start_angle`.
    pub end_angle: f64,
    /// Point at `start_angle`.
    pub start: Point,
    /// Point at `end_angle`.
    pub end: Point,
    /// Set iff the segment spans more than 180°.
    pub large_arc: bool,
    /// Set when angles increase from start to end (clockwise on screen).
    pub sweep: bool,
    /// `M x y A r r 0 large sweep x y`, or `M x y` for a zero-length span.
    pub descriptor: String,
}

impl ArcSegment {
    /// Resolve endpoints, flags and descriptor.
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        let span = end_angle - start_angle;
        let start = polar_to_cartesian(center, radius, start_angle);
        let end = polar_to_cartesian(center, radius, end_angle);
        let large_arc = span.abs() > 180.0;
        let sweep = span >= 0.0;

        let mut descriptor = format!("M {} {}", fmt_num(start.x), fmt_num(start.y));
        if span != 0.0 && radius > 0.0 {
            let flag = u8::from;
            if span.abs() >= 360.0 {
                // Coincident endpoints draw nothing in SVG; close the ring through its midpoint.
                let mid = polar_to_cartesian(center, radius, start_angle + span * 0.5);
                let half_large = flag(span.abs() * 0.5 > 180.0);
                for p in [mid, end] {
                    let _ = write!(
                        descriptor,
                        " A {r} {r} 0 {} {} {} {}",
                        half_large,
                        flag(sweep),
                        fmt_num(p.x),
                        fmt_num(p.y),
                        r = fmt_num(radius),
                    );
                }
            } else {
                let _ = write!(
                    descriptor,
                    " A {r} {r} 0 {} {} {} {}",
                    flag(large_arc),
                    flag(sweep),
                    fmt_num(end.x),
                    fmt_num(end.y),
                    r = fmt_num(radius),
                );
            }
        }

        Self {
            center,
            radius,
            start_angle,
            end_angle,
            start,
            end,
            large_arc,
            sweep,
            descriptor,
        }
    }

    /// Signed sweep in degrees.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Zero-length arc.
    pub fn is_empty(&self) -> bool {
        self.span() == 0.0 || self.radius <= 0.0
    }

    /// Bezier approximation for consumers that do not speak SVG path syntax.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        use kurbo::Shape as _;

        let arc = kurbo::Arc {
            center: self.center,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: (self.start_angle - 90.0).to_radians(),
            sweep_angle: self.span().to_radians(),
            x_rotation: 0.0,
        };
        arc.to_path(tolerance)
    }
}

/// Compact decimal form for path data: three decimals, no trailing zeros, no `-0`.
pub(crate) fn fmt_num(v: f64) -> String {
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arc.rs"]
mod tests;
