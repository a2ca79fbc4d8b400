use crate::{
    foundation::core::{Point, Vec2, loop_phase},
    procgen::entity::{Entity, Orbit},
};

/// Vertical speed multiplier of the secondary orbit. Applied to even wobble
/// speeds it stays integral, so the ellipse-like wobble still closes each loop.
pub const WOBBLE_Y_RATIO: f64 = 1.5;

/// Closed-form position of `entity` at `frame`; periodic in `total_frames`.
///
/// No clamping: positions may leave the canvas.
pub fn position(entity: &Entity, frame: u64, total_frames: u64) -> Point {
    let t = loop_phase(frame, total_frames);
    entity.base + primary_offset(&entity.orbit, t) + wobble_offset(&entity.wobble, t)
}

/// Positions for every entity, indexed like the input slice.
pub fn positions(entities: &[Entity], frame: u64, total_frames: u64) -> Vec<Point> {
    entities
        .iter()
        .map(|e| position(e, frame, total_frames))
        .collect()
}

fn primary_offset(orbit: &Orbit, t: f64) -> Vec2 {
    let a = t * f64::from(orbit.speed) + orbit.phase;
    Vec2::new(a.cos() * orbit.radius, a.sin() * orbit.radius)
}

fn wobble_offset(orbit: &Orbit, t: f64) -> Vec2 {
    let speed = f64::from(orbit.speed);
    let ax = t * speed + orbit.phase;
    let ay = t * speed * WOBBLE_Y_RATIO + orbit.phase;
    Vec2::new(ax.cos() * orbit.radius, ay.sin() * orbit.radius)
}

#[cfg(test)]
#[path = "../../tests/unit/procgen/kinematics.rs"]
mod tests;
