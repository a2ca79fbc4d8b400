use std::f64::consts::TAU;

use crate::{
    foundation::core::{Canvas, Point},
    procgen::seeded::SeedStream,
};

/// Fraction of the canvas kept clear on every side when placing base positions.
pub const EDGE_MARGIN: f64 = 0.1;

// Attribute offsets into an entity's seed stream.
const ATTR_BASE_X: u32 = 1;
const ATTR_BASE_Y: u32 = 2;
const ATTR_ORBIT_RADIUS: u32 = 3;
const ATTR_ORBIT_SPEED: u32 = 4;
const ATTR_ORBIT_PHASE: u32 = 5;
const ATTR_WOBBLE_RADIUS: u32 = 6;
const ATTR_WOBBLE_SPEED: u32 = 7;
const ATTR_WOBBLE_PHASE: u32 = 8;
const ATTR_SIZE: u32 = 9;
const ATTR_COLOR: u32 = 10;

/// Circular motion parameters. `speed` is in whole revolutions per loop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Orbit {
    /// Pixels.
    pub radius: f64,
    /// Whole revolutions per loop.
    pub speed: u32,
    /// Radians at frame 0.
    pub phase: f64,
}

/// One animated point. Built once per composition instance, never mutated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Entity {
    /// Index in generation order; also the seed stream index.
    pub id: usize,
    /// Rest position, kept away from the canvas edges.
    pub base: Point,
    /// Primary circular motion.
    pub orbit: Orbit,
    /// Faster secondary motion; its speed is always even.
    pub wobble: Orbit,
    /// Core radius.
    pub size: f64,
    /// Index into the composition palette.
    pub color_index: usize,
}

/// Inputs to [`generate_entities`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityGenParams {
    /// Entities to create.
    pub count: usize,
    /// Area the base positions fall in.
    pub canvas: Canvas,
    /// Nominal size, scaled per entity by 0.6 to 1.4.
    pub node_size: f64,
    /// Colors to pick from.
    pub palette_len: usize,
    /// Global seed.
    pub seed: i64,
}

/// Derive `count` entities from seed streams; `count == 0` yields an empty set.
#[tracing::instrument(level = "debug")]
pub fn generate_entities(params: EntityGenParams) -> Vec<Entity> {
    let w = f64::from(params.canvas.width);
    let h = f64::from(params.canvas.height);
    (0..params.count)
        .map(|id| {
            let s = SeedStream::for_entity(params.seed, id);
            Entity {
                id,
                base: Point::new(
                    s.range(ATTR_BASE_X, w * EDGE_MARGIN, w * (1.0 - EDGE_MARGIN)),
                    s.range(ATTR_BASE_Y, h * EDGE_MARGIN, h * (1.0 - EDGE_MARGIN)),
                ),
                orbit: Orbit {
                    radius: s.range(ATTR_ORBIT_RADIUS, 20.0, 80.0),
                    speed: 1 + s.pick(ATTR_ORBIT_SPEED, 2) as u32,
                    phase: s.range(ATTR_ORBIT_PHASE, 0.0, TAU),
                },
                wobble: Orbit {
                    radius: s.range(ATTR_WOBBLE_RADIUS, 5.0, 20.0),
                    speed: 2 * (1 + s.pick(ATTR_WOBBLE_SPEED, 3) as u32),
                    phase: s.range(ATTR_WOBBLE_PHASE, 0.0, TAU),
                },
                size: params.node_size * s.range(ATTR_SIZE, 0.6, 1.4),
                color_index: s.pick(ATTR_COLOR, params.palette_len),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/procgen/entity.rs"]
mod tests;
