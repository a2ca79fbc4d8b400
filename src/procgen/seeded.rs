/// Seed distance between consecutive entities; attribute offsets stay far below it.
pub const SEED_STRIDE: i64 = 1000;

/// Stateless pseudo-random scalar in `[0, 1)`: the fractional part of `sin(seed) * 10000`.
///
/// Total over all integer seeds and reproducible anywhere IEEE-754 `sin` is.
pub fn seeded_random(seed: i64) -> f64 {
    let x = (seed as f64).sin() * 10_000.0;
    let v = x - x.floor();
    // x - floor(x) rounds up to 1.0 for tiny negative x.
    if v >= 1.0 { 0.0 } else { v }
}

/// Independent-looking draws keyed by small offsets from a fixed base seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedStream {
    base: i64,
}

impl SeedStream {
    /// Stream rooted at `base`.
    pub fn new(base: i64) -> Self {
        Self { base }
    }

    /// Stream of entity `index`: `global_seed + index * SEED_STRIDE`, wrapping.
    pub fn for_entity(global_seed: i64, index: usize) -> Self {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        Self::new(global_seed.wrapping_add(index.wrapping_mul(SEED_STRIDE)))
    }

    /// Root seed.
    pub fn base(&self) -> i64 {
        self.base
    }

    /// `seeded_random(base + offset)`, in `[0, 1)`.
    pub fn draw(&self, offset: u32) -> f64 {
        seeded_random(self.base.wrapping_add(i64::from(offset)))
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range(&self, offset: u32, lo: f64, hi: f64) -> f64 {
        lo + self.draw(offset) * (hi - lo)
    }

    /// Uniform index in `0..n`; `0` when `n == 0`.
    pub fn pick(&self, offset: u32, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.draw(offset) * n as f64) as usize).min(n - 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/procgen/seeded.rs"]
mod tests;
