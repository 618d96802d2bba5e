//! Seedable generator for reproducible spawns.

use lina::{BoundingBox, Point2, Vec2};

/// xorshift64* seeded through one SplitMix64 round, so nearby seeds
/// (0, 1, 2, ...) still start far apart. The same seed replays the same run.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        // xorshift has a fixed point at zero
        Rng {
            state: if z == 0 { 0x9E37_79B9_7F4A_7C15 } else { z },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in [0, 1), from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [lo, hi).
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform point inside `bounds`.
    pub fn point_in(&mut self, bounds: &BoundingBox) -> Point2 {
        let x = self.range(bounds.min.x, bounds.max.x);
        let y = self.range(bounds.min.y, bounds.max.y);
        Point2::new(x, y)
    }

    /// Velocity with a uniform heading and a speed in `[min_speed, max_speed)`.
    pub fn heading(&mut self, min_speed: f64, max_speed: f64) -> Vec2 {
        let angle = self.range(0.0, std::f64::consts::TAU);
        let speed = self.range(min_speed, max_speed);
        Vec2::new(speed, 0.0).rotated(angle)
    }
}
