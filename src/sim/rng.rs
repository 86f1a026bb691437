// rng.rs - Random sources
//
// Two streams, kept apart:
//   Chance - seeded, drives every transition and spawn placement.
//            Same seed, same run.
//   Jitter - xorshift32, drives shimmer/sway phases and river lane
//            offsets. Never consulted for a stage decision.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct Chance {
    rng: SmallRng,
}

impl Chance {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// True with probability `p`. `p >= 1` always fires, `p <= 0` never.
    #[inline]
    pub fn roll(&mut self, p: f32) -> bool {
        if p >= 1.0 { return true; }
        if !(p > 0.0) { return false; }
        self.rng.r#gen::<f32>() < p
    }

    /// Uniform in [0, 1).
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.rng.r#gen()
    }

    /// Uniform in [lo, hi). Collapses to `lo` for an empty range or one
    /// too wide to sample.
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo && (hi - lo).is_finite() { self.rng.gen_range(lo..hi) } else { lo }
    }

    /// Uniform in [-width/2, width/2).
    #[inline]
    pub fn spread(&mut self, width: f32) -> f32 {
        (self.unit() - 0.5) * width
    }
}

#[derive(Debug, Clone)]
pub struct Jitter {
    state: u32,
}

impl Jitter {
    pub fn new(seed: u32) -> Self {
        // xorshift has a fixed point at zero
        Self { state: if seed == 0 { 0xDEADBEEF } else { seed } }
    }

    /// Seeded from the host clock (or `Math.random` in the browser).
    pub fn from_entropy() -> Self {
        #[cfg(target_arch = "wasm32")]
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;

        #[cfg(not(target_arch = "wasm32"))]
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
            .unwrap_or(0xDEADBEEF);

        Self::new(seed)
    }

    /// Uniform in [0, 1).
    #[inline(always)]
    pub fn next(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state >> 8) as f32 * (1.0 / 16777216.0)
    }

    #[inline]
    pub fn spread(&mut self, width: f32) -> f32 {
        (self.next() - 0.5) * width
    }

    /// Random phase in [0, 2pi).
    #[inline]
    pub fn phase(&mut self) -> f32 {
        self.next() * std::f32::consts::TAU
    }
}
