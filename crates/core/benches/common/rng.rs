use std::env;

/// Seed for synthetic layouts; override with `CELLMAP_BENCH_SEED`.
pub fn bench_seed() -> u64 {
    env::var("CELLMAP_BENCH_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0x7AB1E)
}

/// Small deterministic generator for coordinate noise.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `[-amount, amount]`.
    pub fn jitter(&mut self, amount: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        (n * 2.0 - 1.0) * amount
    }
}
