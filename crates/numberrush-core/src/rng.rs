//! Seedable PRNG shared by board randomization and target selection.

/// PCG-like PRNG. Seeded from the OS via `getrandom` so it works in both
/// native and WASM builds; `with_seed` gives reproducible boards for tests
/// and for the `--seed` CLI flag.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: a static counter still gives distinct streams
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    pub fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }

    /// Uniform value in `[lo, hi]` inclusive.
    pub fn next_range(&mut self, lo: u8, hi: u8) -> u8 {
        lo + self.next_usize((hi - lo + 1) as usize) as u8
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new()
    }
}
