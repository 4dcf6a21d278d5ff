use crate::types::Seed;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Small-state mixing generator used by every deterministic generator.
///
/// Two instances constructed from the same seed produce identical
/// sequences, so a consumer (e.g. per-segment color cycling) can replay
/// the exact stream a generator used. Not cryptographic; the point is a
/// cheap, well-mixed stream that stays stable across platforms.
#[derive(Clone, Copy, Debug)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: Seed) -> Self {
        Self { state: seed }
    }

    /// Returns the next value in `[0, 1)` and advances the state.
    #[inline]
    pub fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        ((t ^ (t >> 14)) as f64) / 4_294_967_296.0
    }
}

/// Originates fresh seeds for newly created objects.
///
/// Explicitly non-reproducible: seeds combine a monotone counter with
/// wall-clock time and OS entropy. This object is owned by the caller and
/// passed to creation sites; deterministic generators never touch it.
#[derive(Debug)]
pub struct SeedAllocator {
    counter: u32,
    entropy: StdRng,
}

impl SeedAllocator {
    pub fn new() -> Self {
        Self {
            counter: 0,
            entropy: StdRng::from_os_rng(),
        }
    }

    /// Produces a fresh stamp seed for a new object.
    pub fn next_seed(&mut self) -> Seed {
        self.counter = self.counter.wrapping_add(1);
        let k = self.counter.wrapping_mul(0x9E37_79B9);
        now_millis() ^ k
    }

    /// A non-reproducible value in `[0, 1)`, for one-off placement jitter
    /// outside the deterministic regeneration contract.
    pub fn unit(&mut self) -> f64 {
        self.entropy.random()
    }
}

impl Default for SeedAllocator {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(0)
}
