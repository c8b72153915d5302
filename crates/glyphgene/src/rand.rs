//! Deterministic seeding for reproducible gene builds.
//!
//! Randomness in this crate (synonymous-codon choice, probabilistic
//! join selection) is injected: every randomized operation takes a
//! caller-supplied `Rng`. `SeedToken` gives callers a cheap way to make
//! a batch of builds replayable and indexable without sharing RNG state
//! across items.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Replay token identifying one draw in a seeded batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedToken {
    pub seed: u64,
    pub index: u64,
}

impl SeedToken {
    /// Dedicated RNG for this token.
    pub fn to_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}
