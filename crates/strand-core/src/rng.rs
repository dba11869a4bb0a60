//! Deterministic RNG wrapper, seed derivation and the fixed recurrences used
//! for reproducible per-object sampling.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Scale mapping a 32-bit state onto the unit interval.
const UNIT_SCALE: f64 = 1.0 / 4_294_967_296.0;

/// Deterministic RNG handle used when objects are created.
///
/// A master `seed: u64` must be provided by the caller. Substreams are derived
/// by hashing `(master_seed, substream_id)` with SipHash-1-3 configured with
/// fixed zero keys, so the same master seed always yields the same objects.
/// Report generation never draws from this handle: per-object sampling only
/// uses [`lcrng1`] and [`lcrng2`].
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a handle positioned on substream `substream` of `master_seed`.
    pub fn substream(master_seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, substream))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}

/// First linear congruential recurrence, `z * 1664525 + 1013904223 mod 2^32`.
///
/// Drives speckles on the plus side of the abscissa origin. Changing the
/// constants changes every reproducible speckle output.
pub const fn lcrng1(z: u32) -> u32 {
    z.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)
}

/// Second linear congruential recurrence, `z * 22695477 + 1 mod 2^32`.
///
/// Drives speckles on the minus side of the abscissa origin.
pub const fn lcrng2(z: u32) -> u32 {
    z.wrapping_mul(22_695_477).wrapping_add(1)
}

/// Maps a recurrence state onto the open interval `(0, 1)`.
pub fn unit_interval(z: u32) -> f64 {
    (f64::from(z) + 0.5) * UNIT_SCALE
}
