//! Seeded deterministic random number generation.
//!
//! All randomness in the engine flows through [`Prng`]. The generator is a
//! plain value: every draw returns the sampled value together with the
//! advanced generator, so there is no hidden global state and any state
//! snapshot carries the exact position of its random stream.
//!
//! # Determinism
//!
//! Same seed + same call order always yields bit-identical results. This is
//! what makes replays and save/load round-trips reproducible.

use std::collections::BTreeMap;

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits, `Copy`
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prng {
    state: u64,
}

impl Prng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed, mixing it so nearby seeds diverge.
    pub const fn from_seed(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// Derives an independent stream for a sub-system (e.g. one PlayArea).
    ///
    /// The parent is advanced so two forks never share a stream.
    #[must_use]
    pub fn fork(self, context: u32) -> (Self, Self) {
        let (hi, next) = self.next_u32();
        let (lo, next) = next.next_u32();
        let seed = ((u64::from(hi) << 32) | u64::from(lo)) ^ u64::from(context).wrapping_mul(0x85ebca6b);
        (Self::from_seed(seed), next)
    }

    /// Advance the PCG state by one step.
    ///
    /// Uses LCG (Linear Congruential Generator) formula:
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    const fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    const fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Draws a raw 32-bit value.
    #[must_use]
    pub const fn next_u32(self) -> (u32, Self) {
        let state = Self::pcg_step(self.state);
        (Self::pcg_output(state), Self { state })
    }

    /// Draws a value in `[0, bound)`. A zero bound yields zero.
    #[must_use]
    pub const fn below(self, bound: u32) -> (u32, Self) {
        if bound == 0 {
            return (0, self);
        }
        let (value, next) = self.next_u32();
        (value % bound, next)
    }

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Used for percentage-based rolls like loot and encounter chances.
    #[must_use]
    pub const fn roll_d100(self) -> (u32, Self) {
        let (value, next) = self.below(100);
        (value + 1, next)
    }

    /// Returns true with `percent`% probability.
    #[must_use]
    pub const fn chance(self, percent: u32) -> (bool, Self) {
        let (roll, next) = self.roll_d100();
        (roll <= percent, next)
    }
}

impl Default for Prng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

/// SplitMix-style avalanche so consecutive seeds give unrelated streams.
const fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed ^ 0x9e3779b97f4a7c15;
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}

/// Fisher–Yates permutation of `items`.
///
/// Returns the permuted sequence and the advanced generator.
#[must_use]
pub fn shuffle<T>(mut items: Vec<T>, prng: Prng) -> (Vec<T>, Prng) {
    let mut prng = prng;
    for i in (1..items.len()).rev() {
        let (j, next) = prng.below(u32::try_from(i + 1).unwrap_or(u32::MAX));
        prng = next;
        items.swap(i, j as usize);
    }
    (items, prng)
}

/// Picks `n` distinct indices from `0..len` (without replacement).
///
/// The result preserves draw order. When `n >= len` every index is returned
/// in shuffled order.
#[must_use]
pub fn sample_indices(len: usize, n: usize, prng: Prng) -> (Vec<usize>, Prng) {
    let (mut indices, prng) = shuffle((0..len).collect::<Vec<_>>(), prng);
    indices.truncate(n);
    (indices, prng)
}

/// Selects `n` distinct keys from `mapping` without replacement.
///
/// Keys are taken in the map's sorted order before sampling, so the choice
/// only depends on the key set and the generator.
#[must_use]
pub fn pick_n<K, V>(mapping: &BTreeMap<K, V>, n: usize, prng: Prng) -> (Vec<K>, Prng)
where
    K: Clone + Ord,
{
    let keys: Vec<&K> = mapping.keys().collect();
    let (indices, prng) = sample_indices(keys.len(), n, prng);
    let picked = indices.into_iter().map(|i| keys[i].clone()).collect();
    (picked, prng)
}
