//! Deterministic random number generation for a single battle.
//!
//! One [`BattleRng`] is created per battle from its seed and threaded through
//! every probabilistic decision: hit rolls, crits, variance, tie-breaks and
//! AI choices. Given the same seed and the same sequence of draws, the output
//! is identical on every host, which is what lets network peers exchange only
//! the seed and lets instant resolution match paced playback.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. It is stateless: the caller supplies the state as a seed.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed from the battle seed and a draw index.
///
/// `stream` separates independent consumers that must not share a sequence;
/// the simulator itself uses stream 0 for every draw.
pub fn compute_seed(battle_seed: u64, draw: u64, stream: u32) -> u64 {
    // These constants are based on SplitMix64 and FxHash multipliers
    let mut hash = battle_seed;

    hash ^= draw.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// The single random source owned by a battle.
///
/// Every draw advances an internal counter, so the n-th draw of a battle is a
/// pure function of `(seed, n)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRng {
    seed: u64,
    draws: u64,
}

impl BattleRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn next_u32(&mut self) -> u32 {
        let seed = compute_seed(self.seed, self.draws, 0);
        self.draws += 1;
        PcgRng.next_u32(seed)
    }

    /// Percentage roll. 0 never succeeds and 100+ always succeeds; neither
    /// consumes a draw.
    pub fn roll_percent(&mut self, percent: u32) -> bool {
        match percent {
            0 => false,
            p if p >= 100 => true,
            p => self.next_u32() % 100 < p,
        }
    }

    /// Basis-point roll (10_000 = certain).
    pub fn roll_bp(&mut self, bp: u32) -> bool {
        match bp {
            0 => false,
            b if b >= 10_000 => true,
            b => self.next_u32() % 10_000 < b,
        }
    }

    /// Uniform value in `[min, max]` inclusive. A degenerate range returns
    /// `min` without drawing.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = (max - min) as u64 + 1;
        min + (self.next_u32() as u64 % span) as u32
    }

    /// Uniform index in `0..len`. Returns 0 for `len <= 1` without drawing.
    pub fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = BattleRng::new(42);
        let mut b = BattleRng::new(42);
        let left: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = BattleRng::new(1);
        let mut b = BattleRng::new(2);
        let left: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn certain_rolls_do_not_draw() {
        let mut rng = BattleRng::new(7);
        assert!(rng.roll_percent(100));
        assert!(!rng.roll_percent(0));
        assert!(rng.roll_bp(10_000));
        assert_eq!(rng.range(100, 100), 100);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn range_stays_inclusive() {
        let mut rng = BattleRng::new(99);
        for _ in 0..500 {
            let value = rng.range(90, 110);
            assert!((90..=110).contains(&value));
        }
    }

    #[test]
    fn full_width_range_does_not_overflow() {
        let mut rng = BattleRng::new(3);
        let expected = {
            let mut fresh = BattleRng::new(3);
            fresh.next_u32()
        };
        assert_eq!(rng.range(0, u32::MAX), expected);
        assert_eq!(rng.draws(), 1);
    }
}
