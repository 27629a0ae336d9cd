//! Swappable randomness for the battle engine.
//!
//! Every random decision in the engine (accuracy rolls, damage spread, IV
//! generation, catch attempts, enemy AI choice) goes through a single
//! [`RandomSource`], so a battle can be replayed deterministically by
//! supplying a scripted source.

use rand::Rng;

/// A source of uniform random draws.
///
/// `reason` labels the draw so scripted replays can diagnose which roll a
/// value was consumed for.
pub trait RandomSource {
    /// Returns a uniform draw in `[0, bound)`. A `bound` of 0 returns 0.
    fn roll(&mut self, bound: u32, reason: &str) -> u32;
}

/// Returns whether an event with the given percent chance occurs.
pub fn percent_chance(rng: &mut dyn RandomSource, percent: u8, reason: &str) -> bool {
    rng.roll(100, reason) < percent as u32
}

/// Damage spread factor, uniform in [0.85, 1.00].
pub fn damage_factor(rng: &mut dyn RandomSource) -> f64 {
    (85 + rng.roll(16, "damage spread")) as f64 / 100.0
}

/// Production [`RandomSource`] backed by the thread-local generator.
pub struct ThreadRandom {
    rng: rand::rngs::ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn roll(&mut self, bound: u32, _reason: &str) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }
}

/// Scripted [`RandomSource`] for tests: replays a fixed outcome sequence.
///
/// Each scripted value is reduced modulo the requested bound. Panics when the
/// script runs out, naming the draw that exhausted it.
pub struct ScriptedRandom {
    outcomes: Vec<u32>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(outcomes: Vec<u32>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn roll(&mut self, bound: u32, reason: &str) -> u32 {
        let Some(&value) = self.outcomes.get(self.index) else {
            panic!(
                "ScriptedRandom exhausted! Tried to get a value for: '{}'. Need more outcomes.",
                reason
            );
        };
        self.index += 1;
        if bound == 0 {
            0
        } else {
            value % bound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scripted_source_replays_in_order() {
        let mut rng = ScriptedRandom::new(vec![3, 99, 150]);
        assert_eq!(rng.roll(100, "first"), 3);
        assert_eq!(rng.roll(100, "second"), 99);
        // Values are reduced modulo the bound.
        assert_eq!(rng.roll(100, "third"), 50);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn scripted_source_panics_when_empty() {
        let mut rng = ScriptedRandom::new(vec![]);
        rng.roll(100, "accuracy");
    }

    #[test]
    fn damage_factor_covers_expected_range() {
        let mut low = ScriptedRandom::new(vec![0]);
        let mut high = ScriptedRandom::new(vec![15]);
        assert_eq!(damage_factor(&mut low), 0.85);
        assert_eq!(damage_factor(&mut high), 1.0);
    }

    #[test]
    fn thread_random_respects_bound() {
        let mut rng = ThreadRandom::new();
        for _ in 0..100 {
            assert!(rng.roll(16, "spread") < 16);
        }
        assert_eq!(rng.roll(0, "degenerate"), 0);
    }
}
