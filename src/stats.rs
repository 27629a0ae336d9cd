//! Pure stat and experience math.
//!
//! Everything here is side-effect free and re-invocable at any level: derived
//! stats are a function of (base stats, level, IVs, EVs) alone, and the
//! experience curves are closed-form in the level.

use serde::{Deserialize, Serialize};

use crate::species::BaseStats;

/// Level cap for every monster instance.
pub const MAX_MONSTER_LEVEL: u8 = 100;

/// Growth-rate category controlling the cumulative experience curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrowthRate {
    Fast,
    #[default]
    Medium,
    Slow,
}

/// The six stats, in derived-array order (HP first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatName {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatName {
    /// Position of this stat in a `[_; 6]` stat array.
    pub fn index(self) -> usize {
        match self {
            StatName::Hp => 0,
            StatName::Attack => 1,
            StatName::Defense => 2,
            StatName::SpecialAttack => 3,
            StatName::SpecialDefense => 4,
            StatName::Speed => 5,
        }
    }
}

/// Calculate derived stats from base stats, level, IVs, and EVs.
///
/// HP:    `floor((2·base + iv + floor(ev/4)) · level/100) + level + 10`
/// Other: `floor((2·base + iv + floor(ev/4)) · level/100) + 5`
///
/// Nature modifiers are deliberately not part of the formula.
pub fn derive_stats(base: &BaseStats, level: u8, ivs: &[u8; 6], evs: &[u8; 6]) -> [u16; 6] {
    let base = base.as_array();
    let mut stats = [0u16; 6];

    for i in 0..6 {
        let core = 2 * base[i] as u32 + ivs[i] as u32 + evs[i] as u32 / 4;
        let scaled = core * level as u32 / 100;
        stats[i] = if i == 0 {
            (scaled + level as u32 + 10) as u16
        } else {
            (scaled + 5) as u16
        };
    }

    stats
}

/// Cumulative experience required to reach `level` on the given growth curve.
///
/// Fast: `floor(0.8·L³)`, medium: `L³`, slow: `floor(1.25·L³)`.
/// Returns 0 for any level at or below zero.
pub fn experience_for_level(level: i32, growth: GrowthRate) -> u32 {
    if level <= 0 {
        return 0;
    }
    let cubed = (level as f64).powi(3);
    let scaled = match growth {
        GrowthRate::Fast => 0.8 * cubed,
        GrowthRate::Medium => cubed,
        GrowthRate::Slow => 1.25 * cubed,
    };
    scaled.floor() as u32
}

/// Experience awarded for defeating a monster of the given species yield and level.
pub fn experience_yield(species_yield: u16, level: u8) -> u32 {
    species_yield as u32 * level as u32 / 7
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn base(hp: u8, other: u8) -> BaseStats {
        BaseStats {
            hp,
            attack: other,
            defense: other,
            sp_attack: other,
            sp_defense: other,
            speed: other,
        }
    }

    #[test]
    fn derived_hp_matches_worked_example() {
        // Level-5 monster, base HP 45, IV 10, EV 0:
        // floor((2*45 + 10 + 0) * 5/100) + 5 + 10 = 5 + 15 = 20
        let stats = derive_stats(&base(45, 50), 5, &[10; 6], &[0; 6]);
        assert_eq!(stats[0], 20);
    }

    #[rstest]
    #[case(1)]
    #[case(27)]
    #[case(50)]
    #[case(100)]
    fn derived_stats_respect_floors(#[case] level: u8) {
        let stats = derive_stats(&base(1, 1), level, &[0; 6], &[0; 6]);
        assert!(stats[0] >= level as u16 + 10);
        for stat in &stats[1..] {
            assert!(*stat >= 5);
        }
    }

    #[test]
    fn evs_contribute_a_quarter_point_each() {
        let without = derive_stats(&base(45, 50), 50, &[0; 6], &[0; 6]);
        let with = derive_stats(&base(45, 50), 50, &[0; 6], &[252; 6]);
        // floor(252/4) = 63 extra core points, scaled by level/100.
        assert_eq!(with[1] - without[1], 63 * 50 / 100);
    }

    #[rstest]
    #[case(GrowthRate::Fast)]
    #[case(GrowthRate::Medium)]
    #[case(GrowthRate::Slow)]
    fn experience_curve_is_strictly_increasing(#[case] growth: GrowthRate) {
        let mut previous = experience_for_level(1, growth);
        for level in 2..=100 {
            let required = experience_for_level(level, growth);
            assert!(
                required > previous,
                "curve not increasing at level {level}: {previous} -> {required}"
            );
            previous = required;
        }
    }

    #[test]
    fn experience_for_non_positive_levels_is_zero() {
        assert_eq!(experience_for_level(0, GrowthRate::Medium), 0);
        assert_eq!(experience_for_level(-3, GrowthRate::Fast), 0);
    }

    #[test]
    fn experience_thresholds_match_worked_example() {
        // Medium growth: level 10 costs 1000 total, level 11 costs 1331.
        assert_eq!(experience_for_level(10, GrowthRate::Medium), 1000);
        assert_eq!(experience_for_level(11, GrowthRate::Medium), 1331);
        assert_eq!(experience_for_level(10, GrowthRate::Fast), 800);
        assert_eq!(experience_for_level(10, GrowthRate::Slow), 1250);
    }

    #[test]
    fn experience_yield_scales_with_level() {
        // floor(64 * 7 / 7) = 64
        assert_eq!(experience_yield(64, 7), 64);
        assert_eq!(experience_yield(64, 10), 91);
        assert_eq!(experience_yield(0, 50), 0);
    }
}
