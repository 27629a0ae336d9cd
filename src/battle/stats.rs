//! Effective in-battle stats: derived stats adjusted by stat stages and
//! status conditions.

use crate::abilities::AbilityCategory;
use crate::battle::session::StatStages;
use crate::monster::{MonsterInst, StatusCondition};
use crate::stats::StatName;

/// Effective attacking stat for an ability category, including stat stages.
/// Status abilities have no attacking stat.
pub fn effective_attack(
    monster: &MonsterInst,
    stages: &StatStages,
    category: AbilityCategory,
) -> u16 {
    let (base, stat) = match category {
        AbilityCategory::Physical => (monster.stats[1], StatName::Attack),
        AbilityCategory::Special => (monster.stats[3], StatName::SpecialAttack),
        AbilityCategory::Status => return 0,
    };
    apply_stage_multiplier(base, stages.get(stat))
}

/// Effective defending stat for an ability category, including stat stages.
pub fn effective_defense(
    monster: &MonsterInst,
    stages: &StatStages,
    category: AbilityCategory,
) -> u16 {
    let (base, stat) = match category {
        AbilityCategory::Physical => (monster.stats[2], StatName::Defense),
        AbilityCategory::Special => (monster.stats[4], StatName::SpecialDefense),
        AbilityCategory::Status => return 0,
    };
    apply_stage_multiplier(base, stages.get(stat))
}

/// Effective speed including stat stages; paralysis quarters it.
pub fn effective_speed(monster: &MonsterInst, stages: &StatStages) -> u16 {
    let mut speed = apply_stage_multiplier(monster.stats[5], stages.get(StatName::Speed));
    if monster.status == Some(StatusCondition::Paralysis) {
        speed /= 4;
    }
    speed
}

/// Stat stage multipliers: negative stages `2/(2+|s|)`, positive `(2+s)/2`.
fn apply_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    let stage = stage.clamp(-6, 6);
    if stage == 0 {
        return base_stat;
    }

    let multiplier = if stage < 0 {
        2.0 / (2.0 + (-stage) as f64)
    } else {
        (2.0 + stage as f64) / 2.0
    };

    ((base_stat as f64) * multiplier).round() as u16
}
