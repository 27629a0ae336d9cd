//! Monster instances and their lifecycle.
//!
//! [`MonsterInst`] is the mutable core entity: created from a species
//! definition, damaged and healed in place during battle, and replaced (not
//! mutated) by evolution. [`MonsterManager`] owns the operations that need
//! reference data: creation, experience awards, evolution, and capture math.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dex::Dex;
use crate::errors::DexResult;
use crate::rng::RandomSource;
use crate::species::{Appearance, BaseStats, ElementType, EvolutionTrigger};
use crate::stats::{derive_stats, experience_for_level, MAX_MONSTER_LEVEL};

/// Single-slot status condition. A monster carries at most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    Burn,
    Poison,
    Sleep,
    Paralysis,
    Freeze,
}

/// A living monster owned by exactly one team list at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterInst {
    /// Display name; the species name unless nicknamed.
    pub name: String,
    pub species_id: String,
    pub element: ElementType,
    /// 1..=MAX_MONSTER_LEVEL.
    pub level: u8,
    /// Cumulative experience.
    pub experience: u32,
    /// Cumulative experience required for the next level.
    pub next_level_experience: u32,
    /// Copied from the species at creation.
    pub base_stats: BaseStats,
    /// Fixed at creation, 0-31 each.
    pub ivs: [u8; 6],
    /// Accumulate from battles, 0-255 each.
    pub evs: [u8; 6],
    /// Derived stats, recomputed whenever level/IVs/EVs change. HP first.
    pub stats: [u16; 6],
    pub current_hp: u16,
    /// Up to 4 ability ids, ordered by unlock level.
    pub known_abilities: Vec<String>,
    pub status: Option<StatusCondition>,
    pub catch_rate: u8,
    pub appearance: Appearance,
}

/// Result of applying damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub previous_hp: u16,
    pub current_hp: u16,
    /// Damage actually dealt, as a percentage of max HP.
    pub damage_percent: f64,
    pub fainted: bool,
}

/// Result of healing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealOutcome {
    pub heal_amount: u16,
    pub previous_hp: u16,
    pub current_hp: u16,
    /// HP actually restored, as a percentage of max HP.
    pub heal_percent: f64,
}

/// Result of an experience award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceOutcome {
    pub leveled_up: bool,
    pub levels_gained: u8,
    /// Abilities learned during the level-up loop, in unlock order.
    pub new_abilities: Vec<String>,
    pub can_evolve: bool,
    pub evolution_target: Option<String>,
}

/// Options for capture probability.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchOptions {
    pub ball_bonus: f64,
    pub status_bonus: bool,
}

impl Default for CatchOptions {
    fn default() -> Self {
        Self {
            ball_bonus: 1.0,
            status_bonus: false,
        }
    }
}

impl MonsterInst {
    pub fn max_hp(&self) -> u16 {
        self.stats[0]
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn knows_ability(&self, ability_id: &str) -> bool {
        self.known_abilities.iter().any(|id| id == ability_id)
    }

    /// Apply damage, clamped so current HP stays in [0, max].
    pub fn take_damage(&mut self, amount: u16) -> DamageOutcome {
        let previous_hp = self.current_hp;
        self.current_hp = self.current_hp.saturating_sub(amount);
        let dealt = previous_hp - self.current_hp;

        DamageOutcome {
            previous_hp,
            current_hp: self.current_hp,
            damage_percent: dealt as f64 / self.max_hp().max(1) as f64 * 100.0,
            fainted: self.current_hp == 0,
        }
    }

    /// Restore HP. `None` means a full heal; amounts are clamped to max HP.
    pub fn heal(&mut self, amount: Option<u16>) -> HealOutcome {
        let previous_hp = self.current_hp;
        self.current_hp = match amount {
            Some(amount) => self.current_hp.saturating_add(amount).min(self.max_hp()),
            None => self.max_hp(),
        };
        let restored = self.current_hp - previous_hp;

        HealOutcome {
            heal_amount: restored,
            previous_hp,
            current_hp: self.current_hp,
            heal_percent: restored as f64 / self.max_hp().max(1) as f64 * 100.0,
        }
    }

    /// Inflict a status condition. Returns false without mutating if a
    /// condition is already present; conditions never stack or override.
    pub fn apply_status(&mut self, status: StatusCondition) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status = Some(status);
        true
    }

    /// Remove and return the current status condition.
    pub fn clear_status(&mut self) -> Option<StatusCondition> {
        self.status.take()
    }

    /// Recompute derived stats from the stored base stats, level, IVs, EVs.
    pub fn recompute_stats(&mut self) {
        self.stats = derive_stats(&self.base_stats, self.level, &self.ivs, &self.evs);
    }
}

/// Options for [`MonsterManager::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Explicit IVs; six uniform draws in [0, 31] when omitted.
    pub ivs: Option<[u8; 6]>,
    /// Explicit EVs; all zero when omitted.
    pub evs: Option<[u8; 6]>,
    /// Explicit known abilities; derived from the learnset when omitted.
    pub abilities: Option<Vec<String>>,
}

/// Instance lifecycle operations that need the definition repository.
#[derive(Debug, Clone)]
pub struct MonsterManager {
    dex: Arc<Dex>,
}

impl MonsterManager {
    pub fn new(dex: Arc<Dex>) -> Self {
        Self { dex }
    }

    pub fn dex(&self) -> &Dex {
        &self.dex
    }

    /// Create a monster instance of the given species at the given level.
    ///
    /// Hard-fails only if the species id is unknown.
    pub fn create(
        &self,
        species_id: &str,
        level: u8,
        options: CreateOptions,
        rng: &mut dyn RandomSource,
    ) -> DexResult<MonsterInst> {
        let species = self.dex.species(species_id)?;
        let level = level.clamp(1, MAX_MONSTER_LEVEL);

        let ivs = options.ivs.unwrap_or_else(|| {
            let mut ivs = [0u8; 6];
            for slot in &mut ivs {
                *slot = rng.roll(32, "iv") as u8;
            }
            ivs
        });
        let evs = options.evs.unwrap_or([0; 6]);
        let stats = derive_stats(&species.base_stats, level, &ivs, &evs);
        let known_abilities = options
            .abilities
            .unwrap_or_else(|| species.abilities_at_level(level));

        Ok(MonsterInst {
            name: species.name.clone(),
            species_id: species.id.clone(),
            element: species.element,
            level,
            experience: experience_for_level(level as i32, species.growth),
            next_level_experience: experience_for_level(level as i32 + 1, species.growth),
            base_stats: species.base_stats.clone(),
            ivs,
            evs,
            current_hp: stats[0],
            stats,
            known_abilities,
            status: None,
            catch_rate: species.catch_rate,
            appearance: species.appearance.clone(),
        })
    }

    /// Add experience and resolve any resulting level-ups.
    ///
    /// Each level gained recomputes derived stats and carries the max-HP
    /// delta onto current HP, collects abilities unlocking exactly at the new
    /// level (oldest known ability dropped past 4), and advances the next
    /// threshold. Level-triggered evolution eligibility is reported, never
    /// applied.
    pub fn award_experience(
        &self,
        inst: &mut MonsterInst,
        amount: u32,
    ) -> DexResult<ExperienceOutcome> {
        let species = self.dex.species(&inst.species_id)?;

        inst.experience += amount;

        let mut levels_gained = 0u8;
        let mut new_abilities = Vec::new();

        while inst.experience >= inst.next_level_experience && inst.level < MAX_MONSTER_LEVEL {
            inst.level += 1;
            levels_gained += 1;

            let old_max = inst.max_hp();
            inst.recompute_stats();
            let hp_gain = inst.max_hp() - old_max;
            inst.current_hp = (inst.current_hp + hp_gain).min(inst.max_hp());

            for ability_id in species.abilities_unlocked_at(inst.level) {
                if !inst.knows_ability(&ability_id) {
                    inst.known_abilities.push(ability_id.clone());
                    if inst.known_abilities.len() > 4 {
                        inst.known_abilities.remove(0);
                    }
                    new_abilities.push(ability_id);
                }
            }

            inst.next_level_experience =
                experience_for_level(inst.level as i32 + 1, species.growth);
        }

        let (can_evolve, evolution_target) = match &species.evolution {
            Some(rule) => match rule.trigger {
                EvolutionTrigger::Level(threshold) if inst.level >= threshold => {
                    (true, Some(rule.target_species_id.clone()))
                }
                _ => (false, None),
            },
            None => (false, None),
        };

        Ok(ExperienceOutcome {
            leveled_up: levels_gained > 0,
            levels_gained,
            new_abilities,
            can_evolve,
            evolution_target,
        })
    }

    /// Evolve an instance into its target species.
    ///
    /// Returns `Ok(None)` when the species has no evolution rule. The new
    /// instance keeps level, IVs, EVs, experience counters, and a nickname,
    /// and preserves the HP *ratio* (floored), not the absolute HP. The
    /// caller owns swapping the new instance into whichever list held the
    /// original.
    pub fn evolve(
        &self,
        inst: &MonsterInst,
        rng: &mut dyn RandomSource,
    ) -> DexResult<Option<MonsterInst>> {
        let species = self.dex.species(&inst.species_id)?;
        let Some(rule) = &species.evolution else {
            return Ok(None);
        };

        let mut evolved = self.create(
            &rule.target_species_id,
            inst.level,
            CreateOptions {
                ivs: Some(inst.ivs),
                evs: Some(inst.evs),
                abilities: None,
            },
            rng,
        )?;

        // Nicknames survive evolution; default species names do not.
        if inst.name != species.name {
            evolved.name = inst.name.clone();
        }
        evolved.experience = inst.experience;
        evolved.next_level_experience = inst.next_level_experience;
        evolved.current_hp = (evolved.max_hp() as u32 * inst.current_hp as u32
            / inst.max_hp().max(1) as u32) as u16;

        Ok(Some(evolved))
    }

    /// Capture probability in [0, 1].
    ///
    /// `clamp((3·max − 2·cur) · rate · ball · status, 0, 255·3·max) / (3·max·255)`
    /// with status contributing 1.5 when a condition is present.
    pub fn catch_probability(&self, inst: &MonsterInst, options: &CatchOptions) -> f64 {
        let max_hp = inst.max_hp().max(1) as f64;
        let current_hp = inst.current_hp as f64;
        let status = if options.status_bonus { 1.5 } else { 1.0 };

        let value = (3.0 * max_hp - 2.0 * current_hp) * inst.catch_rate as f64 * options.ball_bonus
            * status
            / (3.0 * max_hp);

        value.clamp(0.0, 255.0) / 255.0
    }

    /// One Bernoulli trial against [`Self::catch_probability`].
    pub fn attempt_catch(
        &self,
        inst: &MonsterInst,
        options: &CatchOptions,
        rng: &mut dyn RandomSource,
    ) -> bool {
        let threshold = self.catch_probability(inst, options) * 255.0;
        (rng.roll(255, "catch roll") as f64) < threshold
    }
}
