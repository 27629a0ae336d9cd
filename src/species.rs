//! Species definitions: immutable reference data describing each monster
//! species. Loaded once (typically from RON files) and served read-only
//! through the [`crate::dex::Dex`].

use serde::{Deserialize, Serialize};

use crate::stats::GrowthRate;

/// Elemental types used by species and abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
}

/// The six base stats of a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    /// Stats in derived-array order (HP first).
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }

    /// Base stat total.
    pub fn total(&self) -> u16 {
        self.as_array().iter().map(|&s| s as u16).sum()
    }
}

/// One entry in a species learnset: an ability and the level it unlocks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnableAbility {
    pub ability_id: String,
    pub level: u8,
}

/// What causes a species to evolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionTrigger {
    /// Evolves on reaching this level.
    Level(u8),
    /// Evolves when the named item is used on it.
    Item(String),
    /// Evolves under a named external condition (trade, friendship, ...).
    Condition(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRule {
    pub target_species_id: String,
    pub trigger: EvolutionTrigger,
}

/// Visual descriptor carried on every species and instance. Opaque to the
/// engine; presentation layers interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub sprite_key: String,
    #[serde(default)]
    pub palette: Option<String>,
}

/// Immutable definition of a monster species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    pub id: String,
    pub name: String,
    pub element: ElementType,
    pub base_stats: BaseStats,
    /// Abilities this species can learn, with unlock levels.
    #[serde(default)]
    pub learnset: Vec<LearnableAbility>,
    #[serde(default)]
    pub evolution: Option<EvolutionRule>,
    /// Base capture susceptibility, 0-255.
    pub catch_rate: u8,
    /// Experience yielded when this species faints.
    pub exp_yield: u16,
    #[serde(default)]
    pub growth: GrowthRate,
    #[serde(default)]
    pub appearance: Appearance,
}

impl SpeciesDefinition {
    /// Abilities known by a freshly created instance at `level`: every
    /// learnset entry unlocked at or below the level, sorted ascending by
    /// unlock level, truncated to the last (highest-level) 4.
    pub fn abilities_at_level(&self, level: u8) -> Vec<String> {
        let mut unlocked: Vec<&LearnableAbility> = self
            .learnset
            .iter()
            .filter(|entry| entry.level <= level)
            .collect();
        unlocked.sort_by_key(|entry| entry.level);

        let skip = unlocked.len().saturating_sub(4);
        unlocked
            .into_iter()
            .skip(skip)
            .map(|entry| entry.ability_id.clone())
            .collect()
    }

    /// Abilities whose unlock level is exactly `level`.
    pub fn abilities_unlocked_at(&self, level: u8) -> Vec<String> {
        self.learnset
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.ability_id.clone())
            .collect()
    }
}
