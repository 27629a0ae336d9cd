//! Ability definitions: immutable reference data describing battle moves.

use serde::{Deserialize, Serialize};

use crate::monster::StatusCondition;
use crate::species::ElementType;
use crate::stats::StatName;

/// How an ability deals (or doesn't deal) damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityCategory {
    /// Damage from Attack vs. Defense.
    Physical,
    /// Damage from Special Attack vs. Special Defense.
    Special,
    /// No direct damage; only secondary effects.
    Status,
}

/// Who an ability or secondary effect applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetSelector {
    #[default]
    Foe,
    User,
}

/// The concrete payload of a secondary effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Shift an in-battle stat stage by `delta` (clamped to -6..=+6).
    StatStage { stat: StatName, delta: i8 },
    /// Inflict a status condition. Silently ignored if the target already
    /// has one.
    InflictStatus { status: StatusCondition },
    /// Restore a percentage of the target's max HP.
    HealPercent { percent: u8 },
}

/// One secondary effect of an ability, gated by its own probability roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    pub kind: EffectKind,
    #[serde(default)]
    pub target: TargetSelector,
    /// Percent chance (0-100) that this effect triggers on a hit.
    pub chance: u8,
    /// Duration in turns for effects that carry one.
    #[serde(default)]
    pub duration: Option<u8>,
}

/// Immutable definition of a battle ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    pub element: ElementType,
    pub category: AbilityCategory,
    /// Base power; `None` for status-only abilities.
    #[serde(default)]
    pub power: Option<u16>,
    /// Percent accuracy (0-100).
    pub accuracy: u8,
    /// How many times the ability can be used between restores.
    pub usage_limit: u8,
    #[serde(default)]
    pub target: TargetSelector,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub effects: Vec<SecondaryEffect>,
}
