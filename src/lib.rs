//! Monster Arena Battle Engine
//!
//! The battle and progression core of a monster-collecting game: species and
//! ability definitions loaded from RON, derived-stat and experience math,
//! monster instance lifecycle (creation, leveling, evolution, capture), and a
//! deterministic turn-based battle engine with swappable randomness, enemy
//! AI, and event reporting.

// --- MODULE DECLARATIONS ---
pub mod abilities;
pub mod battle;
pub mod dex;
pub mod errors;
pub mod items;
pub mod monster;
pub mod rng;
pub mod species;
pub mod stats;
pub mod typechart;

// --- PUBLIC API RE-EXPORTS ---

// Reference data definitions.
pub use abilities::{
    AbilityCategory, AbilityDefinition, EffectKind, SecondaryEffect, TargetSelector,
};
pub use items::{ItemDefinition, ItemEffect};
pub use species::{
    Appearance, BaseStats, ElementType, EvolutionRule, EvolutionTrigger, LearnableAbility,
    SpeciesDefinition,
};

// The definition repository and the type chart.
pub use dex::Dex;
pub use typechart::TypeChart;

// Stat and experience math.
pub use stats::{
    derive_stats, experience_for_level, experience_yield, GrowthRate, StatName,
    MAX_MONSTER_LEVEL,
};

// Monster instances and their lifecycle.
pub use monster::{
    CatchOptions, CreateOptions, DamageOutcome, ExperienceOutcome, HealOutcome, MonsterInst,
    MonsterManager, StatusCondition,
};

// The battle engine.
pub use battle::{
    BattleEngine, BattleEvent, BattleKind, BattleOutcome, BattlePhase, BattleSession, BattleSide,
    EnemyStrategy, EventSink, NullSink, PlayerAction, RandomStrategy, RecordingSink, StatStages,
    TurnReport,
};

// Randomness injection.
pub use rng::{RandomSource, ScriptedRandom, ThreadRandom};

// Crate-specific error and result types.
pub use errors::{DexError, DexResult, LoadError};
