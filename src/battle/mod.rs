//! The turn-based battle subsystem.
//!
//! [`engine::BattleEngine`] drives one battle at a time over a
//! [`session::BattleSession`], reporting everything observable through
//! [`events::BattleEvent`]s.

pub mod ai;
pub mod engine;
pub mod events;
pub mod session;
pub mod stats;

#[cfg(test)]
mod tests;

pub use ai::{EnemyStrategy, RandomStrategy};
pub use engine::{BattleEngine, PlayerAction, TurnReport};
pub use events::{BattleEvent, EventBus, EventSink, NullSink, RecordingSink};
pub use session::{
    BattleKind, BattleOutcome, BattlePhase, BattleSession, BattleSide, FieldCondition, StatStages,
    Weather,
};
