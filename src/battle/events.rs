//! Battle events: the engine's outbound reporting surface.
//!
//! Every observable thing that happens during an action is recorded as a
//! [`BattleEvent`]. Events accumulate in an [`EventBus`] that is returned on
//! each [`crate::battle::TurnReport`], and are also forwarded fire-and-forget
//! to an injected [`EventSink`]; the engine never depends on a listener being
//! present.

use serde::{Deserialize, Serialize};

use crate::battle::session::{BattleKind, BattleOutcome, BattleSide};
use crate::monster::StatusCondition;
use crate::stats::StatName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    BattleStarted {
        kind: BattleKind,
    },
    TurnStarted {
        turn: u32,
    },
    AbilityUsed {
        side: BattleSide,
        user: String,
        ability: String,
    },
    AbilityMissed {
        user: String,
        ability: String,
    },
    DamageDealt {
        target: String,
        amount: u16,
        remaining_hp: u16,
    },
    Effectiveness {
        multiplier: f64,
    },
    StatStageChanged {
        target: String,
        stat: StatName,
        old_stage: i8,
        new_stage: i8,
    },
    StatusApplied {
        target: String,
        status: StatusCondition,
    },
    StatusDamage {
        target: String,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },
    Healed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    MonsterFainted {
        side: BattleSide,
        name: String,
    },
    MonsterSwitched {
        side: BattleSide,
        old_name: String,
        new_name: String,
    },
    ExperienceGained {
        name: String,
        amount: u32,
    },
    LeveledUp {
        name: String,
        level: u8,
    },
    AbilityLearned {
        name: String,
        ability: String,
    },
    EvolutionReady {
        name: String,
        target_species: String,
    },
    MonsterCaught {
        name: String,
    },
    ItemUsed {
        item: String,
        target: String,
    },
    EscapeAttempted {
        attempt: u32,
        success: bool,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// Human-readable text for the event, or `None` for silent events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { kind } => Some(match kind {
                BattleKind::Wild => "A wild monster appeared!".to_string(),
                BattleKind::Trainer => "The battle begins!".to_string(),
            }),
            BattleEvent::TurnStarted { turn } => Some(format!("=== Turn {} ===", turn)),
            BattleEvent::AbilityUsed { user, ability, .. } => {
                Some(format!("{} used {}!", user, ability))
            }
            BattleEvent::AbilityMissed { user, .. } => {
                Some(format!("{}'s attack missed!", user))
            }
            BattleEvent::DamageDealt { target, amount, .. } => {
                Some(format!("{} took {} damage!", target, amount))
            }
            BattleEvent::Effectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m == 0.0 => Some("It had no effect!".to_string()),
                m if m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let direction = if new_stage > old_stage { "rose" } else { "fell" };
                Some(format!("{}'s {} {}!", target, format_stat(*stat), direction))
            }
            BattleEvent::StatusApplied { target, status } => {
                Some(format!("{} {}", target, format_status_applied(*status)))
            }
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target,
                format_status(*status),
                damage
            )),
            BattleEvent::Healed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::MonsterFainted { name, .. } => Some(format!("{} fainted!", name)),
            BattleEvent::MonsterSwitched {
                old_name, new_name, ..
            } => Some(format!("{} withdrew! Go, {}!", old_name, new_name)),
            BattleEvent::ExperienceGained { name, amount } => {
                Some(format!("{} gained {} experience!", name, amount))
            }
            BattleEvent::LeveledUp { name, level } => {
                Some(format!("{} grew to level {}!", name, level))
            }
            BattleEvent::AbilityLearned { name, ability } => {
                Some(format!("{} learned {}!", name, ability))
            }
            BattleEvent::EvolutionReady { name, .. } => {
                Some(format!("{} is ready to evolve!", name))
            }
            BattleEvent::MonsterCaught { name } => Some(format!("Gotcha! {} was caught!", name)),
            BattleEvent::ItemUsed { item, target } => {
                Some(format!("Used {} on {}!", item, target))
            }
            BattleEvent::EscapeAttempted { success, .. } => Some(if *success {
                "Got away safely!".to_string()
            } else {
                "Couldn't escape!".to_string()
            }),
            BattleEvent::BattleEnded { outcome } => Some(match outcome {
                BattleOutcome::Victory => "You won the battle!".to_string(),
                BattleOutcome::Defeat => "You were defeated...".to_string(),
                BattleOutcome::Caught => "The battle is over.".to_string(),
                BattleOutcome::Escaped => "The battle is over.".to_string(),
            }),
        }
    }
}

fn format_stat(stat: StatName) -> &'static str {
    match stat {
        StatName::Hp => "HP",
        StatName::Attack => "Attack",
        StatName::Defense => "Defense",
        StatName::SpecialAttack => "Special Attack",
        StatName::SpecialDefense => "Special Defense",
        StatName::Speed => "Speed",
    }
}

fn format_status(status: StatusCondition) -> &'static str {
    match status {
        StatusCondition::Burn => "burn",
        StatusCondition::Poison => "poison",
        StatusCondition::Sleep => "sleep",
        StatusCondition::Paralysis => "paralysis",
        StatusCondition::Freeze => "freeze",
    }
}

fn format_status_applied(status: StatusCondition) -> &'static str {
    match status {
        StatusCondition::Burn => "was burned!",
        StatusCondition::Poison => "was poisoned!",
        StatusCondition::Sleep => "fell asleep!",
        StatusCondition::Paralysis => "is paralyzed!",
        StatusCondition::Freeze => "was frozen solid!",
    }
}

/// Ordered log of the events produced by one engine call.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Move the accumulated events out, leaving the bus empty.
    pub fn take(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            match event.format() {
                Some(text) => writeln!(f, "  {}", text)?,
                None => writeln!(f, "  {:?}", event)?,
            }
        }
        Ok(())
    }
}

/// Fire-and-forget observer for outbound events.
///
/// Injected into the engine at construction; presentation layers implement it
/// to drive animation and text. The default [`NullSink`] drops everything.
pub trait EventSink {
    fn publish(&mut self, event: &BattleEvent);
}

/// Sink that ignores every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: &BattleEvent) {}
}

/// Sink that records every event; used by tests and replays.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<BattleEvent>,
}

impl EventSink for RecordingSink {
    fn publish(&mut self, event: &BattleEvent) {
        self.events.push(event.clone());
    }
}
