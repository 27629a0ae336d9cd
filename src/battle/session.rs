//! Battle-session state.
//!
//! A [`BattleSession`] is exclusively owned by the engine that created it and
//! lives only for the duration of one battle. Team vectors own their monster
//! instances outright; transfers out of a team (catching) are explicit
//! removals, never aliased references.

use serde::{Deserialize, Serialize};

use crate::monster::MonsterInst;
use crate::stats::StatName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleKind {
    Wild,
    Trainer,
}

/// Terminal result of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Every enemy monster fainted.
    Victory,
    /// Every player monster fainted.
    Defeat,
    /// The active enemy monster was captured.
    Caught,
    /// The player escaped a wild battle.
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Waiting for the next player action.
    AwaitingAction,
    /// The active player monster fainted; only a switch is accepted.
    AwaitingSwitch,
    Ended(BattleOutcome),
}

/// Which side of the battle a monster or effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleSide {
    Player,
    Enemy,
}

impl BattleSide {
    pub fn opponent(self) -> BattleSide {
        match self {
            BattleSide::Player => BattleSide::Enemy,
            BattleSide::Enemy => BattleSide::Player,
        }
    }
}

/// Weather over the battlefield. Structural hook only: no numeric effect yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Rain,
    Sun,
    Sandstorm,
}

/// Terrain the battle takes place on. Structural hook only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldCondition {
    TallGrass,
    Cave,
    Swamp,
}

/// In-battle stat stages for one side's active monster, -6..=+6 per stat.
/// Reset when the active monster changes and when the battle ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    stages: [i8; 6],
}

impl StatStages {
    pub fn get(&self, stat: StatName) -> i8 {
        self.stages[stat.index()]
    }

    /// Shift a stage by `delta`, clamping to [-6, 6]. Returns (old, new).
    pub fn modify(&mut self, stat: StatName, delta: i8) -> (i8, i8) {
        let old = self.stages[stat.index()];
        let new = (old + delta).clamp(-6, 6);
        self.stages[stat.index()] = new;
        (old, new)
    }

    pub fn clear(&mut self) {
        self.stages = [0; 6];
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSession {
    pub kind: BattleKind,
    pub phase: BattlePhase,
    /// Starts at 0, increments once per resolved turn.
    pub turn: u32,
    pub player_team: Vec<MonsterInst>,
    pub enemy_team: Vec<MonsterInst>,
    pub active_player_index: usize,
    pub active_enemy_index: usize,
    pub player_stages: StatStages,
    pub enemy_stages: StatStages,
    pub weather: Option<Weather>,
    pub field: Option<FieldCondition>,
    /// Escape attempts so far; wild battles only.
    pub run_attempts: u32,
}

impl BattleSession {
    pub fn new(
        player_team: Vec<MonsterInst>,
        enemy_team: Vec<MonsterInst>,
        kind: BattleKind,
    ) -> Self {
        Self {
            kind,
            phase: BattlePhase::AwaitingAction,
            turn: 0,
            player_team,
            enemy_team,
            active_player_index: 0,
            active_enemy_index: 0,
            player_stages: StatStages::default(),
            enemy_stages: StatStages::default(),
            weather: None,
            field: None,
            run_attempts: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, BattlePhase::Ended(_))
    }

    pub fn active(&self, side: BattleSide) -> Option<&MonsterInst> {
        match side {
            BattleSide::Player => self.player_team.get(self.active_player_index),
            BattleSide::Enemy => self.enemy_team.get(self.active_enemy_index),
        }
    }

    pub fn active_mut(&mut self, side: BattleSide) -> Option<&mut MonsterInst> {
        match side {
            BattleSide::Player => self.player_team.get_mut(self.active_player_index),
            BattleSide::Enemy => self.enemy_team.get_mut(self.active_enemy_index),
        }
    }

    pub fn stages(&self, side: BattleSide) -> &StatStages {
        match side {
            BattleSide::Player => &self.player_stages,
            BattleSide::Enemy => &self.enemy_stages,
        }
    }

    pub fn stages_mut(&mut self, side: BattleSide) -> &mut StatStages {
        match side {
            BattleSide::Player => &mut self.player_stages,
            BattleSide::Enemy => &mut self.enemy_stages,
        }
    }

    /// Index of the first non-fainted monster on a side, excluding the
    /// current active slot.
    pub fn next_healthy(&self, side: BattleSide) -> Option<usize> {
        let (team, active) = match side {
            BattleSide::Player => (&self.player_team, self.active_player_index),
            BattleSide::Enemy => (&self.enemy_team, self.active_enemy_index),
        };
        team.iter()
            .enumerate()
            .find(|(index, monster)| *index != active && !monster.is_fainted())
            .map(|(index, _)| index)
    }
}
