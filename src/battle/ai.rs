//! Enemy decision-making.
//!
//! The engine only depends on the [`EnemyStrategy`] trait, so richer AI can
//! replace [`RandomStrategy`] without touching turn resolution.

use crate::battle::session::{BattleSession, BattleSide};
use crate::dex::Dex;
use crate::rng::RandomSource;

/// A strategy that picks the enemy's next ability.
pub trait EnemyStrategy {
    /// Returns the ability id to use, or `None` to do nothing this turn
    /// (e.g. the active enemy knows no abilities).
    fn choose_ability(
        &self,
        session: &BattleSession,
        dex: &Dex,
        rng: &mut dyn RandomSource,
    ) -> Option<String>;
}

/// Uniform-random choice among the active enemy's known abilities.
#[derive(Debug, Default)]
pub struct RandomStrategy;

impl EnemyStrategy for RandomStrategy {
    fn choose_ability(
        &self,
        session: &BattleSession,
        _dex: &Dex,
        rng: &mut dyn RandomSource,
    ) -> Option<String> {
        let enemy = session.active(BattleSide::Enemy)?;
        if enemy.known_abilities.is_empty() {
            return None;
        }
        let index = rng.roll(enemy.known_abilities.len() as u32, "enemy ability choice");
        Some(enemy.known_abilities[index as usize].clone())
    }
}
