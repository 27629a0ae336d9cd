//! Turn resolution.
//!
//! The engine owns the battle session and resolves one player action per
//! call: the player's action always completes (including faint and
//! experience bookkeeping) before the automatic enemy action, and the enemy
//! result is appended to, never interleaved with, the player's. Soft
//! gameplay failures come back as [`TurnReport`]s with `success: false`;
//! only unknown reference-data ids surface as [`DexError`].

use std::sync::Arc;

use crate::abilities::{AbilityCategory, EffectKind, TargetSelector};
use crate::battle::ai::{EnemyStrategy, RandomStrategy};
use crate::battle::events::{BattleEvent, EventBus, EventSink, NullSink};
use crate::battle::session::{
    BattleKind, BattleOutcome, BattlePhase, BattleSession, BattleSide,
};
use crate::battle::stats::{effective_attack, effective_defense, effective_speed};
use crate::dex::Dex;
use crate::errors::DexResult;
use crate::monster::{
    CatchOptions, ExperienceOutcome, MonsterInst, MonsterManager, StatusCondition,
};
use crate::rng::{damage_factor, percent_chance, RandomSource};
use crate::stats::experience_yield;
use crate::typechart::TypeChart;

/// One player intent per engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    /// Use an ability the active monster knows.
    Ability { ability_id: String },
    /// Use an item. `target` is a party slot for heal items and ignored for
    /// capture items.
    Item {
        item_id: String,
        target: Option<usize>,
    },
    /// Swap the active monster for the party member at `team_index`.
    Switch { team_index: usize },
    /// Attempt to flee a wild battle.
    Run,
}

/// Result of one engine call.
///
/// `success: false` means the action was rejected for a gameplay reason and
/// nothing changed; callers must check it before reading the other fields.
#[derive(Debug, Clone, Default)]
pub struct TurnReport {
    pub success: bool,
    pub message: String,
    /// Everything that happened, in order: the player's action first, then
    /// the enemy's, then upkeep.
    pub events: Vec<BattleEvent>,
    /// The active player monster fainted and a replacement must be chosen.
    pub need_switch: bool,
    /// Set when this action ended the battle.
    pub outcome: Option<BattleOutcome>,
    /// Experience bookkeeping from a defeated enemy, when one fainted.
    pub experience: Option<ExperienceOutcome>,
    /// The captured monster, moved out of the enemy team on a successful
    /// catch.
    pub caught: Option<MonsterInst>,
}

impl TurnReport {
    fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.success = false;
        self.message = message.into();
    }
}

/// The battle state machine.
pub struct BattleEngine {
    dex: Arc<Dex>,
    manager: MonsterManager,
    chart: TypeChart,
    rng: Box<dyn RandomSource>,
    strategy: Box<dyn EnemyStrategy>,
    sink: Box<dyn EventSink>,
    session: Option<BattleSession>,
    bus: EventBus,
}

impl BattleEngine {
    pub fn new(dex: Arc<Dex>, chart: TypeChart, rng: Box<dyn RandomSource>) -> Self {
        Self {
            manager: MonsterManager::new(dex.clone()),
            dex,
            chart,
            rng,
            strategy: Box::new(RandomStrategy),
            sink: Box::new(NullSink),
            session: None,
            bus: EventBus::new(),
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn EnemyStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn session(&self) -> Option<&BattleSession> {
        self.session.as_ref()
    }

    pub fn manager(&self) -> &MonsterManager {
        &self.manager
    }

    /// Begin a battle. The first non-fainted member of each team leads.
    pub fn start(
        &mut self,
        player_team: Vec<MonsterInst>,
        enemy_team: Vec<MonsterInst>,
        kind: BattleKind,
    ) -> TurnReport {
        if self.session.as_ref().is_some_and(|s| s.is_active()) {
            return TurnReport::failure("a battle is already in progress");
        }
        if player_team.is_empty() || enemy_team.is_empty() {
            return TurnReport::failure("both sides need at least one monster");
        }

        self.bus = EventBus::new();
        let mut session = BattleSession::new(player_team, enemy_team, kind);
        session.active_player_index = session
            .player_team
            .iter()
            .position(|m| !m.is_fainted())
            .unwrap_or(0);
        session.active_enemy_index = session
            .enemy_team
            .iter()
            .position(|m| !m.is_fainted())
            .unwrap_or(0);

        log::debug!(
            "battle started: {:?}, {} vs {} monsters",
            kind,
            session.player_team.len(),
            session.enemy_team.len()
        );
        self.emit(BattleEvent::BattleStarted { kind });
        self.session = Some(session);

        let mut report = TurnReport::ok();
        report.message = "the battle begins".to_string();
        report.events = self.bus.take();
        report
    }

    /// Begin a wild battle against a single monster.
    pub fn start_wild(&mut self, player_team: Vec<MonsterInst>, wild: MonsterInst) -> TurnReport {
        self.start(player_team, vec![wild], BattleKind::Wild)
    }

    /// Take the ended session back, teams and all. Returns `None` while a
    /// battle is still active.
    pub fn finish(&mut self) -> Option<BattleSession> {
        if self.session.as_ref().is_some_and(|s| !s.is_active()) {
            self.session.take()
        } else {
            None
        }
    }

    /// Resolve one player action, then (if the action succeeded and the
    /// battle continues) one enemy action, the turn advance, and status
    /// upkeep.
    pub fn execute_player_action(&mut self, action: PlayerAction) -> DexResult<TurnReport> {
        let Some(mut session) = self.session.take() else {
            return Ok(TurnReport::failure("no battle in progress"));
        };
        self.bus = EventBus::new();

        let result = self.dispatch(&mut session, action);
        self.session = Some(session);

        let mut report = result?;
        report.events = self.bus.take();
        Ok(report)
    }

    fn dispatch(
        &mut self,
        session: &mut BattleSession,
        action: PlayerAction,
    ) -> DexResult<TurnReport> {
        match session.phase {
            BattlePhase::Ended(_) => return Ok(TurnReport::failure("the battle is already over")),
            BattlePhase::AwaitingSwitch if !matches!(action, PlayerAction::Switch { .. }) => {
                return Ok(TurnReport::failure("a replacement monster must be sent out"));
            }
            _ => {}
        }
        let forced_switch = session.phase == BattlePhase::AwaitingSwitch;

        log::debug!("turn {}: player action {:?}", session.turn, action);
        let mut report = TurnReport::ok();
        match action {
            PlayerAction::Ability { ability_id } => {
                self.player_ability(session, &ability_id, &mut report)?
            }
            PlayerAction::Item { item_id, target } => {
                self.use_item(session, &item_id, target, &mut report)?
            }
            PlayerAction::Switch { team_index } => {
                self.player_switch(session, team_index, &mut report)
            }
            PlayerAction::Run => self.attempt_run(session, &mut report),
        }

        // A forced switch completes the enemy's turn; the enemy already
        // acted when it caused the faint.
        if report.success && session.is_active() && !forced_switch {
            // A replacement enemy sent out after a knockout does not act the
            // turn it enters. Experience is only awarded for knockouts, so it
            // doubles as the marker.
            if report.experience.is_none() {
                self.enemy_action(session, &mut report)?;
            }
            if session.is_active() {
                session.turn += 1;
                self.emit(BattleEvent::TurnStarted { turn: session.turn });
                self.status_upkeep(session, &mut report);
                self.field_upkeep(session);
            }
        }

        Ok(report)
    }

    // === Player actions ===

    fn player_ability(
        &mut self,
        session: &mut BattleSession,
        ability_id: &str,
        report: &mut TurnReport,
    ) -> DexResult<()> {
        let Some(user) = session.active(BattleSide::Player) else {
            report.fail("no active monster");
            return Ok(());
        };
        if !user.knows_ability(ability_id) {
            report.fail(format!("{} doesn't know {}", user.name, ability_id));
            return Ok(());
        }

        let defender_fainted =
            self.resolve_ability(session, BattleSide::Player, ability_id, report)?;
        if defender_fainted {
            self.handle_enemy_faint(session, report)?;
        }
        Ok(())
    }

    fn use_item(
        &mut self,
        session: &mut BattleSession,
        item_id: &str,
        target: Option<usize>,
        report: &mut TurnReport,
    ) -> DexResult<()> {
        let item = self.dex.item(item_id)?.clone();

        match item.effect {
            crate::items::ItemEffect::Heal { amount } => {
                let index = target.unwrap_or(session.active_player_index);
                let Some(member) = session.player_team.get_mut(index) else {
                    report.fail(format!("no party member in slot {}", index));
                    return Ok(());
                };
                let outcome = member.heal(amount);
                let name = member.name.clone();
                self.emit(BattleEvent::ItemUsed {
                    item: item.name,
                    target: name.clone(),
                });
                self.emit(BattleEvent::Healed {
                    target: name,
                    amount: outcome.heal_amount,
                    new_hp: outcome.current_hp,
                });
            }
            crate::items::ItemEffect::Capture { ball_bonus } => {
                if session.kind != BattleKind::Wild {
                    report.fail("can't capture another trainer's monster");
                    return Ok(());
                }
                let Some(enemy) = session.active(BattleSide::Enemy) else {
                    report.fail("nothing to capture");
                    return Ok(());
                };
                // Faints end or advance the battle immediately, so a fainted
                // active enemy is unreachable; guard anyway.
                if enemy.is_fainted() {
                    report.fail("nothing to capture");
                    return Ok(());
                }

                let options = CatchOptions {
                    ball_bonus,
                    status_bonus: enemy.status.is_some(),
                };
                let name = enemy.name.clone();
                let caught = self
                    .manager
                    .attempt_catch(enemy, &options, self.rng.as_mut());

                self.emit(BattleEvent::ItemUsed {
                    item: item.name,
                    target: name.clone(),
                });
                if caught {
                    // Explicit ownership transfer out of the enemy team.
                    let monster = session.enemy_team.remove(session.active_enemy_index);
                    self.emit(BattleEvent::MonsterCaught { name });
                    self.end_battle(session, BattleOutcome::Caught, report);
                    report.caught = Some(monster);
                } else {
                    report.message = format!("{} broke free!", name);
                }
            }
        }
        Ok(())
    }

    fn player_switch(
        &mut self,
        session: &mut BattleSession,
        team_index: usize,
        report: &mut TurnReport,
    ) {
        if team_index >= session.player_team.len() {
            report.fail(format!("no party member in slot {}", team_index));
            return;
        }
        if team_index == session.active_player_index
            && !session.player_team[team_index].is_fainted()
        {
            report.fail(format!(
                "{} is already in battle",
                session.player_team[team_index].name
            ));
            return;
        }
        if session.player_team[team_index].is_fainted() {
            report.fail(format!(
                "{} has no energy left to battle",
                session.player_team[team_index].name
            ));
            return;
        }

        let old_name = session
            .active(BattleSide::Player)
            .map(|m| m.name.clone())
            .unwrap_or_default();
        session.active_player_index = team_index;
        session.player_stages.clear();
        session.phase = BattlePhase::AwaitingAction;

        let new_name = session.player_team[team_index].name.clone();
        self.emit(BattleEvent::MonsterSwitched {
            side: BattleSide::Player,
            old_name,
            new_name,
        });
    }

    fn attempt_run(&mut self, session: &mut BattleSession, report: &mut TurnReport) {
        if session.kind == BattleKind::Trainer {
            report.fail("can't run from a trainer battle");
            return;
        }

        // The attempt counter increments whether or not the escape succeeds.
        session.run_attempts += 1;

        let player_speed = session
            .active(BattleSide::Player)
            .map(|m| effective_speed(m, session.stages(BattleSide::Player)))
            .unwrap_or(1)
            .max(1) as u32;
        let enemy_speed = session
            .active(BattleSide::Enemy)
            .map(|m| effective_speed(m, session.stages(BattleSide::Enemy)))
            .unwrap_or(1)
            .max(1) as u32;

        let escape_chance = player_speed * 128 / enemy_speed + 30 * session.run_attempts;
        let draw = self.rng.roll(256, "escape roll");
        let success = draw < escape_chance;

        log::debug!(
            "escape attempt {}: chance {}, draw {}",
            session.run_attempts,
            escape_chance,
            draw
        );
        self.emit(BattleEvent::EscapeAttempted {
            attempt: session.run_attempts,
            success,
        });
        if success {
            self.end_battle(session, BattleOutcome::Escaped, report);
        } else {
            report.message = "couldn't escape!".to_string();
        }
    }

    // === Enemy action ===

    fn enemy_action(
        &mut self,
        session: &mut BattleSession,
        report: &mut TurnReport,
    ) -> DexResult<()> {
        let Some(ability_id) =
            self.strategy
                .choose_ability(session, &self.dex, self.rng.as_mut())
        else {
            return Ok(());
        };

        let defender_fainted =
            self.resolve_ability(session, BattleSide::Enemy, &ability_id, report)?;
        if defender_fainted {
            self.handle_player_faint(session, report);
        }
        Ok(())
    }

    // === Ability resolution (shared between sides) ===

    /// Resolve one ability use. Returns whether the defender fainted.
    fn resolve_ability(
        &mut self,
        session: &mut BattleSession,
        side: BattleSide,
        ability_id: &str,
        report: &mut TurnReport,
    ) -> DexResult<bool> {
        let ability = self.dex.ability(ability_id)?.clone();

        let Some(user) = session.active(side) else {
            report.fail("no active monster");
            return Ok(false);
        };
        let user_name = user.name.clone();
        let user_level = user.level;
        let user_element = user.element;

        let Some(target) = session.active(side.opponent()) else {
            report.fail("no opposing monster");
            return Ok(false);
        };
        let target_name = target.name.clone();
        let target_element = target.element;

        self.emit(BattleEvent::AbilityUsed {
            side,
            user: user_name.clone(),
            ability: ability.name.clone(),
        });

        // Accuracy: a draw in [0, 100) must be at or below the accuracy.
        let roll = self.rng.roll(100, "accuracy roll");
        if roll > ability.accuracy as u32 {
            self.emit(BattleEvent::AbilityMissed {
                user: user_name,
                ability: ability.name,
            });
            return Ok(false);
        }

        if ability.category != AbilityCategory::Status {
            let power = ability.power.unwrap_or(0) as f64;
            let (attack, defense) = match (session.active(side), session.active(side.opponent())) {
                (Some(user), Some(target)) => (
                    effective_attack(user, session.stages(side), ability.category) as f64,
                    effective_defense(target, session.stages(side.opponent()), ability.category)
                        .max(1) as f64,
                ),
                _ => (0.0, 1.0),
            };

            let stab = if ability.element == user_element { 1.5 } else { 1.0 };
            let type_multiplier = self.chart.multiplier(ability.element, target_element);
            let spread = damage_factor(self.rng.as_mut());

            let base = (2.0 * user_level as f64 / 5.0 + 2.0) * power * attack / defense / 50.0
                + 2.0;
            let damage = (base * stab * type_multiplier * spread).floor() as u16;

            log::trace!(
                "{} -> {}: power {}, atk {}, def {}, stab {}, eff {}, spread {:.2} => {}",
                user_name,
                target_name,
                power,
                attack,
                defense,
                stab,
                type_multiplier,
                spread,
                damage
            );
            self.emit(BattleEvent::Effectiveness {
                multiplier: type_multiplier,
            });

            if damage > 0 {
                let mut dealt = None;
                if let Some(target) = session.active_mut(side.opponent()) {
                    dealt = Some(target.take_damage(damage));
                }
                if let Some(outcome) = dealt {
                    self.emit(BattleEvent::DamageDealt {
                        target: target_name.clone(),
                        amount: outcome.previous_hp - outcome.current_hp,
                        remaining_hp: outcome.current_hp,
                    });
                }
            }
        }

        // Secondary effects, each gated by its own probability roll.
        for effect in &ability.effects {
            if !percent_chance(self.rng.as_mut(), effect.chance, "effect chance") {
                continue;
            }
            let effect_side = match effect.target {
                TargetSelector::Foe => side.opponent(),
                TargetSelector::User => side,
            };

            match &effect.kind {
                EffectKind::StatStage { stat, delta } => {
                    let name = session
                        .active(effect_side)
                        .map(|m| m.name.clone())
                        .unwrap_or_default();
                    let (old_stage, new_stage) =
                        session.stages_mut(effect_side).modify(*stat, *delta);
                    if old_stage != new_stage {
                        self.emit(BattleEvent::StatStageChanged {
                            target: name,
                            stat: *stat,
                            old_stage,
                            new_stage,
                        });
                    }
                }
                EffectKind::InflictStatus { status } => {
                    let mut applied = None;
                    if let Some(monster) = session.active_mut(effect_side) {
                        if !monster.is_fainted() && monster.apply_status(*status) {
                            applied = Some(monster.name.clone());
                        }
                    }
                    // Already-statused targets are silently unaffected.
                    if let Some(name) = applied {
                        self.emit(BattleEvent::StatusApplied {
                            target: name,
                            status: *status,
                        });
                    }
                }
                EffectKind::HealPercent { percent } => {
                    let mut healed = None;
                    if let Some(monster) = session.active_mut(effect_side) {
                        let amount = (monster.max_hp() as u32 * *percent as u32 / 100) as u16;
                        let outcome = monster.heal(Some(amount));
                        healed = Some((monster.name.clone(), outcome));
                    }
                    if let Some((name, outcome)) = healed {
                        self.emit(BattleEvent::Healed {
                            target: name,
                            amount: outcome.heal_amount,
                            new_hp: outcome.current_hp,
                        });
                    }
                }
            }
        }

        let fainted = session
            .active(side.opponent())
            .map(|m| m.is_fainted())
            .unwrap_or(false);
        if fainted {
            self.emit(BattleEvent::MonsterFainted {
                side: side.opponent(),
                name: target_name,
            });
        }
        Ok(fainted)
    }

    // === Faint handling ===

    fn handle_enemy_faint(
        &mut self,
        session: &mut BattleSession,
        report: &mut TurnReport,
    ) -> DexResult<()> {
        // Experience for the defeated monster goes to the player's active.
        let exp_amount = {
            let Some(enemy) = session.active(BattleSide::Enemy) else {
                return Ok(());
            };
            let species = self.dex.species(&enemy.species_id)?;
            experience_yield(species.exp_yield, enemy.level)
        };

        let mut award = None;
        if let Some(user) = session.active_mut(BattleSide::Player) {
            let name = user.name.clone();
            let outcome = self.manager.award_experience(user, exp_amount)?;
            award = Some((name, user.level, outcome));
        }
        if let Some((name, level, outcome)) = award {
            self.emit(BattleEvent::ExperienceGained {
                name: name.clone(),
                amount: exp_amount,
            });
            if outcome.leveled_up {
                self.emit(BattleEvent::LeveledUp {
                    name: name.clone(),
                    level,
                });
            }
            for ability in &outcome.new_abilities {
                self.emit(BattleEvent::AbilityLearned {
                    name: name.clone(),
                    ability: ability.clone(),
                });
            }
            if let Some(target_species) = &outcome.evolution_target {
                self.emit(BattleEvent::EvolutionReady {
                    name,
                    target_species: target_species.clone(),
                });
            }
            report.experience = Some(outcome);
        }

        self.promote_or_end_enemy(session, report);
        Ok(())
    }

    fn handle_player_faint(&mut self, session: &mut BattleSession, report: &mut TurnReport) {
        if session.next_healthy(BattleSide::Player).is_some() {
            session.phase = BattlePhase::AwaitingSwitch;
            report.need_switch = true;
        } else {
            self.end_battle(session, BattleOutcome::Defeat, report);
        }
    }

    fn promote_or_end_enemy(&mut self, session: &mut BattleSession, report: &mut TurnReport) {
        if let Some(next) = session.next_healthy(BattleSide::Enemy) {
            let old_name = session
                .active(BattleSide::Enemy)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            session.active_enemy_index = next;
            session.enemy_stages.clear();
            let new_name = session.enemy_team[next].name.clone();
            self.emit(BattleEvent::MonsterSwitched {
                side: BattleSide::Enemy,
                old_name,
                new_name,
            });
        } else {
            self.end_battle(session, BattleOutcome::Victory, report);
        }
    }

    fn end_battle(
        &mut self,
        session: &mut BattleSession,
        outcome: BattleOutcome,
        report: &mut TurnReport,
    ) {
        session.phase = BattlePhase::Ended(outcome);
        session.player_stages.clear();
        session.enemy_stages.clear();
        log::debug!("battle ended after {} turns: {:?}", session.turn, outcome);
        self.emit(BattleEvent::BattleEnded { outcome });
        report.outcome = Some(outcome);
    }

    // === Per-turn upkeep ===

    /// Burn and poison damage the afflicted active monster on each side at
    /// the start of a new turn.
    fn status_upkeep(&mut self, session: &mut BattleSession, report: &mut TurnReport) {
        for side in [BattleSide::Player, BattleSide::Enemy] {
            if !session.is_active() {
                break;
            }

            let tick = session.active(side).and_then(|m| {
                if m.is_fainted() {
                    return None;
                }
                match m.status {
                    Some(status @ (StatusCondition::Burn | StatusCondition::Poison)) => {
                        Some(((m.max_hp() / 8).max(1), status))
                    }
                    _ => None,
                }
            });
            let Some((damage, status)) = tick else {
                continue;
            };

            let mut result = None;
            if let Some(monster) = session.active_mut(side) {
                let outcome = monster.take_damage(damage);
                result = Some((monster.name.clone(), outcome));
            }
            let Some((name, outcome)) = result else {
                continue;
            };

            self.emit(BattleEvent::StatusDamage {
                target: name.clone(),
                status,
                damage: outcome.previous_hp - outcome.current_hp,
                remaining_hp: outcome.current_hp,
            });
            if outcome.fainted {
                self.emit(BattleEvent::MonsterFainted { side, name });
                match side {
                    // No experience for upkeep faints; only direct ability
                    // knockouts award it.
                    BattleSide::Enemy => self.promote_or_end_enemy(session, report),
                    BattleSide::Player => self.handle_player_faint(session, report),
                }
            }
        }
    }

    /// Weather and field conditions are structural extension points; they
    /// carry no numeric effect yet.
    fn field_upkeep(&mut self, _session: &mut BattleSession) {}

    fn emit(&mut self, event: BattleEvent) {
        self.sink.publish(&event);
        self.bus.push(event);
    }
}
