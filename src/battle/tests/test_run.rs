//! Escape attempts: the speed-based chance formula, the per-attempt bonus,
//! and the trainer-battle restriction.

use pretty_assertions::assert_eq;

use crate::battle::events::BattleEvent;
use crate::battle::session::{BattleKind, BattleOutcome, BattlePhase, BattleSide};
use crate::battle::tests::common::{fixture_dex, scripted_engine, TestMonsterBuilder};
use crate::battle::PlayerAction;

#[test]
fn escape_succeeds_just_under_the_chance() {
    let dex = fixture_dex();
    let player = TestMonsterBuilder::new("embercub", 10)
        .with_abilities(&["scratch"])
        .build(&dex);
    let wild = TestMonsterBuilder::new("embercub", 10)
        .with_abilities(&["scratch"])
        .build(&dex);

    // Equal speeds: chance = 128 + 30 = 158, so a draw of 157 escapes.
    let mut engine = scripted_engine(&dex, vec![157]);
    engine.start_wild(vec![player], wild);

    let report = engine.execute_player_action(PlayerAction::Run).unwrap();

    assert!(report.success);
    assert_eq!(report.outcome, Some(BattleOutcome::Escaped));
    assert_eq!(
        engine.session().unwrap().phase,
        BattlePhase::Ended(BattleOutcome::Escaped)
    );

    // The ended session can be reclaimed, teams intact.
    let session = engine.finish().expect("battle is over");
    assert_eq!(session.player_team.len(), 1);
    assert!(engine.session().is_none());
}

#[test]
fn failed_escape_raises_the_next_attempts_chance() {
    let dex = fixture_dex();
    let player = TestMonsterBuilder::new("embercub", 10)
        .with_abilities(&["scratch"])
        .build(&dex);
    let wild = TestMonsterBuilder::new("embercub", 10)
        .with_abilities(&["scratch"])
        .build(&dex);

    // Attempt 1: draw 158 against chance 158 fails, the enemy attacks.
    // Attempt 2: chance rises to 188, so a draw of 187 escapes.
    let mut engine = scripted_engine(&dex, vec![158, 0, 0, 15, 187]);
    engine.start_wild(vec![player], wild);

    let first = engine.execute_player_action(PlayerAction::Run).unwrap();
    assert!(first.success);
    assert!(first.outcome.is_none());
    assert!(first.events.iter().any(|event| matches!(
        event,
        BattleEvent::EscapeAttempted {
            attempt: 1,
            success: false,
        }
    )));
    let session = engine.session().unwrap();
    assert_eq!(session.run_attempts, 1);
    // Wild Embercub's Scratch connected in the meantime.
    assert_eq!(session.active(BattleSide::Player).unwrap().current_hp, 21);

    let second = engine.execute_player_action(PlayerAction::Run).unwrap();
    assert_eq!(second.outcome, Some(BattleOutcome::Escaped));
    assert!(second.events.iter().any(|event| matches!(
        event,
        BattleEvent::EscapeAttempted {
            attempt: 2,
            success: true,
        }
    )));
}

#[test]
fn running_from_a_trainer_battle_is_rejected() {
    let dex = fixture_dex();
    let player = TestMonsterBuilder::new("embercub", 10)
        .with_abilities(&["scratch"])
        .build(&dex);
    let enemy = TestMonsterBuilder::new("sproutle", 10)
        .with_abilities(&["tackle"])
        .build(&dex);

    let mut engine = scripted_engine(&dex, vec![]);
    engine.start(vec![player], vec![enemy], BattleKind::Trainer);

    let report = engine.execute_player_action(PlayerAction::Run).unwrap();
    assert!(!report.success);
    assert!(report.message.contains("can't run"));
    assert_eq!(engine.session().unwrap().run_attempts, 0);
}
