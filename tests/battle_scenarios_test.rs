//! Integration test: full battles across the thread boundary
//!
//! Each test runs the engine on a worker thread against the real channel
//! surface, while the test thread plays the foreground: it drains pushes
//! into a `SurfaceState` and answers action requests from a script.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

use monster_battle::combat::{
    BattleOutcome, BattleState, CharacterClass, Inventory, ItemKind, Monster, PlayerVitals,
    TargetPolicy,
};
use monster_battle::core::config::{BattleConfig, Pacing};
use monster_battle::core::constants::COMBAT_BUTTON_LABELS;
use monster_battle::display::{surface_channel, SurfaceState, SurfaceUpdate};
use monster_battle::engine::BattleEngine;
use rand::rngs::mock::StepRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Helper Functions
// =============================================================================

fn quick_config(choose_class: bool) -> BattleConfig {
    BattleConfig {
        choose_class,
        targeting: TargetPolicy::FirstLiving,
        pacing: Pacing::instant(),
        ..BattleConfig::default()
    }
}

fn monster(health: i32, damage: f64) -> Monster {
    Monster::new("Test Goblin".to_string(), health, damage, 3)
}

/// Plays the foreground until the engine hangs up. Requests beyond the
/// end of the script are cancelled, like the player pressing `q`.
fn drive_foreground(rx: Receiver<SurfaceUpdate>, codes: &[usize]) -> SurfaceState {
    let mut script: VecDeque<usize> = codes.iter().copied().collect();
    let mut surface = SurfaceState::new();

    loop {
        let connected = surface.drain(&rx);
        if surface.is_awaiting() {
            match script.pop_front() {
                Some(code) => assert!(surface.select_action(code)),
                None => surface.cancel(),
            }
        }
        if !connected {
            return surface;
        }
        thread::sleep(Duration::from_millis(1));
    }
}

fn run_battle<R>(
    config: BattleConfig,
    state: BattleState,
    rng: R,
    codes: &[usize],
) -> (BattleOutcome, BattleState, SurfaceState)
where
    R: Rng + Send + 'static,
{
    let (handle, rx) = surface_channel();
    let worker = thread::spawn(move || {
        let mut engine = BattleEngine::with_state(handle, config, state, rng);
        let outcome = engine.run().expect("battle should not error");
        (outcome, engine.state().clone())
    });

    let surface = drive_foreground(rx, codes);
    let (outcome, final_state) = worker.join().expect("engine thread panicked");
    (outcome, final_state, surface)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_bomb_overkill_victory_reaches_the_display() {
    let state = BattleState::new(
        vec![monster(20, 10.0)],
        Inventory::from_kinds(&[ItemKind::Bomb { damage: 25 }]),
        PlayerVitals::new(100),
    );

    let (outcome, final_state, surface) = run_battle(
        quick_config(false),
        state,
        ChaCha8Rng::seed_from_u64(1),
        &[3],
    );

    assert_eq!(outcome, BattleOutcome::Victory);
    assert_eq!(final_state.monsters[0].health, -5);

    // The view floors health at zero and marks the monster dead.
    assert_eq!(surface.monsters.len(), 1);
    assert_eq!(surface.monsters[0].health, 0);
    assert!(!surface.monsters[0].alive);
    assert!(surface.inventory.is_empty());
    assert_eq!(
        surface.latest_message(),
        Some("🎉 VICTORY! You defeated all monsters!")
    );
    assert!(!surface.buttons_enabled);
    assert!(!surface.is_awaiting());
}

#[test]
fn test_potion_heal_then_quit_aborts() {
    let state = BattleState::new(
        vec![monster(50, 0.0)],
        Inventory::from_kinds(&[ItemKind::HealthPotion { heal: 30 }]),
        PlayerVitals::with_current(100, 50),
    );

    let (outcome, final_state, surface) = run_battle(
        quick_config(false),
        state,
        ChaCha8Rng::seed_from_u64(2),
        &[3],
    );

    assert_eq!(outcome, BattleOutcome::Aborted);
    assert_eq!(final_state.vitals.current(), 80);
    assert!(final_state.inventory.is_empty());
    assert_eq!(surface.health, 80);
    assert!(surface.inventory.is_empty());
}

#[test]
fn test_empty_inventory_then_lethal_hit_is_defeat() {
    // StepRng(u64::MAX) draws just under 1.0, so 16.0 damage rolls 15.
    let state = BattleState::new(
        vec![monster(50, 16.0)],
        Inventory::default(),
        PlayerVitals::with_current(100, 10),
    );

    let (outcome, final_state, surface) = run_battle(
        quick_config(false),
        state,
        StepRng::new(u64::MAX, 0),
        &[3],
    );

    assert_eq!(outcome, BattleOutcome::Defeat);
    assert_eq!(final_state.vitals.current(), 0);
    assert_eq!(final_state.monsters[0].health, 50);
    assert_eq!(surface.health, 0);
    assert_eq!(
        surface.latest_message(),
        Some("💀 DEFEAT! You have been defeated...")
    );
}

#[test]
fn test_class_pick_swaps_in_combat_buttons() {
    let state = BattleState::new(vec![], Inventory::default(), PlayerVitals::new(100));

    let (outcome, final_state, surface) = run_battle(
        quick_config(true),
        state,
        ChaCha8Rng::seed_from_u64(3),
        &[0],
    );

    assert_eq!(outcome, BattleOutcome::Victory);
    assert_eq!(final_state.class, Some(CharacterClass::Fighter));
    assert!(final_state.stats.shield < 50);
    assert_eq!(surface.labels, COMBAT_BUTTON_LABELS.map(String::from));
    assert!(surface
        .messages
        .contains(&"Battle Start! You are a Fighter!".to_string()));
}

#[test]
fn test_quit_during_class_pick_leaves_battle_untouched() {
    let state = BattleState::new(
        vec![monster(40, 20.0), monster(60, 20.0)],
        Inventory::default(),
        PlayerVitals::new(100),
    );

    let (outcome, final_state, _surface) = run_battle(
        quick_config(true),
        state,
        ChaCha8Rng::seed_from_u64(4),
        &[],
    );

    assert_eq!(outcome, BattleOutcome::Aborted);
    assert_eq!(final_state.class, None);
    assert_eq!(final_state.vitals.current(), 100);
    assert_eq!(final_state.monsters[0].health, 40);
    assert_eq!(final_state.monsters[1].health, 60);
}

#[test]
fn test_attacks_until_the_battle_is_decided() {
    // Default stats hit for 30..60, so a few attacks settle a small fight
    // one way or the other.
    let state = BattleState::new(
        vec![monster(45, 12.0), monster(45, 12.0)],
        Inventory::default(),
        PlayerVitals::new(100),
    );

    let (outcome, final_state, surface) = run_battle(
        quick_config(false),
        state,
        ChaCha8Rng::seed_from_u64(5),
        &[0; 10],
    );

    assert_eq!(outcome, BattleOutcome::Victory);
    assert_eq!(final_state.count_living(), 0);
    assert!(final_state.vitals.is_alive());
    assert!(surface.monsters.iter().all(|m| !m.alive));
    assert_eq!(surface.highlight, None);
}
