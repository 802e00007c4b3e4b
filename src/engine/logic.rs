//! The turn loop.
//!
//! The engine owns the battle state and a [`DisplaySurface`]. Each call to
//! [`BattleEngine::step`] performs exactly one phase and returns the next,
//! so the whole battle is `while !terminal { step() }`.

use std::thread;
use std::time::Duration;

use rand::Rng;

use super::types::BattlePhase;
use crate::combat::{BattleOutcome, BattleState, PlayerAction};
use crate::core::config::BattleConfig;
use crate::core::constants::{CLASS_BUTTON_LABELS, COMBAT_BUTTON_LABELS};
use crate::core::error::Result;
use crate::display::{ActionReply, DisplaySurface};

pub struct BattleEngine<S, R> {
    surface: S,
    rng: R,
    state: BattleState,
    config: BattleConfig,
    phase: BattlePhase,
}

impl<S: DisplaySurface, R: Rng> BattleEngine<S, R> {
    /// Rolls a fresh battle from `config`.
    pub fn new(surface: S, config: BattleConfig, mut rng: R) -> Self {
        let state = BattleState::from_config(&config, &mut rng);
        Self::with_state(surface, config, state, rng)
    }

    /// Starts from a prepared battle state instead of rolling one.
    pub fn with_state(surface: S, config: BattleConfig, state: BattleState, rng: R) -> Self {
        Self {
            surface,
            rng,
            state,
            config,
            phase: BattlePhase::Setup,
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Runs phases until the battle ends. Calling it again after the end
    /// returns the same outcome without playing another turn.
    pub fn run(&mut self) -> Result<BattleOutcome> {
        loop {
            if let Some(outcome) = self.phase.outcome() {
                return Ok(outcome);
            }
            self.step()?;
        }
    }

    /// Performs the current phase and moves to the next one.
    pub fn step(&mut self) -> Result<BattlePhase> {
        let next = match self.phase {
            BattlePhase::Setup => self.setup()?,
            BattlePhase::AwaitingPlayerAction => self.await_player_action(),
            BattlePhase::ResolvingPlayerAction(action) => self.resolve_player_action(action),
            BattlePhase::MonsterTurn => self.monster_turn(),
            BattlePhase::CheckOutcome => self.check_outcome(),
            terminal => terminal,
        };

        if next != self.phase {
            tracing::debug!(from = ?self.phase, to = ?next, "Phase transition");
        }
        self.phase = next;
        Ok(next)
    }

    fn setup(&mut self) -> Result<BattlePhase> {
        tracing::info!(
            monsters = self.state.monsters.len(),
            items = self.state.inventory.len(),
            "Battle starting"
        );

        if self.config.choose_class {
            self.surface.set_action_buttons(&CLASS_BUTTON_LABELS)?;
            self.surface.display_message("---- PICK YOUR BUILD ----");

            let slot = match self.surface.wait_for_action() {
                ActionReply::Selected(slot) => slot,
                ActionReply::Aborted => {
                    tracing::warn!("Class selection aborted");
                    return Ok(BattlePhase::Aborted);
                }
            };

            let class = slot.class();
            self.state.choose_class(class, &mut self.rng);
            tracing::info!(class = class.name(), stats = ?self.state.stats, "Class chosen");
            self.surface.display_message(class.description());
            pause(self.config.pacing.class_pause());
        }

        self.surface.set_player_max_health(self.state.vitals.max());
        self.push_state();
        self.surface.set_action_buttons(&COMBAT_BUTTON_LABELS)?;

        let welcome = match self.state.class {
            Some(class) => format!("Battle Start! You are a {}!", class.name()),
            None => "Battle Start! Choose your action.".to_string(),
        };
        self.surface.display_message(&welcome);

        // An empty monster list is decided before the first turn.
        Ok(BattlePhase::CheckOutcome)
    }

    fn await_player_action(&mut self) -> BattlePhase {
        self.surface.display_message(&format!(
            "Your turn! HP: {} | DMG: {}",
            self.state.vitals.current(),
            self.state.stats.damage
        ));

        match self.surface.wait_for_action() {
            ActionReply::Selected(slot) => BattlePhase::ResolvingPlayerAction(slot.action()),
            ActionReply::Aborted => {
                tracing::warn!("Action request aborted, stopping battle");
                BattlePhase::Aborted
            }
        }
    }

    fn resolve_player_action(&mut self, action: PlayerAction) -> BattlePhase {
        let event = self
            .state
            .resolve(action, self.config.targeting, &mut self.rng);
        tracing::debug!(?action, ?event, "Player action resolved");

        self.surface.display_message(&event.message());
        if let Some(index) = event.highlight() {
            self.push_monsters();
            self.surface.highlight_monster(Some(index));
            pause(self.config.pacing.highlight());
            self.surface.highlight_monster(None);
        }
        self.push_state();
        pause(self.config.pacing.action_pause());

        if self.state.count_living() > 0 && self.state.vitals.is_alive() {
            BattlePhase::MonsterTurn
        } else {
            BattlePhase::CheckOutcome
        }
    }

    fn monster_turn(&mut self) -> BattlePhase {
        if let Some(event) = self
            .state
            .monster_turn(self.config.targeting, &mut self.rng)
        {
            tracing::debug!(?event, "Monster turn resolved");
            self.surface.update_player_health(self.state.vitals.current());
            self.surface.display_message(&event.message());
            self.push_monsters();
            pause(self.config.pacing.action_pause());
        }
        BattlePhase::CheckOutcome
    }

    fn check_outcome(&mut self) -> BattlePhase {
        match self.state.check_outcome() {
            Some(outcome) => {
                let message = match outcome {
                    BattleOutcome::Victory => "🎉 VICTORY! You defeated all monsters!",
                    _ => "💀 DEFEAT! You have been defeated...",
                };
                tracing::info!(?outcome, hp = self.state.vitals.current(), "Battle over");
                self.surface.display_message(message);
                self.surface.set_buttons_enabled(false);
                outcome.into()
            }
            None => BattlePhase::AwaitingPlayerAction,
        }
    }

    fn push_monsters(&mut self) {
        let views: Vec<_> = self.state.monsters.iter().map(|m| m.view()).collect();
        self.surface.update_monsters(&views);
    }

    fn push_state(&mut self) {
        self.push_monsters();
        self.surface.update_inventory(&self.state.inventory.views());
        self.surface.update_player_health(self.state.vitals.current());
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
