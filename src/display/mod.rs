//! The display surface the battle engine talks to.
//!
//! The engine only ever pushes state (fire and forget) and makes one
//! blocking call, [`DisplaySurface::wait_for_action`]. The production
//! surface is [`channel::SurfaceHandle`], which forwards everything to the
//! foreground thread's [`state::SurfaceState`].

pub mod channel;
pub mod state;

pub use channel::{surface_channel, SurfaceHandle, SurfaceUpdate};
pub use state::SurfaceState;

use crate::combat::{CharacterClass, ItemView, MonsterView, PlayerAction};
use crate::core::constants::{ACTION_BUTTON_COUNT, NO_ACTION_CODE};
use crate::core::error::{BattleError, Result};

/// Index of one of the four action buttons. Always in `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionSlot(u8);

impl ActionSlot {
    /// Returns `None` for anything outside `0..4`.
    pub fn new(index: usize) -> Option<Self> {
        if index < ACTION_BUTTON_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Meaning of this slot while the combat buttons are shown.
    pub fn action(self) -> PlayerAction {
        PlayerAction::ALL[self.index()]
    }

    /// Meaning of this slot while the class buttons are shown.
    pub fn class(self) -> CharacterClass {
        CharacterClass::ALL[self.index()]
    }
}

/// Result of one action request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionReply {
    Selected(ActionSlot),
    /// The wait was cancelled. The caller must stop, not treat this as slot 0.
    Aborted,
}

impl ActionReply {
    /// `0..=3` for a selection, `-1` for an abort.
    pub fn code(&self) -> i32 {
        match self {
            Self::Selected(slot) => slot.index() as i32,
            Self::Aborted => NO_ACTION_CODE,
        }
    }
}

/// Operations the battle engine performs on whatever shows the battle.
///
/// Everything except `wait_for_action` must return promptly.
pub trait DisplaySurface {
    fn update_monsters(&mut self, monsters: &[MonsterView]);

    fn update_inventory(&mut self, items: &[ItemView]);

    fn set_player_max_health(&mut self, max: i32);

    fn update_player_health(&mut self, current: i32);

    fn display_message(&mut self, message: &str);

    /// Fails immediately unless exactly four labels are given.
    fn set_action_buttons(&mut self, labels: &[&str]) -> Result<()>;

    fn set_buttons_enabled(&mut self, enabled: bool);

    /// Blocks until the player picks a button or the wait is cancelled.
    fn wait_for_action(&mut self) -> ActionReply;

    /// `None` clears the highlight.
    fn highlight_monster(&mut self, index: Option<usize>);
}

/// Checks label arity and takes owned copies.
pub fn validate_labels(labels: &[&str]) -> Result<[String; ACTION_BUTTON_COUNT]> {
    match labels {
        [a, b, c, d] => Ok([a.to_string(), b.to_string(), c.to_string(), d.to_string()]),
        _ => Err(BattleError::LabelCount {
            expected: ACTION_BUTTON_COUNT,
            got: labels.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_slot_rejects_out_of_range() {
        assert!(ActionSlot::new(0).is_some());
        assert!(ActionSlot::new(3).is_some());
        assert!(ActionSlot::new(4).is_none());
        assert!(ActionSlot::new(usize::MAX).is_none());
    }

    #[test]
    fn test_reply_codes() {
        for index in 0..4 {
            let slot = ActionSlot::new(index).unwrap();
            assert_eq!(ActionReply::Selected(slot).code(), index as i32);
        }
        assert_eq!(ActionReply::Aborted.code(), -1);
    }

    #[test]
    fn test_slot_meanings_follow_button_order() {
        let slot = ActionSlot::new(3).unwrap();
        assert_eq!(slot.action(), PlayerAction::UseItem);
        assert_eq!(slot.class(), CharacterClass::Ninja);
    }

    #[test]
    fn test_validate_labels_requires_exactly_four() {
        assert!(validate_labels(&["Attack", "Defend", "Heal", "Use Item"]).is_ok());

        let err = validate_labels(&["Attack", "Defend", "Heal"]).unwrap_err();
        assert!(matches!(
            err,
            BattleError::LabelCount {
                expected: 4,
                got: 3
            }
        ));
        assert!(validate_labels(&["a", "b", "c", "d", "e"]).is_err());
        assert!(validate_labels(&[]).is_err());
    }
}
