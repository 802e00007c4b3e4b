//! Foreground mirror of everything the engine has pushed.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, SyncSender, TryRecvError};

use super::channel::SurfaceUpdate;
use super::ActionSlot;
use crate::combat::{ItemView, MonsterView};
use crate::core::constants::{ACTION_BUTTON_COUNT, BASE_PLAYER_MAX_HEALTH, MESSAGE_HISTORY_CAPACITY};

#[derive(Debug)]
pub struct SurfaceState {
    pub monsters: Vec<MonsterView>,
    pub inventory: Vec<ItemView>,
    pub health: i32,
    pub max_health: i32,
    /// Oldest first, newest last.
    pub messages: VecDeque<String>,
    pub labels: [String; ACTION_BUTTON_COUNT],
    pub buttons_enabled: bool,
    pub highlight: Option<usize>,
    /// Button under the keyboard cursor.
    pub cursor: usize,
    pending: Option<SyncSender<ActionSlot>>,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceState {
    pub fn new() -> Self {
        let mut messages = VecDeque::with_capacity(MESSAGE_HISTORY_CAPACITY);
        messages.push_back("Welcome to Monster Battle!".to_string());
        Self {
            monsters: Vec::new(),
            inventory: Vec::new(),
            health: BASE_PLAYER_MAX_HEALTH,
            max_health: BASE_PLAYER_MAX_HEALTH,
            messages,
            labels: std::array::from_fn(|i| format!("Action {}", i + 1)),
            buttons_enabled: false,
            highlight: None,
            cursor: 0,
            pending: None,
        }
    }

    pub fn apply(&mut self, update: SurfaceUpdate) {
        match update {
            SurfaceUpdate::Monsters(monsters) => {
                self.monsters = monsters;
                if self.highlight.is_some_and(|i| i >= self.monsters.len()) {
                    self.highlight = None;
                }
            }
            SurfaceUpdate::Inventory(items) => self.inventory = items,
            SurfaceUpdate::MaxHealth(max) => {
                self.max_health = max.max(0);
                self.health = self.health.clamp(0, self.max_health);
            }
            SurfaceUpdate::Health(current) => {
                self.health = current.clamp(0, self.max_health);
            }
            SurfaceUpdate::Message(message) => self.push_message(message),
            SurfaceUpdate::ButtonLabels(labels) => self.labels = labels,
            SurfaceUpdate::ButtonsEnabled(enabled) => self.buttons_enabled = enabled,
            SurfaceUpdate::Highlight(index) => {
                self.highlight = index.filter(|&i| i < self.monsters.len());
            }
            SurfaceUpdate::RequestAction(reply) => {
                // A new request replaces any stale one, which aborts it.
                self.pending = Some(reply);
            }
        }
    }

    /// Applies every queued update. Returns `false` once the engine has hung up.
    pub fn drain(&mut self, rx: &Receiver<SurfaceUpdate>) -> bool {
        loop {
            match rx.try_recv() {
                Ok(update) => self.apply(update),
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() >= MESSAGE_HISTORY_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn latest_message(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    /// True while an action request is outstanding.
    pub fn is_awaiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Delivers a button press to the waiting engine.
    ///
    /// Returns `false` (and changes nothing) for an out-of-range code or
    /// when no request is outstanding.
    pub fn select_action(&mut self, code: usize) -> bool {
        let Some(slot) = ActionSlot::new(code) else {
            tracing::debug!("Ignoring out-of-range action code {}", code);
            return false;
        };
        let Some(reply) = self.pending.take() else {
            return false;
        };

        self.buttons_enabled = false;
        match reply.try_send(slot) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("Action reply not delivered: {:?}", err);
                false
            }
        }
    }

    /// Selects the button under the cursor.
    pub fn select_cursor(&mut self) -> bool {
        self.select_action(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = ACTION_BUTTON_COUNT as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(count) as usize;
    }

    /// Drops any outstanding request so the engine wakes with an abort.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("Cancelled outstanding action request");
        }
        self.buttons_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn request(state: &mut SurfaceState) -> mpsc::Receiver<ActionSlot> {
        let (tx, rx) = mpsc::sync_channel(1);
        state.apply(SurfaceUpdate::RequestAction(tx));
        rx
    }

    #[test]
    fn test_keeps_only_last_three_messages() {
        let mut state = SurfaceState::new();
        for i in 0..5 {
            state.apply(SurfaceUpdate::Message(format!("msg {}", i)));
        }
        let messages: Vec<&str> = state.messages.iter().map(String::as_str).collect();
        assert_eq!(messages, vec!["msg 2", "msg 3", "msg 4"]);
        assert_eq!(state.latest_message(), Some("msg 4"));
    }

    #[test]
    fn test_health_is_clamped_for_display() {
        let mut state = SurfaceState::new();
        state.apply(SurfaceUpdate::MaxHealth(80));
        state.apply(SurfaceUpdate::Health(-15));
        assert_eq!(state.health, 0);
        state.apply(SurfaceUpdate::Health(500));
        assert_eq!(state.health, 80);
    }

    #[test]
    fn test_select_without_request_is_discarded() {
        let mut state = SurfaceState::new();
        assert!(!state.is_awaiting());
        assert!(!state.select_action(1));
    }

    #[test]
    fn test_select_answers_exactly_once() {
        let mut state = SurfaceState::new();
        let rx = request(&mut state);
        assert!(state.is_awaiting());

        assert!(state.select_action(1));
        assert!(!state.is_awaiting());
        assert!(!state.buttons_enabled);
        assert!(!state.select_action(2));

        assert_eq!(rx.try_recv().unwrap().index(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_out_of_range_code_keeps_request_pending() {
        let mut state = SurfaceState::new();
        let rx = request(&mut state);

        assert!(!state.select_action(4));
        assert!(state.is_awaiting());

        assert!(state.select_action(0));
        assert_eq!(rx.try_recv().unwrap().index(), 0);
    }

    #[test]
    fn test_cancel_disconnects_request() {
        let mut state = SurfaceState::new();
        let rx = request(&mut state);
        state.cancel();
        assert!(!state.is_awaiting());
        assert_eq!(rx.recv(), Err(mpsc::RecvError));
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut state = SurfaceState::new();
        state.move_cursor(-1);
        assert_eq!(state.cursor, 3);
        state.move_cursor(2);
        assert_eq!(state.cursor, 1);

        let rx = request(&mut state);
        assert!(state.select_cursor());
        assert_eq!(rx.try_recv().unwrap().index(), 1);
    }

    #[test]
    fn test_highlight_out_of_range_is_ignored() {
        let mut state = SurfaceState::new();
        state.apply(SurfaceUpdate::Highlight(Some(2)));
        assert_eq!(state.highlight, None);
    }

    #[test]
    fn test_drain_reports_disconnect() {
        let (tx, rx) = mpsc::channel();
        let mut state = SurfaceState::new();
        tx.send(SurfaceUpdate::Health(50)).unwrap();
        assert!(state.drain(&rx));
        assert_eq!(state.health, 50);
        drop(tx);
        assert!(!state.drain(&rx));
    }
}
