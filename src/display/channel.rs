//! Channel-backed display surface for running the engine off the UI thread.
//!
//! State pushes are owned snapshots sent over one `mpsc` channel, so the
//! foreground applies them in send order and never shares memory with the
//! worker. An action request carries its own single-slot reply channel;
//! the foreground answers it at most once.

use std::sync::mpsc::{self, Receiver, Sender, SyncSender};

use super::{validate_labels, ActionReply, ActionSlot, DisplaySurface};
use crate::combat::{ItemView, MonsterView};
use crate::core::constants::ACTION_BUTTON_COUNT;
use crate::core::error::Result;

/// One message from the engine to the foreground.
#[derive(Debug)]
pub enum SurfaceUpdate {
    Monsters(Vec<MonsterView>),
    Inventory(Vec<ItemView>),
    MaxHealth(i32),
    Health(i32),
    Message(String),
    ButtonLabels([String; ACTION_BUTTON_COUNT]),
    ButtonsEnabled(bool),
    Highlight(Option<usize>),
    /// Answer by sending one slot. Dropping the sender aborts the request.
    RequestAction(SyncSender<ActionSlot>),
}

/// Worker-side end of the display channel.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    tx: Sender<SurfaceUpdate>,
}

/// Creates a connected handle and the receiver the foreground drains.
pub fn surface_channel() -> (SurfaceHandle, Receiver<SurfaceUpdate>) {
    let (tx, rx) = mpsc::channel();
    (SurfaceHandle { tx }, rx)
}

impl SurfaceHandle {
    fn push(&self, update: SurfaceUpdate) {
        if let Err(err) = self.tx.send(update) {
            tracing::debug!("Display closed, dropping update: {:?}", err.0);
        }
    }
}

impl DisplaySurface for SurfaceHandle {
    fn update_monsters(&mut self, monsters: &[MonsterView]) {
        self.push(SurfaceUpdate::Monsters(monsters.to_vec()));
    }

    fn update_inventory(&mut self, items: &[ItemView]) {
        self.push(SurfaceUpdate::Inventory(items.to_vec()));
    }

    fn set_player_max_health(&mut self, max: i32) {
        self.push(SurfaceUpdate::MaxHealth(max));
    }

    fn update_player_health(&mut self, current: i32) {
        self.push(SurfaceUpdate::Health(current));
    }

    fn display_message(&mut self, message: &str) {
        self.push(SurfaceUpdate::Message(message.to_string()));
    }

    fn set_action_buttons(&mut self, labels: &[&str]) -> Result<()> {
        let labels = validate_labels(labels)?;
        self.push(SurfaceUpdate::ButtonLabels(labels));
        Ok(())
    }

    fn set_buttons_enabled(&mut self, enabled: bool) {
        self.push(SurfaceUpdate::ButtonsEnabled(enabled));
    }

    fn wait_for_action(&mut self) -> ActionReply {
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);

        self.set_buttons_enabled(true);
        self.push(SurfaceUpdate::RequestAction(reply_tx));

        // If the foreground is gone the request (and its sender) was
        // dropped with the failed push, so this returns immediately.
        let reply = match reply_rx.recv() {
            Ok(slot) => ActionReply::Selected(slot),
            Err(_) => {
                tracing::debug!("Action request cancelled");
                ActionReply::Aborted
            }
        };

        self.set_buttons_enabled(false);
        reply
    }

    fn highlight_monster(&mut self, index: Option<usize>) {
        self.push(SurfaceUpdate::Highlight(index));
    }
}
