//! Monster Battle - Terminal Turn-Based Battle Library
//!
//! The battle engine runs on a worker thread and talks to the display only
//! through [`display::DisplaySurface`]. The binary wires it to a ratatui
//! terminal; tests wire it to scripted surfaces.

pub mod combat;
pub mod core;
pub mod display;
pub mod engine;
pub mod ui;

pub use crate::combat::{BattleOutcome, BattleState};
pub use crate::core::config::BattleConfig;
pub use crate::core::error::{BattleError, Result};
pub use crate::display::{ActionReply, ActionSlot, DisplaySurface};
pub use crate::engine::{BattleEngine, BattlePhase};
