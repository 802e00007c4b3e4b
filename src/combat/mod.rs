//! Combatants, items and battle rules.

#![allow(unused_imports)]

pub mod items;
pub mod logic;
pub mod types;

pub use items::*;
pub use logic::*;
pub use types::*;
