//! Battle configuration.
//!
//! Loaded from `~/.monster-battle/config.json` when present. Every field has
//! a default, so a partial file (or none at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::combat::{ItemKind, TargetPolicy};
use crate::core::constants::*;
use crate::core::error::{BattleError, Result};

/// Delays the engine inserts so each step stays readable on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Pause after the player's action and after the monster's attack.
    pub action_pause_ms: u64,
    /// How long an attacked monster stays highlighted.
    pub highlight_ms: u64,
    /// Pause after the class choice message.
    pub class_pause_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            action_pause_ms: ACTION_PAUSE_MS,
            highlight_ms: HIGHLIGHT_MS,
            class_pause_ms: CLASS_PAUSE_MS,
        }
    }
}

impl Pacing {
    /// No pauses at all. Used by tests and headless runs.
    pub fn instant() -> Self {
        Self {
            action_pause_ms: 0,
            highlight_ms: 0,
            class_pause_ms: 0,
        }
    }

    pub fn action_pause(&self) -> Duration {
        Duration::from_millis(self.action_pause_ms)
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    pub fn class_pause(&self) -> Duration {
        Duration::from_millis(self.class_pause_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub monster_count: usize,
    pub player_max_health: i32,
    /// Ask for a character class before the battle starts.
    pub choose_class: bool,
    pub targeting: TargetPolicy,
    pub starting_inventory: Vec<ItemKind>,
    pub pacing: Pacing,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            monster_count: 3,
            player_max_health: BASE_PLAYER_MAX_HEALTH,
            choose_class: true,
            targeting: TargetPolicy::RandomLiving,
            starting_inventory: vec![
                ItemKind::HealthPotion { heal: 30 },
                ItemKind::HealthPotion { heal: 30 },
                ItemKind::Bomb { damage: 20 },
                ItemKind::MagicScroll {
                    heal: 25,
                    damage: 30,
                },
            ],
            pacing: Pacing::default(),
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Default config location: `~/.monster-battle/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Loads and validates the config at `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.monster_count > MAX_MONSTERS {
            return Err(BattleError::InvalidConfig(format!(
                "monster_count {} exceeds the maximum of {}",
                self.monster_count, MAX_MONSTERS
            )));
        }
        if self.player_max_health <= 0 {
            return Err(BattleError::InvalidConfig(format!(
                "player_max_health must be positive, got {}",
                self.player_max_health
            )));
        }
        for (slot, item) in self.starting_inventory.iter().enumerate() {
            let negative = match *item {
                ItemKind::HealthPotion { heal } | ItemKind::MegaPotion { heal } => heal < 0,
                ItemKind::Bomb { damage } => damage < 0,
                ItemKind::MagicScroll { heal, damage } => heal < 0 || damage < 0,
            };
            if negative {
                return Err(BattleError::InvalidConfig(format!(
                    "starting_inventory[{}] ({}) has a negative amount",
                    slot,
                    item.name()
                )));
            }
        }
        Ok(())
    }
}

/// `~/.monster-battle`, where config and logs live.
pub fn data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(DATA_DIR_NAME))
}
