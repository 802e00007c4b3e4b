use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::*;

/// An opposing combatant.
///
/// `health` is raw and may go negative after an overkill hit; use
/// [`Monster::is_alive`] rather than comparing it yourself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub health: i32,
    /// Upper bound of one attack roll.
    pub damage: f64,
    /// Rolled and displayed, but turn order is always player then monsters.
    pub speed: u32,
    #[serde(default)]
    pub special: Option<String>,
}

impl Monster {
    pub fn new(name: String, health: i32, damage: f64, speed: u32) -> Self {
        Self {
            name,
            health,
            damage,
            speed,
            special: None,
        }
    }

    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = Some(special.into());
        self
    }

    /// Rolls a fresh monster: 21-100 health, 10-51 damage, 1-10 speed.
    pub fn roll(rng: &mut impl Rng) -> Self {
        let health = rng.gen_range(MONSTER_HEALTH_MIN..=MONSTER_HEALTH_MAX);
        let raw_damage = rng.gen::<f64>() * MONSTER_DAMAGE_SPREAD + MONSTER_DAMAGE_MIN;
        let damage = (raw_damage * 100.0).round() / 100.0;
        let speed = rng.gen_range(MONSTER_SPEED_MIN..=MONSTER_SPEED_MAX);
        Self::new(generate_monster_name(rng), health, damage, speed)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Unconditional subtraction. No floor is applied here.
    pub fn apply_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn view(&self) -> MonsterView {
        MonsterView {
            name: self.name.clone(),
            health: self.health.max(0),
            damage: self.damage,
            speed: self.speed,
            special: self.special.clone(),
            alive: self.is_alive(),
        }
    }
}

/// Snapshot of a monster handed to the display. Health is floored at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterView {
    pub name: String,
    pub health: i32,
    pub damage: f64,
    pub speed: u32,
    pub special: Option<String>,
    pub alive: bool,
}

pub fn generate_monster_name(rng: &mut impl Rng) -> String {
    let prefixes = [
        "Grizz", "Sav", "Dark", "Blood", "Bone", "Shadow", "Fel", "Dire", "Wild", "Grim",
    ];
    let suffixes = [
        "Goblin", "Troll", "Slime", "Imp", "Ghoul", "Wraith", "Ogre", "Bat", "Spider", "Wolf",
    ];

    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let suffix = suffixes[rng.gen_range(0..suffixes.len())];

    format!("{} {}", prefix, suffix)
}

/// Player health, always inside `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerVitals {
    current: i32,
    max: i32,
}

impl PlayerVitals {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    pub fn with_current(max: i32, current: i32) -> Self {
        let mut vitals = Self::new(max);
        vitals.set_current(current);
        vitals
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn set_current(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Heals by `amount`, clamped. Negative amounts drain instead.
    pub fn heal(&mut self, amount: i32) {
        self.set_current(self.current.saturating_add(amount));
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.set_current(self.current.saturating_sub(amount));
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

/// Stats the character class shapes before the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub damage: i32,
    /// Percent of the next hit a guard absorbs.
    pub shield: i32,
    pub heal: i32,
    pub speed: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            damage: BASE_PLAYER_DAMAGE,
            shield: BASE_PLAYER_SHIELD,
            heal: BASE_PLAYER_HEAL,
            speed: BASE_PLAYER_SPEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterClass {
    Fighter,
    Tank,
    Healer,
    Ninja,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Fighter,
        CharacterClass::Tank,
        CharacterClass::Healer,
        CharacterClass::Ninja,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fighter => "Fighter",
            Self::Tank => "Tank",
            Self::Healer => "Healer",
            Self::Ninja => "Ninja",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Fighter => "You chose Fighter! High damage, but weak defense.",
            Self::Tank => "You chose Tank! Tough defense, but slow attacks.",
            Self::Healer => "You chose Healer! Great recovery, but fragile.",
            Self::Ninja => "You chose Ninja! Fast and deadly, but risky.",
        }
    }

    /// Rolls this class's stat penalties onto `stats` and `max_health`.
    pub fn apply(&self, stats: &mut PlayerStats, max_health: &mut i32, rng: &mut impl Rng) {
        match self {
            Self::Fighter => {
                stats.shield -= rng.gen_range(6..=50);
                stats.heal -= rng.gen_range(5..=50);
            }
            Self::Tank => {
                stats.speed -= rng.gen_range(1..=9);
                stats.damage -= rng.gen_range(100..=199);
            }
            Self::Healer => {
                stats.damage -= rng.gen_range(5..=30);
                stats.shield -= rng.gen_range(5..=50);
            }
            Self::Ninja => {
                stats.heal -= rng.gen_range(5..=50);
                *max_health -= rng.gen_range(5..=25);
            }
        }
        // Small configured max health must not go to zero.
        *max_health = (*max_health).max(1);
    }
}

/// Which living monster an attack lands on (or which one attacks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// First living monster in list order.
    FirstLiving,
    /// Uniformly random among living monsters.
    #[default]
    RandomLiving,
}
