//! Battle rules: targeting, damage rolls, action resolution and the
//! outcome check. Everything here is synchronous state mutation with no
//! display or threading concerns.

use rand::Rng;

use super::items::{Inventory, ItemKind};
use super::types::{CharacterClass, Monster, PlayerStats, PlayerVitals, TargetPolicy};
use crate::core::config::BattleConfig;
use crate::core::constants::*;

/// The four combat buttons, in button order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Defend,
    Heal,
    UseItem,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 4] = [
        PlayerAction::Attack,
        PlayerAction::Defend,
        PlayerAction::Heal,
        PlayerAction::UseItem,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// The action wait was cancelled before the battle was decided.
    Aborted,
}

/// Something that happened during a turn. Each event renders to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerAttack {
        index: usize,
        target: String,
        damage: i32,
    },
    NoTarget,
    Defended {
        shield: i32,
    },
    Healed {
        amount: i32,
    },
    PotionUsed {
        name: &'static str,
        amount: i32,
    },
    BombExploded {
        damage: i32,
        hit: usize,
    },
    ScrollHealed {
        amount: i32,
    },
    ScrollStruck {
        index: usize,
        damage: i32,
    },
    ScrollFizzled,
    NoItems,
    MonsterAttack {
        index: usize,
        attacker: String,
        damage: i32,
        blocked: i32,
    },
}

impl CombatEvent {
    pub fn message(&self) -> String {
        match self {
            Self::PlayerAttack { target, damage, .. } => {
                format!("💥 You hit {} for {} damage!", target, damage)
            }
            Self::NoTarget => "No monster left to attack!".to_string(),
            Self::Defended { shield } => {
                format!("🛡️ You brace for impact! (Shield: {})", shield)
            }
            Self::Healed { amount } => format!("💚 You healed for {} HP!", amount),
            Self::PotionUsed { name, amount } => {
                format!("💚 Used {}! Healed {} HP!", name, amount)
            }
            Self::BombExploded { damage, .. } => {
                format!("💣 BOOM! All monsters take {} damage!", damage)
            }
            Self::ScrollHealed { amount } => format!("✨ Magic healed you for {} HP!", amount),
            Self::ScrollStruck { damage, .. } => {
                format!("✨ Magic struck a monster for {} damage!", damage)
            }
            Self::ScrollFizzled => "✨ The scroll fizzles. Nothing to strike!".to_string(),
            Self::NoItems => "No items in inventory!".to_string(),
            Self::MonsterAttack {
                attacker,
                damage,
                blocked,
                ..
            } => {
                if *blocked > 0 {
                    format!(
                        "👹 {} attacks! You take {} damage ({} blocked)!",
                        attacker, damage, blocked
                    )
                } else {
                    format!("👹 {} attacks! You take {} damage!", attacker, damage)
                }
            }
        }
    }

    /// Monster index worth flashing on screen for this event.
    pub fn highlight(&self) -> Option<usize> {
        match self {
            Self::PlayerAttack { index, .. } | Self::ScrollStruck { index, .. } => Some(*index),
            _ => None,
        }
    }
}

// =============================================================================
// Read-side helpers
// =============================================================================

pub fn count_living(monsters: &[Monster]) -> usize {
    monsters.iter().filter(|m| m.is_alive()).count()
}

pub fn first_living(monsters: &[Monster]) -> Option<usize> {
    monsters.iter().position(Monster::is_alive)
}

/// Picks a living monster's index by `policy`. `None` when all are dead.
pub fn pick_living_target(
    monsters: &[Monster],
    policy: TargetPolicy,
    rng: &mut impl Rng,
) -> Option<usize> {
    match policy {
        TargetPolicy::FirstLiving => first_living(monsters),
        TargetPolicy::RandomLiving => {
            let living: Vec<usize> = monsters
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_alive())
                .map(|(i, _)| i)
                .collect();
            if living.is_empty() {
                None
            } else {
                Some(living[rng.gen_range(0..living.len())])
            }
        }
    }
}

// =============================================================================
// Rolls
// =============================================================================

/// `base + [0, base)` where `base` is 15% of the damage stat.
pub fn roll_attack_damage(damage_stat: i32, rng: &mut impl Rng) -> i32 {
    let base = (damage_stat.max(0) as f64 * ATTACK_DAMAGE_FRACTION) as i32;
    base + (rng.gen::<f64>() * base as f64) as i32
}

/// Half the heal stat, plus up to another half.
pub fn roll_heal_amount(heal_stat: i32, rng: &mut impl Rng) -> i32 {
    let heal = heal_stat.max(0) as f64;
    (heal * HEAL_FRACTION) as i32 + (rng.gen::<f64>() * heal * HEAL_FRACTION) as i32
}

/// `floor(uniform[0, 1) * damage)`.
pub fn roll_monster_damage(damage: f64, rng: &mut impl Rng) -> i32 {
    (rng.gen::<f64>() * damage.max(0.0)).floor() as i32
}

/// Splits a raw hit into (taken, blocked) for a guard with `shield` percent.
pub fn guarded_damage(raw: i32, shield: i32) -> (i32, i32) {
    let percent = shield.clamp(0, MAX_GUARD_PERCENT);
    let blocked = raw * percent / 100;
    (raw - blocked, blocked)
}

// =============================================================================
// Battle state
// =============================================================================

#[derive(Debug, Clone)]
pub struct BattleState {
    pub monsters: Vec<Monster>,
    pub inventory: Inventory,
    pub vitals: PlayerVitals,
    pub stats: PlayerStats,
    pub class: Option<CharacterClass>,
    /// Set by Defend, spent on the next monster hit.
    pub guarding: bool,
}

impl BattleState {
    pub fn new(monsters: Vec<Monster>, inventory: Inventory, vitals: PlayerVitals) -> Self {
        Self {
            monsters,
            inventory,
            vitals,
            stats: PlayerStats::default(),
            class: None,
            guarding: false,
        }
    }

    /// Rolls the configured number of monsters and stocks the inventory.
    pub fn from_config(config: &BattleConfig, rng: &mut impl Rng) -> Self {
        let monsters = (0..config.monster_count)
            .map(|_| Monster::roll(rng))
            .collect();
        Self::new(
            monsters,
            Inventory::from_kinds(&config.starting_inventory),
            PlayerVitals::new(config.player_max_health),
        )
    }

    /// Applies a class's stat penalties and resets health to the new max.
    /// A max-health penalty (Ninja) is kept, not restored to the base 100.
    pub fn choose_class(&mut self, class: CharacterClass, rng: &mut impl Rng) {
        let mut max_health = self.vitals.max();
        class.apply(&mut self.stats, &mut max_health, rng);
        self.vitals = PlayerVitals::new(max_health);
        self.class = Some(class);
    }

    pub fn class_name(&self) -> &'static str {
        self.class.map_or("Adventurer", |c| c.name())
    }

    pub fn count_living(&self) -> usize {
        count_living(&self.monsters)
    }

    pub fn resolve(
        &mut self,
        action: PlayerAction,
        policy: TargetPolicy,
        rng: &mut impl Rng,
    ) -> CombatEvent {
        match action {
            PlayerAction::Attack => self.player_attack(policy, rng),
            PlayerAction::Defend => self.defend(),
            PlayerAction::Heal => self.heal(rng),
            PlayerAction::UseItem => self.use_first_item(rng),
        }
    }

    pub fn player_attack(&mut self, policy: TargetPolicy, rng: &mut impl Rng) -> CombatEvent {
        let Some(index) = pick_living_target(&self.monsters, policy, rng) else {
            return CombatEvent::NoTarget;
        };
        let damage = roll_attack_damage(self.stats.damage, rng);
        let target = &mut self.monsters[index];
        target.apply_damage(damage);
        CombatEvent::PlayerAttack {
            index,
            target: target.name.clone(),
            damage,
        }
    }

    pub fn defend(&mut self) -> CombatEvent {
        self.guarding = true;
        CombatEvent::Defended {
            shield: self.stats.shield,
        }
    }

    pub fn heal(&mut self, rng: &mut impl Rng) -> CombatEvent {
        let amount = roll_heal_amount(self.stats.heal, rng);
        self.vitals.heal(amount);
        CombatEvent::Healed { amount }
    }

    /// Consumes the front item and runs it. An empty inventory changes nothing.
    pub fn use_first_item(&mut self, rng: &mut impl Rng) -> CombatEvent {
        match self.inventory.consume_first() {
            Some(item) => item.kind.apply(&mut self.monsters, &mut self.vitals, rng),
            None => CombatEvent::NoItems,
        }
    }

    pub fn add_item(&mut self, kind: ItemKind) {
        self.inventory.push(kind.into());
    }

    /// One monster attacks the player. `None` when no monster is living.
    pub fn monster_turn(&mut self, policy: TargetPolicy, rng: &mut impl Rng) -> Option<CombatEvent> {
        let index = pick_living_target(&self.monsters, policy, rng)?;
        let attacker = &self.monsters[index];
        let raw = roll_monster_damage(attacker.damage, rng);

        let (damage, blocked) = if self.guarding {
            self.guarding = false;
            guarded_damage(raw, self.stats.shield)
        } else {
            (raw, 0)
        };

        self.vitals.take_damage(damage);
        Some(CombatEvent::MonsterAttack {
            index,
            attacker: attacker.name.clone(),
            damage,
            blocked,
        })
    }

    /// Victory once no monster lives, else Defeat once the player is down.
    pub fn check_outcome(&self) -> Option<BattleOutcome> {
        if self.count_living() == 0 {
            Some(BattleOutcome::Victory)
        } else if !self.vitals.is_alive() {
            Some(BattleOutcome::Defeat)
        } else {
            None
        }
    }
}
