//! Consumable items.
//!
//! An item is plain data. Its effect runs against the battle state at the
//! moment it is used, so a potion made at setup still heals against the
//! player's health at the time it is drunk.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::logic::{first_living, CombatEvent};
use super::types::{Monster, PlayerVitals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    HealthPotion { heal: i32 },
    MegaPotion { heal: i32 },
    /// Hits every living monster.
    Bomb { damage: i32 },
    /// Coin flip: heal the player, or strike the first living monster.
    MagicScroll { heal: i32, damage: i32 },
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HealthPotion { .. } => "Health Potion",
            Self::MegaPotion { .. } => "Mega Potion",
            Self::Bomb { .. } => "Bomb",
            Self::MagicScroll { .. } => "Magic Scroll",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::HealthPotion { .. } | Self::MegaPotion { .. } => "🧪",
            Self::Bomb { .. } => "💣",
            Self::MagicScroll { .. } => "✨",
        }
    }

    /// Runs the effect against the current battle state.
    pub fn apply(
        &self,
        monsters: &mut [Monster],
        vitals: &mut PlayerVitals,
        rng: &mut impl Rng,
    ) -> CombatEvent {
        match *self {
            Self::HealthPotion { heal } | Self::MegaPotion { heal } => {
                vitals.heal(heal);
                CombatEvent::PotionUsed {
                    name: self.name(),
                    amount: heal,
                }
            }
            Self::Bomb { damage } => {
                let mut hit = 0;
                for monster in monsters.iter_mut().filter(|m| m.is_alive()) {
                    monster.apply_damage(damage);
                    hit += 1;
                }
                CombatEvent::BombExploded { damage, hit }
            }
            Self::MagicScroll { heal, damage } => {
                if rng.gen_bool(0.5) {
                    vitals.heal(heal);
                    CombatEvent::ScrollHealed { amount: heal }
                } else if let Some(index) = first_living(monsters) {
                    monsters[index].apply_damage(damage);
                    CombatEvent::ScrollStruck { index, damage }
                } else {
                    CombatEvent::ScrollFizzled
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self { kind }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    pub fn view(&self) -> ItemView {
        ItemView {
            name: self.name().to_string(),
            icon: self.icon().to_string(),
        }
    }
}

impl From<ItemKind> for Item {
    fn from(kind: ItemKind) -> Self {
        Self::new(kind)
    }
}

/// Snapshot of an item handed to the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub name: String,
    pub icon: String,
}

/// Ordered item list. Items are always consumed from the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn from_kinds(kinds: &[ItemKind]) -> Self {
        Self::new(kinds.iter().copied().map(Item::from).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes and returns the first item, or `None` if empty.
    pub fn consume_first(&mut self) -> Option<Item> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    pub fn views(&self) -> Vec<ItemView> {
        self.items.iter().map(Item::view).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn slime(health: i32) -> Monster {
        Monster::new("Slime".to_string(), health, 10.0, 1)
    }

    #[test]
    fn test_consume_first_takes_front_item() {
        let mut inventory = Inventory::from_kinds(&[
            ItemKind::Bomb { damage: 20 },
            ItemKind::HealthPotion { heal: 30 },
        ]);

        let item = inventory.consume_first().unwrap();
        assert_eq!(item.kind, ItemKind::Bomb { damage: 20 });
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.items()[0].name(), "Health Potion");
    }

    #[test]
    fn test_consume_first_on_empty_is_none() {
        let mut inventory = Inventory::default();
        assert!(inventory.consume_first().is_none());
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_potion_heals_against_current_health() {
        let mut rng = create_test_rng();
        let mut vitals = PlayerVitals::with_current(100, 50);
        let potion = ItemKind::HealthPotion { heal: 30 };

        // Health changes between creating the item and using it.
        vitals.take_damage(20);
        let event = potion.apply(&mut [], &mut vitals, &mut rng);

        assert_eq!(vitals.current(), 60);
        assert_eq!(
            event,
            CombatEvent::PotionUsed {
                name: "Health Potion",
                amount: 30
            }
        );
    }

    #[test]
    fn test_mega_potion_heals_and_clamps_to_max() {
        let mut rng = create_test_rng();
        let mut vitals = PlayerVitals::with_current(100, 30);
        let mega = ItemKind::MegaPotion { heal: 50 };

        let event = mega.apply(&mut [], &mut vitals, &mut rng);

        assert_eq!(vitals.current(), 80);
        assert_eq!(event.message(), "💚 Used Mega Potion! Healed 50 HP!");

        mega.apply(&mut [], &mut vitals, &mut rng);
        assert_eq!(vitals.current(), 100);
    }

    #[test]
    fn test_bomb_skips_dead_monsters() {
        let mut rng = create_test_rng();
        let mut vitals = PlayerVitals::new(100);
        let mut monsters = vec![slime(50), slime(-4), slime(10)];

        let event = ItemKind::Bomb { damage: 20 }.apply(&mut monsters, &mut vitals, &mut rng);

        assert_eq!(event, CombatEvent::BombExploded { damage: 20, hit: 2 });
        assert_eq!(monsters[0].health, 30);
        assert_eq!(monsters[1].health, -4);
        assert_eq!(monsters[2].health, -10);
    }

    #[test]
    fn test_scroll_either_heals_or_strikes_first_living() {
        let mut rng = create_test_rng();
        let mut saw_heal = false;
        let mut saw_strike = false;

        for _ in 0..64 {
            let mut vitals = PlayerVitals::with_current(100, 40);
            let mut monsters = vec![slime(0), slime(50)];
            let event = ItemKind::MagicScroll {
                heal: 25,
                damage: 30,
            }
            .apply(&mut monsters, &mut vitals, &mut rng);

            match event {
                CombatEvent::ScrollHealed { amount } => {
                    assert_eq!(amount, 25);
                    assert_eq!(vitals.current(), 65);
                    assert_eq!(monsters[1].health, 50);
                    saw_heal = true;
                }
                CombatEvent::ScrollStruck { index, damage } => {
                    assert_eq!(index, 1);
                    assert_eq!(damage, 30);
                    assert_eq!(monsters[1].health, 20);
                    assert_eq!(vitals.current(), 40);
                    saw_strike = true;
                }
                other => panic!("unexpected scroll event: {:?}", other),
            }
        }

        assert!(saw_heal && saw_strike);
    }

    #[test]
    fn test_scroll_fizzles_with_no_living_target() {
        let mut rng = create_test_rng();
        for _ in 0..32 {
            let mut vitals = PlayerVitals::with_current(100, 100);
            let mut monsters = vec![slime(-1)];
            let event = ItemKind::MagicScroll { heal: 5, damage: 5 }.apply(
                &mut monsters,
                &mut vitals,
                &mut rng,
            );
            assert!(matches!(
                event,
                CombatEvent::ScrollHealed { .. } | CombatEvent::ScrollFizzled
            ));
            assert_eq!(monsters[0].health, -1);
        }
    }
}
