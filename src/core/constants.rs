// Action buttons
pub const ACTION_BUTTON_COUNT: usize = 4;
pub const NO_ACTION_CODE: i32 = -1;
pub const COMBAT_BUTTON_LABELS: [&str; ACTION_BUTTON_COUNT] =
    ["Attack", "Defend", "Heal", "Use Item"];
pub const CLASS_BUTTON_LABELS: [&str; ACTION_BUTTON_COUNT] = ["Fighter", "Tank", "Healer", "Ninja"];

// Monster stat rolls
pub const MONSTER_HEALTH_MIN: i32 = 21;
pub const MONSTER_HEALTH_MAX: i32 = 100;
pub const MONSTER_DAMAGE_MIN: f64 = 10.0;
pub const MONSTER_DAMAGE_SPREAD: f64 = 41.0;
pub const MONSTER_SPEED_MIN: u32 = 1;
pub const MONSTER_SPEED_MAX: u32 = 10;
pub const MAX_MONSTERS: usize = 8;

// Player defaults (before class adjustments)
pub const BASE_PLAYER_MAX_HEALTH: i32 = 100;
pub const BASE_PLAYER_DAMAGE: i32 = 200;
pub const BASE_PLAYER_SHIELD: i32 = 50;
pub const BASE_PLAYER_HEAL: i32 = 50;
pub const BASE_PLAYER_SPEED: i32 = 10;

// Attack: base = damage stat * 15%, final = base + [0, base)
pub const ATTACK_DAMAGE_FRACTION: f64 = 0.15;
// Heal: heal stat * 50% guaranteed, up to another 50% rolled
pub const HEAL_FRACTION: f64 = 0.5;
// Guard never blocks more than this share of a hit
pub const MAX_GUARD_PERCENT: i32 = 90;

// Message panel history (newest last)
pub const MESSAGE_HISTORY_CAPACITY: usize = 3;

// Pacing defaults
pub const ACTION_PAUSE_MS: u64 = 500;
pub const HIGHLIGHT_MS: u64 = 300;
pub const CLASS_PAUSE_MS: u64 = 1500;

// Foreground loop
pub const INPUT_POLL_MS: u64 = 50;

// Files
pub const DATA_DIR_NAME: &str = ".monster-battle";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_DIR_NAME: &str = "logs";
pub const LOG_FILE_NAME: &str = "battle.log";
