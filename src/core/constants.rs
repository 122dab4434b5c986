// Dice
pub const D20_SIDES: u32 = 20;
pub const NATURAL_FUMBLE: u32 = 1;
pub const NATURAL_CRIT: u32 = 20;
pub const CRIT_DAMAGE_MULTIPLIER: u32 = 2;

// Character attributes
pub const BASE_ATTRIBUTE_VALUE: i32 = 10;
pub const NUM_ATTRIBUTES: usize = 6;
pub const MIN_ATTRIBUTE_VALUE: i32 = 1;
pub const MAX_ATTRIBUTE_VALUE: i32 = 30;

// Party limits
pub const MIN_PARTY_LEVEL: u32 = 1;
pub const MAX_PARTY_LEVEL: u32 = 20;

// Player combatants
pub const STAMINA_HP_SCALE: f64 = 100.0;
pub const BASE_ARMOR_CLASS: i32 = 10;
pub const DEFEND_AC_BONUS: i32 = 2;

// Weapon slot base damage: unarmed, one-handed, two-handed
pub const UNARMED_BASE_DAMAGE: u32 = 2;
pub const ONE_HANDED_BASE_DAMAGE: u32 = 4;
pub const TWO_HANDED_BASE_DAMAGE: u32 = 6;
pub const WEAPON_RARITY_DAMAGE_STEP: u32 = 2;

// Armor slot base AC bonus
pub const HEAD_ARMOR_BASE: i32 = 1;
pub const CHEST_ARMOR_BASE: i32 = 3;
pub const LEGS_ARMOR_BASE: i32 = 2;
pub const HANDS_ARMOR_BASE: i32 = 1;
pub const FEET_ARMOR_BASE: i32 = 1;
pub const SHIELD_ARMOR_BASE: i32 = 2;

// Enemy attacks: damage = max(MIN, floor(BASE + CR * PER_CR))
pub const ENEMY_MIN_DAMAGE: u32 = 2;
pub const ENEMY_BASE_DAMAGE: f64 = 3.0;
pub const ENEMY_DAMAGE_PER_CR: f64 = 2.0;

// Fallback enemy synthesised when no encounter can be built
pub const FALLBACK_BASE_HP: f64 = 20.0;
pub const FALLBACK_HP_PER_CR: f64 = 20.0;
pub const FALLBACK_MIN_HP: u32 = 10;
pub const FALLBACK_MAX_CR: f64 = 30.0;

// Experience by challenge rating (CR, XP)
pub const CR_XP_TABLE: [(f64, u32); 14] = [
    (0.0, 10),
    (0.125, 25),
    (0.25, 50),
    (0.5, 100),
    (1.0, 200),
    (2.0, 450),
    (3.0, 700),
    (4.0, 1100),
    (5.0, 1800),
    (6.0, 2300),
    (7.0, 2900),
    (8.0, 3900),
    (9.0, 5000),
    (10.0, 5900),
];
pub const XP_EXTRAPOLATION_ANCHOR_CR: f64 = 10.0;
pub const XP_EXTRAPOLATION_ANCHOR: f64 = 5900.0;
pub const XP_EXTRAPOLATION_BASE: f64 = 1.5;

// Per-player XP threshold multiplier by difficulty: Easy, Medium, Hard, Deadly
pub const DIFFICULTY_XP_PER_LEVEL: [u32; 4] = [50, 100, 150, 200];

// Challenge rating -> difficulty upper bounds: Easy, Medium, Hard (else Deadly)
pub const EASY_MAX_CR: f64 = 0.5;
pub const MEDIUM_MAX_CR: f64 = 1.5;
pub const HARD_MAX_CR: f64 = 3.0;

// XP budget -> target CR steps (exclusive upper budget, CR)
pub const BUDGET_CR_STEPS: [(u32, f64); 7] = [
    (100, 0.25),
    (200, 0.5),
    (450, 1.0),
    (700, 2.0),
    (1100, 3.0),
    (1800, 4.0),
    (2300, 5.0),
];
pub const BUDGET_CR_OVERFLOW_BASE: f64 = 5.0;
pub const BUDGET_CR_OVERFLOW_STEP: f64 = 600.0;

// Encounter assembly
pub const MAX_ENCOUNTER_SIZE: usize = 10;
pub const CR_TOLERANCE: f64 = 1.2;
pub const BOSS_LEVEL_CR_OFFSET: f64 = 2.0;
pub const MAX_BOSS_MINIONS: u32 = 3;
pub const BOSS_MINION_CR_DIVISOR: f64 = 3.0;
pub const BOSS_MINION_CR_BAND: f64 = 1.0;

// Post-combat stamina
pub const VICTORY_STAMINA_DAMAGE_SCALE: f64 = 100.0;
pub const VICTORY_STAMINA_DIVISOR: f64 = 2.0;
pub const FLEE_STAMINA_PENALTY: f64 = 0.05;
pub const DEFEAT_STAMINA_MULTIPLIER: f64 = 0.5;

// Rewards
pub const XP_PER_COIN: u32 = 10;
pub const ARMOR_SKILL_SHARE: f64 = 0.5;
pub const SHIELD_SKILL_SHARE: f64 = 0.5;
pub const EXORCISM_SKILL_SHARE: f64 = 0.25;

// Guard against runaway encounters in autoplay
pub const DEFAULT_MAX_ROUNDS: u32 = 200;
