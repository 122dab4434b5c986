use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::constants::{
    CHEST_ARMOR_BASE, FEET_ARMOR_BASE, HANDS_ARMOR_BASE, HEAD_ARMOR_BASE, LEGS_ARMOR_BASE,
    ONE_HANDED_BASE_DAMAGE, SHIELD_ARMOR_BASE, TWO_HANDED_BASE_DAMAGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    OneHanded,
    TwoHanded,
    Head,
    Chest,
    Legs,
    Hands,
    Feet,
    Shield,
    Accessory,
}

impl EquipmentSlot {
    pub fn is_weapon(&self) -> bool {
        matches!(self, EquipmentSlot::OneHanded | EquipmentSlot::TwoHanded)
    }

    /// Base AC contributed by armor in this slot, or None for non-armor slots.
    pub fn armor_base(&self) -> Option<i32> {
        match self {
            EquipmentSlot::Head => Some(HEAD_ARMOR_BASE),
            EquipmentSlot::Chest => Some(CHEST_ARMOR_BASE),
            EquipmentSlot::Legs => Some(LEGS_ARMOR_BASE),
            EquipmentSlot::Hands => Some(HANDS_ARMOR_BASE),
            EquipmentSlot::Feet => Some(FEET_ARMOR_BASE),
            EquipmentSlot::Shield => Some(SHIELD_ARMOR_BASE),
            EquipmentSlot::OneHanded
            | EquipmentSlot::TwoHanded
            | EquipmentSlot::Accessory => None,
        }
    }

    /// Base damage for weapons in this slot, or None for non-weapon slots.
    pub fn weapon_base(&self) -> Option<u32> {
        match self {
            EquipmentSlot::OneHanded => Some(ONE_HANDED_BASE_DAMAGE),
            EquipmentSlot::TwoHanded => Some(TWO_HANDED_BASE_DAMAGE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    pub fn ordinal(&self) -> u32 {
        *self as u32
    }
}

/// An inventory item as supplied by the party subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub equipped: bool,
}

impl Item {
    pub fn new(name: &str, slot: EquipmentSlot, rarity: Rarity) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slot,
            rarity,
            tags: Vec::new(),
            equipped: false,
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn equipped(mut self) -> Self {
        self.equipped = true;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
