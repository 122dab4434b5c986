use super::types::{EquipmentSlot, Item};
use crate::combat::types::DamageType;
use crate::core::constants::{UNARMED_BASE_DAMAGE, WEAPON_RARITY_DAMAGE_STEP};
use serde::{Deserialize, Serialize};

/// The equipped subset of a player's inventory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equipment {
    items: Vec<Item>,
}

/// Damage profile of whatever the player is swinging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub name: String,
    /// None when fighting unarmed.
    pub slot: Option<EquipmentSlot>,
    pub base_damage: u32,
    pub rarity_bonus: u32,
    pub damage_type: DamageType,
}

impl WeaponProfile {
    pub fn unarmed() -> Self {
        Self {
            name: "fists".to_string(),
            slot: None,
            base_damage: UNARMED_BASE_DAMAGE,
            rarity_bonus: 0,
            damage_type: DamageType::Bludgeoning,
        }
    }

    pub fn total_damage(&self) -> u32 {
        self.base_damage + self.rarity_bonus
    }
}

impl Equipment {
    pub fn from_inventory(inventory: &[Item]) -> Self {
        Self {
            items: inventory.iter().filter(|i| i.equipped).cloned().collect(),
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// First equipped weapon, if any.
    pub fn weapon(&self) -> Option<&Item> {
        self.items.iter().find(|i| i.slot.is_weapon())
    }

    pub fn armor_pieces(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|i| i.slot.armor_base().is_some() && i.slot != EquipmentSlot::Shield)
    }

    pub fn has_armor(&self) -> bool {
        self.armor_pieces().next().is_some()
    }

    pub fn has_shield(&self) -> bool {
        self.items.iter().any(|i| i.slot == EquipmentSlot::Shield)
    }

    /// Sum of (slot base + rarity ordinal) over every equipped armor slot, shields included.
    pub fn armor_class_bonus(&self) -> i32 {
        self.items
            .iter()
            .filter_map(|item| {
                item.slot
                    .armor_base()
                    .map(|base| base + item.rarity.ordinal() as i32)
            })
            .sum()
    }

    pub fn weapon_profile(&self) -> WeaponProfile {
        match self.weapon() {
            Some(item) => WeaponProfile {
                name: item.name.clone(),
                slot: Some(item.slot),
                base_damage: item.slot.weapon_base().unwrap_or(UNARMED_BASE_DAMAGE),
                rarity_bonus: item.rarity.ordinal() * WEAPON_RARITY_DAMAGE_STEP,
                damage_type: DamageType::from_tags(&item.tags),
            },
            None => WeaponProfile::unarmed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::Rarity;
    use super::*;

    #[test]
    fn test_unequipped_items_are_ignored() {
        let inventory = vec![
            Item::new("Longsword", EquipmentSlot::OneHanded, Rarity::Epic),
            Item::new("Plate", EquipmentSlot::Chest, Rarity::Rare),
        ];
        let equipment = Equipment::from_inventory(&inventory);
        assert_eq!(equipment.iter_equipped().count(), 0);
        assert_eq!(equipment.armor_class_bonus(), 0);
        assert_eq!(equipment.weapon_profile(), WeaponProfile::unarmed());
    }

    #[test]
    fn test_armor_class_bonus_sums_slot_and_rarity() {
        let inventory = vec![
            Item::new("Helm", EquipmentSlot::Head, Rarity::Common).equipped(), // 1 + 0
            Item::new("Breastplate", EquipmentSlot::Chest, Rarity::Rare).equipped(), // 3 + 2
            Item::new("Buckler", EquipmentSlot::Shield, Rarity::Uncommon).equipped(), // 2 + 1
            Item::new("Ring", EquipmentSlot::Accessory, Rarity::Legendary).equipped(),
        ];
        let equipment = Equipment::from_inventory(&inventory);
        assert_eq!(equipment.armor_class_bonus(), 9);
        assert!(equipment.has_shield());
        assert!(equipment.has_armor());
    }

    #[test]
    fn test_weapon_profile_from_equipped_weapon() {
        let inventory = vec![
            Item::new("Greataxe", EquipmentSlot::TwoHanded, Rarity::Epic).equipped()
        ];
        let profile = Equipment::from_inventory(&inventory).weapon_profile();
        assert_eq!(profile.base_damage, 6);
        assert_eq!(profile.rarity_bonus, 6);
        assert_eq!(profile.total_damage(), 12);
        assert_eq!(profile.slot, Some(EquipmentSlot::TwoHanded));
        assert_eq!(profile.damage_type, DamageType::Slashing);
    }

    #[test]
    fn test_unarmed_profile() {
        let profile = WeaponProfile::unarmed();
        assert_eq!(profile.total_damage(), 2);
        assert!(profile.slot.is_none());
    }

    #[test]
    fn test_shield_alone_is_not_body_armor() {
        let inventory = vec![Item::new("Kite", EquipmentSlot::Shield, Rarity::Common).equipped()];
        let equipment = Equipment::from_inventory(&inventory);
        assert!(equipment.has_shield());
        assert!(!equipment.has_armor());
        assert_eq!(equipment.armor_class_bonus(), 2);
    }
}
