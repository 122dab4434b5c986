//! Player side of a combat: a party member wrapped with combat stats.

use serde::{Deserialize, Serialize};

use super::types::{CombatStats, Combatant};
use crate::character::Player;
use crate::core::constants::{BASE_ARMOR_CLASS, STAMINA_HP_SCALE};
use crate::items::WeaponProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCombatant {
    pub stats: CombatStats,
    pub player: Player,
    pub weapon: WeaponProfile,
}

impl PlayerCombatant {
    /// Wraps a party member. HP is floor(stamina * 100); out-of-range stamina is clamped.
    pub fn new(player: &Player, stamina: f64) -> Self {
        let hp = hp_from_stamina(stamina);
        let equipment = player.equipment();
        let armor_class = BASE_ARMOR_CLASS + equipment.armor_class_bonus();
        Self {
            stats: CombatStats::new(
                player.id,
                player.name.clone(),
                player.attributes,
                hp,
                armor_class,
            ),
            player: player.clone(),
            weapon: equipment.weapon_profile(),
        }
    }
}

pub fn hp_from_stamina(stamina: f64) -> u32 {
    let stamina = if stamina.is_finite() {
        stamina.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (stamina * STAMINA_HP_SCALE).floor() as u32
}

impl Combatant for PlayerCombatant {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }
}
