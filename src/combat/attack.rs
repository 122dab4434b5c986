//! Attack roll resolution and the structured breakdown handed to narration.
//!
//! Hit and crit rules depend only on the natural die face, so they are pure
//! functions here; the engine rolls the die and feeds it in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{DamageResponse, DamageType};
use crate::core::constants::{CRIT_DAMAGE_MULTIPLIER, NATURAL_CRIT, NATURAL_FUMBLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Natural 1, misses regardless of modifiers.
    Fumble,
    Miss,
    Hit,
    /// Natural 20, hits regardless of AC and doubles damage.
    Critical,
}

impl HitOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, HitOutcome::Hit | HitOutcome::Critical)
    }
}

/// Resolves a d20 attack roll against an armor class.
pub fn resolve_hit(natural_roll: u32, modifier: i32, target_ac: i32) -> HitOutcome {
    if natural_roll == NATURAL_FUMBLE {
        HitOutcome::Fumble
    } else if natural_roll >= NATURAL_CRIT {
        HitOutcome::Critical
    } else if natural_roll as i32 + modifier >= target_ac {
        HitOutcome::Hit
    } else {
        HitOutcome::Miss
    }
}

/// Full breakdown of one attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub attacker_id: Uuid,
    pub attacker_name: String,
    pub target_id: Uuid,
    pub target_name: String,
    pub natural_roll: u32,
    pub modifier: i32,
    pub total: i32,
    pub target_ac: i32,
    pub is_hit: bool,
    pub is_critical: bool,
    pub is_miss: bool,
    pub base_damage: u32,
    pub bonus_damage: u32,
    /// 2 on a critical hit, otherwise 1.
    pub crit_multiplier: u32,
    pub damage_type: DamageType,
    pub damage_response: DamageResponse,
    /// Damage after the target's resistances; zero on a miss.
    pub damage: u32,
    pub target_defeated: bool,
}

/// Inputs for [`AttackResult::resolve`].
#[derive(Debug, Clone)]
pub struct AttackRoll<'a> {
    pub attacker_id: Uuid,
    pub attacker_name: &'a str,
    pub target_id: Uuid,
    pub target_name: &'a str,
    pub natural_roll: u32,
    pub modifier: i32,
    pub target_ac: i32,
    pub base_damage: u32,
    pub bonus_damage: u32,
    pub damage_type: DamageType,
    pub damage_response: DamageResponse,
}

impl AttackResult {
    /// Computes hit, crit and final damage. `target_defeated` is left false;
    /// the engine sets it once damage has been applied.
    pub fn resolve(roll: AttackRoll<'_>) -> Self {
        let outcome = resolve_hit(roll.natural_roll, roll.modifier, roll.target_ac);
        let crit_multiplier = if outcome == HitOutcome::Critical {
            CRIT_DAMAGE_MULTIPLIER
        } else {
            1
        };
        let damage = if outcome.is_hit() {
            let raw = (roll.base_damage + roll.bonus_damage) * crit_multiplier;
            roll.damage_response.apply(raw)
        } else {
            0
        };

        Self {
            attacker_id: roll.attacker_id,
            attacker_name: roll.attacker_name.to_string(),
            target_id: roll.target_id,
            target_name: roll.target_name.to_string(),
            natural_roll: roll.natural_roll,
            modifier: roll.modifier,
            total: roll.natural_roll as i32 + roll.modifier,
            target_ac: roll.target_ac,
            is_hit: outcome.is_hit(),
            is_critical: outcome == HitOutcome::Critical,
            is_miss: !outcome.is_hit(),
            base_damage: roll.base_damage,
            bonus_damage: roll.bonus_damage,
            crit_multiplier,
            damage_type: roll.damage_type,
            damage_response: roll.damage_response,
            damage,
            target_defeated: false,
        }
    }

    pub fn raw_damage(&self) -> u32 {
        if self.is_hit {
            (self.base_damage + self.bonus_damage) * self.crit_multiplier
        } else {
            0
        }
    }

    /// One-line narration for the combat log.
    pub fn describe(&self) -> String {
        if self.is_miss {
            if self.natural_roll == NATURAL_FUMBLE {
                return format!(
                    "{} fumbles the attack on {}!",
                    self.attacker_name, self.target_name
                );
            }
            return format!(
                "{} misses {} ({} vs AC {}).",
                self.attacker_name, self.target_name, self.total, self.target_ac
            );
        }

        let mut line = if self.is_critical {
            format!(
                "CRITICAL! {} hits {} for {} {} damage",
                self.attacker_name,
                self.target_name,
                self.damage,
                self.damage_type.name()
            )
        } else {
            format!(
                "{} hits {} for {} {} damage",
                self.attacker_name,
                self.target_name,
                self.damage,
                self.damage_type.name()
            )
        };
        match self.damage_response {
            DamageResponse::Resisted => line.push_str(" (resisted)"),
            DamageResponse::Vulnerable => line.push_str(" (vulnerable)"),
            DamageResponse::Immune => line.push_str(" (immune)"),
            DamageResponse::Normal => {}
        }
        line.push('.');
        if self.target_defeated {
            line.push_str(&format!(" {} is defeated!", self.target_name));
        }
        line
    }
}
