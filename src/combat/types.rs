use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::attributes::{AttributeType, Attributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Fire,
    Cold,
    Poison,
    Necrotic,
    Radiant,
}

impl DamageType {
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Slashing => "slashing",
            DamageType::Piercing => "piercing",
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Fire => "fire",
            DamageType::Cold => "cold",
            DamageType::Poison => "poison",
            DamageType::Necrotic => "necrotic",
            DamageType::Radiant => "radiant",
        }
    }

    /// Maps item tags to a damage type. Untagged weapons cut.
    pub fn from_tags(tags: &[String]) -> Self {
        for tag in tags {
            let damage_type = match tag.to_ascii_lowercase().as_str() {
                "blunt" | "bludgeoning" => Some(DamageType::Bludgeoning),
                "piercing" | "pierce" => Some(DamageType::Piercing),
                "fire" | "flaming" => Some(DamageType::Fire),
                "cold" | "frost" => Some(DamageType::Cold),
                "poison" | "venom" => Some(DamageType::Poison),
                "necrotic" => Some(DamageType::Necrotic),
                "radiant" | "holy" | "blessed" => Some(DamageType::Radiant),
                "slashing" => Some(DamageType::Slashing),
                _ => None,
            };
            if let Some(damage_type) = damage_type {
                return damage_type;
            }
        }
        DamageType::Slashing
    }
}

/// How a target's defenses changed an incoming hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageResponse {
    Normal,
    Resisted,
    Vulnerable,
    Immune,
}

impl DamageResponse {
    pub fn apply(&self, damage: u32) -> u32 {
        match self {
            DamageResponse::Normal => damage,
            DamageResponse::Resisted => damage / 2,
            DamageResponse::Vulnerable => damage * 2,
            DamageResponse::Immune => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
    Burning,
    Bleeding,
    Regeneration,
    Stunned,
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Poison => "poison",
            StatusKind::Burning => "burning",
            StatusKind::Bleeding => "bleeding",
            StatusKind::Regeneration => "regeneration",
            StatusKind::Stunned => "stun",
        }
    }

    pub fn is_damage_over_time(&self) -> bool {
        matches!(
            self,
            StatusKind::Poison | StatusKind::Burning | StatusKind::Bleeding
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub magnitude: u32,
    pub remaining_turns: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, magnitude: u32, remaining_turns: u32) -> Self {
        Self {
            kind,
            magnitude,
            remaining_turns,
        }
    }
}

/// One status effect resolution at the start of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusTick {
    pub kind: StatusKind,
    /// HP lost (damage over time) or regained (regeneration).
    pub amount: u32,
    pub expired: bool,
}

/// Runtime state shared by every combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub id: Uuid,
    pub name: String,
    pub attributes: Attributes,
    pub max_hp: u32,
    pub current_hp: u32,
    pub armor_class: i32,
    pub initiative: i32,
    #[serde(default)]
    pub status_effects: Vec<StatusEffect>,
    #[serde(default)]
    pub used_defend: bool,
}

impl CombatStats {
    pub fn new(id: Uuid, name: String, attributes: Attributes, max_hp: u32, armor_class: i32) -> Self {
        Self {
            id,
            name,
            attributes,
            max_hp,
            current_hp: max_hp,
            armor_class,
            initiative: 0,
            status_effects: Vec::new(),
            used_defend: false,
        }
    }
}

/// Capability set shared by players and enemies.
///
/// Implementors only expose their [`CombatStats`]; HP bookkeeping and status
/// processing live here so both sides obey the same clamping rules.
pub trait Combatant {
    fn stats(&self) -> &CombatStats;
    fn stats_mut(&mut self) -> &mut CombatStats;

    fn id(&self) -> Uuid {
        self.stats().id
    }

    fn name(&self) -> &str {
        &self.stats().name
    }

    fn modifier(&self, attr: AttributeType) -> i32 {
        self.stats().attributes.modifier(attr)
    }

    fn armor_class(&self) -> i32 {
        self.stats().armor_class
    }

    fn current_hp(&self) -> u32 {
        self.stats().current_hp
    }

    fn max_hp(&self) -> u32 {
        self.stats().max_hp
    }

    fn is_alive(&self) -> bool {
        self.stats().current_hp > 0
    }

    /// Subtracts HP, clamping at 0. Returns the HP actually lost.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let stats = self.stats_mut();
        let before = stats.current_hp;
        stats.current_hp = before.saturating_sub(amount);
        before - stats.current_hp
    }

    /// Adds HP, clamping at max. Returns the HP actually restored.
    fn heal(&mut self, amount: u32) -> u32 {
        let stats = self.stats_mut();
        let before = stats.current_hp;
        stats.current_hp = before.saturating_add(amount).min(stats.max_hp);
        stats.current_hp - before
    }

    /// Adds an effect, refreshing an existing one of the same kind.
    fn apply_status(&mut self, effect: StatusEffect) {
        let effects = &mut self.stats_mut().status_effects;
        if let Some(existing) = effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            existing.remaining_turns = existing.remaining_turns.max(effect.remaining_turns);
        } else if effect.remaining_turns > 0 {
            effects.push(effect);
        }
    }

    fn has_status(&self, kind: StatusKind) -> bool {
        self.stats().status_effects.iter().any(|e| e.kind == kind)
    }

    /// Ticks every active effect once and drops the ones that ran out.
    fn process_status_effects(&mut self) -> Vec<StatusTick> {
        let effects = std::mem::take(&mut self.stats_mut().status_effects);
        let mut ticks = Vec::with_capacity(effects.len());
        let mut remaining = Vec::with_capacity(effects.len());

        for mut effect in effects {
            let amount = match effect.kind {
                kind if kind.is_damage_over_time() => self.take_damage(effect.magnitude),
                StatusKind::Regeneration => self.heal(effect.magnitude),
                _ => 0,
            };
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            let expired = effect.remaining_turns == 0;
            ticks.push(StatusTick {
                kind: effect.kind,
                amount,
                expired,
            });
            if !expired {
                remaining.push(effect);
            }
        }

        self.stats_mut().status_effects = remaining;
        ticks
    }
}
