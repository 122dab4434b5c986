//! Post-combat settlement: stamina carry-over, coins and skill experience.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enemy::EnemyCategory;
use super::player::PlayerCombatant;
use super::state::{CombatResult, CombatState};
use crate::character::Player;
use crate::core::constants::*;
use crate::items::EquipmentSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Unarmed,
    OneHanded,
    TwoHanded,
    Armor,
    Shield,
    /// Trained by putting down undead and demons.
    Exorcism,
}

impl Skill {
    pub fn name(&self) -> &'static str {
        match self {
            Skill::Unarmed => "Unarmed",
            Skill::OneHanded => "One-Handed",
            Skill::TwoHanded => "Two-Handed",
            Skill::Armor => "Armor",
            Skill::Shield => "Shield",
            Skill::Exorcism => "Exorcism",
        }
    }

    /// The weapon skill trained by fighting with the given slot.
    pub fn for_weapon(slot: Option<EquipmentSlot>) -> Skill {
        match slot {
            Some(EquipmentSlot::OneHanded) => Skill::OneHanded,
            Some(EquipmentSlot::TwoHanded) => Skill::TwoHanded,
            _ => Skill::Unarmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGain {
    pub player_id: Uuid,
    pub skill: Skill,
    pub amount: f64,
}

/// Stamina a party walks away with.
///
/// Victory recovers half the damage taken (in stamina units, capped at 1),
/// fleeing costs a flat 0.05 and defeat halves what was left.
pub fn calculate_post_combat_stamina(state: &CombatState, stamina: f64) -> f64 {
    match state.result {
        CombatResult::Victory => {
            let recovered =
                state.total_damage_taken as f64 / VICTORY_STAMINA_DAMAGE_SCALE / VICTORY_STAMINA_DIVISOR;
            (stamina + recovered).min(1.0)
        }
        CombatResult::Fled => (stamina - FLEE_STAMINA_PENALTY).max(0.0),
        CombatResult::Defeat => (stamina * DEFEAT_STAMINA_MULTIPLIER).max(0.0),
        CombatResult::InProgress => stamina,
    }
}

/// Coins paid out for a won fight.
pub fn coin_reward(state: &CombatState) -> u64 {
    if state.result != CombatResult::Victory {
        return 0;
    }
    (state.total_xp_earned / XP_PER_COIN) as u64
}

/// Splits the coin reward across the party; the first members take the remainder.
pub fn distribute_coins(state: &CombatState, party: &mut [Player]) -> u64 {
    let total = coin_reward(state);
    if total == 0 || party.is_empty() {
        return 0;
    }
    let share = total / party.len() as u64;
    let remainder = (total % party.len() as u64) as usize;
    for (i, player) in party.iter_mut().enumerate() {
        player.coins += share + u64::from(i < remainder);
    }
    total
}

/// Skill experience for every party member after a victory.
///
/// Each member gets log2(1 + XP) in their weapon skill. Armor and shield
/// wearers get half of that in the matching skill, and a quarter goes to
/// Exorcism when undead or demons were among the defeated.
pub fn calculate_skill_gains(state: &CombatState) -> Vec<SkillGain> {
    if state.result != CombatResult::Victory {
        return Vec::new();
    }

    let base = (1.0 + state.total_xp_earned as f64).log2();
    let unholy = state
        .enemies
        .iter()
        .any(|e| matches!(e.category, EnemyCategory::Undead | EnemyCategory::Demon));

    state
        .players
        .iter()
        .flat_map(|p| skill_gains_for(p, base, unholy))
        .collect()
}

fn skill_gains_for(combatant: &PlayerCombatant, base: f64, unholy: bool) -> Vec<SkillGain> {
    let player_id = combatant.player.id;
    let equipment = combatant.player.equipment();
    let gain = |skill: Skill, amount: f64| SkillGain {
        player_id,
        skill,
        amount,
    };

    let mut gains = vec![gain(Skill::for_weapon(combatant.weapon.slot), base)];
    if equipment.has_armor() {
        gains.push(gain(Skill::Armor, base * ARMOR_SKILL_SHARE));
    }
    if equipment.has_shield() {
        gains.push(gain(Skill::Shield, base * SHIELD_SKILL_SHARE));
    }
    if unholy {
        gains.push(gain(Skill::Exorcism, base * EXORCISM_SKILL_SHARE));
    }
    gains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::enemy::{Enemy, Subcategory};
    use crate::character::attributes::Attributes;
    use crate::items::{Item, Rarity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state_with(players: Vec<Player>, enemies: Vec<Enemy>, result: CombatResult) -> CombatState {
        let players = players
            .iter()
            .map(|p| PlayerCombatant::new(p, 1.0))
            .collect();
        let mut state = CombatState::new(players, enemies);
        state.result = result;
        state
    }

    fn brute() -> Enemy {
        Enemy::fallback(1.0, &mut ChaCha8Rng::seed_from_u64(1))
    }

    #[test]
    fn test_stamina_after_victory() {
        let mut state = state_with(vec![Player::new("Ash", 1)], vec![brute()], CombatResult::Victory);
        state.total_damage_taken = 40;
        assert!((calculate_post_combat_stamina(&state, 0.5) - 0.7).abs() < 1e-9);
        assert_eq!(calculate_post_combat_stamina(&state, 0.9), 1.0);
    }

    #[test]
    fn test_stamina_after_flee_and_defeat() {
        let mut state = state_with(vec![Player::new("Ash", 1)], vec![brute()], CombatResult::Fled);
        assert!((calculate_post_combat_stamina(&state, 0.5) - 0.45).abs() < 1e-9);
        assert_eq!(calculate_post_combat_stamina(&state, 0.01), 0.0);

        state.result = CombatResult::Defeat;
        assert_eq!(calculate_post_combat_stamina(&state, 0.6), 0.3);
        assert_eq!(calculate_post_combat_stamina(&state, 0.0), 0.0);

        state.result = CombatResult::InProgress;
        assert_eq!(calculate_post_combat_stamina(&state, 0.6), 0.6);
    }

    #[test]
    fn test_coin_reward_only_on_victory() {
        let mut state = state_with(vec![Player::new("Ash", 1)], vec![brute()], CombatResult::Victory);
        state.total_xp_earned = 255;
        assert_eq!(coin_reward(&state), 25);
        state.result = CombatResult::Fled;
        assert_eq!(coin_reward(&state), 0);
    }

    #[test]
    fn test_distribute_coins_splits_remainder() {
        let mut state = state_with(vec![Player::new("Ash", 1)], vec![brute()], CombatResult::Victory);
        state.total_xp_earned = 500;
        let mut party = vec![Player::new("Ash", 1), Player::new("Bea", 1), Player::new("Cid", 1)];
        assert_eq!(distribute_coins(&state, &mut party), 50);
        let coins: Vec<u64> = party.iter().map(|p| p.coins).collect();
        assert_eq!(coins, vec![17, 17, 16]);
    }

    #[test]
    fn test_skill_gains_unarmed_no_gear() {
        let mut state = state_with(vec![Player::new("Ash", 1)], vec![brute()], CombatResult::Victory);
        state.total_xp_earned = 255;
        let gains = calculate_skill_gains(&state);
        assert_eq!(gains.len(), 1);
        assert_eq!(gains[0].skill, Skill::Unarmed);
        assert!((gains[0].amount - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_skill_gains_with_gear_and_undead() {
        let knight = Player::new("Ash", 3)
            .with_item(Item::new("Longsword", EquipmentSlot::OneHanded, Rarity::Common).equipped())
            .with_item(Item::new("Mail", EquipmentSlot::Chest, Rarity::Common).equipped())
            .with_item(Item::new("Buckler", EquipmentSlot::Shield, Rarity::Common).equipped());
        let skeleton = Enemy::template(
            "skeleton",
            "Skeleton",
            Subcategory::Skeleton,
            0.25,
            Attributes::new(),
            13,
            13,
        );
        let mut state = state_with(vec![knight], vec![skeleton], CombatResult::Victory);
        state.total_xp_earned = 63;

        let gains = calculate_skill_gains(&state);
        let amount = |skill| gains.iter().find(|g| g.skill == skill).map(|g| g.amount);
        assert_eq!(amount(Skill::OneHanded), Some(6.0));
        assert_eq!(amount(Skill::Armor), Some(3.0));
        assert_eq!(amount(Skill::Shield), Some(3.0));
        assert_eq!(amount(Skill::Exorcism), Some(1.5));
        assert_eq!(amount(Skill::Unarmed), None);
    }

    #[test]
    fn test_no_skill_gains_without_victory() {
        let state = state_with(vec![Player::new("Ash", 1)], vec![brute()], CombatResult::Defeat);
        assert!(calculate_skill_gains(&state).is_empty());
    }
}
