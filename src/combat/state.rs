use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attack::AttackResult;
use super::enemy::{Enemy, LootDrop};
use super::player::PlayerCombatant;
use super::types::Combatant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatResult {
    InProgress,
    Victory,
    Defeat,
    Fled,
}

impl CombatResult {
    pub fn is_terminal(&self) -> bool {
        *self != CombatResult::InProgress
    }
}

/// A position in the turn order, indexing into the player or enemy roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnSlot {
    Player(usize),
    Enemy(usize),
}

/// One combat session. Created by the engine, mutated only by engine
/// operations and discarded once rewards are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub players: Vec<PlayerCombatant>,
    pub enemies: Vec<Enemy>,
    /// Fixed at start; only liveness changes afterwards.
    pub turn_order: Vec<TurnSlot>,
    pub current_turn: usize,
    pub round: u32,
    pub result: CombatResult,
    pub combat_log: Vec<String>,
    pub last_attack: Option<AttackResult>,
    pub total_damage_taken: u32,
    pub total_xp_earned: u32,
    pub pending_loot: Vec<LootDrop>,
}

impl CombatState {
    pub fn new(players: Vec<PlayerCombatant>, enemies: Vec<Enemy>) -> Self {
        Self {
            players,
            enemies,
            turn_order: Vec::new(),
            current_turn: 0,
            round: 0,
            result: CombatResult::InProgress,
            combat_log: Vec::new(),
            last_attack: None,
            total_damage_taken: 0,
            total_xp_earned: 0,
            pending_loot: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_terminal()
    }

    /// Fleeing is only possible during the opening round.
    pub fn can_flee(&self) -> bool {
        self.round == 0 && self.result == CombatResult::InProgress
    }

    pub fn add_log_entry(&mut self, message: String) {
        self.combat_log.push(message);
    }

    pub fn active_slot(&self) -> Option<TurnSlot> {
        self.turn_order.get(self.current_turn).copied()
    }

    pub fn combatant(&self, slot: TurnSlot) -> Option<&dyn Combatant> {
        match slot {
            TurnSlot::Player(i) => self.players.get(i).map(|p| p as &dyn Combatant),
            TurnSlot::Enemy(i) => self.enemies.get(i).map(|e| e as &dyn Combatant),
        }
    }

    pub fn combatant_mut(&mut self, slot: TurnSlot) -> Option<&mut dyn Combatant> {
        match slot {
            TurnSlot::Player(i) => self.players.get_mut(i).map(|p| p as &mut dyn Combatant),
            TurnSlot::Enemy(i) => self.enemies.get_mut(i).map(|e| e as &mut dyn Combatant),
        }
    }

    pub fn active_combatant(&self) -> Option<&dyn Combatant> {
        self.active_slot().and_then(|slot| self.combatant(slot))
    }

    pub fn is_slot_alive(&self, slot: TurnSlot) -> bool {
        self.combatant(slot).is_some_and(|c| c.is_alive())
    }

    /// Index of the active player, if a living player holds the turn.
    pub fn active_living_player(&self) -> Option<usize> {
        match self.active_slot()? {
            TurnSlot::Player(i) if self.players.get(i)?.is_alive() => Some(i),
            _ => None,
        }
    }

    /// Index of the active enemy, if a living enemy holds the turn.
    pub fn active_living_enemy(&self) -> Option<usize> {
        match self.active_slot()? {
            TurnSlot::Enemy(i) if self.enemies.get(i)?.is_alive() => Some(i),
            _ => None,
        }
    }

    pub fn living_players(&self) -> impl Iterator<Item = (usize, &PlayerCombatant)> {
        self.players.iter().enumerate().filter(|(_, p)| p.is_alive())
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.enemies.iter().enumerate().filter(|(_, e)| e.is_alive())
    }

    pub fn any_player_alive(&self) -> bool {
        self.players.iter().any(|p| p.is_alive())
    }

    pub fn any_enemy_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.is_alive())
    }

    pub fn enemy_index(&self, id: Uuid) -> Option<usize> {
        self.enemies.iter().position(|e| e.id() == id)
    }

    /// End-of-combat text for the narration layer.
    pub fn summary(&self) -> String {
        match self.result {
            CombatResult::InProgress => format!("Round {}: the battle rages on.", self.round + 1),
            CombatResult::Victory => {
                let mut text = format!(
                    "Victory after {} round(s)! Earned {} XP, took {} damage.",
                    self.round + 1,
                    self.total_xp_earned,
                    self.total_damage_taken
                );
                if !self.pending_loot.is_empty() {
                    let loot: Vec<String> = self
                        .pending_loot
                        .iter()
                        .map(|l| format!("{} x{}", l.name, l.quantity))
                        .collect();
                    text.push_str(&format!(" Loot: {}.", loot.join(", ")));
                }
                text
            }
            CombatResult::Defeat => format!(
                "Defeat. The party fell after taking {} damage.",
                self.total_damage_taken
            ),
            CombatResult::Fled => "The party fled the battle.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Player;
    use crate::combat::enemy::Enemy;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_state() -> CombatState {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let players = vec![PlayerCombatant::new(&Player::new("Ash", 1), 1.0)];
        let enemies = vec![Enemy::fallback(1.0, &mut rng), Enemy::fallback(0.5, &mut rng)];
        let mut state = CombatState::new(players, enemies);
        state.turn_order = vec![TurnSlot::Enemy(1), TurnSlot::Player(0), TurnSlot::Enemy(0)];
        state
    }

    #[test]
    fn test_can_flee_only_in_round_zero() {
        let mut state = make_state();
        assert!(state.can_flee());
        state.round = 1;
        assert!(!state.can_flee());
        state.round = 0;
        state.result = CombatResult::Victory;
        assert!(!state.can_flee());
    }

    #[test]
    fn test_active_lookup() {
        let mut state = make_state();
        assert_eq!(state.active_slot(), Some(TurnSlot::Enemy(1)));
        assert_eq!(state.active_living_enemy(), Some(1));
        assert_eq!(state.active_living_player(), None);

        state.current_turn = 1;
        assert_eq!(state.active_living_player(), Some(0));
        state.players[0].take_damage(500);
        assert_eq!(state.active_living_player(), None);
        assert!(!state.any_player_alive());
    }

    #[test]
    fn test_combatant_mut_reaches_roster() {
        let mut state = make_state();
        if let Some(c) = state.combatant_mut(TurnSlot::Enemy(0)) {
            c.take_damage(10);
        }
        assert_eq!(state.enemies[0].current_hp(), 30);
        assert!(state.combatant(TurnSlot::Enemy(9)).is_none());
    }

    #[test]
    fn test_summary_mentions_loot() {
        let mut state = make_state();
        state.result = CombatResult::Victory;
        state.total_xp_earned = 300;
        state.pending_loot.push(LootDrop {
            name: "Coarse Hide".to_string(),
            quantity: 2,
            source: "Wandering Brute".to_string(),
        });
        let summary = state.summary();
        assert!(summary.contains("300 XP"));
        assert!(summary.contains("Coarse Hide x2"));
    }

    #[test]
    fn test_state_serializes() {
        let state = make_state();
        let json = serde_json::to_string(&state).unwrap();
        let back: CombatState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.turn_order, state.turn_order);
        assert_eq!(back.enemies.len(), 2);
    }
}
