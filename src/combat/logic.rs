//! The combat engine: session start, action resolution, end detection and
//! turn rotation.
//!
//! A session moves InProgress -> {Victory, Defeat, Fled} and never leaves a
//! terminal state. Player actions advance the turn themselves; enemy turns do
//! not, so a UI can pause between an enemy's swing and the rotation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attack::{AttackResult, AttackRoll};
use super::catalog::EnemyCatalog;
use super::config::CombatConfig;
use super::encounter::{Difficulty, EncounterBuilder, EncounterFilter, EncounterRequest};
use super::enemy::{Biome, Enemy};
use super::player::PlayerCombatant;
use super::state::{CombatResult, CombatState, TurnSlot};
use super::types::{Combatant, DamageResponse, StatusKind};
use crate::character::attributes::AttributeType;
use crate::character::Player;
use crate::core::constants::{MAX_PARTY_LEVEL, MIN_PARTY_LEVEL};
use crate::core::dice::roll_d20;
use crate::core::error::{validate_challenge_rating, validate_stamina};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    Defend,
    Flee,
}

/// Runs combat sessions against a shared, read-only catalog.
///
/// The random source is owned by the engine so every roll, encounter pick and
/// loot drop of a session comes from one seedable stream.
pub struct CombatEngine<'a, R: Rng> {
    catalog: &'a EnemyCatalog,
    config: CombatConfig,
    rng: R,
}

impl<'a, R: Rng> CombatEngine<'a, R> {
    pub fn new(catalog: &'a EnemyCatalog, config: CombatConfig, rng: R) -> Self {
        Self {
            catalog,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn catalog(&self) -> &EnemyCatalog {
        self.catalog
    }

    /// Starts a session against an encounter built for the party.
    ///
    /// Never fails: invalid stamina is clamped, an invalid challenge rating is
    /// treated as 0, and an empty encounter falls back first to the default
    /// biome and then to a single synthesised enemy.
    pub fn start_combat(
        &mut self,
        players: &[Player],
        stamina: f64,
        biome: Biome,
        challenge_rating: f64,
    ) -> CombatState {
        let stamina = sanitize_stamina(stamina);
        let challenge_rating = validate_challenge_rating(challenge_rating).unwrap_or_else(|err| {
            tracing::warn!(%err, "treating challenge rating as 0");
            0.0
        });

        let party: Vec<PlayerCombatant> = players
            .iter()
            .map(|p| PlayerCombatant::new(p, stamina))
            .collect();
        let difficulty = Difficulty::from_challenge_rating(challenge_rating);
        let enemies = self.build_encounter(players, biome, difficulty, challenge_rating);

        self.begin(party, enemies)
    }

    /// Starts a session against a boss template scaled to the party, with minions.
    /// Unknown boss keys fall back to a synthesised enemy at the party's level.
    pub fn start_boss_combat(&mut self, players: &[Player], stamina: f64, boss_key: &str) -> CombatState {
        let stamina = sanitize_stamina(stamina);
        let party: Vec<PlayerCombatant> = players
            .iter()
            .map(|p| PlayerCombatant::new(p, stamina))
            .collect();
        let level = party_level(players);

        let enemies = match self.catalog.by_key(boss_key) {
            Some(boss) => EncounterBuilder::new(self.catalog).generate_boss_encounter(
                boss,
                level,
                players.len(),
                &mut self.rng,
            ),
            None => {
                tracing::warn!(boss_key, "unknown boss, synthesising fallback");
                vec![Enemy::fallback(level as f64, &mut self.rng)]
            }
        };

        self.begin(party, enemies)
    }

    fn build_encounter(
        &mut self,
        players: &[Player],
        biome: Biome,
        difficulty: Difficulty,
        challenge_rating: f64,
    ) -> Vec<Enemy> {
        let builder =
            EncounterBuilder::new(self.catalog).with_max_enemies(self.config.max_enemies);
        let mut biomes = vec![biome];
        if self.config.default_biome != biome {
            biomes.push(self.config.default_biome);
        }

        for biome in biomes {
            let request = EncounterRequest {
                filter: EncounterFilter::biome(biome),
                party_level: party_level(players),
                party_size: players.len(),
                difficulty,
            };
            match builder.generate(&request, &mut self.rng) {
                Ok(encounter) if !encounter.enemies.is_empty() => return encounter.enemies,
                Ok(_) => tracing::warn!(biome = biome.name(), "no enemies fit the encounter"),
                Err(err) => tracing::warn!(%err, biome = biome.name(), "encounter request rejected"),
            }
        }

        tracing::warn!(challenge_rating, "synthesising fallback enemy");
        vec![Enemy::fallback(challenge_rating, &mut self.rng)]
    }

    /// Rolls initiative, fixes the turn order and opens the log.
    fn begin(&mut self, players: Vec<PlayerCombatant>, enemies: Vec<Enemy>) -> CombatState {
        let mut state = CombatState::new(players, enemies);

        // (slot, initiative, tie-break draw)
        let mut rolls: Vec<(TurnSlot, i32, u32)> = Vec::new();
        for (i, player) in state.players.iter_mut().enumerate() {
            let initiative = roll_d20(&mut self.rng) as i32 + player.modifier(AttributeType::Dexterity);
            player.stats.initiative = initiative;
            rolls.push((TurnSlot::Player(i), initiative, self.rng.gen()));
        }
        for (i, enemy) in state.enemies.iter_mut().enumerate() {
            let initiative = roll_d20(&mut self.rng) as i32 + enemy.modifier(AttributeType::Dexterity);
            enemy.stats.initiative = initiative;
            rolls.push((TurnSlot::Enemy(i), initiative, self.rng.gen()));
        }
        rolls.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));

        state.turn_order = rolls.into_iter().map(|(slot, _, _)| slot).collect();
        state.current_turn = 0;
        state.round = 0;

        let foes: Vec<&str> = state.enemies.iter().map(|e| e.name()).collect();
        let opening = format!("Combat begins! You face: {}.", foes.join(", "));
        state.add_log_entry(opening);
        if let Some(first) = state.active_combatant() {
            let line = format!("{} acts first.", first.name());
            state.add_log_entry(line);
        }

        tracing::info!(
            players = state.players.len(),
            enemies = state.enemies.len(),
            "combat started"
        );
        state
    }

    /// Resolves the active player's action. Does nothing unless a living
    /// player holds the turn and the session is still running.
    pub fn process_player_action(
        &mut self,
        state: &mut CombatState,
        action: PlayerAction,
        target: Option<Uuid>,
    ) {
        if state.is_over() {
            return;
        }
        let Some(actor) = state.active_living_player() else {
            return;
        };

        match action {
            PlayerAction::Attack => {
                if !self.player_attack(state, actor, target) {
                    return;
                }
            }
            PlayerAction::Defend => {
                let bonus = self.config.defend_ac_bonus;
                let player = &mut state.players[actor];
                if !player.stats.used_defend {
                    player.stats.armor_class += bonus;
                    player.stats.used_defend = true;
                }
                let line = format!("{} takes a defensive stance (+{} AC).", player.name(), bonus);
                state.add_log_entry(line);
            }
            PlayerAction::Flee => {
                let name = state.players[actor].name().to_string();
                if state.can_flee() {
                    state.result = CombatResult::Fled;
                    state.add_log_entry(format!("{} leads the party in retreat!", name));
                    tracing::info!(round = state.round, "party fled");
                } else {
                    state.add_log_entry(format!(
                        "{} tries to flee, but it is too late to escape!",
                        name
                    ));
                }
                return;
            }
        }

        self.check_combat_end(state);
        if !state.is_over() {
            self.advance_turn(state);
        }
    }

    /// Returns false when there was nothing to attack.
    fn player_attack(&mut self, state: &mut CombatState, actor: usize, target: Option<Uuid>) -> bool {
        let target_idx = target
            .and_then(|id| state.enemy_index(id))
            .filter(|&i| state.enemies[i].is_alive())
            .or_else(|| state.living_enemies().next().map(|(i, _)| i));
        let Some(target_idx) = target_idx else {
            let line = format!("{} finds no enemy left to attack.", state.players[actor].name());
            state.add_log_entry(line);
            return false;
        };

        let natural_roll = roll_d20(&mut self.rng);
        let player = &state.players[actor];
        let enemy = &state.enemies[target_idx];
        let mut result = AttackResult::resolve(AttackRoll {
            attacker_id: player.id(),
            attacker_name: player.name(),
            target_id: enemy.id(),
            target_name: enemy.name(),
            natural_roll,
            modifier: player.modifier(AttributeType::Strength),
            target_ac: enemy.armor_class(),
            base_damage: player.weapon.base_damage,
            bonus_damage: player.weapon.rarity_bonus,
            damage_type: player.weapon.damage_type,
            damage_response: enemy.damage_response(player.weapon.damage_type),
        });

        if result.is_hit {
            let enemy = &mut state.enemies[target_idx];
            enemy.take_damage(result.damage);
            if !enemy.is_alive() {
                result.target_defeated = true;
                state.total_xp_earned = state.total_xp_earned.saturating_add(enemy.experience_value);
            }
        }

        tracing::debug!(
            attacker = %result.attacker_name,
            target = %result.target_name,
            roll = result.natural_roll,
            total = result.total,
            ac = result.target_ac,
            damage = result.damage,
            "player attack"
        );
        state.add_log_entry(result.describe());
        state.last_attack = Some(result);
        true
    }

    /// Resolves the active enemy's attack against a random living player.
    /// Skips ahead if no living enemy holds the turn. Never rotates the turn
    /// after acting; call [`advance_turn`](Self::advance_turn) for that.
    pub fn process_enemy_turn(&mut self, state: &mut CombatState) {
        if state.is_over() {
            return;
        }
        let Some(actor) = state.active_living_enemy() else {
            self.advance_turn(state);
            return;
        };

        let targets: Vec<usize> = state.living_players().map(|(i, _)| i).collect();
        let Some(&target_idx) = targets.choose(&mut self.rng) else {
            self.check_combat_end(state);
            return;
        };

        let natural_roll = roll_d20(&mut self.rng);
        let enemy = &state.enemies[actor];
        let player = &state.players[target_idx];
        let mut result = AttackResult::resolve(AttackRoll {
            attacker_id: enemy.id(),
            attacker_name: enemy.name(),
            target_id: player.id(),
            target_name: player.name(),
            natural_roll,
            modifier: enemy.modifier(AttributeType::Strength),
            target_ac: player.armor_class(),
            base_damage: enemy.attack_damage(),
            bonus_damage: 0,
            damage_type: enemy.damage_type,
            damage_response: DamageResponse::Normal,
        });
        let on_hit = enemy.on_hit;

        if result.is_hit {
            let player = &mut state.players[target_idx];
            player.take_damage(result.damage);
            state.total_damage_taken += result.damage;
            result.target_defeated = !player.is_alive();
        }

        tracing::debug!(
            attacker = %result.attacker_name,
            target = %result.target_name,
            roll = result.natural_roll,
            total = result.total,
            ac = result.target_ac,
            damage = result.damage,
            "enemy attack"
        );
        state.add_log_entry(result.describe());

        if let Some(effect) = on_hit.filter(|_| result.is_hit && !result.target_defeated) {
            let player = &mut state.players[target_idx];
            player.apply_status(effect);
            let line = format!("{} is afflicted with {}.", player.name(), effect.kind.name());
            state.add_log_entry(line);
        }

        state.last_attack = Some(result);
        self.check_combat_end(state);
    }

    /// Settles the session if one side is wiped out. Idempotent once terminal.
    ///
    /// Victory is checked first, so a simultaneous wipe counts as a win.
    pub fn check_combat_end(&mut self, state: &mut CombatState) {
        if state.is_over() {
            return;
        }

        if !state.any_enemy_alive() {
            state.result = CombatResult::Victory;
            state.total_xp_earned = state
                .enemies
                .iter()
                .fold(0u32, |total, e| total.saturating_add(e.experience_value));
            for enemy in &state.enemies {
                let drops = enemy.roll_loot(&mut self.rng);
                state.pending_loot.extend(drops);
            }
            let line = format!("Victory! The party earns {} XP.", state.total_xp_earned);
            state.add_log_entry(line);
            tracing::info!(
                xp = state.total_xp_earned,
                loot = state.pending_loot.len(),
                round = state.round,
                "combat won"
            );
        } else if !state.any_player_alive() {
            state.result = CombatResult::Defeat;
            state.add_log_entry("Defeat... the party has fallen.".to_string());
            tracing::info!(round = state.round, "combat lost");
        }
    }

    /// Hands the turn to the next living combatant.
    ///
    /// Wrapping back to the top of the order starts a new round. A player who
    /// defended loses the bonus here, when their turn comes back around.
    /// Status effects tick on the newly active combatant; a stunned combatant
    /// loses the turn.
    pub fn advance_turn(&mut self, state: &mut CombatState) {
        if state.is_over() || state.turn_order.is_empty() {
            return;
        }

        // At most one lap: the last step lands back on the current slot.
        let len = state.turn_order.len();
        for _ in 0..len {
            state.current_turn = (state.current_turn + 1) % len;
            if state.current_turn == 0 {
                state.round += 1;
                let line = format!("-- Round {} --", state.round + 1);
                state.add_log_entry(line);
            }

            let slot = state.turn_order[state.current_turn];
            if !state.is_slot_alive(slot) {
                continue;
            }

            if let TurnSlot::Player(i) = slot {
                let bonus = self.config.defend_ac_bonus;
                let player = &mut state.players[i];
                if player.stats.used_defend {
                    player.stats.armor_class -= bonus;
                    player.stats.used_defend = false;
                }
            }

            if self.begin_turn(state, slot) {
                return;
            }
            if state.is_over() {
                return;
            }
        }

        tracing::warn!(
            turn_order = len,
            "no combatant could take the turn"
        );
    }

    /// Start-of-turn upkeep. Returns true if the combatant may act.
    fn begin_turn(&mut self, state: &mut CombatState, slot: TurnSlot) -> bool {
        let Some(combatant) = state.combatant_mut(slot) else {
            return false;
        };
        let name = combatant.name().to_string();
        let stunned = combatant.has_status(StatusKind::Stunned);
        let ticks = combatant.process_status_effects();
        let alive = combatant.is_alive();

        for tick in &ticks {
            if tick.kind.is_damage_over_time() && tick.amount > 0 {
                if matches!(slot, TurnSlot::Player(_)) {
                    state.total_damage_taken += tick.amount;
                }
                state.add_log_entry(format!(
                    "{} takes {} {} damage.",
                    name,
                    tick.amount,
                    tick.kind.name()
                ));
            } else if tick.kind == StatusKind::Regeneration && tick.amount > 0 {
                state.add_log_entry(format!("{} regenerates {} HP.", name, tick.amount));
            }
            if tick.expired {
                state.add_log_entry(format!("{}'s {} wears off.", name, tick.kind.name()));
            }
        }

        if !alive {
            state.add_log_entry(format!("{} succumbs to their wounds.", name));
            if let TurnSlot::Enemy(i) = slot {
                let xp = state.enemies[i].experience_value;
                state.total_xp_earned = state.total_xp_earned.saturating_add(xp);
            }
            self.check_combat_end(state);
            return false;
        }

        if stunned {
            state.add_log_entry(format!("{} is stunned and loses the turn.", name));
            return false;
        }

        true
    }
}

fn sanitize_stamina(stamina: f64) -> f64 {
    validate_stamina(stamina).unwrap_or_else(|err| {
        tracing::warn!(%err, "clamping stamina");
        if stamina.is_finite() {
            stamina.clamp(0.0, 1.0)
        } else {
            0.0
        }
    })
}

/// Average party level, clamped to the supported range.
pub fn party_level(players: &[Player]) -> u32 {
    if players.is_empty() {
        return MIN_PARTY_LEVEL;
    }
    let total: u64 = players.iter().map(|p| u64::from(p.level)).sum();
    let average = (total as f64 / players.len() as f64).round() as u32;
    average.clamp(MIN_PARTY_LEVEL, MAX_PARTY_LEVEL)
}
