//! Main simulation runner.
//!
//! Each run opens a session through the real [`CombatEngine`] and autoplays
//! it: players act according to the configured [`PlayStyle`], enemies take
//! their turn and the order rotates until the fight ends or times out.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::config::{PlayStyle, SimConfig};
use super::report::SimReport;
use crate::character::Player;
use crate::combat::{
    calculate_post_combat_stamina, CombatConfig, CombatEngine, CombatResult, CombatState,
    EnemyCatalog, PlayerAction, TurnSlot,
};
use crate::items::{EquipmentSlot, Item, Rarity};

/// Outcome of one simulated combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub result: CombatResult,
    pub timed_out: bool,
    /// Rounds fought, counting the opening round.
    pub rounds: u32,
    pub enemies: usize,
    pub damage_taken: u32,
    pub xp_earned: u32,
    pub loot_drops: usize,
    pub final_stamina: f64,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let catalog = EnemyCatalog::new();
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &catalog, rng);
        tracing::debug!(
            run = run_idx,
            result = ?run.result,
            rounds = run.rounds,
            damage = run.damage_taken,
            "simulated combat"
        );
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?} in {} round(s), {} enemies, {} damage taken, {} XP",
                run_idx + 1,
                config.num_runs,
                run.result,
                run.rounds,
                run.enemies,
                run.damage_taken,
                run.xp_earned
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one combat from start to finish.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, catalog: &EnemyCatalog, rng: R) -> RunStats {
    let party = build_party(config);
    let mut engine = CombatEngine::new(catalog, CombatConfig::default(), rng);
    let mut state = match &config.boss {
        Some(key) => engine.start_boss_combat(&party, config.stamina, key),
        None => engine.start_combat(&party, config.stamina, config.biome, config.challenge_rating),
    };
    let enemies = state.enemies.len();

    let timed_out = autoplay_with(&mut engine, &mut state, config.max_rounds, config.play_style);

    RunStats {
        result: state.result,
        timed_out,
        rounds: state.round + 1,
        enemies,
        damage_taken: state.total_damage_taken,
        xp_earned: state.total_xp_earned,
        loot_drops: state.pending_loot.len(),
        final_stamina: calculate_post_combat_stamina(&state, config.stamina.clamp(0.0, 1.0)),
    }
}

/// Drives a session with an always-attacking party. Returns true if it hit
/// `max_rounds` first.
pub fn autoplay<R: Rng>(engine: &mut CombatEngine<'_, R>, state: &mut CombatState, max_rounds: u32) -> bool {
    autoplay_with(engine, state, max_rounds, PlayStyle::Aggressive)
}

/// Drives a session until it ends, choosing player actions by `style`.
pub fn autoplay_with<R: Rng>(
    engine: &mut CombatEngine<'_, R>,
    state: &mut CombatState,
    max_rounds: u32,
    style: PlayStyle,
) -> bool {
    // Each step either resolves an action or rotates the turn, so a round
    // needs at most two steps per slot.
    let max_steps = (max_rounds as usize + 1) * state.turn_order.len().max(1) * 2;
    let mut steps = 0;

    while !state.is_over() && state.round < max_rounds && steps < max_steps {
        steps += 1;
        match state.active_slot() {
            Some(TurnSlot::Player(_)) if state.active_living_player().is_some() => {
                let action = choose_action(state, style);
                engine.process_player_action(state, action, None);
            }
            Some(TurnSlot::Player(_)) => engine.advance_turn(state),
            Some(TurnSlot::Enemy(_)) => {
                engine.process_enemy_turn(state);
                if !state.is_over() {
                    engine.advance_turn(state);
                }
            }
            None => break,
        }
    }

    !state.is_over()
}

fn choose_action(state: &CombatState, style: PlayStyle) -> PlayerAction {
    match style {
        PlayStyle::Cautious
            if state.can_flee() && state.living_enemies().count() > state.living_players().count() =>
        {
            PlayerAction::Flee
        }
        _ => PlayerAction::Attack,
    }
}

/// Party of identical adventurers with starter gear.
fn build_party(config: &SimConfig) -> Vec<Player> {
    (1..=config.party_size)
        .map(|i| {
            Player::new(&format!("Adventurer {}", i), config.party_level)
                .with_item(Item::new("Arming Sword", EquipmentSlot::OneHanded, Rarity::Common).equipped())
                .with_item(Item::new("Leather Jerkin", EquipmentSlot::Chest, Rarity::Common).equipped())
        })
        .collect()
}
