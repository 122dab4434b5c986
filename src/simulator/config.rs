//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::combat::Biome;
use crate::core::constants::DEFAULT_MAX_ROUNDS;

/// How an autoplayed party picks its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayStyle {
    /// Always attack the first living enemy
    #[default]
    Aggressive,
    /// Retreat in the opening round when the enemies outnumber the party
    Cautious,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of combats to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Level of every simulated party member (1-20)
    pub party_level: u32,

    pub party_size: usize,

    /// Stamina the party enters each fight with
    pub stamina: f64,

    pub biome: Biome,

    /// World challenge rating, mapped onto a difficulty tier
    pub challenge_rating: f64,

    /// Boss template key; regular encounters when None
    pub boss: Option<String>,

    /// Rounds before a fight counts as timed out
    pub max_rounds: u32,

    pub play_style: PlayStyle,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            party_level: 1,
            party_size: 4,
            stamina: 1.0,
            biome: Biome::Forest,
            challenge_rating: 1.0,
            boss: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
            play_style: PlayStyle::Aggressive,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking one biome at one difficulty
    pub fn quick_balance_test(biome: Biome, challenge_rating: f64) -> Self {
        Self {
            num_runs: 100,
            biome,
            challenge_rating,
            ..Default::default()
        }
    }

    /// Boss fight against a catalog boss at a given party level
    pub fn boss_test(boss_key: &str, party_level: u32) -> Self {
        Self {
            num_runs: 200,
            party_level,
            boss: Some(boss_key.to_string()),
            ..Default::default()
        }
    }

    /// Solo adventurer, the hardest case for encounter sizing
    pub fn solo_test(party_level: u32) -> Self {
        Self {
            num_runs: 200,
            party_level,
            party_size: 1,
            ..Default::default()
        }
    }
}
