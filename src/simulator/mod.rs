//! Combat balance simulator for Monte Carlo analysis.
//!
//! Runs thousands of autoplayed fights to analyze:
//! - Win/defeat rates per biome and difficulty
//! - Fight length in rounds
//! - Damage taken and stamina carried out of combat
//! - XP and loot yields
//!
//! Every fight goes through `CombatEngine`, so results match real play.

mod config;
mod report;
mod runner;

pub use config::{PlayStyle, SimConfig};
pub use report::SimReport;
pub use runner::{autoplay, autoplay_with, run_simulation, simulate_single_run, RunStats};
