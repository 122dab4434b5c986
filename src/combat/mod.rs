//! Combat system: combatants, encounters, the turn engine and rewards.

#![allow(unused_imports)]

pub mod attack;
pub mod catalog;
pub mod config;
pub mod encounter;
pub mod enemy;
pub mod logic;
pub mod player;
pub mod rewards;
pub mod state;
pub mod types;

pub use attack::*;
pub use catalog::*;
pub use config::*;
pub use encounter::*;
pub use enemy::*;
pub use logic::*;
pub use player::*;
pub use rewards::*;
pub use state::*;
pub use types::*;
