//! Engine configuration.

use serde::{Deserialize, Serialize};

use super::enemy::Biome;
use crate::core::constants::{DEFEND_AC_BONUS, MAX_ENCOUNTER_SIZE};

/// Tunables for a [`CombatEngine`](super::logic::CombatEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Biome retried when the requested one yields no enemies.
    #[serde(default)]
    pub default_biome: Biome,
    #[serde(default = "default_max_enemies")]
    pub max_enemies: usize,
    #[serde(default = "default_defend_bonus")]
    pub defend_ac_bonus: i32,
}

fn default_max_enemies() -> usize {
    MAX_ENCOUNTER_SIZE
}

fn default_defend_bonus() -> i32 {
    DEFEND_AC_BONUS
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            default_biome: Biome::default(),
            max_enemies: MAX_ENCOUNTER_SIZE,
            defend_ac_bonus: DEFEND_AC_BONUS,
        }
    }
}
