//! Dice helpers shared by the combat engine, encounter builder and simulator.
//!
//! Every helper takes the random source explicitly so a seeded RNG makes
//! whole combats reproducible.

use super::constants::D20_SIDES;
use rand::Rng;

/// Roll a single die with `sides` faces, returning 1..=sides.
pub fn roll_die(sides: u32, rng: &mut impl Rng) -> u32 {
    if sides <= 1 {
        return 1;
    }
    rng.gen_range(1..=sides)
}

/// Roll a d20.
pub fn roll_d20(rng: &mut impl Rng) -> u32 {
    roll_die(D20_SIDES, rng)
}

/// Roll against a probability in `[0, 1]`.
///
/// # Returns
/// true with probability `chance`; chances at or below 0 never succeed and
/// chances at or above 1 always do.
pub fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    if chance <= 0.0 {
        return false;
    }
    if chance >= 1.0 {
        return true;
    }
    rng.gen::<f64>() < chance
}
