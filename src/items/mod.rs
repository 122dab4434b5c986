//! Item system: inventory items and the equipment view used by combat.

pub mod equipment;
pub mod types;

pub use equipment::*;
pub use types::*;
