//! Character attributes and the party member aggregate.

#![allow(unused_imports)]

pub mod attributes;
pub mod player;

pub use attributes::*;
pub use player::*;
