//! Skirmish - turn-based d20 combat engine.
//!
//! This crate exposes the combat rules, encounter generation and the balance
//! simulator for embedding in a game and for testing.

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod simulator;
