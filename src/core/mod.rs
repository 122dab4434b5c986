//! Rule tables, dice and the crate error type.

#![allow(unused_imports)]

pub mod constants;
pub mod dice;
pub mod error;

pub use constants::*;
pub use dice::*;
pub use error::*;
