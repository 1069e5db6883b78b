//! Core balance constants, weighted roulette and battle math.

pub mod battle;
pub mod constants;
pub mod weighted;

pub use battle::*;
pub use constants::*;
pub use weighted::*;
