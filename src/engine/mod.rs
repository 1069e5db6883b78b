//! Progression engine: roulette tables, event effects and the state machine.

pub mod action;
pub mod events;
pub mod logic;
pub mod narrative;

pub use action::*;
pub use events::*;
pub use logic::*;
pub use narrative::{final_summary, status_text};
