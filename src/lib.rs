//! Roulette - Chance-Driven Monster Collecting Game Library
//!
//! Every step of a career is a spin: generation, avatar, starter, adventure
//! events, gym battles and evolutions. This crate holds the progression
//! engine and the transports that put it in front of players.

pub mod build_info;
pub mod config;
pub mod core;
pub mod creatures;
pub mod engine;
pub mod session;
pub mod simulator;
pub mod transport;

pub use config::Config;
pub use creatures::{Creature, CreatureProvider, MemoryProvider, PokeApiProvider};
pub use engine::{Action, ActionError, Control, ProgressionEngine, Turn};
pub use session::{GameState, PlayerId, Session, SessionStore};
