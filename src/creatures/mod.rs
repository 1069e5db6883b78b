//! Creatures, generation data, evolution and the data provider seam.

pub mod evolution;
pub mod generation;
pub mod memory;
pub mod pokeapi;
pub mod provider;
pub mod types;

pub use evolution::{resolve_evolution, successors, EvolutionOutcome};
pub use generation::{Generation, Starter};
pub use memory::MemoryProvider;
pub use pokeapi::PokeApiProvider;
pub use provider::{CreatureProvider, ProviderError};
pub use types::*;
