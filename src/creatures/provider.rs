//! The creature data provider seam.
//!
//! The engine never talks to a data source directly; it goes through a
//! [`CreatureProvider`]. Lookups may fail, and every caller treats failure
//! as "no creature obtained" rather than an error to propagate.

use super::evolution;
use super::generation::Generation;
use super::types::Creature;
use rand::{Rng, RngCore};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("species {0} is unavailable")]
    Unavailable(u32),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("could not decode species data: {0}")]
    Decode(String),
}

/// Resolves species identifiers to creatures.
///
/// Implementations are expected to cache by species id. Shiny status is
/// chosen by the caller and applied to the returned creature.
pub trait CreatureProvider: Send + Sync {
    fn fetch_by_id(&self, species_id: u32, shiny: bool) -> Result<Creature, ProviderError>;

    /// Fetch a uniformly random species introduced in `generation`.
    /// The result is never shiny; callers roll shininess themselves.
    fn fetch_random_in_generation(
        &self,
        generation: Generation,
        rng: &mut dyn RngCore,
    ) -> Result<Creature, ProviderError> {
        let species_id = rng.gen_range(generation.species_range());
        self.fetch_by_id(species_id, false)
    }

    /// Species this one can evolve into. Empty when it is fully evolved.
    fn possible_successors(&self, species_id: u32) -> Vec<u32> {
        evolution::successors(species_id).to_vec()
    }
}

impl<P: CreatureProvider + ?Sized> CreatureProvider for std::sync::Arc<P> {
    fn fetch_by_id(&self, species_id: u32, shiny: bool) -> Result<Creature, ProviderError> {
        (**self).fetch_by_id(species_id, shiny)
    }

    fn fetch_random_in_generation(
        &self,
        generation: Generation,
        rng: &mut dyn RngCore,
    ) -> Result<Creature, ProviderError> {
        (**self).fetch_random_in_generation(generation, rng)
    }

    fn possible_successors(&self, species_id: u32) -> Vec<u32> {
        (**self).possible_successors(species_id)
    }
}
