//! In-memory creature provider for offline play, simulation and tests.

use super::evolution;
use super::generation::Generation;
use super::provider::{CreatureProvider, ProviderError};
use super::types::Creature;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
struct SpeciesEntry {
    name: String,
    base_stat_total: u32,
}

/// A fixed species table held in memory.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    species: HashMap<u32, SpeciesEntry>,
    successor_overrides: HashMap<u32, Vec<u32>>,
    offline: AtomicBool,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S, u32)>,
        S: Into<String>,
    {
        let mut provider = Self::new();
        for (id, name, bst) in entries {
            provider.insert(id, name, bst);
        }
        provider
    }

    /// A full 905-species dex with stable pseudo-random base-stat totals.
    ///
    /// Starters keep their real names so narratives read naturally.
    pub fn synthetic(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut provider = Self::new();
        for generation in Generation::all() {
            for id in generation.species_range() {
                let bst = rng.gen_range(180..=720);
                provider.insert(id, format!("Mon #{id:03}"), bst);
            }
            for starter in generation.starters() {
                provider.insert(starter.species_id, starter.name, 310);
            }
        }
        provider
    }

    pub fn insert(&mut self, species_id: u32, name: impl Into<String>, base_stat_total: u32) {
        self.species.insert(
            species_id,
            SpeciesEntry {
                name: name.into(),
                base_stat_total,
            },
        );
    }

    /// Replace the registered successors for one species.
    pub fn set_successors(&mut self, species_id: u32, successors: Vec<u32>) {
        self.successor_overrides.insert(species_id, successors);
    }

    /// Simulate an outage: every lookup fails until turned back on.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl CreatureProvider for MemoryProvider {
    fn fetch_by_id(&self, species_id: u32, shiny: bool) -> Result<Creature, ProviderError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable(species_id));
        }
        self.species
            .get(&species_id)
            .map(|e| Creature::from_stats(species_id, e.name.clone(), e.base_stat_total, shiny))
            .ok_or(ProviderError::Unavailable(species_id))
    }

    fn possible_successors(&self, species_id: u32) -> Vec<u32> {
        match self.successor_overrides.get(&species_id) {
            Some(list) => list.clone(),
            None => evolution::successors(species_id).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_known_species() {
        let provider = MemoryProvider::from_entries([(25, "Pikachu", 320)]);
        let mon = provider.fetch_by_id(25, true).unwrap();
        assert_eq!(mon.name, "Pikachu");
        assert_eq!(mon.power, 2);
        assert!(mon.shiny);
    }

    #[test]
    fn test_unknown_species_is_unavailable() {
        let provider = MemoryProvider::new();
        assert_eq!(provider.fetch_by_id(1, false), Err(ProviderError::Unavailable(1)));
    }

    #[test]
    fn test_offline_fails_everything() {
        let provider = MemoryProvider::from_entries([(1, "Bulbasaur", 318)]);
        provider.set_offline(true);
        assert!(provider.fetch_by_id(1, false).is_err());
        provider.set_offline(false);
        assert!(provider.fetch_by_id(1, false).is_ok());
    }

    #[test]
    fn test_synthetic_covers_dex() {
        let provider = MemoryProvider::synthetic(1);
        assert_eq!(provider.len(), 905);
        assert_eq!(provider.fetch_by_id(816, false).unwrap().name, "Sobble");
    }

    #[test]
    fn test_synthetic_is_stable_per_seed() {
        let a = MemoryProvider::synthetic(9).fetch_by_id(100, false).unwrap();
        let b = MemoryProvider::synthetic(9).fetch_by_id(100, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_in_generation_stays_in_range() {
        let provider = MemoryProvider::synthetic(3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let mon = provider
                .fetch_random_in_generation(Generation::or_first(4), &mut rng)
                .unwrap();
            assert!((387..=493).contains(&mon.species_id));
            assert!(!mon.shiny);
        }
    }

    #[test]
    fn test_successor_override() {
        let mut provider = MemoryProvider::new();
        assert_eq!(provider.possible_successors(1), vec![2]);
        provider.set_successors(1, Vec::new());
        assert!(provider.possible_successors(1).is_empty());
    }
}
