//! Creature provider backed by the public PokeAPI.
//!
//! Species are fetched with blocking `ureq` calls bounded by the agent
//! timeout and cached by species id for the life of the process.

use super::provider::{CreatureProvider, ProviderError};
use super::types::{display_name, Creature};
use crate::config::Config;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

#[derive(Deserialize)]
struct ApiPokemon {
    id: u32,
    name: String,
    stats: Vec<ApiStat>,
}

#[derive(Deserialize)]
struct ApiStat {
    base_stat: u32,
}

impl ApiPokemon {
    fn into_creature(self, shiny: bool) -> Creature {
        let bst = self.stats.iter().map(|s| s.base_stat).sum();
        Creature::from_stats(self.id, display_name(&self.name), bst, shiny)
    }
}

/// Parse a `/pokemon/{id}` response body.
pub fn parse_pokemon(json: &str, shiny: bool) -> Result<Creature, ProviderError> {
    let api: ApiPokemon =
        serde_json::from_str(json).map_err(|e| ProviderError::Decode(e.to_string()))?;
    Ok(api.into_creature(shiny))
}

pub struct PokeApiProvider {
    agent: ureq::Agent,
    base_url: String,
    cache: Mutex<HashMap<u32, Creature>>,
}

impl PokeApiProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("roulette/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.provider_timeout_secs),
        )
    }

    fn cached(&self, species_id: u32) -> Option<Creature> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&species_id)
            .cloned()
    }

    fn download(&self, species_id: u32) -> Result<Creature, ProviderError> {
        let url = format!("{}/{}", self.base_url, species_id);
        let response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(404, _) => ProviderError::Unavailable(species_id),
            other => ProviderError::Http(other.to_string()),
        })?;
        let api: ApiPokemon = response
            .into_json()
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(api.into_creature(false))
    }
}

impl CreatureProvider for PokeApiProvider {
    fn fetch_by_id(&self, species_id: u32, shiny: bool) -> Result<Creature, ProviderError> {
        if let Some(hit) = self.cached(species_id) {
            return Ok(hit.with_shiny(shiny));
        }

        let creature = self.download(species_id).inspect_err(|error| {
            tracing::warn!(species_id, %error, "PokeAPI lookup failed");
        })?;
        tracing::debug!(species_id, name = %creature.name, "PokeAPI species cached");
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(species_id, creature.clone());
        Ok(creature.with_shiny(shiny))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIKACHU: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "stats": [
            {"base_stat": 35, "stat": {"name": "hp"}},
            {"base_stat": 55, "stat": {"name": "attack"}},
            {"base_stat": 40, "stat": {"name": "defense"}},
            {"base_stat": 50, "stat": {"name": "special-attack"}},
            {"base_stat": 50, "stat": {"name": "special-defense"}},
            {"base_stat": 90, "stat": {"name": "speed"}}
        ],
        "height": 4
    }"#;

    #[test]
    fn test_parse_pokemon_sums_stats() {
        let mon = parse_pokemon(PIKACHU, false).unwrap();
        assert_eq!(mon.species_id, 25);
        assert_eq!(mon.name, "Pikachu");
        assert_eq!(mon.base_stat_total, 320);
        assert_eq!(mon.power, 2);
        assert!(!mon.shiny);
    }

    #[test]
    fn test_parse_pokemon_applies_shiny() {
        assert!(parse_pokemon(PIKACHU, true).unwrap().shiny);
    }

    #[test]
    fn test_parse_pokemon_rejects_garbage() {
        assert!(matches!(
            parse_pokemon("{\"oops\": true}", false),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn test_cache_hit_skips_network() {
        // Unroutable base URL: any real request would fail.
        let provider = PokeApiProvider::new("http://127.0.0.1:9/api", Duration::from_millis(50));
        provider
            .cache
            .lock()
            .unwrap()
            .insert(25, parse_pokemon(PIKACHU, false).unwrap());
        let mon = provider.fetch_by_id(25, true).unwrap();
        assert_eq!(mon.name, "Pikachu");
        assert!(mon.shiny);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let provider = PokeApiProvider::new("https://example.test/api/", Duration::from_secs(1));
        assert_eq!(provider.base_url, "https://example.test/api");
    }
}
