//! Runtime configuration.
//!
//! Defaults suit local play against the public PokeAPI; each field can be
//! overridden from the environment.

use std::env;

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Configuration shared by the console and web transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL for species lookups (`{api_url}/{id}`)
    pub api_url: String,

    /// Upper bound on a single provider call, in seconds
    pub provider_timeout_secs: u64,

    /// Player identifier used by the console transport
    pub player_id: u64,

    /// Port for the WebSocket transport
    pub port: u16,

    /// RNG seed for reproducible console runs (None = entropy)
    pub seed: Option<u64>,

    /// Use the synthetic in-memory dex instead of the network
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            provider_timeout_secs: 5,
            player_id: 1,
            port: 3000,
            seed: None,
            offline: false,
        }
    }
}

impl Config {
    /// Defaults overridden by `POKEAPI_URL`, `PROVIDER_TIMEOUT_SECS`,
    /// `ROULETTE_PLAYER`, `ROULETTE_PORT`, `ROULETTE_SEED` and `ROULETTE_OFFLINE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("POKEAPI_URL").filter(|s| !s.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(secs) = parse_var(&lookup, "PROVIDER_TIMEOUT_SECS") {
            config.provider_timeout_secs = secs;
        }
        if let Some(player) = parse_var(&lookup, "ROULETTE_PLAYER") {
            config.player_id = player;
        }
        if let Some(port) = parse_var(&lookup, "ROULETTE_PORT") {
            config.port = port;
        }
        if let Some(seed) = parse_var(&lookup, "ROULETTE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(offline) = parse_var(&lookup, "ROULETTE_OFFLINE") {
            config.offline = offline;
        }
        config
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable config value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.provider_timeout_secs, 5);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("POKEAPI_URL", "http://localhost:8000/pokemon"),
            ("PROVIDER_TIMEOUT_SECS", "2"),
            ("ROULETTE_PLAYER", "77"),
            ("ROULETTE_PORT", "8080"),
            ("ROULETTE_SEED", "42"),
            ("ROULETTE_OFFLINE", "true"),
        ]));
        assert_eq!(config.api_url, "http://localhost:8000/pokemon");
        assert_eq!(config.provider_timeout_secs, 2);
        assert_eq!(config.player_id, 77);
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed, Some(42));
        assert!(config.offline);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("ROULETTE_PORT", "not-a-port"),
            ("POKEAPI_URL", "   "),
        ]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
