//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of careers to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Seed for the synthetic dex the careers draw creatures from
    pub dex_seed: u64,

    /// Actions per career before it is counted as timed out
    pub max_actions_per_run: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per career)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            dex_seed: 42,
            max_actions_per_run: 500,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch, handy in tests.
    pub fn quick(num_runs: u32, seed: u64) -> Self {
        Self {
            num_runs,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }
}
