//! Roulette table tests: exact weights and chi-square goodness of fit.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use roulette::core::weighted::WeightedTable;
use roulette::engine::{
    AdventureEvent, GENDER_TABLE, GENERATION_TABLE, MAIN_ADVENTURE_TABLE, START_ADVENTURE_TABLE,
};

const DRAWS: usize = 20_000;

fn create_test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Chi-square statistic of `draws` spins against the table's weights.
fn chi_square<T: Copy + PartialEq + std::fmt::Debug + 'static>(
    table: &WeightedTable<T>,
    seed: u64,
) -> f64 {
    let entries = table.entries();
    let mut counts = vec![0usize; entries.len()];
    let mut rng = create_test_rng(seed);
    for _ in 0..DRAWS {
        let drawn = table.pick(&mut rng);
        let index = entries
            .iter()
            .position(|e| e.outcome == drawn)
            .unwrap_or_else(|| panic!("{drawn:?} is not in the table"));
        counts[index] += 1;
    }

    (0..entries.len())
        .map(|i| {
            let expected = table.probability(i) * DRAWS as f64;
            let diff = counts[i] as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

// =========================================================================
// Goodness of fit (critical values at p = 0.001)
// =========================================================================

#[test]
fn test_generation_table_fits_uniform() {
    let stat = chi_square(&GENERATION_TABLE, 1);
    assert!(stat < 24.32, "chi-square {stat:.2} with 7 df");
}

#[test]
fn test_gender_table_fits_uniform() {
    let stat = chi_square(&GENDER_TABLE, 2);
    assert!(stat < 10.83, "chi-square {stat:.2} with 1 df");
}

#[test]
fn test_start_adventure_table_fits_weights() {
    let stat = chi_square(&START_ADVENTURE_TABLE, 3);
    assert!(stat < 16.27, "chi-square {stat:.2} with 3 df");
}

#[test]
fn test_main_adventure_table_fits_weights() {
    let stat = chi_square(&MAIN_ADVENTURE_TABLE, 4);
    assert!(stat < 39.25, "chi-square {stat:.2} with 16 df");
}

// =========================================================================
// Exact weights
// =========================================================================

#[test]
fn test_start_adventure_weights() {
    let weights: Vec<(AdventureEvent, u32)> = START_ADVENTURE_TABLE
        .entries()
        .iter()
        .map(|e| (e.outcome, e.weight))
        .collect();
    assert_eq!(
        weights,
        vec![
            (AdventureEvent::CatchPokemon, 2),
            (AdventureEvent::BattleTrainer, 2),
            (AdventureEvent::BuyPotions, 2),
            (AdventureEvent::Nothing, 1),
        ]
    );
}

#[test]
fn test_main_adventure_catch_probability() {
    let index = MAIN_ADVENTURE_TABLE
        .entries()
        .iter()
        .position(|e| e.outcome == AdventureEvent::CatchPokemon)
        .unwrap();
    assert!((MAIN_ADVENTURE_TABLE.probability(index) - 3.0 / 19.0).abs() < 1e-12);
    assert_eq!(MAIN_ADVENTURE_TABLE.probability(99), 0.0);
}

#[test]
fn test_every_roll_lands_inside_the_table() {
    // Walking every roll must hit entries in order without the fallback
    for table in [&START_ADVENTURE_TABLE, &MAIN_ADVENTURE_TABLE] {
        let mut seen = Vec::new();
        for roll in 0..table.total_weight() {
            let outcome = table.pick_at(roll);
            if seen.last() != Some(&outcome) {
                seen.push(outcome);
            }
        }
        let expected: Vec<_> = table.entries().iter().map(|e| e.outcome).collect();
        assert_eq!(seen, expected);
    }
}
