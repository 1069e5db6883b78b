//! Gym battle resolution.
//!
//! A gym battle is a single weighted coin flip. The player's side of the
//! wheel has `1 + team_power` wedges, the gym leader's side `round + 1`.
//! Each attempt (including a potion retry) is an independent trial.

use crate::creatures::Creature;
use rand::Rng;

/// Sum of power tiers across the active team.
pub fn team_power(team: &[Creature]) -> u32 {
    team.iter().map(|c| c.power as u32).sum()
}

/// Win probability for a given team power and 0-based round.
///
/// Non-decreasing in `team_power`, non-increasing in `round`, and exactly
/// 0.5 for an empty team in round 0.
pub fn win_probability(team_power: u32, round: u32) -> f64 {
    let yes_wedges = 1.0 + team_power as f64;
    let no_wedges = round as f64 + 1.0;
    yes_wedges / (yes_wedges + no_wedges)
}

/// Decide a battle from an already drawn value in `[0, 1)`.
pub fn is_victory(probability: f64, draw: f64) -> bool {
    draw < probability
}

/// Outcome of one battle attempt, kept for narrative and logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleRoll {
    pub probability: f64,
    pub draw: f64,
    pub won: bool,
}

/// Run one independent trial for a team at the given round.
pub fn resolve_battle<R: Rng + ?Sized>(team: &[Creature], round: u32, rng: &mut R) -> BattleRoll {
    let probability = win_probability(team_power(team), round);
    let draw: f64 = rng.gen();
    let won = is_victory(probability, draw);
    tracing::debug!(probability, draw, won, round, "gym battle roll");
    BattleRoll {
        probability,
        draw,
        won,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn mon(power: u8) -> Creature {
        Creature {
            species_id: 1,
            name: "Testmon".to_string(),
            power,
            shiny: false,
            base_stat_total: 300,
        }
    }

    #[test]
    fn test_even_odds_at_start() {
        assert_eq!(win_probability(0, 0), 0.5);
    }

    #[test]
    fn test_power_one_round_zero() {
        // (1 + 1) / (1 + 1 + 0 + 1) = 2/3
        assert!((win_probability(1, 0) - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_monotonic_in_power_and_round() {
        for round in 0..12 {
            for power in 0..40 {
                assert!(win_probability(power + 1, round) >= win_probability(power, round));
                assert!(win_probability(power, round + 1) <= win_probability(power, round));
            }
        }
    }

    #[test]
    fn test_is_victory_threshold() {
        assert!(is_victory(0.5, 0.49));
        assert!(!is_victory(0.5, 0.51));
        assert!(!is_victory(0.5, 0.5));
    }

    #[test]
    fn test_team_power_sums_tiers() {
        let team = vec![mon(1), mon(3), mon(5)];
        assert_eq!(team_power(&team), 9);
        assert_eq!(team_power(&[]), 0);
    }

    #[test]
    fn test_resolve_battle_zero_draw_wins() {
        let mut rng = StepRng::new(0, 0);
        let roll = resolve_battle(&[mon(1)], 7, &mut rng);
        assert!(roll.won);
        assert_eq!(roll.draw, 0.0);
    }

    #[test]
    fn test_resolve_battle_high_draw_loses() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let roll = resolve_battle(&vec![mon(5); 6], 0, &mut rng);
        assert!(!roll.won);
    }
}
