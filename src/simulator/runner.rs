//! Career runner: drives sessions through the real state machine.

use super::config::SimConfig;
use super::report::{CareerOutcome, RunStats, SimReport};
use crate::core::battle::team_power;
use crate::creatures::{CreatureProvider, MemoryProvider};
use crate::engine::{advance, Action};
use crate::session::{GameState, PlayerId, Session};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let provider = MemoryProvider::synthetic(config.dex_seed);
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_career(
            run_idx as PlayerId,
            &provider,
            config.max_actions_per_run,
            &mut rng,
        );

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?}, Badges {}, Round {}, Team {}, Power {}, Actions {}",
                run_idx + 1,
                config.num_runs,
                stats.outcome,
                stats.badges,
                stats.final_round,
                stats.team_size,
                stats.team_power,
                stats.actions
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Play one career, always pressing the offered control.
pub fn simulate_career<P, R>(
    player_id: PlayerId,
    provider: &P,
    max_actions: u32,
    rng: &mut R,
) -> RunStats
where
    P: CreatureProvider + ?Sized,
    R: Rng,
{
    let mut session = Session::new(player_id);
    let mut actions = 0;
    let mut potions_used = 0;

    while !session.state.is_terminal() && actions < max_actions {
        let action = Action::expected_for(session.state).unwrap_or(Action::Spin);
        let potions_before = session.potions();
        let was_battle = session.state == GameState::GymBattle;

        if let Err(error) = advance(&mut session, action, provider, rng) {
            tracing::warn!(player_id, %error, "simulated action rejected");
            break;
        }
        actions += 1;
        if was_battle && session.potions() < potions_before {
            potions_used += 1;
        }
    }

    let outcome = match session.state {
        GameState::Victory => CareerOutcome::Victory,
        GameState::GameOver => CareerOutcome::GameOver,
        _ => CareerOutcome::TimedOut,
    };

    RunStats {
        outcome,
        badges: session.badges,
        final_round: session.round,
        team_size: session.team.len() as u32,
        stored: session.storage.len() as u32,
        team_power: team_power(&session.team),
        shinies: session
            .team
            .iter()
            .chain(session.storage.iter())
            .filter(|c| c.shiny)
            .count() as u32,
        potions_used,
        actions,
    }
}
