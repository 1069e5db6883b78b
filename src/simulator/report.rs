//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// How a simulated career ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CareerOutcome {
    Victory,
    GameOver,
    /// Hit the action cap before a terminal state
    TimedOut,
}

/// Final numbers for one career.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub outcome: CareerOutcome,
    pub badges: u32,
    pub final_round: u32,
    pub team_size: u32,
    pub stored: u32,
    pub team_power: u32,
    pub shinies: u32,
    pub potions_used: u32,
    pub actions: u32,
}

/// Aggregated results from multiple careers.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub game_overs: u32,
    pub timed_out: u32,

    pub victory_rate: f64,
    pub avg_badges: f64,
    pub avg_final_round: f64,
    pub avg_team_power: f64,
    pub avg_team_size: f64,
    pub avg_potions_used: f64,
    pub avg_actions: f64,
    pub total_shinies: u32,

    /// Careers by badge count at the end
    pub badge_distribution: BTreeMap<u32, u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean<F: Fn(&RunStats) -> u32>(runs: &[RunStats], field: F) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(|r| field(r) as f64).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: CareerOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;
        let victories = count(CareerOutcome::Victory);
        let game_overs = count(CareerOutcome::GameOver);
        let timed_out = count(CareerOutcome::TimedOut);

        let mut badge_distribution = BTreeMap::new();
        for run in &runs {
            *badge_distribution.entry(run.badges).or_insert(0) += 1;
        }

        Self {
            num_runs,
            victories,
            game_overs,
            timed_out,
            victory_rate: victories as f64 / num_runs.max(1) as f64,
            avg_badges: mean(&runs, |r| r.badges),
            avg_final_round: mean(&runs, |r| r.final_round),
            avg_team_power: mean(&runs, |r| r.team_power),
            avg_team_size: mean(&runs, |r| r.team_size),
            avg_potions_used: mean(&runs, |r| r.potions_used),
            avg_actions: mean(&runs, |r| r.actions),
            total_shinies: runs.iter().map(|r| r.shinies).sum(),
            badge_distribution,
            run_stats: runs,
        }
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Careers: {} total, {} champions, {} game over, {} timed out\n\n",
            self.num_runs, self.victories, self.game_overs, self.timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Victory Rate:        {:.1}%\n",
            self.victory_rate * 100.0
        ));
        report.push_str(&format!("  Avg Badges:          {:.2}\n", self.avg_badges));
        report.push_str(&format!("  Avg Final Round:     {:.2}\n", self.avg_final_round));
        report.push_str(&format!("  Avg Actions:         {:.1}\n", self.avg_actions));
        report.push_str(&format!("  Avg Potions Used:    {:.2}\n\n", self.avg_potions_used));

        report.push_str("── TEAM ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Team Power:      {:.2}\n", self.avg_team_power));
        report.push_str(&format!("  Avg Team Size:       {:.2}\n", self.avg_team_size));
        report.push_str(&format!("  Shinies Caught:      {}\n\n", self.total_shinies));

        report.push_str("── BADGES AT THE END ────────────────────────────────────────────\n");
        for badges in 0..=8 {
            let careers = self.badge_distribution.get(&badges).copied().unwrap_or(0);
            let pct = (careers as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {badges} badges: {pct:>5.1}% {bar}\n"));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
