//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::runner::RunStats;
use crate::combat::CombatResult;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub fled: u32,
    pub timeouts: u32,

    // Outcome rates (0.0 - 1.0)
    pub win_rate: f64,
    pub defeat_rate: f64,
    pub flee_rate: f64,
    pub timeout_rate: f64,

    // Aggregated stats
    pub avg_rounds: f64,
    pub avg_enemies: f64,
    pub avg_damage_taken: f64,
    pub avg_xp_earned: f64,
    pub avg_loot_drops: f64,
    pub avg_final_stamina: f64,

    /// Rounds fought -> number of runs
    pub round_distribution: BTreeMap<u32, u32>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let count = |result: CombatResult| runs.iter().filter(|r| r.result == result).count() as u32;
        let victories = count(CombatResult::Victory);
        let defeats = count(CombatResult::Defeat);
        let fled = count(CombatResult::Fled);
        let timeouts = runs.iter().filter(|r| r.timed_out).count() as u32;

        let divisor = num_runs.max(1) as f64;
        let average = |f: fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / divisor;

        let mut round_distribution = BTreeMap::new();
        for run in &runs {
            *round_distribution.entry(run.rounds).or_insert(0) += 1;
        }

        Self {
            num_runs,
            victories,
            defeats,
            fled,
            timeouts,
            win_rate: victories as f64 / divisor,
            defeat_rate: defeats as f64 / divisor,
            flee_rate: fled as f64 / divisor,
            timeout_rate: timeouts as f64 / divisor,
            avg_rounds: average(|r| r.rounds as f64),
            avg_enemies: average(|r| r.enemies as f64),
            avg_damage_taken: average(|r| r.damage_taken as f64),
            avg_xp_earned: average(|r| r.xp_earned as f64),
            avg_loot_drops: average(|r| r.loot_drops as f64),
            avg_final_stamina: average(|r| r.final_stamina),
            round_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Runs: {} total\n\n", self.num_runs));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Victory:   {:>5} ({:>5.1}%)\n",
            self.victories,
            self.win_rate * 100.0
        ));
        report.push_str(&format!(
            "  Defeat:    {:>5} ({:>5.1}%)\n",
            self.defeats,
            self.defeat_rate * 100.0
        ));
        report.push_str(&format!(
            "  Fled:      {:>5} ({:>5.1}%)\n",
            self.fled,
            self.flee_rate * 100.0
        ));
        report.push_str(&format!(
            "  Timed out: {:>5} ({:>5.1}%)\n\n",
            self.timeouts,
            self.timeout_rate * 100.0
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Rounds:          {:.1}\n", self.avg_rounds));
        report.push_str(&format!("  Avg Enemies:         {:.1}\n", self.avg_enemies));
        report.push_str(&format!("  Avg Damage Taken:    {:.1}\n", self.avg_damage_taken));
        report.push_str(&format!("  Avg Final Stamina:   {:.2}\n\n", self.avg_final_stamina));

        report.push_str("── REWARDS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg XP Earned:       {:.0}\n", self.avg_xp_earned));
        report.push_str(&format!("  Avg Loot Drops:      {:.2}\n\n", self.avg_loot_drops));

        report.push_str("── FIGHT LENGTH ─────────────────────────────────────────────────\n");
        for (rounds, runs) in &self.round_distribution {
            let pct = (*runs as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:>3} rounds: {:>5.1}% {}\n", rounds, pct, bar));
        }

        report
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
