//! Static per-role benchmark scales for single-match stat lines.
//!
//! Shared reference data for the match-grading feature that sits next to
//! the season engine: each metric carries the value at which one match's
//! output reads poor, average, good or elite for that role. Scales run in
//! the metric's own direction, so lower-is-better metrics descend.

use crate::roles::Role;

pub const TIER_LABELS: [&str; 4] = ["poor", "average", "good", "elite"];

/// Four-point benchmark scale for one metric.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkScale {
    pub metric: &'static str,
    pub steps: [f64; 4],
}

impl BenchmarkScale {
    /// Higher-is-better scales ascend; disciplinary scales descend.
    pub fn ascending(&self) -> bool {
        self.steps[0] <= self.steps[3]
    }

    /// Index into [`TIER_LABELS`] of the best tier `value` reaches; 0
    /// when it falls short of every step.
    pub fn tier(&self, value: f64) -> usize {
        let reached = |step: f64| {
            if self.ascending() {
                value >= step
            } else {
                value <= step
            }
        };
        self.steps
            .iter()
            .rposition(|step| reached(*step))
            .unwrap_or(0)
    }
}

const fn scale(metric: &'static str, steps: [f64; 4]) -> BenchmarkScale {
    BenchmarkScale { metric, steps }
}

const CB_BENCHMARKS: &[BenchmarkScale] = &[
    scale("tackles", [0.0, 1.0, 3.0, 5.0]),
    scale("interceptions", [0.0, 1.0, 3.0, 5.0]),
    scale("clearances", [1.0, 3.0, 6.0, 9.0]),
    scale("duelWinPct", [35.0, 50.0, 62.0, 75.0]),
    scale("passAccuracy", [70.0, 80.0, 88.0, 94.0]),
    scale("fouls", [4.0, 2.0, 1.0, 0.0]),
];

const FULLBACK_BENCHMARKS: &[BenchmarkScale] = &[
    scale("tackles", [0.0, 1.0, 3.0, 5.0]),
    scale("crosses", [0.0, 2.0, 4.0, 7.0]),
    scale("keyPasses", [0.0, 1.0, 2.0, 4.0]),
    scale("duelWinPct", [35.0, 48.0, 58.0, 70.0]),
    scale("passAccuracy", [65.0, 75.0, 84.0, 91.0]),
];

const MIDFIELDER_BENCHMARKS: &[BenchmarkScale] = &[
    scale("keyPasses", [0.0, 1.0, 2.0, 4.0]),
    scale("passAccuracy", [70.0, 80.0, 88.0, 94.0]),
    scale("tackles", [0.0, 1.0, 2.0, 4.0]),
    scale("recoveries", [2.0, 5.0, 8.0, 12.0]),
    scale("goalsPlusAssists", [0.0, 0.0, 1.0, 2.0]),
];

const WINGER_BENCHMARKS: &[BenchmarkScale] = &[
    scale("dribbles", [0.0, 1.0, 3.0, 5.0]),
    scale("keyPasses", [0.0, 1.0, 2.0, 4.0]),
    scale("shotsOnTarget", [0.0, 1.0, 2.0, 4.0]),
    scale("goalsPlusAssists", [0.0, 0.0, 1.0, 2.0]),
    scale("crosses", [0.0, 1.0, 3.0, 6.0]),
];

const ATTACKER_BENCHMARKS: &[BenchmarkScale] = &[
    scale("goals", [0.0, 0.0, 1.0, 2.0]),
    scale("shotsOnTarget", [0.0, 1.0, 3.0, 5.0]),
    scale("xg", [0.0, 0.3, 0.7, 1.5]),
    scale("duelWinPct", [30.0, 42.0, 52.0, 65.0]),
    scale("offsides", [3.0, 2.0, 1.0, 0.0]),
];

const GK_BENCHMARKS: &[BenchmarkScale] = &[
    scale("saves", [0.0, 2.0, 4.0, 7.0]),
    scale("savePct", [50.0, 65.0, 75.0, 85.0]),
    scale("goalsConceded", [4.0, 2.0, 1.0, 0.0]),
    scale("claims", [0.0, 1.0, 2.0, 4.0]),
    scale("passAccuracy", [50.0, 65.0, 80.0, 90.0]),
];

const GENERIC_BENCHMARKS: &[BenchmarkScale] = &[
    scale("passAccuracy", [65.0, 75.0, 84.0, 92.0]),
    scale("duelWinPct", [35.0, 48.0, 58.0, 70.0]),
    scale("keyPasses", [0.0, 1.0, 2.0, 4.0]),
    scale("tackles", [0.0, 1.0, 2.0, 4.0]),
];

/// Single-match benchmark scales for `role`.
pub fn match_benchmarks(role: Role) -> &'static [BenchmarkScale] {
    match role {
        Role::Cb => CB_BENCHMARKS,
        Role::Fullback => FULLBACK_BENCHMARKS,
        Role::Midfielder => MIDFIELDER_BENCHMARKS,
        Role::Winger => WINGER_BENCHMARKS,
        Role::Attacker => ATTACKER_BENCHMARKS,
        Role::Gk => GK_BENCHMARKS,
        Role::Generic => GENERIC_BENCHMARKS,
    }
}

#[cfg(test)]
mod tests {
    use super::{match_benchmarks, BenchmarkScale, TIER_LABELS};
    use crate::roles::Role;

    const ALL_ROLES: [Role; 7] = [
        Role::Cb,
        Role::Fullback,
        Role::Midfielder,
        Role::Winger,
        Role::Attacker,
        Role::Gk,
        Role::Generic,
    ];

    fn monotone(scale: &BenchmarkScale) -> bool {
        let steps = scale.steps;
        if scale.ascending() {
            steps.windows(2).all(|w| w[0] <= w[1])
        } else {
            steps.windows(2).all(|w| w[0] >= w[1])
        }
    }

    #[test]
    fn every_scale_is_monotone_in_its_direction() {
        for role in ALL_ROLES {
            for scale in match_benchmarks(role) {
                assert!(monotone(scale), "{} scale for {:?}", scale.metric, role);
            }
        }
    }

    #[test]
    fn tiers_follow_the_scale() {
        let saves = match_benchmarks(Role::Gk)
            .iter()
            .find(|s| s.metric == "saves")
            .unwrap();
        assert_eq!(TIER_LABELS[saves.tier(0.0)], "poor");
        assert_eq!(TIER_LABELS[saves.tier(3.0)], "average");
        assert_eq!(TIER_LABELS[saves.tier(5.0)], "good");
        assert_eq!(TIER_LABELS[saves.tier(9.0)], "elite");
    }

    #[test]
    fn descending_scales_reward_low_values() {
        let conceded = match_benchmarks(Role::Gk)
            .iter()
            .find(|s| s.metric == "goalsConceded")
            .unwrap();
        assert!(!conceded.ascending());
        assert_eq!(TIER_LABELS[conceded.tier(0.0)], "elite");
        assert_eq!(TIER_LABELS[conceded.tier(5.0)], "poor");
    }
}
