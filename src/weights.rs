use anyhow::{Result, bail};
use once_cell::sync::Lazy;

use crate::roles::Role;

/// Signed metric weights for one scoring category. A negative weight
/// marks a lower-is-better metric (fouls, cards, possession losses): its
/// percentile is inverted before scoring, and its magnitude still sets
/// the metric's share of the category.
#[derive(Debug, Clone)]
pub struct CategoryWeights {
    pub name: &'static str,
    pub metrics: Vec<(&'static str, f64)>,
}

/// Scoring taxonomy for one role: an ordered list of categories plus the
/// per-category weights used for the overall aggregation. A scored
/// category missing from `category_weights` counts with weight 1.
#[derive(Debug, Clone)]
pub struct RoleWeights {
    pub categories: Vec<CategoryWeights>,
    pub category_weights: Vec<(&'static str, f64)>,
}

impl RoleWeights {
    pub fn category_weight(&self, category: &str) -> f64 {
        self.category_weights
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, weight)| *weight)
            .unwrap_or(1.0)
    }
}

/// The full role → weights table. Built once, validated at construction,
/// and passed by reference into scoring; never consulted as ambient
/// mutable state.
#[derive(Debug)]
pub struct RoleWeightTable {
    entries: Vec<(Role, RoleWeights)>,
}

impl RoleWeightTable {
    /// Weights for `role`, falling back to the GENERIC entry when the
    /// role has no table of its own.
    pub fn for_role(&self, role: Role) -> &RoleWeights {
        self.entries
            .iter()
            .find(|(entry_role, _)| *entry_role == role)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(entry_role, _)| *entry_role == Role::Generic)
            })
            .map(|(_, weights)| weights)
            .expect("role weight table always carries a GENERIC entry")
    }

    /// The standard table. Validation runs once on first use; a malformed
    /// definition is a programmer error and panics here rather than
    /// surfacing mid-pass.
    pub fn standard() -> &'static RoleWeightTable {
        &STANDARD
    }

    pub fn validate(&self) -> Result<()> {
        if !self
            .entries
            .iter()
            .any(|(role, _)| *role == Role::Generic)
        {
            bail!("role weight table is missing the GENERIC fallback entry");
        }
        for (role, weights) in &self.entries {
            if weights.categories.is_empty() {
                bail!("role {} has no scoring categories", role.label());
            }
            for category in &weights.categories {
                if category.metrics.is_empty() {
                    bail!(
                        "role {} category {} has no metrics",
                        role.label(),
                        category.name
                    );
                }
                for (metric, weight) in &category.metrics {
                    if !weight.is_finite() || *weight == 0.0 {
                        bail!(
                            "role {} category {} metric {metric} has invalid weight {weight}",
                            role.label(),
                            category.name
                        );
                    }
                }
            }
            for (category, weight) in &weights.category_weights {
                if !weight.is_finite() || *weight < 0.0 {
                    bail!(
                        "role {} category weight {category} is invalid: {weight}",
                        role.label()
                    );
                }
            }
        }
        Ok(())
    }
}

static STANDARD: Lazy<RoleWeightTable> = Lazy::new(|| {
    let table = standard_table();
    table
        .validate()
        .expect("standard role weight table is malformed");
    table
});

fn category(name: &'static str, metrics: &[(&'static str, f64)]) -> CategoryWeights {
    CategoryWeights {
        name,
        metrics: metrics.to_vec(),
    }
}

fn outfield_discipline() -> CategoryWeights {
    category(
        "discipline",
        &[
            ("fouls_p90", -2.0),
            ("yellowCards_p90", -1.5),
            ("redCards_p90", -3.0),
        ],
    )
}

fn standard_table() -> RoleWeightTable {
    let cb = RoleWeights {
        categories: vec![
            category(
                "buildup",
                &[
                    ("passAccuracy", 3.0),
                    ("progressivePasses_p90", 2.0),
                    ("longBalls_p90", 1.5),
                    ("possessionLost_p90", -1.0),
                ],
            ),
            category(
                "contribution",
                &[
                    ("goals_p90", 1.0),
                    ("assists_p90", 0.5),
                    ("aerialsWon_p90", 1.5),
                ],
            ),
            category(
                "defending",
                &[
                    ("interceptions_p90", 3.0),
                    ("duelWinPct", 3.0),
                    ("tackles_p90", 2.5),
                    ("clearances_p90", 2.0),
                    ("aerialWinPct", 2.0),
                    ("blocks_p90", 1.5),
                    ("dribbledPast_p90", -2.0),
                ],
            ),
            outfield_discipline(),
        ],
        category_weights: vec![
            ("defending", 4.0),
            ("buildup", 2.0),
            ("discipline", 1.5),
            ("contribution", 1.0),
        ],
    };

    let fullback = RoleWeights {
        categories: vec![
            category(
                "buildup",
                &[
                    ("passAccuracy", 2.5),
                    ("crosses_p90", 2.0),
                    ("progressivePasses_p90", 2.0),
                    ("possessionLost_p90", -1.0),
                ],
            ),
            category(
                "contribution",
                &[
                    ("assists_p90", 2.0),
                    ("keyPasses_p90", 2.0),
                    ("dribbles_p90", 1.5),
                    ("goals_p90", 1.0),
                ],
            ),
            category(
                "defending",
                &[
                    ("tackles_p90", 3.0),
                    ("interceptions_p90", 2.5),
                    ("duelWinPct", 2.0),
                    ("recoveries_p90", 1.5),
                    ("dribbledPast_p90", -2.0),
                ],
            ),
            outfield_discipline(),
        ],
        category_weights: vec![
            ("defending", 3.0),
            ("buildup", 2.5),
            ("contribution", 2.0),
            ("discipline", 1.0),
        ],
    };

    let midfielder = RoleWeights {
        categories: vec![
            category(
                "buildup",
                &[
                    ("passAccuracy", 3.0),
                    ("progressivePasses_p90", 2.5),
                    ("keyPasses_p90", 2.0),
                    ("longBalls_p90", 1.0),
                    ("possessionLost_p90", -1.5),
                ],
            ),
            category(
                "contribution",
                &[
                    ("goals_p90", 2.0),
                    ("assists_p90", 2.0),
                    ("chancesCreated_p90", 2.0),
                    ("shotsOnTarget_p90", 1.0),
                    ("dribbles_p90", 1.0),
                ],
            ),
            category(
                "defending",
                &[
                    ("tackles_p90", 2.0),
                    ("interceptions_p90", 2.0),
                    ("recoveries_p90", 2.0),
                    ("duelWinPct", 1.5),
                ],
            ),
            outfield_discipline(),
        ],
        category_weights: vec![
            ("buildup", 3.0),
            ("contribution", 3.0),
            ("defending", 2.0),
            ("discipline", 1.0),
        ],
    };

    let winger = RoleWeights {
        categories: vec![
            category(
                "buildup",
                &[
                    ("crosses_p90", 2.0),
                    ("passAccuracy", 1.5),
                    ("progressivePasses_p90", 1.5),
                    ("possessionLost_p90", -1.0),
                ],
            ),
            category(
                "contribution",
                &[
                    ("goals_p90", 3.0),
                    ("assists_p90", 3.0),
                    ("dribbles_p90", 2.5),
                    ("xg_p90", 2.0),
                    ("xa_p90", 2.0),
                    ("chancesCreated_p90", 2.0),
                    ("shotsOnTarget_p90", 1.5),
                ],
            ),
            category(
                "defending",
                &[("recoveries_p90", 1.0), ("tackles_p90", 1.0)],
            ),
            category(
                "discipline",
                &[
                    ("fouls_p90", -1.5),
                    ("yellowCards_p90", -1.0),
                    ("redCards_p90", -3.0),
                ],
            ),
        ],
        category_weights: vec![
            ("contribution", 4.0),
            ("buildup", 1.5),
            ("defending", 1.0),
            ("discipline", 1.0),
        ],
    };

    let attacker = RoleWeights {
        categories: vec![
            category(
                "buildup",
                &[
                    ("keyPasses_p90", 1.5),
                    ("passAccuracy", 1.0),
                    ("aerialWinPct", 1.0),
                ],
            ),
            category(
                "contribution",
                &[
                    ("goals_p90", 4.0),
                    ("xg_p90", 3.0),
                    ("shotsOnTarget_p90", 2.0),
                    ("assists_p90", 1.5),
                    ("xa_p90", 1.0),
                    ("dribbles_p90", 1.0),
                ],
            ),
            category(
                "defending",
                &[("recoveries_p90", 1.0), ("duelWinPct", 1.0)],
            ),
            category(
                "discipline",
                &[
                    ("fouls_p90", -1.5),
                    ("yellowCards_p90", -1.0),
                    ("redCards_p90", -3.0),
                    ("offsides_p90", -1.0),
                ],
            ),
        ],
        category_weights: vec![
            ("contribution", 5.0),
            ("buildup", 1.0),
            ("defending", 0.75),
            ("discipline", 1.0),
        ],
    };

    let gk = RoleWeights {
        categories: vec![
            category(
                "shotStopping",
                &[
                    ("savePct", 4.0),
                    ("goalsPrevented_p90", 3.0),
                    ("saves_p90", 2.0),
                    ("goalsConceded_p90", -2.5),
                ],
            ),
            category(
                "command",
                &[
                    ("claims_p90", 2.0),
                    ("crossesClaimedPct", 2.0),
                    ("sweeperActions_p90", 1.5),
                    ("punches_p90", 1.0),
                    ("errorsLeadingToShot_p90", -2.0),
                ],
            ),
            category(
                "distribution",
                &[
                    ("passAccuracy", 2.5),
                    ("longBallAccuracy", 2.0),
                    ("possessionLost_p90", -1.0),
                ],
            ),
        ],
        category_weights: vec![
            ("shotStopping", 4.0),
            ("command", 2.0),
            ("distribution", 1.5),
        ],
    };

    // Catch-all for unknown labels. Its categoryWeights deliberately list
    // only two categories; the other two pick up the implicit weight 1.
    let generic = RoleWeights {
        categories: vec![
            category(
                "buildup",
                &[
                    ("passAccuracy", 2.0),
                    ("progressivePasses_p90", 1.5),
                    ("keyPasses_p90", 1.5),
                    ("possessionLost_p90", -1.0),
                ],
            ),
            category(
                "contribution",
                &[
                    ("goals_p90", 2.0),
                    ("assists_p90", 2.0),
                    ("shotsOnTarget_p90", 1.0),
                    ("dribbles_p90", 1.0),
                ],
            ),
            category(
                "defending",
                &[
                    ("tackles_p90", 1.5),
                    ("interceptions_p90", 1.5),
                    ("recoveries_p90", 1.5),
                    ("duelWinPct", 1.5),
                ],
            ),
            outfield_discipline(),
        ],
        category_weights: vec![("contribution", 1.5), ("defending", 1.5)],
    };

    RoleWeightTable {
        entries: vec![
            (Role::Cb, cb),
            (Role::Fullback, fullback),
            (Role::Midfielder, midfielder),
            (Role::Winger, winger),
            (Role::Attacker, attacker),
            (Role::Gk, gk),
            (Role::Generic, generic),
        ],
    }
}
