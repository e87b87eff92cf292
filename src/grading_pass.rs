use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::narrative::explain;
use crate::record::{MetricMap, PlayerGradeUpdate, PlayerSeasonRecord, SeasonGrade};
use crate::roles::{resolve_role_profile, Role, RoleProfile};
use crate::scoring::{confidence_from_minutes, grade_against_cohort};
use crate::weights::RoleWeightTable;
use crate::{GradingConfig, GRADING_VERSION};

/// Below this role confidence the detector's primary call is uncertain
/// enough to blend in a secondary-role grade.
pub const BLEND_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// A cohort needs at least this many members (the graded player included)
/// before percentiles inside it mean anything.
pub const MIN_COHORT_SIZE: usize = 2;

pub const NOT_ENOUGH_PEERS_NOTE: &str = "Not enough comparable players";

/// Counters for one full pass, for run bookkeeping and operator output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub total: usize,
    pub eligible: usize,
    pub graded: usize,
    pub null_grades: usize,
    pub blended: usize,
}

/// One full recompute over the player population.
///
/// Phase A resolves every eligible player's role profile and freezes peer
/// cohorts keyed by primary-role label. Phase B grades each eligible
/// player against those frozen cohorts; the fan-out is a pure parallel
/// map, since cohorts stay read-only for the whole pass. Ineligible
/// players produce no update at all.
pub fn run_grading_pass(
    records: &[PlayerSeasonRecord],
    table: &RoleWeightTable,
    config: &GradingConfig,
) -> (Vec<PlayerGradeUpdate>, PassSummary) {
    let eligible: Vec<(&PlayerSeasonRecord, RoleProfile, &MetricMap)> = records
        .iter()
        .filter_map(|record| {
            if record.minutes < config.min_minutes {
                debug!(player = %record.id, minutes = record.minutes, "skipped: below minutes floor");
                return None;
            }
            let Some(derived) = record.derived.as_ref() else {
                debug!(player = %record.id, "skipped: no derived metrics");
                return None;
            };
            let profile = resolve_role_profile(record.role_profile.as_ref());
            Some((record, profile, derived))
        })
        .collect();

    // Phase A: frozen per-role peer populations for this pass. The graded
    // player stays inside its own cohort.
    let mut cohorts: HashMap<&str, Vec<&MetricMap>> = HashMap::new();
    for (_, profile, derived) in &eligible {
        cohorts
            .entry(profile.primary_role.as_str())
            .or_default()
            .push(*derived);
    }
    info!(
        total = records.len(),
        eligible = eligible.len(),
        cohorts = cohorts.len(),
        "grading pass started"
    );

    // Phase B.
    let updates: Vec<PlayerGradeUpdate> = eligible
        .par_iter()
        .map(|(record, profile, derived)| grade_player(record, profile, derived, &cohorts, table))
        .collect();

    let summary = PassSummary {
        total: records.len(),
        eligible: eligible.len(),
        graded: updates
            .iter()
            .filter(|u| u.season_grade.overall10.is_some())
            .count(),
        null_grades: updates
            .iter()
            .filter(|u| u.season_grade.overall10.is_none())
            .count(),
        blended: updates.iter().filter(|u| u.season_grade.blended).count(),
    };
    info!(
        graded = summary.graded,
        null = summary.null_grades,
        blended = summary.blended,
        "grading pass finished"
    );
    (updates, summary)
}

/// Blend primary and secondary overall grades by role confidence. The
/// one-decimal value blends the already-rounded `overall10` inputs
/// independently of `overall100`, so the two can land one decimal step
/// apart in edge cases; that asymmetry is kept for output compatibility.
pub fn blend_overalls(
    primary100: i64,
    primary10: f64,
    secondary100: i64,
    secondary10: f64,
    role_confidence: f64,
) -> (i64, f64) {
    let rc = role_confidence;
    let overall100 = (primary100 as f64 * rc + secondary100 as f64 * (1.0 - rc)).round() as i64;
    let overall10 = ((primary10 * rc + secondary10 * (1.0 - rc)) * 10.0).round() / 10.0;
    (overall100, overall10)
}

fn grade_player(
    record: &PlayerSeasonRecord,
    profile: &RoleProfile,
    derived: &MetricMap,
    cohorts: &HashMap<&str, Vec<&MetricMap>>,
    table: &RoleWeightTable,
) -> PlayerGradeUpdate {
    let confidence = confidence_from_minutes(record.minutes);
    let primary_cohort = cohorts
        .get(profile.primary_role.as_str())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut grade = if primary_cohort.len() < MIN_COHORT_SIZE {
        debug!(player = %record.id, role = %profile.primary_role, "null grade: cohort too small");
        SeasonGrade {
            version: GRADING_VERSION,
            role: profile.primary_role.clone(),
            secondary_role: profile.secondary_role.clone(),
            role_confidence: profile.role_confidence,
            overall10: None,
            overall100: None,
            sub_grades: BTreeMap::new(),
            confidence,
            blended: false,
            explanation: None,
            note: Some(NOT_ENOUGH_PEERS_NOTE.to_string()),
        }
    } else {
        let weights = table.for_role(Role::from_label(&profile.primary_role));
        let primary = grade_against_cohort(weights, derived, primary_cohort);
        let mut grade = SeasonGrade {
            version: GRADING_VERSION,
            role: profile.primary_role.clone(),
            secondary_role: profile.secondary_role.clone(),
            role_confidence: profile.role_confidence,
            overall10: Some(primary.overall10),
            overall100: Some(primary.overall100),
            sub_grades: primary.sub_grades.clone(),
            confidence,
            blended: false,
            explanation: None,
            note: None,
        };

        if let Some(secondary_role) = profile.secondary_role.as_deref()
            && profile.role_confidence < BLEND_CONFIDENCE_THRESHOLD
            && let Some(secondary_cohort) = cohorts.get(secondary_role)
            && secondary_cohort.len() >= MIN_COHORT_SIZE
        {
            let secondary_weights = table.for_role(Role::from_label(secondary_role));
            let secondary = grade_against_cohort(secondary_weights, derived, secondary_cohort);
            let (overall100, overall10) = blend_overalls(
                primary.overall100,
                primary.overall10,
                secondary.overall100,
                secondary.overall10,
                profile.role_confidence,
            );
            // Sub-grades stay the primary role's even when the overall is
            // blended: category scores keep a single taxonomy.
            grade.overall100 = Some(overall100);
            grade.overall10 = Some(overall10);
            grade.blended = true;
        }
        grade
    };

    if grade.overall10.is_some() {
        grade.explanation = Some(explain(&grade));
    }

    PlayerGradeUpdate {
        id: record.id.clone(),
        role_profile: profile.clone(),
        primary_role: profile.primary_role.clone(),
        season_grade: grade,
    }
}

#[cfg(test)]
mod tests {
    use super::blend_overalls;

    #[test]
    fn full_confidence_blend_is_the_primary_grade() {
        assert_eq!(blend_overalls(81, 8.1, 64, 6.4, 1.0), (81, 8.1));
    }

    #[test]
    fn zero_confidence_blend_is_the_secondary_grade() {
        assert_eq!(blend_overalls(81, 8.1, 64, 6.4, 0.0), (64, 6.4));
    }

    #[test]
    fn blended_paths_agree_to_within_one_decimal_step() {
        // overall10 blends the rounded one-decimal inputs independently
        // of overall100; the two paths may disagree by one step but never
        // more.
        for rc in [0.1, 0.25, 0.4, 0.5, 0.55, 0.69] {
            let (overall100, overall10) = blend_overalls(81, 8.1, 64, 6.4, rc);
            assert!((overall10 - overall100 as f64 / 10.0).abs() < 0.1 + 1e-9);
        }
    }
}
