use std::collections::BTreeMap;

use crate::percentile::percentile_rank;
use crate::record::MetricMap;
use crate::weights::RoleWeights;

/// Metrics where a raw zero is rewarded outright instead of ranked: a
/// clean disciplinary record beats whatever the peer distribution says.
pub const ZERO_IS_GOOD_METRICS: &[&str] = &["yellowCards_p90", "redCards_p90", "fouls_p90"];

/// Minutes at which a season sample is treated as fully reliable
/// (ten full matches).
pub const FULL_MINUTES: f64 = 900.0;

const SCORE_FLOOR: f64 = 0.15;
const SCORE_CEIL: f64 = 0.95;
const ZERO_INCIDENT_PCT: f64 = 0.75;

fn finite_metric(metrics: &MetricMap, metric: &str) -> Option<f64> {
    metrics.get(metric)?.as_f64().filter(|v| v.is_finite())
}

/// Score one metric for one player against the peer cohort, on 15..=95,
/// or `None` when the metric cannot be compared (missing or non-numeric
/// on the player, or no peer holds a finite value for it). A `None` is an
/// absence, never a zero.
///
/// The peer population is rebuilt per metric: different metrics have
/// different peer coverage. A negative weight inverts the percentile
/// (lower is better); the clamp keeps tiny cohorts and outliers from
/// producing true-extreme scores.
pub fn score_metric(
    metric: &str,
    weight: f64,
    player: &MetricMap,
    peers: &[&MetricMap],
) -> Option<f64> {
    let value = finite_metric(player, metric)?;
    let mut population: Vec<f64> = peers
        .iter()
        .filter_map(|peer| finite_metric(peer, metric))
        .collect();
    if population.is_empty() {
        return None;
    }
    population.sort_by(f64::total_cmp);

    let pct = percentile_rank(value, &population);
    let mut adjusted = if weight < 0.0 { 1.0 - pct } else { pct };
    if value == 0.0 && ZERO_IS_GOOD_METRICS.contains(&metric) {
        adjusted = ZERO_INCIDENT_PCT;
    }
    Some(adjusted.clamp(SCORE_FLOOR, SCORE_CEIL) * 100.0)
}

/// Category sub-grades and overall aggregation for one player against one
/// frozen peer cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeComputation {
    pub overall100: i64,
    pub overall10: f64,
    pub sub_grades: BTreeMap<String, i64>,
}

/// Aggregate every scorable metric into per-category sub-grades (weighted
/// mean of absolute weights, rounded to an integer) and the
/// category-weighted overall. Unscorable metrics are skipped; a category
/// with no scorable metric is omitted entirely rather than graded 0. When
/// *no* category scores, the overall collapses to 0, which reads the same
/// as a genuinely terrible profile.
pub fn grade_against_cohort(
    weights: &RoleWeights,
    player: &MetricMap,
    peers: &[&MetricMap],
) -> GradeComputation {
    let mut sub_grades = BTreeMap::new();
    let mut overall_sum = 0.0;
    let mut overall_weight = 0.0;

    for category in &weights.categories {
        let mut score_sum = 0.0;
        let mut weight_sum = 0.0;
        for (metric, weight) in &category.metrics {
            let Some(score) = score_metric(metric, *weight, player, peers) else {
                continue;
            };
            score_sum += score * weight.abs();
            weight_sum += weight.abs();
        }
        if weight_sum <= 0.0 {
            continue;
        }
        let sub_grade = (score_sum / weight_sum).round() as i64;
        let category_weight = weights.category_weight(category.name);
        overall_sum += sub_grade as f64 * category_weight;
        overall_weight += category_weight;
        sub_grades.insert(category.name.to_string(), sub_grade);
    }

    let overall_raw = if overall_weight > 0.0 {
        overall_sum / overall_weight
    } else {
        0.0
    };
    let overall100 = overall_raw.round() as i64;
    GradeComputation {
        overall100,
        overall10: overall100 as f64 / 10.0,
        sub_grades,
    }
}

/// Linear reliability ramp over season minutes, capped at
/// [`FULL_MINUTES`].
pub fn confidence_from_minutes(minutes: u32) -> f64 {
    (minutes as f64 / FULL_MINUTES).clamp(0.0, 1.0)
}
