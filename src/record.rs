use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::roles::{RoleProfile, StoredRoleProfile};

/// Derived per-90 rates, percentages and ratios keyed by metric name.
/// Values stay raw JSON: a stray non-numeric entry is skipped by the
/// scorer instead of failing the whole record.
pub type MetricMap = Map<String, Value>;

/// One player-season row as held by the season store. The engine owns
/// only `season_grade` (and the normalized `role_profile` it writes
/// back); everything else is produced upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeasonRecord {
    pub id: String,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default)]
    pub derived: Option<MetricMap>,
    #[serde(default)]
    pub role_profile: Option<StoredRoleProfile>,
    #[serde(default)]
    pub season_grade: Option<SeasonGrade>,
}

impl PlayerSeasonRecord {
    /// Eligible for grading: enough minutes and a derived-metrics map.
    pub fn eligible(&self, min_minutes: u32) -> bool {
        self.minutes >= min_minutes && self.derived.is_some()
    }
}

/// Finished grade for one player-season. Serialized sub-grades use a
/// `BTreeMap` so repeated passes over unchanged input emit byte-identical
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonGrade {
    pub version: u32,
    pub role: String,
    #[serde(default)]
    pub secondary_role: Option<String>,
    pub role_confidence: f64,
    pub overall10: Option<f64>,
    pub overall100: Option<i64>,
    #[serde(default)]
    pub sub_grades: BTreeMap<String, i64>,
    pub confidence: f64,
    #[serde(default)]
    pub blended: bool,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Result of one pass for one player. Only these fields are written back
/// to the store; every other column is left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGradeUpdate {
    pub id: String,
    pub role_profile: RoleProfile,
    pub primary_role: String,
    pub season_grade: SeasonGrade,
}
