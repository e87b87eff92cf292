use rusqlite::Connection;
use serde_json::json;

use scoutgrade::GradingConfig;
use scoutgrade::grading_pass::run_grading_pass;
use scoutgrade::record::{MetricMap, PlayerSeasonRecord};
use scoutgrade::roles::{RoleProfile, StoredRoleProfile};
use scoutgrade::store;
use scoutgrade::weights::RoleWeightTable;

fn metric_map(pairs: &[(&str, f64)]) -> MetricMap {
    let mut map = MetricMap::new();
    for (name, value) in pairs {
        map.insert(name.to_string(), json!(value));
    }
    map
}

fn seeded_store() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory sqlite");
    store::init_schema(&conn).expect("schema");

    let records = vec![
        PlayerSeasonRecord {
            id: "cb_modern".to_string(),
            minutes: 1300,
            positions: vec!["CB".to_string()],
            derived: Some(metric_map(&[
                ("passAccuracy", 88.0),
                ("interceptions_p90", 2.4),
            ])),
            role_profile: Some(StoredRoleProfile::Full(RoleProfile {
                primary_role: "CB".to_string(),
                secondary_role: None,
                role_confidence: 0.92,
            })),
            season_grade: None,
        },
        PlayerSeasonRecord {
            id: "cb_legacy".to_string(),
            minutes: 800,
            positions: vec!["CB".to_string()],
            derived: Some(metric_map(&[
                ("passAccuracy", 79.0),
                ("interceptions_p90", 1.6),
            ])),
            role_profile: Some(StoredRoleProfile::Legacy("CB".to_string())),
            season_grade: None,
        },
        PlayerSeasonRecord {
            id: "bench_player".to_string(),
            minutes: 20,
            positions: vec!["MIDFIELDER".to_string()],
            derived: Some(metric_map(&[("passAccuracy", 71.0)])),
            role_profile: None,
            season_grade: None,
        },
    ];
    for record in &records {
        store::upsert_player(&conn, record).expect("upsert");
    }
    conn
}

fn run_pass_against(conn: &mut Connection) {
    let records = store::load_players(conn).expect("load players");
    let (updates, summary) = run_grading_pass(
        &records,
        RoleWeightTable::standard(),
        &GradingConfig::default(),
    );
    store::apply_updates(conn, &updates, summary, "2026-05-30T12:00:00+00:00").expect("apply");
}

#[test]
fn load_round_trips_legacy_and_modern_profiles() {
    let conn = seeded_store();
    let records = store::load_players(&conn).expect("load players");
    assert_eq!(records.len(), 3);

    let legacy = records.iter().find(|r| r.id == "cb_legacy").unwrap();
    assert_eq!(
        legacy.role_profile,
        Some(StoredRoleProfile::Legacy("CB".to_string()))
    );
    let modern = records.iter().find(|r| r.id == "cb_modern").unwrap();
    let Some(StoredRoleProfile::Full(profile)) = &modern.role_profile else {
        panic!("modern profile should stay structured");
    };
    assert_eq!(profile.role_confidence, 0.92);
}

#[test]
fn pass_writes_grades_without_touching_upstream_fields() {
    let mut conn = seeded_store();
    run_pass_against(&mut conn);

    let records = store::load_players(&conn).expect("reload");
    let graded = records.iter().find(|r| r.id == "cb_modern").unwrap();
    let grade = graded.season_grade.as_ref().expect("grade written");
    assert!(grade.overall10.is_some());
    assert_eq!(grade.role, "CB");

    // Upstream columns are untouched by the pass.
    assert_eq!(graded.minutes, 1300);
    assert_eq!(graded.positions, vec!["CB".to_string()]);
    let derived = graded.derived.as_ref().unwrap();
    assert_eq!(derived.get("passAccuracy").unwrap().as_f64(), Some(88.0));

    // The ineligible player is loaded but never graded.
    let bench = records.iter().find(|r| r.id == "bench_player").unwrap();
    assert!(bench.season_grade.is_none());
}

#[test]
fn pass_normalizes_the_legacy_profile_on_write_back() {
    let mut conn = seeded_store();
    run_pass_against(&mut conn);

    let records = store::load_players(&conn).expect("reload");
    let legacy = records.iter().find(|r| r.id == "cb_legacy").unwrap();
    let Some(StoredRoleProfile::Full(profile)) = &legacy.role_profile else {
        panic!("legacy profile should be rewritten in the structured shape");
    };
    assert_eq!(profile.primary_role, "CB");
    assert_eq!(profile.role_confidence, 1.0);
}

#[test]
fn repeated_passes_are_idempotent_and_audited() {
    let mut conn = seeded_store();
    run_pass_against(&mut conn);
    let first: Vec<Option<String>> = grade_columns(&conn);
    run_pass_against(&mut conn);
    let second: Vec<Option<String>> = grade_columns(&conn);
    assert_eq!(first, second);

    let runs: i64 = conn
        .query_row("SELECT COUNT(*) FROM grading_runs", [], |row| row.get(0))
        .expect("count runs");
    assert_eq!(runs, 2);
}

fn grade_columns(conn: &Connection) -> Vec<Option<String>> {
    let mut stmt = conn
        .prepare("SELECT season_grade FROM players ORDER BY player_id ASC")
        .expect("prepare");
    let rows = stmt
        .query_map([], |row| row.get::<_, Option<String>>(0))
        .expect("query");
    rows.map(|r| r.expect("row")).collect()
}
