use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use scoutgrade::GradingConfig;
use scoutgrade::grading_pass::run_grading_pass;
use scoutgrade::percentile::percentile_rank;
use scoutgrade::record::{MetricMap, PlayerSeasonRecord};
use scoutgrade::roles::{RoleProfile, StoredRoleProfile};
use scoutgrade::weights::RoleWeightTable;

const ROLES: &[&str] = &["CB", "FULLBACK", "MIDFIELDER", "WINGER", "ATTACKER", "GK"];

fn synthetic_population(count: usize) -> Vec<PlayerSeasonRecord> {
    let mut rng = StdRng::seed_from_u64(2026);
    (0..count)
        .map(|idx| {
            let role = ROLES[idx % ROLES.len()];
            let mut derived = MetricMap::new();
            for metric in [
                "passAccuracy",
                "progressivePasses_p90",
                "keyPasses_p90",
                "goals_p90",
                "assists_p90",
                "shotsOnTarget_p90",
                "dribbles_p90",
                "tackles_p90",
                "interceptions_p90",
                "recoveries_p90",
                "duelWinPct",
                "fouls_p90",
                "yellowCards_p90",
                "savePct",
                "saves_p90",
                "claims_p90",
            ] {
                derived.insert(metric.to_string(), json!(rng.gen_range(0.0..10.0)));
            }
            let secondary = ROLES[(idx + 1) % ROLES.len()];
            PlayerSeasonRecord {
                id: format!("player-{idx}"),
                minutes: rng.gen_range(0..3000),
                positions: vec![role.to_string()],
                derived: Some(derived),
                role_profile: Some(StoredRoleProfile::Full(RoleProfile {
                    primary_role: role.to_string(),
                    secondary_role: Some(secondary.to_string()),
                    role_confidence: rng.gen_range(0.3..1.0),
                })),
                season_grade: None,
            }
        })
        .collect()
}

fn bench_percentile_rank(c: &mut Criterion) {
    let population: Vec<f64> = (0..500).map(|i| i as f64 * 0.37).collect();
    c.bench_function("percentile_rank_500", |b| {
        b.iter(|| {
            let rank = percentile_rank(black_box(92.4), black_box(&population));
            black_box(rank);
        })
    });
}

fn bench_grading_pass(c: &mut Criterion) {
    let records = synthetic_population(400);
    let table = RoleWeightTable::standard();
    let config = GradingConfig::default();

    c.bench_function("grading_pass_400_players", |b| {
        b.iter(|| {
            let (updates, summary) =
                run_grading_pass(black_box(&records), table, black_box(&config));
            black_box((updates.len(), summary.graded));
        })
    });
}

criterion_group!(perf, bench_percentile_rank, bench_grading_pass);
criterion_main!(perf);
