use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use scoutgrade::GradingConfig;
use scoutgrade::grading_pass::run_grading_pass;
use scoutgrade::store;
use scoutgrade::weights::RoleWeightTable;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let db_path = parse_db_path_arg(&args)
        .or_else(store::default_db_path)
        .context("unable to resolve sqlite path")?;
    let config = GradingConfig::from_env();

    let mut conn = store::open_db(&db_path)?;
    let records = store::load_players(&conn)?;

    let started_at = Utc::now().to_rfc3339();
    let (updates, summary) = run_grading_pass(&records, RoleWeightTable::standard(), &config);
    store::apply_updates(&mut conn, &updates, summary, &started_at)?;

    println!("Grading pass complete");
    println!("DB: {}", db_path.display());
    println!(
        "Players: {} total, {} eligible (minutes floor {})",
        summary.total, summary.eligible, config.min_minutes
    );
    println!(
        "Graded: {} ({} blended, {} without enough peers)",
        summary.graded, summary.blended, summary.null_grades
    );
    Ok(())
}

fn parse_db_path_arg(args: &[String]) -> Option<PathBuf> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--db=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--db" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
