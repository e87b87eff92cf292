use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use scoutgrade::record::PlayerSeasonRecord;
use scoutgrade::store;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let input = positional_arg(&args)
        .ok_or_else(|| anyhow!("usage: seed_players [--db <path>] <players.json>"))?;
    let db_path = parse_db_path_arg(&args)
        .or_else(store::default_db_path)
        .context("unable to resolve sqlite path")?;

    let raw = fs::read_to_string(&input).with_context(|| format!("read {input}"))?;
    let records: Vec<PlayerSeasonRecord> =
        serde_json::from_str(&raw).context("parse player records json")?;

    let conn = store::open_db(&db_path)?;
    for record in &records {
        store::upsert_player(&conn, record)?;
    }

    println!("Seeded {} players", records.len());
    println!("DB: {}", db_path.display());
    Ok(())
}

fn positional_arg(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--db" {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        return Some(arg.clone());
    }
    None
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
