use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};
use tracing::info;

use crate::grading_pass::PassSummary;
use crate::record::{PlayerGradeUpdate, PlayerSeasonRecord};
use crate::GRADING_VERSION;

const STORE_DIR: &str = "scoutgrade";
const STORE_FILE: &str = "seasons.sqlite";

/// Default store location: `SCOUTGRADE_DB`, else the platform cache dir.
pub fn default_db_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SCOUTGRADE_DB") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(STORE_DIR).join(STORE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(STORE_DIR)
            .join(STORE_FILE),
    )
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS players (
            player_id TEXT PRIMARY KEY,
            minutes INTEGER NOT NULL,
            positions TEXT NOT NULL,
            derived TEXT NULL,
            role_profile TEXT NULL,
            primary_role TEXT NULL,
            season_grade TEXT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_players_primary_role ON players(primary_role);

        CREATE TABLE IF NOT EXISTS grading_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL,
            version INTEGER NOT NULL,
            players_total INTEGER NOT NULL,
            players_eligible INTEGER NOT NULL,
            players_graded INTEGER NOT NULL,
            players_null INTEGER NOT NULL,
            players_blended INTEGER NOT NULL
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

/// Insert or refresh one upstream record. Grades belong to the engine:
/// an upsert never touches `season_grade` or `primary_role`.
pub fn upsert_player(conn: &Connection, record: &PlayerSeasonRecord) -> Result<()> {
    let positions =
        serde_json::to_string(&record.positions).context("serialize positions")?;
    let derived = record
        .derived
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("serialize derived metrics")?;
    let role_profile = record
        .role_profile
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("serialize role profile")?;

    conn.execute(
        r#"
        INSERT INTO players (
            player_id, minutes, positions, derived, role_profile, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(player_id) DO UPDATE SET
            minutes = excluded.minutes,
            positions = excluded.positions,
            derived = excluded.derived,
            role_profile = excluded.role_profile,
            updated_at = excluded.updated_at
        "#,
        params![
            record.id,
            record.minutes as i64,
            positions,
            derived,
            role_profile,
            Utc::now().to_rfc3339(),
        ],
    )
    .context("upsert player")?;
    Ok(())
}

/// Load the whole population. Any undecodable row fails the load; a pass
/// either sees the full population or does not run at all.
pub fn load_players(conn: &Connection) -> Result<Vec<PlayerSeasonRecord>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT player_id, minutes, positions, derived, role_profile, season_grade
            FROM players
            ORDER BY player_id ASC
            "#,
        )
        .context("prepare load players query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })
        .context("query load players")?;

    let mut out = Vec::new();
    for row in rows {
        let (id, minutes, positions, derived, role_profile, season_grade) =
            row.context("decode player row")?;
        out.push(PlayerSeasonRecord {
            minutes: u32::try_from(minutes).unwrap_or(0),
            positions: serde_json::from_str(&positions)
                .with_context(|| format!("parse positions for player {id}"))?,
            derived: derived
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .with_context(|| format!("parse derived metrics for player {id}"))?,
            role_profile: role_profile
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .with_context(|| format!("parse role profile for player {id}"))?,
            season_grade: season_grade
                .as_deref()
                .map(serde_json::from_str)
                .transpose()
                .with_context(|| format!("parse season grade for player {id}"))?,
            id,
        });
    }
    Ok(out)
}

/// Commit one pass: every per-player update plus the run bookkeeping row,
/// in a single transaction. Only the grade-owned columns move; a failure
/// anywhere rolls the whole pass back.
pub fn apply_updates(
    conn: &mut Connection,
    updates: &[PlayerGradeUpdate],
    summary: PassSummary,
    started_at: &str,
) -> Result<()> {
    let finished_at = Utc::now().to_rfc3339();
    let tx = conn.transaction().context("begin grading transaction")?;
    for update in updates {
        let role_profile =
            serde_json::to_string(&update.role_profile).context("serialize role profile")?;
        let season_grade =
            serde_json::to_string(&update.season_grade).context("serialize season grade")?;
        tx.execute(
            r#"
            UPDATE players
            SET role_profile = ?1, primary_role = ?2, season_grade = ?3, updated_at = ?4
            WHERE player_id = ?5
            "#,
            params![
                role_profile,
                update.primary_role,
                season_grade,
                finished_at,
                update.id
            ],
        )
        .with_context(|| format!("write grade for player {}", update.id))?;
    }
    tx.execute(
        r#"
        INSERT INTO grading_runs (
            started_at, finished_at, version,
            players_total, players_eligible, players_graded,
            players_null, players_blended
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            started_at,
            finished_at,
            GRADING_VERSION as i64,
            summary.total as i64,
            summary.eligible as i64,
            summary.graded as i64,
            summary.null_grades as i64,
            summary.blended as i64,
        ],
    )
    .context("insert grading run")?;
    tx.commit().context("commit grading transaction")?;
    info!(
        updates = updates.len(),
        graded = summary.graded,
        "grading batch committed"
    );
    Ok(())
}
