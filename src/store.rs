//! SQLite-backed team and fixture store. The engine only sees the `Team`/`Match`
//! records this module hands out.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::model::{FORM_LEN, Match, Team, TeamStats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub date: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub is_finished: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportFile {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub teams_upserted: usize,
    pub matches_upserted: usize,
    pub matches_skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbStatus {
    pub teams: usize,
    pub matches: usize,
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create db directory {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            short_name TEXT NOT NULL,
            league TEXT NOT NULL,
            form TEXT NOT NULL,
            matches_played INTEGER NOT NULL,
            wins INTEGER NOT NULL,
            draws INTEGER NOT NULL,
            losses INTEGER NOT NULL,
            goals_for INTEGER NOT NULL,
            goals_against INTEGER NOT NULL,
            goal_difference INTEGER NOT NULL,
            points INTEGER NOT NULL,
            attack_strength REAL NOT NULL,
            defense_strength REAL NOT NULL,
            elo_rating REAL NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_teams_league ON teams(league);

        CREATE TABLE IF NOT EXISTS matches (
            id TEXT PRIMARY KEY,
            home_team_id TEXT NOT NULL REFERENCES teams(id),
            away_team_id TEXT NOT NULL REFERENCES teams(id),
            date TEXT NOT NULL,
            home_score INTEGER NULL,
            away_score INTEGER NULL,
            is_finished INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_matches_date ON matches(date);
        CREATE INDEX IF NOT EXISTS idx_matches_finished ON matches(is_finished);
        "#,
    )
    .context("create schema")?;
    Ok(())
}

pub fn read_import_file(path: &Path) -> Result<ImportFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read import file {}", path.display()))?;
    parse_import_json(&raw)
}

pub fn parse_import_json(raw: &str) -> Result<ImportFile> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ImportFile::default());
    }
    serde_json::from_str(trimmed).context("invalid import json")
}

/// Upserts every team, then every match whose two teams are known.
pub fn import(conn: &mut Connection, file: &ImportFile) -> Result<ImportSummary> {
    let tx = conn.transaction().context("begin import transaction")?;
    let now = Utc::now().to_rfc3339();
    let mut summary = ImportSummary::default();

    for team in &file.teams {
        upsert_team(&tx, team, &now)?;
        summary.teams_upserted += 1;
    }

    let known: HashSet<String> = {
        let mut stmt = tx.prepare("SELECT id FROM teams").context("prepare team ids")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("query team ids")?
            .collect::<rusqlite::Result<HashSet<_>>>()
            .context("read team ids")?;
        ids
    };

    for m in &file.matches {
        if !known.contains(&m.home_team_id) || !known.contains(&m.away_team_id) {
            warn!(
                match_id = %m.id,
                home = %m.home_team_id,
                away = %m.away_team_id,
                "skipping match with unknown team"
            );
            summary.matches_skipped += 1;
            continue;
        }
        upsert_match(&tx, m, &now)?;
        summary.matches_upserted += 1;
    }

    tx.commit().context("commit import")?;
    info!(
        teams = summary.teams_upserted,
        matches = summary.matches_upserted,
        skipped = summary.matches_skipped,
        "import complete"
    );
    Ok(summary)
}

pub fn upsert_team(conn: &Connection, team: &Team, updated_at: &str) -> Result<()> {
    let form = serde_json::to_string(&team.form).context("serialize form")?;
    let s = &team.stats;
    conn.execute(
        r#"
        INSERT INTO teams (
            id, name, short_name, league, form, matches_played, wins, draws, losses,
            goals_for, goals_against, goal_difference, points, attack_strength,
            defense_strength, elo_rating, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            short_name = excluded.short_name,
            league = excluded.league,
            form = excluded.form,
            matches_played = excluded.matches_played,
            wins = excluded.wins,
            draws = excluded.draws,
            losses = excluded.losses,
            goals_for = excluded.goals_for,
            goals_against = excluded.goals_against,
            goal_difference = excluded.goal_difference,
            points = excluded.points,
            attack_strength = excluded.attack_strength,
            defense_strength = excluded.defense_strength,
            elo_rating = excluded.elo_rating,
            updated_at = excluded.updated_at
        "#,
        params![
            team.id,
            team.name,
            team.short_name,
            team.league,
            form,
            s.matches_played,
            s.wins,
            s.draws,
            s.losses,
            s.goals_for,
            s.goals_against,
            s.goal_difference,
            s.points,
            s.attack_strength,
            s.defense_strength,
            s.elo_rating,
            updated_at,
        ],
    )
    .with_context(|| format!("upsert team {}", team.id))?;
    Ok(())
}

pub fn upsert_match(conn: &Connection, m: &MatchRecord, updated_at: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO matches (
            id, home_team_id, away_team_id, date, home_score, away_score, is_finished, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(id) DO UPDATE SET
            home_team_id = excluded.home_team_id,
            away_team_id = excluded.away_team_id,
            date = excluded.date,
            home_score = excluded.home_score,
            away_score = excluded.away_score,
            is_finished = excluded.is_finished,
            updated_at = excluded.updated_at
        "#,
        params![
            m.id,
            m.home_team_id,
            m.away_team_id,
            m.date,
            m.home_score,
            m.away_score,
            m.is_finished,
            updated_at,
        ],
    )
    .with_context(|| format!("upsert match {}", m.id))?;
    Ok(())
}

const TEAM_COLUMNS: &str = "id, name, short_name, league, form, matches_played, wins, draws, \
    losses, goals_for, goals_against, goal_difference, points, attack_strength, \
    defense_strength, elo_rating";

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<(Team, String)> {
    let form_raw: String = row.get(4)?;
    let team = Team {
        id: row.get(0)?,
        name: row.get(1)?,
        short_name: row.get(2)?,
        league: row.get(3)?,
        form: [0.0; FORM_LEN],
        stats: TeamStats {
            matches_played: row.get(5)?,
            wins: row.get(6)?,
            draws: row.get(7)?,
            losses: row.get(8)?,
            goals_for: row.get(9)?,
            goals_against: row.get(10)?,
            goal_difference: row.get(11)?,
            points: row.get(12)?,
            attack_strength: row.get(13)?,
            defense_strength: row.get(14)?,
            elo_rating: row.get(15)?,
        },
    };
    Ok((team, form_raw))
}

fn with_form((mut team, form_raw): (Team, String)) -> Result<Team> {
    team.form = serde_json::from_str(&form_raw)
        .with_context(|| format!("invalid stored form for team {}", team.id))?;
    Ok(team)
}

pub fn load_team(conn: &Connection, id: &str) -> Result<Option<Team>> {
    let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1");
    let row = conn
        .query_row(&sql, params![id], team_from_row)
        .optional()
        .with_context(|| format!("load team {id}"))?;
    row.map(with_form).transpose()
}

pub fn load_teams(conn: &Connection) -> Result<Vec<Team>> {
    let sql = format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY id");
    let mut stmt = conn.prepare(&sql).context("prepare load teams")?;
    let rows = stmt
        .query_map([], team_from_row)
        .context("query teams")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("read teams")?;
    rows.into_iter().map(with_form).collect()
}

pub fn load_match_records(conn: &Connection, finished_only: bool) -> Result<Vec<MatchRecord>> {
    let sql = if finished_only {
        "SELECT id, home_team_id, away_team_id, date, home_score, away_score, is_finished \
         FROM matches WHERE is_finished = 1 ORDER BY date, id"
    } else {
        "SELECT id, home_team_id, away_team_id, date, home_score, away_score, is_finished \
         FROM matches ORDER BY date, id"
    };
    let mut stmt = conn.prepare(sql).context("prepare load matches")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(MatchRecord {
                id: row.get(0)?,
                home_team_id: row.get(1)?,
                away_team_id: row.get(2)?,
                date: row.get(3)?,
                home_score: row.get(4)?,
                away_score: row.get(5)?,
                is_finished: row.get(6)?,
            })
        })
        .context("query matches")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("read matches")?;
    Ok(rows)
}

/// Resolves stored fixtures into full `Match` records with both teams attached.
pub fn load_matches(conn: &Connection, finished_only: bool) -> Result<Vec<Match>> {
    let records = load_match_records(conn, finished_only)?;
    let teams = load_teams(conn)?;
    records
        .into_iter()
        .map(|r| -> Result<Match> {
            let find = |id: &str| {
                teams
                    .iter()
                    .find(|t| t.id == id)
                    .cloned()
                    .ok_or_else(|| anyhow!("match {} references missing team {}", r.id, id))
            };
            let home_team = find(&r.home_team_id)?;
            let away_team = find(&r.away_team_id)?;
            Ok(Match {
                id: r.id.clone(),
                home_team,
                away_team,
                date: r.date.clone(),
                home_score: r.home_score,
                away_score: r.away_score,
                is_finished: r.is_finished,
            })
        })
        .collect()
}

/// Builds an ad-hoc fixture between two stored teams.
pub fn fixture(conn: &Connection, home_id: &str, away_id: &str) -> Result<Match> {
    let home = load_team(conn, home_id)?.ok_or_else(|| anyhow!("unknown team id: {home_id}"))?;
    let away = load_team(conn, away_id)?.ok_or_else(|| anyhow!("unknown team id: {away_id}"))?;
    Ok(Match::new(format!("{home_id}-vs-{away_id}"), home, away, ""))
}

pub fn status(conn: &Connection) -> Result<DbStatus> {
    let count = |table: &str| -> Result<usize> {
        let n: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .with_context(|| format!("count {table}"))?;
        Ok(n.max(0) as usize)
    };
    Ok(DbStatus {
        teams: count("teams")?,
        matches: count("matches")?,
    })
}

pub fn resolve_db_path(explicit: Option<PathBuf>, configured: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or(configured)
        .context("unable to resolve sqlite path (set WINMIX_DB or pass --db)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn seeded() -> Connection {
        let mut conn = open_in_memory().unwrap();
        let file = ImportFile {
            teams: catalog::premier_league_teams(),
            matches: vec![
                MatchRecord {
                    id: "m1".to_string(),
                    home_team_id: "arsenal".to_string(),
                    away_team_id: "chelsea".to_string(),
                    date: "2024-12-28T15:00:00Z".to_string(),
                    home_score: Some(2),
                    away_score: Some(1),
                    is_finished: true,
                },
                MatchRecord {
                    id: "m2".to_string(),
                    home_team_id: "liverpool".to_string(),
                    away_team_id: "manchester-city".to_string(),
                    date: "2024-12-29T17:30:00Z".to_string(),
                    home_score: None,
                    away_score: None,
                    is_finished: false,
                },
            ],
        };
        import(&mut conn, &file).unwrap();
        conn
    }

    #[test]
    fn teams_round_trip() {
        let conn = seeded();
        let teams = load_teams(&conn).unwrap();
        let mut expected = catalog::premier_league_teams();
        expected.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(teams, expected);
    }

    #[test]
    fn finished_filter_applies() {
        let conn = seeded();
        assert_eq!(load_matches(&conn, false).unwrap().len(), 2);
        let finished = load_matches(&conn, true).unwrap();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].final_score(), Some((2, 1)));
        assert_eq!(finished[0].home_team.id, "arsenal");
    }

    #[test]
    fn reimport_is_an_upsert() {
        let mut conn = seeded();
        let mut arsenal = catalog::find_team("arsenal").unwrap();
        arsenal.stats.elo_rating = 2199.0;
        let summary = import(
            &mut conn,
            &ImportFile {
                teams: vec![arsenal],
                matches: Vec::new(),
            },
        )
        .unwrap();
        assert_eq!(summary.teams_upserted, 1);
        let status = status(&conn).unwrap();
        assert_eq!(status, DbStatus { teams: 6, matches: 2 });
        let stored = load_team(&conn, "arsenal").unwrap().unwrap();
        assert_eq!(stored.stats.elo_rating, 2199.0);
    }

    #[test]
    fn match_with_unknown_team_is_skipped() {
        let mut conn = seeded();
        let summary = import(
            &mut conn,
            &ImportFile {
                teams: Vec::new(),
                matches: vec![MatchRecord {
                    id: "m3".to_string(),
                    home_team_id: "arsenal".to_string(),
                    away_team_id: "wrexham".to_string(),
                    date: "2025-01-01".to_string(),
                    home_score: None,
                    away_score: None,
                    is_finished: false,
                }],
            },
        )
        .unwrap();
        assert_eq!(summary.matches_skipped, 1);
        assert_eq!(summary.matches_upserted, 0);
    }

    #[test]
    fn import_json_rejects_short_form() {
        let raw = r#"{"teams":[{"id":"x","name":"X","shortName":"X","league":"L","form":[1,1],
            "stats":{"matchesPlayed":1,"wins":1,"draws":0,"losses":0,"goalsFor":1,
            "goalsAgainst":0,"goalDifference":1,"points":3,"attackStrength":1.0,
            "defenseStrength":1.0,"eloRating":2000}}]}"#;
        assert!(parse_import_json(raw).is_err());
        assert!(parse_import_json("null").unwrap().teams.is_empty());
    }

    #[test]
    fn open_db_reports_unusable_directory() {
        let blocker = std::env::temp_dir().join(format!("winmix_blocker_{}", std::process::id()));
        std::fs::write(&blocker, b"not a directory").unwrap();
        let err = open_db(&blocker.join("nested").join("winmix.sqlite")).unwrap_err();
        assert!(format!("{err:#}").contains("create db directory"));
        let _ = std::fs::remove_file(&blocker);
    }

    #[test]
    fn open_db_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("winmix_store_{}", std::process::id()));
        let path = dir.join("deeper").join("winmix.sqlite");
        let conn = open_db(&path).unwrap();
        assert_eq!(status(&conn).unwrap(), DbStatus { teams: 0, matches: 0 });
        drop(conn);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn fixture_needs_both_teams() {
        let conn = seeded();
        assert!(fixture(&conn, "arsenal", "chelsea").is_ok());
        assert!(fixture(&conn, "arsenal", "wrexham").is_err());
    }
}
