//! Built-in Premier League sample data, usable without a database.

use anyhow::{Result, anyhow};

use crate::model::{Match, Team, TeamStats};

const LEAGUE: &str = "Premier League";

#[allow(clippy::too_many_arguments)]
fn team(
    id: &str,
    name: &str,
    short_name: &str,
    form: [f64; 5],
    record: (u32, u32, u32, u32),
    goals: (u32, u32),
    points: u32,
    strength: (f64, f64),
    elo_rating: f64,
) -> Team {
    let (matches_played, wins, draws, losses) = record;
    let (goals_for, goals_against) = goals;
    Team {
        id: id.to_string(),
        name: name.to_string(),
        short_name: short_name.to_string(),
        league: LEAGUE.to_string(),
        form,
        stats: TeamStats {
            matches_played,
            wins,
            draws,
            losses,
            goals_for,
            goals_against,
            goal_difference: goals_for as i32 - goals_against as i32,
            points,
            attack_strength: strength.0,
            defense_strength: strength.1,
            elo_rating,
        },
    }
}

pub fn premier_league_teams() -> Vec<Team> {
    vec![
        team(
            "arsenal",
            "Arsenal FC",
            "Arsenal",
            [1.0, 1.0, 0.5, 1.0, 1.0],
            (15, 11, 2, 2),
            (28, 12),
            35,
            (1.87, 0.8),
            2150.0,
        ),
        team(
            "chelsea",
            "Chelsea FC",
            "Chelsea",
            [1.0, 0.5, 1.0, 0.0, 1.0],
            (15, 8, 4, 3),
            (24, 17),
            28,
            (1.6, 1.13),
            2080.0,
        ),
        team(
            "manchester-city",
            "Manchester City",
            "Man City",
            [1.0, 1.0, 1.0, 0.5, 1.0],
            (15, 12, 1, 2),
            (35, 15),
            37,
            (2.33, 1.0),
            2200.0,
        ),
        team(
            "liverpool",
            "Liverpool FC",
            "Liverpool",
            [1.0, 1.0, 0.0, 1.0, 1.0],
            (15, 10, 3, 2),
            (30, 16),
            33,
            (2.0, 1.07),
            2170.0,
        ),
        team(
            "manchester-united",
            "Manchester United",
            "Man Utd",
            [0.0, 1.0, 0.5, 1.0, 0.0],
            (15, 7, 3, 5),
            (18, 20),
            24,
            (1.2, 1.33),
            2020.0,
        ),
        team(
            "tottenham",
            "Tottenham Hotspur",
            "Tottenham",
            [1.0, 0.0, 1.0, 0.5, 1.0],
            (15, 8, 2, 5),
            (26, 18),
            26,
            (1.73, 1.2),
            2050.0,
        ),
    ]
}

pub fn find_team(id: &str) -> Option<Team> {
    premier_league_teams().into_iter().find(|t| t.id == id)
}

/// Builds an unplayed fixture between two catalog teams.
pub fn fixture(home_id: &str, away_id: &str) -> Result<Match> {
    let home = find_team(home_id).ok_or_else(|| anyhow!("unknown team id: {home_id}"))?;
    let away = find_team(away_id).ok_or_else(|| anyhow!("unknown team id: {away_id}"))?;
    Ok(Match::new(
        format!("{home_id}-vs-{away_id}"),
        home,
        away,
        "",
    ))
}

pub fn upcoming_matches() -> Vec<Match> {
    let teams = premier_league_teams();
    let pairs = [
        ("match-1", 0, 1, "2024-12-28T15:00:00Z"),
        ("match-2", 2, 3, "2024-12-29T17:30:00Z"),
        ("match-3", 4, 5, "2024-12-30T14:00:00Z"),
    ];
    pairs
        .into_iter()
        .map(|(id, h, a, date)| Match::new(id, teams[h].clone(), teams[a].clone(), date))
        .collect()
}
