use crate::math::{both_teams_score_probability, momentum, normalize3, over_25_probability, round1};
use crate::model::{AdditionalMetrics, ExpectedGoals, Match, PredictionResult, TeamStats};
use crate::registry::Algorithm;

pub const SEASON_LENGTH: f64 = 38.0;
const HOME_PPG_WEIGHT: f64 = 1.2;
const AWAY_PPG_WEIGHT: f64 = 0.9;
const RAW_FLOOR: f64 = 0.05;

/// How far into the season the two sides are, as a 0..=1 trust factor for trends.
pub fn stability_factor(home: &TeamStats, away: &TeamStats) -> f64 {
    let played = (home.matches_played as f64 + away.matches_played as f64) / 2.0;
    let progress = played / SEASON_LENGTH;
    (progress * 2.0).min(1.0)
}

fn points_per_game(stats: &TeamStats) -> f64 {
    stats.points as f64 / stats.matches_played as f64
}

/// Recency-weighted form and points pace. Early in the season the trend is pulled
/// towards the mean of the three raw shares.
pub fn predict_seasonal(m: &Match) -> PredictionResult {
    let home = &m.home_team;
    let away = &m.away_team;

    let home_momentum = momentum(&home.form);
    let away_momentum = momentum(&away.form);
    let momentum_diff = home_momentum - away_momentum;
    let ppg_diff = points_per_game(&home.stats) * HOME_PPG_WEIGHT
        - points_per_game(&away.stats) * AWAY_PPG_WEIGHT;

    let raw_home = (0.4 + momentum_diff * 0.3 + ppg_diff * 0.1).max(RAW_FLOOR);
    let raw_away = (0.3 - momentum_diff * 0.3 - ppg_diff * 0.1).max(RAW_FLOOR);
    let raw_draw = (0.3 - momentum_diff.abs() * 0.1).max(RAW_FLOOR);

    let stability = stability_factor(&home.stats, &away.stats);
    let mean = (raw_home + raw_draw + raw_away) / 3.0;
    let settle = |raw: f64| raw * stability + mean * (1.0 - stability);
    let (p_home, p_draw, p_away) = normalize3(settle(raw_home), settle(raw_draw), settle(raw_away));

    let xg_home = home_momentum * 2.5;
    let xg_away = away_momentum * 2.2;

    PredictionResult {
        home_win_probability: round1(p_home),
        draw_probability: round1(p_draw),
        away_win_probability: round1(p_away),
        expected_goals: ExpectedGoals {
            home: round1(xg_home),
            away: round1(xg_away),
        },
        confidence: 0.55 + 0.15 * stability,
        algorithm: Algorithm::Seasonal.name().to_string(),
        additional_metrics: Some(AdditionalMetrics {
            both_teams_score: Some(round1(both_teams_score_probability(xg_home, xg_away))),
            total_goals_over25: Some(round1(over_25_probability(xg_home + xg_away) * 100.0)),
            correct_score_probabilities: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn stability_saturates_at_half_season() {
        let m = catalog::fixture("arsenal", "chelsea").unwrap();
        let mut home = m.home_team.stats.clone();
        let mut away = m.away_team.stats.clone();
        home.matches_played = 19;
        away.matches_played = 19;
        assert_eq!(stability_factor(&home, &away), 1.0);
        home.matches_played = 30;
        away.matches_played = 30;
        assert_eq!(stability_factor(&home, &away), 1.0);
        home.matches_played = 0;
        away.matches_played = 0;
        assert_eq!(stability_factor(&home, &away), 0.0);
    }

    #[test]
    fn arsenal_chelsea_mid_table_trend() {
        let m = catalog::fixture("arsenal", "chelsea").unwrap();
        let p = predict_seasonal(&m);
        assert_eq!(p.home_win_probability, 53.8);
        assert_eq!(p.draw_probability, 29.4);
        assert_eq!(p.away_win_probability, 16.7);
        assert_eq!(p.expected_goals.home, 2.3);
        assert_eq!(p.expected_goals.away, 1.5);
        assert!(p.confidence > 0.55 && p.confidence < 0.70);
    }

    #[test]
    fn early_season_regresses_towards_uniform() {
        let mut m = catalog::fixture("arsenal", "chelsea").unwrap();
        let late = predict_seasonal(&m);
        m.home_team.stats.matches_played = 2;
        m.home_team.stats.points = 5;
        m.away_team.stats.matches_played = 2;
        m.away_team.stats.points = 4;
        let early = predict_seasonal(&m);
        let spread = |p: &PredictionResult| {
            p.home_win_probability.max(p.away_win_probability).max(p.draw_probability)
                - p.home_win_probability.min(p.away_win_probability).min(p.draw_probability)
        };
        assert!(spread(&early) < spread(&late));
    }
}
