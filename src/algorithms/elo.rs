use crate::math::round1;
use crate::model::{ExpectedGoals, Match, PredictionResult};
use crate::registry::Algorithm;

const HOME_ADVANTAGE_PTS: f64 = 50.0;
const DRAW_BASE: f64 = 0.25;
const DRAW_FLOOR: f64 = 0.15;
const CONFIDENCE: f64 = 0.70;

/// Logistic rating expectation. The away share is whatever remains and is not clamped.
pub fn predict_elo(m: &Match) -> PredictionResult {
    let adjusted_diff =
        m.home_team.stats.elo_rating - m.away_team.stats.elo_rating + HOME_ADVANTAGE_PTS;

    let p_home = expected_score(adjusted_diff);
    let p_draw = (DRAW_BASE - adjusted_diff.abs() / 2000.0).max(DRAW_FLOOR);
    let p_away = 1.0 - p_home - p_draw;

    PredictionResult {
        home_win_probability: round1(p_home * 100.0),
        draw_probability: round1(p_draw * 100.0),
        away_win_probability: round1(p_away * 100.0),
        expected_goals: ExpectedGoals {
            home: round1(1.5 + p_home * 1.5),
            away: round1(1.2 + p_away * 1.3),
        },
        confidence: CONFIDENCE,
        algorithm: Algorithm::Elo.name().to_string(),
        additional_metrics: None,
    }
}

fn expected_score(diff: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf(-diff / 400.0))
}
