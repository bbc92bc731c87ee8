use crate::math::{form_sum, normalize3, or_one, round1};
use crate::model::{AdditionalMetrics, ExpectedGoals, Match, PredictionResult};
use crate::registry::Algorithm;

const BASE_HOME: f64 = 0.4;
const BASE_AWAY: f64 = 0.3;
const BASE_DRAW: f64 = 0.3;
const HOME_ADVANTAGE: f64 = 0.3;

/// Recent form plus a fixed home edge; goals from attack vs. opponent defense.
pub fn predict_default(m: &Match) -> PredictionResult {
    let home = &m.home_team;
    let away = &m.away_team;

    let form_diff = (form_sum(&home.form) - form_sum(&away.form)) / 10.0;
    let home_base = BASE_HOME + form_diff + HOME_ADVANTAGE;
    let away_base = BASE_AWAY - form_diff;
    let draw_base = BASE_DRAW - form_diff.abs() * 0.1;
    let (p_home, p_draw, p_away) = normalize3(home_base, draw_base, away_base);

    let xg_home = home.stats.attack_strength * or_one(away.stats.defense_strength);
    let xg_away = away.stats.attack_strength * or_one(home.stats.defense_strength);

    let both_teams_score = if xg_home > 0.8 && xg_away > 0.8 { 70.0 } else { 45.0 };
    let total_goals_over25 = if xg_home + xg_away > 2.5 { 65.0 } else { 35.0 };

    PredictionResult {
        home_win_probability: round1(p_home),
        draw_probability: round1(p_draw),
        away_win_probability: round1(p_away),
        expected_goals: ExpectedGoals {
            home: round1(xg_home),
            away: round1(xg_away),
        },
        confidence: (0.6 + form_diff.abs() * 0.3).min(0.9),
        algorithm: Algorithm::Default.name().to_string(),
        additional_metrics: Some(AdditionalMetrics {
            both_teams_score: Some(both_teams_score),
            total_goals_over25: Some(total_goals_over25),
            correct_score_probabilities: None,
        }),
    }
}
