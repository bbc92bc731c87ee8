use crate::math::{both_teams_score_probability, normalize3, round1};
use crate::model::{AdditionalMetrics, ExpectedGoals, Match, PredictionResult};
use crate::registry::{Algorithm, ensemble_weights};

use super::poisson::goal_rates;
use super::{predict_attack_defense, predict_default, predict_elo, predict_poisson};

const CONFIDENCE: f64 = 0.73;
const FALLBACK_BTTS: f64 = 60.0;

/// Members in weight order. Weights come from `registry::ensemble_weights`.
pub const ENSEMBLE_MEMBERS: [Algorithm; 4] = [
    Algorithm::Default,
    Algorithm::AttackDefense,
    Algorithm::Poisson,
    Algorithm::Elo,
];

/// Accuracy-weighted blend of the four base algorithms. The outcome trio is rescaled
/// to 100 after blending since the Poisson member does not sum to 100 on its own.
pub fn predict_ensemble(m: &Match) -> PredictionResult {
    let default = predict_default(m);
    let attack_defense = predict_attack_defense(m);
    let poisson = predict_poisson(m);
    let elo = predict_elo(m);

    let members = [&default, &attack_defense, &poisson, &elo];
    let weights = ensemble_weights();

    let (p_home, p_draw, p_away) = normalize3(
        blend(&members, weights, |r| r.home_win_probability),
        blend(&members, weights, |r| r.draw_probability),
        blend(&members, weights, |r| r.away_win_probability),
    );
    let xg_home = blend(&members, weights, |r| r.expected_goals.home);
    let xg_away = blend(&members, weights, |r| r.expected_goals.away);

    // Poisson's figure is taken before its own rounding so the mean is rounded once.
    let (home_rate, away_rate) = goal_rates(m);
    let btts = (both_teams_score_probability(home_rate, away_rate)
        + attack_defense.both_teams_score().unwrap_or(FALLBACK_BTTS))
        / 2.0;

    PredictionResult {
        home_win_probability: round1(p_home),
        draw_probability: round1(p_draw),
        away_win_probability: round1(p_away),
        expected_goals: ExpectedGoals {
            home: round1(xg_home),
            away: round1(xg_away),
        },
        confidence: CONFIDENCE,
        algorithm: Algorithm::Ensemble.name().to_string(),
        additional_metrics: Some(AdditionalMetrics {
            both_teams_score: Some(round1(btts)),
            total_goals_over25: None,
            correct_score_probabilities: None,
        }),
    }
}

fn blend(
    members: &[&PredictionResult; 4],
    weights: &[f64; 4],
    field: impl Fn(&PredictionResult) -> f64,
) -> f64 {
    members
        .iter()
        .zip(weights.iter())
        .map(|(&r, w)| field(r) * w)
        .sum()
}
