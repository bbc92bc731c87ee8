use crate::math::{both_teams_score_probability, correct_score_table, over_25_probability, round1};
use crate::model::{AdditionalMetrics, ExpectedGoals, Match, PredictionResult};
use crate::registry::Algorithm;

const LEAGUE_AVG_GOALS: f64 = 2.7;
const HOME_ADVANTAGE: f64 = 1.1;
const CONFIDENCE: f64 = 0.71;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Draw,
    Away,
}

/// Season scoring rates against the league average. The three outcome figures are
/// independent heuristics and are reported without renormalizing.
pub fn predict_poisson(m: &Match) -> PredictionResult {
    let (home_expected, away_expected) = goal_rates(m);

    let p_home = outcome_probability(home_expected, away_expected, Side::Home);
    let p_draw = outcome_probability(home_expected, away_expected, Side::Draw);
    let p_away = outcome_probability(home_expected, away_expected, Side::Away);

    let over25 = over_25_probability(home_expected + away_expected);
    let btts = both_teams_score_probability(home_expected, away_expected);

    PredictionResult {
        home_win_probability: round1(p_home * 100.0),
        draw_probability: round1(p_draw * 100.0),
        away_win_probability: round1(p_away * 100.0),
        expected_goals: ExpectedGoals {
            home: round1(home_expected),
            away: round1(away_expected),
        },
        confidence: CONFIDENCE,
        algorithm: Algorithm::Poisson.name().to_string(),
        additional_metrics: Some(AdditionalMetrics {
            both_teams_score: Some(round1(btts)),
            total_goals_over25: Some(round1(over25 * 100.0)),
            correct_score_probabilities: Some(correct_score_table(home_expected, away_expected)),
        }),
    }
}

/// Unrounded expected goals (home, away). Zero matches played gives NaN or infinity.
pub(crate) fn goal_rates(m: &Match) -> (f64, f64) {
    let home = &m.home_team.stats;
    let away = &m.away_team.stats;
    let home_played = home.matches_played as f64;
    let away_played = away.matches_played as f64;
    let per_side = LEAGUE_AVG_GOALS / 2.0;

    let home_expected = (home.goals_for as f64 / home_played)
        * (away.goals_against as f64 / away_played)
        / per_side
        * HOME_ADVANTAGE;
    let away_expected =
        (away.goals_for as f64 / away_played) * (home.goals_against as f64 / home_played) / per_side;
    (home_expected, away_expected)
}

fn outcome_probability(home_expected: f64, away_expected: f64, side: Side) -> f64 {
    let diff = (home_expected - away_expected).abs();
    let avg_goals = (home_expected + away_expected) / 2.0;
    let home_strong = home_expected > away_expected;

    let favourite = || {
        let open_game = if avg_goals > 2.5 { 0.05 } else { 0.0 };
        (0.45 + diff * 0.15 + open_game).min(0.75)
    };
    let underdog = || (0.35 - diff * 0.1).max(0.15);

    match side {
        Side::Home if home_strong => favourite(),
        Side::Home => underdog(),
        Side::Away if !home_strong => favourite(),
        Side::Away => underdog(),
        Side::Draw => {
            let tight_game = if avg_goals < 2.2 { 0.05 } else { 0.0 };
            (0.25 - diff * 0.08 + tight_game).max(0.15)
        }
    }
}
