use crate::math::{normalize3, round1};
use crate::model::{AdditionalMetrics, ExpectedGoals, Match, PredictionResult};
use crate::registry::Algorithm;

const HOME_ADVANTAGE: f64 = 1.2;
const DRAW_SHARE: f64 = 1.0;
const CONFIDENCE: f64 = 0.65;

/// Attack strength against the opponent's defense, with a flat draw share.
pub fn predict_attack_defense(m: &Match) -> PredictionResult {
    let home = &m.home_team.stats;
    let away = &m.away_team.stats;

    let home_ratio = home.attack_strength / away.defense_strength * HOME_ADVANTAGE;
    let away_ratio = away.attack_strength / home.defense_strength;
    let (p_home, p_draw, p_away) = normalize3(home_ratio, DRAW_SHARE, away_ratio);

    let both_teams_score = if home.attack_strength > 1.5 && away.attack_strength > 1.5 {
        75.0
    } else {
        50.0
    };
    let total_goals_over25 = if home.attack_strength + away.attack_strength > 3.0 {
        70.0
    } else {
        40.0
    };

    PredictionResult {
        home_win_probability: round1(p_home),
        draw_probability: round1(p_draw),
        away_win_probability: round1(p_away),
        expected_goals: ExpectedGoals {
            home: round1(home.attack_strength * 1.1),
            away: round1(away.attack_strength * 0.9),
        },
        confidence: CONFIDENCE,
        algorithm: Algorithm::AttackDefense.name().to_string(),
        additional_metrics: Some(AdditionalMetrics {
            both_teams_score: Some(both_teams_score),
            total_goals_over25: Some(total_goals_over25),
            correct_score_probabilities: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn strong_home_attack_is_favoured() {
        let m = catalog::fixture("arsenal", "chelsea").unwrap();
        let p = predict_attack_defense(&m);
        // 1.87 / 1.13 * 1.2 = 1.9858, 1.6 / 0.8 = 2.0, draw 1.0
        assert_eq!(p.home_win_probability, 39.8);
        assert_eq!(p.away_win_probability, 40.1);
        assert_eq!(p.draw_probability, 20.1);
        assert_eq!(p.expected_goals.home, 2.1);
        assert_eq!(p.expected_goals.away, 1.4);
        assert_eq!(p.confidence, 0.65);
        let metrics = p.additional_metrics.unwrap();
        assert_eq!(metrics.both_teams_score, Some(75.0));
        assert_eq!(metrics.total_goals_over25, Some(70.0));
    }

    #[test]
    fn weak_attacks_lower_goal_metrics() {
        let m = catalog::fixture("manchester-united", "chelsea").unwrap();
        let metrics = predict_attack_defense(&m).additional_metrics.unwrap();
        assert_eq!(metrics.both_teams_score, Some(50.0));
        assert_eq!(metrics.total_goals_over25, Some(40.0));
    }

    #[test]
    fn zero_defense_propagates_infinity() {
        let mut m = catalog::fixture("arsenal", "chelsea").unwrap();
        m.away_team.stats.defense_strength = 0.0;
        let p = predict_attack_defense(&m);
        assert!(p.home_win_probability.is_nan());
    }
}
