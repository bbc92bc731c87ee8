//! A fixed forest of five hand-written decision trees over six match features.
//! Nothing here is learned; the thresholds and leaf distributions are the model.

use crate::math::{both_teams_score_probability, form_sum, normalize3, over_25_probability, round1};
use crate::model::{AdditionalMetrics, ExpectedGoals, Match, PredictionResult};
use crate::registry::Algorithm;

const CONFIDENCE: f64 = 0.72;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    pub form_diff: f64,
    pub attack_diff: f64,
    /// Away minus home, so a positive value favours the home side.
    pub defense_diff: f64,
    pub elo_diff: f64,
    pub goal_diff_diff: f64,
    pub points_diff: f64,
}

impl Features {
    pub fn from_match(m: &Match) -> Self {
        let home = &m.home_team;
        let away = &m.away_team;
        Self {
            form_diff: form_sum(&home.form) - form_sum(&away.form),
            attack_diff: home.stats.attack_strength - away.stats.attack_strength,
            defense_diff: away.stats.defense_strength - home.stats.defense_strength,
            elo_diff: home.stats.elo_rating - away.stats.elo_rating,
            goal_diff_diff: (home.stats.goal_difference - away.stats.goal_difference) as f64,
            points_diff: home.stats.points as f64 - away.stats.points as f64,
        }
    }
}

/// Leaf distribution: (home, draw, away).
pub type Leaf = (f64, f64, f64);

pub type Tree = fn(&Features) -> Leaf;

pub const FOREST: [Tree; 5] = [form_tree, defense_tree, points_tree, attack_tree, elo_tree];

pub fn form_tree(f: &Features) -> Leaf {
    if f.form_diff > 1.0 {
        if f.elo_diff > 100.0 {
            (0.65, 0.20, 0.15)
        } else {
            (0.50, 0.28, 0.22)
        }
    } else if f.attack_diff > 0.5 {
        (0.50, 0.25, 0.25)
    } else {
        (0.35, 0.30, 0.35)
    }
}

pub fn defense_tree(f: &Features) -> Leaf {
    if f.defense_diff > 0.2 {
        if f.goal_diff_diff > 10.0 {
            (0.60, 0.25, 0.15)
        } else {
            (0.48, 0.30, 0.22)
        }
    } else if f.defense_diff < -0.2 {
        if f.goal_diff_diff < -10.0 {
            (0.15, 0.25, 0.60)
        } else {
            (0.25, 0.30, 0.45)
        }
    } else {
        (0.40, 0.32, 0.28)
    }
}

pub fn points_tree(f: &Features) -> Leaf {
    if f.points_diff > 10.0 {
        (0.60, 0.22, 0.18)
    } else if f.points_diff > 0.0 {
        if f.form_diff > 0.0 {
            (0.50, 0.28, 0.22)
        } else {
            (0.42, 0.30, 0.28)
        }
    } else if f.points_diff < -10.0 {
        (0.20, 0.25, 0.55)
    } else {
        (0.33, 0.32, 0.35)
    }
}

pub fn attack_tree(f: &Features) -> Leaf {
    if f.attack_diff > 0.3 {
        if f.goal_diff_diff > 5.0 {
            (0.58, 0.24, 0.18)
        } else {
            (0.47, 0.28, 0.25)
        }
    } else if f.attack_diff < -0.3 {
        if f.goal_diff_diff < -5.0 {
            (0.18, 0.24, 0.58)
        } else {
            (0.28, 0.30, 0.42)
        }
    } else {
        (0.38, 0.34, 0.28)
    }
}

pub fn elo_tree(f: &Features) -> Leaf {
    if f.elo_diff > 150.0 {
        (0.70, 0.18, 0.12)
    } else if f.elo_diff < -150.0 {
        (0.15, 0.20, 0.65)
    } else {
        (0.40, 0.30, 0.30)
    }
}

pub fn predict_random_forest(m: &Match) -> PredictionResult {
    let features = Features::from_match(m);

    let (mut home, mut draw, mut away) = (0.0, 0.0, 0.0);
    for tree in FOREST {
        let (h, d, a) = tree(&features);
        home += h;
        draw += d;
        away += a;
    }
    let n = FOREST.len() as f64;
    let (p_home, p_draw, p_away) = normalize3(home / n, draw / n, away / n);

    let xg_home = 1.5 + features.attack_diff * 0.3;
    let xg_away = 1.5 - features.attack_diff * 0.3;

    PredictionResult {
        home_win_probability: round1(p_home),
        draw_probability: round1(p_draw),
        away_win_probability: round1(p_away),
        expected_goals: ExpectedGoals {
            home: round1(xg_home),
            away: round1(xg_away),
        },
        confidence: CONFIDENCE,
        algorithm: Algorithm::RandomForest.name().to_string(),
        additional_metrics: Some(AdditionalMetrics {
            both_teams_score: Some(round1(both_teams_score_probability(xg_home, xg_away))),
            total_goals_over25: Some(round1(over_25_probability(xg_home + xg_away) * 100.0)),
            correct_score_probabilities: None,
        }),
    }
}
