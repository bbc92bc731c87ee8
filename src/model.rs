use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of recent results carried in `Team::form`.
pub const FORM_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    pub attack_strength: f64,
    pub defense_strength: f64,
    pub elo_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub league: String,
    // Oldest first, most recent last. 1 = win, 0.5 = draw, 0 = loss.
    pub form: [f64; FORM_LEN],
    pub stats: TeamStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub home_team: Team,
    pub away_team: Team,
    pub date: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub is_finished: bool,
}

impl Match {
    pub fn new(id: impl Into<String>, home_team: Team, away_team: Team, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            home_team,
            away_team,
            date: date.into(),
            home_score: None,
            away_score: None,
            is_finished: false,
        }
    }

    pub fn final_score(&self) -> Option<(u32, u32)> {
        if !self.is_finished {
            return None;
        }
        Some((self.home_score?, self.away_score?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub both_teams_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_goals_over25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_score_probabilities: Option<BTreeMap<String, f64>>,
}

/// One algorithm's view of a fixture. Probabilities are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub home_win_probability: f64,
    pub draw_probability: f64,
    pub away_win_probability: f64,
    pub expected_goals: ExpectedGoals,
    pub confidence: f64,
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_metrics: Option<AdditionalMetrics>,
}

impl PredictionResult {
    pub fn outcome_sum(&self) -> f64 {
        self.home_win_probability + self.draw_probability + self.away_win_probability
    }

    pub fn both_teams_score(&self) -> Option<f64> {
        self.additional_metrics
            .as_ref()
            .and_then(|m| m.both_teams_score)
    }
}
