use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::{self, ENSEMBLE_MEMBERS};
use crate::model::{Match, PredictionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Default,
    AttackDefense,
    Poisson,
    Elo,
    Ensemble,
    RandomForest,
    Seasonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speed {
    Fast,
    Medium,
    Slow,
}

/// Display metadata for one algorithm. `accuracy` is a percentage.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    pub algorithm: Algorithm,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub accuracy: f64,
    pub complexity: Complexity,
    pub speed: Speed,
}

pub static REGISTRY: [AlgorithmInfo; 7] = [
    AlgorithmInfo {
        algorithm: Algorithm::Default,
        id: "default",
        name: "Default (Form + H2H)",
        description: "Combines recent team form with head-to-head historical data",
        accuracy: 68.5,
        complexity: Complexity::Medium,
        speed: Speed::Fast,
    },
    AlgorithmInfo {
        algorithm: Algorithm::AttackDefense,
        id: "attack-defense",
        name: "Attack-Defense Analysis",
        description: "Analyzes attacking strength vs defensive weakness",
        accuracy: 65.2,
        complexity: Complexity::Low,
        speed: Speed::Fast,
    },
    AlgorithmInfo {
        algorithm: Algorithm::Poisson,
        id: "poisson",
        name: "Poisson Distribution",
        description: "Mathematical goal probability model using statistical distribution",
        accuracy: 71.3,
        complexity: Complexity::High,
        speed: Speed::Medium,
    },
    AlgorithmInfo {
        algorithm: Algorithm::Elo,
        id: "elo",
        name: "ELO Rating System",
        description: "Chess-adapted team strength rating system",
        accuracy: 69.8,
        complexity: Complexity::Medium,
        speed: Speed::Fast,
    },
    AlgorithmInfo {
        algorithm: Algorithm::Ensemble,
        id: "ensemble",
        name: "ML Ensemble",
        description: "Weighted combination of multiple prediction algorithms",
        accuracy: 73.1,
        complexity: Complexity::High,
        speed: Speed::Slow,
    },
    AlgorithmInfo {
        algorithm: Algorithm::RandomForest,
        id: "random-forest",
        name: "Random Forest",
        description: "Decision tree ensemble with feature importance analysis",
        accuracy: 72.4,
        complexity: Complexity::High,
        speed: Speed::Slow,
    },
    AlgorithmInfo {
        algorithm: Algorithm::Seasonal,
        id: "seasonal",
        name: "Seasonal Trends",
        description: "Recent form momentum and seasonal performance patterns",
        accuracy: 66.9,
        complexity: Complexity::Medium,
        speed: Speed::Medium,
    },
];

static BY_ID: Lazy<HashMap<&'static str, Algorithm>> =
    Lazy::new(|| REGISTRY.iter().map(|info| (info.id, info.algorithm)).collect());

static ENSEMBLE_WEIGHTS: Lazy<[f64; 4]> = Lazy::new(|| {
    let raw = ENSEMBLE_MEMBERS.map(|a| a.info().accuracy);
    let total: f64 = raw.iter().sum();
    raw.map(|w| w / total)
});

/// Ensemble member weights, in `ENSEMBLE_MEMBERS` order, summing to 1.
pub fn ensemble_weights() -> &'static [f64; 4] {
    &*ENSEMBLE_WEIGHTS
}

pub trait PredictionStrategy {
    fn score(&self, m: &Match) -> PredictionResult;
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Default,
        Algorithm::AttackDefense,
        Algorithm::Poisson,
        Algorithm::Elo,
        Algorithm::Ensemble,
        Algorithm::RandomForest,
        Algorithm::Seasonal,
    ];

    pub fn info(self) -> &'static AlgorithmInfo {
        // REGISTRY rows are in declaration order.
        &REGISTRY[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn from_id(id: &str) -> Option<Self> {
        BY_ID.get(id).copied()
    }

    /// Exact id match; anything else (including no id) resolves to `Default`.
    pub fn resolve(id: Option<&str>) -> Self {
        match id {
            Some(raw) => Self::from_id(raw).unwrap_or_else(|| {
                debug!(algorithm = raw, "unknown algorithm id, using default");
                Algorithm::Default
            }),
            None => Algorithm::Default,
        }
    }

    pub fn predict(self, m: &Match) -> PredictionResult {
        match self {
            Algorithm::Default => algorithms::predict_default(m),
            Algorithm::AttackDefense => algorithms::predict_attack_defense(m),
            Algorithm::Poisson => algorithms::predict_poisson(m),
            Algorithm::Elo => algorithms::predict_elo(m),
            Algorithm::Ensemble => algorithms::predict_ensemble(m),
            Algorithm::RandomForest => algorithms::predict_random_forest(m),
            Algorithm::Seasonal => algorithms::predict_seasonal(m),
        }
    }
}

impl PredictionStrategy for Algorithm {
    fn score(&self, m: &Match) -> PredictionResult {
        self.predict(m)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Runs the algorithm named by `algorithm_id`. Never fails; unknown ids score as `default`.
pub fn predict(m: &Match, algorithm_id: &str) -> PredictionResult {
    Algorithm::resolve(Some(algorithm_id)).predict(m)
}

pub fn predict_opt(m: &Match, algorithm_id: Option<&str>) -> PredictionResult {
    Algorithm::resolve(algorithm_id).predict(m)
}
