pub mod algorithms;
pub mod batch;
pub mod calibration;
pub mod catalog;
pub mod config;
pub mod export;
pub mod math;
pub mod model;
pub mod registry;
pub mod store;

pub use algorithms::{
    predict_attack_defense, predict_default, predict_elo, predict_ensemble, predict_poisson,
    predict_random_forest, predict_seasonal,
};
pub use model::{AdditionalMetrics, ExpectedGoals, Match, PredictionResult, Team, TeamStats};
pub use registry::{Algorithm, AlgorithmInfo, PredictionStrategy, predict, predict_opt};
