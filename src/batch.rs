//! Parallel scoring of many fixtures. Every call is independent, so matches are
//! simply fanned out over a rayon pool.

use rayon::prelude::*;

use crate::model::{Match, PredictionResult};
use crate::registry::Algorithm;

#[derive(Debug, Clone)]
pub struct ScoredMatch {
    pub match_id: String,
    pub algorithm: Algorithm,
    pub result: PredictionResult,
}

/// Scores each match with one algorithm. Output keeps input order.
pub fn predict_batch(matches: &[Match], algorithm: Algorithm, parallelism: usize) -> Vec<PredictionResult> {
    with_pool(parallelism, || {
        matches.par_iter().map(|m| algorithm.predict(m)).collect()
    })
}

/// Scores each match with every registered algorithm, match-major.
pub fn predict_all_algorithms(matches: &[Match], parallelism: usize) -> Vec<ScoredMatch> {
    with_pool(parallelism, || {
        matches
            .par_iter()
            .flat_map_iter(|m| {
                Algorithm::ALL.into_iter().map(move |algorithm| ScoredMatch {
                    match_id: m.id.clone(),
                    algorithm,
                    result: algorithm.predict(m),
                })
            })
            .collect()
    })
}

fn with_pool<T>(threads: usize, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
    {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}
