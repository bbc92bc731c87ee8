//! Back-testing: how well each algorithm's outcome split matches finished results.

use crate::model::{Match, PredictionResult};
use crate::registry::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prob3 {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub samples: usize,
    pub brier: f64,
    pub log_loss: f64,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CalibrationBin {
    pub bucket_start: f64,
    pub bucket_end: f64,
    pub count: usize,
    pub avg_pred: f64,
    pub actual_rate: f64,
}

#[derive(Debug, Clone)]
pub struct AlgorithmReport {
    pub algorithm: Algorithm,
    pub metrics: Metrics,
    pub home_bins: Vec<CalibrationBin>,
}

impl Prob3 {
    pub fn uniform() -> Self {
        Self {
            home: 1.0 / 3.0,
            draw: 1.0 / 3.0,
            away: 1.0 / 3.0,
        }
    }

    pub fn certain(outcome: Outcome) -> Self {
        let hit = |o: Outcome| if o == outcome { 1.0 } else { 0.0 };
        Self {
            home: hit(Outcome::Home),
            draw: hit(Outcome::Draw),
            away: hit(Outcome::Away),
        }
    }

    /// Turns reported percentages into a distribution. Negative or non-finite shares
    /// count as zero; a trio with nothing left becomes uniform.
    pub fn from_prediction(p: &PredictionResult) -> Self {
        let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let home = clean(p.home_win_probability);
        let draw = clean(p.draw_probability);
        let away = clean(p.away_win_probability);
        let sum = home + draw + away;
        if sum <= 0.0 {
            return Self::uniform();
        }
        Self {
            home: home / sum,
            draw: draw / sum,
            away: away / sum,
        }
    }

    pub fn of(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }

    /// Most likely outcome; ties go home first, then away.
    pub fn favourite(&self) -> Outcome {
        if self.home >= self.draw && self.home >= self.away {
            Outcome::Home
        } else if self.away >= self.draw {
            Outcome::Away
        } else {
            Outcome::Draw
        }
    }

    fn squared_error(&self, outcome: Outcome) -> f64 {
        let actual = Self::certain(outcome);
        OUTCOMES
            .iter()
            .map(|&o| (self.of(o) - actual.of(o)).powi(2))
            .sum()
    }
}

const OUTCOMES: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

impl Metrics {
    fn empty() -> Self {
        Self {
            samples: 0,
            brier: 0.0,
            log_loss: 0.0,
            accuracy: 0.0,
        }
    }
}

pub fn classify_outcome(home_goals: u32, away_goals: u32) -> Outcome {
    match home_goals.cmp(&away_goals) {
        std::cmp::Ordering::Greater => Outcome::Home,
        std::cmp::Ordering::Less => Outcome::Away,
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

/// Mean Brier score, log-loss and hit rate. Mismatched or empty inputs score as empty.
pub fn evaluate_probs(predictions: &[Prob3], outcomes: &[Outcome]) -> Metrics {
    if predictions.is_empty() || predictions.len() != outcomes.len() {
        return Metrics::empty();
    }

    let (brier, log_loss, hits) = predictions.iter().zip(outcomes).fold(
        (0.0_f64, 0.0_f64, 0usize),
        |(brier, log_loss, hits), (p, &outcome)| {
            let assigned = p.of(outcome).clamp(1e-12, 1.0);
            (
                brier + p.squared_error(outcome),
                log_loss - assigned.ln(),
                hits + usize::from(p.favourite() == outcome),
            )
        },
    );

    let n = predictions.len() as f64;
    Metrics {
        samples: predictions.len(),
        brier: brier / n,
        log_loss: log_loss / n,
        accuracy: hits as f64 / n,
    }
}

/// Buckets the predicted probability of `class` into `bins` equal-width bins and
/// reports how often `class` actually happened in each.
pub fn calibration_bins(
    predictions: &[Prob3],
    outcomes: &[Outcome],
    class: Outcome,
    bins: usize,
) -> Vec<CalibrationBin> {
    let width = 1.0 / bins.max(2) as f64;
    let mut out: Vec<CalibrationBin> = (0..bins.max(2))
        .map(|i| CalibrationBin {
            bucket_start: i as f64 * width,
            bucket_end: (i + 1) as f64 * width,
            count: 0,
            avg_pred: 0.0,
            actual_rate: 0.0,
        })
        .collect();
    let last = out.len() - 1;

    for (p, &outcome) in predictions.iter().zip(outcomes) {
        let prob = p.of(class).clamp(0.0, 1.0);
        let bin = &mut out[((prob / width) as usize).min(last)];
        bin.count += 1;
        bin.avg_pred += prob;
        if outcome == class {
            bin.actual_rate += 1.0;
        }
    }

    for bin in out.iter_mut().filter(|b| b.count > 0) {
        bin.avg_pred /= bin.count as f64;
        bin.actual_rate /= bin.count as f64;
    }
    out
}

/// Scores `algorithm` over every finished match with a known score; others are skipped.
pub fn evaluate_algorithm(matches: &[Match], algorithm: Algorithm) -> AlgorithmReport {
    let (predictions, outcomes): (Vec<Prob3>, Vec<Outcome>) = matches
        .iter()
        .filter_map(|m| {
            let (home_goals, away_goals) = m.final_score()?;
            Some((
                Prob3::from_prediction(&algorithm.predict(m)),
                classify_outcome(home_goals, away_goals),
            ))
        })
        .unzip();

    AlgorithmReport {
        algorithm,
        metrics: evaluate_probs(&predictions, &outcomes),
        home_bins: calibration_bins(&predictions, &outcomes, Outcome::Home, 5),
    }
}

pub fn evaluate_all(matches: &[Match]) -> Vec<AlgorithmReport> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| evaluate_algorithm(matches, algorithm))
        .collect()
}
