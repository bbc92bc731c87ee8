use std::collections::BTreeMap;

use crate::model::FORM_LEN;

/// Recency weights for `momentum`, oldest result first.
pub const MOMENTUM_WEIGHTS: [f64; FORM_LEN] = [0.1, 0.15, 0.2, 0.25, 0.3];

/// Rounds to one decimal, halves going up (towards +inf) rather than away from zero.
pub fn round1(v: f64) -> f64 {
    (v * 10.0 + 0.5).floor() / 10.0
}

pub fn form_sum(form: &[f64; FORM_LEN]) -> f64 {
    form.iter().sum()
}

pub fn momentum(form: &[f64; FORM_LEN]) -> f64 {
    form.iter()
        .zip(MOMENTUM_WEIGHTS.iter())
        .map(|(r, w)| r * w)
        .sum()
}

/// Scales three shares into percentages summing to 100.
pub fn normalize3(home: f64, draw: f64, away: f64) -> (f64, f64, f64) {
    let total = home + draw + away;
    (home / total * 100.0, draw / total * 100.0, away / total * 100.0)
}

/// Treats zero (or NaN) as a neutral 1.0 multiplier.
pub fn or_one(v: f64) -> f64 {
    if v == 0.0 || v.is_nan() { 1.0 } else { v }
}

/// P(X >= 3) for X ~ Poisson(lambda), as a fraction.
pub fn over_25_probability(lambda: f64) -> f64 {
    1.0 - (-lambda).exp() * (1.0 + lambda + lambda * lambda / 2.0)
}

/// Percentage chance neither side is held scoreless under independent Poisson marginals,
/// i.e. 100 * (1 - P(home = 0) * P(away = 0)).
pub fn both_teams_score_probability(home_expected: f64, away_expected: f64) -> f64 {
    (1.0 - (-home_expected).exp() * (-away_expected).exp()) * 100.0
}

/// Fixed scoreline table seeded by the most likely score. Later keys overwrite earlier ones.
pub fn correct_score_table(home_expected: f64, away_expected: f64) -> BTreeMap<String, f64> {
    let h = js_round(home_expected);
    let a = js_round(away_expected);
    let key = |home: f64, away: f64| format!("{}-{}", goal_label(home), goal_label(away));

    let mut out = BTreeMap::new();
    out.insert(key(h, a), 12.5);
    out.insert(key(h + 1.0, a), 8.2);
    out.insert(key(h, a + 1.0), 7.8);
    out.insert("1-1".to_string(), 11.2);
    out.insert("2-1".to_string(), 9.5);
    out.insert("1-2".to_string(), 8.1);
    out
}

/// Round half up, staying in `f64` so NaN and infinities pass through.
fn js_round(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Scoreline label for a rounded goal count; non-finite counts read `NaN` or `Infinity`.
fn goal_label(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_goes_half_up() {
        assert_eq!(round1(62.0155), 62.0);
        assert_eq!(round1(22.45), 22.5);
        assert_eq!(round1(-0.25), -0.2);
    }

    #[test]
    fn momentum_weights_recent_results_highest() {
        let m = momentum(&[1.0, 1.0, 0.5, 1.0, 1.0]);
        assert!((m - 0.9).abs() < 1e-12);

        let late = momentum(&[0.0, 0.0, 0.0, 0.0, 1.0]);
        let early = momentum(&[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(late > early);
    }

    #[test]
    fn over_25_matches_poisson_tail() {
        let lambda: f64 = 2.7;
        let p0 = (-lambda).exp();
        let tail = 1.0 - p0 - p0 * lambda - p0 * lambda.powi(2) / 2.0;
        assert!((over_25_probability(lambda) - tail).abs() < 1e-12);
        assert_eq!(over_25_probability(0.0), 0.0);
    }

    #[test]
    fn both_teams_score_is_zero_without_goals() {
        assert_eq!(both_teams_score_probability(0.0, 0.0), 0.0);
        let p = both_teams_score_probability(1.5, 1.2);
        assert!((p - (1.0 - (-2.7f64).exp()) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn correct_score_table_later_keys_win() {
        let table = correct_score_table(1.2, 0.6);
        // Most likely 1-1 is overwritten by the fixed "1-1" entry.
        assert_eq!(table.get("1-1"), Some(&11.2));
        assert_eq!(table.get("2-1"), Some(&9.5));
        assert_eq!(table.get("1-2"), Some(&8.1));
        assert_eq!(table.len(), 3);

        let table = correct_score_table(2.6, 0.4);
        assert_eq!(table.get("3-0"), Some(&12.5));
        assert_eq!(table.get("4-0"), Some(&8.2));
        assert_eq!(table.get("3-1"), Some(&7.8));
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn correct_score_table_labels_non_finite_rates() {
        let table = correct_score_table(f64::NAN, 0.6);
        // NaN + 1 is still NaN, so the home-plus-one entry lands on the same key.
        assert_eq!(table.get("NaN-1"), Some(&8.2));
        assert_eq!(table.get("NaN-2"), Some(&7.8));
        assert!(table.keys().all(|k| !k.starts_with("0-")));
        assert_eq!(table.len(), 5);

        let table = correct_score_table(f64::INFINITY, 1.0);
        assert_eq!(table.get("Infinity-1"), Some(&8.2));
        assert_eq!(table.get("Infinity-2"), Some(&7.8));
        assert_eq!(table.len(), 5);

        let table = correct_score_table(f64::INFINITY, f64::NAN);
        assert_eq!(table.get("Infinity-NaN"), Some(&7.8));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn or_one_replaces_zero_only() {
        assert_eq!(or_one(0.0), 1.0);
        assert_eq!(or_one(f64::NAN), 1.0);
        assert_eq!(or_one(0.8), 0.8);
    }
}
