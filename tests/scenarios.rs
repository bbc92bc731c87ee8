use winmix::algorithms::random_forest::{Features, elo_tree};
use winmix::math::{momentum, normalize3, round1};
use winmix::registry::{Algorithm, ensemble_weights};
use winmix::{
    PredictionResult, PredictionStrategy, catalog, predict_attack_defense, predict_default, predict_elo,
    predict_ensemble, predict_poisson,
};

#[test]
fn default_reference_fixture() {
    let m = catalog::fixture("arsenal", "chelsea").expect("catalog fixture");
    let p = predict_default(&m);
    assert_eq!(p.home_win_probability, 62.0);
    assert_eq!(p.away_win_probability, 15.5);
    assert_eq!(p.draw_probability, 22.5);
    assert_eq!(p.algorithm, "Default (Form + H2H)");
}

#[test]
fn elo_reference_fixture() {
    let m = catalog::fixture("arsenal", "chelsea").expect("catalog fixture");
    let p = predict_elo(&m);
    let expected_home = 1.0 / (1.0 + 10f64.powf(-120.0 / 400.0));
    assert_eq!(p.home_win_probability, round1(expected_home * 100.0));
    assert_eq!(p.draw_probability, 19.0);
    assert_eq!(
        p.away_win_probability,
        round1((1.0 - expected_home - 0.19) * 100.0)
    );
}

#[test]
fn momentum_of_arsenal_form() {
    let arsenal = catalog::find_team("arsenal").expect("catalog team");
    assert!((momentum(&arsenal.form) - 0.9).abs() < 1e-12);
}

#[test]
fn elo_tree_falls_through_for_small_gaps() {
    let m = catalog::fixture("arsenal", "chelsea").expect("catalog fixture");
    let f = Features::from_match(&m);
    assert_eq!(f.elo_diff, 70.0);
    assert_eq!(elo_tree(&f), (0.4, 0.3, 0.3));
}

fn blend(members: &[PredictionResult; 4], field: impl Fn(&PredictionResult) -> f64) -> f64 {
    members
        .iter()
        .zip(ensemble_weights().iter())
        .map(|(r, w)| field(r) * w)
        .sum()
}

#[test]
fn ensemble_is_the_documented_blend() {
    for m in catalog::upcoming_matches() {
        let members = [
            predict_default(&m),
            predict_attack_defense(&m),
            predict_poisson(&m),
            predict_elo(&m),
        ];
        let (h, d, a) = normalize3(
            blend(&members, |r| r.home_win_probability),
            blend(&members, |r| r.draw_probability),
            blend(&members, |r| r.away_win_probability),
        );

        let p = predict_ensemble(&m);
        assert_eq!(p.home_win_probability, round1(h));
        assert_eq!(p.draw_probability, round1(d));
        assert_eq!(p.away_win_probability, round1(a));
        assert_eq!(p.expected_goals.home, round1(blend(&members, |r| r.expected_goals.home)));
        assert_eq!(p.expected_goals.away, round1(blend(&members, |r| r.expected_goals.away)));
        assert_eq!(p.confidence, 0.73);

        // Poisson's reported BTTS is itself rounded, so the blend may differ by a tenth.
        let btts = (members[2].both_teams_score().unwrap() + members[1].both_teams_score().unwrap()) / 2.0;
        assert!((p.both_teams_score().unwrap() - round1(btts)).abs() <= 0.1 + 1e-9);
    }
}

#[test]
fn ensemble_weights_are_accuracy_shares() {
    let total = 68.5 + 65.2 + 71.3 + 69.8;
    let expected = [68.5 / total, 65.2 / total, 71.3 / total, 69.8 / total];
    for (w, e) in ensemble_weights().iter().zip(expected) {
        assert!((w - e).abs() < 1e-12);
    }
}

#[test]
fn strategy_trait_matches_enum_dispatch() {
    let m = catalog::fixture("tottenham", "manchester-united").expect("catalog fixture");
    let strategies: Vec<Box<dyn PredictionStrategy>> =
        Algorithm::ALL.into_iter().map(|a| Box::new(a) as Box<dyn PredictionStrategy>).collect();
    for (strategy, algorithm) in strategies.iter().zip(Algorithm::ALL) {
        assert_eq!(strategy.score(&m), algorithm.predict(&m));
    }
}
