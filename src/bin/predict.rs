use std::path::PathBuf;

use anyhow::{Context, Result};

use winmix::config::{self, Config};
use winmix::model::{Match, PredictionResult};
use winmix::registry::Algorithm;
use winmix::{catalog, store};

fn main() -> Result<()> {
    config::init_logging();
    let cfg = Config::load();

    let home = config::arg_value("home").unwrap_or_else(|| "arsenal".to_string());
    let away = config::arg_value("away").unwrap_or_else(|| "chelsea".to_string());
    let fixture = load_fixture(&cfg, &home, &away)?;

    println!(
        "{} vs {}",
        fixture.home_team.name, fixture.away_team.name
    );

    if config::has_flag("all") {
        for algorithm in Algorithm::ALL {
            print_prediction(&algorithm.predict(&fixture));
        }
        return Ok(());
    }

    let algorithm = match config::arg_value("algorithm") {
        Some(id) => Algorithm::resolve(Some(&id)),
        None => cfg.algorithm,
    };
    let result = algorithm.predict(&fixture);
    if config::has_flag("json") {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("serialize prediction")?
        );
    } else {
        print_prediction(&result);
    }
    Ok(())
}

/// Teams come from the database when one exists, the built-in catalog otherwise.
fn load_fixture(cfg: &Config, home: &str, away: &str) -> Result<Match> {
    let db_path = config::arg_value("db")
        .map(PathBuf::from)
        .or_else(|| cfg.db_path.clone())
        .filter(|path| path.exists());
    match db_path {
        Some(path) if !config::has_flag("catalog") => {
            let conn = store::open_db(&path)?;
            store::fixture(&conn, home, away)
                .with_context(|| format!("load fixture from {}", path.display()))
        }
        _ => catalog::fixture(home, away),
    }
}

fn print_prediction(p: &PredictionResult) {
    println!();
    println!("[{}]", p.algorithm);
    println!("Home: {:.1}%", p.home_win_probability);
    println!("Draw: {:.1}%", p.draw_probability);
    println!("Away: {:.1}%", p.away_win_probability);
    println!(
        "xG: {:.1} - {:.1}",
        p.expected_goals.home, p.expected_goals.away
    );
    println!("Confidence: {:.0}%", p.confidence * 100.0);
    if let Some(metrics) = &p.additional_metrics {
        if let Some(btts) = metrics.both_teams_score {
            println!("Both teams score: {btts:.1}%");
        }
        if let Some(over) = metrics.total_goals_over25 {
            println!("Over 2.5 goals: {over:.1}%");
        }
        if let Some(scores) = &metrics.correct_score_probabilities {
            let mut rows = scores.iter().collect::<Vec<_>>();
            rows.sort_by(|a, b| b.1.total_cmp(a.1));
            for (score, share) in rows {
                println!("  {score}: {share:.1}%");
            }
        }
    }
}
