use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use winmix::config::{self, Config};
use winmix::{batch, catalog, export, store};

fn main() -> Result<()> {
    config::init_logging();
    let cfg = Config::load();

    let out = config::arg_value("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("winmix_predictions.xlsx"));

    let matches = match config::arg_value("db").map(PathBuf::from) {
        Some(path) => {
            let conn = store::open_db(&path)?;
            store::load_matches(&conn, config::has_flag("finished"))?
        }
        None => catalog::upcoming_matches(),
    };
    info!(matches = matches.len(), threads = cfg.parallelism, "scoring fixtures");

    let scored = batch::predict_all_algorithms(&matches, cfg.parallelism);
    let report = export::export_predictions(&out, &matches, &scored)?;

    println!("Export complete");
    println!("File: {}", out.display());
    println!("Predictions: {}", report.predictions);
    println!("Algorithms: {}", report.algorithms);
    Ok(())
}
