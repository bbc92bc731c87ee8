use std::path::PathBuf;

use anyhow::{Result, anyhow};

use winmix::calibration;
use winmix::config::{self, Config};
use winmix::store;

fn main() -> Result<()> {
    config::init_logging();
    let cfg = Config::load();

    let db_path =
        store::resolve_db_path(config::arg_value("db").map(PathBuf::from), cfg.db_path.clone())?;
    let conn = store::open_db(&db_path)?;
    let matches = store::load_matches(&conn, true)?;
    if matches.is_empty() {
        return Err(anyhow!(
            "no finished matches in {} (run migrate --import-json first)",
            db_path.display()
        ));
    }

    println!("Backtest over {} finished matches", matches.len());
    println!(
        "{:<26} {:>7} {:>8} {:>9} {:>9}",
        "algorithm", "samples", "brier", "log_loss", "accuracy"
    );
    let mut reports = calibration::evaluate_all(&matches);
    reports.sort_by(|a, b| a.metrics.brier.total_cmp(&b.metrics.brier));
    for report in &reports {
        let m = report.metrics;
        println!(
            "{:<26} {:>7} {:>8.4} {:>9.4} {:>8.1}%",
            report.algorithm.name(),
            m.samples,
            m.brier,
            m.log_loss,
            m.accuracy * 100.0
        );
    }

    if config::has_flag("bins") {
        for report in &reports {
            println!();
            println!("{} home-win calibration", report.algorithm.name());
            for bin in &report.home_bins {
                if bin.count == 0 {
                    continue;
                }
                println!(
                    "  {:.1}-{:.1}: n={} pred={:.3} actual={:.3}",
                    bin.bucket_start, bin.bucket_end, bin.count, bin.avg_pred, bin.actual_rate
                );
            }
        }
    }

    Ok(())
}
