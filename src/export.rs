use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::batch::ScoredMatch;
use crate::model::Match;
use crate::registry::REGISTRY;

pub struct ExportReport {
    pub predictions: usize,
    pub algorithms: usize,
}

/// Writes one "Predictions" row per (match, algorithm) plus an "Algorithms" sheet.
pub fn export_predictions(path: &Path, matches: &[Match], scored: &[ScoredMatch]) -> Result<ExportReport> {
    let mut prediction_rows = vec![vec![
        "Match ID".to_string(),
        "Date".to_string(),
        "Home".to_string(),
        "Away".to_string(),
        "Algorithm".to_string(),
        "Home Win %".to_string(),
        "Draw %".to_string(),
        "Away Win %".to_string(),
        "xG Home".to_string(),
        "xG Away".to_string(),
        "Confidence".to_string(),
        "BTTS %".to_string(),
        "Over 2.5 %".to_string(),
    ]];

    for row in scored {
        let fixture = matches.iter().find(|m| m.id == row.match_id);
        let r = &row.result;
        let metrics = r.additional_metrics.as_ref();
        prediction_rows.push(vec![
            row.match_id.clone(),
            fixture.map(|m| m.date.clone()).unwrap_or_default(),
            fixture.map(|m| m.home_team.short_name.clone()).unwrap_or_default(),
            fixture.map(|m| m.away_team.short_name.clone()).unwrap_or_default(),
            r.algorithm.clone(),
            format!("{:.1}", r.home_win_probability),
            format!("{:.1}", r.draw_probability),
            format!("{:.1}", r.away_win_probability),
            format!("{:.1}", r.expected_goals.home),
            format!("{:.1}", r.expected_goals.away),
            format!("{:.2}", r.confidence),
            opt_to_string(metrics.and_then(|m| m.both_teams_score)),
            opt_to_string(metrics.and_then(|m| m.total_goals_over25)),
        ]);
    }

    let mut algorithm_rows = vec![vec![
        "ID".to_string(),
        "Name".to_string(),
        "Description".to_string(),
        "Accuracy %".to_string(),
        "Complexity".to_string(),
        "Speed".to_string(),
    ]];
    for info in REGISTRY.iter() {
        algorithm_rows.push(vec![
            info.id.to_string(),
            info.name.to_string(),
            info.description.to_string(),
            format!("{:.1}", info.accuracy),
            format!("{:?}", info.complexity),
            format!("{:?}", info.speed),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Predictions")?;
        write_rows(sheet, &prediction_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Algorithms")?;
        write_rows(sheet, &algorithm_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        predictions: prediction_rows.len().saturating_sub(1),
        algorithms: algorithm_rows.len().saturating_sub(1),
    })
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
