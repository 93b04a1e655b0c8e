//! Report writers for the analyze phase.
//!
//! Writers are a consumer layer: they format what the pipeline computed and
//! do no analysis of their own.

use crate::structs::{AnalysisResult, ColumnOutliers, CorrelationMatrix, Finding, Result, Table};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Build the `summary.txt` content: profile, statistics, outliers, findings
pub fn build_summary(
    csv_path: &Path,
    table: &Table,
    result: &AnalysisResult,
    findings: &[Finding],
) -> String {
    use std::fmt::Write as _;

    let mut out = format!("Analysis of {}\n\n", csv_path.display());
    out.push_str(&result.profile.render());

    let _ = writeln!(out, "\nAnalyzed columns: {}", result.columns.join(", "));

    out.push_str("\nColumn statistics:\n");
    for name in &result.columns {
        if let Some(stats) = result.stats.get(name) {
            let _ = writeln!(out, "  {}", stats.summary());
        }
    }

    out.push_str("\nOutliers (IQR rule):\n");
    for name in &result.columns {
        if let Some(col) = result.outliers.get(name) {
            if col.rows.is_empty() {
                let _ = writeln!(out, "  {name}: none");
            } else {
                let _ = writeln!(
                    out,
                    "  {name}: {} rows outside [{:.2}, {:.2}]",
                    col.rows.len(),
                    col.bounds.lower,
                    col.bounds.upper
                );
            }
        }
    }

    if !findings.is_empty() {
        out.push_str("\nFindings:\n");
        for finding in findings {
            let _ = writeln!(out, "  - {}", finding.message);
        }
    }

    let _ = writeln!(
        out,
        "\nSource: {} rows x {} columns",
        table.row_count(),
        table.col_count()
    );

    out
}

/// Write `summary.txt` - human readable overview
///
/// # Errors
/// Returns error if file cannot be written
pub fn write_summary(output_dir: &Path, content: &str) -> Result<()> {
    let path = output_dir.join("summary.txt");
    fs::write(path, content)?;
    Ok(())
}

/// Write `correlation.csv` - the full matrix with a name header row/column
///
/// # Errors
/// Returns error if file cannot be written
pub fn write_correlation(output_dir: &Path, corr: &CorrelationMatrix) -> Result<()> {
    use std::fmt::Write as _;

    let path = output_dir.join("correlation.csv");
    let mut content = String::new();
    let _ = writeln!(content, ",{}", corr.names.join(","));

    for (name, row) in corr.names.iter().zip(&corr.matrix) {
        let cells: Vec<String> = row.iter().map(|r| format!("{r:.4}")).collect();
        let _ = writeln!(content, "{name},{}", cells.join(","));
    }

    fs::write(path, content)?;
    Ok(())
}

/// Write `outliers.csv` - flagged rows per column with their fences
///
/// # Errors
/// Returns error if file cannot be written
pub fn write_outliers(
    output_dir: &Path,
    outliers: &BTreeMap<String, ColumnOutliers>,
) -> Result<()> {
    use std::fmt::Write as _;

    let path = output_dir.join("outliers.csv");
    let mut content = String::from("column,row,value,lower_bound,upper_bound\n");

    for (name, col) in outliers {
        for flagged in &col.rows {
            let _ = writeln!(
                content,
                "{name},{},{},{:.4},{:.4}",
                flagged.row, flagged.value, col.bounds.lower, col.bounds.upper
            );
        }
    }

    fs::write(path, content)?;
    Ok(())
}

/// Write `stats.json` - machine-readable analysis result
///
/// # Errors
/// Returns error if serialization fails or file cannot be written
pub fn write_stats_json(output_dir: &Path, table: &Table, result: &AnalysisResult) -> Result<()> {
    let path = output_dir.join("stats.json");

    let statistics: Vec<StatsEntry> = result
        .columns
        .iter()
        .filter_map(|name| result.stats.get(name))
        .map(|s| StatsEntry {
            name: s.name.clone(),
            count: s.count,
            mean: s.mean,
            std_dev: s.std_dev,
            min: s.min,
            max: s.max,
            q1: s.q1,
            median: s.median,
            q3: s.q3,
            iqr: s.iqr,
        })
        .collect();

    let outliers: Vec<OutlierEntry> = result
        .columns
        .iter()
        .filter_map(|name| result.outliers.get(name).map(|col| (name, col)))
        .map(|(name, col)| OutlierEntry {
            column: name.clone(),
            lower_bound: col.bounds.lower,
            upper_bound: col.bounds.upper,
            rows: col
                .rows
                .iter()
                .map(|o| OutlierRowEntry {
                    row: o.row,
                    value: o.value,
                })
                .collect(),
        })
        .collect();

    let output = ReportOutput {
        row_count: table.row_count(),
        column_count: table.col_count(),
        columns: table.headers.clone(),
        analyzed: result.columns.clone(),
        statistics,
        outliers,
        correlation: CorrelationEntry {
            names: result.correlation.names.clone(),
            matrix: result.correlation.matrix.clone(),
        },
    };

    let json = serde_json::to_string_pretty(&output)?;
    fs::write(path, json)?;
    Ok(())
}

// JSON output structures

#[derive(Serialize)]
struct ReportOutput {
    row_count: usize,
    column_count: usize,
    columns: Vec<String>,
    analyzed: Vec<String>,
    statistics: Vec<StatsEntry>,
    outliers: Vec<OutlierEntry>,
    correlation: CorrelationEntry,
}

#[derive(Serialize)]
struct StatsEntry {
    name: String,
    count: usize,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
    q1: f64,
    median: f64,
    q3: f64,
    iqr: f64,
}

#[derive(Serialize)]
struct OutlierEntry {
    column: String,
    lower_bound: f64,
    upper_bound: f64,
    rows: Vec<OutlierRowEntry>,
}

#[derive(Serialize)]
struct OutlierRowEntry {
    row: usize,
    value: f64,
}

#[derive(Serialize)]
struct CorrelationEntry {
    names: Vec<String>,
    matrix: Vec<Vec<f64>>,
}
