//! Rule evaluation over computed analysis artifacts.
//!
//! Every finding is derived from the correlation matrix, the summary
//! statistics, or the outlier sets; nothing here looks at raw data or at
//! hardcoded column names.

use crate::structs::{AnalysisResult, Finding};

/// Thresholds the finding rules fire at
#[derive(Debug, Clone)]
pub struct FindingThresholds {
    /// Minimum |r| for a pair to be reported as strongly related
    pub strong_correlation: f64,
    /// Fraction of a column's observations that makes its outlier count
    /// worth reporting
    pub outlier_fraction: f64,
}

impl Default for FindingThresholds {
    fn default() -> Self {
        Self {
            strong_correlation: 0.7,
            outlier_fraction: 0.05,
        }
    }
}

/// Evaluate the reporting rules against one analysis result
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn evaluate(result: &AnalysisResult, thresholds: &FindingThresholds) -> Vec<Finding> {
    let mut findings = Vec::new();

    // Strong pairwise correlations
    let corr = &result.correlation;
    for i in 0..corr.names.len() {
        for j in (i + 1)..corr.names.len() {
            let r = corr.matrix[i][j];
            if r.is_finite() && r.abs() >= thresholds.strong_correlation {
                let direction = if r > 0.0 { "positively" } else { "inversely" };
                findings.push(Finding {
                    rule: "correlation".to_string(),
                    message: format!(
                        "{} and {} are strongly {direction} related (r = {r:.2})",
                        corr.names[i], corr.names[j]
                    ),
                });
            }
        }
    }

    // Variability ranking by coefficient of variation
    let mut ranked: Vec<(&str, f64)> = result
        .columns
        .iter()
        .filter_map(|name| {
            let s = result.stats.get(name)?;
            if s.count < 2 || s.mean == 0.0 || !s.std_dev.is_finite() {
                return None;
            }
            Some((name.as_str(), s.std_dev / s.mean.abs()))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    if ranked.len() >= 2 {
        let (most, most_cv) = ranked[0];
        let (least, least_cv) = ranked[ranked.len() - 1];
        findings.push(Finding {
            rule: "variability".to_string(),
            message: format!(
                "{most} shows the highest relative variability (cv = {most_cv:.2}); \
                 {least} is the most stable (cv = {least_cv:.2})"
            ),
        });
    }

    // Outlier concentration
    for name in &result.columns {
        let (Some(outliers), Some(stats)) = (result.outliers.get(name), result.stats.get(name))
        else {
            continue;
        };
        if stats.count == 0 || outliers.rows.is_empty() {
            continue;
        }
        let fraction = outliers.rows.len() as f64 / stats.count as f64;
        if fraction >= thresholds.outlier_fraction {
            findings.push(Finding {
                rule: "outliers".to_string(),
                message: format!(
                    "{name}: {} of {} observations fall outside [{:.2}, {:.2}]",
                    outliers.rows.len(),
                    stats.count,
                    outliers.bounds.lower,
                    outliers.bounds.upper
                ),
            });
        }
    }

    findings
}
