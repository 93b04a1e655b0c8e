//! Analysis pipeline that sequences classification, correlation, outlier
//! detection and summary statistics over one table snapshot

use crate::structs::{AnalysisResult, EnvError, Result, Table};

/// Configuration for the analysis pipeline.
///
/// These used to live as literals inside the analysis steps; naming them
/// here lets callers swap thresholds without touching the components.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Columns never offered for analysis (identifier columns and the like)
    pub excluded: Vec<String>,
    /// IQR fence multiplier
    pub iqr_multiplier: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            excluded: vec!["ID".to_string()],
            iqr_multiplier: super::outliers::DEFAULT_IQR_MULTIPLIER,
        }
    }
}

/// Run the full analysis over one immutable table snapshot.
///
/// `selected` narrows the analysis to specific columns; every selected name
/// must be one of the classifier's numeric columns. An empty `selected`
/// analyzes all of them. Correlation, outliers and statistics are all
/// computed against the same snapshot and the same column list.
///
/// # Errors
/// Returns `Schema` for unknown or non-numeric selections,
/// `InvalidColumnSet` when no analyzable columns remain
pub fn run_pipeline(
    table: &Table,
    selected: &[String],
    config: &AnalysisConfig,
) -> Result<AnalysisResult> {
    let numeric = super::classify::numerical_columns(table, &config.excluded)?;

    let columns = if selected.is_empty() {
        numeric
    } else {
        for name in selected {
            if !numeric.contains(name) {
                return Err(EnvError::Schema(format!(
                    "selected column '{name}' is not an analyzable numeric column"
                )));
            }
        }
        selected.to_vec()
    };

    let correlation = super::correlation::correlation_matrix(table, &columns)?;
    let outliers = super::outliers::detect_outliers(table, &columns, config.iqr_multiplier)?;
    let stats = super::stats::summarize(table, &columns)?;
    let profile = super::profile::profile(table);

    Ok(AnalysisResult {
        columns,
        correlation,
        outliers,
        stats,
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sensor_table() -> Table {
        let content = "ID,Datetime,Temperature,Humidity,PM2.5\n\
                       1,2024-03-01 00:00:00,21.5,48.2,12.0\n\
                       2,2024-03-01 01:00:00,21.9,47.6,14.0\n\
                       3,2024-03-01 02:00:00,22.4,46.9,13.0\n\
                       4,2024-03-01 03:00:00,22.9,46.1,15.0\n\
                       5,2024-03-01 04:00:00,23.3,45.4,260.0";
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content.as_bytes()).expect("write content");
        Table::from_file(file.path(), false).expect("parse csv")
    }

    #[test]
    fn test_full_pipeline() {
        let table = sensor_table();
        let result = run_pipeline(&table, &[], &AnalysisConfig::default()).expect("pipeline");

        assert_eq!(result.columns, vec!["Temperature", "Humidity", "PM2.5"]);
        // Every artifact covers exactly the analyzed columns
        assert_eq!(result.correlation.names, result.columns);
        for name in &result.columns {
            assert!(result.outliers.contains_key(name));
            assert!(result.stats.contains_key(name));
        }
        // Temperature rises while humidity falls
        assert!(result.correlation.get("Temperature", "Humidity").unwrap() < -0.9);
        // The particulate spike is the only flagged row
        assert_eq!(result.outliers["PM2.5"].rows.len(), 1);
        assert_eq!(result.outliers["PM2.5"].rows[0].row, 4);
        assert!(result.outliers["Temperature"].rows.is_empty());
        assert_eq!(result.profile.row_count, 5);
    }

    #[test]
    fn test_selected_columns_narrow_the_run() {
        let table = sensor_table();
        let selected = vec!["Temperature".to_string(), "Humidity".to_string()];
        let result =
            run_pipeline(&table, &selected, &AnalysisConfig::default()).expect("pipeline");

        assert_eq!(result.columns, selected);
        assert!(!result.stats.contains_key("PM2.5"));
    }

    #[test]
    fn test_selected_column_must_be_numeric() {
        let table = sensor_table();
        let selected = vec!["Datetime".to_string()];
        let err = run_pipeline(&table, &selected, &AnalysisConfig::default()).unwrap_err();

        assert!(matches!(err, EnvError::Schema(_)));
    }

    #[test]
    fn test_excluded_column_cannot_be_selected() {
        let table = sensor_table();
        let selected = vec!["ID".to_string()];
        let err = run_pipeline(&table, &selected, &AnalysisConfig::default()).unwrap_err();

        assert!(matches!(err, EnvError::Schema(_)));
    }

    #[test]
    fn test_unknown_exclusion_aborts() {
        let table = sensor_table();
        let config = AnalysisConfig {
            excluded: vec!["RowId".to_string()],
            ..AnalysisConfig::default()
        };
        let err = run_pipeline(&table, &[], &config).unwrap_err();

        assert!(matches!(err, EnvError::Schema(_)));
    }
}
