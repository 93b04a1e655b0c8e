//! Consolidated public types for the envscan crate
//!
//! This module contains all public structs, enums, and the error type used
//! across the crate.

use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid column selection: {0}")]
    InvalidColumnSet(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EnvError>;

// ============================================================================
// Table Types
// ============================================================================

/// Column types we distinguish at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Timestamp,
    Text,
}

impl ColumnType {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Timestamp => "timestamp",
            Self::Text => "text",
        }
    }
}

/// An immutable snapshot of a tabular dataset.
///
/// Rows are stored in source order; every row has one cell per header.
/// Column types are inferred once at load time and never change for the
/// life of the snapshot. Analysis operations read the table and return
/// derived artifacts; nothing mutates it in place.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub types: Vec<ColumnType>,
}

impl Table {
    /// Get number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.headers.len()
    }

    /// Get column index by name
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get a column's raw cells as strings
    #[must_use]
    pub fn column(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.headers.len() {
            return None;
        }
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect(),
        )
    }

    /// Numeric values for a declared-numeric column, one entry per row in
    /// source order. `None` marks missing data: empty cells, cells that do
    /// not parse, and non-finite parses (NaN/inf).
    ///
    /// # Errors
    /// Returns `Schema` if the column does not exist or is not numeric.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| EnvError::Schema(format!("column '{name}' not found")))?;
        if self.types[index] != ColumnType::Numeric {
            return Err(EnvError::Schema(format!("column '{name}' is not numeric")));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| {
                row.get(index)
                    .and_then(|cell| cell.parse::<f64>().ok())
                    .filter(|v| v.is_finite())
            })
            .collect())
    }
}

// ============================================================================
// Analysis Types
// ============================================================================

/// Symmetric matrix of pairwise Pearson coefficients.
///
/// Entries are in [-1, 1], or NaN where the coefficient is undefined
/// (fewer than two paired observations, or a zero-variance column).
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    /// Column names, in the order the matrix rows/columns follow
    pub names: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Look up a coefficient by column names
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.matrix[i][j])
    }
}

/// IQR fences for one column
#[derive(Debug, Clone, Copy)]
pub struct OutlierBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

/// A row flagged by the IQR rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierRow {
    /// Index of the row in the source table
    pub row: usize,
    pub value: f64,
}

/// Outlier detection result for one column.
///
/// `rows` preserves source row order. An empty `rows` means the column was
/// analyzed and nothing fell outside the fences; a column that was never
/// analyzed has no entry in the result map at all.
#[derive(Debug, Clone)]
pub struct ColumnOutliers {
    pub bounds: OutlierBounds,
    pub rows: Vec<OutlierRow>,
}

/// Descriptive statistics for a numeric column.
///
/// Missing values are excluded everywhere; `count` is the number of observed
/// values. All float fields are NaN when `count` is 0, and `std_dev` is NaN
/// when `count` is 1 (sample standard deviation needs two observations).
#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
}

impl ColumnStats {
    /// Format as a summary string
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: n={}, mean={:.2}, std={:.2}, min={:.2}, Q1={:.2}, median={:.2}, Q3={:.2}, max={:.2}, IQR={:.2}",
            self.name, self.count, self.mean, self.std_dev, self.min, self.q1, self.median, self.q3, self.max, self.iqr
        )
    }
}

/// Shape, missing-data and uniqueness overview of a table
#[derive(Debug, Clone)]
pub struct TableProfile {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
}

#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub name: String,
    pub column_type: ColumnType,
    pub missing: usize,
    pub missing_pct: f64,
    pub distinct: usize,
    pub all_unique: bool,
}

/// A rule-derived observation about the analysis artifacts
#[derive(Debug, Clone)]
pub struct Finding {
    pub rule: String,
    pub message: String,
}

/// Everything one pipeline invocation produces from a single table snapshot
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Columns the analysis ran over, in analysis order
    pub columns: Vec<String>,
    pub correlation: CorrelationMatrix,
    pub outliers: BTreeMap<String, ColumnOutliers>,
    pub stats: BTreeMap<String, ColumnStats>,
    pub profile: TableProfile,
}
