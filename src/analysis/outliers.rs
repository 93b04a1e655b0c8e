//! IQR-rule outlier detection

use crate::analysis::stats::percentile;
use crate::structs::{ColumnOutliers, EnvError, OutlierBounds, OutlierRow, Result, Table};
use std::collections::BTreeMap;

/// Fence multiplier from the classic boxplot rule
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Detect outliers per column, independently, against one table snapshot.
///
/// For each column: Q1 and Q3 come from linear interpolation over the sorted
/// observed values, the fences are `Q1 - multiplier * IQR` and
/// `Q3 + multiplier * IQR`, and a row is flagged iff its value is observed
/// and strictly outside the fences. Missing values are never flagged.
/// Flagged rows preserve source row order.
///
/// Fewer than 4 observed values get no special casing: a degenerate IQR of 0
/// collapses the fences to a point, and any differing value is flagged. That
/// is the intended reading of the rule, not an edge case to paper over.
///
/// # Errors
/// Returns `InvalidColumnSet` for an empty selection, `Schema` if a name is
/// absent or not numeric
pub fn detect_outliers(
    table: &Table,
    columns: &[String],
    multiplier: f64,
) -> Result<BTreeMap<String, ColumnOutliers>> {
    if columns.is_empty() {
        return Err(EnvError::InvalidColumnSet(
            "no columns selected for outlier detection".into(),
        ));
    }

    let mut result = BTreeMap::new();
    for name in columns {
        let values = table.numeric_values(name)?;
        result.insert(name.clone(), detect_column(&values, multiplier));
    }
    Ok(result)
}

fn detect_column(values: &[Option<f64>], multiplier: f64) -> ColumnOutliers {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;
    let bounds = OutlierBounds {
        q1,
        q3,
        lower: q1 - multiplier * iqr,
        upper: q3 + multiplier * iqr,
    };

    // NaN bounds (empty column) compare false, so nothing gets flagged
    let rows = values
        .iter()
        .enumerate()
        .filter_map(|(row, v)| v.map(|value| OutlierRow { row, value }))
        .filter(|o| o.value < bounds.lower || o.value > bounds.upper)
        .collect();

    ColumnOutliers { bounds, rows }
}
