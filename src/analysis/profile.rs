//! Dataset profiling: shape, missing data, uniqueness

use crate::structs::{ColumnProfile, Table, TableProfile};
use std::collections::HashSet;

/// Profile a table snapshot: per-column missing counts and percentages,
/// distinct counts, and whether a column's observed values are all unique
/// (the usual sanity check on identifier and timestamp columns).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn profile(table: &Table) -> TableProfile {
    let row_count = table.row_count();

    let columns = table
        .headers
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let cells = table.column(index).unwrap_or_default();
            let missing = cells.iter().filter(|s| s.is_empty()).count();
            let distinct = cells
                .iter()
                .filter(|s| !s.is_empty())
                .collect::<HashSet<_>>()
                .len();
            let missing_pct = if row_count == 0 {
                0.0
            } else {
                missing as f64 / row_count as f64 * 100.0
            };

            ColumnProfile {
                name: name.clone(),
                column_type: table.types[index],
                missing,
                missing_pct,
                distinct,
                all_unique: missing == 0 && distinct == row_count,
            }
        })
        .collect();

    TableProfile {
        row_count,
        column_count: table.col_count(),
        columns,
    }
}

impl TableProfile {
    /// Render the profile as a text block
    #[must_use]
    pub fn render(&self) -> String {
        use std::fmt::Write as _;

        let mut out = format!(
            "{} rows x {} columns\n\n",
            self.row_count, self.column_count
        );
        for col in &self.columns {
            let _ = writeln!(
                out,
                "{} ({}): {} missing ({:.1}%), {} distinct{}",
                col.name,
                col.column_type.display_name(),
                col.missing,
                col.missing_pct,
                col.distinct,
                if col.all_unique { ", all unique" } else { "" }
            );
        }
        out
    }
}
