//! Numeric column classification

use crate::structs::{ColumnType, EnvError, Result, Table};

/// Numeric columns in table order, minus `excluded`.
///
/// An excluded name that is not a real column is a schema error rather than
/// a silent drop, so caller typos surface immediately.
///
/// # Errors
/// Returns `Schema` if a name in `excluded` does not exist in the table
pub fn numerical_columns(table: &Table, excluded: &[String]) -> Result<Vec<String>> {
    for name in excluded {
        if table.column_index(name).is_none() {
            return Err(EnvError::Schema(format!(
                "excluded column '{name}' not found in table"
            )));
        }
    }

    Ok(table
        .headers
        .iter()
        .zip(&table.types)
        .filter(|&(name, ty)| *ty == ColumnType::Numeric && !excluded.contains(name))
        .map(|(name, _)| name.clone())
        .collect())
}
