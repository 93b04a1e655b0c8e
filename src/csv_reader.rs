use crate::structs::{ColumnType, Result, Table};
use csv::ReaderBuilder;
use std::path::Path;

/// Fraction of non-empty cells that must match a type for the column to be
/// declared that type
const TYPE_INFERENCE_THRESHOLD: f64 = 0.5;

impl Table {
    /// Parse a CSV or TSV file into a table snapshot, inferring column types
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_file(path: &Path, is_tsv: bool) -> Result<Self> {
        let delimiter = if is_tsv { b'\t' } else { b',' };

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.trim().to_string()).collect();
            // Flexible parsing can yield ragged rows; keep one cell per header
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        let types = infer_types(&headers, &rows);

        Ok(Table {
            headers,
            rows,
            types,
        })
    }
}

/// Infer a type for every column from its cell contents
fn infer_types(headers: &[String], rows: &[Vec<String>]) -> Vec<ColumnType> {
    (0..headers.len())
        .map(|index| {
            let cells: Vec<&str> = rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect();
            infer_column_type(&cells)
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn infer_column_type(cells: &[&str]) -> ColumnType {
    let non_empty: Vec<&str> = cells.iter().copied().filter(|s| !s.is_empty()).collect();
    if non_empty.is_empty() {
        return ColumnType::Text;
    }

    let total = non_empty.len() as f64;
    let numeric = non_empty
        .iter()
        .filter(|s| s.parse::<f64>().is_ok())
        .count();
    if numeric as f64 / total >= TYPE_INFERENCE_THRESHOLD {
        return ColumnType::Numeric;
    }

    let timestamps = non_empty
        .iter()
        .filter(|s| looks_like_timestamp(s))
        .count();
    if timestamps as f64 / total >= TYPE_INFERENCE_THRESHOLD {
        return ColumnType::Timestamp;
    }

    ColumnType::Text
}

/// Check for an ISO-like date prefix (`YYYY-MM-DD`)
fn looks_like_timestamp(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[0..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content.as_bytes()).expect("write content");
        file
    }

    #[test]
    fn test_parse_csv() {
        let csv_content = "ID,Datetime,Temperature\n1,2024-03-01 00:00:00,21.5\n2,2024-03-01 01:00:00,21.9\n3,2024-03-01 02:00:00,22.4";
        let file = create_test_csv(csv_content);

        let table = Table::from_file(file.path(), false).expect("parse csv");

        assert_eq!(table.headers, vec!["ID", "Datetime", "Temperature"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.col_count(), 3);
    }

    #[test]
    fn test_type_inference() {
        let csv_content = "ID,Datetime,Temperature,Site\n1,2024-03-01 00:00:00,21.5,roof\n2,2024-03-01 01:00:00,21.9,roof\n3,2024-03-01 02:00:00,22.4,yard";
        let file = create_test_csv(csv_content);

        let table = Table::from_file(file.path(), false).expect("parse csv");

        assert_eq!(
            table.types,
            vec![
                ColumnType::Numeric,
                ColumnType::Timestamp,
                ColumnType::Numeric,
                ColumnType::Text
            ]
        );
    }

    #[test]
    fn test_numeric_values_marks_missing() {
        let csv_content = "ID,Temperature\n1,21.5\n2,\n3,NaN\n4,bad\n5,22.4";
        let file = create_test_csv(csv_content);

        let table = Table::from_file(file.path(), false).expect("parse csv");
        let values = table.numeric_values("Temperature").expect("numeric column");

        assert_eq!(
            values,
            vec![Some(21.5), None, None, None, Some(22.4)]
        );
    }

    #[test]
    fn test_numeric_values_rejects_text_column() {
        let csv_content = "Site\nroof\nyard\nroof";
        let file = create_test_csv(csv_content);

        let table = Table::from_file(file.path(), false).expect("parse csv");
        assert!(table.numeric_values("Site").is_err());
        assert!(table.numeric_values("Nope").is_err());
    }

    #[test]
    fn test_short_rows_padded() {
        let csv_content = "a,b,c\n1,2,3\n4,5";
        let file = create_test_csv(csv_content);

        let table = Table::from_file(file.path(), false).expect("parse csv");
        assert_eq!(table.rows[1], vec!["4", "5", ""]);
    }
}
