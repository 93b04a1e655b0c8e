//! Correlation matrix computation

use crate::structs::{CorrelationMatrix, EnvError, Result, Table};

/// Compute the pairwise Pearson matrix over the selected columns.
///
/// Rows where either value of a pair is missing are excluded for that pair
/// only. Undefined coefficients are NaN, never zero: zero would claim "no
/// correlation" where the data actually says "not enough data".
///
/// # Errors
/// Returns `InvalidColumnSet` for an empty selection, `Schema` if a name is
/// absent or not numeric
pub fn correlation_matrix(table: &Table, columns: &[String]) -> Result<CorrelationMatrix> {
    if columns.is_empty() {
        return Err(EnvError::InvalidColumnSet(
            "no columns selected for correlation".into(),
        ));
    }

    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| table.numeric_values(name))
        .collect::<Result<_>>()?;

    let n = columns.len();
    let mut matrix = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        names: columns.to_vec(),
        matrix,
    })
}

/// Pearson coefficient over rows where both values are present.
///
/// NaN when fewer than 2 paired observations remain or either side has zero
/// variance over those rows. The self-pair falls out of the same rule: full
/// variance gives exactly 1.0, a constant column gives NaN.
#[allow(clippy::cast_precision_loss)]
fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| a.zip(*b))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}
