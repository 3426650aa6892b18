//! Pearson correlation between measurement columns.

use crate::analysis::error::AnalysisError;
use crate::analysis::{best_effort, numeric_values};
use crate::store::weather_table::WeatherTable;
use crate::types::columns::MEASUREMENT_COLUMNS;
use bon::bon;
use serde::Serialize;

/// A symmetric matrix of correlation coefficients. A cell is `None` when
/// the pair has fewer than two rows with both values present, or when
/// either column is constant over those rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// The coefficient between two columns of the matrix.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pearson's r over the rows where both `x` and `y` have a value.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (mut covariance, mut variance_x, mut variance_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }
    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }
    Some((covariance / (variance_x * variance_y).sqrt()).clamp(-1.0, 1.0))
}

#[bon]
impl WeatherTable {
    /// Correlation matrix over `columns`, or over every standard measurement
    /// column present in the table when none are given.
    ///
    /// # Errors
    ///
    /// Fails when a requested column is missing or not numeric.
    #[builder]
    pub fn try_correlation(
        &self,
        columns: Option<Vec<String>>,
    ) -> Result<CorrelationMatrix, AnalysisError> {
        let columns = columns.unwrap_or_else(|| {
            MEASUREMENT_COLUMNS
                .iter()
                .filter(|name| self.has_column(name))
                .map(|name| name.to_string())
                .collect()
        });
        let series = columns
            .iter()
            .map(|name| numeric_values(&self.frame, name))
            .collect::<Result<Vec<_>, _>>()?;

        let values = series
            .iter()
            .map(|x| series.iter().map(|y| pearson(x, y)).collect())
            .collect();
        Ok(CorrelationMatrix { columns, values })
    }

    #[builder]
    pub fn correlation(&self, columns: Option<Vec<String>>) -> CorrelationMatrix {
        best_effort(
            "Correlation",
            self.try_correlation().maybe_columns(columns).call(),
        )
    }
}
