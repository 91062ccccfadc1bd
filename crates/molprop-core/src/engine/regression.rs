use super::error::EngineError;
use nalgebra::{DMatrix, DVector};

/// A fitted straight line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    /// Ordinary least-squares fit of `y` on `x`.
    ///
    /// Solves the normal equations of the `[1, x]` design matrix.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DegenerateFit`] when fewer than two points are
    /// given or all `x` values are equal.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self, EngineError> {
        let n = points.len();
        if n < 2 {
            return Err(EngineError::DegenerateFit(format!(
                "at least two points are required, got {n}"
            )));
        }
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
        let variance = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum::<f64>();
        if variance == 0.0 {
            return Err(EngineError::DegenerateFit(
                "x values have zero variance".to_string(),
            ));
        }

        let design = DMatrix::from_fn(n, 2, |row, col| if col == 0 { 1.0 } else { points[row].0 });
        let targets = DVector::from_iterator(n, points.iter().map(|(_, y)| *y));
        let normal = design.transpose() * &design;
        let rhs = design.transpose() * targets;
        let solution = normal
            .cholesky()
            .ok_or_else(|| {
                EngineError::DegenerateFit("normal equations are not positive definite".to_string())
            })?
            .solve(&rhs);

        Ok(Self {
            intercept: solution[0],
            slope: solution[1],
        })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
