use crate::engine::config::ReferenceTable;
use crate::engine::error::EngineError;
use crate::engine::regression::LinearModel;
use std::sync::LazyLock;
use tracing::{debug, instrument};

static ALKANE_MODEL: LazyLock<LinearModel> = LazyLock::new(|| {
    fit_table(&ReferenceTable::alkanes())
        .expect("built-in alkane table has distinct carbon counts")
});

fn fit_table(table: &ReferenceTable) -> Result<LinearModel, EngineError> {
    let points: Vec<(f64, f64)> = table
        .points()
        .iter()
        .map(|&(carbons, boiling_point)| (f64::from(carbons), boiling_point))
        .collect();
    LinearModel::fit(&points)
}

/// Predicts normal boiling points (°C) of straight-chain alkanes from their
/// carbon count with a least-squares line.
///
/// The line extrapolates freely: no carbon count is rejected, and values far
/// outside the reference range are as unreliable as any extrapolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoilingPointPredictor {
    model: LinearModel,
}

impl Default for BoilingPointPredictor {
    /// Uses the built-in C1-C10 table. The fit is computed once per process.
    fn default() -> Self {
        Self {
            model: *ALKANE_MODEL,
        }
    }
}

impl BoilingPointPredictor {
    /// Fits a predictor to a custom reference table.
    #[instrument(skip_all, name = "boiling_point_fit", fields(points = table.points().len()))]
    pub fn from_table(table: &ReferenceTable) -> Result<Self, EngineError> {
        let model = fit_table(table)?;
        debug!(
            slope = model.slope,
            intercept = model.intercept,
            contiguous = table.is_contiguous(),
            "Fitted boiling-point line"
        );
        Ok(Self { model })
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Predicted boiling point in °C for an alkane with `carbon_count` carbons.
    pub fn predict(&self, carbon_count: i64) -> f64 {
        self.model.evaluate(carbon_count as f64)
    }

    /// Predictions for every carbon count from 1 to `max_carbon`.
    pub fn sweep(&self, max_carbon: u32) -> Vec<(u32, f64)> {
        (1..=max_carbon)
            .map(|carbons| (carbons, self.predict(i64::from(carbons))))
            .collect()
    }
}

/// Predicts with the built-in alkane table.
pub fn predict(carbon_count: i64) -> f64 {
    BoilingPointPredictor::default().predict(carbon_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ALKANE_BOILING_POINTS;

    fn closed_form_line() -> (f64, f64) {
        let n = ALKANE_BOILING_POINTS.len() as f64;
        let mean_x = ALKANE_BOILING_POINTS.iter().map(|p| f64::from(p.0)).sum::<f64>() / n;
        let mean_y = ALKANE_BOILING_POINTS.iter().map(|p| p.1).sum::<f64>() / n;
        let sxy: f64 = ALKANE_BOILING_POINTS
            .iter()
            .map(|p| (f64::from(p.0) - mean_x) * (p.1 - mean_y))
            .sum();
        let sxx: f64 = ALKANE_BOILING_POINTS
            .iter()
            .map(|p| (f64::from(p.0) - mean_x).powi(2))
            .sum();
        let slope = sxy / sxx;
        (slope, mean_y - slope * mean_x)
    }

    #[test]
    fn predictions_match_closed_form_ols_at_reference_points() {
        let (slope, intercept) = closed_form_line();
        for (carbons, _) in ALKANE_BOILING_POINTS {
            let expected = intercept + slope * f64::from(carbons);
            assert!((predict(i64::from(carbons)) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn fitted_line_has_expected_coefficients() {
        let model = *BoilingPointPredictor::default().model();
        assert!((model.slope - 2931.8 / 82.5).abs() < 1e-9);
        assert!((model.intercept - (36.1 - 5.5 * 2931.8 / 82.5)).abs() < 1e-9);
        assert!((predict(1) - (-123.8164)).abs() < 1e-3);
    }

    #[test]
    fn predictions_increase_with_carbon_count() {
        let predictor = BoilingPointPredictor::default();
        for n in -5..40 {
            assert!(predictor.predict(n + 1) > predictor.predict(n));
        }
    }

    #[test]
    fn out_of_range_counts_extrapolate() {
        let predictor = BoilingPointPredictor::default();
        assert_eq!(predictor.predict(0), predictor.model().intercept);
        assert!(predictor.predict(20).is_finite());
        assert!(predictor.predict(-3) < predictor.predict(0));
    }

    #[test]
    fn sweep_covers_one_through_max() {
        let predictor = BoilingPointPredictor::default();
        let sweep = predictor.sweep(12);
        assert_eq!(sweep.len(), 12);
        assert_eq!(sweep[0], (1, predictor.predict(1)));
        assert_eq!(sweep[11].0, 12);
        assert!(predictor.sweep(0).is_empty());
    }

    #[test]
    fn custom_tables_are_fitted_independently() {
        let table = ReferenceTable::new(vec![(2, 10.0), (4, 30.0)]).unwrap();
        let predictor = BoilingPointPredictor::from_table(&table).unwrap();
        assert!((predictor.model().slope - 10.0).abs() < 1e-9);
        assert!((predictor.predict(3) - 20.0).abs() < 1e-9);
        assert_ne!(predictor, BoilingPointPredictor::default());
    }

    #[test]
    fn from_table_with_built_in_table_matches_default() {
        let fitted = BoilingPointPredictor::from_table(&ReferenceTable::alkanes()).unwrap();
        assert_eq!(fitted, BoilingPointPredictor::default());
    }
}
