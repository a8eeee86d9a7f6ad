use itertools::Itertools;
use ndarray::{s, ArrayView1, ArrayView2};

#[cfg(feature = "use-rayon")]
use rayon::prelude::*;

use crate::FittedModel;

use super::BootstrapSample;

/// Averaged out-of-bag prediction for one training row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OobPrediction {
    Predicted(f64),
    /// The row was drawn into every bag, so no model can score it.
    Missing,
}

impl OobPrediction {
    pub fn value(self) -> Option<f64> {
        match self {
            OobPrediction::Predicted(v) => Some(v),
            OobPrediction::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, OobPrediction::Missing)
    }

    pub(crate) fn from_predictions(predictions: &[f64]) -> Self {
        if predictions.is_empty() {
            OobPrediction::Missing
        } else {
            OobPrediction::Predicted(predictions.iter().sum::<f64>() / predictions.len() as f64)
        }
    }
}

/// Each out-of-bag row is scored on its own, one single-row `predict` call per row.
fn predict_out_of_bag<M: FittedModel>(
    model: &M,
    sample: &BootstrapSample,
    x: ArrayView2<f64>,
) -> Vec<(usize, f64)> {
    sample
        .out_of_bag()
        .map(|row| (row, model.predict(x.slice(s![row..row + 1, ..]))[0]))
        .collect()
}

/// For every training row, the predictions of the models that did not see it, in bag order.
pub(crate) fn prediction_lists<M: FittedModel>(
    models: &[M],
    samples: &[BootstrapSample],
    x: ArrayView2<f64>,
) -> Vec<Vec<f64>> {
    let per_bag: Vec<Vec<(usize, f64)>>;

    #[cfg(not(feature = "use-rayon"))]
    {
        per_bag = models
            .iter()
            .zip_eq(samples)
            .map(|(model, sample)| predict_out_of_bag(model, sample, x))
            .collect();
    }
    #[cfg(feature = "use-rayon")]
    {
        per_bag = models
            .par_iter()
            .zip(samples.par_iter())
            .map(|(model, sample)| predict_out_of_bag(model, sample, x))
            .collect();
    }

    let mut lists = vec![Vec::new(); x.nrows()];
    for (row, pred) in per_bag.into_iter().flatten() {
        lists[row].push(pred);
    }
    lists
}

/// Mean squared error over the rows that have a prediction. NaN terms are skipped; with no
/// usable term the result is NaN.
pub(crate) fn mean_squared_error(predictions: &[OobPrediction], y: ArrayView1<f64>) -> f64 {
    let squared_errors = predictions
        .iter()
        .zip_eq(y.iter())
        .filter_map(|(pred, target)| pred.value().map(|p| (p - target).powi(2)))
        .filter(|err| !err.is_nan())
        .collect_vec();

    if squared_errors.is_empty() {
        f64::NAN
    } else {
        squared_errors.iter().sum::<f64>() / squared_errors.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array1, Array2};

    use super::*;

    /// Predicts the number of rows it was handed, for every row.
    struct BatchSize;

    impl FittedModel for BatchSize {
        fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
            Array1::from_elem(x.nrows(), x.nrows() as f64)
        }
    }

    #[test]
    fn test_each_row_is_predicted_alone() {
        let x = Array2::<f64>::zeros((6, 2));
        let samples = vec![
            BootstrapSample::from_indices(6, vec![0, 0, 0, 1, 1, 1]),
            BootstrapSample::from_indices(6, vec![5, 5, 5, 5, 5, 5]),
        ];

        let lists = prediction_lists(&[BatchSize, BatchSize], &samples, x.view());

        assert_eq!(lists[0], vec![1.0]);
        assert_eq!(lists[5], vec![1.0]);
        for row in 2..5 {
            assert_eq!(lists[row], vec![1.0, 1.0]);
        }
    }

    #[test]
    fn test_empty_predictions_are_missing() {
        assert_eq!(OobPrediction::from_predictions(&[]), OobPrediction::Missing);
        assert_eq!(
            OobPrediction::from_predictions(&[1.0, 2.0, 6.0]),
            OobPrediction::Predicted(3.0)
        );
    }

    #[test]
    fn test_zero_prediction_is_not_missing() {
        let pred = OobPrediction::from_predictions(&[0.0]);
        assert!(!pred.is_missing());
        assert_eq!(pred.value(), Some(0.0));
    }

    #[test]
    fn test_mse_skips_missing_rows() {
        let preds = [
            OobPrediction::Predicted(1.0),
            OobPrediction::Missing,
            OobPrediction::Predicted(4.0),
        ];
        let y = array![2.0, 100.0, 2.0];
        assert_eq!(mean_squared_error(&preds, y.view()), 2.5);
    }

    #[test]
    fn test_mse_skips_nan_terms() {
        let preds = [OobPrediction::Predicted(f64::NAN), OobPrediction::Predicted(3.0)];
        let y = array![0.0, 1.0];
        assert_eq!(mean_squared_error(&preds, y.view()), 4.0);
    }

    #[test]
    fn test_mse_all_missing_is_nan() {
        let preds = [OobPrediction::Missing, OobPrediction::Missing];
        let y = array![1.0, 2.0];
        assert!(mean_squared_error(&preds, y.view()).is_nan());
    }
}
