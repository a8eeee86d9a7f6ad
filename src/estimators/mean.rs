use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{Estimator, FitResult, FittedModel};

/// Predicts the training mean for every row. Useful as a baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanRegressor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedMean {
    pub value: f64,
}

impl Estimator for MeanRegressor {
    type Model = FittedMean;

    fn fit(self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> (FitResult, FittedMean) {
        let model = FittedMean {
            value: y.mean().unwrap_or(f64::NAN),
        };
        let y_hat = model.predict(x);
        (FitResult::from_predictions(y, y_hat), model)
    }
}

impl FittedModel for FittedMean {
    fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        Array1::from_elem(x.nrows(), self.value)
    }
}
