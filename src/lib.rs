pub mod bagging;
pub mod eigen;
pub mod estimators;
#[cfg(test)]
mod test_data;

use ndarray::{Array1, ArrayView1, ArrayView2};

#[derive(Debug, Clone)]
pub struct FitResult {
    pub err: f64,
    pub residuals: Array1<f64>,
    pub y_hat: Array1<f64>,
}

impl FitResult {
    /// Builds the in-sample summary of a model from its predictions on the training targets.
    pub fn from_predictions(y: ArrayView1<f64>, y_hat: Array1<f64>) -> Self {
        let residuals = &y - &y_hat;
        let err = residuals.pow2().mean().unwrap_or(f64::NAN);
        Self {
            err,
            residuals,
            y_hat,
        }
    }
}

pub trait FittedModel: Send + Sync {
    fn predict(&self, x: ArrayView2<f64>) -> Array1<f64>;
}

/// An untrained model. Consumed by `fit`, which hands back the trained counterpart.
pub trait Estimator: Send {
    type Model: FittedModel;

    fn fit(self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> (FitResult, Self::Model);
}
