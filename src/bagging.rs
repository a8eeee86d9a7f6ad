mod bootstrap;
mod oob;
pub mod params;

pub use bootstrap::BootstrapSample;
pub use oob::OobPrediction;
pub use params::{BaggingParams, BaggingParamsBuilder};

use itertools::Itertools;
use log::{debug, info, warn};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use thiserror::Error;

#[cfg(feature = "use-rayon")]
use rayon::prelude::*;

use crate::{Estimator, FitResult, FittedModel};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BaggingError {
    #[error("Target has {targets} entries but the feature matrix has {rows} rows")]
    ShapeMismatch { rows: usize, targets: usize },

    #[error("Cannot draw bootstrap samples from an empty dataset")]
    EmptyDataset,

    #[error("The ensemble needs at least one bag")]
    NoBags,

    #[error("All bags should contain {expected} indices, found bag lengths {found:?}")]
    InconsistentBags { expected: usize, found: Vec<usize> },

    #[error("Out-of-bag scoring requires an ensemble fitted with `oob` enabled")]
    OobDisabled,
}

/// Models fitted on bootstrap resamples of one training set. Predictions are the plain
/// average over bags.
///
/// When fitted with `oob` enabled the ensemble borrows the training data for out-of-bag
/// scoring, hence the lifetime.
#[derive(Debug)]
pub struct BaggedEnsemble<'a, M: FittedModel> {
    models: Vec<M>,
    samples: Vec<BootstrapSample>,
    training_data: Option<(ArrayView2<'a, f64>, ArrayView1<'a, f64>)>,
}

pub fn fit<'a, E, F>(
    mut factory: F,
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
    hyperparameters: &BaggingParams,
) -> Result<(FitResult, BaggedEnsemble<'a, E::Model>), BaggingError>
where
    E: Estimator,
    F: FnMut() -> E,
{
    let BaggingParams { n_bags, oob, seed } = *hyperparameters;
    let n = x.nrows();

    if y.len() != n {
        return Err(BaggingError::ShapeMismatch {
            rows: n,
            targets: y.len(),
        });
    }
    if n == 0 {
        return Err(BaggingError::EmptyDataset);
    }
    if n_bags == 0 {
        return Err(BaggingError::NoBags);
    }

    let samples = bootstrap::draw_samples(n, n_bags, seed);
    check_bag_lengths(&samples, n)?;

    let estimators: Vec<E> = (0..n_bags).map(|_| factory()).collect();
    let models: Vec<E::Model>;

    #[cfg(not(feature = "use-rayon"))]
    {
        models = estimators
            .into_iter()
            .zip_eq(&samples)
            .enumerate()
            .map(|(b, (estimator, sample))| fit_bag(b, estimator, sample, x, y))
            .collect();
    }
    #[cfg(feature = "use-rayon")]
    {
        models = estimators
            .into_par_iter()
            .zip(samples.par_iter())
            .enumerate()
            .map(|(b, (estimator, sample))| fit_bag(b, estimator, sample, x, y))
            .collect();
    }

    let ensemble = BaggedEnsemble {
        models,
        samples,
        training_data: oob.then_some((x, y)),
    };
    let fit_result = FitResult::from_predictions(y, ensemble.predict(x));
    info!(
        "Fitted {} bags on {} rows, in-sample err: {:?}",
        n_bags, n, fit_result.err
    );

    Ok((fit_result, ensemble))
}

fn check_bag_lengths(samples: &[BootstrapSample], n: usize) -> Result<(), BaggingError> {
    match samples.iter().map(BootstrapSample::len).all_equal_value() {
        Ok(len) if len == n => Ok(()),
        _ => Err(BaggingError::InconsistentBags {
            expected: n,
            found: samples.iter().map(BootstrapSample::len).collect(),
        }),
    }
}

fn fit_bag<E: Estimator>(
    b: usize,
    estimator: E,
    sample: &BootstrapSample,
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
) -> E::Model {
    let x_sample = x.select(Axis(0), sample.indices());
    let y_sample = y.select(Axis(0), sample.indices());
    let (fit_res, model) = estimator.fit(x_sample.view(), y_sample.view());
    debug!("bag {}: err {:?}", b, fit_res.err);
    model
}

impl<'a, M: FittedModel> BaggedEnsemble<'a, M> {
    pub fn n_bags(&self) -> usize {
        self.models.len()
    }

    pub fn models(&self) -> &[M] {
        &self.models
    }

    pub fn bootstrap_samples(&self) -> &[BootstrapSample] {
        &self.samples
    }

    pub fn is_oob(&self) -> bool {
        self.training_data.is_some()
    }

    fn training_data(
        &self,
    ) -> Result<(ArrayView2<'a, f64>, ArrayView1<'a, f64>), BaggingError> {
        self.training_data.ok_or(BaggingError::OobDisabled)
    }

    /// Row `i` holds the predictions for training row `i` from every model whose bag
    /// left it out.
    pub fn oob_prediction_lists(&self) -> Result<Vec<Vec<f64>>, BaggingError> {
        let (x, _) = self.training_data()?;
        Ok(oob::prediction_lists(&self.models, &self.samples, x))
    }

    pub fn oob_predictions(&self) -> Result<Vec<OobPrediction>, BaggingError> {
        let predictions = self
            .oob_prediction_lists()?
            .iter()
            .map(|list| OobPrediction::from_predictions(list))
            .collect_vec();

        let missing = predictions.iter().filter(|p| p.is_missing()).count();
        if missing > 0 {
            warn!(
                "{} of {} training rows were in every bag and have no out-of-bag prediction",
                missing,
                predictions.len()
            );
        }
        Ok(predictions)
    }

    /// Out-of-bag mean squared error. NaN when no training row has an out-of-bag prediction.
    pub fn oob_score(&self) -> Result<f64, BaggingError> {
        let (_, y) = self.training_data()?;
        let predictions = self.oob_predictions()?;
        Ok(oob::mean_squared_error(&predictions, y))
    }
}

impl<M: FittedModel> FittedModel for BaggedEnsemble<'_, M> {
    fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        let mut result = Array1::zeros(x.nrows());
        for model in &self.models {
            result += &model.predict(x);
        }
        result / self.models.len() as f64
    }
}
