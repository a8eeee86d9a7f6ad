use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{Estimator, FitResult, FittedModel};

const PIVOT_EPS: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionParams {
    /// Ridge penalty added to the diagonal of the Gram matrix.
    pub alpha: f64,
    pub fit_intercept: bool,
}

impl Default for LinearRegressionParams {
    fn default() -> Self {
        LinearRegressionParams {
            alpha: 0.0,
            fit_intercept: true,
        }
    }
}

/// Least squares (optionally ridge-penalised) regression solved through the normal equations.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    params: LinearRegressionParams,
}

impl LinearRegression {
    pub fn new(params: LinearRegressionParams) -> Self {
        Self { params }
    }

    pub fn ridge(alpha: f64) -> Self {
        Self::new(LinearRegressionParams {
            alpha,
            ..LinearRegressionParams::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedLinearRegression {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

impl Estimator for LinearRegression {
    type Model = FittedLinearRegression;

    fn fit(self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> (FitResult, FittedLinearRegression) {
        let LinearRegressionParams {
            alpha,
            fit_intercept,
        } = self.params;

        let (x_mean, y_mean) = if fit_intercept {
            (
                x.mean_axis(Axis(0))
                    .unwrap_or_else(|| Array1::zeros(x.ncols())),
                y.mean().unwrap_or(0.0),
            )
        } else {
            (Array1::zeros(x.ncols()), 0.0)
        };

        let x_centered = &x - &x_mean;
        let y_centered = &y - y_mean;

        let mut gram = x_centered.t().dot(&x_centered);
        gram.diag_mut().mapv_inplace(|v| v + alpha);
        let rhs = x_centered.t().dot(&y_centered);

        let coefficients = solve(gram, rhs);
        let intercept = y_mean - x_mean.dot(&coefficients);
        let model = FittedLinearRegression {
            coefficients,
            intercept,
        };

        let y_hat = model.predict(x);
        (FitResult::from_predictions(y, y_hat), model)
    }
}

impl FittedModel for FittedLinearRegression {
    fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        x.dot(&self.coefficients) + self.intercept
    }
}

/// Gaussian elimination with partial pivoting. Directions with a vanishing pivot get a zero
/// coefficient, so collinear or constant columns do not blow up the solution.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Array1<f64> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot, col]].abs() < PIVOT_EPS {
            continue;
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut solution = Array1::<f64>::zeros(n);
    for col in (0..n).rev() {
        if a[[col, col]].abs() < PIVOT_EPS {
            continue;
        }
        let tail: f64 = (col + 1..n).map(|k| a[[col, k]] * solution[k]).sum();
        solution[col] = (b[col] - tail) / a[[col, col]];
    }
    solution
}
