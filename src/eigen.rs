use log::trace;
use ndarray::{Array1, ArrayView1, ArrayView2};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PowerIterationError {
    #[error("Power iteration requires a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}

fn l2_norm(v: ArrayView1<f64>) -> f64 {
    v.dot(&v).sqrt()
}

/// Estimates the dominant eigenpair of a symmetric matrix with `num_steps` rounds of
/// power iteration, starting from the all-ones vector.
///
/// The eigenvalue is reported as `|A v| / |v|`, i.e. the magnitude of the dominant
/// eigenvalue. With `num_steps == 0` the untouched all-ones seed is returned.
///
/// Symmetry is not checked. A matrix that maps the working vector to zero (e.g. the
/// zero matrix) produces NaN entries; callers must avoid such input.
pub fn power_iteration(
    matrix: ArrayView2<f64>,
    num_steps: usize,
) -> Result<(f64, Array1<f64>), PowerIterationError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(PowerIterationError::NotSquare { rows, cols });
    }

    let mut eigenvector = Array1::<f64>::ones(cols);
    for step in 0..num_steps {
        eigenvector = matrix.dot(&eigenvector);
        let norm = l2_norm(eigenvector.view());
        eigenvector /= norm;
        trace!("power iteration step {}: norm {:?}", step, norm);
    }

    let eigenvalue = l2_norm(matrix.dot(&eigenvector).view()) / l2_norm(eigenvector.view());
    Ok((eigenvalue, eigenvector))
}
