pub mod linear;
pub mod mean;
pub mod tree;

pub use linear::{FittedLinearRegression, LinearRegression, LinearRegressionParams};
pub use mean::{FittedMean, MeanRegressor};
pub use tree::{
    FittedRegressionTree, RegressionTree, RegressionTreeParams, RegressionTreeParamsBuilder,
};
