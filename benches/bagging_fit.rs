use bagpow::bagging::{self, BaggingParamsBuilder};
use bagpow::eigen::power_iteration;
use bagpow::estimators::{RegressionTree, RegressionTreeParamsBuilder};
use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{Array1, Array2};

fn setup_data() -> (Array2<f64>, Array1<f64>) {
    let x = Array2::from_shape_fn((500, 4), |(i, j)| ((i * 31 + j * 17) % 101) as f64 / 10.0);
    let y = Array1::from_shape_fn(500, |i| (x[[i, 0]] * x[[i, 1]]).sin() + x[[i, 2]]);
    (x, y)
}

fn bench_bagging(c: &mut Criterion) {
    let (x, y) = setup_data();
    let params = BaggingParamsBuilder::new().n_bags(20).oob(true).build();
    let tree = || RegressionTree::new(RegressionTreeParamsBuilder::new().max_depth(6).build());

    let mut group = c.benchmark_group("Bagging");

    group.bench_function("FitTrees", |b| {
        b.iter(|| bagging::fit(tree, x.view(), y.view(), &params))
    });

    let (_, ensemble) = bagging::fit(tree, x.view(), y.view(), &params).unwrap();
    group.bench_function("OobScore", |b| b.iter(|| ensemble.oob_score()));
    group.finish();
}

fn bench_power_iteration(c: &mut Criterion) {
    let n = 200;
    let matrix = Array2::from_shape_fn((n, n), |(i, j)| 1.0 / (1.0 + i.abs_diff(j) as f64));

    c.bench_function("PowerIteration", |b| {
        b.iter(|| power_iteration(matrix.view(), 100))
    });
}

criterion_group!(benches, bench_bagging, bench_power_iteration);
criterion_main!(benches);
