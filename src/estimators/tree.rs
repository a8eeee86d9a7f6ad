use itertools::Itertools;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

use crate::{Estimator, FitResult, FittedModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionTreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

// Builder for RegressionTreeParams
#[derive(Debug, Clone)]
pub struct RegressionTreeParamsBuilder {
    max_depth: usize,
    min_samples_split: usize,
    min_samples_leaf: usize,
}

impl RegressionTreeParamsBuilder {
    pub fn new() -> Self {
        Self {
            max_depth: 8,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    pub fn build(self) -> RegressionTreeParams {
        RegressionTreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split.max(2),
            min_samples_leaf: self.min_samples_leaf.max(1),
        }
    }
}

impl Default for RegressionTreeParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for RegressionTreeParams {
    fn default() -> Self {
        RegressionTreeParamsBuilder::new().build()
    }
}

/// CART regression tree grown greedily on squared error.
#[derive(Debug, Clone, Default)]
pub struct RegressionTree {
    params: RegressionTreeParams,
}

impl RegressionTree {
    pub fn new(params: RegressionTreeParams) -> Self {
        Self { params }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedRegressionTree {
    nodes: Vec<Node>,
}

#[derive(Debug)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    sse: f64,
}

struct TreeGrower<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
    params: &'a RegressionTreeParams,
    nodes: Vec<Node>,
}

impl TreeGrower<'_> {
    fn grow(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        let value = rows.iter().map(|&r| self.y[r]).sum::<f64>() / rows.len() as f64;
        let node_id = self.nodes.len();
        self.nodes.push(Node::Leaf { value });

        if depth >= self.params.max_depth || rows.len() < self.params.min_samples_split {
            return node_id;
        }
        let Some(SplitCandidate {
            feature, threshold, ..
        }) = self.best_split(&rows)
        else {
            return node_id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .partition(|&&r| self.x[[r, feature]] <= threshold);
        let left = self.grow(left_rows, depth + 1);
        let right = self.grow(right_rows, depth + 1);
        self.nodes[node_id] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        node_id
    }

    fn best_split(&self, rows: &[usize]) -> Option<SplitCandidate> {
        let n = rows.len();
        let min_leaf = self.params.min_samples_leaf;
        let total: f64 = rows.iter().map(|&r| self.y[r]).sum();
        let total_sq: f64 = rows.iter().map(|&r| self.y[r].powi(2)).sum();
        let parent_sse = total_sq - total * total / n as f64;

        let mut best: Option<SplitCandidate> = None;
        for feature in 0..self.x.ncols() {
            let sorted = rows
                .iter()
                .copied()
                .sorted_by(|&a, &b| self.x[[a, feature]].total_cmp(&self.x[[b, feature]]))
                .collect_vec();

            let (mut left_sum, mut left_sq) = (0.0, 0.0);
            for k in 1..n {
                let moved = self.y[sorted[k - 1]];
                left_sum += moved;
                left_sq += moved * moved;

                let lo = self.x[[sorted[k - 1], feature]];
                let hi = self.x[[sorted[k], feature]];
                if k < min_leaf || n - k < min_leaf || lo >= hi {
                    continue;
                }

                let (n_left, n_right) = (k as f64, (n - k) as f64);
                let right_sum = total - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / n_left)
                    + (right_sq - right_sum * right_sum / n_right);

                if best.as_ref().map_or(true, |b| sse < b.sse) {
                    let mid = lo + (hi - lo) / 2.0;
                    best = Some(SplitCandidate {
                        feature,
                        threshold: if mid < hi { mid } else { lo },
                        sse,
                    });
                }
            }
        }

        best.filter(|b| b.sse + 1e-12 < parent_sse)
    }
}

impl Estimator for RegressionTree {
    type Model = FittedRegressionTree;

    fn fit(self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> (FitResult, FittedRegressionTree) {
        let model = if y.is_empty() {
            FittedRegressionTree {
                nodes: vec![Node::Leaf { value: f64::NAN }],
            }
        } else {
            let mut grower = TreeGrower {
                x: x.view(),
                y: y.view(),
                params: &self.params,
                nodes: Vec::new(),
            };
            grower.grow((0..y.len()).collect(), 0);
            FittedRegressionTree {
                nodes: grower.nodes,
            }
        };

        let y_hat = model.predict(x);
        (FitResult::from_predictions(y, y_hat), model)
    }
}

impl FittedRegressionTree {
    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = 0;
        loop {
            match self.nodes[node] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => node = if row[feature] <= threshold { left } else { right },
            }
        }
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Number of splits on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth_from(nodes: &[Node], node: usize) -> usize {
            match nodes[node] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + depth_from(nodes, left).max(depth_from(nodes, right))
                }
            }
        }
        depth_from(&self.nodes, 0)
    }
}

impl FittedModel for FittedRegressionTree {
    fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        x.axis_iter(Axis(0))
            .map(|row| self.predict_row(row))
            .collect()
    }
}
