#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaggingParams {
    pub n_bags: usize,
    pub oob: bool,
    pub seed: u64,
}

// Builder for BaggingParams
#[derive(Debug, Clone)]
pub struct BaggingParamsBuilder {
    n_bags: usize,
    oob: bool,
    seed: u64,
}

impl BaggingParamsBuilder {
    pub fn new() -> Self {
        Self {
            n_bags: 10,
            oob: false,
            seed: 42,
        }
    }

    pub fn n_bags(mut self, n_bags: usize) -> Self {
        self.n_bags = n_bags;
        self
    }

    /// Keep the training data around so the ensemble can compute an out-of-bag score.
    pub fn oob(mut self, oob: bool) -> Self {
        self.oob = oob;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> BaggingParams {
        BaggingParams {
            n_bags: self.n_bags,
            oob: self.oob,
            seed: self.seed,
        }
    }
}

impl Default for BaggingParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for BaggingParams {
    fn default() -> Self {
        BaggingParamsBuilder::new().build()
    }
}
