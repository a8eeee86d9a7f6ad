use rand::{rngs::StdRng, Rng, SeedableRng};

/// Row indices of one bag, drawn with replacement, together with an in-bag bitmap over
/// the training rows so membership tests are O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSample {
    indices: Vec<usize>,
    in_bag: Vec<bool>,
}

impl BootstrapSample {
    /// Draws `n` indices uniformly from `0..n`. `n` must be positive.
    pub(crate) fn draw<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        Self::from_indices(n, indices)
    }

    pub(crate) fn from_indices(n: usize, indices: Vec<usize>) -> Self {
        let mut in_bag = vec![false; n];
        for &i in &indices {
            in_bag[i] = true;
        }
        Self { indices, in_bag }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    #[cfg(test)]
    fn contains(&self, row: usize) -> bool {
        self.in_bag.get(row).copied().unwrap_or(false)
    }

    /// Training rows this bag never drew, in ascending order.
    pub fn out_of_bag(&self) -> impl Iterator<Item = usize> + '_ {
        self.in_bag
            .iter()
            .enumerate()
            .filter(|(_, &drawn)| !drawn)
            .map(|(row, _)| row)
    }
}

/// One sample per bag. Every bag gets its own seed from the master generator so the
/// draws do not depend on the order in which bags are later fitted.
pub(crate) fn draw_samples(n: usize, n_bags: usize, seed: u64) -> Vec<BootstrapSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..n_bags).map(|_| rng.gen()).collect();

    seeds
        .into_iter()
        .map(|bag_seed| {
            let mut bag_rng = StdRng::seed_from_u64(bag_seed);
            BootstrapSample::draw(n, &mut bag_rng)
        })
        .collect()
}
