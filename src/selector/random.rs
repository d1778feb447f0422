use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    objective::SubmodularFunction,
    selector::{self, Selector},
    Error,
};

// ======================================================================
// Random - PUBLIC

/// Uniform reservoir sampling of `K` items.
///
/// The first `K` items are appended; afterwards item `i` (0-based)
/// replaces a uniformly chosen slot with probability `K/(i + 1)`, which
/// keeps the reservoir a uniform sample of everything seen. No
/// approximation guarantee; this is the baseline the informed selectors
/// are measured against.
///
/// The PRNG is instance-local and seeded at construction, so a given seed
/// reproduces the same solution on every platform.
pub struct Random<F: SubmodularFunction> {
    k: usize,
    objective: F,
    solution: Vec<Vec<f64>>,
    fval: f64,

    rng: ChaCha8Rng,
    seen: usize,
    dim: Option<usize>,
}

impl<F: SubmodularFunction> Random<F> {
    /// Creates a new selector for summaries of at most `k` items with the
    /// given PRNG seed.
    pub fn new(k: usize, objective: F, seed: u64) -> Result<Self, Error> {
        selector::validate_cardinality(k)?;

        Ok(Self {
            k,
            objective,
            solution: Vec::new(),
            fval: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seen: 0,
            dim: None,
        })
    }
}

// ======================================================================
// Random - IMPL Selector

impl<F: SubmodularFunction> Selector<F> for Random<F> {
    fn next(&mut self, item: &[f64]) -> Result<(), Error> {
        selector::check_dimension(&mut self.dim, item)?;

        if self.solution.len() < self.k {
            let pos = self.solution.len();
            self.fval = self.objective.update(&self.solution, item, pos);
            self.solution.push(item.to_vec());
        } else {
            let slot = self.rng.gen_range(0..=self.seen);
            if slot < self.k {
                self.fval = self.objective.update(&self.solution, item, slot);
                self.solution[slot] = item.to_vec();
            }
        }
        self.seen += 1;
        Ok(())
    }

    fn solution(&self) -> &[Vec<f64>] {
        &self.solution
    }

    fn fval(&self) -> f64 {
        self.fval
    }
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;

    // ============================================================
    // CONTRACT

    selector_contract_tests! {Random::new(3, test_util::rbf_objective(3), 9).unwrap()}

    // ============================================================
    // DETERMINISM

    #[test]
    fn same_seed_is_bit_identical() {
        let items = test_util::generate_items(100, 5, 17);

        let mut first = Random::new(3, test_util::rbf_objective(3), 12345).unwrap();
        let mut second = Random::new(3, test_util::rbf_objective(3), 12345).unwrap();
        first.fit(&items).unwrap();
        second.fit(&items).unwrap();

        assert_eq!(first.solution(), second.solution());
        assert_eq!(first.fval().to_bits(), second.fval().to_bits());
    }

    #[test]
    fn different_seeds_diverge() {
        let items = test_util::generate_items(100, 5, 17);

        let mut first = Random::new(3, test_util::rbf_objective(3), 1).unwrap();
        let mut second = Random::new(3, test_util::rbf_objective(3), 2).unwrap();
        first.fit(&items).unwrap();
        second.fit(&items).unwrap();

        assert_ne!(first.solution(), second.solution());
    }

    #[test]
    fn reservoir_on_short_stream_keeps_everything() {
        let mut random = Random::new(5, test_util::rbf_objective(5), 12345).unwrap();
        let items = test_util::three_point_stream();
        random.fit(&items[..3]).unwrap();

        assert_eq!(random.solution(), &items[..3]);
    }

    // ==================================================
    // ERRORS

    #[test]
    fn invalid_cardinality_in_new() {
        assert_eq!(
            Random::new(0, test_util::rbf_objective(3), 0).err(),
            Some(Error::InvalidCardinality { k: 0 })
        );
    }
}
