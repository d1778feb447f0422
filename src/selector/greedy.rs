use fixedbitset::FixedBitSet;

use crate::{
    objective::SubmodularFunction,
    selector::{self, Selector},
    Error,
};

// ======================================================================
// Greedy - PUBLIC

/// Offline greedy selection over a finite batch.
///
/// Each of up to `K` rounds probes every unchosen item at the append slot
/// and commits the one with the largest marginal gain, breaking ties by
/// earliest index. Selection stops early once the best gain is no longer
/// positive. `O(N·K)` probes; the classic `1 − 1/e` guarantee for
/// monotone submodular objectives.
///
/// [`Greedy`] is the only batch-only selector: [`next`] returns
/// [`Error::StreamingUnsupported`] and all input goes through [`fit`].
///
/// [`next`]: Selector::next
/// [`fit`]: Selector::fit
pub struct Greedy<F: SubmodularFunction> {
    k: usize,
    objective: F,
    solution: Vec<Vec<f64>>,
    fval: f64,
}

impl<F: SubmodularFunction> Greedy<F> {
    /// Creates a new selector for summaries of at most `k` items.
    pub fn new(k: usize, objective: F) -> Result<Self, Error> {
        selector::validate_cardinality(k)?;

        Ok(Self {
            k,
            objective,
            solution: Vec::new(),
            fval: 0.0,
        })
    }
}

// ======================================================================
// Greedy - IMPL Selector

impl<F: SubmodularFunction> Selector<F> for Greedy<F> {
    fn next(&mut self, _item: &[f64]) -> Result<(), Error> {
        Err(Error::StreamingUnsupported)
    }

    fn fit<I, T>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[f64]>,
    {
        let items: Vec<Vec<f64>> = items.into_iter().map(|item| item.as_ref().to_vec()).collect();

        let mut expected = None;
        for item in &items {
            selector::check_dimension(&mut expected, item)?;
        }

        let mut chosen = FixedBitSet::with_capacity(items.len());
        while self.solution.len() < self.k {
            let pos = self.solution.len();

            let mut best: Option<(usize, f64)> = None;
            for (index, item) in items.iter().enumerate() {
                if chosen.contains(index) {
                    continue;
                }
                let value = self.objective.peek(&self.solution, item, pos);
                if best.map_or(true, |(_, best_value)| value > best_value) {
                    best = Some((index, value));
                }
            }

            let (index, value) = match best {
                Some(best) => best,
                None => break,
            };
            if value - self.fval <= 0.0 {
                break;
            }

            self.fval = self.objective.update(&self.solution, &items[index], pos);
            self.solution.push(items[index].clone());
            chosen.insert(index);
        }
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
    use crate::kernel::FnKernel;
    use crate::objective::FastIvm;
    use crate::test_util;

    // ============================================================
    // SELECTION

    #[test]
    fn selects_the_three_distinct_points() {
        let mut greedy = Greedy::new(3, test_util::rbf_objective(3)).unwrap();
        greedy.fit(&test_util::three_point_stream()).unwrap();

        assert_eq!(
            test_util::sorted_items(greedy.solution()),
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]
        );
        assert!(greedy.fval() > 0.0);
    }

    #[test]
    fn spreads_over_the_plane() {
        // Eight points; the most diverse triple is the two far corners
        // plus either off-corner (tied by symmetry, earliest index wins).
        let items: Vec<Vec<f64>> = [
            [0.0, 0.0],
            [1.0, 1.0],
            [0.5, 1.0],
            [1.0, 0.5],
            [0.0, 0.5],
            [0.5, 1.0],
            [0.0, 1.0],
            [1.0, 0.0],
        ]
        .iter()
        .map(|point| point.to_vec())
        .collect();

        let mut greedy = Greedy::new(3, test_util::rbf_objective(3)).unwrap();
        greedy.fit(&items).unwrap();

        assert_eq!(
            test_util::sorted_items(greedy.solution()),
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]
        );
        assert!(greedy.fval() > 0.0);
    }

    #[test]
    fn rank_deficient_kernel_fills_with_duplicates() {
        // The normalized linear kernel is rank-deficient on the three
        // points, so after the two informative picks greedy fills the
        // last slot with the highest-diagonal duplicate.
        let mut greedy = Greedy::new(3, test_util::linear_objective(3)).unwrap();
        greedy.fit(&test_util::three_point_stream()).unwrap();

        assert_eq!(
            test_util::sorted_items(greedy.solution()),
            vec![vec![0.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]]
        );
    }

    #[test]
    fn near_optimal_on_tiny_instances() {
        // (1 − 1/e) of the exhaustive optimum, with slack for rounding.
        let items = test_util::generate_items(8, 3, 21);
        let objective = test_util::rbf_objective(3);

        let optimum = test_util::brute_force_optimum(&objective, &items, 3);

        let mut greedy = Greedy::new(3, objective).unwrap();
        greedy.fit(&items).unwrap();

        assert!(greedy.fval() >= (1.0 - (-1.0f64).exp()) * optimum - 1e-9);
    }

    #[test]
    fn fval_is_non_decreasing_across_rounds() {
        // Re-fit prefixes of increasing length; the committed value must
        // never drop as more rounds are allowed.
        let items = test_util::generate_items(10, 3, 33);

        let mut previous = 0.0;
        for k in 1..=4 {
            let mut greedy = Greedy::new(k, test_util::rbf_objective(k)).unwrap();
            greedy.fit(&items).unwrap();
            assert!(greedy.fval() >= previous);
            previous = greedy.fval();
        }
    }

    #[test]
    fn stops_on_zero_gain() {
        // A zero kernel makes every marginal gain exactly zero.
        let kernel = FnKernel::new(|_: &[f64], _: &[f64]| 0.0);
        let objective = FastIvm::new(3, kernel, 1.0).unwrap();

        let mut greedy = Greedy::new(3, objective).unwrap();
        greedy.fit(&test_util::three_point_stream()).unwrap();

        assert!(greedy.solution().is_empty());
        assert_eq!(greedy.fval(), 0.0);
    }

    #[test]
    fn empty_batch() {
        let mut greedy = Greedy::new(3, test_util::rbf_objective(3)).unwrap();
        greedy.fit(&[] as &[&[f64]]).unwrap();

        assert!(greedy.solution().is_empty());
        assert_eq!(greedy.fval(), 0.0);
    }

    // ==================================================
    // ERRORS

    #[test]
    fn streaming_unsupported() {
        let mut greedy = Greedy::new(3, test_util::rbf_objective(3)).unwrap();

        assert_eq!(greedy.next(&[0.0, 0.0]), Err(Error::StreamingUnsupported));
    }

    #[test]
    fn invalid_cardinality_in_new() {
        assert_eq!(
            Greedy::new(0, test_util::rbf_objective(3)).err(),
            Some(Error::InvalidCardinality { k: 0 })
        );
    }

    #[test]
    fn dimension_mismatch_in_fit() {
        let mut greedy = Greedy::new(3, test_util::rbf_objective(3)).unwrap();

        assert_eq!(
            greedy.fit(&[vec![0.0, 0.0], vec![0.0]]),
            Err(Error::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }
}
