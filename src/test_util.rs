use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    kernel::{FnKernel, RbfKernel},
    objective::{FastIvm, SubmodularFunction},
};

// ======================================================================
// FUNCTIONS - CRATE

pub(crate) fn generate_items(count: usize, dim: usize, seed: u8) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::from_seed([seed; 32]);
    (0..count)
        .map(|_| (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect()
}

// Three distinct points repeated four times; the stream shared by the
// end-to-end selector tests.
pub(crate) fn three_point_stream() -> Vec<Vec<f64>> {
    let points = [[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let mut items = Vec::new();
    for _ in 0..4 {
        for point in &points {
            items.push(point.to_vec());
        }
    }
    items
}

// The default objective of the selector tests: unit RBF kernel, unit
// regularizer.
pub(crate) fn rbf_objective(max_items: usize) -> FastIvm<RbfKernel> {
    FastIvm::new(max_items, RbfKernel::new(1.0, 1.0).unwrap(), 1.0).unwrap()
}

// Normalized linear kernel `⟨x, y⟩ / d`, rank-deficient on most tiny
// instances; pairs with the duplicate-selection tests.
pub(crate) fn linear_objective(
    max_items: usize,
) -> FastIvm<FnKernel<impl Fn(&[f64], &[f64]) -> f64 + Clone>> {
    let kernel = FnKernel::new(|x: &[f64], y: &[f64]| {
        x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>() / x.len() as f64
    });
    FastIvm::new(max_items, kernel, 1.0).unwrap()
}

pub(crate) fn sorted_items(items: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut items = items.to_vec();
    items.sort_by(|a, b| a.partial_cmp(b).unwrap());
    items
}

pub(crate) fn assert_close(got: f64, expected: f64, tolerance: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (got - expected).abs() <= tolerance * scale,
        "got {}, expected {} (tolerance {})",
        got,
        expected,
        tolerance
    );
}

// Exhaustive optimum over all subsets of at most `k` items, evaluated
// from scratch. Only for tiny inputs.
pub(crate) fn brute_force_optimum<F: SubmodularFunction>(
    objective: &F,
    items: &[Vec<f64>],
    k: usize,
) -> f64 {
    assert!(items.len() < 20);

    let mut best = 0.0;
    for mask in 0u32..(1u32 << items.len()) {
        if mask.count_ones() as usize > k {
            continue;
        }
        let subset: Vec<Vec<f64>> = items
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, item)| item.clone())
            .collect();
        let value = objective.evaluate(&subset);
        if value > best {
            best = value;
        }
    }
    best
}

// ======================================================================
// SELECTOR - SHARED CONTRACT TESTS

// Shared contract suite for the streaming selectors: `$new` must evaluate
// to a freshly constructed selector with `k = 3` over `rbf_objective(3)`.
macro_rules! selector_contract_tests {
    ($new:expr) => {
        #[test]
        fn cardinality_never_exceeded() {
            let mut selector = $new;
            let items = crate::test_util::generate_items(40, 4, 9);
            for item in &items {
                selector.next(item).unwrap();
                assert!(selector.solution().len() <= 3);
            }
        }

        #[test]
        fn empty_stream_yields_empty_solution() {
            let selector = $new;
            assert!(selector.solution().is_empty());
            assert_eq!(selector.fval(), 0.0);
            assert_eq!(selector.num_elements_stored(), 0);
        }

        #[test]
        fn rejects_dimension_mismatch() {
            let mut selector = $new;
            selector.next(&[0.0, 0.0, 0.0, 0.0]).unwrap();
            assert_eq!(
                selector.next(&[0.0]),
                Err(crate::Error::DimensionMismatch {
                    expected: 4,
                    got: 1
                })
            );
        }

        #[test]
        fn fval_matches_from_scratch_evaluation() {
            use crate::objective::SubmodularFunction;

            let mut selector = $new;
            let items = crate::test_util::generate_items(40, 4, 11);
            selector.fit(&items).unwrap();

            let reference = crate::test_util::rbf_objective(3).evaluate(selector.solution());
            crate::test_util::assert_close(selector.fval(), reference, 1e-6);
        }
    };
}
