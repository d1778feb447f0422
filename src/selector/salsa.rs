use crate::{
    objective::SubmodularFunction,
    selector::{self, Selector, Sieve},
    Error,
};

// ======================================================================
// CONST - PRIVATE

// Share of the guess `v` a candidate must reach, per regime.
const HIGH_SHARE: f64 = 2.0 / 3.0;
const DENSE_SHARE: f64 = 0.5;
const LOW_SHARE: f64 = 0.25;

// ======================================================================
// Salsa - PUBLIC

/// Adaptive sieve routing items to per-regime sub-strategies.
///
/// Like [`SieveStreaming`] this keeps one entry per guess
/// `v ∈ {(1+ε)ⁱ} ∩ [m, 2Km]`, but each guess owns three candidates tuned
/// to different stream compositions, and every arriving item is routed to
/// exactly one of them by its singleton value `f({x})`:
///
/// - **high-value** (`f({x}) ≥ v/(2K)`): items that could carry a large
///   share of `v` on their own; acceptance needs `2/3` of the remaining
///   gap per slot.
/// - **dense** (`f({x}) ≥ v/(4K)`): the classic sieve regime; acceptance
///   needs `1/2` of the gap per slot.
/// - **low** (below): streams whose value arrives in many small
///   increments; acceptance needs `1/4` of the gap per slot.
///
/// Queries return the best candidate across all regimes and guesses.
///
/// [`SieveStreaming`]: crate::selector::SieveStreaming
pub struct Salsa<F: SubmodularFunction> {
    k: usize,
    probe: F,
    guesses: Vec<Guess<F>>,
    dim: Option<usize>,
}

// ======================================================================
// Guess - PRIVATE

struct Guess<F: SubmodularFunction> {
    threshold: f64,
    high: Sieve<F>,
    dense: Sieve<F>,
    low: Sieve<F>,
}

impl<F: SubmodularFunction> Guess<F> {
    fn candidates(&self) -> [&Sieve<F>; 3] {
        [&self.high, &self.dense, &self.low]
    }
}

impl<F: SubmodularFunction> Salsa<F> {
    /// Creates a new selector with a known upper bound `singleton_bound`
    /// on the maximum singleton value.
    pub fn new(
        k: usize,
        objective: F,
        singleton_bound: f64,
        epsilon: f64,
    ) -> Result<Self, Error> {
        selector::validate_cardinality(k)?;
        selector::validate_singleton_bound(singleton_bound)?;
        selector::validate_epsilon(epsilon)?;

        let guesses = selector::threshold_grid(singleton_bound, 2.0 * k as f64 * singleton_bound, epsilon)
            .into_iter()
            .map(|threshold| Guess {
                threshold,
                high: Sieve::new(threshold, objective.clone()),
                dense: Sieve::new(threshold, objective.clone()),
                low: Sieve::new(threshold, objective.clone()),
            })
            .collect();

        Ok(Self {
            k,
            probe: objective,
            guesses,
            dim: None,
        })
    }

    fn best(&self) -> Option<&Sieve<F>> {
        let mut best: Option<&Sieve<F>> = None;
        for guess in &self.guesses {
            for sieve in guess.candidates() {
                if best.map_or(true, |leader| sieve.fval() > leader.fval()) {
                    best = Some(sieve);
                }
            }
        }
        best
    }
}

// ======================================================================
// Salsa - IMPL Selector

impl<F: SubmodularFunction> Selector<F> for Salsa<F> {
    fn next(&mut self, item: &[f64]) -> Result<(), Error> {
        selector::check_dimension(&mut self.dim, item)?;

        let singleton = self.probe.peek(&[], item, 0);
        let slots = self.k as f64;

        for guess in &mut self.guesses {
            let v = guess.threshold;
            let (sieve, share) = if singleton >= v / (2.0 * slots) {
                (&mut guess.high, HIGH_SHARE)
            } else if singleton >= v / (4.0 * slots) {
                (&mut guess.dense, DENSE_SHARE)
            } else {
                (&mut guess.low, LOW_SHARE)
            };

            if sieve.is_full(self.k) {
                continue;
            }
            let gap = (share * v - sieve.fval()) / (self.k - sieve.len()) as f64;
            if sieve.gain(item) >= gap {
                sieve.accept(item);
            }
        }
        Ok(())
    }

    fn solution(&self) -> &[Vec<f64>] {
        match self.best() {
            Some(sieve) => sieve.solution(),
            None => &[],
        }
    }

    fn fval(&self) -> f64 {
        self.best().map_or(0.0, |sieve| sieve.fval())
    }

    fn num_candidate_solutions(&self) -> usize {
        3 * self.guesses.len()
    }

    fn num_elements_stored(&self) -> usize {
        self.guesses
            .iter()
            .map(|guess| guess.candidates().iter().map(|sieve| sieve.len()).sum::<usize>())
            .sum()
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

    selector_contract_tests! {Salsa::new(3, test_util::rbf_objective(3), 1.0, 0.1).unwrap()}

    // ============================================================
    // SELECTION

    #[test]
    fn matches_greedy_on_the_three_point_stream() {
        let items = test_util::three_point_stream();

        let mut salsa = Salsa::new(3, test_util::rbf_objective(3), 1.0, 0.1).unwrap();
        salsa.fit(&items).unwrap();

        assert_eq!(
            test_util::sorted_items(salsa.solution()),
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]
        );
    }

    #[test]
    fn within_half_of_greedy() {
        use crate::selector::Greedy;

        let items = test_util::generate_items(60, 4, 5);

        let mut greedy = Greedy::new(3, test_util::rbf_objective(3)).unwrap();
        greedy.fit(&items).unwrap();

        let mut salsa = Salsa::new(3, test_util::rbf_objective(3), 1.0, 0.1).unwrap();
        salsa.fit(&items).unwrap();

        assert!(salsa.fval() >= 0.5 * greedy.fval() - 0.1);
    }

    #[test]
    fn three_candidates_per_guess() {
        let salsa = Salsa::new(3, test_util::rbf_objective(3), 1.0, 0.1).unwrap();

        // Same 19-guess grid as SieveStreaming, three regimes each.
        assert_eq!(salsa.num_candidate_solutions(), 57);
    }

    // ==================================================
    // ERRORS

    #[test]
    fn invalid_parameters_in_new() {
        assert_eq!(
            Salsa::new(0, test_util::rbf_objective(3), 1.0, 0.1).err(),
            Some(Error::InvalidCardinality { k: 0 })
        );
        assert_eq!(
            Salsa::new(3, test_util::rbf_objective(3), f64::NAN, 0.1).is_err(),
            true
        );
        assert_eq!(
            Salsa::new(3, test_util::rbf_objective(3), 1.0, 0.0).err(),
            Some(Error::InvalidEpsilon { epsilon: 0.0 })
        );
    }
}
