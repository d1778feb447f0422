use crate::{
    objective::SubmodularFunction,
    selector::{self, Selector, Sieve},
    Error,
};

// ======================================================================
// SieveStreaming - PUBLIC

/// Parallel thresholded sieves over a geometric grid of guesses for the
/// optimum.
///
/// One sieve per guess `v ∈ {(1+ε)ⁱ} ∩ [m, 2Km]`, where `m` bounds the
/// maximum singleton value. A sieve accepts an item while it holds fewer
/// than `K` and the marginal gain clears its threshold share
/// `(v/2 − fval) / (K − |S|)`; queries return the best sieve. This is the
/// classic `1/2 − ε` streaming algorithm, paying for the guarantee with
/// `O(log(2K)/ε)` live sieves, each holding its own objective replica.
///
/// The bound `m` is either supplied up front ([`new`]) or estimated from
/// the stream as the running maximum singleton value ([`adaptive`]); in
/// the adaptive mode, newly covered guesses are added as `m` grows and
/// sieves whose guess falls below `m/2` are discarded.
///
/// [`new`]: SieveStreaming::new
/// [`adaptive`]: SieveStreaming::adaptive
pub struct SieveStreaming<F: SubmodularFunction> {
    k: usize,
    epsilon: f64,
    probe: F,
    sieves: Vec<Sieve<F>>,

    max_singleton: f64,
    adaptive: bool,
    dim: Option<usize>,
}

impl<F: SubmodularFunction> SieveStreaming<F> {
    /// Creates a new selector with a known upper bound `singleton_bound`
    /// on the maximum singleton value; the full threshold grid is built up
    /// front.
    pub fn new(
        k: usize,
        objective: F,
        singleton_bound: f64,
        epsilon: f64,
    ) -> Result<Self, Error> {
        selector::validate_cardinality(k)?;
        selector::validate_singleton_bound(singleton_bound)?;
        selector::validate_epsilon(epsilon)?;

        let sieves = selector::threshold_grid(singleton_bound, 2.0 * k as f64 * singleton_bound, epsilon)
            .into_iter()
            .map(|threshold| Sieve::new(threshold, objective.clone()))
            .collect();

        Ok(Self {
            k,
            epsilon,
            probe: objective,
            sieves,
            max_singleton: singleton_bound,
            adaptive: false,
            dim: None,
        })
    }

    /// Creates a new selector that estimates the singleton bound from the
    /// stream instead of requiring it up front.
    pub fn adaptive(k: usize, objective: F, epsilon: f64) -> Result<Self, Error> {
        selector::validate_cardinality(k)?;
        selector::validate_epsilon(epsilon)?;

        Ok(Self {
            k,
            epsilon,
            probe: objective,
            sieves: Vec::new(),
            max_singleton: 0.0,
            adaptive: true,
            dim: None,
        })
    }

    fn best(&self) -> Option<&Sieve<F>> {
        let mut best: Option<&Sieve<F>> = None;
        for sieve in &self.sieves {
            if best.map_or(true, |leader| sieve.fval() > leader.fval()) {
                best = Some(sieve);
            }
        }
        best
    }
}

// ======================================================================
// SieveStreaming - IMPL Selector

impl<F: SubmodularFunction> Selector<F> for SieveStreaming<F> {
    fn next(&mut self, item: &[f64]) -> Result<(), Error> {
        selector::check_dimension(&mut self.dim, item)?;

        if self.adaptive {
            let singleton = self.probe.peek(&[], item, 0);
            if singleton > self.max_singleton {
                self.max_singleton = singleton;

                let cutoff = self.max_singleton / 2.0;
                self.sieves.retain(|sieve| sieve.threshold >= cutoff);

                let upper = 2.0 * self.k as f64 * self.max_singleton;
                for threshold in selector::threshold_grid(self.max_singleton, upper, self.epsilon) {
                    if !self.sieves.iter().any(|sieve| sieve.threshold == threshold) {
                        self.sieves.push(Sieve::new(threshold, self.probe.clone()));
                    }
                }
            }
        }

        for sieve in &mut self.sieves {
            if sieve.is_full(self.k) {
                continue;
            }
            let share = (sieve.threshold / 2.0 - sieve.fval()) / (self.k - sieve.len()) as f64;
            if sieve.gain(item) >= share {
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
        self.sieves.len()
    }

    fn num_elements_stored(&self) -> usize {
        self.sieves.iter().map(|sieve| sieve.len()).sum()
    }
}

// ======================================================================
// TESTS
