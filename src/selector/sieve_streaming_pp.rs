use crate::{
    objective::SubmodularFunction,
    selector::{self, Selector, Sieve},
    Error,
};

// ======================================================================
// SieveStreamingPp - PUBLIC

/// [`SieveStreaming`] variant with a dynamic lower bound from the best
/// current sieve.
///
/// The best sieve value `LB` already certifies `OPT ≥ LB`, so guesses
/// below `τ_min = max(LB, m) / (2K)` are pruned the moment they fall
/// behind and new guesses only span `[τ_min, m]`. Each sieve accepts an
/// item while it holds fewer than `K` and the marginal gain clears its
/// guess `v` directly. Same `1/2 − ε` guarantee as [`SieveStreaming`]
/// with a strictly smaller live grid, at the cost of slightly more
/// bookkeeping per item.
///
/// [`SieveStreaming`]: crate::selector::SieveStreaming
pub struct SieveStreamingPp<F: SubmodularFunction> {
    k: usize,
    epsilon: f64,
    probe: F,
    sieves: Vec<Sieve<F>>,

    max_singleton: f64,
    lower_bound: f64,
    dim: Option<usize>,
}

impl<F: SubmodularFunction> SieveStreamingPp<F> {
    /// Creates a new selector with upper bound `singleton_bound` on the
    /// maximum singleton value.
    ///
    /// The bound still adapts upwards if the stream exceeds it.
    pub fn new(
        k: usize,
        objective: F,
        singleton_bound: f64,
        epsilon: f64,
    ) -> Result<Self, Error> {
        selector::validate_cardinality(k)?;
        selector::validate_singleton_bound(singleton_bound)?;
        selector::validate_epsilon(epsilon)?;

        let cutoff = singleton_bound / (2.0 * k as f64);
        let sieves = selector::threshold_grid(cutoff, singleton_bound, epsilon)
            .into_iter()
            .map(|threshold| Sieve::new(threshold, objective.clone()))
            .collect();

        Ok(Self {
            k,
            epsilon,
            probe: objective,
            sieves,
            max_singleton: singleton_bound,
            lower_bound: 0.0,
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
// SieveStreamingPp - IMPL Selector

impl<F: SubmodularFunction> Selector<F> for SieveStreamingPp<F> {
    fn next(&mut self, item: &[f64]) -> Result<(), Error> {
        selector::check_dimension(&mut self.dim, item)?;

        let singleton = self.probe.peek(&[], item, 0);
        let bound_grew = singleton > self.max_singleton;
        if bound_grew {
            self.max_singleton = singleton;
        }

        let cutoff = self.lower_bound.max(self.max_singleton) / (2.0 * self.k as f64);
        let before = self.sieves.len();
        self.sieves.retain(|sieve| sieve.threshold >= cutoff);

        if bound_grew || self.sieves.len() < before || self.sieves.is_empty() {
            for threshold in selector::threshold_grid(cutoff, self.max_singleton, self.epsilon) {
                if !self.sieves.iter().any(|sieve| sieve.threshold == threshold) {
                    self.sieves.push(Sieve::new(threshold, self.probe.clone()));
                }
            }
        }

        for sieve in &mut self.sieves {
            if sieve.is_full(self.k) {
                continue;
            }
            if sieve.gain(item) >= sieve.threshold {
                sieve.accept(item);
                if sieve.fval() > self.lower_bound {
                    self.lower_bound = sieve.fval();
                }
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
