use crate::{
    objective::SubmodularFunction,
    selector::{self, Selector},
    Error,
};

// ======================================================================
// ThresholdStrategy - PUBLIC

/// How [`ThreeSieves`] relaxes its threshold after `T` consecutive
/// rejections.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ThresholdStrategy {
    /// Step down one geometric grid point: `v ← v·(1 − ε)`.
    Sieve,
    /// Subtract the fixed amount `ε`: `v ← v − ε`.
    Constant,
}

// ======================================================================
// ThreeSieves - PUBLIC

/// Single-threshold sieve with a rejection counter.
///
/// Instead of maintaining a grid of parallel candidates, [`ThreeSieves`]
/// keeps exactly one candidate and one threshold `v`, starting at the
/// singleton bound. An item is accepted while `|S| < K` and
///
/// ```text
/// f(S ∪ {x}) − f(S) ≥ (v − f(S)) / (K − |S|)
/// ```
///
/// every acceptance resets the rejection counter; once `T` items in a row
/// fail the test the threshold relaxes one step (see
/// [`ThresholdStrategy`]) and the counter resets. The confidence that no
/// near-`v` item is still coming grows with `T`, which makes `T` the
/// memory-free knob trading summary quality against adaptation speed.
/// Items arriving after the summary is full are ignored.
pub struct ThreeSieves<F: SubmodularFunction> {
    k: usize,
    epsilon: f64,
    strategy: ThresholdStrategy,
    limit: usize,

    objective: F,
    solution: Vec<Vec<f64>>,
    fval: f64,

    threshold: f64,
    rejections: usize,
    dim: Option<usize>,
}

impl<F: SubmodularFunction> ThreeSieves<F> {
    /// Creates a new selector.
    ///
    /// `singleton_bound` is the initial threshold, `limit` the number `T`
    /// of consecutive rejections tolerated before the threshold relaxes;
    /// `limit` must be at least 1.
    pub fn new(
        k: usize,
        objective: F,
        singleton_bound: f64,
        epsilon: f64,
        strategy: ThresholdStrategy,
        limit: usize,
    ) -> Result<Self, Error> {
        selector::validate_cardinality(k)?;
        selector::validate_singleton_bound(singleton_bound)?;
        selector::validate_epsilon(epsilon)?;
        if limit == 0 {
            return Err(Error::InvalidRejectionLimit { limit });
        }

        Ok(Self {
            k,
            epsilon,
            strategy,
            limit,
            objective,
            solution: Vec::new(),
            fval: 0.0,
            threshold: singleton_bound,
            rejections: 0,
            dim: None,
        })
    }

    /// Returns the current threshold `v`.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

// ======================================================================
// ThreeSieves - IMPL Selector

impl<F: SubmodularFunction> Selector<F> for ThreeSieves<F> {
    fn next(&mut self, item: &[f64]) -> Result<(), Error> {
        selector::check_dimension(&mut self.dim, item)?;

        let pos = self.solution.len();
        if pos == self.k {
            return Ok(());
        }

        let gain = self.objective.peek(&self.solution, item, pos) - self.fval;
        let share = (self.threshold - self.fval) / (self.k - pos) as f64;
        if gain >= share {
            self.fval = self.objective.update(&self.solution, item, pos);
            self.solution.push(item.to_vec());
            self.rejections = 0;
        } else {
            self.rejections += 1;
            if self.rejections >= self.limit {
                self.threshold = match self.strategy {
                    ThresholdStrategy::Sieve => self.threshold * (1.0 - self.epsilon),
                    ThresholdStrategy::Constant => self.threshold - self.epsilon,
                };
                self.rejections = 0;
            }
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
