use crate::objective::SubmodularFunction;

// ======================================================================
// FnObjective - PUBLIC

/// [`SubmodularFunction`] implemented by an arbitrary set-function
/// closure.
///
/// Probes materialize the hypothetical summary and call straight through,
/// so every operation costs one full evaluation; this is the escape hatch
/// for custom objectives, not a fast path. Submodularity and monotonicity
/// of the closure are the caller's obligation.
///
/// # Examples
///
/// Plain coverage-style objective counting distinct leading signs:
///
/// ```rust
/// use submodular_stream::objective::{FnObjective, SubmodularFunction};
///
/// let mut objective = FnObjective::new(|solution: &[Vec<f64>]| {
///     let positive = solution.iter().any(|item| item[0] > 0.0) as usize;
///     let negative = solution.iter().any(|item| item[0] < 0.0) as usize;
///     (positive + negative) as f64
/// });
///
/// let solution = vec![vec![1.0], vec![2.0]];
/// assert_eq!(objective.peek(&solution, &[-1.0], 2), 2.0);
/// assert_eq!(objective.peek(&solution, &[3.0], 2), 1.0);
/// ```
#[derive(Clone)]
pub struct FnObjective<F>
where
    F: Fn(&[Vec<f64>]) -> f64 + Clone,
{
    function: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[Vec<f64>]) -> f64 + Clone,
{
    /// Wraps `function` as a [`SubmodularFunction`].
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

// ======================================================================
// FnObjective - IMPL SubmodularFunction

impl<F> SubmodularFunction for FnObjective<F>
where
    F: Fn(&[Vec<f64>]) -> f64 + Clone,
{
    fn peek(&mut self, solution: &[Vec<f64>], item: &[f64], pos: usize) -> f64 {
        (self.function)(&hypothetical(solution, item, pos))
    }

    fn update(&mut self, solution: &[Vec<f64>], item: &[f64], pos: usize) -> f64 {
        // No caches to commit into.
        self.peek(solution, item, pos)
    }

    fn evaluate(&self, solution: &[Vec<f64>]) -> f64 {
        (self.function)(solution)
    }
}

// ======================================================================
// FUNCTIONS - PRIVATE

fn hypothetical(solution: &[Vec<f64>], item: &[f64], pos: usize) -> Vec<Vec<f64>> {
    assert!(pos <= solution.len());

    let mut items = solution.to_vec();
    if pos == items.len() {
        items.push(item.to_vec());
    } else {
        items[pos] = item.to_vec();
    }
    items
}

// ======================================================================
// TESTS
