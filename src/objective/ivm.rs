use crate::{
    kernel::Kernel,
    objective::{self, SubmodularFunction},
    Error,
};

// ======================================================================
// Ivm - PUBLIC

/// Informative Vector Machine objective evaluated from scratch.
///
/// Every probe factorizes the regularized Gram matrix of the hypothetical
/// summary, which costs `O(|S|³)`. [`Ivm`] is meant for studying the
/// objective and for cross-checking [`FastIvm`]; production selectors
/// should run on [`FastIvm`].
///
/// [`FastIvm`]: crate::objective::FastIvm
#[derive(Clone, Debug)]
pub struct Ivm<K: Kernel> {
    max_items: usize,
    kernel: K,
    inv_sigma_sq: f64,
}

impl<K: Kernel> Ivm<K> {
    /// Creates a new objective for summaries of at most `max_items` items
    /// with regularizer `sigma`.
    pub fn new(max_items: usize, kernel: K, sigma: f64) -> Result<Self, Error> {
        if max_items == 0 {
            Err(Error::InvalidCardinality { k: max_items })
        } else if !sigma.is_finite() || sigma <= 0.0 {
            Err(Error::InvalidSigma { sigma })
        } else {
            Ok(Self {
                max_items,
                kernel,
                inv_sigma_sq: 1.0 / (sigma * sigma),
            })
        }
    }
}

// ======================================================================
// Ivm - IMPL SubmodularFunction

impl<K: Kernel> SubmodularFunction for Ivm<K> {
    fn peek(&mut self, solution: &[Vec<f64>], item: &[f64], pos: usize) -> f64 {
        assert!(pos <= solution.len());
        debug_assert!(solution.len() <= self.max_items);

        let (value, clamped) =
            objective::log_det(&self.kernel, self.inv_sigma_sq, solution, Some((pos, item)));
        if clamped > 0 {
            log::debug!("degenerate probe: {} pivots clamped", clamped);
        }
        value
    }

    fn update(&mut self, solution: &[Vec<f64>], item: &[f64], pos: usize) -> f64 {
        // Nothing to cache; committing is the same computation as probing.
        self.peek(solution, item, pos)
    }

    fn evaluate(&self, solution: &[Vec<f64>]) -> f64 {
        let (value, clamped) = objective::log_det(&self.kernel, self.inv_sigma_sq, solution, None);
        if clamped > 0 {
            log::debug!("degenerate evaluation: {} pivots clamped", clamped);
        }
        value
    }
}

// ======================================================================
// TESTS
