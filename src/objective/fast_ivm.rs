use crate::{
    kernel::Kernel,
    objective::{self, CholeskyFactor, SubmodularFunction, DIAGONAL_FLOOR},
    Error,
};

// ======================================================================
// FastIvm - PUBLIC

/// Informative Vector Machine objective with an incremental Cholesky
/// factor.
///
/// [`FastIvm`] caches the lower-triangular factor `L` of the regularized
/// Gram matrix `I + σ⁻²·G(S)` and keeps `f(S) = Σᵢ ln L[i][i]` current
/// across commits. An append probe (`pos == |S|`) is one forward
/// substitution, `O(|S|²)`; committing it writes one new row. Overwriting
/// an interior slot (`pos < |S|`) invalidates the rows below it and falls
/// back to an `O(|S|³)` rebuild of the live block, which is why
/// replacement-style selectors document it as their rare path.
///
/// A probe whose squared diagonal `d²` comes out non-positive means the
/// kernel is not positive semi-definite on the augmented summary (or the
/// candidate is numerically indistinguishable from a stored item). The
/// probe then reports the current value unchanged, a committed update
/// clamps `d²` to [`DIAGONAL_FLOOR`], and either way the event is counted;
/// see [`num_degeneracies`].
///
/// [`num_degeneracies`]: FastIvm::num_degeneracies
#[derive(Clone, Debug)]
pub struct FastIvm<K: Kernel> {
    max_items: usize,
    kernel: K,
    inv_sigma_sq: f64,

    factor: CholeskyFactor,
    fval: f64,
    degeneracies: u64,
}

impl<K: Kernel> FastIvm<K> {
    /// Creates a new objective for summaries of at most `max_items` items
    /// with regularizer `sigma`.
    ///
    /// Allocates the `(max_items + 1)²` factor up front; the extra
    /// row/column is scratch for append probes at a full summary.
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
                factor: CholeskyFactor::new(max_items + 1),
                fval: 0.0,
                degeneracies: 0,
            })
        }
    }

    /// Returns the cached objective value of the committed summary.
    pub fn fval(&self) -> f64 {
        self.fval
    }

    /// Returns the number of committed items.
    pub fn num_items(&self) -> usize {
        self.factor.len()
    }

    /// Returns how many degenerate-extension events this instance has
    /// seen: rejected probes plus clamped commits.
    pub fn num_degeneracies(&self) -> u64 {
        self.degeneracies
    }
}

// ======================================================================
// FastIvm - IMPL SubmodularFunction

impl<K: Kernel> SubmodularFunction for FastIvm<K> {
    fn peek(&mut self, solution: &[Vec<f64>], item: &[f64], pos: usize) -> f64 {
        let n = self.factor.len();
        assert!(pos <= n);
        debug_assert_eq!(n, solution.len());

        if pos == n {
            let (_, d2) = self.append_probe(solution, item);
            if d2 <= 0.0 {
                self.degeneracies += 1;
                log::debug!("degenerate extension probe rejected (d2 = {})", d2);
                return self.fval;
            }
            self.fval + 0.5 * d2.ln()
        } else {
            let (value, clamped) =
                objective::log_det(&self.kernel, self.inv_sigma_sq, solution, Some((pos, item)));
            if clamped > 0 {
                self.degeneracies += clamped;
                log::debug!("degenerate replacement probe: {} pivots clamped", clamped);
            }
            value
        }
    }

    fn update(&mut self, solution: &[Vec<f64>], item: &[f64], pos: usize) -> f64 {
        let n = self.factor.len();
        assert!(pos <= n);
        debug_assert_eq!(n, solution.len());

        if pos == n {
            let (ell, mut d2) = self.append_probe(solution, item);
            if d2 <= 0.0 {
                self.degeneracies += 1;
                log::warn!("degenerate extension committed, clamping d2 = {}", d2);
                d2 = DIAGONAL_FLOOR;
            }
            self.factor.append_row(&ell, d2.sqrt());
            self.fval += 0.5 * d2.ln();
        } else {
            let matrix =
                objective::regularized_gram(&self.kernel, self.inv_sigma_sq, solution, Some((pos, item)));
            let clamped = self.factor.refactor(&matrix, n);
            if clamped > 0 {
                self.degeneracies += clamped;
                log::warn!("degenerate replacement committed: {} pivots clamped", clamped);
            }
            self.fval = self.factor.log_diag_sum();
        }
        self.fval
    }

    fn evaluate(&self, solution: &[Vec<f64>]) -> f64 {
        let (value, _) = objective::log_det(&self.kernel, self.inv_sigma_sq, solution, None);
        value
    }
}

// ======================================================================
// FastIvm - PRIVATE

impl<K: Kernel> FastIvm<K> {
    // Forward-substitution step of an append: returns the new factor row
    // `ℓ` and the squared diagonal `d² = 1 + σ⁻²·k(x, x) − ‖ℓ‖²`.
    fn append_probe(&self, solution: &[Vec<f64>], item: &[f64]) -> (Vec<f64>, f64) {
        let n = self.factor.len();

        let mut rhs = Vec::with_capacity(n);
        for stored in solution {
            rhs.push(self.inv_sigma_sq * self.kernel.eval(stored, item));
        }

        let mut ell = vec![0.0; n];
        self.factor.forward_solve(&rhs, &mut ell);

        let mut d2 = 1.0 + self.inv_sigma_sq * self.kernel.eval(item, item);
        for coeff in &ell {
            d2 -= coeff * coeff;
        }
        (ell, d2)
    }
}

// ======================================================================
// TESTS
