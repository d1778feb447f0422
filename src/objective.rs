//! Submodular set functions scoring candidate summaries.
//!
//! The objectives in this module implement the Informative Vector Machine
//! log-determinant `f(S) = ½·log det(I + σ⁻²·G)` over the Gram matrix `G`
//! of a [`Kernel`]; see [algorithm] for the derivation and why an
//! incremental Cholesky factor is the natural representation.
//!
//! - [`Ivm`]
//!     - From-scratch evaluation on every call. Simple reference
//!       implementation, also the cross-check used by the tests.
//! - [`FastIvm`]
//!     - Caches the Cholesky factor; `O(|S|²)` probes and appends.
//!       This is what the selectors are meant to run on.
//! - [`FnObjective`]
//!     - Escape hatch wrapping an arbitrary set function.
//!
//! [algorithm]: crate::algorithm
//! [`Kernel`]: crate::kernel::Kernel

use crate::kernel::Kernel;

pub(crate) use self::factor::CholeskyFactor;

pub use self::{fast_ivm::FastIvm, function::FnObjective, ivm::Ivm};

mod factor;
mod fast_ivm;
mod function;
mod ivm;

// ======================================================================
// CONST - PUBLIC

/// Floor applied to a committed squared diagonal entry of the Cholesky
/// factor when a degenerate extension would drive it to zero or below.
///
/// The floor only exists to keep the log-determinant finite; every clamp
/// is counted as a degeneracy event on the objective.
pub const DIAGONAL_FLOOR: f64 = 1e-12;

// ======================================================================
// SubmodularFunction - PUBLIC

/// Non-negative monotone submodular set function over ordered summaries.
///
/// `solution` is the current summary; slot `pos ∈ [0, |S|]` is the slot
/// being probed or filled, with `pos == |S|` meaning "append". The
/// function never mutates the summary itself: [`update`] commits the
/// substitution into the function's internal caches and the **caller**
/// then updates its stored summary to match.
///
/// `Clone` must produce a fully independent replica, caches included;
/// sieve-family selectors rely on this to maintain parallel candidate
/// solutions.
///
/// [`update`]: SubmodularFunction::update
pub trait SubmodularFunction: Clone {
    /// Returns `f(S with slot pos set to x)` without committing anything.
    ///
    /// Takes `&mut self` so implementations may keep scratch space and
    /// event counters; observable state must be left untouched.
    fn peek(&mut self, solution: &[Vec<f64>], item: &[f64], pos: usize) -> f64;

    /// Commits the substitution (or append, when `pos == |S|`) and returns
    /// the new `f(S)`.
    fn update(&mut self, solution: &[Vec<f64>], item: &[f64], pos: usize) -> f64;

    /// Evaluates `f(S)` from scratch, independent of any cached state.
    fn evaluate(&self, solution: &[Vec<f64>]) -> f64;
}

// ======================================================================
// FUNCTIONS - CRATE

// Builds the regularized Gram matrix `I + σ⁻²·G` as a flat row-major
// square, optionally with one slot substituted. `slot == solution.len()`
// appends the substitute as a final row/column instead.
pub(crate) fn regularized_gram<K: Kernel>(
    kernel: &K,
    inv_sigma_sq: f64,
    solution: &[Vec<f64>],
    slot: Option<(usize, &[f64])>,
) -> Vec<f64> {
    let n = match slot {
        Some((pos, _)) if pos == solution.len() => solution.len() + 1,
        _ => solution.len(),
    };

    let mut matrix = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let value = inv_sigma_sq * kernel.eval(slotted(solution, slot, i), slotted(solution, slot, j));
            matrix[i * n + j] = value;
            matrix[j * n + i] = value;
        }
        matrix[i * n + i] += 1.0;
    }
    matrix
}

// Row `index` of the summary with `slot` substituted (or appended, when
// the slot position equals the summary length).
fn slotted<'a>(
    solution: &'a [Vec<f64>],
    slot: Option<(usize, &'a [f64])>,
    index: usize,
) -> &'a [f64] {
    match slot {
        Some((pos, item)) if pos == index => item,
        _ => &solution[index],
    }
}

// From-scratch `½·log det(I + σ⁻²·G)` of the summary with an optional slot
// substituted. Returns the value and the number of clamped diagonals.
pub(crate) fn log_det<K: Kernel>(
    kernel: &K,
    inv_sigma_sq: f64,
    solution: &[Vec<f64>],
    slot: Option<(usize, &[f64])>,
) -> (f64, u64) {
    let matrix = regularized_gram(kernel, inv_sigma_sq, solution, slot);
    let n = match slot {
        Some((pos, _)) if pos == solution.len() => solution.len() + 1,
        _ => solution.len(),
    };
    if n == 0 {
        return (0.0, 0);
    }

    let mut factor = CholeskyFactor::new(n);
    let clamped = factor.refactor(&matrix, n);
    (factor.log_diag_sum(), clamped)
}

// ======================================================================
// TESTS
