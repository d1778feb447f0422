//! Selection strategies consuming a stream and driving an objective.
//!
//! Every selector owns its [`SubmodularFunction`] replica(s), consumes one
//! item at a time (or a finite batch via [`Selector::fit`]) and exposes the
//! current solution and objective value on demand. They differ in memory
//! footprint, in how many parallel candidate solutions they maintain and
//! in approximation guarantee; see [algorithm] for the comparison.
//!
//! - [`Greedy`]
//!     - Batch-only, `1 − 1/e` guarantee.
//! - [`Random`]
//!     - Seeded reservoir baseline.
//! - [`IndependentSetImprovement`]
//!     - Online replacement by insertion-time weights, `1/4` guarantee.
//! - [`SieveStreaming`], [`SieveStreamingPp`], [`Salsa`]
//!     - Parallel thresholded candidates over a geometric grid of guesses
//!       for the optimum, `1/2 − ε` guarantee.
//! - [`ThreeSieves`]
//!     - Single candidate with a rejection-counted decaying threshold.
//!
//! [algorithm]: crate::algorithm
//! [`SubmodularFunction`]: crate::objective::SubmodularFunction

use crate::{objective::SubmodularFunction, Error};

pub(crate) use self::sieve::Sieve;

pub use self::{
    greedy::Greedy,
    independent_set::IndependentSetImprovement,
    random::Random,
    salsa::Salsa,
    sieve_streaming::SieveStreaming,
    sieve_streaming_pp::SieveStreamingPp,
    three_sieves::{ThreeSieves, ThresholdStrategy},
};

mod greedy;
mod independent_set;
mod random;
mod salsa;
mod sieve;
mod sieve_streaming;
mod sieve_streaming_pp;
mod three_sieves;

// ======================================================================
// Selector - PUBLIC

/// Common contract of all selection strategies.
///
/// A selector is constructed with its hyperparameters, receives a
/// monotonic sequence of items and is then queried; feeding more items
/// after consuming [`solution`] is not checked but unsupported. All items
/// must share one dimension; the first item fixes it and any later
/// mismatch is [`Error::DimensionMismatch`].
///
/// [`solution`]: Selector::solution
pub trait Selector<F: SubmodularFunction> {
    /// Consumes a single item, probing the objective zero or more times
    /// and possibly committing it into a candidate solution.
    fn next(&mut self, item: &[f64]) -> Result<(), Error>;

    /// Consumes a finite batch by iterating [`next`] over it.
    ///
    /// [`Greedy`] overrides this with the offline greedy sweep (and is the
    /// only selector whose `next` is unsupported). An empty batch is fine:
    /// the solution stays empty and the objective value `0`.
    ///
    /// [`next`]: Selector::next
    fn fit<I, T>(&mut self, items: I) -> Result<(), Error>
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        T: AsRef<[f64]>,
    {
        for item in items {
            self.next(item.as_ref())?;
        }
        Ok(())
    }

    /// Returns the current best candidate solution in slot order.
    fn solution(&self) -> &[Vec<f64>];

    /// Returns the objective value of [`solution`], `0` while empty.
    ///
    /// [`solution`]: Selector::solution
    fn fval(&self) -> f64;

    /// Returns how many parallel candidate solutions are currently alive.
    fn num_candidate_solutions(&self) -> usize {
        1
    }

    /// Returns how many items are stored across all candidate solutions.
    fn num_elements_stored(&self) -> usize {
        self.solution().len()
    }
}

// ======================================================================
// FUNCTIONS - CRATE

pub(crate) fn validate_cardinality(k: usize) -> Result<(), Error> {
    if k == 0 {
        Err(Error::InvalidCardinality { k })
    } else {
        Ok(())
    }
}

pub(crate) fn validate_epsilon(epsilon: f64) -> Result<(), Error> {
    if epsilon > 0.0 && epsilon < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidEpsilon { epsilon })
    }
}

pub(crate) fn validate_singleton_bound(bound: f64) -> Result<(), Error> {
    if bound.is_finite() && bound > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidSingletonBound { bound })
    }
}

// The first item fixes the expected dimension; everything after must
// match.
pub(crate) fn check_dimension(expected: &mut Option<usize>, item: &[f64]) -> Result<(), Error> {
    match *expected {
        Some(dim) if dim == item.len() => Ok(()),
        Some(dim) => Err(Error::DimensionMismatch {
            expected: dim,
            got: item.len(),
        }),
        None => {
            *expected = Some(item.len());
            Ok(())
        }
    }
}

// Geometric grid `{(1+ε)^i : lower ≤ (1+ε)^i ≤ upper}`, ascending.
//
// Grid points are derived from the exponent alone so that regenerating an
// overlapping range reproduces bit-identical thresholds; the sieve
// selectors rely on this for exact-match deduplication.
pub(crate) fn threshold_grid(lower: f64, upper: f64, epsilon: f64) -> Vec<f64> {
    let mut grid = Vec::new();
    if !lower.is_finite() || lower <= 0.0 {
        return grid;
    }

    let base = 1.0 + epsilon;
    let mut exponent = (lower.ln() / base.ln()).ceil() as i32;
    let mut value = base.powi(exponent);
    while value <= upper {
        grid.push(value);
        exponent += 1;
        value = base.powi(exponent);
    }
    grid
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // check_dimension

    #[test]
    fn test_check_dimension() {
        let mut expected = None;

        assert_eq!(check_dimension(&mut expected, &[0.0, 0.0]), Ok(()));
        assert_eq!(expected, Some(2));
        assert_eq!(check_dimension(&mut expected, &[1.0, 1.0]), Ok(()));
        assert_eq!(
            check_dimension(&mut expected, &[1.0]),
            Err(Error::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    // ============================================================
    // threshold_grid

    #[test]
    fn grid_covers_range() {
        let grid = threshold_grid(1.0, 6.0, 0.1);

        assert!(!grid.is_empty());
        assert!(grid[0] >= 1.0 && grid[0] < 1.1);
        assert!(*grid.last().unwrap() <= 6.0);
        for pair in grid.windows(2) {
            crate::test_util::assert_close(pair[1] / pair[0], 1.1, 1e-12);
        }
    }

    #[test]
    fn grid_is_reproducible_over_overlaps() {
        let wide = threshold_grid(0.5, 6.0, 0.1);
        let narrow = threshold_grid(1.0, 6.0, 0.1);

        for value in &narrow {
            assert!(wide.contains(value));
        }
    }

    #[test]
    fn grid_of_degenerate_range_is_empty() {
        assert!(threshold_grid(0.0, 6.0, 0.1).is_empty());
        assert!(threshold_grid(-1.0, 6.0, 0.1).is_empty());
        assert!(threshold_grid(6.0, 1.0, 0.1).is_empty());
        assert!(threshold_grid(f64::INFINITY, 1.0, 0.1).is_empty());
    }
}
