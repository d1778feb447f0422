#![doc = include_str!(concat!(env!("OUT_DIR"), "/README-rustdocified.md"))]
#![deny(missing_docs)]

use std::fmt;

pub use crate::{
    summarizer::{BatchSummarizer, StreamSummarizer},
    summary::{Summary, SummaryIter},
};

#[cfg(test)]
#[macro_use]
mod test_util;

mod summarizer;
mod summary;

pub mod algorithm {
    #![doc = include_str!("algorithm.md")]
}
pub mod kernel;
pub mod objective;
pub mod selector;

// ======================================================================
// Error - PUBLIC

/// Represents all possible errors that can occur in this library.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// Given item has a different dimension than the items before it.
    ///
    /// - The first item fed to a selector fixes the dimension; all
    ///   following items must match it.
    DimensionMismatch {
        /// Dimension fixed by the first item.
        expected: usize,
        /// Dimension of the given item.
        got: usize,
    },

    /// Given summary size `k` is invalid: it must be at least 1.
    InvalidCardinality {
        /// Given invalid summary size.
        k: usize,
    },

    /// Given approximation slack `ε` is invalid: it must lie strictly
    /// between 0 and 1.
    InvalidEpsilon {
        /// Given invalid slack.
        epsilon: f64,
    },

    /// Given rejection limit `T` of [`ThreeSieves`] is invalid: it must
    /// be at least 1.
    ///
    /// [`ThreeSieves`]: crate::selector::ThreeSieves
    InvalidRejectionLimit {
        /// Given invalid limit.
        limit: usize,
    },

    /// Given RBF scale is invalid: it must be positive and finite.
    InvalidScale {
        /// Given invalid scale.
        scale: f64,
    },

    /// Given bandwidth or regularizer `σ` is invalid: it must be positive
    /// and finite.
    InvalidSigma {
        /// Given invalid sigma.
        sigma: f64,
    },

    /// Given upper bound on the maximum singleton value is invalid: it
    /// must be positive and finite.
    InvalidSingletonBound {
        /// Given invalid bound.
        bound: f64,
    },

    /// [`Greedy`] selects from a finite batch via `fit` and does not
    /// support item-by-item streaming.
    ///
    /// [`Greedy`]: crate::selector::Greedy
    StreamingUnsupported,
}

// ======================================================================
// Error - IMPL DISPLAY

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { expected, got } => {
                write!(
                    f,
                    "item dimension mismatch: expected {} values, got {}",
                    expected, got
                )
            }

            Error::InvalidCardinality { k } => {
                write!(f, "invalid summary size: {} (must be at least 1)", k)
            }

            Error::InvalidEpsilon { epsilon } => {
                write!(
                    f,
                    "invalid epsilon: {} (must be strictly between 0 and 1)",
                    epsilon
                )
            }

            Error::InvalidRejectionLimit { limit } => {
                write!(f, "invalid rejection limit: {} (must be at least 1)", limit)
            }

            Error::InvalidScale { scale } => {
                write!(f, "invalid scale: {} (must be positive and finite)", scale)
            }

            Error::InvalidSigma { sigma } => {
                write!(f, "invalid sigma: {} (must be positive and finite)", sigma)
            }

            Error::InvalidSingletonBound { bound } => {
                write!(
                    f,
                    "invalid singleton bound: {} (must be positive and finite)",
                    bound
                )
            }

            Error::StreamingUnsupported => {
                write!(f, "streaming is not supported: Greedy consumes a finite batch via fit")
            }
        }
    }
}

// ======================================================================
// Error - IMPL ERROR

impl std::error::Error for Error {}

// ======================================================================
// FUNCTIONS - PUBLIC

/// Summarizes a finite batch in one go using [`BatchSummarizer`],
/// returning the selected summary.
///
/// Selects at most `k` items by offline greedy over the default stack
/// (unit RBF kernel, unit regularizer); use [`BatchSummarizer`] directly
/// for control over the kernel and objective.
///
/// See [simple usage](crate#simple-usage) for an example.
pub fn summarize_greedy<T>(
    k: usize,
    items: impl IntoIterator<Item = T>,
) -> Result<Summary, Error>
where
    T: AsRef<[f64]>,
{
    let mut summarizer = BatchSummarizer::new(k)?;
    summarizer.fit(items)?;
    Ok(summarizer.summary())
}

/// Summarizes a stream in one go using [`StreamSummarizer`], returning
/// the selected summary.
///
/// Consumes the items once, in order, with bounded memory, selecting at
/// most `k` items with approximation slack `epsilon` over the default
/// stack; use [`StreamSummarizer`] directly to keep feeding items after a
/// snapshot.
pub fn summarize_stream<T>(
    k: usize,
    epsilon: f64,
    items: impl IntoIterator<Item = T>,
) -> Result<Summary, Error>
where
    T: AsRef<[f64]>,
{
    let mut summarizer = StreamSummarizer::new(k, epsilon)?;
    summarizer.fit(items)?;
    Ok(summarizer.summary())
}

// ======================================================================
// TESTS
