use crate::{
    kernel::RbfKernel,
    objective::FastIvm,
    selector::{Greedy, Selector, SieveStreaming},
    Error, Summary,
};

// ======================================================================
// StreamSummarizer - PUBLIC

/// Streaming summarizer over the default stack: adaptive
/// [`SieveStreaming`] driving a [`FastIvm`] objective with an
/// [`RbfKernel`].
///
/// [`SieveStreaming`]: crate::selector::SieveStreaming
/// [`FastIvm`]: crate::objective::FastIvm
/// [`RbfKernel`]: crate::kernel::RbfKernel
pub struct StreamSummarizer(SieveStreaming<FastIvm<RbfKernel>>);

impl StreamSummarizer {
    /// Creates a new summarizer selecting at most `k` items with
    /// approximation slack `epsilon`, using the unit RBF kernel
    /// (`σ = 1, s = 1`) and unit regularizer.
    ///
    /// See [basic usage](crate#basic-usage) for an example.
    pub fn new(k: usize, epsilon: f64) -> Result<Self, Error> {
        Self::with_kernel(k, epsilon, 1.0, 1.0, 1.0)
    }

    /// Creates a new summarizer with explicit kernel bandwidth, kernel
    /// scale and objective regularizer.
    pub fn with_kernel(
        k: usize,
        epsilon: f64,
        kernel_sigma: f64,
        kernel_scale: f64,
        regularizer: f64,
    ) -> Result<Self, Error> {
        let kernel = RbfKernel::new(kernel_sigma, kernel_scale)?;
        let objective = FastIvm::new(k, kernel, regularizer)?;
        Ok(Self(SieveStreaming::adaptive(k, objective, epsilon)?))
    }

    /// Consumes a single item from the stream.
    pub fn next(&mut self, item: &[f64]) -> Result<(), Error> {
        self.0.next(item)
    }

    /// Consumes a finite batch of items.
    pub fn fit<I, T>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[f64]>,
    {
        self.0.fit(items)
    }

    /// Returns a snapshot of the current best candidate solution.
    pub fn summary(&self) -> Summary {
        Summary::from_selector(&self.0)
    }

    /// Returns the objective value of the current best candidate.
    pub fn fval(&self) -> f64 {
        self.0.fval()
    }

    /// Returns how many parallel candidate solutions are currently alive.
    pub fn num_candidate_solutions(&self) -> usize {
        self.0.num_candidate_solutions()
    }

    /// Returns how many items are stored across all candidate solutions.
    pub fn num_elements_stored(&self) -> usize {
        self.0.num_elements_stored()
    }
}

// ======================================================================
// BatchSummarizer - PUBLIC

/// Batch summarizer over the default stack: [`Greedy`] driving a
/// [`FastIvm`] objective with an [`RbfKernel`].
///
/// [`Greedy`]: crate::selector::Greedy
/// [`FastIvm`]: crate::objective::FastIvm
/// [`RbfKernel`]: crate::kernel::RbfKernel
pub struct BatchSummarizer(Greedy<FastIvm<RbfKernel>>);

impl BatchSummarizer {
    /// Creates a new summarizer selecting at most `k` items, using the
    /// unit RBF kernel (`σ = 1, s = 1`) and unit regularizer.
    ///
    /// See [simple usage](crate#simple-usage) for an example.
    pub fn new(k: usize) -> Result<Self, Error> {
        Self::with_kernel(k, 1.0, 1.0, 1.0)
    }

    /// Creates a new summarizer with explicit kernel bandwidth, kernel
    /// scale and objective regularizer.
    pub fn with_kernel(
        k: usize,
        kernel_sigma: f64,
        kernel_scale: f64,
        regularizer: f64,
    ) -> Result<Self, Error> {
        let kernel = RbfKernel::new(kernel_sigma, kernel_scale)?;
        let objective = FastIvm::new(k, kernel, regularizer)?;
        Ok(Self(Greedy::new(k, objective)?))
    }

    /// Runs the offline greedy sweep over `items`.
    pub fn fit<I, T>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[f64]>,
    {
        self.0.fit(items)
    }

    /// Returns a snapshot of the selected summary.
    pub fn summary(&self) -> Summary {
        Summary::from_selector(&self.0)
    }

    /// Returns the objective value of the selected summary.
    pub fn fval(&self) -> f64 {
        self.0.fval()
    }
}

// ======================================================================
// TESTS
