use crate::{
    kernel::{self, Kernel},
    Error,
};

// ======================================================================
// RbfKernel - PUBLIC

/// Radial basis function kernel `s · exp(−‖x − y‖² / σ²)`.
///
/// `σ` is the bandwidth and `s` the scale. With the default `s = 1` the
/// kernel is bounded by `1`, attained at `x = y`.
#[derive(Clone, Debug)]
pub struct RbfKernel {
    sigma: f64,
    scale: f64,
}

impl RbfKernel {
    /// Creates a new kernel with bandwidth `sigma` and scale `scale`.
    ///
    /// Both must be positive and finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use submodular_stream::kernel::{Kernel, RbfKernel};
    ///
    /// let kernel = RbfKernel::new(1.0, 1.0)?;
    /// assert_eq!(kernel.eval(&[0.5, 0.5], &[0.5, 0.5]), 1.0);
    /// # Ok::<(), submodular_stream::Error>(())
    /// ```
    pub fn new(sigma: f64, scale: f64) -> Result<Self, Error> {
        if !sigma.is_finite() || sigma <= 0.0 {
            Err(Error::InvalidSigma { sigma })
        } else if !scale.is_finite() || scale <= 0.0 {
            Err(Error::InvalidScale { scale })
        } else {
            Ok(Self { sigma, scale })
        }
    }

    /// Returns the bandwidth `σ`.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the scale `s`.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

// ======================================================================
// RbfKernel - IMPL Kernel

impl Kernel for RbfKernel {
    fn eval(&self, x: &[f64], y: &[f64]) -> f64 {
        self.scale * (-kernel::squared_distance(x, y) / (self.sigma * self.sigma)).exp()
    }
}

// ======================================================================
// TESTS
