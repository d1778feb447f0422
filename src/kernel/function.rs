use crate::kernel::Kernel;

// ======================================================================
// FnKernel - PUBLIC

/// [`Kernel`] implemented by an arbitrary closure.
///
/// This is the escape hatch for user-defined kernels; the closure must be
/// symmetric and positive semi-definite for the log-determinant objectives
/// to be meaningful, which is not checked.
///
/// # Examples
///
/// A normalized linear kernel:
///
/// ```rust
/// use submodular_stream::kernel::{FnKernel, Kernel};
///
/// let kernel = FnKernel::new(|x: &[f64], y: &[f64]| {
///     x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>() / x.len() as f64
/// });
///
/// assert_eq!(kernel.eval(&[1.0, 1.0], &[1.0, 1.0]), 1.0);
/// assert_eq!(kernel.eval(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// ```
#[derive(Clone)]
pub struct FnKernel<F>
where
    F: Fn(&[f64], &[f64]) -> f64 + Clone,
{
    function: F,
}

impl<F> FnKernel<F>
where
    F: Fn(&[f64], &[f64]) -> f64 + Clone,
{
    /// Wraps `function` as a [`Kernel`].
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

// ======================================================================
// FnKernel - IMPL Kernel

impl<F> Kernel for FnKernel<F>
where
    F: Fn(&[f64], &[f64]) -> f64 + Clone,
{
    fn eval(&self, x: &[f64], y: &[f64]) -> f64 {
        (self.function)(x, y)
    }
}

// ======================================================================
// TESTS
