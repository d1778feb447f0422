use crate::objective::SubmodularFunction;

// ======================================================================
// Sieve - CRATE

// One candidate solution tied to a threshold guess for the optimum. The
// sieve-family selectors own a collection of these, each with its own
// independent objective replica; the acceptance rule stays with the
// selector, the bookkeeping lives here.
pub(crate) struct Sieve<F: SubmodularFunction> {
    pub(crate) threshold: f64,

    objective: F,
    solution: Vec<Vec<f64>>,
    fval: f64,
}

impl<F: SubmodularFunction> Sieve<F> {
    pub(crate) fn new(threshold: f64, objective: F) -> Self {
        Self {
            threshold,
            objective,
            solution: Vec::new(),
            fval: 0.0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.solution.len()
    }

    pub(crate) fn is_full(&self, k: usize) -> bool {
        self.solution.len() >= k
    }

    pub(crate) fn fval(&self) -> f64 {
        self.fval
    }

    pub(crate) fn solution(&self) -> &[Vec<f64>] {
        &self.solution
    }

    // Marginal gain of appending `item`, without committing.
    pub(crate) fn gain(&mut self, item: &[f64]) -> f64 {
        let pos = self.solution.len();
        self.objective.peek(&self.solution, item, pos) - self.fval
    }

    // Commits `item` as the next slot.
    pub(crate) fn accept(&mut self, item: &[f64]) {
        let pos = self.solution.len();
        self.fval = self.objective.update(&self.solution, item, pos);
        self.solution.push(item.to_vec());
    }
}
