/// Defines a bounded minimization problem with inequality constraints.
///
/// A constrained problem maps solver variables to a model input, then computes
/// an objective value and `C` constraint values from the model input and
/// output. Solvers search for the input that minimizes the objective while
/// keeping every constraint value non-negative.
///
/// The const generic `N` is the number of solver variables and `C` the number
/// of inequality constraints. Variable bounds are passed to the solver
/// separately, so `input` is only ever called with `x` inside those bounds.
pub trait ConstrainedProblem<const N: usize, const C: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Computes the objective value to minimize from model input/output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be computed.
    fn objective(&self, input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error>;

    /// Computes the inequality constraint values from model input/output.
    ///
    /// A constraint is satisfied when its value is `>= 0`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the constraints cannot be computed.
    fn constraints(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; C], Self::Error>;
}
