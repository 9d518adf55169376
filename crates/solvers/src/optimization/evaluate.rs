use thiserror::Error;

use promoptim_core::{ConstrainedProblem, Model, Snapshot};

/// The result of evaluating a constrained problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize, const C: usize> {
    pub x: [f64; N],

    pub objective: f64,

    pub constraints: [f64; C],

    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur when evaluating a constrained problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// Failed to construct input or compute the objective or constraints.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P, const N: usize, const C: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N, C>,
    EvalError<<M as Model>::Error, <P as ConstrainedProblem<N, C>>::Error>,
>;

/// Evaluates the model in the context of a constrained problem.
///
/// This function maps `x` to model input, calls the model, then computes the
/// objective and constraints from the input and output.
///
/// # Errors
///
/// Returns an error if input mapping, the model call, or objective/constraint
/// computation fails.
pub fn evaluate<M, P, const N: usize, const C: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N, C>
where
    M: Model,
    P: ConstrainedProblem<N, C, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let objective = problem
        .objective(&input, &output)
        .map_err(EvalError::Problem)?;
    let constraints = problem
        .constraints(&input, &output)
        .map_err(EvalError::Problem)?;

    Ok(Evaluation {
        x,
        objective,
        constraints,
        snapshot: Snapshot::new(input, output),
    })
}
