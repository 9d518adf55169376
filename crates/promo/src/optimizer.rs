use tracing::{info, warn};

use promoptim_observers::TraceObserver;
use promoptim_solvers::optimization::sqp;

use crate::{
    CostModel, OptimizationResult, OptimizeError, ParamBounds, PromotionParams, SignPenalty,
    cost::redeemers,
    predictor::Predictor,
    problem::{PromotionProblem, RateModel},
};

/// Relative budget overrun tolerated at the reported point.
pub const BUDGET_TOLERANCE: f64 = 1e-6;

/// Settings for [`optimize`] beyond the budget, bounds and initial guess.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptimizeOptions {
    pub cost: CostModel,
    pub penalty: SignPenalty,
    pub solver: sqp::Config,
}

/// Chooses the promotion that maximizes predicted redeemers within `budget`.
///
/// Searches `bounds` locally from `initial_guess` with SQP. The predictor is
/// only called with parameters inside `bounds`. The reported rate, cost and
/// redeemers come from one more predictor call at the chosen parameters.
///
/// # Errors
///
/// Returns an error without calling the predictor if the budget, bounds,
/// cost model, or initial guess are invalid. Otherwise returns
/// [`OptimizeError::Infeasible`] if the best promotion found still exceeds
/// the budget by more than [`BUDGET_TOLERANCE`], or the first predictor error.
pub fn optimize<P: Predictor>(
    predictor: &P,
    budget: f64,
    bounds: &ParamBounds,
    initial_guess: &PromotionParams,
    options: &OptimizeOptions,
) -> Result<OptimizationResult, OptimizeError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(OptimizeError::InvalidBudget { budget });
    }
    if !options.cost.is_valid() {
        return Err(OptimizeError::InvalidCostModel(
            options.cost.points_per_currency_unit,
        ));
    }
    let solver_bounds = bounds.to_bounds()?;
    if !solver_bounds.contains(&initial_guess.to_array()) {
        return Err(OptimizeError::InitialGuessOutOfBounds {
            guess: *initial_guess,
        });
    }

    info!(
        budget,
        points_value = ?bounds.points_value,
        minimum_basket_spend = ?bounds.minimum_basket_spend,
        audience = ?bounds.audience,
        penalty = ?options.penalty,
        "optimizing promotion"
    );

    let model = RateModel::new(predictor);
    let problem = PromotionProblem::new(budget, options.cost, options.penalty);
    let solution = sqp::minimize::<_, _, _, 3, 1>(
        &model,
        &problem,
        &solver_bounds,
        initial_guess.to_array(),
        &options.solver,
        TraceObserver::new("promoptim"),
    )?;

    let params = PromotionParams::from_array(solution.x);
    let features = params.features();
    let rate = predictor
        .predict(&features)
        .map_err(|e| OptimizeError::Predictor(Box::new(e)))?;
    if !rate.is_finite() {
        return Err(OptimizeError::NonFiniteRate { rate });
    }

    let cost = options
        .cost
        .total_cost(params.points_value, params.audience, rate);
    let result = OptimizationResult {
        points_value: params.points_value,
        minimum_basket_spend: params.minimum_basket_spend,
        audience: params.audience,
        predicted_rate: rate,
        predicted_redeemers: redeemers(params.audience, rate),
        predicted_cost: cost,
        objective: problem.objective_value(&features, rate),
        budget,
        status: solution.status.into(),
        iters: solution.iters,
        evals: solution.evals,
    };

    if cost > budget * (1.0 + BUDGET_TOLERANCE) {
        warn!(cost, budget, status = %result.status, "no promotion meets the budget");
        return Err(OptimizeError::Infeasible {
            cost,
            budget,
            best: Box::new(result),
        });
    }

    info!(
        points_value = result.points_value,
        minimum_basket_spend = result.minimum_basket_spend,
        audience = result.audience,
        redeemers = result.predicted_redeemers,
        cost = result.predicted_cost,
        budget_slack = result.budget_slack(),
        status = %result.status,
        iters = result.iters,
        evals = result.evals,
        "optimization finished"
    );

    Ok(result)
}
