//! CSV and JSON export of optimization results and prediction grids.

use std::{error::Error as StdError, io::Write};

use ndarray::Array1;
use serde::Serialize;
use thiserror::Error;

use promoptim_core::BoundsError;

use crate::{
    CostModel, OptimizationResult, ParamBounds, PromotionParams, cost::redeemers,
    predictor::Predictor,
};

const GRID_HEADER: &str = "points_value,minimum_basket_spend,audience,predicted_rate,predicted_redeemers,predicted_cost";

const RESULT_HEADER: &str = "points_value,minimum_basket_spend,audience,predicted_rate,predicted_redeemers,predicted_cost,objective,budget,status,iters,evals";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grid needs at least one step per axis")]
    NoSteps,

    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("audience {audience} lies outside its bounds [{lower}, {upper}]")]
    AudienceOutOfBounds {
        audience: f64,
        lower: f64,
        upper: f64,
    },

    #[error("predictor error: {0}")]
    Predictor(#[source] Box<dyn StdError + Send + Sync>),
}

/// One predicted promotion on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridRow {
    pub points_value: f64,
    pub minimum_basket_spend: f64,
    pub audience: f64,
    pub predicted_rate: f64,
    pub predicted_redeemers: f64,
    pub predicted_cost: f64,
}

/// Predicts every promotion on an evenly spaced `points_value × minimum_basket_spend`
/// grid at a fixed `audience`.
///
/// Each axis spans its full bound with `steps` points. Rows are ordered by
/// points value, then minimum spend.
///
/// # Errors
///
/// Returns an error if `steps` is zero, the bounds are invalid, `audience`
/// lies outside its bound, or the predictor fails.
pub fn prediction_grid<P: Predictor>(
    predictor: &P,
    bounds: &ParamBounds,
    cost: &CostModel,
    audience: f64,
    steps: usize,
) -> Result<Vec<GridRow>, ExportError> {
    if steps == 0 {
        return Err(ExportError::NoSteps);
    }
    bounds.to_bounds()?;
    let (lower, upper) = bounds.audience;
    if !(lower..=upper).contains(&audience) {
        return Err(ExportError::AudienceOutOfBounds {
            audience,
            lower,
            upper,
        });
    }

    let points = Array1::linspace(bounds.points_value.0, bounds.points_value.1, steps);
    let spends = Array1::linspace(
        bounds.minimum_basket_spend.0,
        bounds.minimum_basket_spend.1,
        steps,
    );

    let mut rows = Vec::with_capacity(steps * steps);
    for &points_value in &points {
        for &minimum_basket_spend in &spends {
            let params = PromotionParams::new(points_value, minimum_basket_spend, audience);
            let rate = predictor
                .predict(&params.features())
                .map_err(|e| ExportError::Predictor(Box::new(e)))?;
            rows.push(GridRow {
                points_value,
                minimum_basket_spend,
                audience,
                predicted_rate: rate,
                predicted_redeemers: redeemers(audience, rate),
                predicted_cost: cost.total_cost(points_value, audience, rate),
            });
        }
    }
    Ok(rows)
}

/// Writes grid rows as CSV with a header row.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_grid_csv<W: Write>(rows: &[GridRow], mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{GRID_HEADER}")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            row.points_value,
            row.minimum_basket_spend,
            row.audience,
            row.predicted_rate,
            row.predicted_redeemers,
            row.predicted_cost,
        )?;
    }
    writer.flush()
}

/// Writes a result as a two-line CSV (header and values).
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_result_csv<W: Write>(result: &OptimizationResult, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{RESULT_HEADER}")?;
    writeln!(
        writer,
        "{},{},{},{},{},{},{},{},{},{},{}",
        result.points_value,
        result.minimum_basket_spend,
        result.audience,
        result.predicted_rate,
        result.predicted_redeemers,
        result.predicted_cost,
        result.objective,
        result.budget,
        result.status,
        result.iters,
        result.evals,
    )?;
    writer.flush()
}

/// Writes a result as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_result_json<W: Write>(result: &OptimizationResult, mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        SolverStatus,
        predictor::{FnPredictor, LinearRate},
    };

    fn result() -> OptimizationResult {
        OptimizationResult {
            points_value: 100.0,
            minimum_basket_spend: 50.0,
            audience: 2e6,
            predicted_rate: 0.05,
            predicted_redeemers: 1e5,
            predicted_cost: 50_000.0,
            objective: -1e5,
            budget: 50_000.0,
            status: SolverStatus::Converged,
            iters: 3,
            evals: 17,
        }
    }

    #[test]
    fn grid_covers_both_axes() {
        let rows = prediction_grid(
            &LinearRate::default(),
            &ParamBounds::default(),
            &CostModel::default(),
            1e6,
            3,
        )
        .unwrap();

        assert_eq!(rows.len(), 9);
        assert_relative_eq!(rows[0].points_value, 100.0);
        assert_relative_eq!(rows[1].minimum_basket_spend, 275.0);
        assert_relative_eq!(rows[8].points_value, 3000.0);
        assert_relative_eq!(rows[8].minimum_basket_spend, 500.0);
    }

    #[test]
    fn grid_clips_negative_rates() {
        let rows = prediction_grid(
            &FnPredictor(|_: &crate::Features| -0.2),
            &ParamBounds::default(),
            &CostModel::default(),
            1e6,
            2,
        )
        .unwrap();

        assert!(rows.iter().all(|r| r.predicted_rate == -0.2));
        assert!(rows.iter().all(|r| r.predicted_redeemers == 0.0));
        assert!(rows.iter().all(|r| r.predicted_cost == 0.0));
    }

    #[test]
    fn grid_rejects_audience_outside_bounds() {
        let err = prediction_grid(
            &LinearRate::default(),
            &ParamBounds::default(),
            &CostModel::default(),
            5e6,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::AudienceOutOfBounds { .. }));
    }

    #[test]
    fn grid_csv_has_header_and_rows() {
        let rows = prediction_grid(
            &LinearRate::default(),
            &ParamBounds::default(),
            &CostModel::default(),
            1e6,
            2,
        )
        .unwrap();

        let mut out = Vec::new();
        write_grid_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], GRID_HEADER);
        assert_eq!(lines[1], "100,50,1000000,0,0,0");
    }

    #[test]
    fn result_csv_matches_header() {
        let mut out = Vec::new();
        write_result_csv(&result(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], RESULT_HEADER);
        assert_eq!(lines[1], "100,50,2000000,0.05,100000,50000,-100000,50000,converged,3,17");
    }

    #[test]
    fn result_json_round_trips() {
        let mut out = Vec::new();
        write_result_json(&result(), &mut out).unwrap();

        let parsed: OptimizationResult = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, result());
    }
}
