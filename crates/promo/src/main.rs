use std::{
    error::Error as _,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use promoptim::{
    ConfigError, ExportError, OptimizeError, RunConfig, optimize, prediction_grid,
    write_grid_csv, write_result_csv, write_result_json,
};

#[derive(Parser)]
#[command(name = "promoptim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Choose promotion parameters that maximize redeemers within a budget")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise the log level (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a promotion and report the result
    Optimize {
        /// Run configuration
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Write the result as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Write the result as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },

    /// Predict a points value by minimum spend grid at a fixed audience
    Grid {
        /// Run configuration
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Points per axis
        #[arg(long, default_value = "20")]
        steps: usize,

        /// Audience size (defaults to the initial guess)
        #[arg(long)]
        audience: Option<f64>,

        /// Output CSV file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let outcome = match cli.command {
        Commands::Optimize { config, json, csv } => {
            run_optimize(&config, json.as_deref(), csv.as_deref())
        }
        Commands::Grid {
            config,
            steps,
            audience,
            out,
        } => run_grid(&config, steps, audience, &out),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &RunError) {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    error!("{message}");

    if let RunError::Optimize(OptimizeError::Infeasible { best, .. }) = err {
        error!(
            points_value = best.points_value,
            minimum_basket_spend = best.minimum_basket_spend,
            audience = best.audience,
            cost = best.predicted_cost,
            "least-violating promotion"
        );
    }
}

fn load(path: &Path) -> Result<(RunConfig, promoptim::predictor::LoadedModel), RunError> {
    let config = RunConfig::from_path(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let model = config.load_model(base_dir)?;
    info!(config = %path.display(), model = model.kind(), "loaded configuration");
    Ok((config, model))
}

fn create(path: &Path) -> Result<BufWriter<File>, RunError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| RunError::Write {
            path: path.to_path_buf(),
            source,
        })
}

fn run_optimize(config_path: &Path, json: Option<&Path>, csv: Option<&Path>) -> Result<(), RunError> {
    let (config, model) = load(config_path)?;
    let options = config.options()?;

    let result = optimize(
        &model,
        config.budget,
        &config.bounds,
        &config.initial_guess,
        &options,
    )?;

    println!(
        "points_value={} minimum_basket_spend={} audience={} redeemers={} cost={} budget_slack={} status={}",
        result.points_value,
        result.minimum_basket_spend,
        result.audience,
        result.predicted_redeemers,
        result.predicted_cost,
        result.budget_slack(),
        result.status,
    );

    if let Some(path) = json {
        write_result_json(&result, create(path)?)?;
        info!(path = %path.display(), "wrote JSON result");
    }
    if let Some(path) = csv {
        write_result_csv(&result, create(path)?).map_err(|source| RunError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "wrote CSV result");
    }
    Ok(())
}

fn run_grid(
    config_path: &Path,
    steps: usize,
    audience: Option<f64>,
    out: &Path,
) -> Result<(), RunError> {
    let (config, model) = load(config_path)?;
    let audience = audience.unwrap_or(config.initial_guess.audience);

    let rows = prediction_grid(&model, &config.bounds, &config.cost, audience, steps)?;
    write_grid_csv(&rows, create(out)?).map_err(|source| RunError::Write {
        path: out.to_path_buf(),
        source,
    })?;

    info!(rows = rows.len(), path = %out.display(), "wrote prediction grid");
    Ok(())
}
