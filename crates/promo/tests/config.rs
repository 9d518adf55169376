use std::fs;

use approx::assert_relative_eq;
use tempfile::tempdir;

use promoptim::{
    BUDGET_TOLERANCE, ConfigError, CostModel, PromotionParams, RunConfig, optimize,
    prediction_grid,
    predictor::{ModelError, Predictor},
};

const TREE_JSON: &str = r#"{
    "base_score": 0.01,
    "trees": [
        { "nodes": [
            { "split": { "feature": 1, "threshold": 800.0, "left": 1, "right": 2 } },
            { "leaf": { "value": 0.0 } },
            { "leaf": { "value": 0.04 } }
        ] }
    ]
}"#;

const TREE_CONFIG: &str = r#"
budget = 40000.0

[model]
kind = "tree_ensemble"
path = "model.json"
"#;

#[test]
fn tree_model_path_resolves_against_config_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("model.json"), TREE_JSON).unwrap();
    let config_path = dir.path().join("run.toml");
    fs::write(&config_path, TREE_CONFIG).unwrap();

    let config = RunConfig::from_path(&config_path).unwrap();
    let model = config.load_model(dir.path()).unwrap();
    assert_eq!(model.kind(), "tree_ensemble");

    let low = model
        .predict(&PromotionParams::new(500.0, 50.0, 1e6).features())
        .unwrap();
    let high = model
        .predict(&PromotionParams::new(1200.0, 50.0, 1e6).features())
        .unwrap();
    assert_relative_eq!(low, 0.01, epsilon = 1e-12);
    assert_relative_eq!(high, 0.05, epsilon = 1e-12);
}

#[test]
fn missing_model_file_is_reported() {
    let dir = tempdir().unwrap();
    let config = RunConfig::from_toml_str(TREE_CONFIG).unwrap();

    let err = config.load_model(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Model(ModelError::Io { .. })));
}

#[test]
fn malformed_model_file_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("model.json"),
        r#"{ "trees": [ { "nodes": [] } ] }"#,
    )
    .unwrap();
    let config = RunConfig::from_toml_str(TREE_CONFIG).unwrap();

    let err = config.load_model(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Model(ModelError::Json { .. })));
}

#[test]
fn grid_from_tree_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("model.json"), TREE_JSON).unwrap();
    let config = RunConfig::from_toml_str(TREE_CONFIG).unwrap();
    let model = config.load_model(dir.path()).unwrap();

    let rows = prediction_grid(&model, &config.bounds, &config.cost, 1e6, 5).unwrap();

    assert_eq!(rows.len(), 25);
    for row in &rows {
        let expected = if row.points_value < 800.0 { 0.01 } else { 0.05 };
        assert_relative_eq!(row.predicted_rate, expected, epsilon = 1e-12);
        assert_relative_eq!(
            row.predicted_cost,
            CostModel::default().total_cost(row.points_value, 1e6, expected),
            max_relative = 1e-12
        );
    }
}

#[test]
fn linear_config_runs_end_to_end() {
    let config = RunConfig::from_toml_str(
        r#"
budget = 25000.0
penalty = "disabled"

[bounds]
points_value = [100.0, 3000.0]
minimum_basket_spend = [50.0, 500.0]
audience = [100000.0, 2000000.0]

[initial_guess]
points_value = 1000.0
minimum_basket_spend = 100.0
audience = 500000.0

[solver]
max_iters = 200

[model]
kind = "linear"
intercept = 0.05
"#,
    )
    .unwrap();

    let model = config.load_model(std::path::Path::new(".")).unwrap();
    let result = optimize(
        &model,
        config.budget,
        &config.bounds,
        &config.initial_guess,
        &config.options().unwrap(),
    )
    .unwrap();

    assert!(result.predicted_cost <= config.budget * (1.0 + BUDGET_TOLERANCE));
    assert_relative_eq!(result.predicted_rate, 0.05, epsilon = 1e-12);
    assert!(config.bounds.contains(&result.params()));
}

#[test]
fn additive_config_with_log_link() {
    let config = RunConfig::from_toml_str(
        r#"
budget = 25000.0

[model]
kind = "additive"
link = "log"
intercept = -3.0

[model.minimum_basket_spend]
knots = [50.0, 500.0]
values = [0.0, -0.9]
"#,
    )
    .unwrap();

    let model = config.load_model(std::path::Path::new(".")).unwrap();
    assert_eq!(model.kind(), "additive");
    assert!(format!("{model:?}").starts_with("Additive"));

    let low_spend = model
        .predict(&PromotionParams::new(1000.0, 50.0, 1e6).features())
        .unwrap();
    let mid_spend = model
        .predict(&PromotionParams::new(1000.0, 275.0, 1e6).features())
        .unwrap();
    assert_relative_eq!(low_spend, (-3.0_f64).exp(), epsilon = 1e-12);
    assert_relative_eq!(mid_spend, (-3.45_f64).exp(), epsilon = 1e-12);
}

#[test]
fn additive_config_parses_shapes() {
    let config = RunConfig::from_toml_str(
        r#"
budget = 25000.0

[model]
kind = "additive"
intercept = 0.01

[model.points_value]
knots = [100.0, 3000.0]
values = [0.0, 0.06]
"#,
    )
    .unwrap();

    let model = config.load_model(std::path::Path::new(".")).unwrap();
    let rate = model
        .predict(&PromotionParams::new(1550.0, 50.0, 1e6).features())
        .unwrap();
    assert_relative_eq!(rate, 0.04, epsilon = 1e-12);
}
