use std::fs;

use tempfile::tempdir;

use promoptim::{
    OptimizationResult, OptimizeOptions, ParamBounds, PromotionParams, optimize,
    predictor::ConstantRate, write_result_csv, write_result_json,
};

fn solve() -> OptimizationResult {
    optimize(
        &ConstantRate::new(0.05),
        25_000.0,
        &ParamBounds::default(),
        &PromotionParams::default(),
        &OptimizeOptions::default(),
    )
    .unwrap()
}

#[test]
fn json_file_holds_the_result() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("result.json");
    let result = solve();

    write_result_json(&result, fs::File::create(&path).unwrap()).unwrap();

    let parsed: OptimizationResult =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, result);
}

#[test]
fn csv_file_has_header_and_one_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("result.csv");
    let result = solve();

    write_result_csv(&result, fs::File::create(&path).unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("points_value,minimum_basket_spend,audience"));
    assert!(lines[1].ends_with(&format!(
        ",{},{},{}",
        result.status, result.iters, result.evals
    )));
}
