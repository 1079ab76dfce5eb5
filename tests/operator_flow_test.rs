/// End-to-end tests for the operator flow
///
/// These tests verify:
/// - Startup refuses to run without the dataset and artifacts
/// - Predict then publish stores the level, region and readings
/// - The console drives the same flow from text commands

mod common;

use assert_matches::assert_matches;
use quake_alert::{
    announcement::BoardView,
    config::Config,
    console::Console,
    error::AppError,
    session::OperatorSession,
    startup::AppContext,
};
use std::fs;

fn config_for(paths: quake_alert::config::PathsConfig) -> Config {
    Config {
        paths,
        ..Config::default()
    }
}

#[test]
fn test_startup_lists_missing_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let paths = common::paths_in(dir.path());
    fs::create_dir_all(paths.dataset.parent().unwrap()).unwrap();
    fs::write(&paths.dataset, common::banded_csv(2)).unwrap();

    let result = AppContext::load(config_for(paths.clone()));

    assert_matches!(
        result.err(),
        Some(AppError::MissingPrerequisites(missing)) if missing == vec![paths.model.clone(), paths.encoder.clone()]
    );
}

#[test]
fn test_predict_then_publish_orange() {
    let dir = tempfile::tempdir().unwrap();
    let paths = common::prepare_workspace(dir.path());
    let context = AppContext::load(config_for(paths.clone())).unwrap();

    let mut session = OperatorSession::new(context.dataset.tail(200)).unwrap();
    let readings = common::orange_readings();
    for field in quake_alert::models::FeatureField::ordered() {
        session.set_feature(field, readings.get(field));
    }

    let draft = session.predict(&context.predictor).unwrap();
    assert_eq!(draft.risk_level.as_str(), "orange");

    session.set_region("Test Region").unwrap();
    session.publish(&context.publisher()).unwrap();

    let raw = fs::read_to_string(&paths.announcements).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &json["announcements"][0];
    assert_eq!(entry["risk_level"], "orange");
    assert_eq!(entry["region"], "Test Region");
    assert_eq!(entry["inputs"]["magnitude"], 6.5);
    assert_eq!(entry["inputs"]["depth"], 12.0);
    assert_eq!(entry["inputs"]["cdi"], 4.0);
    assert_eq!(entry["inputs"]["mmi"], 5.0);
    assert_eq!(entry["inputs"]["sig"], 650.0);
}

#[test]
fn test_console_session() {
    let dir = tempfile::tempdir().unwrap();
    let paths = common::prepare_workspace(dir.path());
    let context = AppContext::load(config_for(paths)).unwrap();
    let mut console = Console::from_context(&context).unwrap();

    let script = "\
board
publish
set magnitude 6.5
set depth 12
set cdi 4
set mmi 5
set sig 650
predict
region Test Region
message Move away from damaged buildings
publish
board
quit
inputs
";
    let mut output = Vec::new();
    console.run(script.as_bytes(), &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("No announcement available yet."));
    assert!(output.contains("error: Invalid state"));
    assert!(output.contains("Predicted alert level: 🟠 ORANGE"));
    assert!(output.contains("Region: Test Region"));
    assert!(output.contains("Move away from damaged buildings"));

    // Nothing after quit runs
    assert_eq!(output.matches("Inputs:").count(), 5);

    let view = BoardView::load(context.store.as_ref()).unwrap();
    let entry = &view.document().unwrap().announcements[0];
    assert_eq!(entry.region, "Test Region");
    assert_eq!(entry.inputs, common::orange_readings());
}
