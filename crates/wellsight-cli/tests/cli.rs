use assert_cmd::Command;
use predicates::prelude::*;

fn wellsight() -> Command {
    let mut cmd = Command::cargo_bin("wellsight").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("WELLSIGHT_CONFIG")
        .env("WELLSIGHT_STORAGE__TYPE", "memory")
        .env("WELLSIGHT_LIFECYCLE__SIMULATED_LATENCY_MS", "0")
        .env("WELLSIGHT_WEATHER__SIMULATED_LATENCY_MS", "0");
    cmd
}

#[test]
fn predict_prints_confidence() {
    wellsight()
        .args([
            "predict", "--soil", "clay", "--rock", "sedimentary", "--depth", "60",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("83%"))
        .stdout(predicate::str::contains("Excellent location for drilling"));
}

#[test]
fn predict_json_uses_wire_names() {
    wellsight()
        .args([
            "--output", "json", "predict", "--soil", "loamy", "--rock", "metamorphic",
            "--depth", "35", "--latitude", "12.5", "--longitude", "-70.25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"waterLevel\""))
        .stdout(predicate::str::contains("\"confidence\": 63"));
}

#[test]
fn predict_rejects_bad_depth() {
    wellsight()
        .args(["predict", "--soil", "clay", "--rock", "igneous", "--depth", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("depth"));
}

#[test]
fn predict_exports_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.md");

    wellsight()
        .args(["predict", "--soil", "sandy", "--rock", "igneous", "--depth", "45", "--export"])
        .arg(&report)
        .assert()
        .success();

    let text = std::fs::read_to_string(&report).unwrap();
    assert!(text.contains("# Water Well Prediction Report"));
    assert!(text.contains("| Success probability | 50% |"));
}

#[test]
fn history_persists_in_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions.json");

    wellsight()
        .env("WELLSIGHT_STORAGE__TYPE", "json_file")
        .env("WELLSIGHT_STORAGE__PATH", &path)
        .args(["predict", "--soil", "clay", "--rock", "sedimentary", "--depth", "60"])
        .assert()
        .success();

    wellsight()
        .env("WELLSIGHT_STORAGE__TYPE", "json_file")
        .env("WELLSIGHT_STORAGE__PATH", &path)
        .args(["--output", "json", "history", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 1"))
        .stdout(predicate::str::contains("\"bestConfidence\": 83"));
}

#[test]
fn soils_filters_by_kind() {
    wellsight()
        .args(["soils", "--search", "sand", "--kind", "rock"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sandstone"))
        .stdout(predicate::str::contains("Sandy Soil").not());
}

#[test]
fn ask_answers_from_keywords() {
    wellsight()
        .args(["ask", "what", "about", "limestone?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rock formations significantly impact groundwater"));
}

#[test]
fn faq_lists_questions() {
    wellsight()
        .arg("faq")
        .assert()
        .success()
        .stdout(predicate::str::contains("4. How do I interpret the location data?"));
}

#[test]
fn distance_from_fallback() {
    wellsight()
        .args(["distance", "40.7128,-74.006"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Site 1"))
        .stdout(predicate::str::contains("0.00"));
}

#[test]
fn weather_reports_impact() {
    wellsight()
        .env("WELLSIGHT_WEATHER__SEED", "3")
        .args(["weather", "--history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Location"))
        .stdout(predicate::str::contains("Rainfall (mm)"));
}

#[test]
fn verbose_logs_startup_to_stderr() {
    wellsight()
        .args(["--verbose", "faq"])
        .assert()
        .success()
        .stderr(predicate::str::contains("wellsight cli starting"))
        .stdout(predicate::str::contains("wellsight cli starting").not());
}
