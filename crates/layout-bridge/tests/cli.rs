use assert_cmd::Command;
use image::{GrayImage, Luma};
use predicates::prelude::*;
use tempfile::tempdir;

fn write_gray(path: &std::path::Path) {
    GrayImage::from_fn(4, 3, |x, y| Luma([(x + 10 * y) as u8]))
        .save(path)
        .unwrap();
}

#[test]
fn inspect_prints_summary_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gray.png");
    write_gray(&path);

    Command::cargo_bin("layout-bridge")
        .unwrap()
        .arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dtype\": \"u8\""))
        .stdout(predicate::str::contains("\"max\": 23.0"));
}

#[test]
fn roundtrip_writes_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gray.png");
    let report = dir.path().join("report.json");
    write_gray(&path);

    Command::cargo_bin("layout-bridge")
        .unwrap()
        .args(["-v", "roundtrip", "--transpose", "--report"])
        .arg(&report)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mat_mismatches\": 0"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["pixel"], "gray<u8>");
    assert_eq!(json["image_mismatches"], 0);
}

#[test]
fn roundtrip_reads_config_and_defaults_report_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gray.png");
    write_gray(&path);
    let cfg = dir.path().join("cfg.json");
    std::fs::write(
        &cfg,
        format!(r#"{{"image_path": {:?}}}"#, path.to_string_lossy()),
    )
    .unwrap();

    Command::cargo_bin("layout-bridge")
        .unwrap()
        .current_dir(dir.path())
        .args(["roundtrip", "--config"])
        .arg(&cfg)
        .assert()
        .success();
    assert!(dir.path().join("roundtrip_report.json").exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("layout-bridge")
        .unwrap()
        .arg("inspect")
        .arg(dir.path().join("missing.png"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));

    Command::cargo_bin("layout-bridge")
        .unwrap()
        .arg("roundtrip")
        .assert()
        .failure();
}

#[test]
fn verbose_flag_enables_debug_logging() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gray.png");
    write_gray(&path);

    Command::cargo_bin("layout-bridge")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(["-v", "inspect"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").and(predicate::str::contains("decoded")));

    Command::cargo_bin("layout-bridge")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not());
}
