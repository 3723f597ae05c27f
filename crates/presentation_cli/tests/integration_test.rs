//! Integration tests for the CLI binary
//!
//! These run the built executable in an empty working directory so no local
//! configuration file is picked up. Only commands that never contact a device
//! are exercised here.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn forwarder(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rainmachine-forwarder"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("RAINMACHINE_CONFIG")
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

#[test]
fn payload_prints_one_line_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.jsonl");
    let mut file = std::fs::File::create(&input).unwrap();
    writeln!(file, "# two archive intervals").unwrap();
    writeln!(
        file,
        r#"{{"dateTime": 1700000000, "usUnits": 16, "outTemp": 10.0, "windSpeed": 36.0, "barometer": 1013.0}}"#
    )
    .unwrap();
    writeln!(file).unwrap();
    writeln!(file, "not json").unwrap();
    writeln!(
        file,
        r#"{{"dateTime": 1700000300, "usUnits": 16, "outTemp": 14.0, "consBatteryVoltage": 4.5}}"#
    )
    .unwrap();
    drop(file);

    let output = forwarder(dir.path(), &["payload", "--input", "records.jsonl"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let payloads: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(payloads.len(), 2);

    let first = &payloads[0]["weather"][0];
    assert_eq!(first["timestamp"], 1_700_000_000);
    assert!((first["wind"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert!((first["pressure"].as_f64().unwrap() - 101.3).abs() < 1e-9);

    let second = &payloads[1]["weather"][0];
    assert!((second["mintemp"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert!((second["maxtemp"].as_f64().unwrap() - 14.0).abs() < 1e-9);
    assert!(second.get("consBatteryVoltage").is_none());
}

#[test]
fn login_without_password_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("rainmachine.toml"),
        "[device]\nip = \"127.0.0.1\"\ntoken = \"abc\"\n",
    )
    .unwrap();

    let output = forwarder(dir.path(), &["login"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn run_takes_device_settings_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("records.jsonl"),
        "{\"dateTime\": 1700000000, \"outTemp\": 12.0}\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_rainmachine-forwarder"))
        .args(["run", "--input", "records.jsonl"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("RAINMACHINE_CONFIG")
        .env("RAINMACHINE_DEVICE__IP", "127.0.0.1")
        .env("RAINMACHINE_DEVICE__TOKEN", "0123")
        .env("RAINMACHINE_UPLOAD__SKIP_UPLOAD", "true")
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn run_rejects_invalid_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let output = forwarder(dir.path(), &["run"]);
    assert!(!output.status.success());
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = forwarder(dir.path(), &["--config", "absent.toml", "payload"]);
    assert!(!output.status.success());
}
