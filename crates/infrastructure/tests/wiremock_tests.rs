//! Integration tests for configuration wiring
//!
//! A configuration file is loaded from disk, turned into a forwarder and run
//! against a wiremock controller.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;

use domain::{ArchiveRecord, fields};
use infrastructure::{AppConfig, AppConfigError};
use integration_rainmachine::{ForwardOutcome, HttpRainMachineClient, RecordForwarder, SkipReason};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn config_for(mock_server: &MockServer, extra: &str) -> AppConfig {
    let addr = mock_server.address();
    let file = write_config(&format!(
        "[device]\nip = \"{}\"\nport = {}\nusessl = false\ntimeout_secs = 5\n{extra}",
        addr.ip(),
        addr.port()
    ));
    AppConfig::load(Some(file.path())).unwrap()
}

fn current_record() -> ArchiveRecord {
    ArchiveRecord::new()
        .with(fields::DATE_TIME, now_secs())
        .with(fields::US_UNITS, 1.0)
        .with(fields::OUT_TEMP, 50.0)
        .with(fields::DAY_RAIN, 0.5)
}

fn now_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as f64
}

#[tokio::test]
async fn configured_token_forwards_converted_record() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/4/parser/data"))
        .and(query_param("access_token", "0123456789"))
        .and(body_partial_json(serde_json::json!({
            "weather": [{ "temperature": 10.0, "rain": 12.7 }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "statusCode": 0 })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = config_for(&mock_server, "token = \"0123456789\"\n");
    app.validate().unwrap();
    let rm_config = app.to_rainmachine_config();
    assert_eq!(rm_config.token(), Some("0123456789"));

    let client = HttpRainMachineClient::new(&rm_config).unwrap();
    let mut forwarder = RecordForwarder::new(client, rm_config);
    let outcome = forwarder.handle(&current_record()).await;
    assert!(matches!(outcome, ForwardOutcome::Posted { reauthenticated: false }));
}

#[tokio::test]
async fn skip_upload_never_contacts_device() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = config_for(
        &mock_server,
        "password = \"admin\"\n\n[upload]\nskip_upload = true\n",
    );
    let rm_config = app.to_rainmachine_config();
    let client = HttpRainMachineClient::new(&rm_config).unwrap();
    let mut forwarder = RecordForwarder::new(client, rm_config);

    let outcome = forwarder.handle(&current_record()).await;
    assert!(matches!(
        outcome,
        ForwardOutcome::Skipped(SkipReason::UploadDisabled)
    ));
}

#[tokio::test]
async fn missing_credentials_fail_validation() {
    let mock_server = MockServer::start().await;
    let app = config_for(&mock_server, "");
    assert!(matches!(app.validate(), Err(AppConfigError::Invalid(_))));
}
