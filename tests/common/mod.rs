use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use contactbook::api::HttpApiClient;
use contactbook::config::ApiConfig;
use contactbook::session::{SessionContext, SessionHandle};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Client against `base_url` with an in-memory session
#[allow(dead_code)]
pub fn client_for(base_url: &str) -> (HttpApiClient, SessionHandle) {
    let session: SessionHandle = Arc::new(SessionContext::in_memory());
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    let client = HttpApiClient::new(&config, session.clone()).expect("failed to build client");
    (client, session)
}

#[allow(dead_code)]
pub fn contact_json(id: i64, first: &str, last: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "firstName": first,
        "lastName": last,
        "phoneNumber": "555-0100",
        "email": format!("{}@example.com", first.to_lowercase()),
        "address": "1 Main St",
        "note": "met at work"
    })
}
