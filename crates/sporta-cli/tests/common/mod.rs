use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use wiremock::ResponseTemplate;

/// Run the CLI binary with an isolated data directory against `api`.
pub fn run_cli(args: &[&str], data_dir: &Path, api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sporta"));
    cmd.args(args);
    cmd.env("SPORTA_DATA_DIR", data_dir);
    cmd.env("SPORTA_API_URL", api);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], data_dir: &Path, api: &str) -> String {
    let output = run_cli(args, data_dir, api);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], data_dir: &Path, api: &str) -> String {
    let output = run_cli(args, data_dir, api);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Write a saved session as `sporta login` would.
pub fn write_session(data_dir: &Path, api: &str, role: &str) {
    let session = json!({
        "api": api,
        "username": "tester",
        "role": role,
        "access_token": "test-token",
        "refresh_token": "test-refresh"
    });
    std::fs::create_dir_all(data_dir).unwrap();
    std::fs::write(data_dir.join("session.json"), session.to_string()).unwrap();
}

/// A successful envelope around `data`.
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": true,
        "message": "ok",
        "data": data
    }))
}

/// One page of a paginated collection.
pub fn page(page: u32, page_size: u32, total_items: u64, results: Vec<Value>) -> ResponseTemplate {
    ok(json!({
        "page": page,
        "page_size": page_size,
        "total_items": total_items,
        "results": results
    }))
}
