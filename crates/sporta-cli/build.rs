//! Stamps the binary version with the git commit it was built from.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=SPORTA_BUILD_COMMIT");

    let package = env!("CARGO_PKG_VERSION");
    let version = match commit() {
        Some(commit) => format!("{package} ({commit})"),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=SPORTA_VERSION={version}");
}

/// Short commit hash, from the environment or `git rev-parse`.
fn commit() -> Option<String> {
    if let Ok(commit) = std::env::var("SPORTA_BUILD_COMMIT") {
        let commit = commit.trim();
        return (!commit.is_empty()).then(|| commit.to_string());
    }

    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let commit = String::from_utf8(output.stdout).ok()?;
    let commit = commit.trim();
    (!commit.is_empty()).then(|| commit.to_string())
}
