//! CLI argument parsing and validation tests — no network I/O.
//!
//! Every case here fails before a request leaves the machine, so no real
//! API key or cassette is involved.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stylefusion");
    cmd.env("STYLEFUSION_CONFIG", "/nonexistent/stylefusion/config.toml")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("STYLEFUSION_REPLAY")
        .env_remove("STYLEFUSION_REC")
        .env_remove("STYLEFUSION_LOG");
    cmd
}

fn face() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures/face.png")
}

#[test]
fn missing_identity_exits_with_error() {
    cmd()
        .args(["--mode", "full-style", "make it anime"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("an identity image is required"));
}

#[test]
fn missing_api_key_fails_fast() {
    cmd()
        .args(["--identity", face().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key for Gemini. Set GEMINI_API_KEY"));
}

#[test]
fn api_key_fallback_variable_is_accepted() {
    let dir = std::env::temp_dir().join("stylefusion_cli_api_key_fallback");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[gemini]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 5\n").unwrap();

    cmd()
        .env("STYLEFUSION_CONFIG", path.to_str().unwrap())
        .env("API_KEY", "fallback-key")
        .args(["--identity", face().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key").not())
        .stderr(predicate::str::contains("Network error"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_identity_exits_with_error() {
    cmd()
        .args(["--identity", "/nonexistent/face.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error").and(predicate::str::contains("/nonexistent/face.png")));
}

#[test]
fn invalid_model_exits_with_error() {
    cmd()
        .args(["--identity", face().to_str().unwrap(), "--model", "dall-e-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model 'dall-e-3'"));
}

#[test]
fn invalid_format_exits_with_error() {
    cmd()
        .args(["--identity", face().to_str().unwrap(), "--format", "gif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

#[test]
fn invalid_mode_exits_with_error() {
    cmd()
        .args(["--identity", face().to_str().unwrap(), "--mode", "cartoon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'cartoon'"));
}

#[test]
fn broken_config_exits_with_error() {
    let dir = std::env::temp_dir().join("stylefusion_cli_bad_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[defaults\nmode = ").unwrap();

    cmd()
        .env("STYLEFUSION_CONFIG", path.to_str().unwrap())
        .args(["--identity", face().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));

    let _ = std::fs::remove_dir_all(&dir);
}
