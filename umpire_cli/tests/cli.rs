use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn umpire() -> Command {
    let mut cmd = Command::cargo_bin("umpire").unwrap();
    for var in [
        "UMPIRE_CONFIG",
        "UMPIRE_PORT",
        "UMPIRE_API_KEY",
        "UMPIRE_FORCE_HTTPS",
        "UMPIRE_GRAPHITE_URL",
        "UMPIRE_LIBRATO_EMAIL",
        "UMPIRE_LIBRATO_TOKEN",
        "UMPIRE_BACKEND_TIMEOUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("umpire-cli-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn help_lists_commands() {
    umpire()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn validate_accepts_good_config() {
    let path = write_config(
        "good.yaml",
        "auth:\n  api_key: s3cret\ngraphite:\n  url: http://graphite.local\n",
    );

    umpire()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn validate_rejects_missing_api_key() {
    let path = write_config("nokey.toml", "[service.graphite]\nurl = \"http://graphite.local\"\n");

    umpire()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn check_without_bounds_is_invalid() {
    umpire()
        .env("UMPIRE_GRAPHITE_URL", "http://127.0.0.1:9")
        .args(["check", "--metric", "cpu.load", "--range", "60"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing parameters"));
}

#[test]
fn check_rejects_zero_range() {
    umpire()
        .args(["check", "--metric", "cpu.load", "--range", "0", "--max", "1"])
        .assert()
        .failure();
}
