use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

const CHAMBER_TOML: &str = r#"
site_id = 1

[logging]
level = "warn"

[[domains]]
site_id = 1
name = "backend"
urlconf = "backend_urls"
user_model = "test_chamber.BackendUser"
protocol = "http"
hostname = "localhost"
port = 8000

[[domains]]
site_id = 2
name = "frontend"
urlconf = "frontend_urls"
user_model = "test_chamber.FrontendUser"
url = "https://localhost"

[urlconfs.backend_urls]
current-datetime = "/current_time_backend/"

[urlconfs.frontend_urls]
current-datetime = "/current_time_frontend/"
profile = "/profile/{username}/"
"#;

fn config() -> (TempDir, PathBuf) {
    config_with(CHAMBER_TOML)
}

fn config_with(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("chamber.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

fn chamber(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_chamber"));
    cmd.env_remove("RUST_LOG").arg("--config").arg(config);
    cmd
}

#[test]
fn lists_domains_in_order() {
    let (_dir, path) = config();
    chamber(&path)
        .arg("domains")
        .assert()
        .success()
        .stdout("1\tbackend\thttp://localhost:8000\n2\tfrontend\thttps://localhost\n");
}

#[test]
fn shows_one_domain() {
    let (_dir, path) = config();
    chamber(&path)
        .args(["domain", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user_model: test_chamber.FrontendUser"));
}

#[test]
fn reverses_on_current_site() {
    let (_dir, path) = config();
    chamber(&path)
        .args(["reverse", "current-datetime", "--qs", "a=1"])
        .assert()
        .success()
        .stdout("/current_time_backend/?a=1\n");
}

#[test]
fn reverses_on_other_site_with_domain() {
    let (_dir, path) = config();
    chamber(&path)
        .args(["reverse", "profile", "--site", "2", "--add-domain", "--arg", "ann"])
        .assert()
        .success()
        .stdout("https://localhost/profile/ann/\n");
}

#[test]
fn unknown_site_fails() {
    let (_dir, path) = config();
    chamber(&path)
        .args(["reverse", "current-datetime", "--site", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Site id 3 is not configured"));
}

#[test]
fn missing_config_fails() {
    let dir = tempdir().expect("temp dir");
    chamber(&dir.path().join("absent.toml"))
        .arg("domains")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn reports_loaded_configuration_on_stderr() {
    let (_dir, path) = config_with(&CHAMBER_TOML.replace(r#"level = "warn""#, r#"level = "info""#));
    chamber(&path)
        .arg("domains")
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration loaded"))
        .stdout(predicate::str::contains("1\tbackend"));
}

#[test]
fn warn_level_keeps_stderr_quiet() {
    let (_dir, path) = config();
    chamber(&path).arg("domains").assert().success().stderr("");
}
