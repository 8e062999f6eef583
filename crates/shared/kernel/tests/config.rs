use chamber_kernel::config::{ConfigError, load_config};
use chamber_kernel::domain::config::ChamberConfig;
use std::fs;
use tempfile::tempdir;

const CHAMBER_TOML: &str = r#"
site_id = 1

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
"#;

#[test]
fn loads_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("chamber.toml");
    fs::write(&path, CHAMBER_TOML)?;

    let cfg: ChamberConfig = load_config(Some(&path))?;

    assert_eq!(cfg.site_id, 1);
    assert_eq!(cfg.domains.len(), 2);
    assert_eq!(cfg.domains[0].name, "backend");
    assert_eq!(cfg.domains[1].url.as_deref(), Some("https://localhost"));
    assert_eq!(cfg.urlconfs["frontend_urls"]["current-datetime"], "/current_time_frontend/");
    assert_eq!(cfg.logging.level, "info");
    Ok(())
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = load_config::<ChamberConfig>(Some(&path)).expect_err("file is missing");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn malformed_shape_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("chamber.toml");
    fs::write(&path, "site_id = \"not a number\"\n")?;

    let err = load_config::<ChamberConfig>(Some(&path)).expect_err("shape mismatch");
    assert!(err.to_string().contains("Failed to deserialize config"));
    Ok(())
}
