use chamber::domain::config::{ChamberConfig, DomainConfig};
use chamber::multidomains::{Domain, Domains, MultidomainsError, Reverse};
use chamber::{Chamber, ChamberError};
use std::collections::BTreeMap;
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
user_model_columns = ["id", "username"]

[urlconfs.backend_urls]
current-datetime = "/current_time_backend/"

[urlconfs.frontend_urls]
current-datetime = "/current_time_frontend/"
"#;

fn domain_config(site_id: u32, name: &str, protocol: &str) -> DomainConfig {
    DomainConfig {
        site_id,
        name: name.to_owned(),
        urlconf: format!("{name}_urls"),
        user_model: "User".to_owned(),
        url: None,
        protocol: Some(protocol.to_owned()),
        hostname: Some("localhost".to_owned()),
        port: None,
        user_model_columns: None,
    }
}

#[test]
fn loads_state_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("chamber.toml");
    fs::write(&path, CHAMBER_TOML)?;

    let chamber = Chamber::load(Some(&path))?;

    assert_eq!(chamber.domains.choices(), vec![(1, "backend"), (2, "frontend")]);
    assert_eq!(chamber.site(2).current_domain()?.user_model_columns(), ["id", "username"]);
    assert_eq!(chamber.current_site().site_id(), 1);

    let url = chamber.reverse(Reverse::to("current-datetime").site_id(2).add_domain(true))?;
    assert_eq!(url, "https://localhost/current_time_frontend/");

    let local = chamber.reverse(Reverse::to("current-datetime").qs("a", 1))?;
    assert_eq!(local, "/current_time_backend/?a=1");
    Ok(())
}

#[test]
fn config_is_required() {
    let err = Chamber::builder().build().unwrap_err();
    assert!(matches!(err, ChamberError::Validation { .. }));
}

#[test]
fn invalid_domains_fail_the_build() {
    let mut config = ChamberConfig::default();
    config.domains = vec![domain_config(1, "backend", "hbbs")];

    let err = Chamber::builder().config(config).build().unwrap_err();
    assert!(matches!(
        err,
        ChamberError::Domains { source: MultidomainsError::ImproperlyConfigured { .. }, .. }
    ));
}

#[test]
fn default_site_must_exist() {
    let mut config = ChamberConfig::default();
    config.site_id = 7;
    config.domains = vec![domain_config(1, "backend", "http")];

    let err = Chamber::builder().config(config).build().unwrap_err();
    assert!(err.to_string().contains("default site id 7"));
}

#[test]
fn prebuilt_registry_overrides_config() -> Result<(), Box<dyn std::error::Error>> {
    let domains = Domains::builder()
        .domain(1, Domain::builder("api", "api_urls", "ApiUser").url("https://api.example").build()?)
        .build()?;

    let chamber = Chamber::builder()
        .config(ChamberConfig::default())
        .domains(domains)
        .build()?;

    assert_eq!(chamber.current_site().current_domain()?.url(), "https://api.example");
    assert!(chamber.urlconfs.get("api_urls").is_none());
    assert_eq!(chamber.config.urlconfs, BTreeMap::new());
    Ok(())
}
