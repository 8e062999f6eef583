use chamber_domain::config::{ChamberConfig, DomainConfig, LoggingConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let cfg = ChamberConfig::default();
    assert_eq!(cfg.site_id, 1);
    assert!(cfg.domains.is_empty());
    assert!(cfg.urlconfs.is_empty());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert_eq!(logging.format, "compact");
    assert!(logging.directory.is_none());
}

#[test]
fn chamber_config_deserializes() {
    let raw = json!({
        "site_id": 2,
        "domains": [
            {
                "site_id": 1,
                "name": "backend",
                "urlconf": "dj.backend_urls",
                "user_model": "test_chamber.BackendUser",
                "protocol": "http",
                "hostname": "localhost",
                "port": 8000
            },
            {
                "site_id": 2,
                "name": "frontend",
                "urlconf": "dj.frontend_urls",
                "user_model": "test_chamber.FrontendUser",
                "url": "https://localhost",
                "user_model_columns": ["id", "email"]
            }
        ],
        "urlconfs": {
            "dj.backend_urls": { "current-datetime": "/current_time_backend/" }
        },
        "logging": { "level": "debug", "format": "extra_json" }
    });

    let cfg: ChamberConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.site_id, 2);
    assert_eq!(cfg.domains.len(), 2);
    assert_eq!(cfg.domains[0].name, "backend");
    assert_eq!(cfg.domains[0].port, Some(8000));
    assert_eq!(cfg.domains[1].url.as_deref(), Some("https://localhost"));
    assert_eq!(
        cfg.domains[1].user_model_columns.as_deref(),
        Some(&["id".to_owned(), "email".to_owned()][..])
    );
    assert_eq!(cfg.urlconfs["dj.backend_urls"]["current-datetime"], "/current_time_backend/");
    assert_eq!(cfg.logging.format, "extra_json");
}

#[test]
fn optional_domain_fields_default_to_none() {
    let raw = json!({
        "site_id": 7,
        "name": "api",
        "urlconf": "api_urls",
        "user_model": "ApiUser",
        "protocol": "https",
        "hostname": "api.example.com",
        "user_model_columns": null
    });

    let domain: DomainConfig = serde_json::from_value(raw).expect("domain deserialize");
    assert!(domain.url.is_none());
    assert!(domain.port.is_none());
    assert!(domain.user_model_columns.is_none());
}

#[test]
fn mutation_through_deref_does_not_leak_into_clones() {
    let original = ChamberConfig::default();
    let mut changed = original.clone();
    changed.site_id = 5;

    assert_eq!(original.site_id, 1);
    assert_eq!(changed.site_id, 5);
}
