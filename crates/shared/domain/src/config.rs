use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Stable integer identifying a configured site.
pub type SiteId = u32;

/// Named route → path template, e.g. `"current-datetime" → "/current_time_backend/"`.
pub type RoutesConfig = BTreeMap<String, String>;

/// Top-level configuration shared across the crates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChamberConfigInner {
    /// Active site for process-level consumers (CLI, background jobs).
    pub site_id: SiteId,
    /// Ordered site declarations; order is preserved for presentation.
    pub domains: Vec<DomainConfig>,
    /// Route tables keyed by the urlconf reference domains point at.
    pub urlconfs: BTreeMap<String, RoutesConfig>,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ChamberConfig {
    #[serde(flatten, default)]
    inner: Arc<ChamberConfigInner>,
}

impl Deref for ChamberConfig {
    type Target = ChamberConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ChamberConfig {
    fn deref_mut(&mut self) -> &mut ChamberConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Raw declaration of one site.
///
/// Either `url` or `protocol` + `hostname` (+ optional `port`) describe the address.
/// When both are present the `url` wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub site_id: SiteId,
    pub name: String,
    pub urlconf: String,
    pub user_model: String,
    pub url: Option<String>,
    pub protocol: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub user_model_columns: Option<Vec<String>>,
}

/// Logging knobs consumed by the binaries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Line format (`compact`, `json` or `extra_json`).
    pub format: String,
    /// Module directives, e.g. `chamber_multidomains=debug`.
    pub env_filter: Option<String>,
    /// When set, logs are also written to rolling files in this directory.
    pub directory: Option<PathBuf>,
}

// --- Default ---

impl Default for ChamberConfigInner {
    fn default() -> Self {
        Self {
            site_id: 1,
            domains: Vec::new(),
            urlconfs: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            env_filter: None,
            directory: None,
        }
    }
}
