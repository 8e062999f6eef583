use chamber_domain::config::{ChamberConfig, SiteId};
use chamber_multidomains::{
    Domains, MultidomainsError, Reverse, ReverseError, SiteContext, UrlConfs, UrlconfError,
};
use std::borrow::Cow;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[chamber_derive::chamber_error]
pub enum ChamberError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: chamber_kernel::config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Domain registry error{}: {source}", format_context(.context))]
    Domains { source: MultidomainsError, context: Option<Cow<'static, str>> },

    #[error("Route table error{}: {source}", format_context(.context))]
    Urlconf { source: UrlconfError, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ChamberInner {
    pub config: ChamberConfig,
    pub domains: Domains,
    pub urlconfs: UrlConfs,
}

/// Application state: configuration, domain registry and route tables.
///
/// Cheap to clone; build it once at startup and hand it to whatever serves requests.
#[derive(Debug, Clone)]
pub struct Chamber {
    inner: Arc<ChamberInner>,
}

impl Chamber {
    #[must_use]
    pub fn builder() -> ChamberBuilder {
        ChamberBuilder::default()
    }

    /// Loads configuration from `path` (or `chamber.*` in the working directory) and
    /// builds the state from it.
    ///
    /// # Errors
    /// Fails if the configuration cannot be loaded or describes invalid sites/routes.
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ChamberError> {
        let config: ChamberConfig = chamber_kernel::config::load_config(path)?;
        Self::builder().config(config).build()
    }

    /// Context for `site_id` as the current site.
    #[must_use]
    pub fn site(&self, site_id: SiteId) -> SiteContext {
        self.inner.domains.context(site_id)
    }

    /// Context for the configured default site.
    #[must_use]
    pub fn current_site(&self) -> SiteContext {
        self.site(self.inner.config.site_id)
    }

    /// Reverses `target` from the configured default site using the built-in route tables.
    ///
    /// # Errors
    /// See [`SiteContext::reverse`].
    pub fn reverse(&self, target: Reverse) -> Result<String, ReverseError<UrlconfError>> {
        self.current_site().reverse(&self.inner.urlconfs, target)
    }
}

impl Deref for Chamber {
    type Target = ChamberInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Default)]
pub struct ChamberBuilder {
    config: Option<ChamberConfig>,
    domains: Option<Domains>,
    urlconfs: Option<UrlConfs>,
}

impl ChamberBuilder {
    pub fn config(mut self, config: ChamberConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses an already built registry instead of the configured `domains`.
    pub fn domains(mut self, domains: Domains) -> Self {
        self.domains = Some(domains);
        self
    }

    /// Uses these route tables instead of the configured `urlconfs`.
    pub fn urlconfs(mut self, urlconfs: UrlConfs) -> Self {
        self.urlconfs = Some(urlconfs);
        self
    }

    /// # Errors
    /// Fails if no configuration was provided or the configured sites/routes are invalid.
    pub fn build(self) -> Result<Chamber, ChamberError> {
        let config = self.config.ok_or_else(|| ChamberError::Validation {
            message: "ChamberConfig not provided".into(),
            context: None,
        })?;

        let domains = match self.domains {
            Some(domains) => domains,
            None => Domains::from_config(&config.domains)?,
        };
        let urlconfs = match self.urlconfs {
            Some(urlconfs) => urlconfs,
            None => UrlConfs::from_config(&config.urlconfs)?,
        };

        if !domains.contains(config.site_id) {
            return Err(ChamberError::Validation {
                message: format!("default site id {} is not configured", config.site_id).into(),
                context: None,
            });
        }

        info!(site_id = config.site_id, domains = domains.len(), "Chamber state built");

        Ok(Chamber { inner: Arc::new(ChamberInner { config, domains, urlconfs }) })
    }
}
