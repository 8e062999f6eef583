use crate::context::SiteContext;
use crate::domain::Domain;
use crate::error::{MultidomainsError, MultidomainsErrorExt};
use chamber_domain::config::{DomainConfig, SiteId};
use fxhash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct DomainsInner {
    entries: Vec<(SiteId, Domain)>,
    index: FxHashMap<SiteId, usize>,
}

/// Registry of configured sites, in declaration order.
///
/// Built once at startup and shared by cloning; lookups never mutate it.
#[derive(Debug, Clone, Default)]
pub struct Domains {
    inner: Arc<DomainsInner>,
}

impl Domains {
    pub fn builder() -> DomainsBuilder {
        DomainsBuilder::default()
    }

    /// Builds the registry from raw site declarations.
    ///
    /// # Errors
    /// Fails on the first invalid declaration or on a repeated site id.
    pub fn from_config<'a>(
        configs: impl IntoIterator<Item = &'a DomainConfig>,
    ) -> Result<Self, MultidomainsError> {
        let mut builder = Self::builder();
        for cfg in configs {
            let domain = Domain::try_from(cfg)
                .inspect_err(|e| warn!(site_id = cfg.site_id, error = %e, "Rejected domain"))
                .context(format!("site {} '{}'", cfg.site_id, cfg.name))?;
            builder = builder.domain(cfg.site_id, domain);
        }
        builder.build()
    }

    /// Looks up a site.
    ///
    /// # Errors
    /// Returns [`MultidomainsError::SiteNotConfigured`] for unknown ids.
    pub fn get(&self, site_id: SiteId) -> Result<&Domain, MultidomainsError> {
        self.inner
            .index
            .get(&site_id)
            .map(|&i| &self.inner.entries[i].1)
            .ok_or(MultidomainsError::SiteNotConfigured { site_id, context: None })
    }

    #[must_use]
    pub fn contains(&self, site_id: SiteId) -> bool {
        self.inner.index.contains_key(&site_id)
    }

    /// `(site id, name)` pairs in declaration order, e.g. for a select widget.
    #[must_use]
    pub fn choices(&self) -> Vec<(SiteId, &str)> {
        self.iter().map(|(id, domain)| (id, domain.name())).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SiteId, &Domain)> {
        self.inner.entries.iter().map(|(id, domain)| (*id, domain))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Finds the site served at `host`, first match in declaration order.
    ///
    /// A missing `port` matches domains on their scheme default port.
    #[must_use]
    pub fn find_by_host(&self, host: &str, port: Option<u16>) -> Option<SiteId> {
        self.iter()
            .find(|(_, d)| {
                d.hostname().eq_ignore_ascii_case(host)
                    && port.map_or_else(|| d.is_default_port(), |p| p == d.port())
            })
            .map(|(id, _)| id)
    }

    /// Request-scoped view with `site_id` as the current site.
    #[must_use]
    pub fn context(&self, site_id: SiteId) -> SiteContext {
        SiteContext::new(self.clone(), site_id)
    }
}

/// Collects domains and checks that site ids are unique.
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct DomainsBuilder {
    entries: Vec<(SiteId, Domain)>,
}

impl DomainsBuilder {
    pub fn domain(mut self, site_id: SiteId, domain: Domain) -> Self {
        self.entries.push((site_id, domain));
        self
    }

    /// # Errors
    /// Returns [`MultidomainsError::ImproperlyConfigured`] if a site id repeats.
    pub fn build(self) -> Result<Domains, MultidomainsError> {
        let mut index = FxHashMap::default();
        for (position, (site_id, domain)) in self.entries.iter().enumerate() {
            if index.insert(*site_id, position).is_some() {
                return Err(MultidomainsError::ImproperlyConfigured {
                    message: format!("site id {site_id} is declared more than once").into(),
                    context: Some(domain.name().to_owned().into()),
                });
            }
            debug!(site_id, name = domain.name(), url = domain.url(), "Registered domain");
        }

        info!(count = self.entries.len(), "Domain registry built");

        Ok(Domains { inner: Arc::new(DomainsInner { entries: self.entries, index }) })
    }
}
