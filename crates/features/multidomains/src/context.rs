use crate::domain::Domain;
use crate::error::MultidomainsError;
use crate::registry::Domains;
use chamber_domain::config::SiteId;

/// The registry seen from one request (or job): which site is the current one.
///
/// The serving layer creates it with the active site id and passes it down; nothing
/// here reads ambient state.
#[derive(Debug, Clone)]
pub struct SiteContext {
    domains: Domains,
    site_id: SiteId,
}

impl SiteContext {
    #[must_use]
    pub const fn new(domains: Domains, site_id: SiteId) -> Self {
        Self { domains, site_id }
    }

    /// Id of the current site.
    #[must_use]
    pub const fn site_id(&self) -> SiteId {
        self.site_id
    }

    #[must_use]
    pub const fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Same registry, different current site.
    #[must_use]
    pub fn with_site(&self, site_id: SiteId) -> Self {
        Self { domains: self.domains.clone(), site_id }
    }

    /// # Errors
    /// Returns [`MultidomainsError::SiteNotConfigured`] for unknown ids.
    pub fn domain(&self, site_id: SiteId) -> Result<&Domain, MultidomainsError> {
        self.domains.get(site_id)
    }

    /// # Errors
    /// Returns [`MultidomainsError::SiteNotConfigured`] if the current site is unknown.
    pub fn current_domain(&self) -> Result<&Domain, MultidomainsError> {
        self.domains.get(self.site_id)
    }

    #[must_use]
    pub fn domain_choices(&self) -> Vec<(SiteId, &str)> {
        self.domains.choices()
    }

    /// User entity type of the current site.
    ///
    /// # Errors
    /// Returns [`MultidomainsError::SiteNotConfigured`] if the current site is unknown.
    pub fn user_model(&self) -> Result<&str, MultidomainsError> {
        self.current_domain().map(Domain::user_model)
    }
}
