use crate::context::SiteContext;
use crate::error::ReverseError;
use crate::urls::{ResolveArgs, UrlResolver};
use chamber_domain::config::SiteId;
use chamber_kernel::http::{QueryParams, QueryValue};
use tracing::debug;

/// A cross-domain reverse request.
///
/// ```
/// use chamber_multidomains::Reverse;
///
/// let target = Reverse::to("current-datetime").site_id(2).add_domain(true).qs("a", 1);
/// assert_eq!(target.name(), "current-datetime");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reverse {
    name: String,
    site_id: Option<SiteId>,
    add_domain: bool,
    urlconf: Option<String>,
    query: QueryParams,
    args: ResolveArgs,
}

impl Reverse {
    pub fn to(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target site; the current site when unset.
    #[must_use]
    pub const fn site_id(mut self, site_id: SiteId) -> Self {
        self.site_id = Some(site_id);
        self
    }

    /// Prefix the path with the target domain's base URL.
    #[must_use]
    pub const fn add_domain(mut self, add_domain: bool) -> Self {
        self.add_domain = add_domain;
        self
    }

    /// Overrides the target domain's urlconf.
    #[must_use]
    pub fn urlconf(mut self, urlconf: impl Into<String>) -> Self {
        self.urlconf = Some(urlconf.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Adds one query parameter.
    #[must_use]
    pub fn qs(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.args.push(value.into());
        self
    }

    #[must_use]
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.kwargs.push((key.into(), value.into()));
        self
    }
}

impl SiteContext {
    /// Builds a URL for a named route on any configured site.
    ///
    /// The target site's domain is always looked up, even when both the urlconf is
    /// given and no domain prefix is asked for.
    ///
    /// # Errors
    /// * [`ReverseError::Domain`] if the target site is not configured.
    /// * [`ReverseError::Resolver`] with the resolver's own error.
    pub fn reverse<R: UrlResolver>(
        &self,
        resolver: &R,
        target: Reverse,
    ) -> Result<String, ReverseError<R::Error>> {
        let site_id = target.site_id.unwrap_or(self.site_id());
        let domain = self.domain(site_id)?;
        let urlconf = target.urlconf.as_deref().unwrap_or(domain.urlconf());

        let path = resolver
            .resolve(urlconf, &target.name, &target.args)
            .map_err(ReverseError::Resolver)?;

        let mut url = if target.add_domain { format!("{}{path}", domain.url()) } else { path };
        if !target.query.is_empty() {
            url.push('?');
            url.push_str(&target.query.encode());
        }

        debug!(site_id, name = %target.name, urlconf, %url, "Reversed url");
        Ok(url)
    }
}
