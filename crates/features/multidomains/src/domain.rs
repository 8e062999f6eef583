use crate::error::{MultidomainsError, MultidomainsErrorExt};
use chamber_domain::config::DomainConfig;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// URL scheme a domain is served over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// 80 for `http`, 443 for `https`.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl FromStr for Protocol {
    type Err = MultidomainsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(MultidomainsError::ImproperlyConfigured {
                message: format!("protocol '{other}' is not supported, use http or https").into(),
                context: None,
            }),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical site: its route table, user model and network address.
///
/// Built through [`Domain::builder`] or from a [`DomainConfig`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    name: String,
    urlconf: String,
    user_model: String,
    protocol: Protocol,
    hostname: String,
    port: u16,
    url: String,
    user_model_columns: Vec<String>,
}

impl Domain {
    /// Starts a domain declaration. Finish it with either [`DomainBuilder::url`] or
    /// [`DomainBuilder::protocol`] + [`DomainBuilder::hostname`].
    pub fn builder(
        name: impl Into<String>,
        urlconf: impl Into<String>,
        user_model: impl Into<String>,
    ) -> DomainBuilder {
        DomainBuilder {
            name: name.into(),
            urlconf: urlconf.into(),
            user_model: user_model.into(),
            url: None,
            protocol: None,
            hostname: None,
            port: None,
            user_model_columns: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference of the route table serving this domain.
    #[must_use]
    pub fn urlconf(&self) -> &str {
        &self.urlconf
    }

    /// Reference of the entity type holding this domain's users.
    #[must_use]
    pub fn user_model(&self) -> &str {
        &self.user_model
    }

    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub const fn is_default_port(&self) -> bool {
        self.port == self.protocol.default_port()
    }

    /// Base URL, `{protocol}://{hostname}` plus `:{port}` when the port is not the
    /// scheme default.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Columns user lookups are restricted to; empty means every column.
    #[must_use]
    pub fn user_model_columns(&self) -> &[String] {
        &self.user_model_columns
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl TryFrom<&DomainConfig> for Domain {
    type Error = MultidomainsError;

    fn try_from(cfg: &DomainConfig) -> Result<Self, Self::Error> {
        let mut builder = Self::builder(&cfg.name, &cfg.urlconf, &cfg.user_model);
        builder.url.clone_from(&cfg.url);
        builder.protocol.clone_from(&cfg.protocol);
        builder.hostname.clone_from(&cfg.hostname);
        builder.port = cfg.port;
        builder.user_model_columns.clone_from(&cfg.user_model_columns);
        builder.build()
    }
}

/// Builder for [`Domain`]; validation happens in [`DomainBuilder::build`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Clone)]
pub struct DomainBuilder {
    name: String,
    urlconf: String,
    user_model: String,
    url: Option<String>,
    protocol: Option<String>,
    hostname: Option<String>,
    port: Option<u16>,
    user_model_columns: Option<Vec<String>>,
}

impl DomainBuilder {
    /// Sets the full base URL. Takes precedence over protocol, hostname and port.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// `None` behaves like an empty list.
    pub fn user_model_columns<I, S>(mut self, columns: Option<I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_model_columns = columns.map(|c| c.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the declaration and resolves protocol, hostname and port.
    ///
    /// # Errors
    /// * [`MultidomainsError::InvalidUrl`] if an explicit url cannot be parsed.
    /// * [`MultidomainsError::ImproperlyConfigured`] if the protocol is not `http`/`https`,
    ///   the hostname is missing, or neither a url nor a protocol is given.
    pub fn build(self) -> Result<Domain, MultidomainsError> {
        let (protocol, hostname, port) = match &self.url {
            Some(raw) => parse_url(raw),
            None => self.resolve_parts(),
        }
        .context(format!("Domain '{}'", self.name))?;

        let url = if port == protocol.default_port() {
            format!("{protocol}://{hostname}")
        } else {
            format!("{protocol}://{hostname}:{port}")
        };

        Ok(Domain {
            name: self.name,
            urlconf: self.urlconf,
            user_model: self.user_model,
            protocol,
            hostname,
            port,
            url,
            user_model_columns: self.user_model_columns.unwrap_or_default(),
        })
    }

    fn resolve_parts(&self) -> Result<(Protocol, String, u16), MultidomainsError> {
        let protocol: Protocol = self
            .protocol
            .as_deref()
            .ok_or(MultidomainsError::ImproperlyConfigured {
                message: "either url or protocol and hostname must be set".into(),
                context: None,
            })?
            .parse()?;

        let hostname = self
            .hostname
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(MultidomainsError::ImproperlyConfigured {
                message: "hostname must be set".into(),
                context: None,
            })?;

        Ok((protocol, hostname.to_owned(), self.port.unwrap_or(protocol.default_port())))
    }
}

fn parse_url(raw: &str) -> Result<(Protocol, String, u16), MultidomainsError> {
    let parsed = Url::parse(raw)?;
    let protocol: Protocol = parsed.scheme().parse()?;
    let hostname = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(|| {
        MultidomainsError::ImproperlyConfigured {
            message: format!("url '{raw}' has no hostname").into(),
            context: None,
        }
    })?;

    // `Url::port` is `None` for the scheme default, which is exactly our fallback.
    Ok((protocol, hostname.to_owned(), parsed.port().unwrap_or(protocol.default_port())))
}
