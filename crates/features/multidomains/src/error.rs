use chamber_domain::config::SiteId;
use std::borrow::Cow;

/// Configuration errors of the multi-domain layer.
///
/// Every variant means the site setup is wrong; none of them are transient.
#[chamber_derive::chamber_error]
pub enum MultidomainsError {
    /// Invalid domain declaration (protocol, hostname, duplicates).
    #[error("Improperly configured{}: {message}", format_context(.context))]
    ImproperlyConfigured { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A site id that the registry does not know about.
    #[error("Site id {site_id} is not configured{}", format_context(.context))]
    SiteNotConfigured { site_id: SiteId, context: Option<Cow<'static, str>> },

    /// An explicit domain url that cannot be parsed.
    #[error("Invalid domain url{}: {source}", format_context(.context))]
    InvalidUrl { source: url::ParseError, context: Option<Cow<'static, str>> },
}

/// Failure of [`SiteContext::reverse`](crate::SiteContext::reverse).
///
/// Route resolution errors are carried as the resolver produced them.
#[derive(Debug, thiserror::Error)]
pub enum ReverseError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Domain(#[from] MultidomainsError),
    #[error(transparent)]
    Resolver(E),
}

/// Failure of [`GetUser::get_user`](crate::GetUser::get_user).
#[derive(Debug, thiserror::Error)]
pub enum LookupError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Domain(#[from] MultidomainsError),
    #[error(transparent)]
    Store(E),
}
