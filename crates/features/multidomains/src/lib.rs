//! Serve several logical sites from one deployment.
//!
//! Each site (a [`Domain`]) has its own route table, user entity type and base URL.
//! The registry ([`Domains`]) is built once from configuration and injected; a
//! [`SiteContext`] marks which site is current for a unit of work and can reverse
//! named routes on any site.
//!
//! ```
//! use chamber_multidomains::{Domain, Domains, Reverse, RouteTable, UrlConfs};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let domains = Domains::builder()
//!     .domain(1, Domain::builder("backend", "backend_urls", "BackendUser")
//!         .protocol("http").hostname("localhost").port(8000).build()?)
//!     .domain(2, Domain::builder("frontend", "frontend_urls", "FrontendUser")
//!         .url("https://localhost").build()?)
//!     .build()?;
//!
//! let urls = UrlConfs::new([
//!     RouteTable::new("backend_urls").route("home", "/admin/")?,
//!     RouteTable::new("frontend_urls").route("home", "/")?,
//! ]);
//!
//! let site = domains.context(1);
//! let url = site.reverse(&urls, Reverse::to("home").site_id(2).add_domain(true))?;
//! assert_eq!(url, "https://localhost/");
//! # Ok(())
//! # }
//! ```

mod auth;
mod context;
mod domain;
mod error;
mod registry;
mod reverse;
mod urls;

pub use auth::{GetUser, MemoryUserStore, StoreError, UserLookup, UserRecord, UserStore};
pub use context::SiteContext;
pub use domain::{Domain, DomainBuilder, Protocol};
pub use error::{LookupError, MultidomainsError, MultidomainsErrorExt, ReverseError};
pub use registry::{Domains, DomainsBuilder};
pub use reverse::Reverse;
pub use urls::{ResolveArgs, RouteTable, UrlConfs, UrlResolver, UrlconfError, UrlconfErrorExt};

pub use chamber_domain::config::SiteId;
pub use chamber_kernel::http::{QueryParams, QueryValue};
