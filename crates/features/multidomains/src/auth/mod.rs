//! Per-domain user lookup.
//!
//! Each site names its own user entity type and, optionally, the columns a lookup is
//! restricted to. [`GetUser`] applies both before asking the [`UserStore`].

mod memory;

pub use memory::{MemoryUserStore, StoreError, UserRecord};

use crate::context::SiteContext;
use crate::error::LookupError;
use std::sync::Arc;
use tracing::debug;

/// Persistence seam for user records.
pub trait UserStore {
    type Key: ?Sized;
    type User;
    type Error: std::error::Error + 'static;

    /// Fetches one record of `user_model` by primary key.
    ///
    /// With `only`, just those fields are loaded and the rest are left deferred.
    /// A missing record is `Ok(None)`.
    ///
    /// # Errors
    /// Implementation defined.
    fn fetch(
        &self,
        user_model: &str,
        pk: &Self::Key,
        only: Option<&[String]>,
    ) -> Result<Option<Self::User>, Self::Error>;
}

impl<S: UserStore + ?Sized> UserStore for &S {
    type Key = S::Key;
    type User = S::User;
    type Error = S::Error;

    fn fetch(
        &self,
        user_model: &str,
        pk: &Self::Key,
        only: Option<&[String]>,
    ) -> Result<Option<Self::User>, Self::Error> {
        (**self).fetch(user_model, pk, only)
    }
}

impl<S: UserStore + ?Sized> UserStore for Arc<S> {
    type Key = S::Key;
    type User = S::User;
    type Error = S::Error;

    fn fetch(
        &self,
        user_model: &str,
        pk: &Self::Key,
        only: Option<&[String]>,
    ) -> Result<Option<Self::User>, Self::Error> {
        (**self).fetch(user_model, pk, only)
    }
}

/// Looks users up in the current domain's user model.
pub trait GetUser {
    type Store: UserStore;

    fn site(&self) -> &SiteContext;

    fn user_store(&self) -> &Self::Store;

    /// Fetches the user with primary key `pk`, restricted to the current domain's
    /// `user_model_columns` when that list is not empty.
    ///
    /// # Errors
    /// * [`LookupError::Domain`] if the current site is not configured.
    /// * [`LookupError::Store`] with the store's own error.
    fn get_user(
        &self,
        pk: &<Self::Store as UserStore>::Key,
    ) -> Result<
        Option<<Self::Store as UserStore>::User>,
        LookupError<<Self::Store as UserStore>::Error>,
    > {
        let domain = self.site().current_domain()?;
        let columns = domain.user_model_columns();
        let only = (!columns.is_empty()).then_some(columns);

        debug!(
            site_id = self.site().site_id(),
            user_model = domain.user_model(),
            restricted = only.is_some(),
            "Fetching user"
        );

        self.user_store().fetch(domain.user_model(), pk, only).map_err(LookupError::Store)
    }
}

/// Ready-made [`GetUser`] pairing a site context with a store.
#[derive(Debug, Clone)]
pub struct UserLookup<S> {
    site: SiteContext,
    store: S,
}

impl<S: UserStore> UserLookup<S> {
    pub const fn new(site: SiteContext, store: S) -> Self {
        Self { site, store }
    }
}

impl<S: UserStore> GetUser for UserLookup<S> {
    type Store = S;

    fn site(&self) -> &SiteContext {
        &self.site
    }

    fn user_store(&self) -> &S {
        &self.store
    }
}
