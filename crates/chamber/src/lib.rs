//! Facade crate for chamber.
//! Re-exports the domain and kernel primitives and assembles the application state.
//! Keep this crate thin: it composes other crates, it does not implement business logic.
//!
//! ## Usage
//! - Load the state with [`Chamber::load`] (or assemble it with [`Chamber::builder`]).
//! - Take a [`SiteContext`](multidomains::SiteContext) per unit of work with
//!   [`Chamber::site`].

mod state;

pub use chamber_domain as domain;
pub use chamber_kernel as kernel;
pub use chamber_multidomains as multidomains;
pub use state::{Chamber, ChamberBuilder, ChamberError, ChamberErrorExt, ChamberInner};
