//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it holds the layered config loader and the HTTP helpers
//! every feature needs.
//!
//! ## Query strings
//! ```rust
//! use chamber_kernel::http::QueryParams;
//!
//! let mut qs = QueryParams::new();
//! qs.insert("page", 2).insert("ids", vec![1, 2]);
//! assert_eq!(qs.to_string(), "page=2&ids=%5B1%2C2%5D");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use chamber_kernel::config::load_config;
//! use chamber_kernel::domain::config::ChamberConfig;
//!
//! let cfg: ChamberConfig = load_config(Some("chamber.toml"))?;
//! ```
pub mod config;
pub mod http;

pub use chamber_domain as domain;
