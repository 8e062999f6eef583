//! # Domain Models
//!
//! This crate contains pure configuration types with a single dependency (`serde`).
//! Keep it lean: no I/O, networking, or validation here. Turning these records into
//! checked values is the job of the feature crates.

pub mod config;
