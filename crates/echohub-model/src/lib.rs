//! Canonical data model for EchoHub.
//!
//! This crate defines the JSON documents shared by every echo endpoint, the
//! operation enum the router resolves requests to, the error type used across
//! the HTTP pipeline, and the multi-value flattening utility that normalizes
//! query strings, headers, and form fields into JSON-friendly mappings.

mod error;
mod flatten;
mod operations;
mod types;

pub use error::{EchoError, EchoErrorCode};
pub use flatten::{flatten, group_pairs};
pub use operations::EchoOperation;
pub use types::{AuthResponse, EchoResponse, FlatMap};
