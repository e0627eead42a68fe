//! Request projection logic for EchoHub.
//!
//! This crate turns an arbitrary incoming HTTP request into the canonical
//! echo document: it decodes the body by declared content type, flattens
//! query strings and headers, resolves the client IP, parses cookies and
//! credentials, and assembles the per-endpoint field selection. Everything
//! here is a read-only projection of the request; no I/O is performed.

pub mod auth;
pub mod body;
pub mod builder;
pub mod config;
pub mod request;
pub mod utils;

pub use body::{DecodedBody, decode_body};
pub use builder::{Projection, build_response};
pub use config::EchoConfig;
