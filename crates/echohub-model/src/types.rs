//! Response document types shared by all echo endpoints.
//!
//! Every field uses an omit-when-empty contract so each endpoint's response
//! shape stays minimal: an endpoint that never computes `cookies` simply
//! leaves the default in place and the field disappears from the JSON output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A flattened multi-value mapping: single values are scalars, repeated
/// values are ordered arrays. Insertion order is preserved (`serde_json`
/// is built with `preserve_order`).
pub type FlatMap = serde_json::Map<String, Value>;

/// The canonical echo payload describing what the server observed.
///
/// At most one of `form`, `json`, `data` is populated per response; the
/// body decoder's content-type dispatch is mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EchoResponse {
    /// Full request URL as observed by the server.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub url: String,

    /// Flattened query parameters.
    #[serde(skip_serializing_if = "FlatMap::is_empty", default)]
    pub args: FlatMap,

    /// Flattened request headers (lowercase names).
    #[serde(skip_serializing_if = "FlatMap::is_empty", default)]
    pub headers: FlatMap,

    /// Best-effort client IP address.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub origin: String,

    /// Flattened form fields, present only for form-encoded bodies.
    #[serde(skip_serializing_if = "FlatMap::is_empty", default)]
    pub form: FlatMap,

    /// Decoded JSON value, present only for JSON bodies.
    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub json: Value,

    /// Raw body content, present only when the content type matched
    /// neither JSON nor a form encoding.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub data: String,

    /// HTTP method, included only by endpoints that distinguish methods.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub method: String,

    /// The `User-Agent` header value alone.
    #[serde(
        rename = "user-agent",
        skip_serializing_if = "String::is_empty",
        default
    )]
    pub user_agent: String,

    /// Request cookies, name to value.
    #[serde(skip_serializing_if = "FlatMap::is_empty", default)]
    pub cookies: FlatMap,
}

/// Authorization outcome reported by the auth echo endpoints.
///
/// Exactly one credential field is populated depending on the scheme:
/// `user` for Basic, `token` for Bearer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether the presented credentials were accepted.
    pub authorized: bool,

    /// The matched user name (Basic auth only).
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub user: String,

    /// The echoed bearer token (Bearer auth only).
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub token: String,
}

impl AuthResponse {
    /// Successful Basic auth outcome for the given user.
    #[must_use]
    pub fn basic(user: impl Into<String>) -> Self {
        Self {
            authorized: true,
            user: user.into(),
            token: String::new(),
        }
    }

    /// Successful Bearer auth outcome echoing the given token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            authorized: true,
            user: String::new(),
            token: token.into(),
        }
    }

    /// Rejected outcome with no credential fields.
    #[must_use]
    pub fn denied() -> Self {
        Self::default()
    }
}
