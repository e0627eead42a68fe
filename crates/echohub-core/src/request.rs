//! Read-only views over the incoming request: URL reconstruction, header
//! flattening, client IP resolution, and cookie parsing.

use std::net::SocketAddr;

use echohub_model::{FlatMap, flatten};
use http::HeaderMap;
use http::request::Parts;
use serde_json::Value;

/// Proxy header consulted first when resolving the client IP.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Proxy header consulted second when resolving the client IP.
const REAL_IP: &str = "x-real-ip";

/// Reconstruct the full request URL as observed by the server.
///
/// The host is taken from the `Host` header, falling back to the URI
/// authority for HTTP/2-style requests.
#[must_use]
pub fn request_url(parts: &Parts) -> String {
    let host = parts
        .headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| parts.uri.authority().map(ToString::to_string))
        .unwrap_or_default();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_owned(), ToString::to_string);

    format!("http://{host}{path_and_query}")
}

/// Flatten the request's query string into the echo `args` mapping.
#[must_use]
pub fn flatten_query(parts: &Parts) -> FlatMap {
    let query = parts.uri.query().unwrap_or("");
    let pairs =
        form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned()));
    flatten(echohub_model::group_pairs(pairs))
}

/// Flatten request headers into the echo `headers` mapping.
///
/// Header names are emitted in the lowercase canonical form of the `http`
/// crate; repeated headers become ordered arrays.
#[must_use]
pub fn flatten_headers(headers: &HeaderMap) -> FlatMap {
    let groups = headers.keys().map(|name| {
        let values = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        (name.as_str().to_owned(), values)
    });
    flatten(groups)
}

/// Resolve the best-effort client IP.
///
/// Precedence is deterministic: the first `X-Forwarded-For` entry, then
/// `X-Real-Ip`, then the socket peer address.
#[must_use]
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get(FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_owned();
            }
        }
    }

    if let Some(real) = headers.get(REAL_IP).and_then(|v| v.to_str().ok()) {
        let real = real.trim();
        if !real.is_empty() {
            return real.to_owned();
        }
    }

    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}

/// The `User-Agent` header value, empty when absent.
#[must_use]
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(http::header::USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Parse the request's `Cookie` header(s) into a name-to-value mapping.
#[must_use]
pub fn parse_cookies(headers: &HeaderMap) -> FlatMap {
    let mut out = FlatMap::new();
    for value in headers.get_all(http::header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for parsed in cookie::Cookie::split_parse(raw).flatten() {
            out.insert(
                parsed.name().to_owned(),
                Value::String(parsed.value().to_owned()),
            );
        }
    }
    out
}
