//! Response document assembly.
//!
//! Each endpoint selects the fields it cares about through a [`Projection`];
//! the builder computes only the selected fields from the request parts.
//! The builder never mutates the request and performs no I/O.

use std::net::SocketAddr;

use echohub_model::{EchoError, EchoResponse};
use http::request::Parts;

use crate::body::{DecodedBody, decode_body};
use crate::request;

/// Field selection flags for the echo document.
///
/// Named constructors cover the endpoint families; the default selects
/// nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projection {
    /// Include the reconstructed request URL.
    pub url: bool,
    /// Include the flattened query arguments.
    pub args: bool,
    /// Include the flattened request headers.
    pub headers: bool,
    /// Include the client IP.
    pub origin: bool,
    /// Decode the body into exactly one of `form`/`json`/`data`.
    pub body: bool,
    /// Include the HTTP method.
    pub method: bool,
    /// Include the `User-Agent` header value.
    pub user_agent: bool,
    /// Include the cookie mapping.
    pub cookies: bool,
}

impl Projection {
    /// Fields for the plain `GET` echo: everything except the method and
    /// body (a GET echo has no body to decode).
    #[must_use]
    pub fn for_get() -> Self {
        Self {
            url: true,
            args: true,
            headers: true,
            origin: true,
            ..Self::default()
        }
    }

    /// Fields for the body-carrying method echoes (`POST`, `PUT`, ...)
    /// and the any-method echo: the GET set plus body and method.
    #[must_use]
    pub fn for_body_echo() -> Self {
        Self {
            body: true,
            method: true,
            ..Self::for_get()
        }
    }

    /// Every applicable field, for the full request echo.
    #[must_use]
    pub fn full() -> Self {
        Self {
            user_agent: true,
            cookies: true,
            ..Self::for_body_echo()
        }
    }

    /// Headers only.
    #[must_use]
    pub fn headers_only() -> Self {
        Self {
            headers: true,
            ..Self::default()
        }
    }

    /// User agent only.
    #[must_use]
    pub fn user_agent_only() -> Self {
        Self {
            user_agent: true,
            ..Self::default()
        }
    }

    /// Client origin only.
    #[must_use]
    pub fn origin_only() -> Self {
        Self {
            origin: true,
            ..Self::default()
        }
    }

    /// Cookies only.
    #[must_use]
    pub fn cookies_only() -> Self {
        Self {
            cookies: true,
            ..Self::default()
        }
    }
}

/// Build the canonical echo document from the request.
///
/// # Errors
///
/// The only failure path is body decoding (see
/// [`decode_body`](crate::body::decode_body)); projections that skip the
/// body cannot fail.
pub fn build_response(
    parts: &Parts,
    body: &[u8],
    peer: Option<SocketAddr>,
    projection: Projection,
) -> Result<EchoResponse, EchoError> {
    let mut doc = EchoResponse::default();

    if projection.url {
        doc.url = request::request_url(parts);
    }
    if projection.args {
        doc.args = request::flatten_query(parts);
    }
    if projection.headers {
        doc.headers = request::flatten_headers(&parts.headers);
    }
    if projection.origin {
        doc.origin = request::client_ip(&parts.headers, peer);
    }
    if projection.body {
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        match decode_body(content_type, body)? {
            DecodedBody::Empty => {}
            DecodedBody::Json(value) => doc.json = value,
            DecodedBody::Form(map) => doc.form = map,
            DecodedBody::Raw(data) => doc.data = data,
        }
    }
    if projection.method {
        doc.method = parts.method.to_string();
    }
    if projection.user_agent {
        doc.user_agent = request::user_agent(&parts.headers);
    }
    if projection.cookies {
        doc.cookies = request::parse_cookies(&parts.headers);
    }

    Ok(doc)
}
