//! Response-shaping handlers: status echo, response-header echo, and the
//! conditional-request cache echo.

use chrono::Utc;
use echohub_core::utils::{generate_etag, http_date};
use echohub_core::{Projection, build_response};
use echohub_model::{EchoError, flatten, group_pairs};
use http::header::{CONTENT_TYPE, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use http::request::Parts;
use http::{HeaderName, HeaderValue, StatusCode};

use crate::body::EchoResponseBody;
use crate::response::json_response;
use crate::service::PeerAddr;

/// `/status/{code}`: return the requested status code verbatim with an
/// empty body.
pub fn status(ctx: &crate::router::RoutingContext) -> Result<http::Response<EchoResponseBody>, EchoError> {
    let raw = ctx.param("code").unwrap_or_default();
    let code = raw
        .parse::<u16>()
        .ok()
        .and_then(|c| StatusCode::from_u16(c).ok())
        .ok_or_else(|| EchoError::bad_request(format!("invalid status code: {raw}")))?;

    http::Response::builder()
        .status(code)
        .body(EchoResponseBody::empty())
        .map_err(|e| EchoError::internal(format!("failed to build status response: {e}")))
}

/// `GET /response-headers`: echo the query arguments back as response
/// headers and as the JSON body.
pub fn response_headers(parts: &Parts) -> Result<http::Response<EchoResponseBody>, EchoError> {
    let query = parts.uri.query().unwrap_or("");
    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let document = flatten(group_pairs(pairs.iter().cloned()));
    let mut resp = json_response(StatusCode::OK, &document);

    for (name, value) in &pairs {
        let header_name = HeaderName::try_from(name.as_str())
            .map_err(|_| EchoError::bad_request(format!("invalid header name: {name}")))?;
        let header_value = HeaderValue::try_from(value.as_str())
            .map_err(|_| EchoError::bad_request(format!("invalid header value: {value}")))?;
        if header_name == CONTENT_TYPE {
            resp.headers_mut().insert(header_name, header_value);
        } else {
            resp.headers_mut().append(header_name, header_value);
        }
    }

    Ok(resp)
}

/// `GET /cache`: `304 Not Modified` when the request carries a cache
/// validator, otherwise a `/get`-style echo with fresh validators.
pub fn cache(parts: &Parts, body: &[u8]) -> Result<http::Response<EchoResponseBody>, EchoError> {
    if parts.headers.contains_key(IF_MODIFIED_SINCE) || parts.headers.contains_key(IF_NONE_MATCH) {
        return http::Response::builder()
            .status(StatusCode::NOT_MODIFIED)
            .body(EchoResponseBody::empty())
            .map_err(|e| EchoError::internal(format!("failed to build 304 response: {e}")));
    }

    let peer = parts.extensions.get::<PeerAddr>().map(|p| p.0);
    let doc = build_response(parts, body, peer, Projection::for_get())?;
    let mut resp = json_response(StatusCode::OK, &doc);

    if let Ok(value) = HeaderValue::from_str(&http_date(Utc::now())) {
        resp.headers_mut().insert(LAST_MODIFIED, value);
    }
    if let Ok(value) = HeaderValue::from_str(&generate_etag()) {
        resp.headers_mut().insert(ETAG, value);
    }

    Ok(resp)
}
