//! Cookie mutation handlers.
//!
//! Reads are served by the echo projection; the handlers here only mutate
//! `Set-Cookie` response headers and redirect back to `/cookies`.

use cookie::Cookie;
use echohub_core::utils::random_value;
use echohub_model::EchoError;
use http::header::SET_COOKIE;
use http::request::Parts;
use time::OffsetDateTime;

use crate::body::EchoResponseBody;
use crate::response::redirect_response;
use crate::router::RoutingContext;

/// Length of the throwaway value written into an expiring cookie.
const DELETED_VALUE_LEN: usize = 6;

/// `GET /cookies/set`: set one cookie per query key (first value wins),
/// then redirect to `/cookies`.
pub fn set_from_query(parts: &Parts) -> Result<http::Response<EchoResponseBody>, EchoError> {
    let mut resp = redirect_response("/cookies");

    let mut seen: Vec<String> = Vec::new();
    let query = parts.uri.query().unwrap_or("");
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        if seen.iter().any(|s| *s == name) {
            continue;
        }
        seen.push(name.clone().into_owned());
        append_set_cookie(&mut resp, Cookie::build((name, value)).path("/").build());
    }

    Ok(resp)
}

/// `GET /cookies/set/{name}/{value}`: set one cookie from path params,
/// then redirect to `/cookies`.
pub fn set_from_path(ctx: &RoutingContext) -> Result<http::Response<EchoResponseBody>, EchoError> {
    let name = ctx.param("name").unwrap_or_default().to_owned();
    let value = ctx.param("value").unwrap_or_default().to_owned();

    let mut resp = redirect_response("/cookies");
    append_set_cookie(&mut resp, Cookie::build((name, value)).path("/").build());
    Ok(resp)
}

/// `GET /cookies/delete?names=a,b`: overwrite each named cookie with an
/// already-expired one, then redirect to `/cookies`.
pub fn delete_from_query(parts: &Parts) -> Result<http::Response<EchoResponseBody>, EchoError> {
    let mut resp = redirect_response("/cookies");

    let query = parts.uri.query().unwrap_or("");
    let names = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "names")
        .map(|(_, value)| value.into_owned());

    let Some(names) = names else {
        return Ok(resp);
    };

    for name in names.split(',').filter(|n| !n.is_empty()) {
        let expired = Cookie::build((name.to_owned(), random_value(DELETED_VALUE_LEN)))
            .path("/")
            .expires(OffsetDateTime::now_utc())
            .build();
        append_set_cookie(&mut resp, expired);
    }

    Ok(resp)
}

fn append_set_cookie(resp: &mut http::Response<EchoResponseBody>, cookie: Cookie<'_>) {
    if let Ok(value) = http::HeaderValue::from_str(&cookie.to_string()) {
        resp.headers_mut().append(SET_COOKIE, value);
    }
}
