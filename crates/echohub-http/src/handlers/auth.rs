//! Auth echo handlers.
//!
//! Two independent, terminal checks: Basic credentials compared against
//! path-supplied values, and Bearer token transport where presence alone
//! authorizes. No identity store is involved.

use echohub_core::auth::{basic_credentials, bearer_token};
use echohub_model::AuthResponse;
use echohub_model::EchoError;
use http::StatusCode;
use http::header::WWW_AUTHENTICATE;
use http::request::Parts;

use crate::body::EchoResponseBody;
use crate::response::json_response;
use crate::router::RoutingContext;

/// `GET /auth/basic/{user}/{passwd}` and the hidden variant.
///
/// The hidden variant reports the same `401` on failure but never issues a
/// `WWW-Authenticate` challenge, so browsers show no login prompt.
pub fn basic(parts: &Parts, ctx: &RoutingContext, hidden: bool) -> Result<http::Response<EchoResponseBody>, EchoError> {
    let expected_user = ctx.param("user").unwrap_or_default();
    let expected_passwd = ctx.param("passwd").unwrap_or_default();

    match basic_credentials(&parts.headers) {
        Some((user, passwd)) if user == expected_user && passwd == expected_passwd => Ok(
            json_response(StatusCode::OK, &AuthResponse::basic(expected_user)),
        ),
        _ => {
            let mut resp = json_response(StatusCode::UNAUTHORIZED, &AuthResponse::denied());
            if !hidden {
                resp.headers_mut().insert(
                    WWW_AUTHENTICATE,
                    http::HeaderValue::from_static("Basic realm=\"echohub\""),
                );
            }
            Ok(resp)
        }
    }
}

/// `GET /auth/bearer`: echo the presented token; absence is the only
/// failure.
pub fn bearer(parts: &Parts) -> Result<http::Response<EchoResponseBody>, EchoError> {
    match bearer_token(&parts.headers) {
        Some(token) => Ok(json_response(StatusCode::OK, &AuthResponse::bearer(token))),
        None => Ok(json_response(
            StatusCode::UNAUTHORIZED,
            &AuthResponse::denied(),
        )),
    }
}
