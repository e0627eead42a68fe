//! The echo handlers proper: every inspection endpoint is the same
//! operation with a different field projection.

use echohub_core::{Projection, build_response};
use echohub_model::EchoError;
use http::StatusCode;
use http::request::Parts;

use crate::body::EchoResponseBody;
use crate::response::json_response;
use crate::service::PeerAddr;

/// Build the echo document for the given projection and render it.
pub fn method_echo(
    parts: &Parts,
    body: &[u8],
    projection: Projection,
) -> Result<http::Response<EchoResponseBody>, EchoError> {
    let peer = parts.extensions.get::<PeerAddr>().map(|p| p.0);
    let doc = build_response(parts, body, peer, projection)?;
    Ok(json_response(StatusCode::OK, &doc))
}
