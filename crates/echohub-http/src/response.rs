//! Response construction helpers: JSON documents, error formatting,
//! redirects.

use echohub_model::EchoError;
use http::StatusCode;
use http::header::{CONTENT_TYPE, LOCATION};
use serde::Serialize;

use crate::body::EchoResponseBody;

/// The media type every endpoint emits.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build a JSON response with the given status code.
#[must_use]
pub fn json_response<T: Serialize>(
    status: StatusCode,
    document: &T,
) -> http::Response<EchoResponseBody> {
    let json =
        serde_json::to_vec(document).expect("JSON serialization of response document cannot fail");
    http::Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(EchoResponseBody::from_json(json))
        .expect("valid JSON response")
}

/// Convert an [`EchoError`] into a complete JSON error response.
#[must_use]
pub fn error_to_response(error: &EchoError) -> http::Response<EchoResponseBody> {
    let document = serde_json::json!({ "message": error.message });
    json_response(error.status_code(), &document)
}

/// Build a `302 Found` redirect with an empty body.
#[must_use]
pub fn redirect_response(location: &str) -> http::Response<EchoResponseBody> {
    http::Response::builder()
        .status(StatusCode::FOUND)
        .header(
            LOCATION,
            http::HeaderValue::from_str(location)
                .unwrap_or_else(|_| http::HeaderValue::from_static("/")),
        )
        .body(EchoResponseBody::empty())
        .expect("valid redirect response")
}
