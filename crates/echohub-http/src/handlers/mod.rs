//! Operation dispatch and endpoint handlers.
//!
//! The innermost handler of the middleware chain: resolves the route,
//! dispatches to the operation's handler, and renders any [`EchoError`]
//! as a JSON error response.

mod auth;
mod cookies;
mod echo;
mod respond;

use std::sync::Arc;

use echohub_model::{EchoError, EchoOperation};
use tracing::debug;

use crate::body::EchoResponseBody;
use crate::middleware::Handler;
use crate::response::error_to_response;
use crate::router::{Router, RoutingContext};

/// Dispatch a resolved operation to its handler.
///
/// # Errors
///
/// Propagates handler errors (body decode failures, invalid parameters);
/// the caller renders them as JSON error responses.
pub async fn dispatch_operation(
    req: http::Request<bytes::Bytes>,
    ctx: RoutingContext,
) -> Result<http::Response<EchoResponseBody>, EchoError> {
    debug!(operation = %ctx.operation, "dispatching operation");

    let (parts, body) = req.into_parts();
    match ctx.operation {
        EchoOperation::Get => echo::method_echo(&parts, &body, echohub_core::Projection::for_get()),
        EchoOperation::Post
        | EchoOperation::Put
        | EchoOperation::Patch
        | EchoOperation::Delete
        | EchoOperation::Any => {
            echo::method_echo(&parts, &body, echohub_core::Projection::for_body_echo())
        }
        EchoOperation::RequestInfo => {
            echo::method_echo(&parts, &body, echohub_core::Projection::full())
        }
        EchoOperation::Headers => {
            echo::method_echo(&parts, &body, echohub_core::Projection::headers_only())
        }
        EchoOperation::UserAgent => {
            echo::method_echo(&parts, &body, echohub_core::Projection::user_agent_only())
        }
        EchoOperation::Ip => {
            echo::method_echo(&parts, &body, echohub_core::Projection::origin_only())
        }
        EchoOperation::Cookies => {
            echo::method_echo(&parts, &body, echohub_core::Projection::cookies_only())
        }
        EchoOperation::SetCookies => cookies::set_from_query(&parts),
        EchoOperation::SetCookiePath => cookies::set_from_path(&ctx),
        EchoOperation::DeleteCookies => cookies::delete_from_query(&parts),
        EchoOperation::BasicAuth => auth::basic(&parts, &ctx, false),
        EchoOperation::HiddenBasicAuth => auth::basic(&parts, &ctx, true),
        EchoOperation::BearerAuth => auth::bearer(&parts),
        EchoOperation::Status => respond::status(&ctx),
        EchoOperation::ResponseHeaders => respond::response_headers(&parts),
        EchoOperation::Cache => respond::cache(&parts, &body),
    }
}

/// Build the innermost handler around a route table.
#[must_use]
pub fn endpoint_handler(router: Router) -> Handler {
    Arc::new(move |req| {
        let router = router.clone();
        Box::pin(async move {
            let ctx = match router.resolve(req.method(), req.uri().path()) {
                Ok(ctx) => ctx,
                Err(err) => return error_to_response(&err),
            };
            match dispatch_operation(req, ctx).await {
                Ok(resp) => resp,
                Err(err) => error_to_response(&err),
            }
        })
    })
}
