//! The cross-cutting middleware chain.
//!
//! Middleware are handler-transforming wrappers: each takes the next
//! handler and returns a new one. [`compose`] applies an ordered list so
//! the first element is outermost. The fixed default chain, outer to
//! inner, is recovery, access logging, content negotiation, CORS; it is
//! applied identically to every route and holds no state between requests.
//!
//! Only the recovery stage may swallow a fault. The logger observes
//! panics to record the request, then resumes the unwind so the fault
//! still crosses exactly one boundary.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use echohub_model::EchoError;
use futures::FutureExt;
use futures::future::BoxFuture;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, Method, StatusCode};
use tracing::{error, info};

use crate::body::EchoResponseBody;
use crate::response::{JSON_CONTENT_TYPE, error_to_response};

/// Request type flowing through the chain: the body is already collected.
pub type EchoRequest = http::Request<Bytes>;

/// A boxed request handler.
///
/// Errors are rendered before they leave a handler, so the chain itself
/// is infallible.
pub type Handler = Arc<
    dyn Fn(EchoRequest) -> BoxFuture<'static, http::Response<EchoResponseBody>> + Send + Sync,
>;

/// A handler-transforming middleware stage.
pub trait Middleware: Send + Sync {
    /// Wrap the next handler, returning the composed handler.
    fn wrap(&self, next: Handler) -> Handler;
}

/// Compose an ordered middleware list around an innermost handler.
///
/// The first list element becomes the outermost wrapper, preserving the
/// outer-to-inner execution order on the way in and inner-to-outer on the
/// way out.
#[must_use]
pub fn compose(middlewares: &[Arc<dyn Middleware>], inner: Handler) -> Handler {
    middlewares
        .iter()
        .rev()
        .fold(inner, |next, middleware| middleware.wrap(next))
}

/// The fixed chain applied to every route.
#[must_use]
pub fn default_chain() -> Vec<Arc<dyn Middleware>> {
    vec![
        Arc::new(Recovery),
        Arc::new(Logger),
        Arc::new(JsonContent),
        Arc::new(Cors),
    ]
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

/// Outermost guard: converts a panic anywhere in the chain or handler into
/// a `500` response instead of tearing down the connection task.
///
/// Inner stages are skipped when an unwind passes them, so the recovery
/// response is finished with the same content-type and CORS helpers the
/// inner stages use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recovery;

impl Middleware for Recovery {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |req| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                match AssertUnwindSafe(async move { next(req).await })
                    .catch_unwind()
                    .await
                {
                    Ok(resp) => resp,
                    Err(panic) => {
                        error!(panic = panic_message(&panic), "recovered handler panic");
                        let mut resp =
                            error_to_response(&EchoError::internal("internal server error"));
                        apply_cors_headers(resp.headers_mut());
                        resp
                    }
                }
            })
        })
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Access logger: records method, path, status, and duration for every
/// request once the downstream chain has completed, including requests
/// that end in a recovered fault.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Middleware for Logger {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |req| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                let method = req.method().clone();
                let path = req.uri().path().to_owned();
                let start = Instant::now();

                match AssertUnwindSafe(async move { next(req).await })
                    .catch_unwind()
                    .await
                {
                    Ok(resp) => {
                        info!(
                            method = %method,
                            path = %path,
                            status = resp.status().as_u16(),
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "request completed"
                        );
                        resp
                    }
                    Err(panic) => {
                        info!(
                            method = %method,
                            path = %path,
                            status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "request panicked"
                        );
                        // The fault must still reach the recovery boundary.
                        std::panic::resume_unwind(panic)
                    }
                }
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Content negotiation
// ---------------------------------------------------------------------------

/// Defaults the response `Content-Type` to the JSON media type. A header
/// the handler set explicitly wins, matching set-before-handler semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContent;

impl Middleware for JsonContent {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |req| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                let mut resp = next(req).await;
                resp.headers_mut()
                    .entry(CONTENT_TYPE)
                    .or_insert(HeaderValue::from_static(JSON_CONTENT_TYPE));
                resp
            })
        })
    }
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

/// Permissive CORS headers injected on every response, error responses
/// included. `OPTIONS` preflights are answered directly without reaching
/// a handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cors;

const ALLOW_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";

/// Inject the permissive CORS headers into a response header map.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// Produce a CORS preflight response.
fn cors_preflight_response() -> http::Response<EchoResponseBody> {
    let mut resp = http::Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Max-Age", "86400")
        .body(EchoResponseBody::empty())
        .expect("static CORS response should be valid");
    apply_cors_headers(resp.headers_mut());
    resp
}

impl Middleware for Cors {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |req| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                if req.method() == Method::OPTIONS {
                    return cors_preflight_response();
                }
                let mut resp = next(req).await;
                apply_cors_headers(resp.headers_mut());
                resp
            })
        })
    }
}
