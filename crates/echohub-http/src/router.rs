//! Echo request routing.
//!
//! Routing is an explicit, ordered table built once at startup and passed
//! into the service by value. Each route pairs an optional method filter
//! with a path pattern; `{name}` segments capture percent-decoded path
//! parameters. Resolution walks the table in order and takes the first
//! route whose pattern and method both match. A pattern match with a
//! method mismatch yields `405 Method Not Allowed` rather than `404`.

use std::sync::Arc;

use echohub_model::{EchoError, EchoOperation};
use http::Method;
use percent_encoding::percent_decode_str;

/// One segment of a route pattern.
#[derive(Debug, Clone)]
enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Captures the path segment under the given name.
    Param(String),
}

/// A single entry in the route table.
#[derive(Debug, Clone)]
pub struct Route {
    method: Option<Method>,
    segments: Vec<Segment>,
    operation: EchoOperation,
}

impl Route {
    /// Create a route from a method filter (`None` accepts any method) and
    /// a `/`-separated pattern where `{name}` segments capture parameters.
    #[must_use]
    pub fn new(method: Option<Method>, pattern: &str, operation: EchoOperation) -> Self {
        let segments = pattern
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .map_or_else(
                        || Segment::Literal(s.to_owned()),
                        |name| Segment::Param(name.to_owned()),
                    )
            })
            .collect();
        Self {
            method,
            segments,
            operation,
        }
    }

    /// Match the route pattern against path segments, capturing parameters.
    fn match_path(&self, path_segments: &[&str]) -> Option<Vec<(String, String)>> {
        if self.segments.len() != path_segments.len() {
            return None;
        }
        let mut params = Vec::new();
        for (pattern, segment) in self.segments.iter().zip(path_segments) {
            match pattern {
                Segment::Literal(literal) => {
                    if literal != segment {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = percent_decode_str(segment).decode_utf8_lossy().into_owned();
                    params.push((name.clone(), value));
                }
            }
        }
        Some(params)
    }
}

/// The result of routing a request.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    /// The resolved operation.
    pub operation: EchoOperation,
    /// Captured path parameters, percent-decoded, in pattern order.
    pub params: Vec<(String, String)>,
}

impl RoutingContext {
    /// Look up a captured path parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Ordered route table for the echo service.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Arc<Vec<Route>>,
}

impl Router {
    /// Create a router from an explicit route table.
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }

    /// The full route table of the echo service.
    #[must_use]
    pub fn default_table() -> Vec<Route> {
        use EchoOperation as Op;

        vec![
            // Method echo
            Route::new(Some(Method::GET), "/get", Op::Get),
            Route::new(Some(Method::PUT), "/put", Op::Put),
            Route::new(Some(Method::POST), "/post", Op::Post),
            Route::new(Some(Method::PATCH), "/patch", Op::Patch),
            Route::new(Some(Method::DELETE), "/delete", Op::Delete),
            Route::new(None, "/any", Op::Any),
            // Request inspection
            Route::new(Some(Method::GET), "/request", Op::RequestInfo),
            Route::new(Some(Method::GET), "/ip", Op::Ip),
            Route::new(Some(Method::GET), "/user-agent", Op::UserAgent),
            Route::new(Some(Method::GET), "/headers", Op::Headers),
            // Cookies
            Route::new(Some(Method::GET), "/cookies", Op::Cookies),
            Route::new(Some(Method::GET), "/cookies/set", Op::SetCookies),
            Route::new(
                Some(Method::GET),
                "/cookies/set/{name}/{value}",
                Op::SetCookiePath,
            ),
            Route::new(Some(Method::GET), "/cookies/delete", Op::DeleteCookies),
            // Auth echo
            Route::new(
                Some(Method::GET),
                "/auth/basic/{user}/{passwd}",
                Op::BasicAuth,
            ),
            Route::new(
                Some(Method::GET),
                "/auth/basic-hidden/{user}/{passwd}",
                Op::HiddenBasicAuth,
            ),
            Route::new(Some(Method::GET), "/auth/bearer", Op::BearerAuth),
            // Response shaping
            Route::new(None, "/status/{code}", Op::Status),
            Route::new(Some(Method::GET), "/response-headers", Op::ResponseHeaders),
            Route::new(Some(Method::GET), "/cache", Op::Cache),
        ]
    }

    /// Resolve a request to a routing context.
    ///
    /// # Errors
    ///
    /// Returns `MethodNotAllowed` if a pattern matched the path but no
    /// route accepted the method, `NotFound` if nothing matched the path.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<RoutingContext, EchoError> {
        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut path_matched = false;
        for route in self.routes.iter() {
            let Some(params) = route.match_path(&path_segments) else {
                continue;
            };
            path_matched = true;
            if route.method.as_ref().is_none_or(|m| m == method) {
                return Ok(RoutingContext {
                    operation: route.operation,
                    params,
                });
            }
        }

        if path_matched {
            Err(EchoError::method_not_allowed(method.as_str()))
        } else {
            Err(EchoError::not_found(path))
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Self::default_table())
    }
}
