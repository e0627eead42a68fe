//! The main echo HTTP service implementing hyper's `Service` trait.
//!
//! [`EchoHttpService`] collects the request body, records the peer address
//! in the request extensions, and runs the composed middleware chain. The
//! chain is built once at construction; per-request state lives entirely
//! in the request itself.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::Service;
use tracing::error;

use echohub_model::EchoError;

use crate::body::EchoResponseBody;
use crate::handlers::endpoint_handler;
use crate::middleware::{Handler, apply_cors_headers, compose, default_chain};
use crate::response::error_to_response;
use crate::router::Router;

/// Socket address of the connected peer, carried in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerAddr(pub SocketAddr);

/// The echo HTTP service.
///
/// Cheap to clone; the accept loop clones it per connection via
/// [`for_peer`](EchoHttpService::for_peer).
#[derive(Clone)]
pub struct EchoHttpService {
    handler: Handler,
    peer: Option<SocketAddr>,
}

impl std::fmt::Debug for EchoHttpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EchoHttpService")
            .field("peer", &self.peer)
            .finish_non_exhaustive()
    }
}

impl EchoHttpService {
    /// Create a service around a route table, wrapped in the default
    /// middleware chain.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self::from_handler(endpoint_handler(router))
    }

    /// Create a service around an arbitrary innermost handler, wrapped in
    /// the default middleware chain.
    #[must_use]
    pub fn from_handler(inner: Handler) -> Self {
        Self {
            handler: compose(&default_chain(), inner),
            peer: None,
        }
    }

    /// Clone of this service bound to a connection's peer address.
    #[must_use]
    pub fn for_peer(&self, peer: SocketAddr) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            peer: Some(peer),
        }
    }
}

impl Service<http::Request<Incoming>> for EchoHttpService {
    type Response = http::Response<EchoResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let peer = self.peer;

        Box::pin(async move {
            let (mut parts, incoming) = req.into_parts();
            if let Some(addr) = peer {
                parts.extensions.insert(PeerAddr(addr));
            }

            let body = match incoming.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    error!(error = %e, "failed to read request body");
                    // This path never enters the chain, so the ambient
                    // headers are applied here.
                    let mut resp =
                        error_to_response(&EchoError::internal("failed to read request body"));
                    apply_cors_headers(resp.headers_mut());
                    return Ok(resp);
                }
            };

            let req = http::Request::from_parts(parts, body);
            Ok(handler(req).await)
        })
    }
}
