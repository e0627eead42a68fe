//! HTTP transport layer for EchoHub.
//!
//! This crate ties the echo pipeline to hyper:
//!
//! - **Router**: an explicit, ordered route table resolving requests to
//!   [`echohub_model::EchoOperation`]s
//! - **Middleware chain**: recovery, access logging, content negotiation,
//!   and CORS, composed as handler-transforming wrappers
//! - **Handlers**: one dispatch function per operation family
//! - **Service**: a hyper `Service` implementation that collects the body
//!   and runs the composed chain
//! - **Server**: the accept loop with graceful shutdown

pub mod body;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod server;
pub mod service;

pub use body::EchoResponseBody;
pub use middleware::{EchoRequest, Handler, Middleware, compose, default_chain};
pub use router::{Route, Router, RoutingContext};
pub use server::serve;
pub use service::{EchoHttpService, PeerAddr};
