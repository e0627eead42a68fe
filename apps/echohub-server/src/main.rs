//! EchoHub Server - HTTP request/response inspection service.
//!
//! This binary serves a fixed set of echo endpoints that report back, as
//! JSON, whatever the server observed about the incoming request: query
//! arguments, headers, body, client IP, user agent, cookies. It is meant
//! for testing HTTP clients, proxies, and middleware.
//!
//! # Usage
//!
//! ```text
//! ECHOHUB_LISTEN=0.0.0.0:8080 echohub-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ECHOHUB_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use echohub_core::EchoConfig;
use echohub_http::{EchoHttpService, Router, serve};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = EchoConfig::from_env();
    init_tracing(&config.log_level)?;

    let router = Router::new(Router::default_table());
    let service = EchoHttpService::new(router);

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, version = VERSION, "starting EchoHub Server");

    serve(listener, service).await
}
