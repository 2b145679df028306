//! HTTP endpoint for hintkit tutoring hints.
//!
//! `hintkit-web` exposes a [`Tutor`] over a single JSON endpoint. Each
//! request carries the student's latest answer and the full conversation so
//! far; the server keeps nothing between requests.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use hintkit::{GeminiClient, TutorConfig};
//! use hintkit_web::{WebConfig, spawn_web};
//!
//! let config = TutorConfig::default();
//! let client = GeminiClient::new(config.gemini_config(api_key))?;
//! let tutor = Arc::new(config.build_tutor(Arc::new(client))?);
//!
//! let addr = spawn_web(tutor, WebConfig::default()).await?;
//! println!("Hints: http://{addr}/api/ai-hint");
//! ```
//!
//! # Endpoint
//!
//! | Method | Response |
//! |--------|----------|
//! | `POST` | `200 {"hint"}`, `400 {"error"}` on an undecodable body, `500 {"error"}` on completion failure |
//! | `OPTIONS` | `200`, empty body (CORS preflights answered by the CORS layer) |
//! | other | `405 {"error": "Method not allowed"}` |

mod api;
pub mod error;
mod server;

pub use error::ApiError;
pub use server::{HINT_PATH, build_router};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use hintkit::Tutor;

/// Origin allowed by default for cross-origin calls.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://shir-openu.github.io";

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// The single origin permitted by CORS.
    pub allowed_origin: HeaderValue,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(tutor: Arc<Tutor>, config: WebConfig) -> std::io::Result<SocketAddr> {
    let router = server::build_router(tutor, config.allowed_origin);
    server::start_server(router, config.bind_addr).await
}

/// Serve in the foreground until `shutdown` resolves.
pub async fn serve(
    tutor: Arc<Tutor>,
    config: WebConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let router = server::build_router(tutor, config.allowed_origin);
    server::run_server(router, config.bind_addr, shutdown).await
}
