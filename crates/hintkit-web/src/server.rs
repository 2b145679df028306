//! Axum server setup and router construction.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::post;
use hintkit::Tutor;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::api::{self, AppState};

/// Path of the hint endpoint. `/` serves the same handler.
pub const HINT_PATH: &str = "/api/ai-hint";

/// Build the full axum router.
///
/// The hint endpoint accepts `POST` and bare `OPTIONS`; every other method
/// gets a JSON 405. CORS allows only `allowed_origin`, `POST`/`OPTIONS` and
/// the `content-type` header.
pub fn build_router(tutor: Arc<Tutor>, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let hint = post(api::post_hint)
        .options(api::preflight)
        .fallback(api::method_not_allowed);

    Router::new()
        .route(HINT_PATH, hint.clone())
        .route("/", hint)
        .with_state(AppState { tutor })
        .layer(cors)
}

/// Bind and spawn the server on a Tokio task; return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "Server stopped");
        }
    });

    Ok(addr)
}

/// Bind and serve until `shutdown` resolves.
pub async fn run_server(
    router: Router,
    bind_addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, path = HINT_PATH, "Listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
