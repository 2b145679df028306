//! Tutoring hint server.
//!
//! Reads the Gemini API key from the `GOOGLE_API_KEY` environment variable.
//!
//! # Usage
//!
//! ```bash
//! GOOGLE_API_KEY=... cargo run -p hintkit-web
//! GOOGLE_API_KEY=... cargo run -p hintkit-web -- --port 8080 --max-attempts 5
//! GOOGLE_API_KEY=... cargo run -p hintkit-web -- --exercise exercises/ex7.toml
//! ```
//!
//! Then POST to `/api/ai-hint`:
//!
//! ```json
//! {"userInput": "y = C1 cos x", "problemData": {}, "conversationHistory": [], "exerciseMode": 1}
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use clap::Parser;
use hintkit::gemini::DEFAULT_MODEL;
use hintkit::{DEFAULT_MAX_ATTEMPTS, GeminiClient, TutorConfig};
use hintkit_web::{DEFAULT_ALLOWED_ORIGIN, WebConfig, serve};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Tutoring hint server.
#[derive(Parser)]
#[command(name = "hintkit-web", about = "Serve attempt-gated tutoring hints over HTTP")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HINTKIT_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "HINTKIT_PORT", default_value_t = 3001)]
    port: u16,

    /// The single origin allowed to call the endpoint cross-origin.
    #[arg(long, env = "HINTKIT_ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    allowed_origin: String,

    /// Gemini model to use.
    #[arg(long, env = "HINTKIT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Attempt ceiling: prior turns allowed before the terminal response.
    #[arg(long, env = "HINTKIT_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Exercise bundle (TOML). Defaults to the built-in exercise.
    #[arg(long, env = "HINTKIT_EXERCISE")]
    exercise: Option<PathBuf>,

    /// Sampling temperature.
    #[arg(long)]
    temperature: Option<f32>,

    /// Maximum output tokens per hint.
    #[arg(long)]
    max_output_tokens: Option<u32>,
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let api_key = std::env::var("GOOGLE_API_KEY")
        .map_err(|_| "Set GOOGLE_API_KEY env var to your Gemini API key")?;

    let config = TutorConfig {
        model: args.model,
        max_attempts: args.max_attempts,
        exercise_path: args.exercise,
        temperature: args.temperature,
        max_output_tokens: args.max_output_tokens,
    };

    let client = GeminiClient::new(config.gemini_config(api_key))
        .map_err(|e| format!("failed to build Gemini client: {e}"))?;
    let tutor = config
        .build_tutor(Arc::new(client))
        .map_err(|e| e.to_string())?;

    let allowed_origin = HeaderValue::from_str(&args.allowed_origin)
        .map_err(|e| format!("invalid --allowed-origin {:?}: {e}", args.allowed_origin))?;

    let web = WebConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        allowed_origin,
    };

    info!(
        model = %config.model,
        max_attempts = config.max_attempts,
        exercise = ?config.exercise_path,
        "Starting hint server"
    );

    serve(Arc::new(tutor), web, shutdown_signal())
        .await
        .map_err(|e| format!("server error: {e}"))
}
