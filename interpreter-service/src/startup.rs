//! Application startup and lifecycle management.

use crate::config::Settings;
use crate::handlers::{health_check, interpret, metrics_endpoint, readiness_check};
use crate::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::providers::TextProvider;
use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Path the interpreter is served under.
pub const INTERPRET_PATH: &str = "/api/interpret";

/// Path existing front-ends were built against.
pub const LEGACY_INTERPRET_PATH: &str = "/.netlify/functions/gemini";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
}

/// Assemble routes and middleware around `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        // `any` so the handler answers wrong methods with its own JSON body.
        .route(INTERPRET_PATH, any(interpret))
        .route(LEGACY_INTERPRET_PATH, any(interpret))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let provider = GeminiTextProvider::new(settings.gemini.clone()).map_err(|e| {
            tracing::error!("Failed to create Gemini client: {}", e);
            anyhow::anyhow!("Failed to create Gemini client: {}", e)
        })?;

        if provider.is_configured() {
            tracing::info!(
                model = %settings.gemini.model,
                "Initialized Gemini text provider"
            );
        } else {
            tracing::warn!(
                "Gemini API key not configured - interpretation requests will fail until it is set"
            );
        }

        let state = AppState {
            text_provider: Arc::new(provider),
        };

        Self::build_with_state(&settings, state).await
    }

    /// Build around an existing state, e.g. one holding a mock provider.
    pub async fn build_with_state(settings: &Settings, state: AppState) -> anyhow::Result<Self> {
        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Interpreter service listening on {}:{}", settings.server.host, port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Run until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_with_graceful_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
