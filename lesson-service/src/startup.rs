//! Application startup and lifecycle management.

use crate::config::LessonConfig;
use crate::handlers;
use crate::services::providers::gemini::GeminiProvider;
use crate::services::providers::TextProvider;
use crate::services::GithubClient;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: LessonConfig,
    pub github: GithubClient,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: LessonConfig) -> Result<Self, AppError> {
        let github = GithubClient::new(config.github.clone());
        let text_provider: Arc<dyn TextProvider> =
            Arc::new(GeminiProvider::new(config.gemini.clone()));

        tracing::info!(
            owner = %config.github.owner,
            repo = %config.github.repo,
            branch = %config.github.branch,
            model = %config.gemini.model,
            "Initialized GitHub client and Gemini text provider"
        );

        let state = AppState {
            config: config.clone(),
            github,
            text_provider,
        };

        let app = Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health_check))
            .route(
                "/list_course_contents/:course_id",
                get(handlers::list_course_contents),
            )
            .route(
                "/generate_and_add_lesson",
                post(handlers::generate_and_add_lesson),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
