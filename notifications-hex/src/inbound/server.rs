//! Health endpoint.

use std::future::Future;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::{ConsumerStats, StatsSnapshot};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub stats: StatsSnapshot,
}

pub async fn health(State(stats): State<Arc<ConsumerStats>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        stats: stats.snapshot(),
    })
}

/// HTTP server exposing `/health`.
pub struct HealthServer {
    stats: Arc<ConsumerStats>,
}

impl HealthServer {
    pub fn new(stats: Arc<ConsumerStats>) -> Self {
        Self { stats }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .layer(TraceLayer::new_for_http())
            .with_state(self.stats.clone())
    }

    /// Runs the server on the given address until `shutdown` resolves.
    pub async fn run(
        self,
        addr: &str,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Health server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_counters() {
        let stats = Arc::new(ConsumerStats::default());
        stats.record_processed();
        stats.record_processed();
        stats.record_failed();

        let Json(response) = health(State(stats)).await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.stats.processed, 2);
        assert_eq!(response.stats.failed, 1);
    }
}
