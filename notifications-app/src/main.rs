//! # Notifications Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter and outbound publisher
//! - Create the notification service
//! - Start the health endpoint and the inbound queue consumer

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notifications_hex::{
    NotificationService,
    inbound::{ConsumerStats, HealthServer, QueueConsumer, shutdown_signal},
};
use notifications_repo::{RabbitMqPublisher, build_repo};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("notifications-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,notifications_app=debug,notifications_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    let config = config::Config::from_env()?;

    tracing::info!(
        inbound = %config.inbound_queue,
        outbound = %config.outbound_queue,
        "Starting notifications server"
    );

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;
    let publisher = RabbitMqPublisher::connect(&config.amqp_url, &config.outbound_queue).await?;

    let service = Arc::new(NotificationService::new(repo, publisher));
    let stats = Arc::new(ConsumerStats::default());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let shutdown_tx = Arc::new(shutdown_tx);
    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = signal_tx.send(true);
    });

    let health = HealthServer::new(stats.clone());
    let health_addr = format!("0.0.0.0:{}", config.health_port);
    let mut health_rx = shutdown_rx.clone();
    let health_task = tokio::spawn(async move {
        let shutdown = async move {
            let _ = health_rx.changed().await;
        };
        if let Err(e) = health.run(&health_addr, shutdown).await {
            tracing::error!(error = %e, "Health server failed");
        }
    });

    let consumer = QueueConsumer::connect(
        &config.amqp_url,
        config.consumer_settings(),
        service,
        stats,
    )
    .await?;

    let mut consumer_rx = shutdown_rx;
    let result = consumer
        .run(async move {
            let _ = consumer_rx.changed().await;
        })
        .await;

    // The consumer can stop on its own when the broker closes the channel.
    let _ = shutdown_tx.send(true);
    let _ = health_task.await;

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    result
}
