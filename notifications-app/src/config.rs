//! Configuration loading from environment.

use std::env;

use notifications_hex::inbound::ConsumerSettings;

/// Application configuration.
pub struct Config {
    pub database_url: String,
    pub amqp_url: String,
    pub inbound_queue: String,
    pub outbound_queue: String,
    pub consumer_tag: String,
    pub prefetch_count: u16,
    pub health_port: u16,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let prefetch_count = var_or("PREFETCH_COUNT", "10")
            .parse()
            .map_err(|e| anyhow::anyhow!("PREFETCH_COUNT: {}", e))?;

        let health_port = var_or("HEALTH_PORT", "8080")
            .parse()
            .map_err(|e| anyhow::anyhow!("HEALTH_PORT: {}", e))?;

        Ok(Self {
            database_url,
            amqp_url: var_or("AMQP_URL", "amqp://127.0.0.1:5672/%2f"),
            inbound_queue: var_or("INBOUND_QUEUE", "bbva.notifications"),
            outbound_queue: var_or("OUTBOUND_QUEUE", "notifications.normalized"),
            consumer_tag: var_or("CONSUMER_TAG", "notifications-server"),
            prefetch_count,
            health_port,
        })
    }

    pub fn consumer_settings(&self) -> ConsumerSettings {
        ConsumerSettings {
            queue: self.inbound_queue.clone(),
            consumer_tag: self.consumer_tag.clone(),
            prefetch_count: self.prefetch_count,
        }
    }
}
