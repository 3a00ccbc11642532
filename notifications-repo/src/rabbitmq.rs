//! RabbitMQ publisher for the internal notification queue.

use async_trait::async_trait;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties,
    options::{BasicPublishOptions, ConfirmSelectOptions, QueueDeclareOptions},
    types::{AMQPValue, FieldTable},
};

use notifications_types::{NotificationPublisher, OutboundMessage, QueueError};

/// Header carrying the ordering key; consumers serialize per group.
pub const GROUP_ID_HEADER: &str = "x-group-id";

pub struct RabbitMqPublisher {
    channel: Channel,
    queue: String,
}

impl RabbitMqPublisher {
    /// Connects, enables publisher confirms and declares the outbound queue.
    pub async fn connect(amqp_url: &str, queue: &str) -> anyhow::Result<Self> {
        let connection = Connection::connect(amqp_url, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;

        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await?;

        channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        tracing::info!(queue, "RabbitMQ publisher connected");

        Ok(Self {
            channel,
            queue: queue.to_string(),
        })
    }

    async fn publish(&self, message: OutboundMessage) -> Result<(), QueueError> {
        let mut headers = FieldTable::default();
        headers.insert(
            GROUP_ID_HEADER.into(),
            AMQPValue::LongString(message.group_id.into()),
        );

        let properties = BasicProperties::default()
            .with_delivery_mode(2)
            .with_content_type("application/json".into())
            .with_headers(headers);

        let confirmation = self
            .channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                message.body.as_bytes(),
                properties,
            )
            .await
            .map_err(|e| QueueError::Unavailable(e.to_string()))?
            .await
            .map_err(|e| QueueError::Unavailable(e.to_string()))?;

        if confirmation.is_nack() {
            return Err(QueueError::Rejected(format!(
                "broker nacked message for queue {}",
                self.queue
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationPublisher for RabbitMqPublisher {
    async fn send_messages(&self, messages: Vec<OutboundMessage>) -> Result<(), QueueError> {
        let count = messages.len();
        for message in messages {
            self.publish(message).await?;
        }

        tracing::debug!(queue = %self.queue, count, "Published notifications");
        Ok(())
    }
}
