//! RabbitMQ consumer driving [`NotificationService`].

use std::future::Future;
use std::sync::Arc;

use futures_util::StreamExt;
use lapin::{
    Channel, Connection, ConnectionProperties,
    options::{
        BasicAckOptions, BasicConsumeOptions, BasicQosOptions, BasicRejectOptions,
        QueueDeclareOptions,
    },
    types::FieldTable,
};

use notifications_types::{
    AppError, EntityDirectory, NotificationPublisher, NotificationStore, RawNotificationLog,
    StoredNotification,
};

use super::ConsumerStats;
use crate::NotificationService;

/// Where and how to consume inbound notifications.
#[derive(Debug, Clone)]
pub struct ConsumerSettings {
    pub queue: String,
    pub consumer_tag: String,
    pub prefetch_count: u16,
}

/// What to tell the broker about a delivery once it has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Ack,
    /// Reject and requeue for one more attempt.
    Requeue,
    /// Reject without requeue; the broker dead-letters it.
    DeadLetter,
}

impl Disposition {
    /// Failed first deliveries are requeued once; failed redeliveries are dropped
    /// to the dead-letter exchange.
    pub fn for_result(result: &Result<StoredNotification, AppError>, redelivered: bool) -> Self {
        match (result, redelivered) {
            (Ok(_), _) => Self::Ack,
            (Err(_), false) => Self::Requeue,
            (Err(_), true) => Self::DeadLetter,
        }
    }
}

pub struct QueueConsumer<R, P>
where
    R: EntityDirectory + NotificationStore + RawNotificationLog,
    P: NotificationPublisher,
{
    channel: Channel,
    settings: ConsumerSettings,
    service: Arc<NotificationService<R, P>>,
    stats: Arc<ConsumerStats>,
}

impl<R, P> QueueConsumer<R, P>
where
    R: EntityDirectory + NotificationStore + RawNotificationLog,
    P: NotificationPublisher,
{
    /// Connects, applies the prefetch limit and declares the inbound queue.
    pub async fn connect(
        amqp_url: &str,
        settings: ConsumerSettings,
        service: Arc<NotificationService<R, P>>,
        stats: Arc<ConsumerStats>,
    ) -> anyhow::Result<Self> {
        let connection = Connection::connect(amqp_url, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;

        channel
            .basic_qos(settings.prefetch_count, BasicQosOptions::default())
            .await?;

        channel
            .queue_declare(
                &settings.queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        tracing::info!(
            queue = %settings.queue,
            prefetch = settings.prefetch_count,
            "RabbitMQ consumer connected"
        );

        Ok(Self {
            channel,
            settings,
            service,
            stats,
        })
    }

    /// Consumes until `shutdown` resolves or the broker closes the stream.
    ///
    /// Each delivery is processed to completion before the next is pulled.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
        let mut consumer = self
            .channel
            .basic_consume(
                &self.settings.queue,
                &self.settings.consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        tracing::info!(queue = %self.settings.queue, "Consuming notifications");
        tokio::pin!(shutdown);

        loop {
            let delivery = tokio::select! {
                _ = &mut shutdown => break,
                next = consumer.next() => match next {
                    Some(Ok(delivery)) => delivery,
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "Consumer stream error");
                        return Err(e.into());
                    }
                    None => {
                        tracing::warn!("Consumer stream closed by broker");
                        break;
                    }
                },
            };

            let result = self.service.handle_message(&delivery.data).await;
            let disposition = Disposition::for_result(&result, delivery.redelivered);

            match &result {
                Ok(_) => self.stats.record_processed(),
                Err(e) => {
                    self.stats.record_failed();
                    tracing::error!(
                        error = %e,
                        error_code = %e.code(),
                        redelivered = delivery.redelivered,
                        ?disposition,
                        "Notification processing failed"
                    );
                }
            }

            self.settle(delivery.delivery_tag, disposition).await?;
        }

        tracing::info!("Consumer stopped");
        Ok(())
    }

    async fn settle(&self, delivery_tag: u64, disposition: Disposition) -> anyhow::Result<()> {
        match disposition {
            Disposition::Ack => {
                self.channel
                    .basic_ack(delivery_tag, BasicAckOptions::default())
                    .await?
            }
            Disposition::Requeue => {
                self.channel
                    .basic_reject(delivery_tag, BasicRejectOptions { requeue: true })
                    .await?
            }
            Disposition::DeadLetter => {
                self.channel
                    .basic_reject(delivery_tag, BasicRejectOptions { requeue: false })
                    .await?
            }
        }
        Ok(())
    }
}
