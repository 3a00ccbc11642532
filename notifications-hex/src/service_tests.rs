//! NotificationService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use notifications_types::{
        AppError, DomainError, EntityDirectory, EntityType, KycStatus, NormalizedNotification,
        NotificationEntity, NotificationPublisher, NotificationStore, OutboundMessage, QueueError,
        RawNotification, RawNotificationLog, RepoError, StoredNotification,
    };

    use crate::NotificationService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        entities: HashMap<String, NotificationEntity>,
        notifications: Mutex<Vec<StoredNotification>>,
        raw: Mutex<Vec<RawNotification>>,
        fail_raw_log: bool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            let entities = [
                ("CO-abc123", EntityType::Consumer),
                ("NC-biz1", EntityType::Business),
                ("OW-own1", EntityType::Member),
            ]
            .into_iter()
            .map(|(bank_id, entity_type)| {
                (
                    bank_id.to_string(),
                    NotificationEntity {
                        entity_id: format!("ent-{}", bank_id),
                        entity_type,
                        bank_id: bank_id.to_string(),
                        kyc_status: Some(KycStatus::Approved),
                    },
                )
            })
            .collect();

            Self {
                entities,
                notifications: Mutex::new(Vec::new()),
                raw: Mutex::new(Vec::new()),
                fail_raw_log: false,
            }
        }

        pub fn failing_raw_log() -> Self {
            Self {
                fail_raw_log: true,
                ..Self::new()
            }
        }

        fn find(&self, bank_id: &str, entity_type: EntityType) -> Option<NotificationEntity> {
            self.entities
                .get(bank_id)
                .filter(|e| e.entity_type == entity_type)
                .cloned()
        }

        pub fn stored(&self) -> Vec<StoredNotification> {
            self.notifications.lock().unwrap().clone()
        }

        pub fn raw_count(&self) -> usize {
            self.raw.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EntityDirectory for MockRepo {
        async fn find_consumer(
            &self,
            bank_id: &str,
        ) -> Result<Option<NotificationEntity>, RepoError> {
            Ok(self.find(bank_id, EntityType::Consumer))
        }

        async fn find_business(
            &self,
            bank_id: &str,
        ) -> Result<Option<NotificationEntity>, RepoError> {
            Ok(self.find(bank_id, EntityType::Business))
        }

        async fn find_member(&self, bank_id: &str) -> Result<Option<NotificationEntity>, RepoError> {
            Ok(self.find(bank_id, EntityType::Member))
        }
    }

    #[async_trait]
    impl NotificationStore for MockRepo {
        async fn create_notification(
            &self,
            notification: NormalizedNotification,
        ) -> Result<StoredNotification, RepoError> {
            let mut rows = self.notifications.lock().unwrap();
            let exists = rows.iter().any(|s| {
                s.notification.source_id == notification.source_id
                    && s.notification.bank_name == notification.bank_name
            });
            if exists {
                return Err(RepoError::Duplicate(notification.source_id));
            }

            let stored = StoredNotification::new(notification);
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn get_by_source_id(
            &self,
            source_id: &str,
            bank_name: &str,
        ) -> Result<Option<StoredNotification>, RepoError> {
            Ok(self
                .notifications
                .lock()
                .unwrap()
                .iter()
                .find(|s| {
                    s.notification.source_id == source_id && s.notification.bank_name == bank_name
                })
                .cloned())
        }

        async fn increment_send(&self, id: Uuid) -> Result<(), RepoError> {
            let mut rows = self.notifications.lock().unwrap();
            let row = rows.iter_mut().find(|s| s.id == id).ok_or(RepoError::NotFound)?;
            row.send_count += 1;
            Ok(())
        }
    }

    #[async_trait]
    impl RawNotificationLog for MockRepo {
        async fn log_raw(&self, raw: RawNotification) -> Result<(), RepoError> {
            if self.fail_raw_log {
                return Err(RepoError::Database("raw log offline".into()));
            }
            self.raw.lock().unwrap().push(raw);
            Ok(())
        }
    }

    /// Publisher that records every message it is asked to send.
    #[derive(Default)]
    pub struct MockPublisher {
        sent: Mutex<Vec<OutboundMessage>>,
        fail: bool,
    }

    impl MockPublisher {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn sent(&self) -> Vec<OutboundMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationPublisher for MockPublisher {
        async fn send_messages(&self, messages: Vec<OutboundMessage>) -> Result<(), QueueError> {
            if self.fail {
                return Err(QueueError::Unavailable("broker down".into()));
            }
            self.sent.lock().unwrap().extend(messages);
            Ok(())
        }
    }

    fn service() -> NotificationService<MockRepo, MockPublisher> {
        NotificationService::new(MockRepo::new(), MockPublisher::default())
    }

    fn envelope(
        id: &str,
        literal: &str,
        reason: Option<&str>,
        customer_id: Value,
        data: Value,
    ) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "notification_id": id,
            "notification_type": format!("com.bbva.openplatform.{}", literal),
            "notification_version": "2.1",
            "notification_reason": reason,
            "timestamp": "1623715200000",
            "customer_id": customer_id,
            "notification_data": data,
        }))
        .unwrap()
    }

    fn account_status(id: &str, customer_id: Value, data: Value) -> Vec<u8> {
        envelope(id, "account_status", None, customer_id, data)
    }

    #[tokio::test]
    async fn test_account_opened_is_stored_and_published() {
        let service = service();
        let body = account_status(
            "evt-1",
            json!("CO-abc123"),
            json!({
                "account_id": "AC-100",
                "status_change": "account_opened",
                "status_change_reason": "2021-06-15"
            }),
        );

        let stored = service.handle_message(&body).await.unwrap();

        assert_eq!(stored.send_count, 1);
        assert_eq!(stored.notification.source_id, "evt-1");
        assert_eq!(stored.notification.bank_name, "bbva");
        assert_eq!(stored.notification.entity_id, "ent-CO-abc123");
        assert_eq!(stored.notification.version, "2.1");
        assert_eq!(stored.notification.data["opened"], "2021-06-15T00:00:00Z");

        let sent = service.publisher().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].group_id, "ent-CO-abc123");

        let published: Value = serde_json::from_str(&sent[0].body).unwrap();
        assert_eq!(published["type"], "account");
        assert_eq!(published["action"], "open");
        assert_eq!(published["created"], "2021-06-15T00:00:00Z");

        assert_eq!(service.repo().raw_count(), 1);
        assert_eq!(service.repo().stored()[0].send_count, 1);
    }

    #[tokio::test]
    async fn test_credits_block_added() {
        let service = service();
        let body = account_status(
            "evt-2",
            json!("CO-abc123"),
            json!({"account_id": "AC-100", "status_change": "credits_block_added"}),
        );

        let stored = service.handle_message(&body).await.unwrap();

        assert_eq!(stored.notification.attribute.as_deref(), Some("block"));
        assert_eq!(stored.notification.data["block"], "credit_added");
        assert_eq!(
            stored.notification.action,
            notifications_types::Action::Add
        );
    }

    #[tokio::test]
    async fn test_duplicate_move_money_delivery() {
        let service = service();
        let body = envelope(
            "mm-evt-1",
            "move_money_status",
            Some("status_change"),
            json!("CO-abc123"),
            json!({"move_money_id": "MM-1", "status": "COMPLETED"}),
        );

        let first = service.handle_message(&body).await.unwrap();
        let second = service.handle_message(&body).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.send_count, 2);

        let rows = service.repo().stored();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].send_count, 2);

        let sent = service.publisher().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].group_id, sent[1].group_id);
        assert_eq!(service.repo().raw_count(), 2);
    }

    #[tokio::test]
    async fn test_customer_id_encodings_resolve_identically() {
        let data = json!({"account_id": "AC-1", "status_change": "credits_block_removed"});
        let encodings = [
            json!("CO-abc123"),
            json!(["CO-abc123"]),
            json!("[\"CO-abc123\"]"),
        ];

        for (i, customer_id) in encodings.into_iter().enumerate() {
            let service = service();
            let body = account_status(&format!("evt-{}", i), customer_id, data.clone());
            let stored = service.handle_message(&body).await.unwrap();
            assert_eq!(stored.notification.entity_id, "ent-CO-abc123");
            assert_eq!(stored.notification.entity_type, EntityType::Consumer);
        }
    }

    #[tokio::test]
    async fn test_business_and_member_prefixes() {
        let service = service();

        let business = envelope(
            "b-1",
            "business_profile",
            Some("indicator_changed"),
            json!(["NC-biz1"]),
            json!({"industry": "TECHNOLOGY"}),
        );
        let stored = service.handle_message(&business).await.unwrap();
        assert_eq!(stored.notification.entity_type, EntityType::Business);

        let member = envelope(
            "m-1",
            "consumer_profile",
            Some("address_changed"),
            json!("OW-own1"),
            json!({"address": {
                "line1": "1 Main St", "city": "Austin", "state": "TX",
                "zip_code": "78701", "country_code": "USA"
            }}),
        );
        let stored = service.handle_message(&member).await.unwrap();
        assert_eq!(stored.notification.entity_type, EntityType::Member);
        assert_eq!(stored.notification.data["address"]["country"], "US");
    }

    #[tokio::test]
    async fn test_unrecognized_customer_id_in_every_encoding() {
        let data = json!({"account_id": "AC-1", "status_change": "credits_block_added"});
        let encodings = [
            json!("XX-abc123"),
            json!(["XX-abc123"]),
            json!("[\"XX-abc123\"]"),
            json!(""),
            json!([]),
            json!(null),
        ];

        for customer_id in encodings {
            let service = service();
            let body = account_status("evt", customer_id.clone(), data.clone());
            let result = service.handle_message(&body).await;
            assert!(
                matches!(result, Err(AppError::Domain(DomainError::InvalidEntityId(_)))),
                "customer_id {} resolved",
                customer_id
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_bank_id_is_invalid_entity() {
        let service = service();
        let body = account_status(
            "evt",
            json!("CO-nobody"),
            json!({"account_id": "AC-1", "status_change": "credits_block_added"}),
        );

        let result = service.handle_message(&body).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidEntityId(_)))
        ));
    }

    #[tokio::test]
    async fn test_unknown_reason_is_logged_but_not_forwarded() {
        let service = service();
        let body = envelope(
            "evt",
            "transaction_posted",
            Some("posted_by_carrier_pigeon"),
            json!("CO-abc123"),
            json!({}),
        );

        let result = service.handle_message(&body).await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidNotificationAction(_)))
        ));
        assert_eq!(service.repo().raw_count(), 1);
        assert!(service.repo().stored().is_empty());
        assert!(service.publisher().sent().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_event_type() {
        let service = service();
        let body = envelope("evt", "loan_status", None, json!("CO-abc123"), json!({}));

        let result = service.handle_message(&body).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidNotificationFormat(_)))
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_still_logged() {
        let service = service();

        let result = service.handle_message(b"{not json").await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::MalformedPayload(_)))
        ));
        assert_eq!(service.repo().raw_count(), 1);
    }

    #[tokio::test]
    async fn test_raw_log_failure_does_not_abort() {
        let service = NotificationService::new(MockRepo::failing_raw_log(), MockPublisher::default());
        let body = account_status(
            "evt",
            json!("CO-abc123"),
            json!({"account_id": "AC-1", "status_change": "debits_block_added"}),
        );

        let stored = service.handle_message(&body).await.unwrap();

        assert_eq!(stored.send_count, 1);
        assert_eq!(service.repo().raw_count(), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_leaves_send_count() {
        let service = NotificationService::new(MockRepo::new(), MockPublisher::failing());
        let body = account_status(
            "evt",
            json!("CO-abc123"),
            json!({"account_id": "AC-1", "status_change": "debits_block_added"}),
        );

        let result = service.handle_message(&body).await;

        assert!(matches!(result, Err(AppError::Queue(_))));
        let rows = service.repo().stored();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].send_count, 0);
    }

    #[tokio::test]
    async fn test_business_notification_for_consumer_is_rejected() {
        let service = service();
        let body = envelope(
            "evt",
            "business_kyc",
            Some("kyc_changed"),
            json!("CO-abc123"),
            json!({"kyc": {"status": "APPROVED"}}),
        );

        let result = service.handle_message(&body).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidNotificationType(_)))
        ));
    }
}
