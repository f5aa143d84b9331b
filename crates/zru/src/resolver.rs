//! Lazy resolution of the entities a notification refers to.
//!
//! The resolver never guesses: the notification's kind picks exactly one
//! fetch path, and the related sale is looked up independently through
//! `sale_id`. Every call goes to the [`EntityFetcher`]; nothing is cached.

use std::future::Future;

use serde_json::Value;

use crate::constants::{FIELD_ID, FIELD_SALE_ID, FIELD_TYPE};
use crate::entity::{Authorization, Sale, Subject, Subscription, Transaction};
use crate::error::{ResolutionStep, ZruError};
use crate::notification::{Notification, NotificationKind};
use crate::payload::json_type_name;

/// Retrieves entities from the ZRU API by id.
///
/// Implementations own transport, authentication and retry policy. Errors
/// are passed through to the caller with the failing step attached.
pub trait EntityFetcher: Send + Sync {
    fn fetch_transaction(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Transaction, ZruError>> + Send;

    fn fetch_subscription(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Subscription, ZruError>> + Send;

    fn fetch_authorization(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Authorization, ZruError>> + Send;

    fn fetch_sale(&self, id: &str) -> impl Future<Output = Result<Sale, ZruError>> + Send;
}

/// Resolves notification references through an injected [`EntityFetcher`].
pub struct NotificationResolver<F> {
    fetcher: F,
}

impl<F: EntityFetcher> NotificationResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch the transaction, subscription or authorization the notification is about.
    ///
    /// Returns `Ok(None)` for unknown kinds without touching the fetcher.
    pub async fn resolve_subject(
        &self,
        notification: &Notification,
    ) -> Result<Option<Subject>, ZruError> {
        match discriminant(notification)? {
            NotificationKind::Transaction => Ok(self
                .resolve_transaction(notification)
                .await?
                .map(Subject::Transaction)),
            NotificationKind::Subscription => Ok(self
                .resolve_subscription(notification)
                .await?
                .map(Subject::Subscription)),
            NotificationKind::Authorization => Ok(self
                .resolve_authorization(notification)
                .await?
                .map(Subject::Authorization)),
            NotificationKind::Unknown(code) => {
                tracing::debug!(code = %code, "unknown notification type, nothing to resolve");
                Ok(None)
            }
        }
    }

    /// The transaction behind a transaction notification; `None` for other kinds.
    pub async fn resolve_transaction(
        &self,
        notification: &Notification,
    ) -> Result<Option<Transaction>, ZruError> {
        if !notification.is_transaction() {
            return Ok(None);
        }
        let id = subject_id(notification)?;
        tracing::debug!(id, "fetching transaction for notification");
        self.fetcher
            .fetch_transaction(id)
            .await
            .map(Some)
            .map_err(|e| e.during(ResolutionStep::Transaction))
    }

    pub async fn resolve_subscription(
        &self,
        notification: &Notification,
    ) -> Result<Option<Subscription>, ZruError> {
        if !notification.is_subscription() {
            return Ok(None);
        }
        let id = subject_id(notification)?;
        tracing::debug!(id, "fetching subscription for notification");
        self.fetcher
            .fetch_subscription(id)
            .await
            .map(Some)
            .map_err(|e| e.during(ResolutionStep::Subscription))
    }

    pub async fn resolve_authorization(
        &self,
        notification: &Notification,
    ) -> Result<Option<Authorization>, ZruError> {
        if !notification.is_authorization() {
            return Ok(None);
        }
        let id = subject_id(notification)?;
        tracing::debug!(id, "fetching authorization for notification");
        self.fetcher
            .fetch_authorization(id)
            .await
            .map(Some)
            .map_err(|e| e.during(ResolutionStep::Authorization))
    }

    /// The sale referenced by `sale_id`, whatever the notification kind.
    ///
    /// Absent, null and empty `sale_id` all mean "no sale".
    pub async fn resolve_sale(&self, notification: &Notification) -> Result<Option<Sale>, ZruError> {
        let sale_id = match notification.raw_field(FIELD_SALE_ID) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(id)) if id.is_empty() => return Ok(None),
            Some(Value::String(id)) => id.as_str(),
            Some(other) => {
                return Err(ZruError::MalformedPayload(format!(
                    "`{FIELD_SALE_ID}` must be a string, got {}",
                    json_type_name(other)
                )))
            }
        };
        tracing::debug!(sale_id, "fetching sale for notification");
        self.fetcher
            .fetch_sale(sale_id)
            .await
            .map(Some)
            .map_err(|e| e.during(ResolutionStep::Sale))
    }
}

/// The kind, failing when the `type` field is missing or not a string.
fn discriminant(notification: &Notification) -> Result<NotificationKind, ZruError> {
    match notification.raw_field(FIELD_TYPE) {
        Some(Value::String(_)) => Ok(notification.kind()),
        None | Some(Value::Null) => Err(ZruError::MalformedPayload(format!(
            "missing `{FIELD_TYPE}` field"
        ))),
        Some(other) => Err(ZruError::MalformedPayload(format!(
            "`{FIELD_TYPE}` must be a string, got {}",
            json_type_name(other)
        ))),
    }
}

fn subject_id(notification: &Notification) -> Result<&str, ZruError> {
    match notification.id() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ZruError::MalformedPayload(format!(
            "missing `{FIELD_ID}` field"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use std::sync::Mutex;

    /// Records every fetch and answers with a stub entity.
    #[derive(Default)]
    struct RecordingFetcher {
        calls: Mutex<Vec<(&'static str, String)>>,
        fail: bool,
    }

    impl RecordingFetcher {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn record(&self, kind: &'static str, id: &str) -> Result<(), ZruError> {
            self.calls.lock().unwrap().push((kind, id.to_string()));
            if self.fail {
                Err(ZruError::not_found(kind, id))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<(&'static str, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl EntityFetcher for RecordingFetcher {
        async fn fetch_transaction(&self, id: &str) -> Result<Transaction, ZruError> {
            self.record("transaction", id)?;
            Ok(serde_json::from_value(json!({"id": id})).unwrap())
        }

        async fn fetch_subscription(&self, id: &str) -> Result<Subscription, ZruError> {
            self.record("subscription", id)?;
            Ok(serde_json::from_value(json!({"id": id})).unwrap())
        }

        async fn fetch_authorization(&self, id: &str) -> Result<Authorization, ZruError> {
            self.record("authorization", id)?;
            Ok(Authorization {
                id: id.to_string(),
                status: Some("A".into()),
                extra: Map::new(),
            })
        }

        async fn fetch_sale(&self, id: &str) -> Result<Sale, ZruError> {
            self.record("sale", id)?;
            Ok(serde_json::from_value(json!({"id": id, "amount": 5})).unwrap())
        }
    }

    fn notification(value: Value) -> Notification {
        Notification::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_subject_follows_kind() {
        for (code, expected) in [
            ("P", "transaction"),
            ("S", "subscription"),
            ("A", "authorization"),
        ] {
            let resolver = NotificationResolver::new(RecordingFetcher::default());
            let n = notification(json!({"id": "e1", "type": code}));
            let subject = resolver.resolve_subject(&n).await.unwrap().unwrap();
            assert_eq!(subject.id(), "e1");
            assert_eq!(resolver.fetcher().calls(), vec![(expected, "e1".to_string())]);
        }
    }

    #[tokio::test]
    async fn test_unknown_kind_fetches_nothing() {
        let resolver = NotificationResolver::new(RecordingFetcher::default());
        let n = notification(json!({"id": "e1", "type": "Z"}));
        assert!(resolver.resolve_subject(&n).await.unwrap().is_none());
        assert!(resolver.fetcher().calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_type_is_malformed() {
        let resolver = NotificationResolver::new(RecordingFetcher::default());
        let n = notification(json!({"id": "e1"}));
        let err = resolver.resolve_subject(&n).await.unwrap_err();
        assert!(matches!(err, ZruError::MalformedPayload(_)));
        assert!(resolver.fetcher().calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_is_malformed() {
        let resolver = NotificationResolver::new(RecordingFetcher::default());
        let n = notification(json!({"type": "P"}));
        let err = resolver.resolve_subject(&n).await.unwrap_err();
        assert!(matches!(err, ZruError::MalformedPayload(ref m) if m.contains("id")));
    }

    #[tokio::test]
    async fn test_mismatched_accessor_returns_none() {
        let resolver = NotificationResolver::new(RecordingFetcher::default());
        let n = notification(json!({"id": "e1", "type": "P"}));
        assert!(resolver.resolve_subscription(&n).await.unwrap().is_none());
        assert!(resolver.resolve_authorization(&n).await.unwrap().is_none());
        assert!(resolver.fetcher().calls().is_empty());
    }

    #[tokio::test]
    async fn test_each_call_fetches_again() {
        let resolver = NotificationResolver::new(RecordingFetcher::default());
        let n = notification(json!({"id": "e1", "type": "P"}));
        resolver.resolve_transaction(&n).await.unwrap();
        resolver.resolve_transaction(&n).await.unwrap();
        assert_eq!(resolver.fetcher().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_sale_is_independent_of_kind() {
        let resolver = NotificationResolver::new(RecordingFetcher::default());
        let n = notification(json!({"id": "e1", "type": "Z", "sale_id": "s1"}));
        let sale = resolver.resolve_sale(&n).await.unwrap().unwrap();
        assert_eq!(sale.id, "s1");
        assert_eq!(resolver.fetcher().calls(), vec![("sale", "s1".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_or_null_sale_id_fetches_nothing() {
        let resolver = NotificationResolver::new(RecordingFetcher::default());
        for sale_id in [json!(""), json!(null)] {
            let n = notification(json!({"type": "P", "sale_id": sale_id}));
            assert!(resolver.resolve_sale(&n).await.unwrap().is_none());
        }
        let n = notification(json!({"type": "P"}));
        assert!(resolver.resolve_sale(&n).await.unwrap().is_none());
        assert!(resolver.fetcher().calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_string_sale_id_is_malformed() {
        let resolver = NotificationResolver::new(RecordingFetcher::default());
        let n = notification(json!({"sale_id": 12}));
        assert!(matches!(
            resolver.resolve_sale(&n).await.unwrap_err(),
            ZruError::MalformedPayload(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_with_step() {
        let resolver = NotificationResolver::new(RecordingFetcher::failing());
        let n = notification(json!({"id": "e1", "type": "S", "sale_id": "s1"}));

        match resolver.resolve_subject(&n).await.unwrap_err() {
            ZruError::Resolution { step, source } => {
                assert_eq!(step, ResolutionStep::Subscription);
                assert!(matches!(*source, ZruError::Api { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match resolver.resolve_sale(&n).await.unwrap_err() {
            ZruError::Resolution { step, .. } => assert_eq!(step, ResolutionStep::Sale),
            other => panic!("unexpected error: {other:?}"),
        }

        // Exactly one attempt per call, no retries.
        assert_eq!(resolver.fetcher().calls().len(), 2);
    }
}
