use crate::config::ClientConfig;
use crate::entity::{Authorization, Sale, Subject, Subscription, Transaction};
use crate::error::ZruError;
use crate::notification::Notification;
use crate::payload::RawPayload;
use crate::resolver::{EntityFetcher, NotificationResolver};
use crate::signature::SignatureVerifier;

/// Entry point for one ZRU account.
///
/// Binds the account's credentials to an injected [`EntityFetcher`], so
/// notifications can be verified with the account secret and their references
/// resolved through the same API connection.
pub struct ZruClient<F> {
    config: ClientConfig,
    verifier: SignatureVerifier,
    resolver: NotificationResolver<F>,
}

impl<F: EntityFetcher> ZruClient<F> {
    pub fn new(config: ClientConfig, fetcher: F) -> Self {
        let verifier = SignatureVerifier::new(config.secret_key());
        Self {
            config,
            verifier,
            resolver: NotificationResolver::new(fetcher),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn resolver(&self) -> &NotificationResolver<F> {
        &self.resolver
    }

    pub fn notification(&self, payload: RawPayload) -> Notification {
        Notification::new(payload)
    }

    /// Parse a raw webhook body into a notification (not yet verified).
    pub fn parse_notification(&self, body: &[u8]) -> Result<Notification, ZruError> {
        Notification::from_slice(body)
    }

    /// Check the notification's signature against this account's secret key.
    pub fn verify(&self, notification: &Notification) -> Result<bool, ZruError> {
        self.verifier.verify(notification.payload())
    }

    /// Parse and verify in one step; `Ok(None)` when the signature does not match.
    pub fn verified_notification(&self, body: &[u8]) -> Result<Option<Notification>, ZruError> {
        let notification = self.parse_notification(body)?;
        if self.verify(&notification)? {
            Ok(Some(notification))
        } else {
            tracing::warn!(
                id = notification.id().unwrap_or_default(),
                "rejecting notification with invalid signature"
            );
            Ok(None)
        }
    }

    pub async fn subject(&self, notification: &Notification) -> Result<Option<Subject>, ZruError> {
        self.resolver.resolve_subject(notification).await
    }

    pub async fn transaction(
        &self,
        notification: &Notification,
    ) -> Result<Option<Transaction>, ZruError> {
        self.resolver.resolve_transaction(notification).await
    }

    pub async fn subscription(
        &self,
        notification: &Notification,
    ) -> Result<Option<Subscription>, ZruError> {
        self.resolver.resolve_subscription(notification).await
    }

    pub async fn authorization(
        &self,
        notification: &Notification,
    ) -> Result<Option<Authorization>, ZruError> {
        self.resolver.resolve_authorization(notification).await
    }

    pub async fn sale(&self, notification: &Notification) -> Result<Option<Sale>, ZruError> {
        self.resolver.resolve_sale(notification).await
    }
}
