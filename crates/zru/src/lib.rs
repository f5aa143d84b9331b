//! Rust bindings for the ZRU payment platform.
//!
//! Covers the two parts of the integration with real invariants:
//!
//! - **Webhook signatures**: [`canonical`] rebuilds the platform's signing
//!   string and [`signature`] checks the SHA-256 digest the platform sent.
//! - **Notification resolution**: [`notification`] classifies a payload by
//!   its type and status codes, and [`resolver`] fetches the transaction,
//!   subscription, authorization or sale it refers to through an injected
//!   [`EntityFetcher`].
//!
//! Transport, authentication headers and pagination belong to the
//! [`EntityFetcher`] implementation supplied by the caller.
//!
//! # Example
//!
//! ```no_run
//! use zru::{ClientConfig, EntityFetcher, ZruClient};
//!
//! # async fn handle<F: EntityFetcher>(fetcher: F, body: &[u8]) -> Result<(), zru::ZruError> {
//! let client = ZruClient::new(ClientConfig::from_env()?, fetcher);
//!
//! if let Some(notification) = client.verified_notification(body)? {
//!     if notification.is_transaction() && notification.is_done() {
//!         let transaction = client.transaction(&notification).await?;
//!         let sale = client.sale(&notification).await?;
//!         println!("{transaction:?} {sale:?}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod client;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod notification;
pub mod payload;
pub mod resolver;
pub mod signature;

pub use client::ZruClient;
pub use config::ClientConfig;
pub use entity::{Authorization, Sale, Subject, Subscription, Transaction};
pub use error::{ResolutionStep, ZruError};
pub use notification::{
    AuthorizationStatus, Notification, NotificationKind, NotificationStatus, SaleAction,
    SubscriptionStatus,
};
pub use payload::RawPayload;
pub use resolver::{EntityFetcher, NotificationResolver};
pub use signature::{compute_signature, verify, SignatureVerifier};
