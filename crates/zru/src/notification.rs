//! Typed view over a ZRU webhook notification.
//!
//! The platform sends single-letter codes in `type`, `status`,
//! `subscription_status`, `authorization_status` and `sale_action`. Fields
//! that do not apply to a notification's kind arrive empty or absent, so every
//! accessor here tolerates missing values.

use serde_json::Value;

use crate::constants::*;
use crate::error::ZruError;
use crate::payload::RawPayload;

/// What the notification is about, from the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Transaction,
    Subscription,
    Authorization,
    /// A type code this library does not know yet (empty when `type` is absent).
    Unknown(String),
}

impl NotificationKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => Self::Transaction,
            "S" => Self::Subscription,
            "A" => Self::Authorization,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Transaction => "P",
            Self::Subscription => "S",
            Self::Authorization => "A",
            Self::Unknown(code) => code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Subscription => "subscription",
            Self::Authorization => "authorization",
            Self::Unknown(_) => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// Payment status from the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationStatus {
    Done,
    Cancelled,
    Expired,
    Pending,
}

impl NotificationStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "D" => Some(Self::Done),
            "C" => Some(Self::Cancelled),
            "E" => Some(Self::Expired),
            "N" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Done => "D",
            Self::Cancelled => "C",
            Self::Expired => "E",
            Self::Pending => "N",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    Wait,
    Active,
    Paused,
    Stopped,
}

impl SubscriptionStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(Self::Wait),
            "A" => Some(Self::Active),
            "P" => Some(Self::Paused),
            "S" => Some(Self::Stopped),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Wait => "W",
            Self::Active => "A",
            Self::Paused => "P",
            Self::Stopped => "S",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationStatus {
    Active,
    Removed,
}

impl AuthorizationStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Active),
            "R" => Some(Self::Removed),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Active => "A",
            Self::Removed => "R",
        }
    }
}

/// What happened to the sale attached to the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleAction {
    Get,
    Hold,
    Void,
    Capture,
    Refund,
    Settle,
    EscrowRejected,
    Error,
}

impl SaleAction {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "G" => Some(Self::Get),
            "H" => Some(Self::Hold),
            "V" => Some(Self::Void),
            "C" => Some(Self::Capture),
            "R" => Some(Self::Refund),
            "S" => Some(Self::Settle),
            "E" => Some(Self::EscrowRejected),
            "I" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Get => "G",
            Self::Hold => "H",
            Self::Void => "V",
            Self::Capture => "C",
            Self::Refund => "R",
            Self::Settle => "S",
            Self::EscrowRejected => "E",
            Self::Error => "I",
        }
    }
}

/// A received notification. Holds the raw payload and never mutates it.
///
/// Nothing fetched through [`crate::resolver::NotificationResolver`] is cached
/// here; callers that need a resolved entity more than once keep it themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    payload: RawPayload,
}

impl Notification {
    pub fn new(payload: RawPayload) -> Self {
        Self { payload }
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, ZruError> {
        RawPayload::from_slice(body).map(Self::new)
    }

    pub fn from_value(value: Value) -> Result<Self, ZruError> {
        RawPayload::from_value(value).map(Self::new)
    }

    pub fn payload(&self) -> &RawPayload {
        &self.payload
    }

    // -- generic field access --

    /// A payload field by name. Errors with `UnknownField` when the payload does not carry it.
    pub fn field(&self, name: &str) -> Result<&Value, ZruError> {
        self.payload
            .get(name)
            .ok_or_else(|| ZruError::UnknownField(name.to_string()))
    }

    pub fn raw_field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// A payload field when present and string-typed.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.payload.str_value(name)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field(FIELD_ID)
    }

    pub fn sale_id(&self) -> Option<&str> {
        self.str_field(FIELD_SALE_ID)
    }

    pub fn order_id(&self) -> Option<&str> {
        self.str_field(FIELD_ORDER_ID)
    }

    pub fn action(&self) -> Option<&str> {
        self.str_field(FIELD_ACTION)
    }

    pub fn notification_type(&self) -> Option<&str> {
        self.str_field(FIELD_NOTIFICATION_TYPE)
    }

    // -- kind --

    pub fn kind(&self) -> NotificationKind {
        NotificationKind::from_code(self.str_field(FIELD_TYPE).unwrap_or_default())
    }

    pub fn is_transaction(&self) -> bool {
        self.kind() == NotificationKind::Transaction
    }

    pub fn is_subscription(&self) -> bool {
        self.kind() == NotificationKind::Subscription
    }

    pub fn is_authorization(&self) -> bool {
        self.kind() == NotificationKind::Authorization
    }

    // -- status --

    pub fn status(&self) -> Option<NotificationStatus> {
        self.str_field(FIELD_STATUS)
            .and_then(NotificationStatus::from_code)
    }

    pub fn is_done(&self) -> bool {
        self.status() == Some(NotificationStatus::Done)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == Some(NotificationStatus::Cancelled)
    }

    pub fn is_expired(&self) -> bool {
        self.status() == Some(NotificationStatus::Expired)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == Some(NotificationStatus::Pending)
    }

    // -- subscription status --

    pub fn subscription_status(&self) -> Option<SubscriptionStatus> {
        self.str_field(FIELD_SUBSCRIPTION_STATUS)
            .and_then(SubscriptionStatus::from_code)
    }

    pub fn is_subscription_waiting(&self) -> bool {
        self.subscription_status() == Some(SubscriptionStatus::Wait)
    }

    pub fn is_subscription_active(&self) -> bool {
        self.subscription_status() == Some(SubscriptionStatus::Active)
    }

    pub fn is_subscription_paused(&self) -> bool {
        self.subscription_status() == Some(SubscriptionStatus::Paused)
    }

    pub fn is_subscription_stopped(&self) -> bool {
        self.subscription_status() == Some(SubscriptionStatus::Stopped)
    }

    // -- authorization status --

    pub fn authorization_status(&self) -> Option<AuthorizationStatus> {
        self.str_field(FIELD_AUTHORIZATION_STATUS)
            .and_then(AuthorizationStatus::from_code)
    }

    pub fn is_authorization_active(&self) -> bool {
        self.authorization_status() == Some(AuthorizationStatus::Active)
    }

    pub fn is_authorization_removed(&self) -> bool {
        self.authorization_status() == Some(AuthorizationStatus::Removed)
    }

    // -- sale action --

    pub fn sale_action(&self) -> Option<SaleAction> {
        self.str_field(FIELD_SALE_ACTION)
            .and_then(SaleAction::from_code)
    }

    pub fn is_sale_get(&self) -> bool {
        self.sale_action() == Some(SaleAction::Get)
    }

    pub fn is_sale_hold(&self) -> bool {
        self.sale_action() == Some(SaleAction::Hold)
    }

    pub fn is_sale_void(&self) -> bool {
        self.sale_action() == Some(SaleAction::Void)
    }

    pub fn is_sale_capture(&self) -> bool {
        self.sale_action() == Some(SaleAction::Capture)
    }

    pub fn is_sale_refund(&self) -> bool {
        self.sale_action() == Some(SaleAction::Refund)
    }

    pub fn is_sale_settle(&self) -> bool {
        self.sale_action() == Some(SaleAction::Settle)
    }

    pub fn is_sale_escrow_rejected(&self) -> bool {
        self.sale_action() == Some(SaleAction::EscrowRejected)
    }

    pub fn is_sale_error(&self) -> bool {
        self.sale_action() == Some(SaleAction::Error)
    }

    // -- signature --

    /// Verify the declared signature against `secret`. See [`crate::signature::verify`].
    pub fn check_signature(&self, secret: &str) -> Result<bool, ZruError> {
        crate::signature::verify(&self.payload, secret)
    }
}

impl From<RawPayload> for Notification {
    fn from(payload: RawPayload) -> Self {
        Self::new(payload)
    }
}
