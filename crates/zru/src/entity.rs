//! Remote entities a notification can point at.
//!
//! Only the fields this crate reads are typed; everything else the API sends
//! is kept in `extra` so nothing is lost on a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ZruError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iframe_url: Option<String>,
    #[serde(default)]
    pub products: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iframe_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    /// Sent either as a JSON number or a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sale {
    /// The amount as a float, converting explicitly from whichever form was sent.
    pub fn amount_value(&self) -> Result<Option<f64>, ZruError> {
        match &self.amount {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| {
                ZruError::MalformedPayload(format!("sale amount {n} is not representable"))
            }),
            Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| {
                ZruError::MalformedPayload(format!("sale amount {s:?} is not a number"))
            }),
            Some(other) => Err(ZruError::MalformedPayload(format!(
                "sale amount has unexpected shape: {other}"
            ))),
        }
    }
}

/// The entity a notification is about, as selected by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    Transaction(Transaction),
    Subscription(Subscription),
    Authorization(Authorization),
}

impl Subject {
    pub fn id(&self) -> &str {
        match self {
            Self::Transaction(t) => &t.id,
            Self::Subscription(s) => &s.id,
            Self::Authorization(a) => &a.id,
        }
    }
}
