use std::fmt;

use thiserror::Error;

/// Which resolution accessor was talking to the entity fetcher when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStep {
    Transaction,
    Subscription,
    Authorization,
    Sale,
}

impl ResolutionStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Subscription => "subscription",
            Self::Authorization => "authorization",
            Self::Sale => "sale",
        }
    }
}

impl fmt::Display for ResolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by ZRU operations.
///
/// A signature mismatch is not an error: [`crate::signature::verify`] returns
/// `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum ZruError {
    /// A field required by the operation is missing or has the wrong type.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The entity fetcher failed while resolving a notification reference.
    #[error("failed to resolve {step}: {source}")]
    Resolution {
        step: ResolutionStep,
        #[source]
        source: Box<ZruError>,
    },

    /// The remote API rejected a request or the entity does not exist.
    #[error("api error: {message}")]
    Api {
        message: String,
        json_body: Option<serde_json::Value>,
        resource: Option<String>,
        resource_id: Option<String>,
    },

    /// An `EntityFetcher` could not build a valid request (bad id, missing parameter).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An `EntityFetcher` was used in a way it does not support.
    #[error("bad use: {0}")]
    BadUse(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl ZruError {
    /// Api error for an entity the remote platform does not know about.
    pub fn not_found(resource: &str, resource_id: &str) -> Self {
        Self::Api {
            message: format!("{resource} {resource_id} not found"),
            json_body: None,
            resource: Some(resource.to_string()),
            resource_id: Some(resource_id.to_string()),
        }
    }

    /// Attach the resolution step that produced this error.
    pub fn during(self, step: ResolutionStep) -> Self {
        Self::Resolution {
            step,
            source: Box::new(self),
        }
    }
}
