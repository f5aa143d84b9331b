use zru::SignatureVerifier;

use crate::config::WebhookConfig;

/// Shared application state for the receiver. Read-only after startup.
pub struct AppState {
    pub verifier: SignatureVerifier,
    pub metrics_token: Option<Vec<u8>>,
    pub public_metrics: bool,
}

impl AppState {
    pub fn from_config(config: &WebhookConfig) -> Self {
        Self {
            verifier: SignatureVerifier::new(config.secret_key.as_str()),
            metrics_token: config.metrics_token.clone(),
            public_metrics: config.public_metrics,
        }
    }
}
