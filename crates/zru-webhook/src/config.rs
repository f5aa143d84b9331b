use zru::config::secret_key_from_lookup;
use zru::ZruError;

/// Runtime configuration for the receiver.
#[derive(Clone)]
pub struct WebhookConfig {
    pub secret_key: String,
    pub port: u16,
    pub rate_limit_rpm: u64,
    /// Bearer token guarding `/metrics`.
    pub metrics_token: Option<Vec<u8>>,
    /// Serve `/metrics` without a token when none is configured.
    pub public_metrics: bool,
}

impl WebhookConfig {
    pub fn from_env() -> Result<Self, ZruError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ZruError> {
        let secret_key = secret_key_from_lookup(&lookup)?;

        let port: u16 = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(4030);

        let rate_limit_rpm: u64 = lookup("RATE_LIMIT_RPM")
            .and_then(|r| r.parse().ok())
            .unwrap_or(120);

        let metrics_token = lookup("METRICS_TOKEN")
            .filter(|s| !s.is_empty())
            .map(|s| s.into_bytes());

        let public_metrics = lookup("ZRU_PUBLIC_METRICS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            secret_key,
            port,
            rate_limit_rpm,
            metrics_token,
            public_metrics,
        })
    }
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret_key", &"<redacted>")
            .field("port", &self.port)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field("metrics_token", &self.metrics_token.as_ref().map(|_| "<redacted>"))
            .field("public_metrics", &self.public_metrics)
            .finish()
    }
}
