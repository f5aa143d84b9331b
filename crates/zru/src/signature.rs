//! SHA-256 notification signatures.
//!
//! The digest is computed over the canonical signing string (see
//! [`crate::canonical`]) and compared against the payload's `signature` field
//! in constant time.

use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::canonical::canonicalize;
use crate::constants::SIGNATURE_FIELD;
use crate::error::ZruError;
use crate::payload::{json_type_name, RawPayload};

/// Lowercase hex SHA-256 of the payload's signing string under `secret`.
pub fn compute_signature(payload: &RawPayload, secret: &str) -> String {
    let digest = Sha256::digest(canonicalize(payload, secret).as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{b:02x}");
        s
    })
}

/// The signature the sender declared, or `MalformedPayload` when there is none.
pub fn declared_signature(payload: &RawPayload) -> Result<&str, ZruError> {
    match payload.get(SIGNATURE_FIELD) {
        Some(serde_json::Value::String(sig)) => Ok(sig.as_str()),
        None | Some(serde_json::Value::Null) => Err(ZruError::MalformedPayload(format!(
            "missing `{SIGNATURE_FIELD}` field"
        ))),
        Some(other) => Err(ZruError::MalformedPayload(format!(
            "`{SIGNATURE_FIELD}` must be a string, got {}",
            json_type_name(other)
        ))),
    }
}

/// Check a payload's declared signature against `secret`.
///
/// Returns `Ok(false)` on mismatch; only a missing or non-string signature is an error.
pub fn verify(payload: &RawPayload, secret: &str) -> Result<bool, ZruError> {
    let declared = declared_signature(payload)?;
    let computed = compute_signature(payload, secret);
    let valid = constant_time_eq(computed.as_bytes(), declared.as_bytes());
    if !valid {
        tracing::debug!(fields = payload.len(), "notification signature mismatch");
    }
    Ok(valid)
}

/// Constant-time byte comparison that does not leak input lengths or content.
///
/// Both inputs are hashed to fixed-length digests before `subtle` compares them.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let ha = Sha256::digest(a);
    let hb = Sha256::digest(b);
    ha.ct_eq(&hb).into()
}

/// Verifier bound to one account's secret key.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, payload: &RawPayload) -> Result<bool, ZruError> {
        verify(payload, &self.secret)
    }

    pub fn sign(&self, payload: &RawPayload) -> String {
        compute_signature(payload, &self.secret)
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}
