use actix_web::{get, post, web, HttpRequest, HttpResponse};
use zru::{Notification, ZruError};

use crate::error::WebhookError;
use crate::metrics;
use crate::state::AppState;

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "zru-webhook",
    }))
}

#[get("/metrics")]
pub async fn metrics_endpoint(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match &state.metrics_token {
        Some(token) => {
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| zru::signature::constant_time_eq(t.as_bytes(), token))
                .unwrap_or(false);

            if !authorized {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "unauthorized",
                    "message": "Valid Bearer token required for /metrics"
                }));
            }
        }
        None if !state.public_metrics => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "forbidden",
                "message": "Set METRICS_TOKEN or ZRU_PUBLIC_METRICS=true to access /metrics"
            }));
        }
        None => {}
    }
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}

/// Intake for platform notifications. The raw body is verified before it is
/// classified; nothing is fetched from the API here.
#[post("/notifications")]
pub async fn receive_notification(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, WebhookError> {
    let notification = match Notification::from_slice(&body) {
        Ok(n) => n,
        Err(e) => {
            metrics::NOTIFICATIONS
                .with_label_values(&["invalid"])
                .inc();
            return Err(WebhookError::InvalidPayload(e.to_string()));
        }
    };

    match state.verifier.verify(notification.payload()) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(
                id = notification.id().unwrap_or_default(),
                "notification signature mismatch"
            );
            metrics::SIGNATURE_FAILURES
                .with_label_values(&["mismatch"])
                .inc();
            metrics::NOTIFICATIONS
                .with_label_values(&["rejected"])
                .inc();
            return Err(WebhookError::InvalidSignature);
        }
        Err(e @ ZruError::MalformedPayload(_)) => {
            tracing::warn!(error = %e, "notification without usable signature");
            metrics::SIGNATURE_FAILURES
                .with_label_values(&["missing"])
                .inc();
            metrics::NOTIFICATIONS
                .with_label_values(&["rejected"])
                .inc();
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    }

    let kind = notification.kind();
    metrics::NOTIFICATIONS
        .with_label_values(&["accepted"])
        .inc();
    tracing::info!(
        id = notification.id().unwrap_or_default(),
        kind = kind.label(),
        notification_type = notification.notification_type().unwrap_or_default(),
        "notification accepted"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": notification.id(),
        "kind": kind.label(),
        "status": notification.status().map(|s| s.code()),
        "saleAction": notification.sale_action().map(|a| a.code()),
        "saleId": notification.sale_id().filter(|s| !s.is_empty()),
    })))
}
