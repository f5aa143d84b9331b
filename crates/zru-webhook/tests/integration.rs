use actix_web::{test, web, App};
use serde_json::json;

use zru::{RawPayload, SignatureVerifier};
use zru_webhook::routes;
use zru_webhook::state::AppState;

const SECRET: &str = "test-secret";

fn make_state(metrics_token: Option<Vec<u8>>, public_metrics: bool) -> web::Data<AppState> {
    web::Data::new(AppState {
        verifier: SignatureVerifier::new(SECRET),
        metrics_token,
        public_metrics,
    })
}

/// A transaction notification signed with `SECRET`.
fn signed_body() -> serde_json::Value {
    let mut body = json!({
        "id": "c8325bb3-c24e-4c0c-b0ff-14fe89bf9f1f",
        "fail": null,
        "type": "P",
        "_extra": {"email": "demo@demo.com"},
        "action": "D",
        "amount": 4596,
        "status": "D",
        "sale_id": "d1bb7082-7a97-48c6-893d-4d5febcd463b",
        "order_id": "",
        "_charge_id": "",
        "sale_action": "G",
        "notification_type": "transaction_done",
        "subscription_status": "",
        "authorization_status": ""
    });
    let payload = RawPayload::from_value(body.clone()).unwrap();
    body["signature"] = json!(SignatureVerifier::new(SECRET).sign(&payload));
    body
}

#[actix_rt::test]
async fn test_health() {
    let app = test::init_service(App::new().service(routes::health)).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "zru-webhook");
}

#[actix_rt::test]
async fn test_verified_notification_is_accepted() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(None, false))
            .service(routes::receive_notification),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/notifications")
        .set_json(signed_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "c8325bb3-c24e-4c0c-b0ff-14fe89bf9f1f");
    assert_eq!(body["kind"], "transaction");
    assert_eq!(body["status"], "D");
    assert_eq!(body["saleAction"], "G");
    assert_eq!(body["saleId"], "d1bb7082-7a97-48c6-893d-4d5febcd463b");
}

#[actix_rt::test]
async fn test_tampered_notification_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(None, false))
            .service(routes::receive_notification),
    )
    .await;

    let mut forged = signed_body();
    forged["amount"] = json!(1);

    let req = test::TestRequest::post()
        .uri("/notifications")
        .set_json(forged)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_signature");
}

#[actix_rt::test]
async fn test_unsigned_metadata_changes_are_accepted() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(None, false))
            .service(routes::receive_notification),
    )
    .await;

    let mut body = signed_body();
    body["_extra"] = json!({"email": "other@demo.com"});
    body["fail"] = json!("retry");

    let req = test::TestRequest::post()
        .uri("/notifications")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_missing_signature_is_malformed() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(None, false))
            .service(routes::receive_notification),
    )
    .await;

    let mut body = signed_body();
    body.as_object_mut().unwrap().remove("signature");

    let req = test::TestRequest::post()
        .uri("/notifications")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "malformed_payload");
}

#[actix_rt::test]
async fn test_non_object_body_is_invalid() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(None, false))
            .service(routes::receive_notification),
    )
    .await;

    for payload in ["[1,2,3]", "not json"] {
        let req = test::TestRequest::post()
            .uri("/notifications")
            .set_payload(payload)
            .insert_header(("Content-Type", "application/json"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_payload");
    }
}

#[actix_rt::test]
async fn test_metrics_forbidden_without_token_or_opt_in() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(None, false))
            .service(routes::metrics_endpoint),
    )
    .await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
}

#[actix_rt::test]
async fn test_metrics_requires_bearer_token() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(Some(b"metrics-token".to_vec()), false))
            .service(routes::metrics_endpoint),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/metrics")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/metrics")
        .insert_header(("Authorization", "Bearer metrics-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_public_metrics_opt_in() {
    let app = test::init_service(
        App::new()
            .app_data(make_state(None, true))
            .service(routes::metrics_endpoint),
    )
    .await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}
