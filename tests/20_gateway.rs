mod common;

use admin_panel::api::{ApiEnvelope, GatewayError};
use admin_panel::auth::{self, AuthError, LoginRequest};
use admin_panel::models::{ProductDraft, ProductQuery};
use admin_panel::services::{ProductError, ProductService};
use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{MockUpstream, ADMIN_PASSWORD, ADMIN_TOKEN, ADMIN_USER};

fn echoed(envelope: ApiEnvelope<Value>) -> Value {
    envelope.data.unwrap_or_default()["authorization"].clone()
}

#[tokio::test]
async fn authorization_header_carries_stored_token() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (_, tokens) = common::memory_tokens();
    tokens.set_token(ADMIN_TOKEN);
    let client = common::client_for(&upstream, tokens);

    let body: ApiEnvelope<Value> = client.get("/echo").await?;
    assert_eq!(echoed(body), json!(ADMIN_TOKEN));

    let body: ApiEnvelope<Value> = client.post("/echo", &json!({})).await?;
    assert_eq!(echoed(body), json!(ADMIN_TOKEN));

    let body: ApiEnvelope<Value> = client.put("/echo", &json!({})).await?;
    assert_eq!(echoed(body), json!(ADMIN_TOKEN));

    let body: ApiEnvelope<Value> = client.patch("/echo", &json!({})).await?;
    assert_eq!(echoed(body), json!(ADMIN_TOKEN));

    let body: ApiEnvelope<Value> = client.delete("/echo").await?;
    assert_eq!(echoed(body), json!(ADMIN_TOKEN));

    Ok(())
}

#[tokio::test]
async fn no_session_means_no_authorization_header() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (_, tokens) = common::memory_tokens();
    let client = common::client_for(&upstream, tokens);

    let body: ApiEnvelope<Value> = client.get("/echo").await?;
    assert_eq!(echoed(body), Value::Null);

    Ok(())
}

#[tokio::test]
async fn post_no_token_never_sends_authorization() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (_, tokens) = common::memory_tokens();
    tokens.set_token(ADMIN_TOKEN);
    let client = common::client_for(&upstream, tokens);

    let body: Option<ApiEnvelope<Value>> = client.post_no_token("/echo", &json!({})).await;
    let body = body.expect("echo should answer");
    assert_eq!(echoed(body), Value::Null);

    Ok(())
}

#[tokio::test]
async fn post_no_token_swallows_failures() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (_, tokens) = common::memory_tokens();
    let client = common::client_for(&upstream, tokens);

    let body: Option<Value> = client.post_no_token("/fail", &json!({})).await;
    assert!(body.is_none());

    Ok(())
}

#[tokio::test]
async fn error_status_is_propagated() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (_, tokens) = common::memory_tokens();
    let client = common::client_for(&upstream, tokens);

    let err = client.get::<Value>("/fail").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    match err {
        GatewayError::Status { body, .. } => assert_eq!(body, "boom"),
        other => panic!("expected status error, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() -> Result<()> {
    let port = portpicker::pick_unused_port().expect("free port");
    let (_, tokens) = common::memory_tokens();
    let client = admin_panel::api::ApiClient::new(
        reqwest::Client::new(),
        format!("http://127.0.0.1:{}", port),
        tokens,
    );

    let err = client.get::<Value>("/echo").await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }), "got {err:?}");
    assert_eq!(err.status(), None);

    Ok(())
}

#[tokio::test]
async fn login_stores_encrypted_token() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (store, tokens) = common::memory_tokens();
    let client = common::client_for(&upstream, tokens);

    let request = LoginRequest {
        user_name: ADMIN_USER.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    };
    let message = auth::login(&client, &request).await?;
    assert_eq!(message, "Login successful");

    let cookie = store.cookie("admin_token").expect("session cookie stored");
    assert_ne!(cookie.value, ADMIN_TOKEN);
    assert_eq!(client.tokens().get_token().as_deref(), Some(ADMIN_TOKEN));

    Ok(())
}

#[tokio::test]
async fn rejected_login_leaves_session_empty() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (store, tokens) = common::memory_tokens();
    let client = common::client_for(&upstream, tokens);

    let request = LoginRequest {
        user_name: ADMIN_USER.to_string(),
        password: "wrong".to_string(),
    };
    let err = auth::login(&client, &request).await.unwrap_err();
    assert!(matches!(err, AuthError::Rejected(ref msg) if msg == "Invalid credentials"));
    assert!(store.is_empty());

    Ok(())
}

#[tokio::test]
async fn logout_clears_session() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (store, tokens) = common::memory_tokens();
    tokens.set_token(ADMIN_TOKEN);
    let client = common::client_for(&upstream, tokens);

    let redirect = auth::logout(&client);
    assert_eq!(redirect.location, "/auth");
    assert!(store.is_empty());

    let body: ApiEnvelope<Value> = client.get("/echo").await?;
    assert_eq!(echoed(body), Value::Null);

    Ok(())
}

#[tokio::test]
async fn product_service_round_trip() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (_, tokens) = common::memory_tokens();
    tokens.set_token(ADMIN_TOKEN);
    let service = ProductService::new(common::client_for(&upstream, tokens));

    let page = service.list(&ProductQuery::default()).await?;
    assert_eq!(page.total, 2);
    assert_eq!(page.products[0].effective_price(), 180.0);

    let product = service.get("p2").await?;
    assert_eq!(product.name, "Desk Lamp");

    let missing = service.get("p9").await.unwrap_err();
    assert!(matches!(missing, ProductError::NotFound(ref id) if id == "p9"));

    let message = service
        .add(ProductDraft {
            name: "Chair".to_string(),
            price: 80.0,
            discount: 25.0,
            ..Default::default()
        })
        .await?;
    assert_eq!(message, "Product submitted successfully!");

    let message = service.delete("p1").await?;
    assert_eq!(message, "Product deleted successfully");

    Ok(())
}

#[tokio::test]
async fn invalid_draft_is_not_sent() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (_, tokens) = common::memory_tokens();
    tokens.set_token(ADMIN_TOKEN);
    let service = ProductService::new(common::client_for(&upstream, tokens));

    let err = service.add(ProductDraft::default()).await.unwrap_err();
    assert!(matches!(err, ProductError::Invalid(_)));

    Ok(())
}

#[tokio::test]
async fn multipart_upload_sets_form_content_type() -> Result<()> {
    let upstream = MockUpstream::spawn().await?;
    let (_, tokens) = common::memory_tokens();
    tokens.set_token(ADMIN_TOKEN);
    let service = ProductService::new(common::client_for(&upstream, tokens));

    let part = reqwest::multipart::Part::bytes(b"png bytes".to_vec()).file_name("a.png");
    let form = reqwest::multipart::Form::new().part("images", part);
    let data = service.upload("/products/upload", form).await?;

    let content_type = data["content_type"].as_str().unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data; boundary="), "{content_type}");

    Ok(())
}
