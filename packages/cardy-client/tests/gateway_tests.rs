//! Gateway tests against a local axum server.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use cardy_client::{ApiError, BankApi, CardyClient, UserContext};
use serde_json::{json, Value};

async fn health(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let json_content = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        == Some("application/json");
    if !json_content {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "missing content type"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"status": "healthy", "llm_available": true, "service": "Bank Assistant API"})),
    )
}

async fn account_details(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mobile = body["mobile_number"].as_str().unwrap_or_default();
    if mobile == "9876543210" {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "holder_name": "Asha Rao",
                    "account_no": 1234567890123u64,
                    "branch_name": "City Center",
                    "account_type": "Savings",
                    "loan_status": "No Active Loans",
                    "loan_end_date": "N/A"
                }
            })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": format!("No account found for mobile number {mobile}")
            })),
        )
    }
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "mobile_number": body["mobile_number"],
            "holder_name": "Asha Rao",
            "account_no": "1234567890123"
        }
    }))
}

async fn chat(Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default();
    let who = body["user_context"]["account_data"]["holder_name"]
        .as_str()
        .unwrap_or("guest");
    Json(json!({"success": true, "response": format!("{who} asked: {query}")}))
}

async fn loans() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn branches() -> &'static str {
    "not json"
}

async fn contact() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"success": true, "data": {}}))
}

async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/account/details", post(account_details))
        .route("/api/auth/login", post(login))
        .route("/api/chat/query", post(chat))
        .route("/api/info/loans", get(loans))
        .route("/api/info/branches", get(branches))
        .route("/api/info/contact", get(contact));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> CardyClient {
    CardyClient::new(format!("http://{addr}"))
}

#[tokio::test]
async fn health_check_sends_json_content_type() {
    let client = client_for(spawn_backend().await);

    let report = client.check_health().await.unwrap();

    assert!(report.is_healthy());
    assert_eq!(report.llm_available, Some(true));
}

#[tokio::test]
async fn account_details_decodes_success_envelope() {
    let client = client_for(spawn_backend().await);

    let envelope = client.fetch_account_details("9876543210").await.unwrap();

    assert!(envelope.success);
    let record = envelope.into_data().unwrap();
    assert_eq!(record.holder_name.as_deref(), Some("Asha Rao"));
    assert_eq!(record.account_no.as_deref(), Some("1234567890123"));
}

#[tokio::test]
async fn non_2xx_uses_server_error_field() {
    let client = client_for(spawn_backend().await);

    let err = client.fetch_account_details("1111111111").await.unwrap_err();

    assert_eq!(err.status(), 404);
    assert_eq!(err.message(), "No account found for mobile number 1111111111");
    assert_eq!(err.data().unwrap()["success"], json!(false));
}

#[tokio::test]
async fn non_2xx_without_json_body_gets_generic_message() {
    let client = client_for(spawn_backend().await);

    let err = client.get_loan_info().await.unwrap_err();

    assert_eq!(err.status(), 500);
    assert_eq!(err.message(), "Server error occurred");
    assert_eq!(err.data(), Some(&json!("boom")));
}

#[tokio::test]
async fn login_returns_profile() {
    let client = client_for(spawn_backend().await);

    let profile = client
        .login_with_phone("9876543210")
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(profile.mobile_number.as_deref(), Some("9876543210"));
    assert_eq!(profile.account.holder_name.as_deref(), Some("Asha Rao"));
}

#[tokio::test]
async fn chat_forwards_user_context() {
    let client = client_for(spawn_backend().await);

    let anonymous = client.send_chat_query("hello", None).await.unwrap();
    assert_eq!(anonymous.response.as_deref(), Some("guest asked: hello"));

    let context = UserContext {
        mobile_number: "9876543210".into(),
        account_data: cardy_client::AccountRecord {
            holder_name: Some("Asha Rao".into()),
            ..Default::default()
        },
    };
    let personal = client.send_chat_query("hello", Some(&context)).await.unwrap();
    assert_eq!(personal.response.as_deref(), Some("Asha Rao asked: hello"));
}

#[tokio::test]
async fn malformed_success_body_is_invalid_response() {
    let client = client_for(spawn_backend().await);

    let err = client.get_branch_info().await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse { .. }));
    assert_eq!(err.status(), 0);
}

#[tokio::test]
async fn timeout_is_connection_failure() {
    let client = client_for(spawn_backend().await).with_timeout(Duration::from_millis(100));

    let err = client.get_contact_info().await.unwrap_err();

    assert!(matches!(err, ApiError::Connection { .. }));
    assert_eq!(err.status(), 0);
    assert_eq!(
        err.message(),
        "Unable to connect to server. Please check your connection."
    );
}

#[tokio::test]
async fn refused_connection_is_connection_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).check_health().await.unwrap_err();

    assert_eq!(err.status(), 0);
    assert!(err.is_transport());
}

#[tokio::test]
async fn unbuildable_request_is_request_failure() {
    let client = CardyClient::new("not a url");

    let err = client.check_health().await.unwrap_err();

    assert!(matches!(err, ApiError::Request { .. }));
    assert_eq!(err.status(), -1);
}
