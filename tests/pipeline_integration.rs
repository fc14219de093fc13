use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lunchmoney_api_client::rest::LunchMoneyClient;
use lunchmoney_api_client::rest::categories::{CreateCategoryRequest, UpdateCategoryRequest};
use lunchmoney_api_client::rest::transactions::TransactionFilters;
use lunchmoney_api_client::{CancelReason, ErrorKind, LunchMoneyError, RequestContext};

fn build_client(server: &MockServer) -> LunchMoneyClient {
    LunchMoneyClient::builder()
        .base_url(server.uri())
        .api_key("test-token")
        .build()
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "user_name": "User 1",
        "user_email": "user-1@lunchmoney.dev",
        "user_id": 18328,
        "account_id": 18221,
        "budget_name": "Test Account",
        "primary_currency": "usd",
        "api_key_label": "Side project dev key"
    })
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

#[tokio::test]
async fn test_sends_auth_and_user_agent_headers() {
    let server = MockServer::start().await;
    let user_agent = format!("lunchmoney-api-client/{}", env!("CARGO_PKG_VERSION"));

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("user-agent", user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let user = build_client(&server).get_user().await.unwrap();
    assert_eq!(user.user_id, 18328);
    assert_eq!(user.primary_currency.as_deref(), Some("usd"));
}

#[tokio::test]
async fn test_custom_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("user-agent", "budget-sync/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = LunchMoneyClient::builder()
        .base_url(server.uri())
        .api_key("test-token")
        .user_agent("budget-sync/2.0")
        .build();
    client.get_user().await.unwrap();
}

#[tokio::test]
async fn test_query_contains_only_set_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/transactions"))
        .and(query_param("tag_id", "0"))
        .and(query_param("start_date", "2023-01-01"))
        .and(query_param("debit_as_negative", "false"))
        .and(query_param_is_missing("limit"))
        .and(query_param_is_missing("end_date"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"transactions": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let filters = TransactionFilters {
        tag_id: Some(0),
        start_date: Some("2023-01-01".to_string()),
        debit_as_negative: Some(false),
        ..Default::default()
    };
    let transactions = build_client(&server)
        .get_transactions(Some(&filters))
        .await
        .unwrap();
    assert!(transactions.is_empty());
}

#[tokio::test]
async fn test_invalid_filter_is_rejected_before_sending() {
    let server = MockServer::start().await;

    let filters = TransactionFilters::between("2023-01-01", "tomorrow");
    let err = build_client(&server)
        .get_transactions(Some(&filters))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_error_status_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/categories/404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "Category not found"})),
        )
        .mount(&server)
        .await;

    let err = build_client(&server).get_category(404).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.to_string(), "404 Not Found: Category not found");
    assert!(err.api_error().unwrap().is_not_found());
}

#[tokio::test]
async fn test_unauthorized_message_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"name": "Error", "message": "Access token does not exist."})),
        )
        .mount(&server)
        .await;

    let err = build_client(&server).get_user().await.unwrap_err();
    let api_error = err.api_error().unwrap();
    assert!(api_error.is_unauthorized());
    assert_eq!(api_error.message.as_deref(), Some("Access token does not exist."));
}

#[tokio::test]
async fn test_error_status_without_message_is_bare_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/tags"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = build_client(&server).get_tags().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.to_string(), "500 Internal Server Error");
}

#[tokio::test]
async fn test_malformed_error_body_names_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/assets"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = build_client(&server).get_assets().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    let message = err.to_string();
    assert!(message.contains("502 Bad Gateway"), "{message}");
    assert!(message.contains("<html>Bad Gateway</html>"), "{message}");
}

#[tokio::test]
async fn test_error_in_successful_write_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/categories"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"name": "Groceries"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": ["A category with the same name already exists."]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = build_client(&server)
        .create_category(&CreateCategoryRequest::new("Groceries"))
        .await
        .unwrap_err();

    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.status.as_u16(), 200);
    assert_eq!(
        err.to_string(),
        "200 OK: A category with the same name already exists."
    );
}

#[tokio::test]
async fn test_non_object_write_response_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/categories/83"))
        .and(body_json(serde_json::json!({"description": "Food"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateCategoryRequest {
        description: Some("Food".to_string()),
        ..Default::default()
    };
    let updated = build_client(&server)
        .update_category(83, &request)
        .await
        .unwrap();
    assert!(updated);
}

#[tokio::test]
async fn test_error_field_in_successful_list_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/transactions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": "Invalid start_date"})),
        )
        .mount(&server)
        .await;

    let err = build_client(&server)
        .get_transactions(None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.to_string(), "200 OK: Invalid start_date");
}

#[tokio::test]
async fn test_missing_api_key_sends_nothing() {
    let server = MockServer::start().await;

    let client = LunchMoneyClient::builder().base_url(server.uri()).build();
    let err = client.get_user().await.unwrap_err();

    assert!(matches!(err, LunchMoneyError::MissingCredentials));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_malformed_base_url() {
    let client = LunchMoneyClient::builder()
        .base_url("::not a url::")
        .api_key("test-token")
        .build();

    let err = client.get_categories().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn test_deadline_aborts_slow_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_json())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let ctx = RequestContext::background().with_timeout(Duration::from_millis(100));
    let client = build_client(&server).with_context(ctx);

    let started = Instant::now();
    let err = client.get_user().await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(matches!(
        err,
        LunchMoneyError::Cancelled(CancelReason::DeadlineExceeded)
    ));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/plaid_accounts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"plaid_accounts": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (ctx, handle) = RequestContext::background().with_cancel();
    let client = build_client(&server).with_context(ctx);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    let err = client.get_plaid_accounts().await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(matches!(
        err,
        LunchMoneyError::Cancelled(CancelReason::Cancelled)
    ));
}

#[tokio::test]
async fn test_cancel_during_body_read() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 1000\r\n\r\n{\"cat",
            )
            .await
            .unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });

    let (ctx, handle) = RequestContext::background().with_cancel();
    let client = LunchMoneyClient::builder()
        .base_url(format!("http://{addr}"))
        .api_key("test-token")
        .context(ctx)
        .build();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.cancel();
    });

    let started = Instant::now();
    let err = client.get_categories().await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(matches!(
        err,
        LunchMoneyError::Cancelled(CancelReason::Cancelled)
    ));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let server = MockServer::start().await;

    let (ctx, handle) = RequestContext::background().with_cancel();
    handle.cancel();

    let client = build_client(&server).with_context(ctx);
    let err = client.get_tags().await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(request_count(&server).await, 0);
}
