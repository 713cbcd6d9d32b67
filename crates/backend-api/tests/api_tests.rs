use axum::{
    body::Body,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, LOCATION,
            ORIGIN,
        },
        HeaderMap, Method, Request, StatusCode,
    },
    response::IntoResponse,
    Router,
};
use hello_backend_api::{build_router, ApiError, AppState, ErrorResponse};
use hello_config::DatabaseConfig;
use hello_database::initialize_database;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

type TestResult<T = ()> = anyhow::Result<T>;
type Reply = (StatusCode, HeaderMap, Vec<u8>);

struct TestContext {
    _temp_dir: TempDir,
    pool: SqlitePool,
    state: AppState,
}

impl TestContext {
    async fn new() -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("backend_api.sqlite");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 5,
        };

        let pool = initialize_database(&config).await?;
        let state = AppState::new(pool.clone());

        Ok(Self {
            _temp_dir: temp_dir,
            pool,
            state,
        })
    }

    fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> TestResult<Reply> {
        let response = self.router().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await?.to_bytes().to_vec();
        Ok((status, headers, body))
    }

    async fn send_json(
        &self,
        method: Method,
        uri: &str,
        body: Value,
    ) -> TestResult<Reply> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?;
        self.send(request).await
    }

    async fn send_empty(
        &self,
        method: Method,
        uri: &str,
    ) -> TestResult<Reply> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())?;
        self.send(request).await
    }

    async fn post_message(&self, content: &str) -> TestResult<Value> {
        let (status, _, body) = self
            .send_json(Method::POST, "/messages", json!({ "content": content }))
            .await?;
        assert_eq!(status, StatusCode::CREATED);
        Ok(serde_json::from_slice(&body)?)
    }

    async fn message_count(&self) -> TestResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?)
    }
}

fn error_text(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body)
        .map(|response| response.error)
        .unwrap_or_default()
}

#[tokio::test]
async fn message_lifecycle_end_to_end() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, headers, body) = ctx
        .send_json(Method::POST, "/messages", json!({ "content": "Hello, world!" }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let created: Value = serde_json::from_slice(&body)?;
    let id = created["id"].as_str().expect("id should be a string").to_string();
    Uuid::parse_str(&id)?;
    assert_eq!(created, json!({ "id": id, "content": "Hello, world!" }));

    let location = headers
        .get(LOCATION)
        .expect("location header")
        .to_str()?
        .to_string();
    assert_eq!(location, format!("/messages/{id}"));

    let (status, _, body) = ctx.send_empty(Method::GET, &location).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, created);

    let (status, _, body) = ctx.send_empty(Method::DELETE, &location).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _, body) = ctx.send_empty(Method::GET, &location).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_text(&body), "Message not found");

    Ok(())
}

#[tokio::test]
async fn list_messages_returns_view_models() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, _, body) = ctx.send_empty(Method::GET, "/messages").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));

    let a = ctx.post_message("A").await?;
    let b = ctx.post_message("B").await?;

    let (status, _, body) = ctx.send_empty(Method::GET, "/messages").await?;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<Value> = serde_json::from_slice(&body)?;
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&a));
    assert!(listed.contains(&b));
    for item in &listed {
        let object = item.as_object().expect("object");
        assert_eq!(object.len(), 2, "only id and content are exposed");
    }

    Ok(())
}

#[tokio::test]
async fn edit_message_replaces_content() -> TestResult {
    let ctx = TestContext::new().await?;
    let created = ctx.post_message("Original").await?;
    let uri = format!("/messages/{}", created["id"].as_str().unwrap_or_default());

    let (status, _, body) = ctx
        .send_json(Method::PUT, &uri, json!({ "content": "Edited" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    let edited: Value = serde_json::from_slice(&body)?;
    assert_eq!(edited["id"], created["id"]);
    assert_eq!(edited["content"], "Edited");

    let (_, _, body) = ctx.send_empty(Method::GET, &uri).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, edited);

    let edited_on: Option<String> =
        sqlx::query_scalar("SELECT edited_on FROM messages WHERE content = 'Edited'")
            .fetch_one(&ctx.pool)
            .await?;
    assert!(edited_on.is_some());

    Ok(())
}

#[tokio::test]
async fn invalid_content_is_rejected() -> TestResult {
    let ctx = TestContext::new().await?;

    for payload in [
        json!({ "content": "" }),
        json!({ "content": "   " }),
        json!({ "content": "x".repeat(257) }),
        json!({}),
        json!({ "content": null }),
    ] {
        let (status, _, body) = ctx.send_json(Method::POST, "/messages", payload).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!error_text(&body).is_empty());
    }

    let (status, _, _) = ctx
        .send_json(Method::POST, "/messages", json!({ "content": "x".repeat(256) }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ctx.message_count().await?, 1);

    Ok(())
}

#[tokio::test]
async fn content_with_leading_nul_is_accepted() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, headers, body) = ctx
        .send_json(Method::POST, "/messages", json!({ "content": "\u{0}hi" }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let created: Value = serde_json::from_slice(&body)?;
    assert_eq!(created["content"], "\u{0}hi");

    let location = headers.get(LOCATION).expect("location header").to_str()?;
    let (status, _, body) = ctx.send_empty(Method::GET, location).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, created);

    Ok(())
}

#[tokio::test]
async fn writes_to_vanished_rows_answer_conflict() -> TestResult {
    let ctx = TestContext::new().await?;
    let created = ctx.post_message("Racing").await?;
    let external_id = Uuid::parse_str(created["id"].as_str().unwrap_or_default())?;

    let mut message = ctx
        .state
        .messages()
        .get_message(external_id)
        .await?
        .expect("message should exist");

    sqlx::query("DELETE FROM messages WHERE id = ?")
        .bind(message.id)
        .execute(&ctx.pool)
        .await?;

    message.content = "Too late".to_string();
    let edit_error = ctx
        .state
        .messages()
        .edit_message(Some(message.clone()))
        .await
        .expect_err("edit should conflict");
    let remove_error = ctx
        .state
        .messages()
        .remove_message(Some(message.clone()))
        .await
        .expect_err("removal should conflict");

    for error in [edit_error, remove_error] {
        let response = ApiError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = response.into_body().collect().await?.to_bytes();
        let text = error_text(&body);
        assert!(!text.is_empty());
        assert!(!text.contains(&message.id.to_string()));
    }

    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> TestResult {
    let ctx = TestContext::new().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/messages")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, _, body) = ctx.send(request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_text(&body).is_empty());
    assert_eq!(ctx.message_count().await?, 0);

    Ok(())
}

#[tokio::test]
async fn edit_with_invalid_content_leaves_message_unchanged() -> TestResult {
    let ctx = TestContext::new().await?;
    let created = ctx.post_message("Keep me").await?;
    let uri = format!("/messages/{}", created["id"].as_str().unwrap_or_default());

    let (status, _, _) = ctx
        .send_json(Method::PUT, &uri, json!({ "content": "" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, body) = ctx.send_empty(Method::GET, &uri).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, created);

    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> TestResult {
    let ctx = TestContext::new().await?;
    let unknown = format!("/messages/{}", Uuid::new_v4());

    let (status, _, _) = ctx.send_empty(Method::GET, &unknown).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = ctx
        .send_json(Method::PUT, &unknown, json!({ "content": "nobody home" }))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = ctx.send_empty(Method::DELETE, &unknown).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = ctx.send_empty(Method::GET, "/messages/not-a-uuid").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = ctx.send_empty(Method::GET, "/messages/1").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn health_check_reports_ok() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, _, body) = ctx.send_empty(Method::GET, "/health").await?;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_slice(&body)?;
    assert_eq!(health["status"], "ok");
    assert!(health["timestamp"].is_string());

    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_message_paths() -> TestResult {
    let ctx = TestContext::new().await?;

    let (status, _, body) = ctx.send_empty(Method::GET, "/api-docs/openapi.json").await?;
    assert_eq!(status, StatusCode::OK);

    let document: Value = serde_json::from_slice(&body)?;
    assert!(document["paths"]["/messages"].is_object());
    assert!(document["paths"]["/messages/{id}"]["put"].is_object());
    assert!(document["components"]["schemas"]["MessageViewModel"].is_object());

    Ok(())
}

#[tokio::test]
async fn cors_preflight_allows_message_methods() -> TestResult {
    let ctx = TestContext::new().await?;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/messages")
        .header(ORIGIN, "http://localhost:4200")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())?;
    let (status, headers, _) = ctx.send(request).await?;

    assert!(status.is_success());
    assert_eq!(
        headers
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );

    Ok(())
}
