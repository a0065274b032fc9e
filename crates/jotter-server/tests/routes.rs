use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use jotter_core::{MemoryStore, NoteService};
use jotter_server::router;
use jotter_sqlite::SqliteStore;
use serde_json::{json, Value};
use tower::ServiceExt;

fn memory_app() -> Router {
    router(NoteService::new(MemoryStore::new()))
}

fn sqlite_app() -> Router {
    router(NoteService::new(SqliteStore::open_in_memory().unwrap()))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn api_notes(app: &Router) -> Value {
    let (status, _, body) = send(app, get("/api/notes")).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_api_create_list_delete_flow() {
    for app in [memory_app(), sqlite_app()] {
        let (status, _, body) = send(&app, post_json("/api/notes", r#"{"text":"Buy milk"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"id": 1, "text": "Buy milk"})
        );

        assert_eq!(api_notes(&app).await, json!([{"id": 1, "text": "Buy milk"}]));

        let (status, _, body) = send(&app, delete("/api/notes/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"message": "Note deleted"})
        );

        assert_eq!(api_notes(&app).await, json!([]));
    }
}

#[tokio::test]
async fn test_api_create_without_text_is_rejected() {
    let app = memory_app();

    for body in [r#"{}"#, r#"{"text":""}"#, r#"{"text":null}"#] {
        let (status, _, resp) = send(&app, post_json("/api/notes", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(
            serde_json::from_str::<Value>(&resp).unwrap(),
            json!({"error": "Missing text"})
        );
    }

    assert_eq!(api_notes(&app).await, json!([]));
}

#[tokio::test]
async fn test_api_create_with_malformed_json() {
    let app = memory_app();

    let (status, _, body) = send(&app, post_json("/api/notes", "not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn test_api_ids_increase_across_deletes() {
    let app = sqlite_app();

    for text in ["a", "b", "c"] {
        send(&app, post_json("/api/notes", &json!({ "text": text }).to_string())).await;
    }
    send(&app, delete("/api/notes/3")).await;

    let (_, _, body) = send(&app, post_json("/api/notes", r#"{"text":"d"}"#)).await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["id"], json!(4));
    assert_eq!(
        api_notes(&app).await,
        json!([{"id": 1, "text": "a"}, {"id": 2, "text": "b"}, {"id": 4, "text": "d"}])
    );
}

#[tokio::test]
async fn test_api_delete_missing_is_not_found() {
    for app in [memory_app(), sqlite_app()] {
        send(&app, post_json("/api/notes", r#"{"text":"keep"}"#)).await;

        let (status, _, body) = send(&app, delete("/api/notes/42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"error": "Note not found"})
        );
        assert_eq!(api_notes(&app).await, json!([{"id": 1, "text": "keep"}]));
    }
}

#[tokio::test]
async fn test_api_get_single_note() {
    let app = memory_app();
    send(&app, post_json("/api/notes", r#"{"text":"hello"}"#)).await;

    let (status, _, body) = send(&app, get("/api/notes/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({"id": 1, "text": "hello"})
    );

    let (status, _, _) = send(&app, get("/api/notes/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_rejects_overlong_text_on_sqlite() {
    let app = sqlite_app();
    let long = "x".repeat(201);

    let (status, _, body) = send(&app, post_json("/api/notes", &json!({ "text": long }).to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({"error": "Text exceeds 200 characters"})
    );
    assert_eq!(api_notes(&app).await, json!([]));
}

#[tokio::test]
async fn test_web_index_renders_notes() {
    let app = memory_app();
    send(&app, post_json("/api/notes", r#"{"text":"First note!"}"#)).await;

    let (status, _, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("First note!"));
    assert!(body.contains("href=\"/delete/1\""));
}

#[tokio::test]
async fn test_web_add_redirects_and_creates() {
    let app = memory_app();

    let (status, location, _) = send(&app, post_form("/add", "note=Flask+is+fun.")).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/"));

    let (status, _, _) = send(&app, post_form("/add", "noteText=War%20Eagle%21")).await;
    assert_eq!(status, StatusCode::FOUND);

    assert_eq!(
        api_notes(&app).await,
        json!([{"id": 1, "text": "Flask is fun."}, {"id": 2, "text": "War Eagle!"}])
    );
}

#[tokio::test]
async fn test_web_add_ignores_bad_input() {
    let app = sqlite_app();
    let long_form = format!("note={}", "x".repeat(201));

    for body in ["", "note=", "noteText=", long_form.as_str()] {
        let (status, location, _) = send(&app, post_form("/add", body)).await;
        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(location.as_deref(), Some("/"));
    }

    assert_eq!(api_notes(&app).await, json!([]));
}

#[tokio::test]
async fn test_web_delete_redirects() {
    let app = memory_app();
    send(&app, post_form("/add", "note=one")).await;
    send(&app, post_form("/add", "note=two")).await;

    let (status, location, _) = send(&app, get("/delete/1")).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/"));

    let (status, location, _) = send(&app, get("/delete/99")).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/"));

    assert_eq!(api_notes(&app).await, json!([{"id": 2, "text": "two"}]));
}

#[tokio::test]
async fn test_api_accepts_whitespace_text() {
    let app = memory_app();

    let (status, _, body) = send(&app, post_json("/api/notes", r#"{"text":"   "}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({"id": 1, "text": "   "})
    );
    assert_eq!(api_notes(&app).await, json!([{"id": 1, "text": "   "}]));
}

#[tokio::test]
async fn test_web_add_without_form_content_type_redirects() {
    let app = memory_app();
    let req = Request::builder()
        .method("POST")
        .uri("/add")
        .body(Body::from("note=hi"))
        .unwrap();

    let (status, location, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/"));
    assert_eq!(api_notes(&app).await, json!([]));
}
