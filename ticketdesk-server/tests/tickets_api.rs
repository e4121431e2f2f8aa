//! End-to-end checks of the ticket endpoints through the full router.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ticketdesk_server::db::{MemoryStore, SqliteStore, TicketStore};
use ticketdesk_server::http::{build_router, cors_layer};

fn router(store: Arc<dyn TicketStore>) -> Router {
    build_router(store, cors_layer(&[]).unwrap())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn ticket(name: &str, status: Option<&str>) -> Value {
    let mut body = json!({
        "ticket_name": name,
        "title": format!("{name} title"),
        "description": format!("{name} description"),
        "customer_name": "Grace",
        "customer_email": "grace@example.com",
    });
    if let Some(status) = status {
        body["status"] = json!(status);
    }
    body
}

fn ids(tickets: &Value) -> HashSet<i64> {
    tickets
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["ticket_id"].as_i64().unwrap())
        .collect()
}

async fn sqlite_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::connect("sqlite::memory:").await.unwrap())
}

#[tokio::test]
async fn create_assigns_fresh_positive_ids() {
    let app = router(Arc::new(MemoryStore::new()));

    let mut seen = HashSet::new();
    for name in ["a", "b", "c"] {
        let (status, body) = send(&app, "POST", "/tickets/", Some(ticket(name, None))).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["ticket_id"].as_i64().unwrap();
        assert!(id > 0);
        assert!(seen.insert(id), "id {id} returned twice");
    }
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = router(Arc::new(MemoryStore::new()));
    let mut body = ticket("a", None);
    body["ticket_id"] = json!(500);

    let (status, created) = send(&app, "POST", "/tickets/", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["ticket_id"], 1);
}

#[tokio::test]
async fn create_accepts_integer_like_client_id() {
    let app = router(Arc::new(MemoryStore::new()));

    let mut expected = 1;
    for client_id in [json!("5"), json!(5.0)] {
        let mut body = ticket("a", None);
        body["ticket_id"] = client_id.clone();

        let (status, created) = send(&app, "POST", "/tickets/", Some(body)).await;
        assert_eq!(status, StatusCode::OK, "ticket_id {client_id}");
        assert_eq!(created["ticket_id"], expected);
        expected += 1;
    }
}

#[tokio::test]
async fn create_missing_field_is_rejected_and_not_persisted() {
    let store = sqlite_store().await;
    let app = router(store.clone());

    let mut body = ticket("a", None);
    body.as_object_mut().unwrap().remove("customer_email");

    let (status, error) = send(&app, "POST", "/tickets/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["detail"][0]["field"], "customer_email");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn malformed_json_is_422() {
    let app = router(Arc::new(MemoryStore::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/tickets/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_all_and_pending() {
    let app = router(sqlite_store().await);

    let mut pending_ids = HashSet::new();
    let mut all_ids = HashSet::new();
    for (name, status) in [
        ("a", Some("pending")),
        ("b", Some("resolved")),
        ("c", None),
        ("d", Some("pending")),
    ] {
        let (_, created) = send(&app, "POST", "/tickets/", Some(ticket(name, status))).await;
        let id = created["ticket_id"].as_i64().unwrap();
        all_ids.insert(id);
        if status == Some("pending") {
            pending_ids.insert(id);
        }
    }

    let (status, all) = send(&app, "GET", "/tickets/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&all), all_ids);

    let (_, explicit_false) = send(&app, "GET", "/tickets/?pending=false", None).await;
    assert_eq!(ids(&explicit_false), all_ids);

    let (_, pending) = send(&app, "GET", "/tickets/?pending=true", None).await;
    assert_eq!(ids(&pending), pending_ids);
}

#[tokio::test]
async fn list_empty_is_empty_array() {
    let app = router(sqlite_store().await);
    let (status, body) = send(&app, "GET", "/tickets/?pending=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_rejects_bad_pending_flag() {
    let app = router(Arc::new(MemoryStore::new()));
    let (status, body) = send(&app, "GET", "/tickets/?pending=maybe", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "pending");
}

#[tokio::test]
async fn list_rejects_padded_pending_flag() {
    let app = router(Arc::new(MemoryStore::new()));
    let (status, body) = send(&app, "GET", "/tickets/?pending=%20true", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["kind"], "invalid_query");
}

#[tokio::test]
async fn undecodable_path_id_is_invalid_path() {
    let app = router(Arc::new(MemoryStore::new()));
    let (status, body) = send(&app, "DELETE", "/tickets/%FF", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "ticket_id");
    assert_eq!(body["detail"][0]["kind"], "invalid_path");
}

#[tokio::test]
async fn collection_without_trailing_slash() {
    let app = router(Arc::new(MemoryStore::new()));
    let (status, _) = send(&app, "POST", "/tickets", Some(ticket("a", None))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, all) = send(&app, "GET", "/tickets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let app = router(sqlite_store().await);
    let (_, created) = send(&app, "POST", "/tickets/", Some(ticket("old", Some("pending")))).await;
    let id = created["ticket_id"].as_i64().unwrap();

    let mut replacement = ticket("new", None);
    replacement["priority"] = json!("urgent");
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/tickets/{id}"),
        Some(replacement.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ticket_id"], id);
    assert_eq!(updated["ticket_name"], "new");

    let (_, all) = send(&app, "GET", "/tickets/", None).await;
    let row = &all.as_array().unwrap()[0];
    assert_eq!(row["ticket_name"], "new");
    assert_eq!(row["title"], "new title");
    assert_eq!(row["priority"], "urgent");
    // Full replace: omitted status is now null, not the old "pending".
    assert!(row["status"].is_null());
}

#[tokio::test]
async fn update_of_missing_id_succeeds_without_creating_rows() {
    let store = sqlite_store().await;
    let app = router(store.clone());
    send(&app, "POST", "/tickets/", Some(ticket("a", None))).await;

    let (status, echoed) = send(&app, "PUT", "/tickets/9999", Some(ticket("ghost", None))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed["ticket_id"], 9999);
    assert_eq!(echoed["ticket_name"], "ghost");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn update_validates_body_and_path() {
    let app = router(Arc::new(MemoryStore::new()));

    let (status, _) = send(&app, "PUT", "/tickets/1", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, "PUT", "/tickets/abc", Some(ticket("a", None))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "ticket_id");
}

#[tokio::test]
async fn delete_removes_and_repeats_confirmation() {
    let app = router(sqlite_store().await);
    let (_, keep) = send(&app, "POST", "/tickets/", Some(ticket("keep", None))).await;
    let (_, gone) = send(&app, "POST", "/tickets/", Some(ticket("gone", None))).await;
    let gone_id = gone["ticket_id"].as_i64().unwrap();

    for _ in 0..2 {
        let (status, body) = send(&app, "DELETE", &format!("/tickets/{gone_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Ticket deleted"}));
    }

    let (_, all) = send(&app, "GET", "/tickets/", None).await;
    assert_eq!(
        ids(&all),
        HashSet::from([keep["ticket_id"].as_i64().unwrap()])
    );
}

#[tokio::test]
async fn round_trip_preserves_fields_and_nulls() {
    let app = router(sqlite_store().await);
    let submitted = json!({
        "ticket_name": "TCK-ü",
        "title": "Ünïcode title",
        "description": "line one\nline two",
        "customer_name": "Hélène",
        "customer_email": "not-an-email",
    });

    let (_, created) = send(&app, "POST", "/tickets/", Some(submitted.clone())).await;
    let (_, all) = send(&app, "GET", "/tickets/", None).await;
    let row = &all.as_array().unwrap()[0];

    assert_eq!(row["ticket_id"], created["ticket_id"]);
    for (key, value) in submitted.as_object().unwrap() {
        assert_eq!(&row[key], value, "field {key}");
    }
    assert!(row.as_object().unwrap().contains_key("status"));
    assert!(row["status"].is_null());
    assert!(row["priority"].is_null());
}

#[tokio::test]
async fn database_failure_surfaces_as_5xx() {
    let store = sqlite_store().await;
    sqlx::query("DROP TABLE customers")
        .execute(store.pool())
        .await
        .unwrap();
    let app = router(store);

    let (status, body) = send(&app, "GET", "/tickets/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    assert!(body["message"].as_str().unwrap().contains("customers"));
}

#[tokio::test]
async fn health_names_backend() {
    let app = router(sqlite_store().await);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "sqlite");
}
