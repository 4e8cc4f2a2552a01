#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bookmarks::bookmarks::BookmarkStore;
use bookmarks::db::Database;
use bookmarks::handler::AppState;
use bookmarks::model::{Bookmark, NewBookmark};

/// Builds the application router over a fresh in-memory store. The store is
/// returned too so tests can seed or inspect it directly.
pub async fn build_test_app() -> (Router, Arc<Database>) {
    let db = Arc::new(Database::in_memory().await.expect("in-memory store"));
    let app = bookmarks::router(AppState { db: db.clone() });
    (app, db)
}

/// Inserts `Test 1`..`Test n` straight into the store, bypassing validation.
pub async fn seed(db: &Database, n: i32) -> Vec<Bookmark> {
    let store = BookmarkStore::new(db.connection());
    let mut created = Vec::new();
    for i in 1..=n {
        let bookmark = store
            .insert(NewBookmark {
                url: format!("test url {i}"),
                title: format!("Test {i}"),
                rating: i.clamp(1, 5),
                description: "junk content".to_string(),
            })
            .await
            .expect("seed insert");
        created.push(bookmark);
    }
    created
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, method, uri, body.to_string()).await
}

pub async fn send_raw(app: Router, method: Method, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
