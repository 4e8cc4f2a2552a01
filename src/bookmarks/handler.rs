//! HTTP handlers for the bookmark resource

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::{BookmarkStore, sanitize_bookmark, validate_create, validate_update};
use crate::error::{AppError, AppResult, ValidationError};
use crate::handler::AppState;
use crate::model::{Bookmark, BookmarkPayload};
use serde_json::Value as JsonValue;

fn bookmark_id(id: Result<Path<i32>, PathRejection>) -> AppResult<i32> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::error!("Invalid bookmark id: {}", rejection.body_text());
            Err(AppError::NotFound)
        }
    }
}

fn malformed(message: String) -> AppError {
    tracing::error!("Rejected bookmark payload: {}", message);
    AppError::MalformedBody(message)
}

/// Only a JSON object is a payload; arrays would otherwise fill the fields
/// by position.
fn payload(body: Result<Json<JsonValue>, JsonRejection>) -> AppResult<BookmarkPayload> {
    let Json(value) = body.map_err(|rejection| malformed(rejection.body_text()))?;
    if !value.is_object() {
        return Err(malformed("Request body must be a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

fn invalid(e: ValidationError) -> AppError {
    tracing::error!("{}", e);
    AppError::Validation(e)
}

fn not_found(id: i32) -> AppError {
    tracing::error!("Bookmark with id {} not found", id);
    AppError::NotFound
}

pub async fn list_bookmarks(State(state): State<AppState>) -> AppResult<Json<Vec<Bookmark>>> {
    let store = BookmarkStore::new(state.db.connection());
    let bookmarks = store.list_all().await?;

    Ok(Json(bookmarks.into_iter().map(sanitize_bookmark).collect()))
}

pub async fn get_bookmark(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Bookmark>> {
    let id = bookmark_id(id)?;
    let store = BookmarkStore::new(state.db.connection());

    match store.get_by_id(id).await? {
        Some(bookmark) => Ok(Json(sanitize_bookmark(bookmark))),
        None => Err(not_found(id)),
    }
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> AppResult<Response> {
    let input = validate_create(payload(body)?).map_err(invalid)?;
    let store = BookmarkStore::new(state.db.connection());

    let bookmark = store.insert(input).await?;
    tracing::info!("Bookmark with id {} created", bookmark.id);

    let location = format!("/bookmarks/{}", bookmark.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(sanitize_bookmark(bookmark)),
    )
        .into_response())
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = bookmark_id(id)?;
    let store = BookmarkStore::new(state.db.connection());

    if store.delete_by_id(id).await? == 0 {
        return Err(not_found(id));
    }

    tracing::info!("Bookmark with id {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> AppResult<StatusCode> {
    let id = bookmark_id(id)?;
    let patch = validate_update(payload(body)?).map_err(invalid)?;
    let store = BookmarkStore::new(state.db.connection());

    if store.update_by_id(id, patch).await? == 0 {
        return Err(not_found(id));
    }

    tracing::info!("Bookmark with id {} updated", id);
    Ok(StatusCode::NO_CONTENT)
}
