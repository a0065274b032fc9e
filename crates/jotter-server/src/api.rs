//! JSON API handlers under `/api/notes`.

use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jotter_core::{Error, Note, NoteStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct CreateNoteRequest {
    text: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

/// An error rendered as `{"error": ...}` with a matching status code.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err {
            Error::MissingText | Error::TextTooLong { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Database(ref msg) => {
                log::error!("Store failure: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid JSON: {}", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// GET /api/notes
pub async fn list_notes<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.service.list_notes().await?))
}

// POST /api/notes
pub async fn create_note<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(body) = payload?;
    let text = body.text.ok_or(Error::MissingText)?;

    let note = state.service.add_note(text).await?;
    log::info!("Created note {}", note.id);
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /api/notes/:id
pub async fn get_note<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    match state.service.get_note(id).await? {
        Some(note) => Ok(Json(note)),
        None => Err(Error::NotFound(id).into()),
    }
}

// DELETE /api/notes/:id
pub async fn delete_note<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.service.remove_note(id).await?;
    log::info!("Deleted note {}", id);
    Ok(Json(MessageResponse {
        message: "Note deleted",
    }))
}
