//! Browser-facing handlers. Mutations always redirect back to the index;
//! bad input and unknown ids are ignored.

use crate::render::render_index;
use crate::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use jotter_core::{Error, NoteStore};
use serde::Deserialize;
use std::sync::Arc;

/// The add form. Older pages post the field as `noteText`.
#[derive(Deserialize)]
pub struct AddNoteForm {
    note: Option<String>,
    #[serde(rename = "noteText")]
    note_text: Option<String>,
}

fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

fn internal_error(err: Error) -> Response {
    log::error!("Store failure: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

// GET /
pub async fn index<S: NoteStore + 'static>(State(state): State<Arc<AppState<S>>>) -> Response {
    match state.service.list_notes().await {
        Ok(notes) => Html(render_index(&notes)).into_response(),
        Err(e) => internal_error(e),
    }
}

// POST /add
pub async fn add_note<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    form: Result<Form<AddNoteForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            log::debug!("Ignoring add: {}", rejection.body_text());
            return redirect_home();
        }
    };
    let Some(text) = form.note.filter(|t| !t.is_empty()).or(form.note_text) else {
        return redirect_home();
    };

    match state.service.add_note(text).await {
        Ok(note) => log::info!("Created note {}", note.id),
        Err(e) if e.is_client_error() => log::debug!("Ignoring add: {}", e),
        Err(e) => return internal_error(e),
    }
    redirect_home()
}

// GET /delete/:id
pub async fn delete_note<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Response {
    match state.service.delete_note(id).await {
        Ok(true) => log::info!("Deleted note {}", id),
        Ok(false) => log::debug!("Ignoring delete of missing note {}", id),
        Err(e) => return internal_error(e),
    }
    redirect_home()
}
