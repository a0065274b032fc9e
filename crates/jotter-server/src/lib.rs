//! Jotter HTTP server - HTML pages and a JSON API over a note store.
//!
//! Routes:
//! - `GET /` renders every note with an add form.
//! - `POST /add` and `GET /delete/:id` mutate and redirect back to `/`.
//! - `GET|POST /api/notes` and `GET|DELETE /api/notes/:id` speak JSON.

mod api;
mod render;
mod web;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use jotter_core::{NoteService, NoteStore};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use render::render_index;

/// Shared state handed to every handler.
pub struct AppState<S: NoteStore> {
    pub service: NoteService<S>,
}

/// Build the router for a note service.
pub fn router<S: NoteStore + 'static>(service: NoteService<S>) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/", get(web::index::<S>))
        .route("/add", axum::routing::post(web::add_note::<S>))
        .route("/delete/:id", get(web::delete_note::<S>))
        .route(
            "/api/notes",
            get(api::list_notes::<S>).post(api::create_note::<S>),
        )
        .route(
            "/api/notes/:id",
            get(api::get_note::<S>).delete(api::delete_note::<S>),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Serve the router on an already bound listener until `shutdown` resolves.
pub async fn serve<S, F>(
    listener: TcpListener,
    service: NoteService<S>,
    shutdown: F,
) -> std::io::Result<()>
where
    S: NoteStore + 'static,
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    log::info!("{} {} -> {}", method, path, response.status().as_u16());
    response
}
