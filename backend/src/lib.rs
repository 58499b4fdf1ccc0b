use std::path::PathBuf;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use history_core::user_key;
use serde::Serialize;
use serde_json::{Map, Value};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::error;

pub mod config;
pub mod store;

pub use store::{HistoryStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    store: HistoryStore,
    static_root: PathBuf,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(HistoryStore::default(), ".")
    }
}

impl AppState {
    pub fn new(store: HistoryStore, static_root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            static_root: static_root.into(),
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }
}

pub fn app(state: AppState) -> Router {
    let root = &state.static_root;
    Router::new()
        .route_service("/", ServeFile::new(root.join("index.html")))
        .route_service("/game.js", ServeFile::new(root.join("game.js")))
        .route_service("/history.js", ServeFile::new(root.join("history.js")))
        .route(
            "/submit-history",
            post(submit_history).layer(DefaultBodyLimit::disable()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct SubmitHistoryResponse {
    status: &'static str,
}

async fn submit_history(
    State(state): State<AppState>,
    Json(mut payload): Json<Map<String, Value>>,
) -> impl IntoResponse {
    // Both fields are optional; absent ones are treated as null.
    let user_hash = payload.remove("userHash").unwrap_or(Value::Null);
    let action_history = payload.remove("actionHistory").unwrap_or(Value::Null);

    let user = match user_key(&user_hash) {
        Ok(user) => user,
        Err(err) => {
            error!(%err, "rejected history submission");
            return (StatusCode::INTERNAL_SERVER_ERROR, "invalid userHash").into_response();
        }
    };

    if let Err(err) = state.store.add(user, action_history).await {
        error!(%err, "failed to persist history");
        return (StatusCode::INTERNAL_SERVER_ERROR, "history not saved").into_response();
    }

    (
        StatusCode::OK,
        Json(SubmitHistoryResponse { status: "success" }),
    )
        .into_response()
}
