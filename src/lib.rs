pub mod db;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod pipeline;
pub mod rejections;
pub mod services;

use axum::{extract::DefaultBodyLimit, Router};

use crate::services::GenerationService;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    /// `None` when no model API key is configured; only generation is affected.
    pub generation: Option<GenerationService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::generate::routes())
        .merge(handlers::quiz::routes())
        .layer(DefaultBodyLimit::max(names::MAX_REQUEST_BYTES))
        .with_state(state)
}
