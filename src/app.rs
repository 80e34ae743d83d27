//! Router construction.

use std::sync::Arc;

use axum::{routing::{get, post}, Router};

use crate::components::Renderer;
use crate::config::Config;
use crate::errors::WikiError;
use crate::handlers;
use crate::services::PageStore;
use crate::types::AppState;

/// Open the page store and load the templates named by `config`.
///
/// Fails if the pages directory cannot be created or any template is missing or malformed.
pub fn build_state(config: &Config) -> Result<AppState, WikiError> {
    let store = PageStore::open(config.pages_dir.clone())?;
    let renderer = Renderer::load(&config.templates_dir)?;
    Ok(AppState { store: Arc::new(store), renderer: Arc::new(renderer) })
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_home))
        .route("/view/:title", get(handlers::handle_view))
        .route("/new", get(handlers::handle_new_form).post(handlers::handle_create))
        .route("/edit/:title", get(handlers::handle_edit))
        .route("/save/:title", post(handlers::handle_save))
        .route("/delete/:title", get(handlers::handle_delete))
        .fallback(handlers::handle_not_found)
        .with_state(state)
}
