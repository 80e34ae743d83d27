use axum::{
    async_trait,
    extract::{Form, FromRequestParts, State},
    http::{header, request::Parts, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::WikiError;
use crate::services::{match_path, Title};
use crate::types::{AppState, Page};

/// Title taken from a `/{view,edit,save,delete}/<title>` path.
///
/// Rejects with `NotFound` before the handler runs when the path does not match.
pub struct ValidTitle(pub Title);

#[async_trait]
impl<S> FromRequestParts<S> for ValidTitle
where
    S: Send + Sync,
{
    type Rejection = WikiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match match_path(parts.uri.path()) {
            Some((_, title)) => Ok(ValidTitle(title)),
            None => {
                log::warn!("Rejected path: '{}'", parts.uri.path());
                Err(WikiError::NotFound)
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewPageForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// `302 Found` to `location`
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Handle `GET /`
pub async fn handle_home(State(state): State<AppState>) -> Result<Html<String>, WikiError> {
    log::info!("Home request received");

    let titles = state.store.list_titles()?;
    let pages: Vec<Option<Page>> = titles
        .iter()
        .map(|raw| {
            let page = Title::parse(raw).and_then(|title| state.store.load(&title));
            if let Err(e) = &page {
                log::debug!("Skipping '{}' in listing: {}", raw, e);
            }
            page.ok()
        })
        .collect();

    let html = state.renderer.render_home(&pages)?;
    let shown = pages.iter().flatten().count();
    log::info!("Serving listing of {} pages ({} skipped)", shown, titles.len() - shown);
    Ok(Html(html))
}

/// Handle `GET /view/<title>`
pub async fn handle_view(
    ValidTitle(title): ValidTitle,
    State(state): State<AppState>,
) -> Result<Response, WikiError> {
    log::info!("View request received: '{}'", title);

    match state.store.load(&title) {
        Ok(page) => Ok(Html(state.renderer.render_view(&page)?).into_response()),
        Err(_) => {
            log::info!("Page '{}' does not exist, redirecting to editor", title);
            Ok(found(format!("/edit/{}", title)))
        }
    }
}

/// Handle `GET /edit/<title>`
pub async fn handle_edit(
    ValidTitle(title): ValidTitle,
    State(state): State<AppState>,
) -> Result<Html<String>, WikiError> {
    log::info!("Edit request received: '{}'", title);

    let page = state.store.load(&title).unwrap_or_else(|_| Page::empty(title));
    Ok(Html(state.renderer.render_edit(&page)?))
}

/// Handle `POST /save/<title>`
pub async fn handle_save(
    ValidTitle(title): ValidTitle,
    State(state): State<AppState>,
    form: Option<Form<SaveForm>>,
) -> Result<Response, WikiError> {
    log::info!("Save request received: '{}'", title);

    // A request without a form body saves an empty page
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let title = Title::from_form(title.as_str())?;
    let page = Page::new(title, form.body.into_bytes());
    state.store.save(&page)?;
    Ok(found(format!("/view/{}", page.title)))
}

/// Handle `GET /new`
pub async fn handle_new_form(State(state): State<AppState>) -> Result<Html<String>, WikiError> {
    log::info!("New page form requested");
    Ok(Html(state.renderer.render_new()?))
}

/// Handle `POST /new`
pub async fn handle_create(
    State(state): State<AppState>,
    form: Option<Form<NewPageForm>>,
) -> Result<Response, WikiError> {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    log::info!("Create request received: '{}'", form.title);

    let title = Title::from_form(&form.title).inspect_err(|e| {
        log::warn!("Rejected new page title {:?}: {}", form.title, e);
    })?;
    let page = Page::new(title, form.body.into_bytes());
    state.store.save(&page)?;
    Ok(found(format!("/view/{}", page.title)))
}

/// Handle `GET /delete/<title>`
pub async fn handle_delete(
    ValidTitle(title): ValidTitle,
    State(state): State<AppState>,
) -> Result<Response, WikiError> {
    log::info!("Delete request received: '{}'", title);

    state.store.delete(&title)?;
    Ok(found("/".to_string()))
}

/// Any path without a route
pub async fn handle_not_found(uri: axum::http::Uri) -> WikiError {
    log::warn!("Path not found: '{}'", uri.path());
    WikiError::NotFound
}
