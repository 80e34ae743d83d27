use std::io;
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Custom error types for the wiki application
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("404 page not found")]
    NotFound,
    #[error("invalid title: {0}")]
    InvalidTitle(String),
    #[error("template error: {0}")]
    TemplateError(String),
    #[error("logger error: {0}")]
    Logger(String),
}

impl From<log::SetLoggerError> for WikiError {
    fn from(err: log::SetLoggerError) -> Self {
        WikiError::Logger(err.to_string())
    }
}

impl WikiError {
    /// HTTP status reported to the client for this error
    pub fn status(&self) -> StatusCode {
        match self {
            WikiError::NotFound => StatusCode::NOT_FOUND,
            WikiError::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            WikiError::Io(_) | WikiError::TemplateError(_) | WikiError::Logger(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
