//! Flatwiki - a minimal personal wiki
//!
//! Pages are flat `<title>.txt` files under a pages directory, served over
//! HTTP through HTML templates loaded once at startup.

pub mod app;
pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use app::{build_state, create_router};
pub use components::{Renderer, TemplateContext};
pub use config::Config;
pub use errors::WikiError;
pub use services::{match_path, PageStore, Title};
pub use types::{Action, AppState, Page};
