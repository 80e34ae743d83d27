use std::fmt;
use std::sync::Arc;

use time::OffsetDateTime;

use crate::components::Renderer;
use crate::services::{PageStore, Title};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub renderer: Arc<Renderer>,
}

/// One wiki document
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
    /// Last write time of the backing file, `None` for pages not read from disk
    pub modified: Option<OffsetDateTime>,
}

impl Page {
    pub fn new(title: Title, body: Vec<u8>) -> Self {
        Self { title, body, modified: None }
    }

    /// Placeholder for a page that has not been written yet
    pub fn empty(title: Title) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body decoded as UTF-8, invalid sequences replaced
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Unit of routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Home,
    View,
    New,
    Edit,
    Save,
    Delete,
}

impl Action {
    /// Actions that render a template fragment
    pub const TEMPLATED: [Action; 4] = [Action::Home, Action::View, Action::Edit, Action::New];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Home => "home",
            Action::View => "view",
            Action::New => "new",
            Action::Edit => "edit",
            Action::Save => "save",
            Action::Delete => "delete",
        }
    }

    /// Action named by the first segment of a title-bearing path
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "view" => Some(Action::View),
            "edit" => Some(Action::Edit),
            "save" => Some(Action::Save),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
