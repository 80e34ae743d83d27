//! Page identifiers.
//!
//! Every title that reaches the store goes through [`Title::parse`], whether it
//! came from a request path or from the creation form.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::WikiError;
use crate::types::Action;

/// Longest accepted title, in bytes.
pub const MAX_TITLE_LEN: usize = 128;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

static VALID_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(edit|save|view|delete)/([A-Za-z0-9_-]+)$").unwrap());

/// Validated page title. Safe to use as a file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, WikiError> {
        if raw.is_empty() {
            return Err(WikiError::InvalidTitle("title is empty".to_string()));
        }
        if raw.len() > MAX_TITLE_LEN {
            return Err(WikiError::InvalidTitle(format!(
                "title is longer than {MAX_TITLE_LEN} bytes"
            )));
        }
        if !TITLE_RE.is_match(raw) {
            return Err(WikiError::InvalidTitle(format!(
                "{raw:?} may only contain letters, digits, '-' and '_'"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// Parse a user-typed title; spaces become underscores first.
    pub fn from_form(raw: &str) -> Result<Self, WikiError> {
        Self::parse(&raw.replace(' ', "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the backing file inside the pages directory
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.0)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Match a raw request path such as `/view/Home` against the title-bearing routes.
pub fn match_path(path: &str) -> Option<(Action, Title)> {
    let caps = VALID_PATH_RE.captures(path)?;
    let action = Action::from_path_segment(caps.get(1)?.as_str())?;
    let title = Title::from_form(caps.get(2)?.as_str()).ok()?;
    Some((action, title))
}
