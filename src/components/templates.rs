//! Page rendering.
//!
//! Templates are plain HTML files with `{{NAME}}` slots. A response is the
//! action's fragment executed with the page data, then wrapped in `_base.html`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::errors::WikiError;
use crate::types::{Action, Page};
use crate::utils::{escape_html, excerpt, last_modified_html};

const BASE_TEMPLATE: &str = "_base";
const CONTENT_SLOT: &str = "CONTENT";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// A parsed template file
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Split `source` into literal text and `{{NAME}}` slots
    pub fn parse(name: &str, source: &str) -> Result<Self, WikiError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                WikiError::TemplateError(format!("{name}: unterminated slot"))
            })?;
            let slot = after[..end].trim();
            if slot.is_empty() || !slot.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
                return Err(WikiError::TemplateError(format!(
                    "{name}: invalid slot name {slot:?}"
                )));
            }
            segments.push(Segment::Slot(slot.to_string()));
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { name: name.to_string(), segments })
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Slot(name) if name == slot))
    }

    /// Fill every slot from `context`; a slot without a value is an error
    pub fn execute(&self, context: &TemplateContext) -> Result<String, WikiError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    let value = context.get(slot).ok_or_else(|| {
                        WikiError::TemplateError(format!("{}: no value for {slot}", self.name))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Values for template slots. Text is escaped on insertion, trusted HTML is not.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: HashMap<&'static str, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, slot: &'static str, value: &str) -> Self {
        self.values.insert(slot, escape_html(value));
        self
    }

    /// Insert markup verbatim, bypassing escaping
    pub fn trusted(mut self, slot: &'static str, html: impl Into<String>) -> Self {
        self.values.insert(slot, html.into());
        self
    }

    fn get(&self, slot: &str) -> Option<&str> {
        self.values.get(slot).map(String::as_str)
    }
}

/// Parsed template set, loaded once and shared by all handlers
#[derive(Debug)]
pub struct Renderer {
    base: Template,
    fragments: HashMap<Action, Template>,
}

impl Renderer {
    /// Read `_base.html` and one fragment per templated action from `dir`
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let base = read_template(dir, BASE_TEMPLATE)?;
        let mut fragments = HashMap::new();
        for action in Action::TEMPLATED {
            fragments.insert(action, read_template(dir, action.as_str())?);
        }
        info!("Loaded {} templates from {:?}", fragments.len() + 1, dir);
        Self::from_templates(base, fragments)
    }

    /// Build a renderer from in-memory template sources
    pub fn from_sources(base: &str, fragments: &[(Action, &str)]) -> Result<Self, WikiError> {
        let base = Template::parse(BASE_TEMPLATE, base)?;
        let mut parsed = HashMap::new();
        for (action, source) in fragments {
            parsed.insert(*action, Template::parse(action.as_str(), source)?);
        }
        Self::from_templates(base, parsed)
    }

    fn from_templates(base: Template, fragments: HashMap<Action, Template>) -> Result<Self, WikiError> {
        if !base.has_slot(CONTENT_SLOT) {
            return Err(WikiError::TemplateError(format!(
                "{BASE_TEMPLATE}: missing {CONTENT_SLOT} slot"
            )));
        }
        if let Some(missing) = Action::TEMPLATED.iter().find(|a| !fragments.contains_key(*a)) {
            return Err(WikiError::TemplateError(format!("no template for action {missing}")));
        }
        Ok(Self { base, fragments })
    }

    /// Execute the action's fragment and wrap it in the base layout
    pub fn render(&self, action: Action, title: &str, context: &TemplateContext) -> Result<String, WikiError> {
        let fragment = self.fragments.get(&action).ok_or_else(|| {
            WikiError::TemplateError(format!("no template for action {action}"))
        })?;
        let content = fragment.execute(context)?;
        let page = TemplateContext::new()
            .text("TITLE", title)
            .trusted(CONTENT_SLOT, content);

        debug!("Rendering {} template for '{}'", action, title);
        self.base.execute(&page)
    }

    /// Listing of all pages; absent entries are skipped
    pub fn render_home(&self, pages: &[Option<Page>]) -> Result<String, WikiError> {
        let present: Vec<&Page> = pages.iter().flatten().collect();
        let context = TemplateContext::new()
            .trusted("PAGES", render_page_listing(&present))
            .text("COUNT", &present.len().to_string());
        self.render(Action::Home, "Home", &context)
    }

    /// Page body is inserted as trusted HTML
    pub fn render_view(&self, page: &Page) -> Result<String, WikiError> {
        let context = TemplateContext::new()
            .text("TITLE", page.title.as_str())
            .trusted("BODY", page.body_text())
            .trusted("MODIFIED", last_modified_html(page.modified));
        self.render(Action::View, page.title.as_str(), &context)
    }

    pub fn render_edit(&self, page: &Page) -> Result<String, WikiError> {
        let context = TemplateContext::new()
            .text("TITLE", page.title.as_str())
            .text("BODY", &page.body_text());
        self.render(Action::Edit, &format!("Editing {}", page.title), &context)
    }

    pub fn render_new(&self) -> Result<String, WikiError> {
        self.render(Action::New, "New page", &TemplateContext::new())
    }
}

fn read_template(dir: &Path, name: &str) -> Result<Template, WikiError> {
    let path = dir.join(format!("{name}.html"));
    let source = fs::read_to_string(&path)
        .map_err(|e| WikiError::TemplateError(format!("cannot read {:?}: {}", path, e)))?;
    Template::parse(name, &source)
}

fn render_page_listing(pages: &[&Page]) -> String {
    if pages.is_empty() {
        return "<p class=\"empty\">No pages yet.</p>\n".to_string();
    }

    let mut html = String::new();
    html.push_str("<ul class=\"listing\">\n");
    for page in pages {
        let title = escape_html(page.title.as_str());
        html.push_str(&format!(
            "  <li><a href=\"/view/{}\">{}</a> <span class=\"excerpt\">{}</span></li>\n",
            title,
            title,
            escape_html(&excerpt(&page.body_text()))
        ));
    }
    html.push_str("</ul>\n");
    html
}
