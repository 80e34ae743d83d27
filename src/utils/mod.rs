use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Longest excerpt shown next to a title on the home listing, in characters
const EXCERPT_CHARS: usize = 80;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate last modified metadata HTML
pub fn last_modified_html(modified: Option<OffsetDateTime>) -> String {
    modified
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .map(|s| format!("<p class=\"meta\">Last modified: {}</p>", escape_html(&s)))
        .unwrap_or_default()
}

/// First non-blank line of a page body, truncated for the listing
pub fn excerpt(body: &str) -> String {
    let line = body.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if line.chars().count() > EXCERPT_CHARS {
        let truncated: String = line.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", truncated)
    } else {
        line.to_string()
    }
}
