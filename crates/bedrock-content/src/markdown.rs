//! Markdown to HTML rendering.
//!
//! Documentation is rendered with pulldown-cmark (CommonMark plus tables,
//! strikethrough and task lists) and passed through an allow-list filter on
//! the event stream before it is written out:
//!
//! - raw HTML, block or inline, is emitted as escaped text
//! - link and image destinations must be relative, a fragment, or use one of
//!   [`ALLOWED_SCHEMES`]; anything else becomes `#`

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// URL schemes permitted in links and images.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Markdown shown when a tool has no documentation file.
pub const MISSING_DOCUMENTATION: &str = "# Documentação não encontrada";

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render markdown to sanitized HTML.
///
/// ```
/// use bedrock_content::render_html;
///
/// assert_eq!(render_html("# Hello"), "<h1>Hello</h1>\n");
/// assert!(!render_html("<script>x()</script>").contains("<script>"));
/// ```
pub fn render_html(markdown: &str) -> String {
    let events = Parser::new_ext(markdown, options()).map(sanitize_event);
    let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut out, events);
    out
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        log::debug!("Dropping link with disallowed scheme: {url}");
        CowStr::Borrowed("#")
    }
}

/// Whether a link destination is allowed through.
///
/// Browsers ignore ASCII whitespace and control characters inside a scheme
/// (`java\tscript:`), so those are stripped before the check.
pub fn is_safe_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.find([':', '/', '?', '#']) {
        Some(idx) if normalized[idx..].starts_with(':') => {
            ALLOWED_SCHEMES.contains(&&normalized[..idx])
        }
        _ => true,
    }
}
