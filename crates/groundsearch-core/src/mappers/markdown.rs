//! Raw answer text to Markdown, then Markdown to HTML.
//!
//! The passes run in a fixed order. Level-2 promotion must run before
//! level-3 promotion: once a line carries a `#` marker the level-3 pattern
//! can no longer match it.

use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used, reason = "static pattern, covered by tests")]
static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([A-Za-z][A-Za-z \t]+):([ \t]*)$").expect("valid label-line regex")
});

#[allow(clippy::expect_used, reason = "static pattern, covered by tests")]
static LEADING_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([A-Za-z][A-Za-z \t]+):(\D|$)").expect("valid leading-label regex")
});

#[allow(clippy::expect_used, reason = "static pattern, covered by tests")]
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[•●○][ \t]*").expect("valid bullet regex"));

/// Format raw model text as HTML.
pub fn format_response(raw: &str) -> String {
    render_html(&to_markdown(raw))
}

/// Apply the text passes without rendering.
pub fn to_markdown(raw: &str) -> String {
    let text = normalize_line_endings(raw);
    let text = promote_label_lines(&text);
    let text = promote_leading_labels(&text);
    let text = normalize_bullets(&text);
    separate_paragraphs(&text)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// `Overview:` on a line of its own becomes `## Overview:`.
fn promote_label_lines(text: &str) -> String {
    LABEL_LINE.replace_all(text, "## ${1}:${2}").into_owned()
}

/// `Details: more` at a line start becomes `### Details: more`.
/// A colon followed by a digit (`Ratio:3`) is left alone.
fn promote_leading_labels(text: &str) -> String {
    LEADING_LABEL.replace_all(text, "### ${1}:${2}").into_owned()
}

fn normalize_bullets(text: &str) -> String {
    BULLET.replace_all(text, "* ").into_owned()
}

/// Plain paragraphs get a trailing newline so list/paragraph separation
/// survives rendering. Headings and list items are kept as-is.
fn separate_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.starts_with('#') || p.starts_with('*') || p.starts_with('-') {
                p.to_string()
            } else {
                format!("{p}\n")
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// GFM tables and strikethrough on, soft breaks rendered as `<br />`.
/// Raw HTML from the model is escaped rather than passed through.
fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}
