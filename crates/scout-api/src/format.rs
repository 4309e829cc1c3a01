//! Heuristic response formatting
//!
//! The model answers in loose prose. This module coaxes that text into
//! markdown (colon-headers, uniform bullets, terminated paragraphs) and
//! renders it to HTML. Best effort only: arbitrary natural-language input
//! must pass through without failing.

use std::sync::OnceLock;

use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;

/// Lines shaped `Words:` become level-2 headings, keeping trailing text.
fn main_section_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^([A-Za-z][A-Za-z ]+):(\s*)").unwrap())
}

/// Remaining line-start `Words:` become level-3 headings, unless the colon
/// is followed by a digit (times, ratios).
fn sub_section_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^([A-Za-z][A-Za-z ]+):($|[^0-9])").unwrap())
}

/// Unicode bullet glyphs normalized to a markdown list marker.
fn bullet_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[•●○]\s*").unwrap())
}

/// Format raw model text into an HTML string.
pub fn format_response(text: &str) -> String {
    let processed = text.replace("\r\n", "\n");
    let processed = main_section_pattern().replace_all(&processed, "## ${1}${2}");
    let processed = sub_section_pattern().replace_all(&processed, "### ${1}${2}");
    let processed = bullet_pattern().replace_all(&processed, "* ");

    let paragraphs: Vec<String> = processed
        .split("\n\n")
        .filter(|p| !p.is_empty())
        .map(|p| {
            // Headers and list items pass through untouched.
            if p.starts_with('#') || p.starts_with('*') || p.starts_with('-') {
                p.to_string()
            } else {
                format!("{p}\n")
            }
        })
        .collect();
    let formatted = paragraphs.join("\n\n");

    render_markdown(&formatted)
}

/// Render markdown to HTML with GFM-style extensions and single newlines
/// treated as line breaks.
fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(format_response(""), "");
    }

    #[test]
    fn colon_header_becomes_h2_with_trailing_text() {
        let html = format_response("Summary: hello");
        assert!(html.contains("<h2>"), "no h2 in {html}");
        assert!(html.contains("Summary"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn plain_text_passes_through_as_paragraph() {
        let html = format_response("just a sentence without structure");
        assert!(html.contains("<p>just a sentence without structure</p>"));
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn unicode_bullets_become_list_items() {
        let html = format_response("• first item\n● second item\n○ third item");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>first item</li>"));
        assert!(html.contains("<li>second item</li>"));
        assert!(html.contains("<li>third item</li>"));
    }

    #[test]
    fn single_newlines_render_as_line_breaks() {
        let html = format_response("line one\nline two");
        assert!(html.contains("<br"), "no line break in {html}");
    }

    #[test]
    fn crlf_line_endings_are_normalized() {
        let html = format_response("Summary: topic\r\n\r\ndetails follow");
        assert!(html.contains("<h2>"));
        assert!(html.contains("details follow"));
    }

    #[test]
    fn sub_section_guard_skips_digits_after_colon() {
        assert!(!sub_section_pattern().is_match("Departure:9am"));
        assert!(sub_section_pattern().is_match("Departure: soon"));
        assert!(sub_section_pattern().is_match("Departure:"));
    }

    #[test]
    fn multiple_paragraphs_are_separated() {
        let html = format_response("first paragraph\n\nsecond paragraph");
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn never_panics_on_arbitrary_text() {
        for text in ["::::", "## already markdown", "é•—\u{0}", "a:\n\nb:", "•"] {
            let _ = format_response(text);
        }
    }
}
