//! Post body rendering.
//!
//! Rendering runs in two passes. Code regions written as
//! `<code lang="ruby">...</code>` are first replaced by highlighted
//! `<pre class="highlight">` blocks, which the markup pass treats as opaque
//! raw HTML. The whole text then goes through the markup converter, which
//! shows any leftover `<code`/`</code` marker as literal text.
//!
//! Rendering is pure: the same text always produces the same HTML.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::ports::{Highlighter, MarkupConverter, RenderError};

/// Bodies longer than this many characters are cut for summaries.
pub const SUMMARY_CHARS: usize = 200;

static CODE_REGION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<code(?:\s+lang="([^"]*)")?\s*>(.*?)</code>"#).unwrap());

/// The text window shown in listings and feed summaries.
///
/// Short bodies are returned whole. Longer ones are cut after
/// [`SUMMARY_CHARS`] characters, extended to the next line break, or failing
/// that to the next whitespace. A code region is never split: a window
/// ending inside one grows to the region's `</code>`, or stops before the
/// region when it runs to the end of the body. The result is always a strict
/// prefix of a body longer than the limit.
pub fn summary(text: &str) -> &str {
    let Some((cut, _)) = text.char_indices().nth(SUMMARY_CHARS) else {
        return text;
    };
    let rest = &text[cut..];
    let end = rest
        .find('\n')
        .or_else(|| rest.find(char::is_whitespace))
        .map_or(cut, |offset| cut + offset);

    &text[..keep_region_whole(text, end)]
}

fn keep_region_whole(text: &str, end: usize) -> usize {
    let Some(region) = CODE_REGION
        .find_iter(text)
        .take_while(|m| m.start() < end)
        .find(|m| end < m.end())
    else {
        return end;
    };

    if region.end() < text.len() {
        region.end()
    } else {
        region.start()
    }
}

/// Markup to HTML with highlighted code regions.
#[derive(Clone)]
pub struct ContentRenderer {
    highlighter: Arc<dyn Highlighter>,
    markup: Arc<dyn MarkupConverter>,
}

impl ContentRenderer {
    pub fn new(highlighter: Arc<dyn Highlighter>, markup: Arc<dyn MarkupConverter>) -> Self {
        Self {
            highlighter,
            markup,
        }
    }

    /// Render a post body, or only its [`summary`] window.
    pub fn render(&self, text: &str, summary_only: bool) -> Result<String, RenderError> {
        let window = if summary_only { summary(text) } else { text };
        let annotated = self.shield_code_regions(window)?;
        Ok(self.markup.to_html(&annotated))
    }

    /// Replace every complete code region with a highlighted block.
    /// Markers that do not form a complete region are left to the markup
    /// converter.
    fn shield_code_regions(&self, text: &str) -> Result<String, RenderError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in CODE_REGION.captures_iter(text) {
            let Some(region) = caps.get(0) else {
                continue;
            };
            out.push_str(&text[last..region.start()]);

            let language = caps
                .get(1)
                .map(|m| m.as_str().trim())
                .filter(|lang| !lang.is_empty());
            let code = caps
                .get(2)
                .map_or("", |m| m.as_str())
                .trim_matches(['\n', '\r']);

            let fragment = self.highlighter.highlight(code, language)?;
            push_block(&mut out, language, &fragment);
            last = region.end();
        }

        out.push_str(&text[last..]);
        Ok(out)
    }
}

/// Append a `<pre>` raw HTML block on its own lines. CommonMark keeps such a
/// block verbatim up to the closing `</pre>`, blank lines included.
fn push_block(out: &mut String, language: Option<&str>, fragment: &str) {
    if !out.is_empty() {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
    }

    out.push_str("<pre class=\"highlight\"");
    if let Some(lang) = language {
        let lang: String = lang
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '_' | '.'))
            .collect();
        out.push_str(" data-lang=\"");
        out.push_str(&lang);
        out.push('"');
    }
    out.push('>');
    out.push_str(fragment.trim_end_matches('\n'));
    out.push_str("</pre>\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TaggingHighlighter;

    impl Highlighter for TaggingHighlighter {
        fn highlight(&self, code: &str, language: Option<&str>) -> Result<String, RenderError> {
            if language == Some("broken") {
                return Err(RenderError::Highlight {
                    language: "broken".to_owned(),
                    message: "no grammar".to_owned(),
                });
            }
            Ok(format!(
                "<span class=\"{}\">{}</span>",
                language.unwrap_or("plain"),
                code.replace('<', "&lt;")
            ))
        }
    }

    /// Leaves the annotated text as is, so tests can inspect the first pass.
    struct Passthrough;

    impl MarkupConverter for Passthrough {
        fn to_html(&self, text: &str) -> String {
            text.to_owned()
        }
    }

    fn renderer() -> ContentRenderer {
        ContentRenderer::new(Arc::new(TaggingHighlighter), Arc::new(Passthrough))
    }

    #[test]
    fn test_code_region_is_highlighted_and_shielded() {
        let out = renderer()
            .render("Intro\n<code lang=\"ruby\">puts 1</code>\nOutro", false)
            .unwrap();

        assert_eq!(
            out,
            "Intro\n\n<pre class=\"highlight\" data-lang=\"ruby\"><span class=\"ruby\">puts 1</span></pre>\n\n\nOutro"
        );
    }

    #[test]
    fn test_code_region_without_language_uses_plain_path() {
        let out = renderer().render("<code>\nx < y\n</code>", false).unwrap();
        assert_eq!(
            out,
            "<pre class=\"highlight\"><span class=\"plain\">x &lt; y</span></pre>\n\n"
        );
    }

    #[test]
    fn test_multiple_regions_spanning_lines() {
        let text = "a <code lang=\"rs\">fn a() {}\n\nfn b() {}</code> b <code>c</code>";
        let out = renderer().render(text, false).unwrap();

        assert!(out.contains("<span class=\"rs\">fn a() {}\n\nfn b() {}</span>"));
        assert!(out.contains("<span class=\"plain\">c</span>"));
        assert!(!out.contains("<code"));
    }

    #[test]
    fn test_unterminated_region_is_left_for_markup() {
        let out = renderer().render("before <code lang=\"rb\">oops", false).unwrap();
        assert_eq!(out, "before <code lang=\"rb\">oops");
    }

    #[test]
    fn test_stray_closing_marker_before_region() {
        let out = renderer().render("x</code> <code>y</code>", false).unwrap();
        assert!(out.starts_with("x</code> "));
        assert!(out.contains("<span class=\"plain\">y</span>"));
    }

    #[test]
    fn test_language_attribute_is_filtered() {
        let out = renderer().render("<code lang=\"c++ <x>\">a</code>", false).unwrap();
        assert!(out.contains("data-lang=\"c++x\""));
    }

    #[test]
    fn test_highlighter_error_propagates() {
        let result = renderer().render("<code lang=\"broken\">a</code>", false);
        assert!(matches!(result, Err(RenderError::Highlight { .. })));
    }

    #[test]
    fn test_empty_input_renders_empty() {
        assert_eq!(renderer().render("", false).unwrap(), "");
        assert_eq!(renderer().render("", true).unwrap(), "");
    }

    #[test]
    fn test_summary_of_short_body_is_whole() {
        assert_eq!(summary("short body\nwith lines"), "short body\nwith lines");
    }

    #[test]
    fn test_summary_extends_to_line_break() {
        let first = "a".repeat(190);
        let body = format!("{first} more words here\nsecond line");
        assert_eq!(summary(&body), format!("{first} more words here"));
    }

    #[test]
    fn test_summary_without_line_break_stops_at_whitespace() {
        let body = format!("{} tail end", "b".repeat(205));
        assert_eq!(summary(&body), "b".repeat(205));
    }

    #[test]
    fn test_summary_without_any_break_is_exact() {
        let body = "c".repeat(300);
        assert_eq!(summary(&body).chars().count(), SUMMARY_CHARS);
    }

    #[test]
    fn test_summary_counts_characters_not_bytes() {
        let body = format!("{}\nrest", "é".repeat(250));
        assert_eq!(summary(&body), "é".repeat(250));
    }

    #[test]
    fn test_summary_is_strict_prefix_of_long_bodies() {
        let long = format!("{}\n", "d".repeat(200));
        assert!(summary(&long).len() < long.len());

        let rendered = renderer().render(&format!("{}\nsecret", "w ".repeat(150)), true).unwrap();
        assert!(!rendered.contains("secret"));
    }

    fn prose_then_region(tail: &str) -> String {
        format!(
            "{}\n<code lang=\"rust\">fn a() {{}}\nfn b() {{}}</code>{tail}",
            "p".repeat(196)
        )
    }

    #[test]
    fn test_summary_grows_to_end_of_split_region() {
        let body = prose_then_region("\nAfter the code.");

        let window = summary(&body);

        assert!(window.ends_with("fn b() {}</code>"), "{window}");
        assert!(!window.contains("After"));
    }

    #[test]
    fn test_summary_stops_before_region_ending_the_body() {
        let body = prose_then_region("");

        assert_eq!(summary(&body), format!("{}\n", "p".repeat(196)));
    }

    #[test]
    fn test_summary_render_highlights_whole_region() {
        let body = prose_then_region("\nAfter the code.");

        let out = renderer().render(&body, true).unwrap();

        assert!(out.contains("<pre class=\"highlight\" data-lang=\"rust\">"));
        assert!(out.contains("fn b() {}"));
        assert!(!out.contains("<code"));
    }

    #[test]
    fn test_summary_ignores_regions_before_the_cut() {
        let body = format!("<code>x</code>\n{}\nnext line", "q ".repeat(120));
        let window = summary(&body);

        assert!(window.starts_with("<code>x</code>"));
        assert!(!window.contains("next line"));
    }
}
