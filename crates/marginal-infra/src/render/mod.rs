//! Rendering adapters: syntax highlighting and Markdown.

mod highlight;
mod markup;

pub use highlight::{CLASS_STYLE, SyntectHighlighter};
pub use markup::PulldownMarkup;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use marginal_core::ContentRenderer;

    use super::*;

    fn renderer() -> ContentRenderer {
        ContentRenderer::new(
            Arc::new(SyntectHighlighter::new()),
            Arc::new(PulldownMarkup::new()),
        )
    }

    #[test]
    fn test_code_region_becomes_highlighted_block() {
        let html = renderer()
            .render("Before <code lang=\"x\">snippet</code> after", false)
            .unwrap();

        assert!(html.starts_with("<p>Before</p>\n<pre class=\"highlight\" data-lang=\"x\">"));
        assert!(html.contains("snippet"));
        assert!(html.contains("<p>after</p>"));
        assert!(!html.contains("<code"));
    }

    #[test]
    fn test_blank_lines_inside_code_stay_in_one_block() {
        let html = renderer()
            .render("<code lang=\"rust\">fn a() {}\n\n# not a heading\nfn b() {}</code>", false)
            .unwrap();

        assert_eq!(html.matches("<pre").count(), 1);
        assert!(!html.contains("<h3>"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_empty_body_renders_empty() {
        assert_eq!(renderer().render("", false).unwrap(), "");
    }

    #[test]
    fn test_plain_text_render_is_stable() {
        let once = renderer().render("Just some plain words", false).unwrap();
        let twice = renderer().render(&once, false).unwrap();

        assert_eq!(once, "<p>Just some plain words</p>\n");
        assert_eq!(twice, once);
    }

    #[test]
    fn test_unterminated_code_renders_as_text() {
        let html = renderer().render("a <code lang=\"rb\"> b", false).unwrap();
        assert_eq!(html, "<p>a &lt;code lang=\"rb\"&gt; b</p>\n");
    }

    #[test]
    fn test_code_tag_inside_code_span_is_literal_once() {
        let html = renderer()
            .render("Wrap snippets in `<code>` tags.", false)
            .unwrap();

        assert_eq!(
            html,
            "<p>Wrap snippets in <code>&lt;code&gt;</code> tags.</p>\n"
        );
    }

    #[test]
    fn test_code_tag_inside_fence_is_literal_once() {
        let html = renderer()
            .render("```\n<code lang=\"rb\">\n```", false)
            .unwrap();

        assert_eq!(
            html,
            "<pre><code>&lt;code lang=\"rb\"&gt;\n</code></pre>\n"
        );
        assert!(!html.contains("&amp;"));
    }

    #[test]
    fn test_summary_renders_prefix_only() {
        let body = format!("{}\n\nThe ending paragraph.", "word ".repeat(60));
        let summary = renderer().render(&body, true).unwrap();
        let full = renderer().render(&body, false).unwrap();

        assert!(!summary.contains("ending paragraph"));
        assert!(full.contains("ending paragraph"));
    }
}
