//! Markdown to HTML via pulldown-cmark.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use marginal_core::ports::MarkupConverter;

/// Markdown converter. Raw HTML (including highlighted `<pre>` blocks) is
/// passed through untouched, except a `<code`/`</code` tag that did not form
/// a code region, which is shown as literal text.
pub struct PulldownMarkup {
    options: Options,
    heading_offset: usize,
}

impl PulldownMarkup {
    /// Headings inside a post are demoted twice so they sit below the site
    /// title (h1) and the post title (h2): `#` becomes `<h3>`.
    pub fn new() -> Self {
        Self::with_heading_offset(2)
    }

    pub fn with_heading_offset(heading_offset: usize) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);

        Self {
            options,
            heading_offset,
        }
    }

    fn demote(&self, level: HeadingLevel) -> HeadingLevel {
        HeadingLevel::try_from(level as usize + self.heading_offset).unwrap_or(HeadingLevel::H6)
    }
}

impl Default for PulldownMarkup {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupConverter for PulldownMarkup {
    fn to_html(&self, text: &str) -> String {
        let events = Parser::new_ext(text, self.options).map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => Event::Start(Tag::Heading {
                level: self.demote(level),
                id,
                classes,
                attrs,
            }),
            Event::End(TagEnd::Heading(level)) => Event::End(TagEnd::Heading(self.demote(level))),
            Event::Html(tag) | Event::InlineHtml(tag) if is_code_marker(&tag) => Event::Text(tag),
            other => other,
        });

        let mut out = String::with_capacity(text.len() + text.len() / 2);
        html::push_html(&mut out, events);
        out
    }
}

/// `<code ...>` or `</code>`, in any case.
fn is_code_marker(html: &str) -> bool {
    let tag = html.trim_start();
    let Some(rest) = tag.strip_prefix("</").or_else(|| tag.strip_prefix('<')) else {
        return false;
    };
    rest.get(..4).is_some_and(|name| name.eq_ignore_ascii_case("code"))
        && !rest[4..].starts_with(|c: char| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_are_demoted() {
        let markup = PulldownMarkup::new();
        assert_eq!(markup.to_html("# Title"), "<h3>Title</h3>\n");
        assert_eq!(markup.to_html("##### Deep"), "<h6>Deep</h6>\n");
    }

    #[test]
    fn test_zero_offset_keeps_headings() {
        let markup = PulldownMarkup::with_heading_offset(0);
        assert_eq!(markup.to_html("## Two"), "<h2>Two</h2>\n");
    }

    #[test]
    fn test_emphasis_lists_and_links() {
        let html = PulldownMarkup::new().to_html("*a* **b**\n\n- one\n- [two](/two)\n");

        assert!(html.contains("<em>a</em> <strong>b</strong>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<a href=\"/two\">two</a>"));
    }

    #[test]
    fn test_stray_code_tags_are_text() {
        let markup = PulldownMarkup::new();

        assert_eq!(
            markup.to_html("a <code lang=\"rb\"> b"),
            "<p>a &lt;code lang=\"rb\"&gt; b</p>\n"
        );
        assert_eq!(markup.to_html("x</CODE> y"), "<p>x&lt;/CODE&gt; y</p>\n");
    }

    #[test]
    fn test_other_raw_html_passes_through() {
        let markup = PulldownMarkup::new();

        assert_eq!(markup.to_html("a <kbd>b</kbd>"), "<p>a <kbd>b</kbd></p>\n");
        assert_eq!(markup.to_html("x <codex> y"), "<p>x <codex> y</p>\n");
    }

    #[test]
    fn test_code_marker_detection() {
        assert!(is_code_marker("<code>"));
        assert!(is_code_marker("</code>"));
        assert!(is_code_marker("  <Code lang=\"x\">\n"));
        assert!(!is_code_marker("<codex>"));
        assert!(!is_code_marker("<pre class=\"highlight\">"));
        assert!(!is_code_marker("<co"));
    }
}
