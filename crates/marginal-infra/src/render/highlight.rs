//! Syntax highlighting via syntect, emitting class-based spans.

use std::borrow::Cow;

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use marginal_core::ports::{Highlighter, RenderError};

/// Every highlight class is prefixed so it cannot clash with site CSS.
pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Highlighter backed by syntect's bundled grammars and themes.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// CSS for the highlight classes, taken from one of the bundled themes
    /// (e.g. `base16-ocean.dark`, `InspiredGitHub`).
    pub fn stylesheet(&self, theme: &str) -> Result<String, RenderError> {
        let selected = self
            .themes
            .themes
            .get(theme)
            .ok_or_else(|| RenderError::Theme(theme.to_owned()))?;

        css_for_theme_with_class_style(selected, CLASS_STYLE)
            .map_err(|e| RenderError::Theme(format!("{theme}: {e}")))
    }

    fn syntax_for(&self, language: Option<&str>) -> &SyntaxReference {
        let Some(lang) = language else {
            return self.syntaxes.find_syntax_plain_text();
        };
        self.syntaxes.find_syntax_by_token(lang).unwrap_or_else(|| {
            tracing::debug!(language = %lang, "Unknown highlight language, using plain text");
            self.syntaxes.find_syntax_plain_text()
        })
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Result<String, RenderError> {
        let syntax = self.syntax_for(language);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);

        // The newline grammars expect every line to end with '\n'.
        let code: Cow<'_, str> = if code.ends_with('\n') {
            Cow::Borrowed(code)
        } else {
            Cow::Owned(format!("{code}\n"))
        };

        for line in LinesWithEndings::from(&code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| RenderError::Highlight {
                    language: language.unwrap_or("plain").to_owned(),
                    message: e.to_string(),
                })?;
        }

        Ok(generator.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_gets_scoped_spans() {
        let highlighter = SyntectHighlighter::new();

        let html = highlighter.highlight("fn main() {}", Some("rs")).unwrap();

        assert!(html.contains("class=\"hl-"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_is_plain_and_escaped() {
        let highlighter = SyntectHighlighter::new();

        let html = highlighter
            .highlight("if a < b && c", Some("no-such-language"))
            .unwrap();

        assert!(html.contains("a &lt; b &amp;&amp; c"));
        assert!(!html.contains("a < b"));
    }

    #[test]
    fn test_stylesheet_for_bundled_theme() {
        let highlighter = SyntectHighlighter::new();

        let css = highlighter.stylesheet("base16-ocean.dark").unwrap();
        assert!(css.contains(".hl-"));

        assert!(matches!(
            highlighter.stylesheet("no-such-theme"),
            Err(RenderError::Theme(_))
        ));
    }
}
