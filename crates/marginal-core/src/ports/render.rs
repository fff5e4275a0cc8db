//! Rendering ports - syntax highlighting and markup conversion.

/// Turns source code into styled HTML.
pub trait Highlighter: Send + Sync {
    /// Highlight `code`. `language` is a hint such as `rust` or `rb`; `None`
    /// or an unknown language falls back to plain text.
    ///
    /// The returned fragment must be HTML-escaped and contain no block-level
    /// closing tags.
    fn highlight(&self, code: &str, language: Option<&str>) -> Result<String, RenderError>;
}

/// Lightweight markup to HTML. Raw HTML blocks must pass through unchanged.
pub trait MarkupConverter: Send + Sync {
    fn to_html(&self, text: &str) -> String;
}

/// Rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Highlighting failed for language '{language}': {message}")]
    Highlight { language: String, message: String },

    #[error("Theme not found: {0}")]
    Theme(String),
}
