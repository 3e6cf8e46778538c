//! Render backend trait for format-specific rendering.
//!
//! This trait abstracts the differences between plain HTML and Confluence
//! storage output, allowing the main renderer to be generic over the format.

use pulldown_cmark::BlockQuoteKind;

/// GitHub-style alert kind (`> [!NOTE]`, `> [!WARNING]`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    /// `[!NOTE]`
    Note,
    /// `[!TIP]`
    Tip,
    /// `[!IMPORTANT]`
    Important,
    /// `[!WARNING]`
    Warning,
    /// `[!CAUTION]`
    Caution,
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Backend trait for format-specific rendering operations.
///
/// Implementations provide format-specific rendering for:
/// - Code blocks (HTML uses `<pre><code>`, Confluence uses `ac:structured-macro`)
/// - Blockquotes and alerts (HTML uses `<blockquote>`, Confluence uses panel macros)
/// - Images (HTML uses `<img>`, Confluence uses `ac:image`)
/// - Void elements (`<br>` vs `<br />`)
pub trait RenderBackend {
    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render the opening of a GitHub-style alert.
    fn alert_start(kind: AlertKind, out: &mut String);

    /// Render the closing of a GitHub-style alert.
    fn alert_end(kind: AlertKind, out: &mut String);

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text for the image
    /// * `title` - Optional title attribute
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render raw HTML from the markdown source.
    ///
    /// Default copies it unchanged.
    fn raw_html(html: &str, out: &mut String) {
        out.push_str(html);
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    ///
    /// Default uses HTML checkbox. Override for format-specific rendering.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
