//! Readme to Confluence page body renderer.
//!
//! [`PageRenderer`] prepends the generated-content banner to the readme and
//! converts the result with the backend matching the configured body
//! representation:
//! - [`Representation::Storage`]: [`ConfluenceBackend`] (XHTML storage format)
//! - [`Representation::Editor`]: [`HtmlBackend`] (plain HTML)
//!
//! # Example
//!
//! ```
//! use rtc_config::Representation;
//! use rtc_confluence::PageRenderer;
//!
//! let result = PageRenderer::new(Representation::Storage).render("# widgets\n\nHello");
//! assert!(result.html.contains("do not edit it directly"));
//! ```

use rtc_config::Representation;
use rtc_renderer::{HtmlBackend, MarkdownRenderer, RenderResult, TocEntry};

use crate::backend::ConfluenceBackend;

/// Heading placed above every published readme.
pub const BANNER: &str =
    "### This page was generated by readme2confluence, do not edit it directly";

const TOC_MACRO: &str = r#"<ac:structured-macro ac:name="toc" ac:schema-version="1" />"#;

/// Prefix readme markdown with the generated-content banner.
#[must_use]
pub fn with_banner(readme: &str) -> String {
    format!("{BANNER}\n\n{readme}")
}

/// Renders a readme to a Confluence page body.
#[derive(Clone, Copy, Debug)]
pub struct PageRenderer {
    representation: Representation,
    prepend_toc: bool,
}

impl PageRenderer {
    /// Create a renderer for the given body representation.
    #[must_use]
    pub fn new(representation: Representation) -> Self {
        Self {
            representation,
            prepend_toc: false,
        }
    }

    /// Enable or disable prepending a table of contents macro.
    ///
    /// Only applies to the storage representation; the editor converter
    /// does not understand macros.
    #[must_use]
    pub fn prepend_toc(mut self, enabled: bool) -> Self {
        self.prepend_toc = enabled;
        self
    }

    /// Render readme markdown, banner included.
    #[must_use]
    pub fn render(&self, readme: &str) -> RenderResult {
        let markdown = with_banner(readme);
        match self.representation {
            Representation::Storage => {
                let result =
                    MarkdownRenderer::<ConfluenceBackend>::new().render_markdown(&markdown);
                RenderResult {
                    html: self.maybe_prepend_toc(result.html, &result.toc),
                    toc: result.toc,
                }
            }
            Representation::Editor => {
                MarkdownRenderer::<HtmlBackend>::new().render_markdown(&markdown)
            }
        }
    }

    /// Prepend TOC macro if enabled and there are headings besides the banner.
    fn maybe_prepend_toc(&self, html: String, toc: &[TocEntry]) -> String {
        if self.prepend_toc && toc.len() > 1 {
            format!("{TOC_MACRO}{html}")
        } else {
            html
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_with_banner() {
        assert_eq!(
            with_banner("# widgets"),
            "### This page was generated by readme2confluence, do not edit it directly\n\n# widgets"
        );
    }

    #[test]
    fn test_render_storage_starts_with_banner() {
        let result = PageRenderer::new(Representation::Storage).render("Hello");
        assert!(result.html.starts_with(
            r#"<h3 id="this-page-was-generated-by-readme2confluence-do-not-edit-it-directly">"#
        ));
        assert!(result.html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_render_storage_uses_code_macro() {
        let result = PageRenderer::new(Representation::Storage).render("```sh\nnpm i\n```");
        assert!(result.html.contains(r#"ac:name="code""#));
        assert!(!result.html.contains("<pre>"));
    }

    #[test]
    fn test_render_editor_uses_plain_html() {
        let result = PageRenderer::new(Representation::Editor).render("```sh\nnpm i\n```");
        assert!(result.html.contains(r#"<pre><code class="language-sh">"#));
        assert!(!result.html.contains("ac:structured-macro"));
    }

    #[test]
    fn test_render_storage_raw_html_is_well_formed() {
        let result = PageRenderer::new(Representation::Storage)
            .render("# Widgets <img src=\"badge.svg\">\n\nline one<br>line two");
        assert!(result.html.ends_with(concat!(
            r#"<h1 id="widgets">Widgets <img src="badge.svg" /></h1>"#,
            "<p>line one<br />line two</p>"
        )));
    }

    #[test]
    fn test_render_editor_keeps_raw_html() {
        let result = PageRenderer::new(Representation::Editor).render("line one<br>line two");
        assert!(result.html.ends_with("<p>line one<br>line two</p>"));
    }

    #[test]
    fn test_toc_prepended_when_readme_has_headings() {
        let result = PageRenderer::new(Representation::Storage)
            .prepend_toc(true)
            .render("# Install\n\n## Usage");
        assert!(result.html.starts_with(TOC_MACRO));
        assert_eq!(result.toc.len(), 3);
    }

    #[test]
    fn test_toc_skipped_for_banner_only() {
        let result = PageRenderer::new(Representation::Storage)
            .prepend_toc(true)
            .render("No headings here.");
        assert!(!result.html.contains(TOC_MACRO));
    }

    #[test]
    fn test_toc_ignored_for_editor() {
        let result = PageRenderer::new(Representation::Editor)
            .prepend_toc(true)
            .render("# Install");
        assert!(!result.html.contains(TOC_MACRO));
    }
}
