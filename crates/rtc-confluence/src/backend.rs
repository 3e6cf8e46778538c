//! Confluence backend for markdown rendering.
//!
//! Produces Confluence XHTML storage format for the REST API.

use std::fmt::Write;

use rtc_renderer::{AlertKind, RenderBackend, close_void_tags, escape_html};

/// Confluence render backend.
///
/// Produces Confluence XHTML storage format with:
/// - `ac:structured-macro` for code blocks
/// - Info panel macro for blockquotes
/// - Info/tip/note/warning panel macros for GitHub-style alerts
/// - `ac:image` with `ri:url` or `ri:attachment` for images
pub struct ConfluenceBackend;

impl ConfluenceBackend {
    /// Panel macro name used for an alert.
    fn alert_macro(kind: AlertKind) -> &'static str {
        match kind {
            AlertKind::Note | AlertKind::Important => "info",
            AlertKind::Tip => "tip",
            AlertKind::Warning => "note",
            AlertKind::Caution => "warning",
        }
    }
}

/// Split `]]>` so code content cannot terminate the CDATA section early.
fn escape_cdata(content: &str) -> String {
    content.replace("]]>", "]]]]><![CDATA[>")
}

impl RenderBackend for ConfluenceBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        out.push_str(r#"<ac:structured-macro ac:name="code" ac:schema-version="1">"#);
        if let Some(lang) = lang {
            write!(
                out,
                r#"<ac:parameter ac:name="language">{}</ac:parameter>"#,
                escape_html(lang)
            )
            .unwrap();
        }
        out.push_str(r#"<ac:parameter ac:name="linenumbers">true</ac:parameter>"#);
        write!(
            out,
            r"<ac:plain-text-body><![CDATA[{}]]></ac:plain-text-body>",
            escape_cdata(content)
        )
        .unwrap();
        out.push_str("</ac:structured-macro>");
    }

    fn blockquote_start(out: &mut String) {
        out.push_str(
            r#"<ac:structured-macro ac:name="info" ac:schema-version="1"><ac:rich-text-body>"#,
        );
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</ac:rich-text-body></ac:structured-macro>");
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        write!(
            out,
            r#"<ac:structured-macro ac:name="{}" ac:schema-version="1"><ac:rich-text-body>"#,
            Self::alert_macro(kind)
        )
        .unwrap();
    }

    fn alert_end(_kind: AlertKind, out: &mut String) {
        out.push_str("</ac:rich-text-body></ac:structured-macro>");
    }

    fn image(src: &str, _alt: &str, _title: &str, out: &mut String) {
        let is_external = src.starts_with("http://") || src.starts_with("https://");
        let inner = if is_external {
            format!(r#"ri:url ri:value="{}""#, escape_html(src))
        } else {
            // Relative paths resolve to page attachments
            let filename = src.rsplit('/').next().unwrap_or(src);
            format!(r#"ri:attachment ri:filename="{}""#, escape_html(filename))
        };
        write!(out, "<ac:image><{inner} /></ac:image>").unwrap();
    }

    fn raw_html(html: &str, out: &mut String) {
        // Storage format is XML, so `<br>` and `<img ...>` must be closed
        out.push_str(&close_void_tags(html));
    }

    fn hard_break(out: &mut String) {
        out.push_str("<br />");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr />");
    }

    fn task_list_marker(checked: bool, out: &mut String) {
        out.push_str(if checked { "[x] " } else { "[ ] " });
    }
}
