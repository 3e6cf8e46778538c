//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::heading::{Headings, TocEntry};
use crate::markup::escape_html;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML/XHTML content.
    pub html: String,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
}

/// Image whose alt text is still being collected.
struct PendingImage {
    src: String,
    title: String,
    alt: String,
}

/// Generic markdown renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait for everything that differs between
/// plain HTML and Confluence storage format; lists, tables and inline
/// formatting are shared.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    gfm: bool,
    headings: Headings,
    /// Code block being collected: (language, content).
    code: Option<(Option<String>, String)>,
    image: Option<PendingImage>,
    /// Column alignments of the current table.
    alignments: Vec<Alignment>,
    /// Index of the current table cell within its row.
    cell: usize,
    in_table_head: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with GFM extensions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            gfm: true,
            headings: Headings::default(),
            code: None,
            image: None,
            alignments: Vec::new(),
            cell: 0,
            in_table_head: false,
            _backend: PhantomData,
        }
    }

    /// Enable or disable GitHub Flavored Markdown extensions
    /// (tables, strikethrough, task lists, alerts).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Parse and render markdown text.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let options = if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        };
        self.render(Parser::new_ext(markdown, options))
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            toc: self.headings.take_toc(),
        }
    }

    /// Write inline markup to the open heading, or to the output.
    ///
    /// `text` is the plain-text form used for heading slugs.
    fn push_inline(&mut self, text: &str, html: &str) {
        if self.headings.is_open() {
            self.headings.push(text, html);
        } else {
            self.output.push_str(html);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => B::raw_html(&html, &mut self.output),
            Event::InlineHtml(html) => {
                let mut converted = String::new();
                B::raw_html(&html, &mut converted);
                self.push_inline("", &converted);
            }
            Event::SoftBreak => self.push_inline(" ", "\n"),
            Event::HardBreak => {
                let mut html = String::new();
                B::hard_break(&mut html);
                self.push_inline(" ", &html);
            }
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => self.headings.open(heading_level(level)),
            Tag::BlockQuote(Some(kind)) => B::alert_start(kind.into(), &mut self.output),
            Tag::BlockQuote(None) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                // Only the first word of the fence info is the language
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(Some(1)) => self.output.push_str("<ol>"),
            Tag::List(Some(start)) => write!(self.output, r#"<ol start="{start}">"#).unwrap(),
            Tag::List(None) => self.output.push_str("<ul>"),
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.alignments = alignments;
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.cell = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.cell = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let cell = if self.in_table_head { "th" } else { "td" };
                let style = match self.alignments.get(self.cell) {
                    Some(Alignment::Left) => r#" style="text-align:left""#,
                    Some(Alignment::Center) => r#" style="text-align:center""#,
                    Some(Alignment::Right) => r#" style="text-align:right""#,
                    Some(Alignment::None) | None => "",
                };
                write!(self.output, "<{cell}{style}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("", "<em>"),
            Tag::Strong => self.push_inline("", "<strong>"),
            Tag::Strikethrough => self.push_inline("", "<s>"),
            Tag::Link { dest_url, .. } => {
                let open = format!(r#"<a href="{}">"#, escape_html(&dest_url));
                self.push_inline("", &open);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(PendingImage {
                    src: dest_url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                });
            }
            // Extensions that are never enabled for readmes
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => self.headings.close(&mut self.output),
            TagEnd::BlockQuote(Some(kind)) => B::alert_end(kind.into(), &mut self.output),
            TagEnd::BlockQuote(None) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                if let Some((lang, content)) = self.code.take() {
                    B::code_block(lang.as_deref(), &content, &mut self.output);
                }
            }
            TagEnd::List(true) => self.output.push_str("</ol>"),
            TagEnd::List(false) => self.output.push_str("</ul>"),
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    let mut html = String::new();
                    B::image(&image.src, &image.alt, &image.title, &mut html);
                    self.push_inline("", &html);
                }
            }
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
                self.cell += 1;
            }
            TagEnd::Emphasis => self.push_inline("", "</em>"),
            TagEnd::Strong => self.push_inline("", "</strong>"),
            TagEnd::Strikethrough => self.push_inline("", "</s>"),
            TagEnd::Link => self.push_inline("", "</a>"),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, content)) = &mut self.code {
            content.push_str(text);
        } else if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else {
            self.push_inline(text, &escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(code);
            return;
        }
        let html = format!("<code>{}</code>", escape_html(code));
        self.push_inline(code, &html);
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlBackend;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render("Hello, world!").html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_with_id_and_toc() {
        let result = render("## Section Title");
        assert_eq!(result.html, r#"<h2 id="section-title">Section Title</h2>"#);
        assert_eq!(
            result.toc,
            vec![TocEntry {
                level: 2,
                title: "Section Title".to_owned(),
                id: "section-title".to_owned(),
            }]
        );
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render("## Install `npm`");
        assert_eq!(
            result.html,
            r#"<h2 id="install-npm">Install <code>npm</code></h2>"#
        );
        assert_eq!(result.toc[0].title, "Install npm");
    }

    #[test]
    fn test_heading_with_emphasis_stays_inside_heading() {
        let result = render("### The *fast* path");
        assert_eq!(
            result.html,
            r#"<h3 id="the-fast-path">The <em>fast</em> path</h3>"#
        );
    }

    #[test]
    fn test_inline_html_stays_inside_heading() {
        let result = render("# Widgets <img src=\"badge.svg\">");
        assert_eq!(
            result.html,
            r#"<h1 id="widgets">Widgets <img src="badge.svg"></h1>"#
        );
        assert_eq!(result.toc[0].title, "Widgets");
    }

    #[test]
    fn test_markdown_image_stays_inside_heading() {
        let result = render("# Widgets ![ci](ci.svg)");
        assert_eq!(
            result.html,
            r#"<h1 id="widgets">Widgets <img src="ci.svg" alt="ci"></h1>"#
        );
    }

    #[test]
    fn test_code_block_language_from_fence_info() {
        let result = render("```rust ignore\nfn main() {}\n```");
        assert_eq!(
            result.html,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_indented_code_block() {
        let result = render("    indented\n");
        assert_eq!(result.html, "<pre><code>indented\n</code></pre>");
    }

    #[test]
    fn test_table() {
        let result = render("| A | B |\n|---|--:|\n| 1 | 2 |");
        assert_eq!(
            result.html,
            "<table><thead><tr><th>A</th><th style=\"text-align:right\">B</th></tr></thead>\
             <tbody><tr><td>1</td><td style=\"text-align:right\">2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(render("- one\n- two").html, "<ul><li>one</li><li>two</li></ul>");
        assert_eq!(
            render("3. three\n4. four").html,
            r#"<ol start="3"><li>three</li><li>four</li></ol>"#
        );
    }

    #[test]
    fn test_task_list() {
        let result = render("- [x] done");
        assert!(
            result
                .html
                .contains(r#"<input type="checkbox" checked disabled> "#)
        );
    }

    #[test]
    fn test_alert() {
        let result = render("> [!TIP]\n> Use the CLI.");
        assert_eq!(
            result.html,
            "<blockquote><p><strong>Tip</strong></p><p>Use the CLI.</p></blockquote>"
        );
    }

    #[test]
    fn test_plain_blockquote() {
        assert_eq!(
            render("> quoted").html,
            "<blockquote><p>quoted</p></blockquote>"
        );
    }

    #[test]
    fn test_image_alt_text() {
        assert_eq!(
            render("![The `logo`](logo.png)").html,
            r#"<p><img src="logo.png" alt="The logo"></p>"#
        );
    }

    #[test]
    fn test_link_is_escaped() {
        assert_eq!(
            render("[q](https://example.com/?a=1&b=2)").html,
            r#"<p><a href="https://example.com/?a=1&amp;b=2">q</a></p>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(render("a < b & c").html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_raw_html_passes_through() {
        let result = render("<div align=\"center\">x</div>");
        assert_eq!(result.html.trim_end(), "<div align=\"center\">x</div>");
    }

    #[test]
    fn test_strikethrough_requires_gfm() {
        assert_eq!(render("~~gone~~").html, "<p><s>gone</s></p>");
        let plain = MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(false)
            .render_markdown("~~gone~~");
        assert_eq!(plain.html, "<p>~~gone~~</p>");
    }

    #[test]
    fn test_default_renderer() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::default();
        assert_eq!(renderer.render(Parser::new("Hi")).html, "<p>Hi</p>");
    }
}
