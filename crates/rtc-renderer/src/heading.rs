//! Heading collection, anchor IDs and table of contents.

use std::collections::HashMap;
use std::fmt::Write;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Heading whose content is still being collected.
struct OpenHeading {
    level: u8,
    text: String,
    html: String,
}

/// Collects heading content until the heading closes, then writes it with a
/// unique anchor ID.
#[derive(Default)]
pub(crate) struct Headings {
    open: Option<OpenHeading>,
    toc: Vec<TocEntry>,
    /// Times each slug has been used.
    used_ids: HashMap<String, usize>,
}

impl Headings {
    pub(crate) fn open(&mut self, level: u8) {
        self.open = Some(OpenHeading {
            level,
            text: String::new(),
            html: String::new(),
        });
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Append content to the open heading: `text` feeds the slug and ToC,
    /// `html` the rendered heading.
    pub(crate) fn push(&mut self, text: &str, html: &str) {
        if let Some(heading) = &mut self.open {
            heading.text.push_str(text);
            heading.html.push_str(html);
        }
    }

    /// Close the open heading and write it to `out`.
    pub(crate) fn close(&mut self, out: &mut String) {
        let Some(heading) = self.open.take() else {
            return;
        };
        let title = heading.text.trim().to_owned();
        let id = self.unique_id(&title);
        let level = heading.level;

        write!(
            out,
            r#"<h{level} id="{id}">{}</h{level}>"#,
            heading.html.trim()
        )
        .unwrap();

        self.toc.push(TocEntry { level, title, id });
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }

    fn unique_id(&mut self, title: &str) -> String {
        let slug = slugify(title);
        let used = self.used_ids.entry(slug.clone()).or_insert(0);
        let id = if *used == 0 {
            slug
        } else {
            format!("{slug}-{used}")
        };
        *used += 1;
        id
    }
}

/// Convert heading text to an anchor slug.
///
/// Whitespace, dashes and underscores separate words; other punctuation is
/// dropped.
pub(crate) fn slugify(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .map(|word| {
            word.chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
