//! Markup helpers shared by the renderer and its backends.

/// HTML void elements, which never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&#39;",
            _ => {
                out.push(c);
                continue;
            }
        };
        out.push_str(entity);
    }
    out
}

/// Rewrite void elements in raw HTML as self-closing XHTML tags.
///
/// Readmes often carry hand-written HTML such as `<br>` or `<img ...>`,
/// which is fine for browsers but not well-formed XML. Everything that is
/// not an unclosed void element is copied unchanged.
#[must_use]
pub fn close_void_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + 8);
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tag = &rest[start..];
        let Some(end) = tag_end(tag) else {
            out.push_str(tag);
            return out;
        };

        let inner = tag[..end].trim_end();
        if is_void_start_tag(inner) && !inner.ends_with('/') {
            out.push_str(inner);
            out.push_str(" />");
        } else {
            out.push_str(&tag[..=end]);
        }
        rest = &tag[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Byte index of the `>` closing the tag that starts `tag`.
///
/// Quoted attribute values may contain `>`.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tag.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i),
            None => {}
        }
    }
    None
}

/// Whether `tag` (without its closing `>`) opens a void element.
fn is_void_start_tag(tag: &str) -> bool {
    let name: String = tag[1..]
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(&name))
}
