//! Trait-based markdown renderer with pluggable backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] that walks
//! `pulldown-cmark` events and delegates format-specific output to a
//! [`RenderBackend`]:
//! - [`HtmlBackend`]: plain HTML5
//!
//! The Confluence storage format backend lives in the `rtc-confluence` crate.
//!
//! # Example
//!
//! ```
//! use rtc_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new().render_markdown("## Hello\n\n**Bold** text");
//! assert_eq!(result.toc.len(), 1);
//! ```

mod backend;
mod heading;
mod html;
mod markup;
mod renderer;

pub use backend::{AlertKind, RenderBackend};
pub use heading::TocEntry;
pub use html::HtmlBackend;
pub use markup::{close_void_tags, escape_html};
pub use renderer::{MarkdownRenderer, RenderResult};
