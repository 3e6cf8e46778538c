//! Confluence API types.

mod page;

pub use page::{ContentList, Links, Page, PageSummary, Version};
