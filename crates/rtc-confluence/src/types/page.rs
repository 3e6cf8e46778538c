//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page as returned by the content API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default)]
    pub message: Option<String>,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Links {
    /// Site base URL (present on single-content responses).
    #[serde(default)]
    pub base: Option<String>,
    /// Web UI link, relative to the base URL.
    #[serde(default)]
    pub webui: Option<String>,
}

/// Entry in a content listing.
///
/// Listings are requested without expansion, so only the identity fields
/// are guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageSummary {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
}

/// Content listing response.
///
/// Serde ignores `start`, `limit`, `size` and `_links`; only the first
/// page of results is ever examined.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentList {
    /// Listed content.
    pub results: Vec<PageSummary>,
}
