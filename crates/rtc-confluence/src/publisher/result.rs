//! Result types for publish operations.

use rtc_config::Representation;

use crate::types::Page;

/// What a publish did to the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishAction {
    /// A new page was created.
    Created,
    /// An existing page was updated.
    Updated {
        /// Version before the update.
        previous_version: u32,
    },
}

/// Result of a successful publish.
#[derive(Debug)]
pub struct PublishResult {
    /// Created or updated.
    pub action: PublishAction,
    /// Page as returned by the server.
    pub page: Page,
    /// URL to view the page.
    pub url: String,
}

/// Result of a dry-run operation (no changes made).
#[derive(Debug)]
pub struct DryRunResult {
    /// Title the page would have.
    pub title: String,
    /// Rendered page body.
    pub html: String,
    /// Representation of `html`.
    pub representation: Representation,
    /// ID of the page that would be updated.
    pub existing_page_id: Option<String>,
    /// Current version of the page that would be updated.
    pub current_version: Option<u32>,
}

impl DryRunResult {
    /// Whether a publish would create a new page.
    #[must_use]
    pub fn would_create(&self) -> bool {
        self.existing_page_id.is_none()
    }

    /// Version number the page would have after publishing.
    #[must_use]
    pub fn next_version(&self) -> u32 {
        self.current_version.map_or(1, |version| version.saturating_add(1))
    }
}
