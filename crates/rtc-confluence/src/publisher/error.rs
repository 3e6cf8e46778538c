//! Error types for publishing.

use crate::error::ConfluenceError;

/// Error during publish operation.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Title is blank, so no page can be matched or created.
    #[error("page title is empty")]
    EmptyTitle,

    /// Confluence API error.
    #[error("Confluence API error: {0}")]
    Confluence(#[from] ConfluenceError),
}
