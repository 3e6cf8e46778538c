//! Confluence publishing for readme2confluence.
//!
//! This crate provides:
//! - [`ConfluenceClient`]: sync REST client authenticated with Basic credentials
//! - [`PageRenderer`]: readme to page body conversion (storage or editor HTML)
//! - [`PagePublisher`]: the create-or-update workflow over any [`PageApi`]

mod api;
mod backend;
mod client;
mod error;
mod publisher;
mod renderer;
mod types;

pub use api::PageApi;
pub use backend::ConfluenceBackend;
pub use client::{ConfluenceClient, PageContent};
pub use error::ConfluenceError;
pub use publisher::{
    DryRunResult, PagePublisher, PublishAction, PublishConfig, PublishError, PublishRequest,
    PublishResult,
};
pub use renderer::{BANNER, PageRenderer, with_banner};
pub use types::{ContentList, Links, Page, PageSummary, Version};
