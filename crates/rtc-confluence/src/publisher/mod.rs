//! Readme publisher for Confluence.
//!
//! This module provides the [`PagePublisher`] struct that encapsulates the
//! create-or-update workflow for a readme:
//!
//! 1. Look up a page with the same title in the space
//! 2. Render the readme (with banner) to the configured representation
//! 3. Create the page, or update it with the next version number
//!
//! # Example
//!
//! ```ignore
//! use rtc_confluence::{ConfluenceClient, PagePublisher, PublishConfig, PublishRequest};
//!
//! let client = ConfluenceClient::from_config(&settings.base_url, &settings.username, &settings.api_key);
//! let publisher = PagePublisher::new(&client, PublishConfig::from(&settings));
//!
//! let request = PublishRequest { title: "widgets", readme: "# widgets", message: None };
//! let result = publisher.publish(&request)?;
//! println!("Published: {}", result.url);
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::PagePublisher;
pub use result::{DryRunResult, PublishAction, PublishResult};

use rtc_config::{ConfluenceSettings, Representation};

/// Where and how pages are published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishConfig {
    /// Space key.
    pub space: String,
    /// Parent page ID.
    pub ancestor: Option<String>,
    /// Body representation.
    pub representation: Representation,
    /// Prepend a table of contents macro.
    pub toc: bool,
}

impl From<&ConfluenceSettings> for PublishConfig {
    fn from(settings: &ConfluenceSettings) -> Self {
        Self {
            space: settings.space.clone(),
            ancestor: settings.ancestor.clone(),
            representation: settings.representation,
            toc: settings.toc,
        }
    }
}

/// A readme to publish.
#[derive(Clone, Copy, Debug)]
pub struct PublishRequest<'a> {
    /// Page title used for lookup and creation.
    pub title: &'a str,
    /// Readme markdown (without banner).
    pub readme: &'a str,
    /// Version message recorded on update.
    pub message: Option<&'a str>,
}
