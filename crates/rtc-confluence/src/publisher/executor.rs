//! Page publisher implementation.

use tracing::info;

use crate::api::PageApi;
use crate::client::PageContent;
use crate::renderer::PageRenderer;

use super::error::PublishError;
use super::result::{DryRunResult, PublishAction, PublishResult};
use super::{PublishConfig, PublishRequest};

/// Handles publishing readmes to Confluence pages.
pub struct PagePublisher<'a, A: PageApi> {
    api: &'a A,
    config: PublishConfig,
}

impl<'a, A: PageApi> PagePublisher<'a, A> {
    /// Create a new page publisher.
    #[must_use]
    pub fn new(api: &'a A, config: PublishConfig) -> Self {
        Self { api, config }
    }

    /// Publish a readme, creating the page or updating it in place.
    ///
    /// This method:
    /// 1. Looks up a page with exactly the request title in the space
    /// 2. Renders the readme with the generated-content banner
    /// 3. Creates the page, or fetches its version and updates it to the next one
    ///
    /// An update keeps the title the server reports for the page.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the title is blank
    /// - any Confluence API call fails
    pub fn publish(&self, request: &PublishRequest<'_>) -> Result<PublishResult, PublishError> {
        let title = Self::checked_title(request.title)?;

        info!("Retrieving existing pages");
        let existing = self.api.find_page_by_title(&self.config.space, title)?;

        let rendered = self.renderer().render(request.readme);

        let (action, page) = if let Some(summary) = existing {
            info!("Found existing content, fetching details");
            let current = self.api.get_page(&summary.id, &["version"])?;
            let version = current.version.number;
            info!("Existing page version {}", version);

            info!("Updating existing page");
            let content = self.content(&current.title, &rendered.html);
            let page = self
                .api
                .update_page(&current.id, &content, version, request.message)?;
            (
                PublishAction::Updated {
                    previous_version: version,
                },
                page,
            )
        } else {
            info!("Creating new page");
            let content = self.content(title, &rendered.html);
            (PublishAction::Created, self.api.create_page(&content)?)
        };

        let url = self.api.page_url(&page);

        Ok(PublishResult { action, page, url })
    }

    /// Perform a dry-run publish (no changes made).
    ///
    /// Runs the same lookups as [`publish`](Self::publish) and renders the
    /// body, but never creates or updates the page.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the title is blank
    /// - any Confluence API call fails
    pub fn dry_run(&self, request: &PublishRequest<'_>) -> Result<DryRunResult, PublishError> {
        let title = Self::checked_title(request.title)?;

        info!("Retrieving existing pages");
        let existing = match self.api.find_page_by_title(&self.config.space, title)? {
            Some(summary) => {
                info!("Found existing content, fetching details");
                Some(self.api.get_page(&summary.id, &["version"])?)
            }
            None => None,
        };

        let rendered = self.renderer().render(request.readme);

        Ok(DryRunResult {
            title: existing
                .as_ref()
                .map_or_else(|| title.to_owned(), |page| page.title.clone()),
            html: rendered.html,
            representation: self.config.representation,
            current_version: existing.as_ref().map(|page| page.version.number),
            existing_page_id: existing.map(|page| page.id),
        })
    }

    fn checked_title(title: &str) -> Result<&str, PublishError> {
        if title.trim().is_empty() {
            return Err(PublishError::EmptyTitle);
        }
        Ok(title)
    }

    fn renderer(&self) -> PageRenderer {
        PageRenderer::new(self.config.representation).prepend_toc(self.config.toc)
    }

    fn content<'c>(&'c self, title: &'c str, body: &'c str) -> PageContent<'c> {
        PageContent {
            space: &self.config.space,
            title,
            ancestor: self.config.ancestor.as_deref(),
            body,
            representation: self.config.representation,
        }
    }
}
