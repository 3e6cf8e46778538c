//! Page API abstraction.
//!
//! [`PageApi`] is the set of content operations the publisher needs.
//! [`ConfluenceClient`] implements it over HTTP.

use crate::client::{ConfluenceClient, PageContent};
use crate::error::ConfluenceError;
use crate::types::{Page, PageSummary};

/// Content operations used to publish a page.
pub trait PageApi {
    /// Find a page in `space` whose title equals `title` exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing request fails.
    fn find_page_by_title(
        &self,
        space: &str,
        title: &str,
    ) -> Result<Option<PageSummary>, ConfluenceError>;

    /// Get page by ID with optional field expansion.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched.
    fn get_page(&self, page_id: &str, expand: &[&str]) -> Result<Page, ConfluenceError>;

    /// Create a new page.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the page.
    fn create_page(&self, content: &PageContent<'_>) -> Result<Page, ConfluenceError>;

    /// Replace the page body, sending `current_version + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the update.
    fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        current_version: u32,
        message: Option<&str>,
    ) -> Result<Page, ConfluenceError>;

    /// Web URL for a page.
    fn page_url(&self, page: &Page) -> String;
}

impl PageApi for ConfluenceClient {
    fn find_page_by_title(
        &self,
        space: &str,
        title: &str,
    ) -> Result<Option<PageSummary>, ConfluenceError> {
        ConfluenceClient::find_page_by_title(self, space, title)
    }

    fn get_page(&self, page_id: &str, expand: &[&str]) -> Result<Page, ConfluenceError> {
        ConfluenceClient::get_page(self, page_id, expand)
    }

    fn create_page(&self, content: &PageContent<'_>) -> Result<Page, ConfluenceError> {
        ConfluenceClient::create_page(self, content)
    }

    fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        current_version: u32,
        message: Option<&str>,
    ) -> Result<Page, ConfluenceError> {
        ConfluenceClient::update_page(self, page_id, content, current_version, message)
    }

    fn page_url(&self, page: &Page) -> String {
        ConfluenceClient::page_url(self, page)
    }
}
