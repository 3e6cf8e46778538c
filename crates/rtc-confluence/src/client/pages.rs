//! Page operations for Confluence API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use rtc_config::Representation;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::{ConfluenceClient, read_response};
use crate::error::ConfluenceError;
use crate::types::{ContentList, Page, PageSummary};

/// Page content sent on create and update.
#[derive(Clone, Copy, Debug)]
pub struct PageContent<'a> {
    /// Space key.
    pub space: &'a str,
    /// Page title.
    pub title: &'a str,
    /// Parent page ID.
    pub ancestor: Option<&'a str>,
    /// Rendered page body.
    pub body: &'a str,
    /// Representation of `body`.
    pub representation: Representation,
}

impl PageContent<'_> {
    /// Build the JSON payload shared by create and update.
    ///
    /// `ancestors` is left out when no parent is set so the server keeps the
    /// page where it is.
    pub(crate) fn to_payload(&self) -> Value {
        let mut payload = json!({
            "type": "page",
            "title": self.title,
            "space": {"key": self.space},
        });

        payload["body"][self.representation.as_str()] = json!({
            "value": self.body,
            "representation": self.representation.as_str(),
        });

        if let Some(id) = self.ancestor {
            payload["ancestors"] = json!([{"id": id}]);
        }

        payload
    }
}

/// Version number that follows `current_version`.
fn next_version(current_version: u32) -> Result<u32, ConfluenceError> {
    current_version
        .checked_add(1)
        .ok_or(ConfluenceError::VersionOverflow(current_version))
}

/// Build the payload for an update from `current_version`.
fn update_payload(
    content: &PageContent<'_>,
    current_version: u32,
    message: Option<&str>,
) -> Result<Value, ConfluenceError> {
    let mut payload = content.to_payload();
    payload["version"] = json!({"number": next_version(current_version)?});
    if let Some(msg) = message {
        payload["version"]["message"] = json!(msg);
    }
    Ok(payload)
}

/// Content listing URL filtered by space and title.
fn listing_url(content_url: &str, space: &str, title: &str) -> String {
    format!(
        "{content_url}?spaceKey={}&title={}",
        encode(space),
        encode(title)
    )
}

/// First listed page whose title equals `title` exactly.
///
/// The server title filter is not case-sensitive on every deployment.
fn exact_match(list: ContentList, title: &str) -> Option<PageSummary> {
    list.results.into_iter().find(|page| page.title == title)
}

/// Web URL for a page.
///
/// Prefers the `_links` returned by the server and falls back to the
/// `viewpage.action` URL.
fn page_web_url(base_url: &str, page: &Page) -> String {
    if let Some(links) = &page.links
        && let Some(webui) = &links.webui
    {
        let base = links.base.as_deref().unwrap_or(base_url);
        return format!("{}{}", base.trim_end_matches('/'), webui);
    }

    format!("{base_url}/pages/viewpage.action?pageId={}", page.id)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

impl ConfluenceClient {
    /// Find a page in `space` whose title equals `title` exactly.
    ///
    /// Results are matched again locally with [`exact_match`]. Only the
    /// first page of results is examined.
    pub fn find_page_by_title(
        &self,
        space: &str,
        title: &str,
    ) -> Result<Option<PageSummary>, ConfluenceError> {
        let url = listing_url(&self.content_url(), space, title);

        debug!("Listing content in space {}", space);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let list: ContentList = read_response(response)?;
        Ok(exact_match(list, title))
    }

    /// Get page by ID with optional field expansion.
    pub fn get_page(&self, page_id: &str, expand: &[&str]) -> Result<Page, ConfluenceError> {
        let mut url = format!("{}/{}", self.content_url(), encode(page_id));

        if !expand.is_empty() {
            url.push_str("?expand=");
            url.push_str(&expand.join(","));
        }

        debug!("Getting page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        read_response(response)
    }

    /// Create a new page.
    pub fn create_page(&self, content: &PageContent<'_>) -> Result<Page, ConfluenceError> {
        let url = self.content_url();
        let payload_bytes = serde_json::to_vec(&content.to_payload())?;

        info!("Creating page '{}' in space {}", content.title, content.space);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = read_response(response)?;
        info!("Created page {}", page.id);
        Ok(page)
    }

    /// Update existing page (auto-increments version).
    pub fn update_page(
        &self,
        page_id: &str,
        content: &PageContent<'_>,
        current_version: u32,
        message: Option<&str>,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/{}", self.content_url(), encode(page_id));
        let payload = update_payload(content, current_version, message)?;
        let payload_bytes = serde_json::to_vec(&payload)?;

        info!(
            "Updating page {} from version {} to {}",
            page_id, current_version, payload["version"]["number"]
        );

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = read_response(response)?;
        info!("Updated page {} to version {}", page_id, page.version.number);
        Ok(page)
    }

    /// Get web URL for page.
    #[must_use]
    pub fn page_url(&self, page: &Page) -> String {
        page_web_url(&self.base_url, page)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::{Links, Version};

    fn content(ancestor: Option<&str>, representation: Representation) -> PageContent<'_> {
        PageContent {
            space: "ENG",
            title: "widgets",
            ancestor,
            body: "<p>hi</p>",
            representation,
        }
    }

    fn page(links: Option<Links>) -> Page {
        Page {
            id: "42".to_owned(),
            content_type: "page".to_owned(),
            title: "widgets".to_owned(),
            version: Version {
                number: 1,
                message: None,
            },
            links,
        }
    }

    #[test]
    fn test_payload_without_ancestor() {
        let payload = content(None, Representation::Storage).to_payload();
        assert_eq!(
            payload,
            json!({
                "type": "page",
                "title": "widgets",
                "space": {"key": "ENG"},
                "body": {"storage": {"value": "<p>hi</p>", "representation": "storage"}}
            })
        );
    }

    #[test]
    fn test_payload_with_ancestor_and_editor_body() {
        let payload = content(Some("1001"), Representation::Editor).to_payload();
        assert_eq!(payload["ancestors"], json!([{"id": "1001"}]));
        assert_eq!(
            payload["body"],
            json!({"editor": {"value": "<p>hi</p>", "representation": "editor"}})
        );
    }

    #[test]
    fn test_update_payload_increments_version() {
        let payload = update_payload(&content(None, Representation::Storage), 7, None).unwrap();
        assert_eq!(payload["version"], json!({"number": 8}));
    }

    #[test]
    fn test_update_payload_with_message() {
        let payload = update_payload(
            &content(None, Representation::Storage),
            1,
            Some("Release 1.2"),
        )
        .unwrap();
        assert_eq!(
            payload["version"],
            json!({"number": 2, "message": "Release 1.2"})
        );
    }

    #[test]
    fn test_update_payload_version_overflow() {
        let err =
            update_payload(&content(None, Representation::Storage), u32::MAX, None).unwrap_err();
        assert!(matches!(err, ConfluenceError::VersionOverflow(u32::MAX)));
    }

    fn summary(id: &str, title: &str) -> PageSummary {
        PageSummary {
            id: id.to_owned(),
            title: title.to_owned(),
        }
    }

    #[test]
    fn test_exact_match_skips_case_variants() {
        let list = ContentList {
            results: vec![summary("1", "Widgets"), summary("2", "widgets")],
        };
        assert_eq!(exact_match(list, "widgets"), Some(summary("2", "widgets")));
    }

    #[test]
    fn test_exact_match_case_variant_only() {
        let list = ContentList {
            results: vec![summary("1", "WIDGETS")],
        };
        assert_eq!(exact_match(list, "widgets"), None);
    }

    #[test]
    fn test_exact_match_empty_listing() {
        assert_eq!(exact_match(ContentList { results: vec![] }, "widgets"), None);
    }

    #[test]
    fn test_listing_url_encodes_space_and_title() {
        assert_eq!(
            listing_url(
                "https://acme.atlassian.net/wiki/rest/api/content",
                "ENG",
                "@acme/widgets & co"
            ),
            "https://acme.atlassian.net/wiki/rest/api/content?spaceKey=ENG&title=%40acme%2Fwidgets%20%26%20co"
        );
    }

    #[test]
    fn test_page_url_from_links() {
        let page = page(Some(Links {
            base: Some("https://acme.atlassian.net/wiki".to_owned()),
            webui: Some("/spaces/ENG/pages/42/widgets".to_owned()),
        }));
        assert_eq!(
            page_web_url("https://other.example.com/wiki", &page),
            "https://acme.atlassian.net/wiki/spaces/ENG/pages/42/widgets"
        );
    }

    #[test]
    fn test_page_url_webui_without_base() {
        let page = page(Some(Links {
            base: None,
            webui: Some("/spaces/ENG/pages/42".to_owned()),
        }));
        assert_eq!(
            page_web_url("https://acme.atlassian.net/wiki", &page),
            "https://acme.atlassian.net/wiki/spaces/ENG/pages/42"
        );
    }

    #[test]
    fn test_page_url_fallback() {
        assert_eq!(
            page_web_url("https://acme.atlassian.net/wiki", &page(None)),
            "https://acme.atlassian.net/wiki/pages/viewpage.action?pageId=42"
        );
    }

    #[test]
    fn test_encode_title() {
        assert_eq!(encode("my widgets & co"), "my%20widgets%20%26%20co");
        assert_eq!(encode("@scope/pkg"), "%40scope%2Fpkg");
    }
}
