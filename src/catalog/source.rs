//! Seam between the browser state machine and the upstream REST service.

use super::error::CatalogError;
use super::types::{DetailRecord, ListPage};

/// Addresses of the list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// First page of the list endpoint; the initial pagination cursor.
    pub list_url: String,
    /// Detail resources live at `<detail_base>/<name-or-id>`.
    pub detail_base: String,
}

impl Endpoints {
    /// Endpoints for `resource` under the API root `base_url`.
    pub fn new(base_url: &str, resource: &str) -> Self {
        let root = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            resource.trim_matches('/')
        );
        Self {
            list_url: root.clone(),
            detail_base: root,
        }
    }

    /// Detail URL for a normalized name.
    pub fn detail_url(&self, name: &str) -> String {
        format!("{}/{}", self.detail_base, name)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new("https://pokeapi.co/api/v2", "pokemon")
    }
}

/// Upstream catalog collaborator.
///
/// Implemented over HTTP by [`super::HttpCatalogSource`] and in memory by
/// [`super::MockCatalogSource`].
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of the list endpoint at `url`.
    async fn fetch_page(&self, url: &str) -> Result<ListPage, CatalogError>;

    /// Fetch a detail resource at `url`.
    async fn fetch_detail(&self, url: &str) -> Result<DetailRecord, CatalogError>;
}
