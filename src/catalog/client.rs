//! HTTP implementation of [`CatalogSource`] over reqwest.

use super::error::CatalogError;
use super::source::CatalogSource;
use super::types::{DetailRecord, ListPage};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the PokeAPI list and detail endpoints
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
}

impl HttpCatalogSource {
    /// Create a client with a custom user agent and optional request timeout.
    ///
    /// Without a timeout the transport's own defaults apply.
    pub fn builder(user_agent: &str, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::network("<client>", e))?;
        Ok(Self { client })
    }

    /// GET + status check + JSON parse.
    async fn fetch_and_parse<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::not_found(url));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| classify(url, e))
    }
}

/// Map a reqwest failure onto the catalog error taxonomy.
///
/// Transport failures are `Network`, undecodable bodies are `Decode`;
/// anything else (malformed URL, redirect loop) is `Unknown`.
fn classify(url: &str, err: reqwest::Error) -> CatalogError {
    if err.is_decode() {
        CatalogError::decode(url, err)
    } else if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
        CatalogError::network(url, err)
    } else {
        tracing::warn!(url, error = %err, "Unclassified transport error");
        CatalogError::Unknown
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    #[instrument(name = "catalog.http.page", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<ListPage, CatalogError> {
        let page: ListPage = self.fetch_and_parse(url).await?;
        debug!(results = page.results.len(), has_next = page.next.is_some(), "Page fetched");
        Ok(page)
    }

    #[instrument(name = "catalog.http.detail", skip(self))]
    async fn fetch_detail(&self, url: &str) -> Result<DetailRecord, CatalogError> {
        self.fetch_and_parse(url).await
    }
}
