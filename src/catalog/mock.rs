//! Scripted in-memory source for tests and offline demos.

use super::error::CatalogError;
use super::source::CatalogSource;
use super::types::{DetailRecord, ListPage, ListReference};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// A request observed by [`MockCatalogSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Page(String),
    Detail(String),
}

/// Mock source for testing without network calls
///
/// Responses are keyed by URL. Unknown URLs answer with
/// [`CatalogError::NotFound`]. Every request is recorded.
#[derive(Debug, Default)]
pub struct MockCatalogSource {
    pages: Mutex<HashMap<String, Result<ListPage, CatalogError>>>,
    details: Mutex<HashMap<String, Result<DetailRecord, CatalogError>>>,
    calls: Mutex<Vec<MockCall>>,
    page_gate: Mutex<Option<Arc<Notify>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `page` at `url`, replacing any earlier response.
    pub fn add_page(&self, url: impl Into<String>, page: ListPage) -> &Self {
        lock(&self.pages).insert(url.into(), Ok(page));
        self
    }

    /// Fail the page fetch at `url` with `error`.
    pub fn add_page_error(&self, url: impl Into<String>, error: CatalogError) -> &Self {
        lock(&self.pages).insert(url.into(), Err(error));
        self
    }

    /// Serve `detail` at `url`.
    pub fn add_detail(&self, url: impl Into<String>, detail: DetailRecord) -> &Self {
        lock(&self.details).insert(url.into(), Ok(detail));
        self
    }

    /// Fail the detail fetch at `url` with `error`.
    pub fn add_detail_error(&self, url: impl Into<String>, error: CatalogError) -> &Self {
        lock(&self.details).insert(url.into(), Err(error));
        self
    }

    /// Serve a page of `details` at `url`, with each detail also reachable at
    /// `<detail_base>/<id>/` (list shape) and `<detail_base>/<name>` (search shape).
    pub fn add_detail_page(
        &self,
        url: impl Into<String>,
        detail_base: &str,
        details: Vec<DetailRecord>,
        next: Option<String>,
    ) -> &Self {
        let base = detail_base.trim_end_matches('/');
        let mut results = Vec::with_capacity(details.len());
        for detail in details {
            let by_id = format!("{}/{}/", base, detail.id);
            let by_name = format!("{}/{}", base, detail.name);
            results.push(ListReference::new(detail.name.clone(), by_id.clone()));
            self.add_detail(by_id, detail.clone());
            self.add_detail(by_name, detail);
        }
        self.add_page(url, ListPage::new(results, next))
    }

    /// Make subsequent page fetches wait for a permit on the returned handle.
    pub fn hold_pages(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *lock(&self.page_gate) = Some(Arc::clone(&gate));
        gate
    }

    /// Stop holding page fetches.
    pub fn release_pages(&self) {
        *lock(&self.page_gate) = None;
    }

    /// All requests seen so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn page_calls(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| matches!(c, MockCall::Page(_)))
            .count()
    }

    pub fn detail_calls(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| matches!(c, MockCall::Detail(_)))
            .count()
    }
}

#[async_trait::async_trait]
impl CatalogSource for MockCatalogSource {
    async fn fetch_page(&self, url: &str) -> Result<ListPage, CatalogError> {
        lock(&self.calls).push(MockCall::Page(url.to_string()));

        let gate = lock(&self.page_gate).clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match lock(&self.pages).get(url) {
            Some(response) => response.clone(),
            None => Err(CatalogError::not_found(url)),
        }
    }

    async fn fetch_detail(&self, url: &str) -> Result<DetailRecord, CatalogError> {
        lock(&self.calls).push(MockCall::Detail(url.to_string()));

        match lock(&self.details).get(url) {
            Some(response) => response.clone(),
            None => Err(CatalogError::not_found(url)),
        }
    }
}
