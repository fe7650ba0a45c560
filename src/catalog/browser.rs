//! Catalog browser state machine
//!
//! Owns the loaded collection, the pagination cursor and the active search
//! term, and drives the two operations that write into them:
//!
//! - **Catalog loader** (`load_next_page`): fetches the page at the cursor,
//!   resolves every listed reference concurrently and appends the whole page
//!   at once. A failure appends nothing and leaves the cursor in place.
//! - **Search resolver** (`search`): normalizes the query, shows an already
//!   loaded entity without touching the network, otherwise fetches the
//!   detail resource by name and appends it.
//!
//! ## Concurrency
//!
//! All state sits behind one mutex that is never held across an await.
//! Completions re-acquire it and merge into whatever the state is at that
//! point. The loader's in-flight guard is the only exclusion and does not
//! involve the search resolver.
//!
//! ## Observability
//!
//! - `catalog.load_page` - page load (cursor, result_count)
//! - `catalog.search` - search submission (query, cache_hit)

use super::collection::Collection;
use super::error::CatalogError;
use super::filter::{self, SearchTerm};
use super::source::{CatalogSource, Endpoints};
use super::types::{normalize_name, Entity};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Distance from the document bottom that triggers the next page load.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 300.0;

// ============================================================================
// Status
// ============================================================================

/// Which operation a status or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Loader,
    Search,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loader => write!(f, "loader"),
            Self::Search => write!(f, "search"),
        }
    }
}

/// Loading and error state of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpStatus {
    pending: usize,
    error: Option<String>,
    /// Logical clock value of the last recorded error.
    error_at: u64,
}

impl OpStatus {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Loading/error flags composed for the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBanner {
    /// Either operation has a request outstanding.
    pub loading: bool,
    /// Most recently recorded error, if still standing.
    pub error: Option<String>,
}

impl StatusBanner {
    fn compose(loader: &OpStatus, search: &OpStatus) -> Self {
        let error = match (&loader.error, &search.error) {
            (Some(l), Some(s)) => {
                if loader.error_at >= search.error_at {
                    Some(l.clone())
                } else {
                    Some(s.clone())
                }
            }
            (Some(l), None) => Some(l.clone()),
            (None, Some(s)) => Some(s.clone()),
            (None, None) => None,
        };
        Self {
            loading: loader.is_loading() || search.is_loading(),
            error,
        }
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Scroll geometry reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub inner_height: f64,
    pub scroll_y: f64,
    pub document_height: f64,
}

impl Viewport {
    pub fn new(inner_height: f64, scroll_y: f64, document_height: f64) -> Self {
        Self {
            inner_height,
            scroll_y,
            document_height,
        }
    }

    /// Viewport scrolled all the way down.
    pub fn at_bottom(inner_height: f64, document_height: f64) -> Self {
        Self::new(
            inner_height,
            (document_height - inner_height).max(0.0),
            document_height,
        )
    }

    /// True when the bottom of the viewport is within `threshold` of the
    /// document's bottom edge.
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.inner_height + self.scroll_y >= self.document_height - threshold
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Why a page load did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another page load is in flight.
    InFlight,
    /// The cursor is exhausted.
    Exhausted,
    /// Scroll position is not near the bottom.
    NotNearBottom,
    /// The browser has been unmounted.
    Unmounted,
}

/// Result of a page load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded {
        /// Entities appended to the collection.
        inserted: usize,
        /// Entities dropped because their name was already loaded.
        duplicates: usize,
        /// The listing has no further pages.
        exhausted: bool,
    },
    Skipped(SkipReason),
    Failed(CatalogError),
    /// Completed after unmount; the result was dropped.
    Discarded,
}

/// Result of a search submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query: the full collection is visible again.
    ShowAll,
    /// The name was already loaded; no request was made.
    AlreadyLoaded,
    /// Resolved from the detail endpoint.
    Fetched { entity: Entity, inserted: bool },
    Failed(CatalogError),
    /// Submitted or completed after unmount.
    Discarded,
}

// ============================================================================
// Snapshot
// ============================================================================

/// Point-in-time copy of the browser state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub entities: Vec<Entity>,
    pub visible: Vec<Entity>,
    pub term: SearchTerm,
    pub cursor: Option<String>,
    pub loader: OpStatus,
    pub search: OpStatus,
    pub banner: StatusBanner,
}

impl CatalogSnapshot {
    /// The "back to all" affordance is shown only while a search is active.
    pub fn search_active(&self) -> bool {
        !self.term.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug)]
struct BrowserState {
    collection: Collection,
    cursor: Option<String>,
    term: SearchTerm,
    loader: OpStatus,
    search: OpStatus,
    clock: u64,
    unmounted: bool,
}

impl BrowserState {
    fn new(first_page: String) -> Self {
        Self {
            collection: Collection::new(),
            cursor: Some(first_page),
            term: SearchTerm::empty(),
            loader: OpStatus::default(),
            search: OpStatus::default(),
            clock: 0,
            unmounted: false,
        }
    }

    fn status_mut(&mut self, op: Operation) -> &mut OpStatus {
        match op {
            Operation::Loader => &mut self.loader,
            Operation::Search => &mut self.search,
        }
    }

    /// Errors overwrite; they never stack.
    fn record_error(&mut self, op: Operation, err: &CatalogError) {
        self.clock += 1;
        let at = self.clock;
        let status = self.status_mut(op);
        status.error = Some(err.user_message());
        status.error_at = at;
    }

    fn clear_error(&mut self, op: Operation) {
        self.status_mut(op).error = None;
    }
}

fn lock(state: &Mutex<BrowserState>) -> MutexGuard<'_, BrowserState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks one request of `op` as outstanding until disarmed or dropped.
///
/// Dropping an armed guard (for example when the caller abandons the future)
/// still releases the pending count.
struct PendingGuard<'a> {
    state: &'a Mutex<BrowserState>,
    op: Operation,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn acquire(state: &'a Mutex<BrowserState>, locked: &mut BrowserState, op: Operation) -> Self {
        locked.status_mut(op).pending += 1;
        Self {
            state,
            op,
            armed: true,
        }
    }

    fn release(mut self, locked: &mut BrowserState) {
        let status = locked.status_mut(self.op);
        status.pending = status.pending.saturating_sub(1);
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut locked = lock(self.state);
            let status = locked.status_mut(self.op);
            status.pending = status.pending.saturating_sub(1);
        }
    }
}

// ============================================================================
// Browser
// ============================================================================

/// Paginated catalog with exact-name search.
///
/// Cloning yields another handle onto the same state.
pub struct CatalogBrowser<S> {
    source: Arc<S>,
    endpoints: Endpoints,
    scroll_threshold: f64,
    state: Arc<Mutex<BrowserState>>,
}

impl<S> Clone for CatalogBrowser<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            endpoints: self.endpoints.clone(),
            scroll_threshold: self.scroll_threshold,
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> std::fmt::Debug for CatalogBrowser<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogBrowser")
            .field("endpoints", &self.endpoints)
            .field("scroll_threshold", &self.scroll_threshold)
            .finish_non_exhaustive()
    }
}

impl<S: CatalogSource> CatalogBrowser<S> {
    /// Create an empty browser whose cursor points at the first list page.
    pub fn new(source: Arc<S>, endpoints: Endpoints) -> Self {
        let state = BrowserState::new(endpoints.list_url.clone());
        Self {
            source,
            endpoints,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn with_scroll_threshold(mut self, threshold: f64) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    // ------------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------------

    /// Initial load, run once when the browser is shown.
    pub async fn mount(&self) -> LoadOutcome {
        debug!("Mounting catalog browser");
        self.load_next_page().await
    }

    /// Load the next page if `viewport` is near the bottom of the document.
    pub async fn on_scroll(&self, viewport: Viewport) -> LoadOutcome {
        if !viewport.near_bottom(self.scroll_threshold) {
            return LoadOutcome::Skipped(SkipReason::NotNearBottom);
        }
        self.load_next_page().await
    }

    /// Stop accepting results. Requests already in flight complete and are
    /// dropped.
    pub fn unmount(&self) {
        lock(&self.state).unmounted = true;
        debug!("Catalog browser unmounted");
    }

    // ------------------------------------------------------------------------
    // Catalog loader
    // ------------------------------------------------------------------------

    /// Fetch the page at the cursor and append all of its entities.
    ///
    /// No-op while another load is in flight or once the cursor is exhausted.
    #[instrument(name = "catalog.load_page", skip(self), fields(
        cursor = tracing::field::Empty,
        result_count = tracing::field::Empty
    ))]
    pub async fn load_next_page(&self) -> LoadOutcome {
        let (cursor, guard) = {
            let mut state = lock(&self.state);
            if state.unmounted {
                return LoadOutcome::Skipped(SkipReason::Unmounted);
            }
            if state.loader.is_loading() {
                debug!("Page load already in flight");
                return LoadOutcome::Skipped(SkipReason::InFlight);
            }
            let Some(cursor) = state.cursor.clone() else {
                debug!("Catalog exhausted");
                return LoadOutcome::Skipped(SkipReason::Exhausted);
            };
            let guard = PendingGuard::acquire(&self.state, &mut state, Operation::Loader);
            (cursor, guard)
        };
        tracing::Span::current().record("cursor", cursor.as_str());

        let result = self.fetch_page_entities(&cursor).await;

        let mut state = lock(&self.state);
        guard.release(&mut state);
        if state.unmounted {
            debug!("Discarding page loaded after unmount");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok((entities, next)) => {
                let fetched = entities.len();
                let inserted = state.collection.extend_batch(entities);
                state.cursor = next;
                state.clear_error(Operation::Loader);
                tracing::Span::current().record("result_count", fetched);
                info!(
                    inserted,
                    total = state.collection.len(),
                    exhausted = state.cursor.is_none(),
                    "Page appended"
                );
                LoadOutcome::Loaded {
                    inserted,
                    duplicates: fetched - inserted,
                    exhausted: state.cursor.is_none(),
                }
            }
            Err(err) => {
                warn!(error = %err, "Page load failed; cursor kept for retry");
                state.record_error(Operation::Loader, &err);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Page fetch plus concurrent detail fetches; all-or-nothing.
    async fn fetch_page_entities(
        &self,
        cursor: &str,
    ) -> Result<(Vec<Entity>, Option<String>), CatalogError> {
        let page = self.source.fetch_page(cursor).await?;
        let details = futures::future::try_join_all(
            page.results
                .iter()
                .map(|reference| self.source.fetch_detail(&reference.url)),
        )
        .await?;

        let entities = page
            .results
            .iter()
            .zip(details)
            .map(|(reference, detail)| Entity::from_reference(reference, detail))
            .collect();
        Ok((entities, page.next))
    }

    // ------------------------------------------------------------------------
    // Search resolver
    // ------------------------------------------------------------------------

    /// Submit a search.
    ///
    /// The normalized query becomes the active term even when the lookup
    /// fails, leaving an empty visible set rather than the full catalog.
    #[instrument(name = "catalog.search", skip(self, raw_query), fields(
        query = tracing::field::Empty,
        cache_hit = tracing::field::Empty
    ))]
    pub async fn search(&self, raw_query: &str) -> SearchOutcome {
        let term = SearchTerm::parse(raw_query);
        tracing::Span::current().record("query", term.as_str());

        let guard = {
            let mut state = lock(&self.state);
            if state.unmounted {
                return SearchOutcome::Discarded;
            }
            state.term = term.clone();
            if term.is_empty() {
                state.clear_error(Operation::Search);
                return SearchOutcome::ShowAll;
            }
            if state.collection.contains(term.as_str()) {
                debug!("Search hit in loaded collection");
                state.clear_error(Operation::Search);
                tracing::Span::current().record("cache_hit", true);
                return SearchOutcome::AlreadyLoaded;
            }
            PendingGuard::acquire(&self.state, &mut state, Operation::Search)
        };
        tracing::Span::current().record("cache_hit", false);

        let url = self.endpoints.detail_url(term.as_str());
        let result = self.source.fetch_detail(&url).await;

        let mut state = lock(&self.state);
        guard.release(&mut state);
        if state.unmounted {
            debug!("Discarding search result after unmount");
            return SearchOutcome::Discarded;
        }

        match result {
            Ok(detail) => {
                let url = self.endpoints.detail_url(&normalize_name(&detail.name));
                let entity = Entity::from_detail(detail, url);
                let inserted = state.collection.insert(entity.clone());
                state.clear_error(Operation::Search);
                info!(name = %entity.name, inserted, "Search resolved");
                SearchOutcome::Fetched { entity, inserted }
            }
            Err(err) => {
                let err = if err.is_status() {
                    CatalogError::not_found(term.as_str())
                } else {
                    err
                };
                warn!(error = %err, "Search failed");
                state.record_error(Operation::Search, &err);
                SearchOutcome::Failed(err)
            }
        }
    }

    /// Reset the active term; loaded data is kept.
    pub fn clear_search(&self) {
        lock(&self.state).term = SearchTerm::empty();
    }

    // ------------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------------

    /// Entities visible under the active term.
    pub fn visible(&self) -> Vec<Entity> {
        let state = lock(&self.state);
        filter::visible(&state.collection, &state.term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Every loaded entity in discovery order.
    pub fn entities(&self) -> Vec<Entity> {
        lock(&self.state).collection.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).collection.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).collection.is_empty()
    }

    pub fn cursor(&self) -> Option<String> {
        lock(&self.state).cursor.clone()
    }

    pub fn search_term(&self) -> SearchTerm {
        lock(&self.state).term.clone()
    }

    pub fn status(&self, op: Operation) -> OpStatus {
        let state = lock(&self.state);
        match op {
            Operation::Loader => state.loader.clone(),
            Operation::Search => state.search.clone(),
        }
    }

    pub fn banner(&self) -> StatusBanner {
        let state = lock(&self.state);
        StatusBanner::compose(&state.loader, &state.search)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = lock(&self.state);
        CatalogSnapshot {
            entities: state.collection.iter().cloned().collect(),
            visible: filter::visible(&state.collection, &state.term)
                .into_iter()
                .cloned()
                .collect(),
            term: state.term.clone(),
            cursor: state.cursor.clone(),
            loader: state.loader.clone(),
            search: state.search.clone(),
            banner: StatusBanner::compose(&state.loader, &state.search),
        }
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
