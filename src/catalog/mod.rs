//! Pokémon catalog
//!
//! Pages through the PokeAPI list endpoint, resolves exact-name searches
//! against the detail endpoint, and derives the visible set from the
//! active search term.
//!
//! Features:
//! - All-or-nothing page loads with concurrent detail fetches
//! - Name-keyed, insertion-ordered collection
//! - Per-operation loading/error status
//! - Mock source for offline testing

mod browser;
#[cfg(feature = "native")]
mod client;
mod collection;
mod error;
mod filter;
mod mock;
mod source;
mod types;

pub use browser::{
    CatalogBrowser, CatalogSnapshot, LoadOutcome, OpStatus, Operation, SearchOutcome, SkipReason,
    StatusBanner, Viewport, DEFAULT_SCROLL_THRESHOLD,
};
#[cfg(feature = "native")]
pub use client::HttpCatalogSource;
pub use collection::Collection;
pub use error::CatalogError;
pub use filter::{visible, SearchTerm};
pub use mock::{MockCall, MockCatalogSource};
pub use source::{CatalogSource, Endpoints};
pub use types::{
    id_from_url, normalize_name, AbilitySlot, DetailRecord, Entity, ListPage, ListReference,
    NamedResource, TypeSlot,
};
