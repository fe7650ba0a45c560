// Library exports for the Pokédex catalog browser
pub mod catalog;
pub mod config;

// Re-export key types for convenience
pub use catalog::{
    CatalogBrowser, CatalogError, CatalogSnapshot, CatalogSource, Endpoints, Entity, LoadOutcome,
    MockCatalogSource, SearchOutcome, SearchTerm, Viewport,
};
#[cfg(feature = "native")]
pub use catalog::HttpCatalogSource;
pub use config::BrowserConfig;
