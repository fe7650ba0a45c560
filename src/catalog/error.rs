//! Error taxonomy shared by the catalog loader and the search resolver.

/// Failure surfaced by a page load or a search.
///
/// Every variant maps to one human-readable line via [`CatalogError::user_message`];
/// the presentation layer shows that line and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Transport failure (DNS, connection reset, TLS).
    #[error("Network error while fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The requested resource does not exist upstream.
    #[error("Pokémon not found.")]
    NotFound { resource: String },

    /// Non-success status on a page or detail fetch.
    #[error("Request to {url} failed with HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body could not be decoded into the expected shape.
    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("An unknown error has occurred.")]
    Unknown,
}

impl CatalogError {
    pub fn network(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn decode(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Single-line message for the shared error banner.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether the upstream answered with a non-success status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Status { .. })
    }
}
