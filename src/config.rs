use crate::catalog::Endpoints;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pokédex browser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Configuration file version
    pub version: String,

    /// Upstream REST catalog
    pub api: ApiConfig,

    /// Sprite image host
    pub sprites: SpriteConfig,

    /// Scroll-triggered loading
    pub scroll: ScrollConfig,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            api: ApiConfig::default(),
            sprites: SpriteConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root
    pub base_url: String,

    /// Resource collection under the root, listed and addressed by name
    pub resource: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Per-request timeout; unset leaves the transport defaults in place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            resource: "pokemon".to_string(),
            user_agent: concat!("pokedex-browser/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.base_url, &self.resource)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    /// Images are served as `<base_url>/<id>.png`
    pub base_url: String,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Distance from the document bottom that triggers the next page
    pub threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: crate::catalog::DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

impl BrowserConfig {
    /// Load configuration from TOML file
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
