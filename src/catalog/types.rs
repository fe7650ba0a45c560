//! Wire types for the PokeAPI list/detail endpoints and the normalized
//! [`Entity`] the browser consumes.

use serde::{Deserialize, Serialize};

/// Lightweight pointer to a detail resource, produced by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReference {
    pub name: String,
    pub url: String,
}

impl ListReference {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Entity id parsed from the trailing path segment of the reference URL.
    pub fn id(&self) -> Option<&str> {
        id_from_url(&self.url)
    }
}

/// One page of the paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage {
    pub results: Vec<ListReference>,
    /// Next-page cursor, `None` once the listing is exhausted.
    pub next: Option<String>,
}

impl ListPage {
    pub fn new(results: Vec<ListReference>, next: Option<String>) -> Self {
        Self { results, next }
    }
}

/// Named resource link as it appears inside detail payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NamedResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// `{ "type": { "name", "url" } }` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// `{ "ability": { "name" } }` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

/// Raw detail-endpoint response. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub name: String,
    pub id: u64,
    pub weight: u32,
    pub height: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

impl DetailRecord {
    /// Create a record with no types or abilities.
    pub fn new(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: name.into(),
            id,
            weight: 0,
            height: 0,
            types: Vec::new(),
            abilities: Vec::new(),
        }
    }

    pub fn with_measurements(mut self, weight: u32, height: u32) -> Self {
        self.weight = weight;
        self.height = height;
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types
            .into_iter()
            .map(|name| TypeSlot {
                kind: NamedResource::new(name),
            })
            .collect();
        self
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities
            .into_iter()
            .map(|name| AbilitySlot {
                ability: NamedResource::new(name),
            })
            .collect();
        self
    }

    /// Normalize into an [`Entity`] with the given id and URL.
    pub fn into_entity(self, id: String, url: String) -> Entity {
        Entity {
            name: self.name,
            id,
            url,
            types: self.types.into_iter().map(|t| t.kind.name).collect(),
            weight: self.weight,
            height: self.height,
            abilities: self.abilities.into_iter().map(|a| a.ability.name).collect(),
        }
    }
}

/// Normalized catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub id: String,
    pub url: String,
    pub types: Vec<String>,
    pub weight: u32,
    pub height: u32,
    pub abilities: Vec<String>,
}

impl Entity {
    /// Pagination path: the id comes from the reference URL, not the body.
    pub fn from_reference(reference: &ListReference, detail: DetailRecord) -> Self {
        let id = reference
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| detail.id.to_string());
        detail.into_entity(id, reference.url.clone())
    }

    /// Search path: the id comes from the payload's numeric id.
    pub fn from_detail(detail: DetailRecord, url: String) -> Self {
        let id = detail.id.to_string();
        detail.into_entity(id, url)
    }

    /// Lowercased name, the collection key.
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Sprite image location under `base`, addressed as `<id>.png`.
    pub fn sprite_url(&self, base: &str) -> String {
        format!("{}/{}.png", base.trim_end_matches('/'), self.id)
    }
}

/// Last non-empty path segment of `url`.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `25`.
pub fn id_from_url(url: &str) -> Option<&str> {
    url.split('/').filter(|segment| !segment.is_empty()).last()
}

/// Trim and lowercase a user-supplied or upstream name.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}
