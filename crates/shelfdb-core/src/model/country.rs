//! Country records and payloads.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Maximum country name length, in characters, after trimming.
pub const MAX_COUNTRY_NAME: usize = 100;

/// A persisted country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: EntityId,
    pub name: String,
}

/// Mutation payload for a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDraft {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
}

/// A validated country, ready to persist. `id` is `None` on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCountry {
    pub id: Option<EntityId>,
    pub name: String,
}
