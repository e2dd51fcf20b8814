//! Author records and payloads.

use serde::{Deserialize, Serialize};

use super::{Country, EntityId};

/// Maximum author first-name length, in characters, after trimming.
pub const MAX_FIRST_NAME: usize = 100;

/// Maximum author last-name length, in characters, after trimming.
pub const MAX_LAST_NAME: usize = 200;

/// A persisted author. Belongs to exactly one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub country_id: EntityId,
}

/// Mutation payload for an author. Carries the country by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDraft {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    pub country_id: EntityId,
}

/// A validated author with its country reference resolved to a full
/// record copy. `id` is `None` on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAuthor {
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    pub country: Country,
}
