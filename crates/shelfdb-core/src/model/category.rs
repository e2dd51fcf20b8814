//! Category records and payloads.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Maximum category name length, in characters, after trimming.
pub const MAX_CATEGORY_NAME: usize = 100;

/// A persisted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

/// Mutation payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
}

/// A validated category, ready to persist. `id` is `None` on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub id: Option<EntityId>,
    pub name: String,
}
