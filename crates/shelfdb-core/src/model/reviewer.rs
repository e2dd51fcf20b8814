//! Reviewer records and payloads.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A persisted reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

/// Mutation payload for a reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerDraft {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
}

/// A validated reviewer, ready to persist. `id` is `None` on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReviewer {
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
}
