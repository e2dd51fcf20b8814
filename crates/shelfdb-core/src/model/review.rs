//! Review records and payloads.

use serde::{Deserialize, Serialize};

use super::{Book, EntityId, Reviewer};

/// Minimum review headline length, in characters, after trimming.
pub const MIN_HEADLINE: usize = 10;
/// Maximum review headline length, in characters, after trimming.
pub const MAX_HEADLINE: usize = 200;
/// Minimum review body length, in characters, after trimming.
pub const MIN_BODY: usize = 10;
/// Maximum review body length, in characters, after trimming.
pub const MAX_BODY: usize = 2000;
/// Lowest accepted star rating, inclusive.
pub const MIN_RATING: i32 = 1;
/// Highest accepted star rating, inclusive.
pub const MAX_RATING: i32 = 5;

/// A persisted review. Belongs to exactly one book and one reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: EntityId,
    pub headline: String,
    pub body: String,
    pub rating: i32,
    pub book_id: EntityId,
    pub reviewer_id: EntityId,
}

/// Mutation payload for a review. Carries both references by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub headline: String,
    pub body: String,
    pub rating: i32,
    pub book_id: EntityId,
    pub reviewer_id: EntityId,
}

/// A validated review with both references resolved to full record
/// copies. `id` is `None` on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReview {
    pub id: Option<EntityId>,
    pub headline: String,
    pub body: String,
    pub rating: i32,
    pub book: Book,
    pub reviewer: Reviewer,
}
