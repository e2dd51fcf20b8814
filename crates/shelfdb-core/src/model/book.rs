//! Book records and payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Author, Category, EntityId};

/// A persisted book. Membership in the author and category sets lives
/// in relationship edges owned by the store, not on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: EntityId,
    pub title: String,
    pub isbn: String,
    pub published: NaiveDate,
}

/// Mutation payload for a book. The author and category id sets travel
/// beside the payload, not inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub title: String,
    pub isbn: String,
    pub published: NaiveDate,
}

/// A validated book with both membership sets resolved to full record
/// copies, de-duplicated, in order of first occurrence. `id` is `None`
/// on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBook {
    pub id: Option<EntityId>,
    pub title: String,
    pub isbn: String,
    pub published: NaiveDate,
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
}

impl ResolvedBook {
    /// Ids of the resolved author set, for the store's edge writes.
    pub fn author_ids(&self) -> Vec<EntityId> {
        self.authors.iter().map(|a| a.id).collect()
    }

    /// Ids of the resolved category set, for the store's edge writes.
    pub fn category_ids(&self) -> Vec<EntityId> {
        self.categories.iter().map(|c| c.id).collect()
    }
}
