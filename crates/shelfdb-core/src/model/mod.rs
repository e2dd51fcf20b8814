//! Domain model: persisted records, mutation drafts, and resolved graphs.
//!
//! Records are flat and carry references by id. Drafts are the payloads
//! a transport layer parses out of a request body; their `id` field is
//! absent on create and must match the path id on update. Resolved
//! graphs are what the integrity engine hands back on acceptance: every
//! reference replaced by a full record copy, never a live back-reference.

mod author;
mod book;
mod category;
mod country;
mod review;
mod reviewer;

pub use author::{Author, AuthorDraft, ResolvedAuthor, MAX_FIRST_NAME, MAX_LAST_NAME};
pub use book::{Book, BookDraft, ResolvedBook};
pub use category::{Category, CategoryDraft, ResolvedCategory, MAX_CATEGORY_NAME};
pub use country::{Country, CountryDraft, ResolvedCountry, MAX_COUNTRY_NAME};
pub use review::{
    Review, ReviewDraft, ResolvedReview, MAX_BODY, MAX_HEADLINE, MAX_RATING, MIN_BODY,
    MIN_HEADLINE, MIN_RATING,
};
pub use reviewer::{ResolvedReviewer, Reviewer, ReviewerDraft};

/// Store-assigned identifier. Positive, unique per entity type.
pub type EntityId = u64;
