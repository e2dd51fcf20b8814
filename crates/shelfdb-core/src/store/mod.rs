//! The entity-store boundary.
//!
//! The integrity engine never owns persistence; it reads and writes
//! through one trait per entity type, combined by the [`CatalogStore`]
//! supertrait. Natural-key lookups take the key already normalized via
//! [`normalized_key`] and must compare against the stored value
//! normalized the same way.
//!
//! Every method returns `Result<_, StoreError>`; the engine propagates
//! store failures verbatim and never retries.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::model::{
    Author, Book, Category, Country, EntityId, ResolvedAuthor, ResolvedBook, ResolvedCategory,
    ResolvedCountry, ResolvedReview, ResolvedReviewer, Review, Reviewer,
};

/// Normalize a natural-key value for case-insensitive comparison:
/// leading/trailing whitespace removed, then upper-cased.
pub fn normalized_key(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Read/write surface for countries.
pub trait CountryStore {
    fn country_exists(&self, id: EntityId) -> Result<bool, StoreError>;
    fn country(&self, id: EntityId) -> Result<Option<Country>, StoreError>;
    /// Natural-key lookup; `normalized` is a [`normalized_key`] value.
    fn country_by_name(&self, normalized: &str) -> Result<Option<Country>, StoreError>;
    /// All countries, ordered by name.
    fn countries(&self) -> Result<Vec<Country>, StoreError>;
    /// Authors whose country reference points at `country_id`.
    fn authors_from_country(&self, country_id: EntityId) -> Result<Vec<Author>, StoreError>;
    fn insert_country(&self, country: &ResolvedCountry) -> Result<Country, StoreError>;
    fn update_country(&self, country: &ResolvedCountry) -> Result<Country, StoreError>;
    fn remove_country(&self, id: EntityId) -> Result<(), StoreError>;
}

/// Read/write surface for authors.
pub trait AuthorStore {
    fn author_exists(&self, id: EntityId) -> Result<bool, StoreError>;
    fn author(&self, id: EntityId) -> Result<Option<Author>, StoreError>;
    fn authors(&self) -> Result<Vec<Author>, StoreError>;
    /// Books holding a membership edge to `author_id`.
    fn books_by_author(&self, author_id: EntityId) -> Result<Vec<Book>, StoreError>;
    /// Authors on the membership edge set of `book_id`.
    fn authors_of_book(&self, book_id: EntityId) -> Result<Vec<Author>, StoreError>;
    fn insert_author(&self, author: &ResolvedAuthor) -> Result<Author, StoreError>;
    fn update_author(&self, author: &ResolvedAuthor) -> Result<Author, StoreError>;
    fn remove_author(&self, id: EntityId) -> Result<(), StoreError>;
}

/// Read/write surface for categories.
pub trait CategoryStore {
    fn category_exists(&self, id: EntityId) -> Result<bool, StoreError>;
    fn category(&self, id: EntityId) -> Result<Option<Category>, StoreError>;
    /// Natural-key lookup; `normalized` is a [`normalized_key`] value.
    fn category_by_name(&self, normalized: &str) -> Result<Option<Category>, StoreError>;
    fn categories(&self) -> Result<Vec<Category>, StoreError>;
    /// Books holding a membership edge to `category_id`.
    fn books_in_category(&self, category_id: EntityId) -> Result<Vec<Book>, StoreError>;
    /// Categories on the membership edge set of `book_id`.
    fn categories_of_book(&self, book_id: EntityId) -> Result<Vec<Category>, StoreError>;
    fn insert_category(&self, category: &ResolvedCategory) -> Result<Category, StoreError>;
    fn update_category(&self, category: &ResolvedCategory) -> Result<Category, StoreError>;
    fn remove_category(&self, id: EntityId) -> Result<(), StoreError>;
}

/// Read/write surface for books, including their membership edges.
pub trait BookStore {
    fn book_exists(&self, id: EntityId) -> Result<bool, StoreError>;
    fn book(&self, id: EntityId) -> Result<Option<Book>, StoreError>;
    /// Natural-key lookup; `normalized` is a [`normalized_key`] ISBN.
    fn book_by_isbn(&self, normalized: &str) -> Result<Option<Book>, StoreError>;
    fn books(&self) -> Result<Vec<Book>, StoreError>;
    fn insert_book(&self, book: &ResolvedBook) -> Result<Book, StoreError>;
    fn update_book(&self, book: &ResolvedBook) -> Result<Book, StoreError>;
    /// Removes the record and its membership edges.
    fn remove_book(&self, id: EntityId) -> Result<(), StoreError>;
    /// Replace the author membership edge set of `book_id`.
    fn set_book_authors(&self, book_id: EntityId, author_ids: &[EntityId])
        -> Result<(), StoreError>;
    /// Replace the category membership edge set of `book_id`.
    fn set_book_categories(
        &self,
        book_id: EntityId,
        category_ids: &[EntityId],
    ) -> Result<(), StoreError>;
}

/// Read/write surface for reviewers.
pub trait ReviewerStore {
    fn reviewer_exists(&self, id: EntityId) -> Result<bool, StoreError>;
    fn reviewer(&self, id: EntityId) -> Result<Option<Reviewer>, StoreError>;
    fn reviewers(&self) -> Result<Vec<Reviewer>, StoreError>;
    /// Reviews whose reviewer reference points at `reviewer_id`.
    fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> Result<Vec<Review>, StoreError>;
    fn insert_reviewer(&self, reviewer: &ResolvedReviewer) -> Result<Reviewer, StoreError>;
    fn update_reviewer(&self, reviewer: &ResolvedReviewer) -> Result<Reviewer, StoreError>;
    fn remove_reviewer(&self, id: EntityId) -> Result<(), StoreError>;
}

/// Read/write surface for reviews.
pub trait ReviewStore {
    fn review_exists(&self, id: EntityId) -> Result<bool, StoreError>;
    fn review(&self, id: EntityId) -> Result<Option<Review>, StoreError>;
    /// All reviews, ordered by rating.
    fn reviews(&self) -> Result<Vec<Review>, StoreError>;
    /// Reviews whose book reference points at `book_id`.
    fn reviews_of_book(&self, book_id: EntityId) -> Result<Vec<Review>, StoreError>;
    fn insert_review(&self, review: &ResolvedReview) -> Result<Review, StoreError>;
    fn update_review(&self, review: &ResolvedReview) -> Result<Review, StoreError>;
    fn remove_review(&self, id: EntityId) -> Result<(), StoreError>;
    /// Remove several reviews in one call (the cascade's first phase).
    fn remove_reviews(&self, ids: &[EntityId]) -> Result<(), StoreError>;
}

/// The full store surface the integrity engine validates against.
pub trait CatalogStore:
    CountryStore + AuthorStore + CategoryStore + BookStore + ReviewerStore + ReviewStore
{
}

impl<T> CatalogStore for T where
    T: CountryStore + AuthorStore + CategoryStore + BookStore + ReviewerStore + ReviewStore
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_key_trims_and_folds_case() {
        assert_eq!(normalized_key("  France "), "FRANCE");
        assert_eq!(normalized_key("france"), "FRANCE");
        assert_eq!(normalized_key("FRANCE"), "FRANCE");
    }
}
