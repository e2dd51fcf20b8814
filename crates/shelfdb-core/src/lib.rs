//! ShelfDB Core - domain model, entity-store boundary, and the
//! integrity engine for a book-library catalog.
//!
//! The engine is a pure decision layer: given a mutation and a
//! consistent read snapshot of the store, it accepts with a fully
//! resolved entity graph or rejects with a structured error list. It
//! owns the referential-integrity rules (natural-key uniqueness,
//! reference resolution, delete blocking, and the two-phase review
//! cascades) and nothing else; persistence mechanics stay behind the
//! [`store::CatalogStore`] traits.

pub mod engine;
pub mod error;
pub mod model;
pub mod query;
pub mod store;

pub use engine::IntegrityEngine;
pub use error::{EntityKind, Error, Rejection, StoreError, Verdict};
pub use model::{
    Author, AuthorDraft, Book, BookDraft, Category, CategoryDraft, Country, CountryDraft,
    EntityId, ResolvedAuthor, ResolvedBook, ResolvedCategory, ResolvedCountry, ResolvedReview,
    ResolvedReviewer, Review, ReviewDraft, Reviewer, ReviewerDraft,
};
pub use store::{
    normalized_key, AuthorStore, BookStore, CatalogStore, CategoryStore, CountryStore,
    MemoryStore, ReviewStore, ReviewerStore,
};
