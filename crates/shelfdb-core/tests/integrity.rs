//! Cross-entity integration tests for the integrity engine, including
//! the failure modes of the two-phase delete cascades.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use shelfdb_core::model::{
    Author, AuthorDraft, Book, BookDraft, Category, CategoryDraft, Country, CountryDraft,
    EntityId, ResolvedAuthor, ResolvedBook, ResolvedCategory, ResolvedCountry, ResolvedReview,
    ResolvedReviewer, Review, ReviewDraft, Reviewer, ReviewerDraft,
};
use shelfdb_core::store::{
    AuthorStore, BookStore, CategoryStore, CountryStore, MemoryStore, ReviewStore, ReviewerStore,
};
use shelfdb_core::{EntityKind, Error, IntegrityEngine, StoreError};

/// Wraps a `MemoryStore` and fails selected write calls on demand, to
/// drive the engine through the cascade's failure branches.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_remove_reviews: AtomicBool,
    fail_remove_book: AtomicBool,
    fail_remove_reviewer: AtomicBool,
}

impl FlakyStore {
    fn tripped(&self, flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError("injected write failure".into()))
        } else {
            Ok(())
        }
    }
}

impl CountryStore for FlakyStore {
    fn country_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        self.inner.country_exists(id)
    }
    fn country(&self, id: EntityId) -> Result<Option<Country>, StoreError> {
        self.inner.country(id)
    }
    fn country_by_name(&self, normalized: &str) -> Result<Option<Country>, StoreError> {
        self.inner.country_by_name(normalized)
    }
    fn countries(&self) -> Result<Vec<Country>, StoreError> {
        self.inner.countries()
    }
    fn authors_from_country(&self, country_id: EntityId) -> Result<Vec<Author>, StoreError> {
        self.inner.authors_from_country(country_id)
    }
    fn insert_country(&self, country: &ResolvedCountry) -> Result<Country, StoreError> {
        self.inner.insert_country(country)
    }
    fn update_country(&self, country: &ResolvedCountry) -> Result<Country, StoreError> {
        self.inner.update_country(country)
    }
    fn remove_country(&self, id: EntityId) -> Result<(), StoreError> {
        self.inner.remove_country(id)
    }
}

impl AuthorStore for FlakyStore {
    fn author_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        self.inner.author_exists(id)
    }
    fn author(&self, id: EntityId) -> Result<Option<Author>, StoreError> {
        self.inner.author(id)
    }
    fn authors(&self) -> Result<Vec<Author>, StoreError> {
        self.inner.authors()
    }
    fn books_by_author(&self, author_id: EntityId) -> Result<Vec<Book>, StoreError> {
        self.inner.books_by_author(author_id)
    }
    fn authors_of_book(&self, book_id: EntityId) -> Result<Vec<Author>, StoreError> {
        self.inner.authors_of_book(book_id)
    }
    fn insert_author(&self, author: &ResolvedAuthor) -> Result<Author, StoreError> {
        self.inner.insert_author(author)
    }
    fn update_author(&self, author: &ResolvedAuthor) -> Result<Author, StoreError> {
        self.inner.update_author(author)
    }
    fn remove_author(&self, id: EntityId) -> Result<(), StoreError> {
        self.inner.remove_author(id)
    }
}

impl CategoryStore for FlakyStore {
    fn category_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        self.inner.category_exists(id)
    }
    fn category(&self, id: EntityId) -> Result<Option<Category>, StoreError> {
        self.inner.category(id)
    }
    fn category_by_name(&self, normalized: &str) -> Result<Option<Category>, StoreError> {
        self.inner.category_by_name(normalized)
    }
    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.inner.categories()
    }
    fn books_in_category(&self, category_id: EntityId) -> Result<Vec<Book>, StoreError> {
        self.inner.books_in_category(category_id)
    }
    fn categories_of_book(&self, book_id: EntityId) -> Result<Vec<Category>, StoreError> {
        self.inner.categories_of_book(book_id)
    }
    fn insert_category(&self, category: &ResolvedCategory) -> Result<Category, StoreError> {
        self.inner.insert_category(category)
    }
    fn update_category(&self, category: &ResolvedCategory) -> Result<Category, StoreError> {
        self.inner.update_category(category)
    }
    fn remove_category(&self, id: EntityId) -> Result<(), StoreError> {
        self.inner.remove_category(id)
    }
}

impl BookStore for FlakyStore {
    fn book_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        self.inner.book_exists(id)
    }
    fn book(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        self.inner.book(id)
    }
    fn book_by_isbn(&self, normalized: &str) -> Result<Option<Book>, StoreError> {
        self.inner.book_by_isbn(normalized)
    }
    fn books(&self) -> Result<Vec<Book>, StoreError> {
        self.inner.books()
    }
    fn insert_book(&self, book: &ResolvedBook) -> Result<Book, StoreError> {
        self.inner.insert_book(book)
    }
    fn update_book(&self, book: &ResolvedBook) -> Result<Book, StoreError> {
        self.inner.update_book(book)
    }
    fn remove_book(&self, id: EntityId) -> Result<(), StoreError> {
        self.tripped(&self.fail_remove_book)?;
        self.inner.remove_book(id)
    }
    fn set_book_authors(
        &self,
        book_id: EntityId,
        author_ids: &[EntityId],
    ) -> Result<(), StoreError> {
        self.inner.set_book_authors(book_id, author_ids)
    }
    fn set_book_categories(
        &self,
        book_id: EntityId,
        category_ids: &[EntityId],
    ) -> Result<(), StoreError> {
        self.inner.set_book_categories(book_id, category_ids)
    }
}

impl ReviewerStore for FlakyStore {
    fn reviewer_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        self.inner.reviewer_exists(id)
    }
    fn reviewer(&self, id: EntityId) -> Result<Option<Reviewer>, StoreError> {
        self.inner.reviewer(id)
    }
    fn reviewers(&self) -> Result<Vec<Reviewer>, StoreError> {
        self.inner.reviewers()
    }
    fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> Result<Vec<Review>, StoreError> {
        self.inner.reviews_by_reviewer(reviewer_id)
    }
    fn insert_reviewer(&self, reviewer: &ResolvedReviewer) -> Result<Reviewer, StoreError> {
        self.inner.insert_reviewer(reviewer)
    }
    fn update_reviewer(&self, reviewer: &ResolvedReviewer) -> Result<Reviewer, StoreError> {
        self.inner.update_reviewer(reviewer)
    }
    fn remove_reviewer(&self, id: EntityId) -> Result<(), StoreError> {
        self.tripped(&self.fail_remove_reviewer)?;
        self.inner.remove_reviewer(id)
    }
}

impl ReviewStore for FlakyStore {
    fn review_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        self.inner.review_exists(id)
    }
    fn review(&self, id: EntityId) -> Result<Option<Review>, StoreError> {
        self.inner.review(id)
    }
    fn reviews(&self) -> Result<Vec<Review>, StoreError> {
        self.inner.reviews()
    }
    fn reviews_of_book(&self, book_id: EntityId) -> Result<Vec<Review>, StoreError> {
        self.inner.reviews_of_book(book_id)
    }
    fn insert_review(&self, review: &ResolvedReview) -> Result<Review, StoreError> {
        self.inner.insert_review(review)
    }
    fn update_review(&self, review: &ResolvedReview) -> Result<Review, StoreError> {
        self.inner.update_review(review)
    }
    fn remove_review(&self, id: EntityId) -> Result<(), StoreError> {
        self.inner.remove_review(id)
    }
    fn remove_reviews(&self, ids: &[EntityId]) -> Result<(), StoreError> {
        self.tripped(&self.fail_remove_reviews)?;
        self.inner.remove_reviews(ids)
    }
}

/// Seed a book with one review through the validated path.
fn seed_reviewed_book(store: &FlakyStore) -> (Book, Review, Reviewer) {
    let engine = IntegrityEngine::new(store);

    let france = store
        .insert_country(
            &engine
                .validate_create_country(Some(CountryDraft {
                    id: None,
                    name: "France".to_string(),
                }))
                .unwrap(),
        )
        .unwrap();
    let hugo = store
        .insert_author(
            &engine
                .validate_create_author(Some(AuthorDraft {
                    id: None,
                    first_name: "Victor".to_string(),
                    last_name: "Hugo".to_string(),
                    country_id: france.id,
                }))
                .unwrap(),
        )
        .unwrap();
    let novel = store
        .insert_category(
            &engine
                .validate_create_category(Some(CategoryDraft {
                    id: None,
                    name: "Novel".to_string(),
                }))
                .unwrap(),
        )
        .unwrap();
    let resolved_book = engine
        .validate_create_book(
            Some(BookDraft {
                id: None,
                title: "Les Misérables".to_string(),
                isbn: "123".to_string(),
                published: NaiveDate::from_ymd_opt(1862, 4, 3).unwrap(),
            }),
            &[hugo.id],
            &[novel.id],
        )
        .unwrap();
    let book = store.insert_book(&resolved_book).unwrap();
    store
        .set_book_authors(book.id, &resolved_book.author_ids())
        .unwrap();
    store
        .set_book_categories(book.id, &resolved_book.category_ids())
        .unwrap();

    let reviewer = store
        .insert_reviewer(
            &engine
                .validate_create_reviewer(Some(ReviewerDraft {
                    id: None,
                    first_name: "Jean".to_string(),
                    last_name: "Valjean".to_string(),
                }))
                .unwrap(),
        )
        .unwrap();
    let review = store
        .insert_review(
            &engine
                .validate_create_review(Some(ReviewDraft {
                    id: None,
                    headline: "A monument of a novel".to_string(),
                    body: "Read it twice and will read it again.".to_string(),
                    rating: 5,
                    book_id: book.id,
                    reviewer_id: reviewer.id,
                }))
                .unwrap(),
        )
        .unwrap();

    (book, review, reviewer)
}

#[test]
fn test_book_cascade_removes_reviews_then_book() {
    let store = FlakyStore::default();
    let (book, review, _) = seed_reviewed_book(&store);
    let engine = IntegrityEngine::new(&store);

    engine.delete_book(book.id).unwrap();
    assert!(!store.book_exists(book.id).unwrap());
    assert!(!store.review_exists(review.id).unwrap());
}

#[test]
fn test_failed_review_phase_leaves_the_book_in_place() {
    let store = FlakyStore::default();
    let (book, review, _) = seed_reviewed_book(&store);
    store.fail_remove_reviews.store(true, Ordering::SeqCst);
    let engine = IntegrityEngine::new(&store);

    let rejection = engine.delete_book(book.id).unwrap_err();
    // The store failure surfaces verbatim, not reinterpreted.
    assert!(matches!(rejection.errors(), [Error::Store(_)]));
    assert!(store.book_exists(book.id).unwrap());
    assert!(store.review_exists(review.id).unwrap());
}

#[test]
fn test_failed_book_phase_is_a_partial_failure() {
    let store = FlakyStore::default();
    let (book, review, _) = seed_reviewed_book(&store);
    store.fail_remove_book.store(true, Ordering::SeqCst);
    let engine = IntegrityEngine::new(&store);

    let rejection = engine.delete_book(book.id).unwrap_err();
    assert!(matches!(
        rejection.errors(),
        [Error::PartialFailure {
            entity: EntityKind::Book,
            ..
        }]
    ));
    // First phase committed, second did not.
    assert!(!store.review_exists(review.id).unwrap());
    assert!(store.book_exists(book.id).unwrap());
}

#[test]
fn test_reviewer_cascade_partial_failure() {
    let store = FlakyStore::default();
    let (_, review, reviewer) = seed_reviewed_book(&store);
    store.fail_remove_reviewer.store(true, Ordering::SeqCst);
    let engine = IntegrityEngine::new(&store);

    let rejection = engine.delete_reviewer(reviewer.id).unwrap_err();
    assert!(matches!(
        rejection.errors(),
        [Error::PartialFailure {
            entity: EntityKind::Reviewer,
            ..
        }]
    ));
    assert!(!store.review_exists(review.id).unwrap());
    assert!(store.reviewer_exists(reviewer.id).unwrap());
}

#[test]
fn test_delete_order_is_enforced_across_the_graph() {
    let store = FlakyStore::default();
    let (book, _, _) = seed_reviewed_book(&store);
    let engine = IntegrityEngine::new(&store);

    let hugo = store.authors_of_book(book.id).unwrap().remove(0);
    let france = store.author(hugo.id).unwrap().unwrap().country_id;

    // Country and author are both pinned while the book exists.
    assert!(matches!(
        engine.delete_country(france).unwrap_err().errors(),
        [Error::Conflict { .. }]
    ));
    assert!(matches!(
        engine.delete_author(hugo.id).unwrap_err().errors(),
        [Error::Conflict { .. }]
    ));

    // Unwind in dependency order.
    engine.delete_book(book.id).unwrap();
    engine.delete_author(hugo.id).unwrap();
    engine.delete_country(france).unwrap();
}
