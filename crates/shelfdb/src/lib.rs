//! ShelfDB - an embedded book-catalog store with referential-integrity
//! enforcement.
//!
//! [`Catalog`] plays the request-handler role over any
//! [`CatalogStore`]: every mutation goes through the integrity engine
//! first and is persisted only on acceptance, so the store never sees
//! an entity graph the rules would reject. Reads pass straight through.

use tracing::debug;

pub use shelfdb_core::{
    model, query, store, Author, AuthorDraft, Book, BookDraft, CatalogStore, Category,
    CategoryDraft, Country, CountryDraft, EntityId, EntityKind, Error, IntegrityEngine,
    MemoryStore, Rejection, Review, ReviewDraft, Reviewer, ReviewerDraft, StoreError, Verdict,
};

use shelfdb_core::store::{
    AuthorStore, BookStore, CategoryStore, CountryStore, ReviewStore, ReviewerStore,
};

/// A catalog of books, authors, categories, countries, reviewers, and
/// reviews over a pluggable entity store.
pub struct Catalog<S: CatalogStore = MemoryStore> {
    store: S,
}

impl Catalog<MemoryStore> {
    /// A catalog over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }
}

impl Default for Catalog<MemoryStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S: CatalogStore> Catalog<S> {
    /// A catalog over an existing store.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn engine(&self) -> IntegrityEngine<'_, S> {
        IntegrityEngine::new(&self.store)
    }

    // ---- countries ----

    pub fn create_country(&self, payload: Option<CountryDraft>) -> Result<Country, Rejection> {
        let resolved = self.engine().validate_create_country(payload)?;
        let country = self.store.insert_country(&resolved)?;
        debug!(country = country.id, "country created");
        Ok(country)
    }

    pub fn update_country(
        &self,
        id: EntityId,
        payload: Option<CountryDraft>,
    ) -> Result<Country, Rejection> {
        let resolved = self.engine().validate_update_country(id, payload)?;
        Ok(self.store.update_country(&resolved)?)
    }

    pub fn delete_country(&self, id: EntityId) -> Result<(), Rejection> {
        self.engine().delete_country(id)
    }

    pub fn country(&self, id: EntityId) -> Result<Country, Error> {
        self.store.country(id)?.ok_or(Error::NotFound {
            entity: EntityKind::Country,
            id,
        })
    }

    /// All countries, ordered by name.
    pub fn countries(&self) -> Result<Vec<Country>, Error> {
        Ok(self.store.countries()?)
    }

    // ---- authors ----

    pub fn create_author(&self, payload: Option<AuthorDraft>) -> Result<Author, Rejection> {
        let resolved = self.engine().validate_create_author(payload)?;
        let author = self.store.insert_author(&resolved)?;
        debug!(author = author.id, "author created");
        Ok(author)
    }

    pub fn update_author(
        &self,
        id: EntityId,
        payload: Option<AuthorDraft>,
    ) -> Result<Author, Rejection> {
        let resolved = self.engine().validate_update_author(id, payload)?;
        Ok(self.store.update_author(&resolved)?)
    }

    pub fn delete_author(&self, id: EntityId) -> Result<(), Rejection> {
        self.engine().delete_author(id)
    }

    pub fn author(&self, id: EntityId) -> Result<Author, Error> {
        self.store.author(id)?.ok_or(Error::NotFound {
            entity: EntityKind::Author,
            id,
        })
    }

    pub fn authors(&self) -> Result<Vec<Author>, Error> {
        Ok(self.store.authors()?)
    }

    // ---- categories ----

    pub fn create_category(&self, payload: Option<CategoryDraft>) -> Result<Category, Rejection> {
        let resolved = self.engine().validate_create_category(payload)?;
        let category = self.store.insert_category(&resolved)?;
        debug!(category = category.id, "category created");
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: EntityId,
        payload: Option<CategoryDraft>,
    ) -> Result<Category, Rejection> {
        let resolved = self.engine().validate_update_category(id, payload)?;
        Ok(self.store.update_category(&resolved)?)
    }

    pub fn delete_category(&self, id: EntityId) -> Result<(), Rejection> {
        self.engine().delete_category(id)
    }

    pub fn category(&self, id: EntityId) -> Result<Category, Error> {
        self.store.category(id)?.ok_or(Error::NotFound {
            entity: EntityKind::Category,
            id,
        })
    }

    /// All categories, ordered by name.
    pub fn categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.store.categories()?)
    }

    // ---- books ----

    /// Create a book with its author and category membership sets. The
    /// record and both edge sets are written only after the whole graph
    /// validates.
    pub fn create_book(
        &self,
        payload: Option<BookDraft>,
        author_ids: &[EntityId],
        category_ids: &[EntityId],
    ) -> Result<Book, Rejection> {
        let resolved = self
            .engine()
            .validate_create_book(payload, author_ids, category_ids)?;
        let book = self.store.insert_book(&resolved)?;
        self.store.set_book_authors(book.id, &resolved.author_ids())?;
        self.store
            .set_book_categories(book.id, &resolved.category_ids())?;
        debug!(book = book.id, "book created");
        Ok(book)
    }

    pub fn update_book(
        &self,
        id: EntityId,
        payload: Option<BookDraft>,
        author_ids: &[EntityId],
        category_ids: &[EntityId],
    ) -> Result<Book, Rejection> {
        let resolved = self
            .engine()
            .validate_update_book(id, payload, author_ids, category_ids)?;
        let book = self.store.update_book(&resolved)?;
        self.store.set_book_authors(book.id, &resolved.author_ids())?;
        self.store
            .set_book_categories(book.id, &resolved.category_ids())?;
        Ok(book)
    }

    /// Delete a book and its reviews (engine-driven two-phase cascade).
    pub fn delete_book(&self, id: EntityId) -> Result<(), Rejection> {
        self.engine().delete_book(id)
    }

    pub fn book(&self, id: EntityId) -> Result<Book, Error> {
        self.store.book(id)?.ok_or(Error::NotFound {
            entity: EntityKind::Book,
            id,
        })
    }

    pub fn books(&self) -> Result<Vec<Book>, Error> {
        Ok(self.store.books()?)
    }

    // ---- reviewers ----

    pub fn create_reviewer(&self, payload: Option<ReviewerDraft>) -> Result<Reviewer, Rejection> {
        let resolved = self.engine().validate_create_reviewer(payload)?;
        let reviewer = self.store.insert_reviewer(&resolved)?;
        debug!(reviewer = reviewer.id, "reviewer created");
        Ok(reviewer)
    }

    pub fn update_reviewer(
        &self,
        id: EntityId,
        payload: Option<ReviewerDraft>,
    ) -> Result<Reviewer, Rejection> {
        let resolved = self.engine().validate_update_reviewer(id, payload)?;
        Ok(self.store.update_reviewer(&resolved)?)
    }

    /// Delete a reviewer and their reviews (engine-driven cascade).
    pub fn delete_reviewer(&self, id: EntityId) -> Result<(), Rejection> {
        self.engine().delete_reviewer(id)
    }

    pub fn reviewer(&self, id: EntityId) -> Result<Reviewer, Error> {
        self.store.reviewer(id)?.ok_or(Error::NotFound {
            entity: EntityKind::Reviewer,
            id,
        })
    }

    pub fn reviewers(&self) -> Result<Vec<Reviewer>, Error> {
        Ok(self.store.reviewers()?)
    }

    // ---- reviews ----

    pub fn create_review(&self, payload: Option<ReviewDraft>) -> Result<Review, Rejection> {
        let resolved = self.engine().validate_create_review(payload)?;
        let review = self.store.insert_review(&resolved)?;
        debug!(review = review.id, "review created");
        Ok(review)
    }

    pub fn update_review(
        &self,
        id: EntityId,
        payload: Option<ReviewDraft>,
    ) -> Result<Review, Rejection> {
        let resolved = self.engine().validate_update_review(id, payload)?;
        Ok(self.store.update_review(&resolved)?)
    }

    pub fn delete_review(&self, id: EntityId) -> Result<(), Rejection> {
        self.engine().delete_review(id)
    }

    pub fn review(&self, id: EntityId) -> Result<Review, Error> {
        self.store.review(id)?.ok_or(Error::NotFound {
            entity: EntityKind::Review,
            id,
        })
    }

    /// All reviews, ordered by rating.
    pub fn reviews(&self) -> Result<Vec<Review>, Error> {
        Ok(self.store.reviews()?)
    }

    // ---- traversal queries ----

    pub fn books_by_author(&self, author_id: EntityId) -> Result<Vec<Book>, Error> {
        query::books_by_author(&self.store, author_id)
    }

    pub fn authors_of_book(&self, book_id: EntityId) -> Result<Vec<Author>, Error> {
        query::authors_of_book(&self.store, book_id)
    }

    pub fn categories_of_book(&self, book_id: EntityId) -> Result<Vec<Category>, Error> {
        query::categories_of_book(&self.store, book_id)
    }

    pub fn books_in_category(&self, category_id: EntityId) -> Result<Vec<Book>, Error> {
        query::books_in_category(&self.store, category_id)
    }

    pub fn authors_from_country(&self, country_id: EntityId) -> Result<Vec<Author>, Error> {
        query::authors_from_country(&self.store, country_id)
    }

    pub fn country_of_author(&self, author_id: EntityId) -> Result<Country, Error> {
        query::country_of_author(&self.store, author_id)
    }

    pub fn reviews_of_book(&self, book_id: EntityId) -> Result<Vec<Review>, Error> {
        query::reviews_of_book(&self.store, book_id)
    }

    pub fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> Result<Vec<Review>, Error> {
        query::reviews_by_reviewer(&self.store, reviewer_id)
    }

    pub fn book_of_review(&self, review_id: EntityId) -> Result<Book, Error> {
        query::book_of_review(&self.store, review_id)
    }

    pub fn reviewer_of_review(&self, review_id: EntityId) -> Result<Reviewer, Error> {
        query::reviewer_of_review(&self.store, review_id)
    }

    pub fn book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, Error> {
        query::book_by_isbn(&self.store, isbn)
    }

    /// Mean star rating of a book, `None` while unreviewed.
    pub fn book_rating(&self, book_id: EntityId) -> Result<Option<f64>, Error> {
        query::book_rating(&self.store, book_id)
    }
}
