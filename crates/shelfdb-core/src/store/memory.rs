//! In-memory reference store.
//!
//! Backs the facade's default catalog and the engine's test suites.
//! All tables live behind one `RwLock`, so any single call observes a
//! consistent snapshot.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::model::{
    Author, Book, Category, Country, EntityId, ResolvedAuthor, ResolvedBook, ResolvedCategory,
    ResolvedCountry, ResolvedReview, ResolvedReviewer, Review, Reviewer,
};
use crate::store::{
    normalized_key, AuthorStore, BookStore, CategoryStore, CountryStore, ReviewStore,
    ReviewerStore,
};

#[derive(Debug, Default)]
struct Tables {
    countries: BTreeMap<EntityId, Country>,
    authors: BTreeMap<EntityId, Author>,
    categories: BTreeMap<EntityId, Category>,
    books: BTreeMap<EntityId, Book>,
    reviewers: BTreeMap<EntityId, Reviewer>,
    reviews: BTreeMap<EntityId, Review>,
    // book id -> member ids, replaced wholesale by the edge writes
    book_authors: BTreeMap<EntityId, Vec<EntityId>>,
    book_categories: BTreeMap<EntityId, Vec<EntityId>>,
    next_id: EntityId,
}

impl Tables {
    fn alloc(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }
}

/// An in-memory [`CatalogStore`](crate::store::CatalogStore).
///
/// Ids are assigned from a counter starting at 1 and never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn require_id(id: Option<EntityId>, what: &str) -> Result<EntityId, StoreError> {
    id.ok_or_else(|| StoreError(format!("update of {what} without an id")))
}

fn missing(what: &str, id: EntityId) -> StoreError {
    StoreError(format!("no {what} record with id {id}"))
}

impl CountryStore for MemoryStore {
    fn country_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        Ok(self.tables.read().countries.contains_key(&id))
    }

    fn country(&self, id: EntityId) -> Result<Option<Country>, StoreError> {
        Ok(self.tables.read().countries.get(&id).cloned())
    }

    fn country_by_name(&self, normalized: &str) -> Result<Option<Country>, StoreError> {
        Ok(self
            .tables
            .read()
            .countries
            .values()
            .find(|c| normalized_key(&c.name) == normalized)
            .cloned())
    }

    fn countries(&self) -> Result<Vec<Country>, StoreError> {
        let mut all: Vec<_> = self.tables.read().countries.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn authors_from_country(&self, country_id: EntityId) -> Result<Vec<Author>, StoreError> {
        Ok(self
            .tables
            .read()
            .authors
            .values()
            .filter(|a| a.country_id == country_id)
            .cloned()
            .collect())
    }

    fn insert_country(&self, country: &ResolvedCountry) -> Result<Country, StoreError> {
        let mut tables = self.tables.write();
        let id = tables.alloc();
        let record = Country {
            id,
            name: country.name.clone(),
        };
        tables.countries.insert(id, record.clone());
        Ok(record)
    }

    fn update_country(&self, country: &ResolvedCountry) -> Result<Country, StoreError> {
        let id = require_id(country.id, "country")?;
        let mut tables = self.tables.write();
        if !tables.countries.contains_key(&id) {
            return Err(missing("country", id));
        }
        let record = Country {
            id,
            name: country.name.clone(),
        };
        tables.countries.insert(id, record.clone());
        Ok(record)
    }

    fn remove_country(&self, id: EntityId) -> Result<(), StoreError> {
        self.tables
            .write()
            .countries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing("country", id))
    }
}

impl AuthorStore for MemoryStore {
    fn author_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        Ok(self.tables.read().authors.contains_key(&id))
    }

    fn author(&self, id: EntityId) -> Result<Option<Author>, StoreError> {
        Ok(self.tables.read().authors.get(&id).cloned())
    }

    fn authors(&self) -> Result<Vec<Author>, StoreError> {
        Ok(self.tables.read().authors.values().cloned().collect())
    }

    fn books_by_author(&self, author_id: EntityId) -> Result<Vec<Book>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .book_authors
            .iter()
            .filter(|(_, members)| members.contains(&author_id))
            .filter_map(|(book_id, _)| tables.books.get(book_id).cloned())
            .collect())
    }

    fn authors_of_book(&self, book_id: EntityId) -> Result<Vec<Author>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .book_authors
            .get(&book_id)
            .into_iter()
            .flatten()
            .filter_map(|id| tables.authors.get(id).cloned())
            .collect())
    }

    fn insert_author(&self, author: &ResolvedAuthor) -> Result<Author, StoreError> {
        let mut tables = self.tables.write();
        let id = tables.alloc();
        let record = Author {
            id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            country_id: author.country.id,
        };
        tables.authors.insert(id, record.clone());
        Ok(record)
    }

    fn update_author(&self, author: &ResolvedAuthor) -> Result<Author, StoreError> {
        let id = require_id(author.id, "author")?;
        let mut tables = self.tables.write();
        if !tables.authors.contains_key(&id) {
            return Err(missing("author", id));
        }
        let record = Author {
            id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            country_id: author.country.id,
        };
        tables.authors.insert(id, record.clone());
        Ok(record)
    }

    fn remove_author(&self, id: EntityId) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        tables
            .authors
            .remove(&id)
            .ok_or_else(|| missing("author", id))?;
        for members in tables.book_authors.values_mut() {
            members.retain(|m| *m != id);
        }
        Ok(())
    }
}

impl CategoryStore for MemoryStore {
    fn category_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        Ok(self.tables.read().categories.contains_key(&id))
    }

    fn category(&self, id: EntityId) -> Result<Option<Category>, StoreError> {
        Ok(self.tables.read().categories.get(&id).cloned())
    }

    fn category_by_name(&self, normalized: &str) -> Result<Option<Category>, StoreError> {
        Ok(self
            .tables
            .read()
            .categories
            .values()
            .find(|c| normalized_key(&c.name) == normalized)
            .cloned())
    }

    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut all: Vec<_> = self.tables.read().categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn books_in_category(&self, category_id: EntityId) -> Result<Vec<Book>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .book_categories
            .iter()
            .filter(|(_, members)| members.contains(&category_id))
            .filter_map(|(book_id, _)| tables.books.get(book_id).cloned())
            .collect())
    }

    fn categories_of_book(&self, book_id: EntityId) -> Result<Vec<Category>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .book_categories
            .get(&book_id)
            .into_iter()
            .flatten()
            .filter_map(|id| tables.categories.get(id).cloned())
            .collect())
    }

    fn insert_category(&self, category: &ResolvedCategory) -> Result<Category, StoreError> {
        let mut tables = self.tables.write();
        let id = tables.alloc();
        let record = Category {
            id,
            name: category.name.clone(),
        };
        tables.categories.insert(id, record.clone());
        Ok(record)
    }

    fn update_category(&self, category: &ResolvedCategory) -> Result<Category, StoreError> {
        let id = require_id(category.id, "category")?;
        let mut tables = self.tables.write();
        if !tables.categories.contains_key(&id) {
            return Err(missing("category", id));
        }
        let record = Category {
            id,
            name: category.name.clone(),
        };
        tables.categories.insert(id, record.clone());
        Ok(record)
    }

    fn remove_category(&self, id: EntityId) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        tables
            .categories
            .remove(&id)
            .ok_or_else(|| missing("category", id))?;
        for members in tables.book_categories.values_mut() {
            members.retain(|m| *m != id);
        }
        Ok(())
    }
}

impl BookStore for MemoryStore {
    fn book_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        Ok(self.tables.read().books.contains_key(&id))
    }

    fn book(&self, id: EntityId) -> Result<Option<Book>, StoreError> {
        Ok(self.tables.read().books.get(&id).cloned())
    }

    fn book_by_isbn(&self, normalized: &str) -> Result<Option<Book>, StoreError> {
        Ok(self
            .tables
            .read()
            .books
            .values()
            .find(|b| normalized_key(&b.isbn) == normalized)
            .cloned())
    }

    fn books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.tables.read().books.values().cloned().collect())
    }

    fn insert_book(&self, book: &ResolvedBook) -> Result<Book, StoreError> {
        let mut tables = self.tables.write();
        let id = tables.alloc();
        let record = Book {
            id,
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            published: book.published,
        };
        tables.books.insert(id, record.clone());
        Ok(record)
    }

    fn update_book(&self, book: &ResolvedBook) -> Result<Book, StoreError> {
        let id = require_id(book.id, "book")?;
        let mut tables = self.tables.write();
        if !tables.books.contains_key(&id) {
            return Err(missing("book", id));
        }
        let record = Book {
            id,
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            published: book.published,
        };
        tables.books.insert(id, record.clone());
        Ok(record)
    }

    fn remove_book(&self, id: EntityId) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        tables.books.remove(&id).ok_or_else(|| missing("book", id))?;
        tables.book_authors.remove(&id);
        tables.book_categories.remove(&id);
        Ok(())
    }

    fn set_book_authors(
        &self,
        book_id: EntityId,
        author_ids: &[EntityId],
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if !tables.books.contains_key(&book_id) {
            return Err(missing("book", book_id));
        }
        tables.book_authors.insert(book_id, author_ids.to_vec());
        Ok(())
    }

    fn set_book_categories(
        &self,
        book_id: EntityId,
        category_ids: &[EntityId],
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if !tables.books.contains_key(&book_id) {
            return Err(missing("book", book_id));
        }
        tables.book_categories.insert(book_id, category_ids.to_vec());
        Ok(())
    }
}

impl ReviewerStore for MemoryStore {
    fn reviewer_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        Ok(self.tables.read().reviewers.contains_key(&id))
    }

    fn reviewer(&self, id: EntityId) -> Result<Option<Reviewer>, StoreError> {
        Ok(self.tables.read().reviewers.get(&id).cloned())
    }

    fn reviewers(&self) -> Result<Vec<Reviewer>, StoreError> {
        Ok(self.tables.read().reviewers.values().cloned().collect())
    }

    fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .tables
            .read()
            .reviews
            .values()
            .filter(|r| r.reviewer_id == reviewer_id)
            .cloned()
            .collect())
    }

    fn insert_reviewer(&self, reviewer: &ResolvedReviewer) -> Result<Reviewer, StoreError> {
        let mut tables = self.tables.write();
        let id = tables.alloc();
        let record = Reviewer {
            id,
            first_name: reviewer.first_name.clone(),
            last_name: reviewer.last_name.clone(),
        };
        tables.reviewers.insert(id, record.clone());
        Ok(record)
    }

    fn update_reviewer(&self, reviewer: &ResolvedReviewer) -> Result<Reviewer, StoreError> {
        let id = require_id(reviewer.id, "reviewer")?;
        let mut tables = self.tables.write();
        if !tables.reviewers.contains_key(&id) {
            return Err(missing("reviewer", id));
        }
        let record = Reviewer {
            id,
            first_name: reviewer.first_name.clone(),
            last_name: reviewer.last_name.clone(),
        };
        tables.reviewers.insert(id, record.clone());
        Ok(record)
    }

    fn remove_reviewer(&self, id: EntityId) -> Result<(), StoreError> {
        self.tables
            .write()
            .reviewers
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing("reviewer", id))
    }
}

impl ReviewStore for MemoryStore {
    fn review_exists(&self, id: EntityId) -> Result<bool, StoreError> {
        Ok(self.tables.read().reviews.contains_key(&id))
    }

    fn review(&self, id: EntityId) -> Result<Option<Review>, StoreError> {
        Ok(self.tables.read().reviews.get(&id).cloned())
    }

    fn reviews(&self) -> Result<Vec<Review>, StoreError> {
        let mut all: Vec<_> = self.tables.read().reviews.values().cloned().collect();
        all.sort_by_key(|r| r.rating);
        Ok(all)
    }

    fn reviews_of_book(&self, book_id: EntityId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .tables
            .read()
            .reviews
            .values()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect())
    }

    fn insert_review(&self, review: &ResolvedReview) -> Result<Review, StoreError> {
        let mut tables = self.tables.write();
        let id = tables.alloc();
        let record = Review {
            id,
            headline: review.headline.clone(),
            body: review.body.clone(),
            rating: review.rating,
            book_id: review.book.id,
            reviewer_id: review.reviewer.id,
        };
        tables.reviews.insert(id, record.clone());
        Ok(record)
    }

    fn update_review(&self, review: &ResolvedReview) -> Result<Review, StoreError> {
        let id = require_id(review.id, "review")?;
        let mut tables = self.tables.write();
        if !tables.reviews.contains_key(&id) {
            return Err(missing("review", id));
        }
        let record = Review {
            id,
            headline: review.headline.clone(),
            body: review.body.clone(),
            rating: review.rating,
            book_id: review.book.id,
            reviewer_id: review.reviewer.id,
        };
        tables.reviews.insert(id, record.clone());
        Ok(record)
    }

    fn remove_review(&self, id: EntityId) -> Result<(), StoreError> {
        self.tables
            .write()
            .reviews
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing("review", id))
    }

    fn remove_reviews(&self, ids: &[EntityId]) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        for id in ids {
            tables.reviews.remove(id).ok_or_else(|| missing("review", *id))?;
        }
        Ok(())
    }
}
