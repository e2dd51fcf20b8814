//! Relationship-traversal reads.
//!
//! Thin, read-only passes over the store boundary: each query checks
//! that its anchor record exists, then returns the related records.
//! They share the engine's error taxonomy but always carry exactly one
//! error, so they return `Error` directly rather than a `Rejection`.

use crate::error::{EntityKind, Error};
use crate::model::{Author, Book, Category, Country, EntityId, Review, Reviewer};
use crate::store::CatalogStore;

fn require<S: CatalogStore>(
    store: &S,
    entity: EntityKind,
    id: EntityId,
) -> Result<(), Error> {
    let exists = match entity {
        EntityKind::Country => store.country_exists(id)?,
        EntityKind::Author => store.author_exists(id)?,
        EntityKind::Category => store.category_exists(id)?,
        EntityKind::Book => store.book_exists(id)?,
        EntityKind::Reviewer => store.reviewer_exists(id)?,
        EntityKind::Review => store.review_exists(id)?,
    };
    if exists {
        Ok(())
    } else {
        Err(Error::NotFound { entity, id })
    }
}

/// Books an author is a member of.
pub fn books_by_author<S: CatalogStore>(store: &S, author_id: EntityId) -> Result<Vec<Book>, Error> {
    require(store, EntityKind::Author, author_id)?;
    Ok(store.books_by_author(author_id)?)
}

/// The author set of a book.
pub fn authors_of_book<S: CatalogStore>(store: &S, book_id: EntityId) -> Result<Vec<Author>, Error> {
    require(store, EntityKind::Book, book_id)?;
    Ok(store.authors_of_book(book_id)?)
}

/// The category set of a book.
pub fn categories_of_book<S: CatalogStore>(
    store: &S,
    book_id: EntityId,
) -> Result<Vec<Category>, Error> {
    require(store, EntityKind::Book, book_id)?;
    Ok(store.categories_of_book(book_id)?)
}

/// Books that are members of a category.
pub fn books_in_category<S: CatalogStore>(
    store: &S,
    category_id: EntityId,
) -> Result<Vec<Book>, Error> {
    require(store, EntityKind::Category, category_id)?;
    Ok(store.books_in_category(category_id)?)
}

/// Authors whose country reference points at `country_id`.
pub fn authors_from_country<S: CatalogStore>(
    store: &S,
    country_id: EntityId,
) -> Result<Vec<Author>, Error> {
    require(store, EntityKind::Country, country_id)?;
    Ok(store.authors_from_country(country_id)?)
}

/// The country of an author.
pub fn country_of_author<S: CatalogStore>(
    store: &S,
    author_id: EntityId,
) -> Result<Country, Error> {
    let author = store
        .author(author_id)?
        .ok_or(Error::NotFound {
            entity: EntityKind::Author,
            id: author_id,
        })?;
    store.country(author.country_id)?.ok_or(Error::NotFound {
        entity: EntityKind::Country,
        id: author.country_id,
    })
}

/// Reviews of a book.
pub fn reviews_of_book<S: CatalogStore>(store: &S, book_id: EntityId) -> Result<Vec<Review>, Error> {
    require(store, EntityKind::Book, book_id)?;
    Ok(store.reviews_of_book(book_id)?)
}

/// Reviews written by a reviewer.
pub fn reviews_by_reviewer<S: CatalogStore>(
    store: &S,
    reviewer_id: EntityId,
) -> Result<Vec<Review>, Error> {
    require(store, EntityKind::Reviewer, reviewer_id)?;
    Ok(store.reviews_by_reviewer(reviewer_id)?)
}

/// The book a review is about.
pub fn book_of_review<S: CatalogStore>(store: &S, review_id: EntityId) -> Result<Book, Error> {
    let review = store.review(review_id)?.ok_or(Error::NotFound {
        entity: EntityKind::Review,
        id: review_id,
    })?;
    store.book(review.book_id)?.ok_or(Error::NotFound {
        entity: EntityKind::Book,
        id: review.book_id,
    })
}

/// The reviewer who wrote a review.
pub fn reviewer_of_review<S: CatalogStore>(
    store: &S,
    review_id: EntityId,
) -> Result<Reviewer, Error> {
    let review = store.review(review_id)?.ok_or(Error::NotFound {
        entity: EntityKind::Review,
        id: review_id,
    })?;
    store.reviewer(review.reviewer_id)?.ok_or(Error::NotFound {
        entity: EntityKind::Reviewer,
        id: review.reviewer_id,
    })
}

/// ISBN lookup. A plain lookup, not a verdict: a miss is `None`.
pub fn book_by_isbn<S: CatalogStore>(store: &S, isbn: &str) -> Result<Option<Book>, Error> {
    Ok(store.book_by_isbn(&crate::store::normalized_key(isbn))?)
}

/// Mean star rating of a book, `None` while unreviewed.
pub fn book_rating<S: CatalogStore>(store: &S, book_id: EntityId) -> Result<Option<f64>, Error> {
    require(store, EntityKind::Book, book_id)?;
    let reviews = store.reviews_of_book(book_id)?;
    if reviews.is_empty() {
        return Ok(None);
    }
    let total: i32 = reviews.iter().map(|r| r.rating).sum();
    Ok(Some(f64::from(total) / reviews.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResolvedBook, ResolvedReview, ResolvedReviewer};
    use crate::store::{BookStore, MemoryStore, ReviewStore, ReviewerStore};
    use chrono::NaiveDate;

    fn seed_book(store: &MemoryStore, isbn: &str) -> Book {
        store
            .insert_book(&ResolvedBook {
                id: None,
                title: "Les Misérables".to_string(),
                isbn: isbn.to_string(),
                published: NaiveDate::from_ymd_opt(1862, 4, 3).unwrap(),
                authors: Vec::new(),
                categories: Vec::new(),
            })
            .unwrap()
    }

    fn seed_review(store: &MemoryStore, book: &Book, rating: i32) {
        let reviewer = store
            .insert_reviewer(&ResolvedReviewer {
                id: None,
                first_name: "Jean".to_string(),
                last_name: "Valjean".to_string(),
            })
            .unwrap();
        store
            .insert_review(&ResolvedReview {
                id: None,
                headline: "A monument of a novel".to_string(),
                body: "Read it twice and will read it again.".to_string(),
                rating,
                book: book.clone(),
                reviewer,
            })
            .unwrap();
    }

    #[test]
    fn test_queries_reject_unknown_anchor_ids() {
        let store = MemoryStore::new();
        assert!(matches!(
            books_by_author(&store, 1),
            Err(Error::NotFound {
                entity: EntityKind::Author,
                id: 1
            })
        ));
        assert!(matches!(
            book_rating(&store, 2),
            Err(Error::NotFound {
                entity: EntityKind::Book,
                id: 2
            })
        ));
    }

    #[test]
    fn test_book_rating_averages_reviews() {
        let store = MemoryStore::new();
        let book = seed_book(&store, "123");

        assert_eq!(book_rating(&store, book.id).unwrap(), None);

        seed_review(&store, &book, 4);
        seed_review(&store, &book, 5);
        assert_eq!(book_rating(&store, book.id).unwrap(), Some(4.5));
    }

    #[test]
    fn test_book_by_isbn_is_normalized_and_optional() {
        let store = MemoryStore::new();
        let book = seed_book(&store, "1-86-092049-7");

        let hit = book_by_isbn(&store, " 1-86-092049-7 ").unwrap();
        assert_eq!(hit.map(|b| b.id), Some(book.id));
        assert!(book_by_isbn(&store, "none-such").unwrap().is_none());
    }
}
