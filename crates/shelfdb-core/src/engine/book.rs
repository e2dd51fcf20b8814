//! Book rules.
//!
//! The most relational entity: an ISBN natural key plus two required
//! many-to-many membership sets, and the two-phase delete cascade over
//! dependent reviews.

use tracing::{debug, warn};

use crate::error::{EntityKind, Error, Rejection, Verdict};
use crate::model::{BookDraft, EntityId, ResolvedBook};
use crate::store::{normalized_key, CatalogStore};

use super::resolver::resolve_id_set;
use super::{checked_name, identity_guard, IntegrityEngine};

// Title and ISBN are required but carry no upper bound.
const NO_BOUND: usize = usize::MAX;

impl<'a, S: CatalogStore> IntegrityEngine<'a, S> {
    /// Validate a book creation. Both id sets must be non-empty and
    /// resolve in full; the sets come back de-duplicated as record
    /// copies. Never writes.
    pub fn validate_create_book(
        &self,
        payload: Option<BookDraft>,
        author_ids: &[EntityId],
        category_ids: &[EntityId],
    ) -> Verdict<ResolvedBook> {
        let draft = require_book_input(payload, author_ids, category_ids)?;
        self.check_book(&draft, None, author_ids, category_ids)
    }

    /// Validate a book update. Never writes.
    pub fn validate_update_book(
        &self,
        path_id: EntityId,
        payload: Option<BookDraft>,
        author_ids: &[EntityId],
        category_ids: &[EntityId],
    ) -> Verdict<ResolvedBook> {
        let draft = require_book_input(payload, author_ids, category_ids)?;
        identity_guard(path_id, draft.id)?;
        if !self.store.book_exists(path_id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Book,
                id: path_id,
            }));
        }
        self.check_book(&draft, Some(path_id), author_ids, category_ids)
    }

    fn check_book(
        &self,
        draft: &BookDraft,
        own_id: Option<EntityId>,
        author_ids: &[EntityId],
        category_ids: &[EntityId],
    ) -> Verdict<ResolvedBook> {
        let mut errors = Rejection::new();
        let title = checked_name(&mut errors, EntityKind::Book, "title", &draft.title, NO_BOUND);
        let isbn = checked_name(&mut errors, EntityKind::Book, "isbn", &draft.isbn, NO_BOUND);

        if let Some(existing) = self.store.book_by_isbn(&normalized_key(&draft.isbn))? {
            if own_id != Some(existing.id) {
                errors.push(Error::DuplicateKey {
                    entity: EntityKind::Book,
                    field: "isbn",
                    value: isbn.clone(),
                });
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        // Authors first, then categories; the first missing id aborts.
        let authors = resolve_id_set(author_ids, EntityKind::Author, |id| self.store.author(id))?;
        let categories =
            resolve_id_set(category_ids, EntityKind::Category, |id| self.store.category(id))?;

        Ok(ResolvedBook {
            id: own_id,
            title,
            isbn,
            published: draft.published,
            authors,
            categories,
        })
    }

    /// Delete a book and its dependent reviews.
    ///
    /// Two phases: every review of the book is removed first, then the
    /// record itself. A failure in the first phase leaves the book in
    /// place and surfaces the store error verbatim; a failure in the
    /// second phase, after the reviews are already gone, is reported as
    /// `PartialFailure` so the caller can decide on compensation.
    pub fn delete_book(&self, id: EntityId) -> Verdict<()> {
        if !self.store.book_exists(id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Book,
                id,
            }));
        }
        let review_ids: Vec<EntityId> = self
            .store
            .reviews_of_book(id)?
            .into_iter()
            .map(|r| r.id)
            .collect();

        self.store.remove_reviews(&review_ids)?;
        if let Err(source) = self.store.remove_book(id) {
            warn!(
                book = id,
                reviews = review_ids.len(),
                "cascade removed reviews but the book delete failed"
            );
            return Err(Rejection::of(Error::PartialFailure {
                entity: EntityKind::Book,
                id,
                source,
            }));
        }
        debug!(book = id, reviews = review_ids.len(), "book deleted");
        Ok(())
    }
}

fn require_book_input(
    payload: Option<BookDraft>,
    author_ids: &[EntityId],
    category_ids: &[EntityId],
) -> Result<BookDraft, Rejection> {
    // A missing body and an empty id set are the same failure: nothing
    // to validate against.
    match payload {
        Some(draft) if !author_ids.is_empty() && !category_ids.is_empty() => Ok(draft),
        _ => Err(Rejection::of(Error::MissingPayload)),
    }
}
