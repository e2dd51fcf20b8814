//! Review rules.

use tracing::debug;

use crate::error::{EntityKind, Error, Rejection, Verdict};
use crate::model::{
    EntityId, ResolvedReview, ReviewDraft, MAX_BODY, MAX_HEADLINE, MAX_RATING, MIN_BODY,
    MIN_HEADLINE, MIN_RATING,
};
use crate::store::CatalogStore;

use super::resolver::resolve_ref;
use super::{checked_text, identity_guard, IntegrityEngine};

impl<'a, S: CatalogStore> IntegrityEngine<'a, S> {
    /// Validate a review creation. Both references resolve to full
    /// record copies on acceptance. Never writes.
    pub fn validate_create_review(&self, payload: Option<ReviewDraft>) -> Verdict<ResolvedReview> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        self.check_review(&draft, None)
    }

    /// Validate a review update. Never writes.
    pub fn validate_update_review(
        &self,
        path_id: EntityId,
        payload: Option<ReviewDraft>,
    ) -> Verdict<ResolvedReview> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        identity_guard(path_id, draft.id)?;
        if !self.store.review_exists(path_id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Review,
                id: path_id,
            }));
        }
        self.check_review(&draft, Some(path_id))
    }

    fn check_review(&self, draft: &ReviewDraft, own_id: Option<EntityId>) -> Verdict<ResolvedReview> {
        let mut errors = Rejection::new();
        let headline = checked_text(
            &mut errors,
            EntityKind::Review,
            "headline",
            &draft.headline,
            MIN_HEADLINE,
            MAX_HEADLINE,
        );
        let body = checked_text(
            &mut errors,
            EntityKind::Review,
            "body",
            &draft.body,
            MIN_BODY,
            MAX_BODY,
        );
        if !(MIN_RATING..=MAX_RATING).contains(&draft.rating) {
            errors.push(Error::InvalidField {
                entity: EntityKind::Review,
                field: "rating",
                reason: format!("must be between {MIN_RATING} and {MAX_RATING} stars"),
            });
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        // Reviewer first, then book; the first missing reference aborts.
        let reviewer = resolve_ref(draft.reviewer_id, EntityKind::Reviewer, |id| {
            self.store.reviewer(id)
        })?;
        let book = resolve_ref(draft.book_id, EntityKind::Book, |id| self.store.book(id))?;

        Ok(ResolvedReview {
            id: own_id,
            headline,
            body,
            rating: draft.rating,
            book,
            reviewer,
        })
    }

    /// Delete a single review. No dependents, single-step.
    pub fn delete_review(&self, id: EntityId) -> Verdict<()> {
        if !self.store.review_exists(id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Review,
                id,
            }));
        }
        self.store.remove_review(id)?;
        debug!(review = id, "review deleted");
        Ok(())
    }
}
