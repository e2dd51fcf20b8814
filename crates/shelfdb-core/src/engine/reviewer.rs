//! Reviewer rules.

use tracing::{debug, warn};

use crate::error::{EntityKind, Error, Rejection, Verdict};
use crate::model::{EntityId, ResolvedReviewer, ReviewerDraft};
use crate::store::CatalogStore;

use super::{checked_name, identity_guard, IntegrityEngine};

// Reviewer names are required but unbounded.
const NO_BOUND: usize = usize::MAX;

impl<'a, S: CatalogStore> IntegrityEngine<'a, S> {
    /// Validate a reviewer creation. Never writes.
    pub fn validate_create_reviewer(
        &self,
        payload: Option<ReviewerDraft>,
    ) -> Verdict<ResolvedReviewer> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        check_reviewer(&draft, None)
    }

    /// Validate a reviewer update. Never writes.
    pub fn validate_update_reviewer(
        &self,
        path_id: EntityId,
        payload: Option<ReviewerDraft>,
    ) -> Verdict<ResolvedReviewer> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        identity_guard(path_id, draft.id)?;
        if !self.store.reviewer_exists(path_id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Reviewer,
                id: path_id,
            }));
        }
        check_reviewer(&draft, Some(path_id))
    }

    /// Delete a reviewer and every review they wrote, reviews first.
    /// Same two-phase protocol as the book cascade.
    pub fn delete_reviewer(&self, id: EntityId) -> Verdict<()> {
        if !self.store.reviewer_exists(id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Reviewer,
                id,
            }));
        }
        let review_ids: Vec<EntityId> = self
            .store
            .reviews_by_reviewer(id)?
            .into_iter()
            .map(|r| r.id)
            .collect();

        self.store.remove_reviews(&review_ids)?;
        if let Err(source) = self.store.remove_reviewer(id) {
            warn!(
                reviewer = id,
                reviews = review_ids.len(),
                "cascade removed reviews but the reviewer delete failed"
            );
            return Err(Rejection::of(Error::PartialFailure {
                entity: EntityKind::Reviewer,
                id,
                source,
            }));
        }
        debug!(reviewer = id, reviews = review_ids.len(), "reviewer deleted");
        Ok(())
    }
}

fn check_reviewer(draft: &ReviewerDraft, own_id: Option<EntityId>) -> Verdict<ResolvedReviewer> {
    let mut errors = Rejection::new();
    let first_name = checked_name(
        &mut errors,
        EntityKind::Reviewer,
        "first_name",
        &draft.first_name,
        NO_BOUND,
    );
    let last_name = checked_name(
        &mut errors,
        EntityKind::Reviewer,
        "last_name",
        &draft.last_name,
        NO_BOUND,
    );
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ResolvedReviewer {
        id: own_id,
        first_name,
        last_name,
    })
}
