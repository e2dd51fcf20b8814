//! Author rules.

use tracing::debug;

use crate::error::{EntityKind, Error, Rejection, Verdict};
use crate::model::{AuthorDraft, EntityId, ResolvedAuthor, MAX_FIRST_NAME, MAX_LAST_NAME};
use crate::store::CatalogStore;

use super::resolver::resolve_ref;
use super::{checked_name, identity_guard, IntegrityEngine};

impl<'a, S: CatalogStore> IntegrityEngine<'a, S> {
    /// Validate an author creation. The country reference is resolved
    /// to a full record copy on acceptance. Never writes.
    pub fn validate_create_author(&self, payload: Option<AuthorDraft>) -> Verdict<ResolvedAuthor> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        self.check_author(&draft, None)
    }

    /// Validate an author update. Never writes.
    pub fn validate_update_author(
        &self,
        path_id: EntityId,
        payload: Option<AuthorDraft>,
    ) -> Verdict<ResolvedAuthor> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        identity_guard(path_id, draft.id)?;
        if !self.store.author_exists(path_id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Author,
                id: path_id,
            }));
        }
        self.check_author(&draft, Some(path_id))
    }

    fn check_author(&self, draft: &AuthorDraft, own_id: Option<EntityId>) -> Verdict<ResolvedAuthor> {
        let mut errors = Rejection::new();
        let first_name = checked_name(
            &mut errors,
            EntityKind::Author,
            "first_name",
            &draft.first_name,
            MAX_FIRST_NAME,
        );
        let last_name = checked_name(
            &mut errors,
            EntityKind::Author,
            "last_name",
            &draft.last_name,
            MAX_LAST_NAME,
        );
        if !errors.is_empty() {
            return Err(errors);
        }

        let country = resolve_ref(draft.country_id, EntityKind::Country, |id| {
            self.store.country(id)
        })?;

        Ok(ResolvedAuthor {
            id: own_id,
            first_name,
            last_name,
            country,
        })
    }

    /// Delete an author. Blocked while any book lists them as a member.
    pub fn delete_author(&self, id: EntityId) -> Verdict<()> {
        if !self.store.author_exists(id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Author,
                id,
            }));
        }
        let dependents = self.store.books_by_author(id)?;
        if !dependents.is_empty() {
            return Err(Rejection::of(Error::Conflict {
                entity: EntityKind::Author,
                id,
                dependents: EntityKind::Book,
                count: dependents.len(),
            }));
        }
        self.store.remove_author(id)?;
        debug!(author = id, "author deleted");
        Ok(())
    }
}
