//! Country rules.

use tracing::debug;

use crate::error::{EntityKind, Error, Rejection, Verdict};
use crate::model::{CountryDraft, EntityId, ResolvedCountry, MAX_COUNTRY_NAME};
use crate::store::{normalized_key, CatalogStore};

use super::{checked_name, identity_guard, IntegrityEngine};

impl<'a, S: CatalogStore> IntegrityEngine<'a, S> {
    /// Validate a country creation. Never writes.
    pub fn validate_create_country(
        &self,
        payload: Option<CountryDraft>,
    ) -> Verdict<ResolvedCountry> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        self.check_country(&draft, None)
    }

    /// Validate a country update. Never writes.
    pub fn validate_update_country(
        &self,
        path_id: EntityId,
        payload: Option<CountryDraft>,
    ) -> Verdict<ResolvedCountry> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        identity_guard(path_id, draft.id)?;
        if !self.store.country_exists(path_id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Country,
                id: path_id,
            }));
        }
        self.check_country(&draft, Some(path_id))
    }

    /// Field bounds and natural-key uniqueness, collected together.
    /// `own_id` excludes the record itself from the duplicate check on
    /// update.
    fn check_country(
        &self,
        draft: &CountryDraft,
        own_id: Option<EntityId>,
    ) -> Verdict<ResolvedCountry> {
        let mut errors = Rejection::new();
        let name = checked_name(
            &mut errors,
            EntityKind::Country,
            "name",
            &draft.name,
            MAX_COUNTRY_NAME,
        );

        if let Some(existing) = self.store.country_by_name(&normalized_key(&draft.name))? {
            if own_id != Some(existing.id) {
                errors.push(Error::DuplicateKey {
                    entity: EntityKind::Country,
                    field: "name",
                    value: name.clone(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ResolvedCountry { id: own_id, name })
    }

    /// Delete a country. Blocked while any author still references it.
    pub fn delete_country(&self, id: EntityId) -> Verdict<()> {
        if !self.store.country_exists(id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Country,
                id,
            }));
        }
        let dependents = self.store.authors_from_country(id)?;
        if !dependents.is_empty() {
            return Err(Rejection::of(Error::Conflict {
                entity: EntityKind::Country,
                id,
                dependents: EntityKind::Author,
                count: dependents.len(),
            }));
        }
        self.store.remove_country(id)?;
        debug!(country = id, "country deleted");
        Ok(())
    }
}
