//! Category rules.

use tracing::debug;

use crate::error::{EntityKind, Error, Rejection, Verdict};
use crate::model::{CategoryDraft, EntityId, ResolvedCategory, MAX_CATEGORY_NAME};
use crate::store::{normalized_key, CatalogStore};

use super::{checked_name, identity_guard, IntegrityEngine};

impl<'a, S: CatalogStore> IntegrityEngine<'a, S> {
    /// Validate a category creation. Never writes.
    pub fn validate_create_category(
        &self,
        payload: Option<CategoryDraft>,
    ) -> Verdict<ResolvedCategory> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        self.check_category(&draft, None)
    }

    /// Validate a category update. Never writes.
    pub fn validate_update_category(
        &self,
        path_id: EntityId,
        payload: Option<CategoryDraft>,
    ) -> Verdict<ResolvedCategory> {
        let draft = payload.ok_or_else(|| Rejection::of(Error::MissingPayload))?;
        identity_guard(path_id, draft.id)?;
        if !self.store.category_exists(path_id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Category,
                id: path_id,
            }));
        }
        self.check_category(&draft, Some(path_id))
    }

    fn check_category(
        &self,
        draft: &CategoryDraft,
        own_id: Option<EntityId>,
    ) -> Verdict<ResolvedCategory> {
        let mut errors = Rejection::new();
        let name = checked_name(
            &mut errors,
            EntityKind::Category,
            "name",
            &draft.name,
            MAX_CATEGORY_NAME,
        );

        if let Some(existing) = self.store.category_by_name(&normalized_key(&draft.name))? {
            if own_id != Some(existing.id) {
                errors.push(Error::DuplicateKey {
                    entity: EntityKind::Category,
                    field: "name",
                    value: name.clone(),
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ResolvedCategory { id: own_id, name })
    }

    /// Delete a category. Blocked while any book is a member of it.
    pub fn delete_category(&self, id: EntityId) -> Verdict<()> {
        if !self.store.category_exists(id)? {
            return Err(Rejection::of(Error::NotFound {
                entity: EntityKind::Category,
                id,
            }));
        }
        let dependents = self.store.books_in_category(id)?;
        if !dependents.is_empty() {
            return Err(Rejection::of(Error::Conflict {
                entity: EntityKind::Category,
                id,
                dependents: EntityKind::Book,
                count: dependents.len(),
            }));
        }
        self.store.remove_category(id)?;
        debug!(category = id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ResolvedBook};
    use crate::store::{BookStore, CategoryStore, MemoryStore};
    use chrono::NaiveDate;

    fn seed_category(store: &MemoryStore, name: &str) -> Category {
        store
            .insert_category(&ResolvedCategory {
                id: None,
                name: name.to_string(),
            })
            .unwrap()
    }

    fn draft(name: &str) -> Option<CategoryDraft> {
        Some(CategoryDraft {
            id: None,
            name: name.to_string(),
        })
    }

    #[test]
    fn test_duplicate_name_is_rejected_case_insensitively() {
        let store = MemoryStore::new();
        seed_category(&store, "Novel");
        let engine = IntegrityEngine::new(&store);

        let rejection = engine.validate_create_category(draft(" NOVEL ")).unwrap_err();
        assert!(matches!(
            rejection.errors(),
            [Error::DuplicateKey {
                entity: EntityKind::Category,
                ..
            }]
        ));
    }

    #[test]
    fn test_rename_to_own_name_is_allowed() {
        let store = MemoryStore::new();
        let novel = seed_category(&store, "Novel");
        let engine = IntegrityEngine::new(&store);

        let payload = Some(CategoryDraft {
            id: Some(novel.id),
            name: "novel".to_string(),
        });
        assert!(engine.validate_update_category(novel.id, payload).is_ok());
    }

    #[test]
    fn test_delete_blocked_while_a_book_is_a_member() {
        let store = MemoryStore::new();
        let novel = seed_category(&store, "Novel");
        let book = store
            .insert_book(&ResolvedBook {
                id: None,
                title: "Les Misérables".to_string(),
                isbn: "123".to_string(),
                published: NaiveDate::from_ymd_opt(1862, 4, 3).unwrap(),
                authors: Vec::new(),
                categories: Vec::new(),
            })
            .unwrap();
        store.set_book_categories(book.id, &[novel.id]).unwrap();
        let engine = IntegrityEngine::new(&store);

        let rejection = engine.delete_category(novel.id).unwrap_err();
        assert!(matches!(
            rejection.errors(),
            [Error::Conflict {
                entity: EntityKind::Category,
                dependents: EntityKind::Book,
                ..
            }]
        ));
    }

    #[test]
    fn test_delete_without_members_succeeds() {
        let store = MemoryStore::new();
        let novel = seed_category(&store, "Novel");
        let engine = IntegrityEngine::new(&store);
        engine.delete_category(novel.id).unwrap();
        assert!(!store.category_exists(novel.id).unwrap());
    }
}
