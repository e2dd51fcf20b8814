//! Reference resolution.
//!
//! Turns supplied ids into validated record copies. Many-to-many sets
//! are de-duplicated first (first occurrence wins); the first id with
//! no backing record aborts resolution, so a rejection names exactly
//! one missing reference.

use std::collections::BTreeSet;

use crate::error::{EntityKind, Error, Rejection, StoreError};
use crate::model::EntityId;

/// Resolve a singular required reference.
pub(super) fn resolve_ref<T, F>(
    id: EntityId,
    entity: EntityKind,
    mut fetch: F,
) -> Result<T, Rejection>
where
    F: FnMut(EntityId) -> Result<Option<T>, StoreError>,
{
    match fetch(id)? {
        Some(record) => Ok(record),
        None => Err(Rejection::of(Error::NotFound { entity, id })),
    }
}

/// Resolve a many-to-many id set into record copies.
pub(super) fn resolve_id_set<T, F>(
    ids: &[EntityId],
    entity: EntityKind,
    mut fetch: F,
) -> Result<Vec<T>, Rejection>
where
    F: FnMut(EntityId) -> Result<Option<T>, StoreError>,
{
    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.insert(id) {
            continue;
        }
        match fetch(id)? {
            Some(record) => records.push(record),
            None => return Err(Rejection::of(Error::NotFound { entity, id })),
        }
    }
    Ok(records)
}
