//! The integrity engine.
//!
//! One rules module per entity type, all hanging off [`IntegrityEngine`].
//! Create and update are pure decisions: they read the store, return a
//! resolved graph on acceptance, and never write. Delete additionally
//! drives the store, because the book and reviewer cascades are a
//! two-phase protocol the engine owns (dependent reviews first, then
//! the primary record).
//!
//! Rule order is fixed and observable through which error surfaces
//! first: missing payload, then path/payload identity, then primary
//! existence, then field bounds and natural-key duplicates (the one
//! place errors accumulate), then reference resolution (fail-fast on
//! the first missing id), then delete dependency checks.

mod author;
mod book;
mod category;
mod country;
mod resolver;
mod review;
mod reviewer;

use crate::error::{EntityKind, Error, Rejection};
use crate::model::EntityId;
use crate::store::CatalogStore;

/// Stateless validator over one consistent store snapshot.
///
/// Holds no cache and no session; every call reads fresh. Callers may
/// share one engine per request or build one per call, it makes no
/// difference.
pub struct IntegrityEngine<'a, S: CatalogStore> {
    store: &'a S,
}

impl<'a, S: CatalogStore> IntegrityEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

/// Update guard: the path id and the payload id must agree. Runs before
/// any store read.
fn identity_guard(path_id: EntityId, payload_id: Option<EntityId>) -> Result<(), Rejection> {
    if payload_id != Some(path_id) {
        return Err(Rejection::of(Error::IdentityMismatch {
            path_id,
            payload_id,
        }));
    }
    Ok(())
}

/// Required-name check: non-empty after trimming, at most `max`
/// characters. Violations accumulate; the trimmed value is returned
/// either way so the caller can keep collecting.
fn checked_name(
    errors: &mut Rejection,
    entity: EntityKind,
    field: &'static str,
    value: &str,
    max: usize,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(Error::InvalidField {
            entity,
            field,
            reason: "must not be empty".to_string(),
        });
    } else if trimmed.chars().count() > max {
        errors.push(Error::InvalidField {
            entity,
            field,
            reason: format!("must be at most {max} characters"),
        });
    }
    trimmed.to_string()
}

/// Ranged-text check: trimmed length within `min..=max` characters.
fn checked_text(
    errors: &mut Rejection,
    entity: EntityKind,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> String {
    let trimmed = value.trim();
    let chars = trimmed.chars().count();
    if chars < min || chars > max {
        errors.push(Error::InvalidField {
            entity,
            field,
            reason: format!("must be between {min} and {max} characters"),
        });
    }
    trimmed.to_string()
}
