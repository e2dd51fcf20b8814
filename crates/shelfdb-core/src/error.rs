//! Core error types.

use std::fmt;

use thiserror::Error;

use crate::model::EntityId;

/// The entity types the catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Country,
    Author,
    Category,
    Book,
    Reviewer,
    Review,
}

impl EntityKind {
    /// Human-readable singular name.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Country => "country",
            EntityKind::Author => "author",
            EntityKind::Category => "category",
            EntityKind::Book => "book",
            EntityKind::Reviewer => "reviewer",
            EntityKind::Review => "review",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque persistence failure reported by an entity store.
///
/// The engine never interprets these; they pass through to the caller
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("store failure: {0}")]
pub struct StoreError(pub String);

/// A single validation failure produced by the integrity engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Required mutation input was absent (or, for books, a required
    /// relationship id set was empty).
    #[error("missing payload")]
    MissingPayload,

    /// The path id and the payload id disagree on an update.
    #[error("path id {path_id} does not match payload id {payload_id:?}")]
    IdentityMismatch {
        path_id: EntityId,
        payload_id: Option<EntityId>,
    },

    /// The primary record, or a referenced record, does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: EntityId },

    /// A natural-key uniqueness rule was violated.
    #[error("{entity} with {field} '{value}' already exists")]
    DuplicateKey {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },

    /// A field value fell outside its declared bounds.
    #[error("{entity} {field} {reason}")]
    InvalidField {
        entity: EntityKind,
        field: &'static str,
        reason: String,
    },

    /// A delete is blocked by records that still reference the target.
    #[error("{entity} {id} is still referenced by {count} {dependents}(s)")]
    Conflict {
        entity: EntityKind,
        id: EntityId,
        dependents: EntityKind,
        count: usize,
    },

    /// A two-phase cascade removed its dependent reviews but failed on
    /// the primary record. The store is left without the dependents.
    #[error("cascade for {entity} {id} removed dependents but failed on the record itself: {source}")]
    PartialFailure {
        entity: EntityKind,
        id: EntityId,
        #[source]
        source: StoreError,
    },

    /// Persistence failure, propagated without interpretation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The ordered error list behind a rejected verdict.
///
/// Field-bound and duplicate-key checks may contribute more than one
/// entry; every other rule fails fast with a single entry. Never
/// constructed empty by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    errors: Vec<Error>,
}

impl Rejection {
    /// Empty accumulator for the checks that may collect several errors.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// A rejection carrying a single error.
    pub fn of(error: Error) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub(crate) fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The collected errors, in the order the checks ran.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}

impl From<Error> for Rejection {
    fn from(error: Error) -> Self {
        Rejection::of(error)
    }
}

impl From<StoreError> for Rejection {
    fn from(error: StoreError) -> Self {
        Rejection::of(Error::Store(error))
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Rejection {}

/// Outcome of one engine call: the resolved value, or the rejection.
pub type Verdict<T> = Result<T, Rejection>;
