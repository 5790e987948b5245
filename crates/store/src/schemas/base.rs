//! Identity and timestamp fields shared by every persisted entity.

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Source of the values used for omitted identity/timestamp fields.
pub trait MetaGenerator {
    fn new_uuid(&self) -> uuid::Uuid;

    fn now(&self) -> Timestamp;
}

/// Random v4 identifiers and the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGenerator;

impl MetaGenerator for SystemGenerator {
    fn new_uuid(&self) -> uuid::Uuid {
        uuid::Uuid::new_v4()
    }

    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Identity and bookkeeping fields of a record of kind `T`.
///
/// Every field can be supplied explicitly; anything omitted is filled at
/// construction. When both timestamps are omitted they share one instant.
#[derive(Debug)]
pub struct RecordMeta<T> {
    pub id: TypedUuid<T>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<T> RecordMeta<T> {
    /// Fresh metadata from the system generator.
    #[must_use]
    pub fn new() -> Self {
        Self::generate(&SystemGenerator)
    }

    /// Fresh metadata with a pinned identifier.
    #[must_use]
    pub fn with_id(id: TypedUuid<T>) -> Self {
        Self::resolve(Some(id), None, None, &SystemGenerator)
    }

    /// Fresh metadata from `generator`.
    #[must_use]
    pub fn generate(generator: &impl MetaGenerator) -> Self {
        Self::resolve(None, None, None, generator)
    }

    /// Combine explicit values with generated defaults. Explicit values win.
    #[must_use]
    pub fn resolve(
        id: Option<TypedUuid<T>>,
        created_at: Option<Timestamp>,
        updated_at: Option<Timestamp>,
        generator: &impl MetaGenerator,
    ) -> Self {
        let id = id.unwrap_or_else(|| TypedUuid::from_uuid(generator.new_uuid()));

        let (created_at, updated_at) = match (created_at, updated_at) {
            (Some(created_at), Some(updated_at)) => (created_at, updated_at),
            (Some(created_at), None) => (created_at, generator.now()),
            (None, Some(updated_at)) => (generator.now(), updated_at),
            (None, None) => {
                let now = generator.now();

                (now, now)
            }
        };

        Self {
            id,
            created_at,
            updated_at,
        }
    }
}

impl<T> Default for RecordMeta<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordMeta<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl<T> PartialEq for RecordMeta<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
    }
}

/// Accessors for types carrying [`RecordMeta`].
pub trait Record {
    type Kind;

    fn meta(&self) -> &RecordMeta<Self::Kind>;

    fn id(&self) -> TypedUuid<Self::Kind> {
        self.meta().id
    }

    fn created_at(&self) -> Timestamp {
        self.meta().created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.meta().updated_at
    }
}
