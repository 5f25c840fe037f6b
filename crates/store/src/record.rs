//! Record and patch contracts for store-managed entities.

use chrono::{DateTime, Utc};
use smilodon_core::Entity;

/// A record that can live in an [`crate::EntityStore`].
///
/// The store owns identity and creation time: callers hand in a
/// [`Record::Draft`] with the domain fields, and the store hydrates the full
/// record with a fresh id and the current timestamp.
pub trait Record: Entity + Clone + Send + 'static {
    /// Caller-supplied fields for a new record.
    type Draft;

    /// Generate a fresh id for this record type.
    fn fresh_id() -> Self::Id;

    /// Build the full record from a draft plus store-assigned id and
    /// creation timestamp.
    fn hydrate(id: Self::Id, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;
}

/// A shallow merge into an existing record.
///
/// Patch types carry `Option` fields; set fields replace the record's,
/// unset fields keep the current value.
pub trait Patch<R: Record> {
    fn apply_to(self, record: &mut R);
}
