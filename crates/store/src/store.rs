//! The reactive entity store.

use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tracing::trace;

use crate::record::{Patch, Record};
use crate::subscription::Subscription;

struct Inner<R> {
    records: Vec<R>,
    subscribers: Vec<mpsc::Sender<Vec<R>>>,
}

/// Authoritative in-memory holder + broadcaster for one record type.
///
/// Every mutation computes the new full sequence and delivers it to every
/// live subscriber before the mutating call returns. Mutation and delivery
/// share one lock, so each subscriber sees sequences in mutation order.
pub struct EntityStore<R: Record> {
    inner: Mutex<Inner<R>>,
}

impl<R: Record> EntityStore<R> {
    /// Empty store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Store seeded with an existing sequence (fixtures, tests).
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                records,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Clone of the current full sequence.
    pub fn snapshot(&self) -> Vec<R> {
        self.lock().records.clone()
    }

    /// Subscribe for the live sequence.
    ///
    /// The current sequence is delivered immediately (replay-latest), then
    /// the full new sequence after every mutation.
    pub fn subscribe(&self) -> Subscription<Vec<R>> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.lock();
        let _ = tx.send(inner.records.clone());
        inner.subscribers.push(tx);
        Subscription::new(rx)
    }

    /// Hydrate `draft` with a fresh id and the current timestamp, append it,
    /// and broadcast.
    ///
    /// Infallible: validation is the caller's responsibility, and an
    /// append to an in-memory sequence has no failure path.
    pub fn insert(&self, draft: R::Draft) -> R {
        let record = R::hydrate(R::fresh_id(), Utc::now(), draft);
        let mut inner = self.lock();
        inner.records.push(record.clone());
        broadcast(&mut inner);
        record
    }

    /// Shallow-merge `patch` into the record matching `id` and broadcast.
    ///
    /// An absent id is a silent no-op; the (unchanged) sequence is still
    /// re-broadcast.
    pub fn update<P: Patch<R>>(&self, id: R::Id, patch: P) {
        let mut inner = self.lock();
        if let Some(record) = inner.records.iter_mut().find(|r| r.id() == id) {
            patch.apply_to(record);
        }
        broadcast(&mut inner);
    }

    /// Filter out the record matching `id` and broadcast. No-op (with
    /// re-broadcast) if absent.
    pub fn remove(&self, id: R::Id) {
        let mut inner = self.lock();
        inner.records.retain(|r| r.id() != id);
        broadcast(&mut inner);
    }

    /// One-shot lookup by id against the current sequence.
    pub fn find_by_id(&self, id: R::Id) -> Option<R> {
        self.lock().records.iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    // A poisoned lock means a panic mid-broadcast or inside a patch; the
    // sequence itself is still well-formed, so keep serving it.
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Record> Default for EntityStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> core::fmt::Debug for EntityStore<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.lock();
        f.debug_struct("EntityStore")
            .field("records", &inner.records.len())
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Deliver the current sequence to every live subscriber, dropping any
/// whose receiving end is gone.
fn broadcast<R: Record>(inner: &mut Inner<R>) {
    let sequence = &inner.records;
    trace!(records = sequence.len(), "broadcasting sequence");
    inner
        .subscribers
        .retain(|tx| tx.send(sequence.clone()).is_ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use smilodon_core::{Entity, EntityId};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        id: EntityId,
        title: String,
        pinned: bool,
        created_at: DateTime<Utc>,
    }

    struct NoteDraft {
        title: String,
        pinned: bool,
    }

    impl Entity for Note {
        type Id = EntityId;

        fn id(&self) -> EntityId {
            self.id
        }
    }

    impl Record for Note {
        type Draft = NoteDraft;

        fn fresh_id() -> EntityId {
            EntityId::new()
        }

        fn hydrate(id: EntityId, created_at: DateTime<Utc>, draft: NoteDraft) -> Self {
            Self {
                id,
                title: draft.title,
                pinned: draft.pinned,
                created_at,
            }
        }
    }

    #[derive(Default)]
    struct NotePatch {
        title: Option<String>,
        pinned: Option<bool>,
    }

    impl Patch<Note> for NotePatch {
        fn apply_to(self, record: &mut Note) {
            if let Some(title) = self.title {
                record.title = title;
            }
            if let Some(pinned) = self.pinned {
                record.pinned = pinned;
            }
        }
    }

    fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            pinned: false,
        }
    }

    #[test]
    fn insert_appends_and_round_trips_fields() {
        let store: EntityStore<Note> = EntityStore::new();

        let note = store.insert(NoteDraft {
            title: "groceries".to_string(),
            pinned: true,
        });

        let sequence = store.snapshot();
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0], note);
        assert_eq!(sequence[0].title, "groceries");
        assert!(sequence[0].pinned);
    }

    #[test]
    fn each_insert_grows_emitted_sequence_by_one() {
        let store: EntityStore<Note> = EntityStore::new();
        let sub = store.subscribe();
        assert_eq!(sub.try_recv().unwrap().len(), 0);

        for n in 1..=5 {
            store.insert(draft(&format!("note {n}")));
            assert_eq!(sub.try_recv().unwrap().len(), n);
        }
    }

    #[test]
    fn subscribe_replays_latest_sequence_immediately() {
        let store: EntityStore<Note> = EntityStore::new();
        store.insert(draft("first"));
        store.insert(draft("second"));

        let sub = store.subscribe();
        let replay = sub.try_recv().unwrap();
        assert_eq!(replay.len(), 2);
        assert_eq!(replay[0].title, "first");
        assert_eq!(replay[1].title, "second");

        // Nothing else pending until the next mutation.
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn subscribers_see_mutations_in_order() {
        let store: EntityStore<Note> = EntityStore::new();
        let a = store.subscribe();
        let b = store.subscribe();

        let first = store.insert(draft("first"));
        store.insert(draft("second"));
        store.remove(first.id());

        for sub in [&a, &b] {
            assert_eq!(sub.try_recv().unwrap().len(), 0); // replay
            assert_eq!(sub.try_recv().unwrap().len(), 1);
            assert_eq!(sub.try_recv().unwrap().len(), 2);
            let last = sub.try_recv().unwrap();
            assert_eq!(last.len(), 1);
            assert_eq!(last[0].title, "second");
        }
    }

    #[test]
    fn update_merges_set_fields_and_keeps_the_rest() {
        let store: EntityStore<Note> = EntityStore::new();
        let note = store.insert(draft("draft title"));

        store.update(
            note.id(),
            NotePatch {
                title: Some("final title".to_string()),
                ..NotePatch::default()
            },
        );

        let updated = store.find_by_id(note.id()).unwrap();
        assert_eq!(updated.title, "final title");
        assert!(!updated.pinned);
        assert_eq!(updated.created_at, note.created_at);
    }

    #[test]
    fn update_with_absent_id_reemits_unchanged_sequence() {
        let store: EntityStore<Note> = EntityStore::new();
        store.insert(draft("only"));
        let before = store.snapshot();

        let sub = store.subscribe();
        sub.try_recv().unwrap(); // replay

        store.update(
            EntityId::new(),
            NotePatch {
                title: Some("never applied".to_string()),
                ..NotePatch::default()
            },
        );

        // Still broadcast, but content is unchanged.
        let emitted = sub.try_recv().unwrap();
        assert_eq!(emitted, before);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn remove_filters_record_and_is_noop_when_absent() {
        let store: EntityStore<Note> = EntityStore::new();
        let keep = store.insert(draft("keep"));
        let gone = store.insert(draft("gone"));

        store.remove(gone.id());
        assert_eq!(store.snapshot(), vec![keep.clone()]);

        store.remove(EntityId::new());
        assert_eq!(store.snapshot(), vec![keep]);
    }

    #[test]
    fn find_by_id_is_a_one_shot_lookup() {
        let store: EntityStore<Note> = EntityStore::new();
        let note = store.insert(draft("lookup"));

        assert_eq!(store.find_by_id(note.id()), Some(note.clone()));
        assert_eq!(store.find_by_id(EntityId::new()), None);

        // A later mutation is not reflected in the already-returned value.
        let found = store.find_by_id(note.id()).unwrap();
        store.update(
            note.id(),
            NotePatch {
                title: Some("changed".to_string()),
                ..NotePatch::default()
            },
        );
        assert_eq!(found.title, "lookup");
    }

    #[test]
    fn dropped_subscription_does_not_block_later_mutations() {
        let store: EntityStore<Note> = EntityStore::new();
        let sub = store.subscribe();
        drop(sub);

        store.insert(draft("after drop"));

        let fresh = store.subscribe();
        assert_eq!(fresh.try_recv().unwrap().len(), 1);
    }

    #[test]
    fn with_records_seeds_the_sequence() {
        let seeded = Note {
            id: EntityId::new(),
            title: "seeded".to_string(),
            pinned: false,
            created_at: Utc::now(),
        };
        let store = EntityStore::with_records(vec![seeded.clone()]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(seeded.id()), Some(seeded));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: for any sequence of inserts, the store's length and
            /// order match the inserted drafts, and every record round-trips
            /// its title.
            #[test]
            fn inserts_preserve_order_and_fields(titles in proptest::collection::vec("[a-z]{1,12}", 0..16)) {
                let store: EntityStore<Note> = EntityStore::new();
                for title in &titles {
                    store.insert(NoteDraft { title: title.clone(), pinned: false });
                }

                let sequence = store.snapshot();
                prop_assert_eq!(sequence.len(), titles.len());
                for (record, title) in sequence.iter().zip(&titles) {
                    prop_assert_eq!(&record.title, title);
                }
            }

            /// Property: updates against ids that were never issued leave the
            /// sequence unchanged.
            #[test]
            fn absent_id_updates_never_change_the_sequence(titles in proptest::collection::vec("[a-z]{1,12}", 1..8)) {
                let store: EntityStore<Note> = EntityStore::new();
                for title in &titles {
                    store.insert(NoteDraft { title: title.clone(), pinned: false });
                }
                let before = store.snapshot();

                for _ in 0..4 {
                    store.update(EntityId::new(), NotePatch {
                        title: Some("ghost".to_string()),
                        ..NotePatch::default()
                    });
                }

                prop_assert_eq!(store.snapshot(), before);
            }
        }
    }
}
