//! `smilodon-store` — generic in-memory reactive entity store.
//!
//! An [`EntityStore`] holds the authoritative ordered sequence of one record
//! type and notifies observers with the **full current sequence** on every
//! mutation. Subscribing replays the latest sequence immediately, then
//! delivers every subsequent mutation in the order it occurred.
//!
//! ## Delivery model
//!
//! Mutation and notification are serialized under a single lock, so all
//! subscribers observe sequences in mutation order. Delivery itself goes
//! through one channel per subscriber: an observer doing expensive work in
//! its consuming loop never blocks the mutating call or the other
//! subscribers. There is no queue bound, retry, or backpressure. A
//! subscription is released by dropping it; dead subscribers are pruned on
//! the next broadcast.

pub mod record;
pub mod store;
pub mod subscription;

pub use record::{Patch, Record};
pub use store::EntityStore;
pub use subscription::Subscription;
