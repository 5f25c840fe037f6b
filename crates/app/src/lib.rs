//! Application composition root.
//!
//! Wires one instance of every service into an [`AppContext`] with a clear
//! lifetime, optionally seeded with the demo dataset. Presentation layers
//! consume the services' subscriptions and mutation methods; nothing here
//! owns rendering or formatting.

pub mod context;
pub mod fixtures;

pub use context::{AppContext, Dashboard};
pub use fixtures::{demo_data, DemoData};
