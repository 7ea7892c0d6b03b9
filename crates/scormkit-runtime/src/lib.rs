//! Runtime progress tracking for scormkit.
//!
//! A rendered package reports progress as named key/value events whose
//! ordering the caller does not guarantee. The tracker is a reducer over
//! those events, not an automaton with transition edges: each event updates
//! the normalized fields it maps to, independent of prior state, and the
//! derived outputs (completion signal, grade) stay deterministic and
//! monotonic.
//!
//! # Architecture
//!
//! - `status.rs` - Normalized completion/success vocabularies
//! - `state.rs` - Per-learner, per-package `RuntimeState`
//! - `tracker.rs` - The event reducer and grade derivation

pub use state::RuntimeState;
pub use status::{CompletionStatus, SuccessStatus};
pub use tracker::{
    Applied, HostChannel, NullChannel, ProgressTracker, TrackerConfig, field,
};

mod state;
mod status;
mod tracker;
