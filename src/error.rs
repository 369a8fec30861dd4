//! Error types for the pipeline pane
//!
//! Most "failures" a pane sees are ordinary outcomes: stale events, views the
//! compiler cannot produce, empty output and unmapped lines are all modelled
//! as values elsewhere. [`PaneError`] covers what is left: invariant
//! violations and I/O at the edges.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaneError {
    /// The rendering surface was used before construction or after release
    #[error("rendering surface is not available")]
    MissingSurface,

    /// An operation that must produce a value was invoked on a closed pane
    #[error("pane for compiler #{compiler_id} is closed")]
    Closed { compiler_id: u32 },

    /// Persisted pane state could not be decoded
    #[error("invalid pane state: {0}")]
    StateDecode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
