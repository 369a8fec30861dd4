//! # Introduction
//!
//! irview displays the per-pass LLVM IR produced by an optimization pipeline
//! and links each IR line back to the source line it came from. It is built
//! as a pane on a session event bus, the way a multi-pane compiler explorer
//! would host it, with a terminal UI built on
//! [ratatui](https://docs.rs/ratatui) as the host.
//!
//! ## Data flow
//!
//! ```text
//! backend → bus (CompileResult) → ResultBuffer → surface
//! cursor  → LineMapper → bus (EditorLinkLine) → source view
//! ```
//!
//! 1. [`bus`] — typed events and the single-threaded publish/subscribe bus.
//! 2. [`result`] — the current [`result::ResultBuffer`] and the
//!    [`result::LineMapper`] that resolves display lines to source lines.
//! 3. [`surface`] — the rendering surface contract and the in-memory
//!    [`surface::TextSurface`].
//! 4. [`pane`] — the pane controller: binding, stale-event filtering,
//!    selection restoration, deferred layout and teardown.
//! 5. [`session`] — owns the bus and its participants and pumps events.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.

pub mod bus;
pub mod config;
pub mod error;
pub mod fixture;
pub mod pane;
pub mod result;
pub mod session;
pub mod source_view;
pub mod surface;
pub mod ui;
