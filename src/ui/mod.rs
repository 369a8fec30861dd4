//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]** — event loop, focus and key handling around a [`Session`]
//! - **[`panes`]** — render functions for the pipeline, source and status panes
//! - **[`highlight`]** — line highlighting for C and LLVM IR
//! - **[`theme`]** — centralized color palette
//!
//! [`Session`]: crate::session::Session

pub mod app;
pub mod highlight;
pub mod panes;
pub mod theme;

pub use app::App;
