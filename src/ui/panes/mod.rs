//! TUI pane rendering modules
//!
//! - [`ir`]: the optimization-pipeline pane, with gutter, glyph margin and
//!   passes column
//! - [`source`]: the C source the pipeline links back into
//! - [`status`]: status bar with keybindings and the pane's lifecycle state
//!
//! Each module exports a `render_*` function that draws from state it is
//! given; none of them mutate the pane.

pub mod ir;
pub mod source;
pub mod status;

pub use ir::{ir_inner_area, render_ir_pane};
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
