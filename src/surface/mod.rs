//! Rendering surface contract
//!
//! The pane never draws text itself. It hands the rendered IR to a
//! [`RenderSurface`] and reads the cursor back when the user navigates.
//! [`TextSurface`] is the in-memory implementation used by the terminal UI.

mod text;

use serde::{Deserialize, Serialize};

use crate::config::Settings;

pub use text::TextSurface;

/// Cursor position, 1-based in both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

/// Selected range, 1-based and inclusive of both end lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Selection {
    pub fn lines(start_line: usize, end_line: usize) -> Self {
        Selection {
            start_line,
            start_column: 1,
            end_line,
            end_column: 1,
        }
    }
}

/// Box the surface is laid out into, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

pub trait RenderSurface {
    /// Replace the whole text. Resets cursor and selection.
    fn set_value(&mut self, text: &str);

    fn value(&self) -> &str;

    /// `None` once the surface has been disposed
    fn position(&self) -> Option<Position>;

    fn set_position(&mut self, position: Position);

    /// Move the cursor by `delta` lines and drop any selection
    fn move_cursor(&mut self, delta: isize);

    fn selection(&self) -> Option<Selection>;

    fn set_selection(&mut self, selection: Selection);

    /// Scroll so the given range sits in the middle of the viewport
    fn reveal_lines_in_center(&mut self, start_line: usize, end_line: usize);

    fn layout(&mut self, dimensions: Dimensions);

    fn apply_settings(&mut self, settings: &Settings);

    /// Release the surface. Nothing may be called afterwards.
    fn dispose(&mut self);
}
