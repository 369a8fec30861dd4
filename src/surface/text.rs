//! In-memory text surface

use super::{Dimensions, Position, RenderSurface, Selection};
use crate::config::{Settings, SurfaceOptions};

/// Read-only text model with a cursor, an optional selection and a scroll
/// offset. Line numbers are 1-based.
#[derive(Debug, Clone)]
pub struct TextSurface {
    options: SurfaceOptions,
    settings: Settings,
    text: String,
    line_count: usize,
    cursor: Position,
    selection: Option<Selection>,
    /// 0-based index of the first visible line
    scroll_top: usize,
    dimensions: Dimensions,
    layout_count: usize,
    disposed: bool,
}

impl TextSurface {
    pub fn new(options: SurfaceOptions) -> Self {
        TextSurface {
            options,
            settings: Settings::default(),
            text: String::new(),
            line_count: 1,
            cursor: Position::new(1, 1),
            selection: None,
            scroll_top: 0,
            dimensions: Dimensions::default(),
            layout_count: 0,
            disposed: false,
        }
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// How many times the surface has been laid out
    pub fn layout_count(&self) -> usize {
        self.layout_count
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Lines of the current text, without line terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    fn visible_height(&self) -> usize {
        (self.dimensions.height as usize).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.line_count.saturating_sub(self.visible_height())
    }

    fn ensure_cursor_visible(&mut self) {
        let index = self.cursor.line - 1;
        let height = self.visible_height();
        if index < self.scroll_top {
            self.scroll_top = index;
        } else if index >= self.scroll_top + height {
            self.scroll_top = index + 1 - height;
        }
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }
}

impl RenderSurface for TextSurface {
    fn set_value(&mut self, text: &str) {
        self.text = text.to_string();
        self.line_count = self.text.split('\n').count();
        self.cursor = Position::new(1, 1);
        self.selection = None;
        self.scroll_top = 0;
    }

    fn value(&self) -> &str {
        &self.text
    }

    fn position(&self) -> Option<Position> {
        if self.disposed {
            return None;
        }
        Some(self.cursor)
    }

    fn set_position(&mut self, position: Position) {
        self.cursor = Position::new(
            position.line.clamp(1, self.line_count),
            position.column.max(1),
        );
        self.ensure_cursor_visible();
    }

    fn move_cursor(&mut self, delta: isize) {
        let line = if delta < 0 {
            self.cursor.line.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.line.saturating_add(delta as usize)
        };
        self.cursor = Position::new(line.clamp(1, self.line_count), 1);
        self.selection = None;
        self.ensure_cursor_visible();
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        let end_line = selection.end_line.clamp(1, self.line_count);
        let clamped = Selection {
            start_line: selection.start_line.clamp(1, end_line),
            start_column: selection.start_column.max(1),
            end_line,
            end_column: selection.end_column.max(1),
        };
        self.selection = Some(clamped);
        self.cursor = Position::new(clamped.end_line, clamped.end_column);
    }

    fn reveal_lines_in_center(&mut self, start_line: usize, end_line: usize) {
        let start = start_line.clamp(1, self.line_count) - 1;
        let end = end_line.clamp(1, self.line_count) - 1;
        let center = start + end.saturating_sub(start) / 2;
        self.scroll_top = center
            .saturating_sub(self.visible_height() / 2)
            .min(self.max_scroll());
    }

    fn layout(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
        self.layout_count += 1;
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.settings = settings.clone();
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.text.clear();
        self.line_count = 1;
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_with_lines(count: usize, height: u16) -> TextSurface {
        let mut surface = TextSurface::new(SurfaceOptions::llvm_ir());
        let text = (1..=count)
            .map(|n| format!("line {}", n))
            .collect::<Vec<_>>()
            .join("\n");
        surface.set_value(&text);
        surface.layout(Dimensions { width: 40, height });
        surface
    }

    #[test]
    fn test_set_value_resets_cursor() {
        let mut surface = surface_with_lines(10, 5);
        surface.set_position(Position::new(7, 3));
        surface.set_value("one\ntwo");

        assert_eq!(surface.position(), Some(Position::new(1, 1)));
        assert_eq!(surface.line_count(), 2);
        assert_eq!(surface.selection(), None);
    }

    #[test]
    fn test_move_cursor_clamps_and_scrolls() {
        let mut surface = surface_with_lines(20, 5);

        surface.move_cursor(-3);
        assert_eq!(surface.position().map(|p| p.line), Some(1));

        surface.move_cursor(7);
        assert_eq!(surface.position().map(|p| p.line), Some(8));
        assert_eq!(surface.scroll_top(), 3);

        surface.move_cursor(100);
        assert_eq!(surface.position().map(|p| p.line), Some(20));
        assert_eq!(surface.scroll_top(), 15);
    }

    #[test]
    fn test_reveal_lines_in_center() {
        let mut surface = surface_with_lines(100, 10);
        surface.reveal_lines_in_center(50, 52);
        assert_eq!(surface.scroll_top(), 45);

        surface.reveal_lines_in_center(1, 1);
        assert_eq!(surface.scroll_top(), 0);

        surface.reveal_lines_in_center(100, 100);
        assert_eq!(surface.scroll_top(), 90);
    }

    #[test]
    fn test_selection_is_clamped_to_text() {
        let mut surface = surface_with_lines(4, 5);
        surface.set_selection(Selection::lines(2, 30));

        let selection = surface.selection().unwrap();
        assert_eq!((selection.start_line, selection.end_line), (2, 4));
        assert_eq!(surface.position().map(|p| p.line), Some(4));
    }

    #[test]
    fn test_disposed_surface_has_no_position() {
        let mut surface = surface_with_lines(3, 5);
        surface.dispose();
        assert!(surface.is_disposed());
        assert_eq!(surface.position(), None);
    }
}
