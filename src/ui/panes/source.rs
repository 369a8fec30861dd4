//! Source pane rendering
//!
//! Shows the C source the pipeline was compiled from. The line most recently
//! targeted by scroll-to-source is highlighted and, when the request asked
//! for it, scrolled into the middle of the pane.

use crate::source_view::SourceView;
use crate::ui::highlight::{highlight, Language};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Line last revealed, so a link only recenters the view once
    pub revealed_line: Option<u32>,
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    view: &SourceView,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} (Editor #{}) ", view.file_name(), view.editor_id()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = view.source().lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = total_lines.saturating_sub(visible_height);

    let linked = view.linked();
    if let Some(link) = linked {
        if link.reveal && scroll_state.revealed_line != Some(link.line) {
            let target_idx = (link.line as usize).saturating_sub(1);
            scroll_state.offset = target_idx.saturating_sub(visible_height / 2);
            scroll_state.revealed_line = Some(link.line);
        }
    }
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let linked_line = linked.map(|l| l.line as usize);
    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_linked = linked_line == Some(line_num);

            let num_style = if is_linked {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight(line, Language::C);
            if is_linked {
                for span in &mut content.spans {
                    span.style = span.style.bg(DEFAULT_THEME.linked_line_bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
