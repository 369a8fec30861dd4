//! Optimization-pipeline pane rendering
//!
//! Draws the pane's surface as it stands: the top bar with the pane title,
//! the IR text with a line-number gutter and a glyph margin marking lines
//! that link back to source, and the passes column listing each visible
//! line's source location.

use crate::config::PASSES_COLUMN_WIDTH;
use crate::pane::OptPipelinePane;
use crate::surface::{RenderSurface, TextSurface};
use crate::ui::highlight::{highlight, Language};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Area inside the pane border; this is what the pane is resized to
pub fn ir_inner_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn top_bar_lines(pane: &OptPipelinePane<TextSurface>, width: u16) -> Vec<Line<'static>> {
    let layout = pane.top_bar().measure(width);
    if layout.height == 0 {
        return Vec::new();
    }
    let binding = pane.binding();
    let mut spans = vec![Span::styled(
        pane.pane_name().to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )];
    if layout.show_hideable {
        let editor = binding
            .editor_id
            .map_or_else(|| "?".to_string(), |id| id.to_string());
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            binding.compiler_name.clone(),
            Style::default().fg(DEFAULT_THEME.secondary),
        ));
        spans.push(Span::styled(
            format!(" (Editor #{}, Compiler #{})", editor, binding.compiler_id),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }
    vec![Line::from(spans)]
}

/// Render the pipeline pane
pub fn render_ir_pane(
    frame: &mut Frame,
    area: Rect,
    pane: &OptPipelinePane<TextSurface>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let block = Block::default()
        .title(" Opt Pipeline ")
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(surface) = pane.surface() else {
        let closed =
            Paragraph::new("(pane closed)").style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(closed, inner);
        return;
    };

    let header = top_bar_lines(pane, inner.width);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header.len() as u16), Constraint::Min(0)])
        .split(inner);
    frame.render_widget(Paragraph::new(header), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(PASSES_COLUMN_WIDTH)])
        .split(rows[1]);

    let visible_height = surface.dimensions().height.max(1) as usize;
    let settings = surface.settings();
    let selection = surface.selection();
    let cursor_line = surface.position().map_or(0, |p| p.line);
    let mapper = pane.buffer().mapper();
    let gutter_width = surface
        .line_count()
        .to_string()
        .len()
        .max(surface.options().line_numbers_min_chars);
    let tab = " ".repeat(settings.tab_width.max(1) as usize);

    let mut text_lines = Vec::with_capacity(visible_height);
    let mut pass_lines = Vec::with_capacity(visible_height);

    for (idx, text) in surface
        .lines()
        .enumerate()
        .skip(surface.scroll_top())
        .take(visible_height)
    {
        let line_num = idx + 1;
        let source = pane.buffer().get(idx).and_then(|l| l.source.as_ref());
        let linkable = mapper.resolve(line_num).is_mapped();

        let mut spans = Vec::new();
        if settings.show_line_numbers {
            let style = if line_num == cursor_line {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            spans.push(Span::styled(
                format!("{:>width$} ", line_num, width = gutter_width),
                style,
            ));
        }
        if surface.options().glyph_margin {
            let glyph = if linkable && settings.highlight_source_links {
                "▸"
            } else {
                " "
            };
            spans.push(Span::styled(glyph, Style::default().fg(DEFAULT_THEME.success)));
        }

        let mut content = highlight(&text.replace('\t', &tab), Language::LlvmIr);
        let in_selection =
            selection.is_some_and(|s| (s.start_line..=s.end_line).contains(&line_num));
        let background = if in_selection {
            Some(DEFAULT_THEME.selection_bg)
        } else if line_num == cursor_line {
            Some(DEFAULT_THEME.cursor_line_bg)
        } else {
            None
        };
        if let Some(bg) = background {
            for span in &mut content.spans {
                span.style = span.style.bg(bg);
            }
        }
        spans.extend(content.spans);
        text_lines.push(Line::from(spans));

        let location = match source {
            Some(s) => match &s.file {
                Some(file) => format!("{}:{}", file, s.line),
                None => format!(":{}", s.line),
            },
            None => String::new(),
        };
        pass_lines.push(Line::from(Span::styled(
            location,
            Style::default().fg(if linkable {
                DEFAULT_THEME.fg
            } else {
                DEFAULT_THEME.comment
            }),
        )));
    }

    let mut text = Paragraph::new(text_lines);
    if settings.word_wrap {
        text = text.wrap(Wrap { trim: false });
    }
    frame.render_widget(text, columns[0]);

    let passes = Paragraph::new(pass_lines).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(DEFAULT_THEME.border_normal)),
    );
    frame.render_widget(passes, columns[1]);
}
