//! Main TUI application state and logic

use crate::error::PaneError;
use crate::session::Session;
use crate::surface::Dimensions;
use crate::ui::panes::{
    ir_inner_area, render_ir_pane, render_source_pane, render_status_bar, SourceScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Pipeline,
}

impl FocusedPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Pipeline,
            FocusedPane::Pipeline => FocusedPane::Source,
        }
    }
}

pub struct App {
    pub session: Session,
    pub focused_pane: FocusedPane,
    pub source_scroll: SourceScrollState,
    pub status_message: String,
    pub should_quit: bool,
    /// Inner area the pipeline pane was last resized to
    last_pipeline_area: Option<Rect>,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            focused_pane: FocusedPane::Pipeline,
            source_scroll: SourceScrollState::default(),
            status_message: String::from("Ready!"),
            should_quit: false,
            last_pipeline_area: None,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), PaneError> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Layout requested while drawing runs once the frame is done.
            if self.session.idle()?.is_some() {
                terminal.draw(|f| self.render(f))?;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        let pipeline_inner = ir_inner_area(columns[1]);
        if self.last_pipeline_area != Some(pipeline_inner) {
            self.last_pipeline_area = Some(pipeline_inner);
            self.session.resize(Dimensions {
                width: pipeline_inner.width,
                height: pipeline_inner.height,
            });
        }

        render_source_pane(
            frame,
            columns[0],
            self.session.source(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );
        render_ir_pane(
            frame,
            columns[1],
            self.session.pane(),
            self.focused_pane == FocusedPane::Pipeline,
        );
        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.session.pane().lifecycle(),
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<(), PaneError> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.toggle();
            }
            KeyCode::Char('s') => {
                self.scroll_to_source()?;
            }
            KeyCode::F(10) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_to_source()?;
            }
            KeyCode::Char('c') => {
                self.session.close_pane()?;
                self.status_message = "Pipeline pane closed".to_string();
            }
            KeyCode::Up | KeyCode::Down if self.focused_pane == FocusedPane::Source => {
                self.source_scroll.offset = if key.code == KeyCode::Up {
                    self.source_scroll.offset.saturating_sub(1)
                } else {
                    self.source_scroll.offset.saturating_add(1)
                };
            }
            _ if self.focused_pane == FocusedPane::Pipeline => {
                self.session.pane_mut().handle_key(key)?;
                self.session.pump()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn scroll_to_source(&mut self) -> Result<(), PaneError> {
        if self.session.scroll_to_source()? {
            let line = self.session.source().linked().map_or(0, |l| l.line);
            self.status_message = format!("Source line {}", line);
        } else {
            self.status_message = "No source for this line".to_string();
        }
        Ok(())
    }
}
