//! Optimization-pipeline pane controller
//!
//! [`OptPipelinePane`] reacts to compiler events on the session bus, keeps
//! the [`ResultBuffer`] and its rendering surface in step, and turns the
//! "scroll to source" action into an [`BusEvent::EditorLinkLine`] request.
//!
//! # Filtering
//!
//! Several compiler panes share one bus. Every inbound event keyed by a
//! compiler id is compared against the pane's [`CompilerBinding`] and
//! dropped when it does not match.
//!
//! # Selection restoration
//!
//! A selection saved in [`PersistedState`] is restored when the first result
//! is rendered, i.e. on the transition into [`Lifecycle::Rendering`]. The
//! pane never leaves that state except to close, so restoration happens at
//! most once.

pub mod layout;
pub mod state;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::bus::{
    BusEvent, CompileResult, CompilerInfo, EventHub, LinkLine, PaneId, ResultView, Topic,
};
use crate::config::{Settings, SurfaceOptions, DEFAULT_PANE_NAME, PASSES_COLUMN_WIDTH};
use crate::error::PaneError;
use crate::result::{DisplayLine, ResultBuffer, NO_OUTPUT, UNSUPPORTED_VIEW};
use crate::surface::{Dimensions, RenderSurface, Selection, TextSurface};

pub use layout::{Deferred, ToolbarItem, TopBar, TopBarLayout};
pub use state::{Capability, CompilerBinding, Lifecycle, PersistedState};

/// What happened to an inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The pane's state changed
    Applied,
    /// Addressed to this pane but nothing needed doing
    Unchanged,
    /// Keyed by a compiler this pane is not bound to
    Stale,
    /// The pane is closed
    Closed,
}

type StateListener = Box<dyn FnMut(&PersistedState)>;

pub struct OptPipelinePane<S: RenderSurface> {
    hub: EventHub,
    surface: Option<S>,
    binding: CompilerBinding,
    lifecycle: Lifecycle,
    buffer: ResultBuffer,
    /// Selection waiting for the first render
    pending_selection: Option<Selection>,
    pane_name: Option<String>,
    top_bar: TopBar,
    layout: Deferred<Dimensions>,
    state_listener: Option<StateListener>,
}

impl OptPipelinePane<TextSurface> {
    /// Open a pane backed by a read-only [`TextSurface`]
    pub fn open(hub: EventHub, state: PersistedState) -> Self {
        Self::new(hub, TextSurface::new(SurfaceOptions::llvm_ir()), state)
    }
}

impl<S: RenderSurface> OptPipelinePane<S> {
    /// Build the pane, subscribe it to the bus and announce it
    pub fn new(hub: EventHub, surface: S, state: PersistedState) -> Self {
        let mut pane = OptPipelinePane {
            hub,
            surface: Some(surface),
            binding: CompilerBinding::new(state.compiler_id, state.editor_id, state.tree_id),
            lifecycle: Lifecycle::Uninitialized,
            buffer: ResultBuffer::new(),
            pending_selection: state.selection,
            pane_name: state.pane_name,
            top_bar: TopBar::default(),
            layout: Deferred::new(),
            state_listener: None,
        };
        pane.refresh_top_bar();

        for topic in [
            Topic::CompileResult,
            Topic::Compiler,
            Topic::Settings,
            Topic::RenamePane,
        ] {
            pane.hub.subscribe(topic);
        }
        pane.hub.emit(BusEvent::PaneOpened {
            compiler_id: pane.binding.compiler_id,
        });
        pane.hub.emit(BusEvent::RequestSettings);

        tracing::info!(
            category = "OpenViewPane",
            action = "LLVMOptPipelineView",
            compiler_id = pane.binding.compiler_id,
            "pane opened"
        );
        pane
    }

    /// Called with the persisted state whenever the pane saves it
    pub fn on_state_saved(&mut self, listener: impl FnMut(&PersistedState) + 'static) {
        self.state_listener = Some(Box::new(listener));
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn binding(&self) -> &CompilerBinding {
        &self.binding
    }

    pub fn buffer(&self) -> &ResultBuffer {
        &self.buffer
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn top_bar(&self) -> &TopBar {
        &self.top_bar
    }

    /// Bus identity of this pane
    pub fn id(&self) -> PaneId {
        self.hub.owner()
    }

    fn surface_mut(&mut self) -> Result<&mut S, PaneError> {
        self.surface.as_mut().ok_or(PaneError::MissingSurface)
    }

    pub fn pane_name(&self) -> &str {
        self.pane_name.as_deref().unwrap_or(DEFAULT_PANE_NAME)
    }

    pub fn title(&self) -> String {
        let editor = self
            .binding
            .editor_id
            .map_or_else(|| "?".to_string(), |id| id.to_string());
        format!(
            "{} {} (Editor #{}, Compiler #{})",
            self.pane_name(),
            self.binding.compiler_name,
            editor,
            self.binding.compiler_id
        )
    }

    fn refresh_top_bar(&mut self) {
        let editor = self
            .binding
            .editor_id
            .map_or_else(|| "?".to_string(), |id| id.to_string());
        let ids = format!("(Editor #{}, Compiler #{})", editor, self.binding.compiler_id);
        let width = |s: &str| s.chars().count().min(u16::MAX as usize) as u16;
        let items = vec![
            ToolbarItem {
                width: width(self.pane_name()),
                hideable: false,
            },
            ToolbarItem {
                width: width(&self.binding.compiler_name),
                hideable: true,
            },
            ToolbarItem {
                width: width(&ids),
                hideable: true,
            },
        ];
        self.top_bar.set_items(items);
    }

    /// Route one bus event to its handler
    pub fn handle(&mut self, event: &BusEvent) -> Result<Delivery, PaneError> {
        if self.lifecycle.is_closed() {
            return Ok(Delivery::Closed);
        }
        match event {
            BusEvent::CompileResult {
                compiler_id,
                compiler,
                result,
            } => self.on_compile_result(*compiler_id, compiler, result),
            BusEvent::Compiler {
                compiler_id,
                compiler,
                editor_id,
                tree_id,
                ..
            } => self.on_compiler(*compiler_id, compiler.as_ref(), *editor_id, *tree_id),
            BusEvent::Settings(settings) => self.on_settings(settings),
            BusEvent::RenamePane { pane, name } if *pane == self.hub.owner() => {
                self.rename(name.clone())?;
                Ok(Delivery::Applied)
            }
            _ => Ok(Delivery::Unchanged),
        }
    }

    /// Compiler metadata for some compiler in the session
    pub fn on_compiler(
        &mut self,
        compiler_id: u32,
        compiler: Option<&CompilerInfo>,
        editor_id: Option<u32>,
        tree_id: Option<u32>,
    ) -> Result<Delivery, PaneError> {
        if self.lifecycle.is_closed() {
            return Ok(Delivery::Closed);
        }
        if !self.binding.matches(compiler_id) {
            tracing::trace!(compiler_id, "ignoring metadata for another compiler");
            return Ok(Delivery::Stale);
        }

        self.binding.compiler_name = compiler.map(|c| c.name.clone()).unwrap_or_default();
        self.binding.editor_id = editor_id;
        self.binding.tree_id = tree_id;
        self.refresh_top_bar();
        tracing::debug!(title = %self.title(), "pane bound");

        if let Some(compiler) = compiler {
            self.binding.capability = compiler.supports_opt_pipeline_view.into();
            if !compiler.supports_opt_pipeline_view {
                // Leaves the saved selection for the first real render.
                self.buffer.replace(vec![DisplayLine::plain(UNSUPPORTED_VIEW)]);
                let text = self.buffer.rendered_text();
                self.surface_mut()?.set_value(&text);
            }
        }
        self.lifecycle = self.lifecycle.on_bind();
        Ok(Delivery::Applied)
    }

    /// A finished compilation
    pub fn on_compile_result(
        &mut self,
        compiler_id: u32,
        compiler: &CompilerInfo,
        result: &CompileResult,
    ) -> Result<Delivery, PaneError> {
        if self.lifecycle.is_closed() {
            return Ok(Delivery::Closed);
        }
        if !self.binding.matches(compiler_id) {
            tracing::trace!(compiler_id, "ignoring result for another compiler");
            return Ok(Delivery::Stale);
        }

        // Once a compiler event has marked the view unsupported, only a newer
        // result that reports support brings it back.
        if compiler.supports_opt_pipeline_view {
            self.binding.capability = Capability::Supported;
        } else if self.binding.capability == Capability::Unsupported {
            return Ok(Delivery::Unchanged);
        }

        match ResultView::classify(compiler, result) {
            ResultView::Populated(lines) => self.show_results(lines.to_vec())?,
            ResultView::Empty => self.show_results(vec![DisplayLine::plain(NO_OUTPUT)])?,
            ResultView::Unsupported => return Ok(Delivery::Unchanged),
        }
        Ok(Delivery::Applied)
    }

    fn show_results(&mut self, lines: Vec<DisplayLine>) -> Result<(), PaneError> {
        self.buffer.replace(lines);
        let text = self.buffer.rendered_text();
        self.surface_mut()?.set_value(&text);

        if self.lifecycle != Lifecycle::Rendering {
            if let Some(selection) = self.pending_selection.take() {
                let surface = self.surface_mut()?;
                surface.set_selection(selection);
                surface.reveal_lines_in_center(selection.start_line, selection.end_line);
                tracing::debug!(?selection, "restored saved selection");
            }
            self.lifecycle = self.lifecycle.on_render();
        }
        Ok(())
    }

    fn on_settings(&mut self, settings: &Settings) -> Result<Delivery, PaneError> {
        self.surface_mut()?.apply_settings(settings);
        Ok(Delivery::Applied)
    }

    /// Rename the pane (`None` restores the default name) and save state
    pub fn rename(&mut self, name: Option<String>) -> Result<PersistedState, PaneError> {
        if self.lifecycle.is_closed() {
            return Err(PaneError::Closed {
                compiler_id: self.binding.compiler_id,
            });
        }
        self.pane_name = name.filter(|n| !n.trim().is_empty());
        self.refresh_top_bar();
        self.save_state()
    }

    /// Snapshot the state the host should persist
    pub fn current_state(&self) -> PersistedState {
        PersistedState {
            compiler_id: self.binding.compiler_id,
            editor_id: self.binding.editor_id,
            tree_id: self.binding.tree_id,
            selection: self.surface.as_ref().and_then(|s| s.selection()),
            pane_name: self.pane_name.clone(),
        }
    }

    fn save_state(&mut self) -> Result<PersistedState, PaneError> {
        let state = self.current_state();
        tracing::debug!(title = %self.title(), "saving pane state");
        if let Some(listener) = self.state_listener.as_mut() {
            listener(&state);
        }
        Ok(state)
    }

    /// Ask the source editor to show the line under the cursor.
    ///
    /// Returns the emitted request, or `None` when the line has no source
    /// location.
    pub fn scroll_to_source(&mut self) -> Result<Option<LinkLine>, PaneError> {
        if self.lifecycle.is_closed() {
            return Ok(None);
        }
        let Some(position) = self.surface_mut()?.position() else {
            return Ok(None);
        };

        let Some(line) = self.buffer.mapper().resolve(position.line).line() else {
            tracing::debug!(display_line = position.line, "no source for line");
            return Ok(None);
        };
        let Some(editor_id) = self.binding.editor_id else {
            tracing::debug!("no editor bound, cannot link source line");
            return Ok(None);
        };

        let link = LinkLine::reveal_line(editor_id, line);
        self.hub.emit(BusEvent::EditorLinkLine(link));
        Ok(Some(link))
    }

    /// Keyboard input while the pane has focus. Returns whether the key was
    /// consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool, PaneError> {
        if self.lifecycle.is_closed() {
            return Ok(false);
        }
        match key.code {
            KeyCode::F(10) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_to_source()?;
                Ok(true)
            }
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::Home => self.move_cursor(isize::MIN),
            KeyCode::End => self.move_cursor(isize::MAX),
            _ => Ok(false),
        }
    }

    fn move_cursor(&mut self, delta: isize) -> Result<bool, PaneError> {
        let surface = self.surface_mut()?;
        if surface.position().is_none() {
            return Ok(false);
        }
        surface.move_cursor(delta);
        Ok(true)
    }

    /// The host resized the pane. The surface is laid out at the next idle
    /// point; further resizes before then replace this one.
    pub fn resize(&mut self, outer: Dimensions) {
        if self.lifecycle.is_closed() {
            return;
        }
        if self.layout.schedule(outer) {
            tracing::trace!(?outer, "layout scheduled");
        }
    }

    pub fn has_pending_layout(&self) -> bool {
        self.layout.is_pending()
    }

    /// Run deferred work. Returns the box the surface was laid out into.
    pub fn run_deferred(&mut self) -> Result<Option<Dimensions>, PaneError> {
        let Some(outer) = self.layout.take() else {
            return Ok(None);
        };
        if self.lifecycle.is_closed() {
            return Ok(None);
        }
        // The bar may wrap differently at the new width.
        let top_bar = self.top_bar.measure(outer.width);
        let inner = Dimensions {
            width: outer.width.saturating_sub(PASSES_COLUMN_WIDTH),
            height: outer.height.saturating_sub(top_bar.height),
        };
        self.surface_mut()?.layout(inner);
        Ok(Some(inner))
    }

    /// Tear the pane down. Later events and actions are no-ops.
    pub fn close(&mut self) {
        if self.lifecycle.is_closed() {
            return;
        }
        self.hub.unsubscribe();
        self.hub.emit(BusEvent::PaneClosed {
            compiler_id: self.binding.compiler_id,
        });
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
        }
        self.layout.cancel();
        self.lifecycle = Lifecycle::Closed;
        tracing::debug!(compiler_id = self.binding.compiler_id, "pane closed");
    }
}
