//! Session host
//!
//! A [`Session`] owns the bus and every participant on it: the pipeline
//! pane, the source view it links into, and the host itself, which answers
//! settings requests and tracks which pipeline views are open.
//!
//! Nothing is dispatched while an event is being published. Callers publish,
//! then call [`Session::pump`] to deliver queued events, and [`Session::idle`]
//! once the current batch of work is done to run deferred layout.

use rustc_hash::FxHashSet;
use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::{BusEvent, CompileResult, CompilerInfo, EventBus, EventHub, SharedBus, Topic};
use crate::config::Settings;
use crate::error::PaneError;
use crate::pane::{Delivery, OptPipelinePane, PersistedState};
use crate::source_view::SourceView;
use crate::surface::{Dimensions, TextSurface};

pub struct Session {
    bus: SharedBus,
    host: EventHub,
    settings: Settings,
    pane: OptPipelinePane<TextSurface>,
    source: SourceView,
    saved_state: Rc<RefCell<Option<PersistedState>>>,
    open_views: FxHashSet<u32>,
}

impl Session {
    /// Create a session with one pipeline pane restored from `state` and a
    /// source view for `editor_id`
    pub fn new(
        state: PersistedState,
        editor_id: u32,
        file_name: impl Into<String>,
        source: String,
        settings: Settings,
    ) -> Self {
        let bus = EventBus::shared();
        let host = EventHub::new(bus.clone());
        for topic in [Topic::RequestSettings, Topic::PaneOpened, Topic::PaneClosed] {
            host.subscribe(topic);
        }

        let source = SourceView::new(EventHub::new(bus.clone()), editor_id, file_name, source);
        let mut pane = OptPipelinePane::open(EventHub::new(bus.clone()), state);

        let saved_state = Rc::new(RefCell::new(None));
        let sink = saved_state.clone();
        pane.on_state_saved(move |state| *sink.borrow_mut() = Some(state.clone()));

        Session {
            bus,
            host,
            settings,
            pane,
            source,
            saved_state,
            open_views: FxHashSet::default(),
        }
    }

    pub fn bus(&self) -> &SharedBus {
        &self.bus
    }

    pub fn pane(&self) -> &OptPipelinePane<TextSurface> {
        &self.pane
    }

    pub fn pane_mut(&mut self) -> &mut OptPipelinePane<TextSurface> {
        &mut self.pane
    }

    pub fn source(&self) -> &SourceView {
        &self.source
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Last state the pane asked the host to persist
    pub fn saved_state(&self) -> Option<PersistedState> {
        self.saved_state.borrow().clone()
    }

    /// Compiler ids with an open pipeline view
    pub fn is_view_open(&self, compiler_id: u32) -> bool {
        self.open_views.contains(&compiler_id)
    }

    pub fn publish(&self, event: BusEvent) {
        self.host.emit(event);
    }

    /// Publish compiler metadata on behalf of the compilation backend
    pub fn publish_compiler(
        &self,
        compiler_id: u32,
        compiler: Option<CompilerInfo>,
        editor_id: Option<u32>,
        tree_id: Option<u32>,
    ) {
        self.publish(BusEvent::Compiler {
            compiler_id,
            compiler,
            options: serde_json::Value::Null,
            editor_id,
            tree_id,
        });
    }

    pub fn publish_result(&self, compiler_id: u32, compiler: CompilerInfo, result: CompileResult) {
        self.publish(BusEvent::CompileResult {
            compiler_id,
            compiler,
            result,
        });
    }

    pub fn broadcast_settings(&mut self, settings: Settings) {
        self.settings = settings.clone();
        self.publish(BusEvent::Settings(settings));
    }

    /// Deliver queued events until the queue is empty. Returns how many
    /// events were taken off the queue.
    pub fn pump(&mut self) -> Result<usize, PaneError> {
        let mut delivered = 0;
        loop {
            let Some(event) = self.bus.borrow_mut().pop() else {
                break;
            };
            delivered += 1;

            let subscribers = self.bus.borrow().subscribers(event.topic());
            for id in subscribers {
                if id == self.pane.id() {
                    let delivery = self.pane.handle(&event)?;
                    if delivery == Delivery::Stale {
                        tracing::trace!(topic = ?event.topic(), "stale event dropped by pane");
                    }
                } else if id == self.source.id() {
                    self.source.handle(&event);
                } else if id == self.host.owner() {
                    self.on_host_event(&event);
                }
            }
        }
        Ok(delivered)
    }

    fn on_host_event(&mut self, event: &BusEvent) {
        match event {
            BusEvent::RequestSettings => self.publish(BusEvent::Settings(self.settings.clone())),
            BusEvent::PaneOpened { compiler_id } => {
                tracing::info!(compiler_id, "pipeline view opened");
                self.open_views.insert(*compiler_id);
            }
            BusEvent::PaneClosed { compiler_id } => {
                tracing::info!(compiler_id, "pipeline view closed");
                self.open_views.remove(compiler_id);
            }
            _ => {}
        }
    }

    /// Host resized the pane's container
    pub fn resize(&mut self, outer: Dimensions) {
        self.pane.resize(outer);
    }

    /// Run work deferred to the next idle point
    pub fn idle(&mut self) -> Result<Option<Dimensions>, PaneError> {
        self.pane.run_deferred()
    }

    /// Run the pane's scroll-to-source action and deliver the result
    pub fn scroll_to_source(&mut self) -> Result<bool, PaneError> {
        let linked = self.pane.scroll_to_source()?.is_some();
        self.pump()?;
        Ok(linked)
    }

    pub fn rename_pane(&mut self, name: Option<String>) -> Result<(), PaneError> {
        self.publish(BusEvent::RenamePane {
            pane: self.pane.id(),
            name,
        });
        self.pump()?;
        Ok(())
    }

    pub fn close_pane(&mut self) -> Result<(), PaneError> {
        self.pane.close();
        self.pump()?;
        Ok(())
    }
}
