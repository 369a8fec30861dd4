//! Session event bus
//!
//! Every pane in a session talks to its siblings only through the bus. The
//! bus is single-threaded and shared as [`SharedBus`]; panes hold an
//! [`EventHub`] that knows which pane it belongs to.
//!
//! Publishing never dispatches re-entrantly. Events are queued and the host
//! drains the queue, handing each event to the panes subscribed to its
//! [`Topic`] in registration order.

pub mod events;

use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub use events::{
    BusEvent, CompileResult, CompilerInfo, LinkLine, PaneId, ResultView, Topic,
};

pub type SharedBus = Rc<RefCell<EventBus>>;

/// Subscription table plus the queue of undelivered events
#[derive(Debug, Default)]
pub struct EventBus {
    subscriptions: FxHashMap<PaneId, FxHashSet<Topic>>,
    queue: VecDeque<BusEvent>,
    next_pane: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedBus {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Allocate an id for a new participant
    pub fn register(&mut self) -> PaneId {
        let id = PaneId(self.next_pane);
        self.next_pane += 1;
        id
    }

    pub fn subscribe(&mut self, pane: PaneId, topic: Topic) {
        self.subscriptions.entry(pane).or_default().insert(topic);
    }

    /// Drop every subscription held by `pane`
    pub fn unsubscribe_all(&mut self, pane: PaneId) {
        self.subscriptions.remove(&pane);
    }

    pub fn is_subscribed(&self, pane: PaneId, topic: Topic) -> bool {
        self.subscriptions
            .get(&pane)
            .is_some_and(|topics| topics.contains(&topic))
    }

    /// Panes subscribed to `topic`, in registration order
    pub fn subscribers(&self, topic: Topic) -> Vec<PaneId> {
        let mut panes: Vec<PaneId> = self
            .subscriptions
            .iter()
            .filter(|(_, topics)| topics.contains(&topic))
            .map(|(pane, _)| *pane)
            .collect();
        panes.sort();
        panes
    }

    pub fn publish(&mut self, event: BusEvent) {
        tracing::trace!(topic = ?event.topic(), "bus publish");
        self.queue.push_back(event);
    }

    /// Next undelivered event
    pub fn pop(&mut self) -> Option<BusEvent> {
        self.queue.pop_front()
    }

    /// Take every undelivered event
    pub fn drain(&mut self) -> Vec<BusEvent> {
        self.queue.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// A pane's handle onto the shared bus
#[derive(Debug, Clone)]
pub struct EventHub {
    bus: SharedBus,
    owner: PaneId,
}

impl EventHub {
    /// Register a new participant on `bus`
    pub fn new(bus: SharedBus) -> Self {
        let owner = bus.borrow_mut().register();
        EventHub { bus, owner }
    }

    pub fn owner(&self) -> PaneId {
        self.owner
    }

    pub fn subscribe(&self, topic: Topic) {
        self.bus.borrow_mut().subscribe(self.owner, topic);
    }

    pub fn emit(&self, event: BusEvent) {
        self.bus.borrow_mut().publish(event);
    }

    /// Remove all of this pane's subscriptions. Emitting is still possible.
    pub fn unsubscribe(&self) {
        self.bus.borrow_mut().unsubscribe_all(self.owner);
    }
}
