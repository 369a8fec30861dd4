//! Pane geometry: the top bar and deferred relayout

use crate::config::TOP_BAR_ROW_HEIGHT;

/// One element of the top bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarItem {
    pub width: u16,
    /// May be dropped when it would make the bar wrap
    pub hideable: bool,
}

/// Result of measuring the top bar against a width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopBarLayout {
    pub height: u16,
    pub show_hideable: bool,
}

/// Horizontal bar of items above the IR text. Items wrap onto new rows
/// when the pane is too narrow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopBar {
    items: Vec<ToolbarItem>,
}

impl TopBar {
    pub fn new(items: Vec<ToolbarItem>) -> Self {
        TopBar { items }
    }

    pub fn set_items(&mut self, items: Vec<ToolbarItem>) {
        self.items = items;
    }

    fn rows(&self, width: u16, include_hideable: bool) -> u16 {
        let width = width.max(1);
        let mut rows = 0u16;
        let mut used = 0u16;
        for item in self
            .items
            .iter()
            .filter(|item| include_hideable || !item.hideable)
        {
            let w = item.width.min(width);
            if rows == 0 {
                rows = 1;
                used = w;
            } else if used.saturating_add(1).saturating_add(w) > width {
                rows += 1;
                used = w;
            } else {
                used += 1 + w;
            }
        }
        rows
    }

    /// Hideable items stay visible only when they do not add a row.
    pub fn measure(&self, width: u16) -> TopBarLayout {
        if self.items.is_empty() {
            return TopBarLayout {
                height: 0,
                show_hideable: false,
            };
        }
        let with_all = self.rows(width, true);
        let without_hideable = self.rows(width, false);
        TopBarLayout {
            height: without_hideable * TOP_BAR_ROW_HEIGHT,
            show_hideable: with_all == without_hideable,
        }
    }
}

/// Holds the latest value of a request until the next idle point.
/// Scheduling again before then replaces the pending value.
#[derive(Debug, Clone, Default)]
pub struct Deferred<T> {
    pending: Option<T>,
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Deferred { pending: None }
    }

    /// Returns `true` if nothing was pending before
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending.replace(value).is_none()
    }

    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
