//! Source editor stand-in that follows link requests

use crate::bus::{BusEvent, EventHub, LinkLine, PaneId, Topic};
use crate::pane::Delivery;

/// Read-only view of one source file, identified on the bus by its editor id
#[derive(Debug)]
pub struct SourceView {
    hub: EventHub,
    editor_id: u32,
    file_name: String,
    source: String,
    linked: Option<LinkLine>,
}

impl SourceView {
    pub fn new(
        hub: EventHub,
        editor_id: u32,
        file_name: impl Into<String>,
        source: String,
    ) -> Self {
        hub.subscribe(Topic::EditorLinkLine);
        SourceView {
            hub,
            editor_id,
            file_name: file_name.into(),
            source,
            linked: None,
        }
    }

    pub fn id(&self) -> PaneId {
        self.hub.owner()
    }

    pub fn editor_id(&self) -> u32 {
        self.editor_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Most recent link request addressed to this editor
    pub fn linked(&self) -> Option<LinkLine> {
        self.linked
    }

    pub fn handle(&mut self, event: &BusEvent) -> Delivery {
        match event {
            BusEvent::EditorLinkLine(link) if link.editor_id == self.editor_id => {
                tracing::debug!(
                    line = link.line,
                    editor_id = self.editor_id,
                    "linking source line"
                );
                self.linked = Some(*link);
                Delivery::Applied
            }
            _ => Delivery::Unchanged,
        }
    }
}
