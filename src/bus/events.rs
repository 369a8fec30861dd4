//! Typed messages exchanged over the session bus

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::result::DisplayLine;

/// Identity of a pane registered on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaneId(pub u32);

/// Compiler metadata relevant to this view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerInfo {
    pub name: String,
    #[serde(default)]
    pub supports_opt_pipeline_view: bool,
}

/// Compiler reply for one compilation. `output` is `None` when the compiler
/// produced nothing for this view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompileResult {
    #[serde(default)]
    pub opt_pipeline_output: Option<Vec<DisplayLine>>,
}

impl CompileResult {
    pub fn with_output(lines: Vec<DisplayLine>) -> Self {
        CompileResult {
            opt_pipeline_output: Some(lines),
        }
    }

    pub fn has_output(&self) -> bool {
        self.opt_pipeline_output.is_some()
    }
}

/// What a compile result means for this view.
///
/// Capability is read from the metadata that arrived with the result, so it
/// may differ from what the last `Compiler` event said.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView<'a> {
    Populated(&'a [DisplayLine]),
    /// Supported but nothing was produced
    Empty,
    Unsupported,
}

impl<'a> ResultView<'a> {
    pub fn classify(compiler: &CompilerInfo, result: &'a CompileResult) -> Self {
        match &result.opt_pipeline_output {
            Some(lines) => ResultView::Populated(lines),
            None if compiler.supports_opt_pipeline_view => ResultView::Empty,
            None => ResultView::Unsupported,
        }
    }
}

/// Request for a source pane to scroll to and highlight a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkLine {
    pub editor_id: u32,
    pub line: u32,
    /// -1 selects the whole line
    pub column_begin: i32,
    pub column_end: i32,
    pub reveal: bool,
}

impl LinkLine {
    /// Whole-line link that also reveals the line in the editor
    pub fn reveal_line(editor_id: u32, line: u32) -> Self {
        LinkLine {
            editor_id,
            line,
            column_begin: -1,
            column_end: -1,
            reveal: true,
        }
    }
}

/// Topic a subscriber can listen on. One per [`BusEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    CompileResult,
    Compiler,
    Settings,
    RenamePane,
    PaneOpened,
    PaneClosed,
    RequestSettings,
    EditorLinkLine,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    CompileResult {
        compiler_id: u32,
        compiler: CompilerInfo,
        result: CompileResult,
    },
    Compiler {
        compiler_id: u32,
        /// `None` when the compiler is being removed or is unknown
        compiler: Option<CompilerInfo>,
        options: serde_json::Value,
        editor_id: Option<u32>,
        tree_id: Option<u32>,
    },
    Settings(Settings),
    /// Rename request addressed to one pane. `None` restores the default name.
    RenamePane {
        pane: PaneId,
        name: Option<String>,
    },
    PaneOpened {
        compiler_id: u32,
    },
    PaneClosed {
        compiler_id: u32,
    },
    RequestSettings,
    EditorLinkLine(LinkLine),
}

impl BusEvent {
    pub fn topic(&self) -> Topic {
        match self {
            BusEvent::CompileResult { .. } => Topic::CompileResult,
            BusEvent::Compiler { .. } => Topic::Compiler,
            BusEvent::Settings(_) => Topic::Settings,
            BusEvent::RenamePane { .. } => Topic::RenamePane,
            BusEvent::PaneOpened { .. } => Topic::PaneOpened,
            BusEvent::PaneClosed { .. } => Topic::PaneClosed,
            BusEvent::RequestSettings => Topic::RequestSettings,
            BusEvent::EditorLinkLine(_) => Topic::EditorLinkLine,
        }
    }

    /// Compiler id the event is keyed by, if any
    pub fn compiler_id(&self) -> Option<u32> {
        match self {
            BusEvent::CompileResult { compiler_id, .. }
            | BusEvent::Compiler { compiler_id, .. }
            | BusEvent::PaneOpened { compiler_id }
            | BusEvent::PaneClosed { compiler_id } => Some(*compiler_id),
            BusEvent::Settings(_)
            | BusEvent::RenamePane { .. }
            | BusEvent::RequestSettings
            | BusEvent::EditorLinkLine(_) => None,
        }
    }
}
