//! Pane lifecycle, compiler binding and persisted state

use serde::{Deserialize, Serialize};

use crate::error::PaneError;
use crate::surface::Selection;

/// Where a pane is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, compiler metadata not yet seen
    Uninitialized,
    /// Compiler identity known
    Bound,
    /// At least one result has been rendered
    Rendering,
    /// Torn down. Terminal.
    Closed,
}

impl Lifecycle {
    /// State after compiler metadata arrives
    pub fn on_bind(self) -> Self {
        match self {
            Lifecycle::Uninitialized => Lifecycle::Bound,
            other => other,
        }
    }

    /// State after a result is rendered
    pub fn on_render(self) -> Self {
        match self {
            Lifecycle::Closed => Lifecycle::Closed,
            _ => Lifecycle::Rendering,
        }
    }

    pub fn is_closed(self) -> bool {
        self == Lifecycle::Closed
    }
}

/// Whether the bound compiler can produce this view, per the latest signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Unknown,
    Supported,
    Unsupported,
}

impl From<bool> for Capability {
    fn from(supported: bool) -> Self {
        if supported {
            Capability::Supported
        } else {
            Capability::Unsupported
        }
    }
}

/// The upstream compiler and editor this pane is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerBinding {
    pub compiler_id: u32,
    pub compiler_name: String,
    pub editor_id: Option<u32>,
    pub tree_id: Option<u32>,
    pub capability: Capability,
}

impl CompilerBinding {
    pub fn new(compiler_id: u32, editor_id: Option<u32>, tree_id: Option<u32>) -> Self {
        CompilerBinding {
            compiler_id,
            compiler_name: String::new(),
            editor_id,
            tree_id,
            capability: Capability::Unknown,
        }
    }

    pub fn matches(&self, compiler_id: u32) -> bool {
        self.compiler_id == compiler_id
    }
}

/// State saved by the layout host and handed back when the pane is recreated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub compiler_id: u32,
    #[serde(default)]
    pub editor_id: Option<u32>,
    #[serde(default)]
    pub tree_id: Option<u32>,
    #[serde(default)]
    pub selection: Option<Selection>,
    /// Custom pane name, if the user renamed the pane
    #[serde(default)]
    pub pane_name: Option<String>,
}

impl PersistedState {
    pub fn for_compiler(compiler_id: u32) -> Self {
        PersistedState {
            compiler_id,
            editor_id: None,
            tree_id: None,
            selection: None,
            pane_name: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PaneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PaneError> {
        Ok(serde_json::to_string(self)?)
    }
}
