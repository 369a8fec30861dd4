//! Settings and fixed configuration for the pipeline pane

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::PaneError;

/// Width of the passes/metadata column to the right of the IR text, in cells
pub const PASSES_COLUMN_WIDTH: u16 = 14;

/// Height of one row of the pane's top bar, in cells
pub const TOP_BAR_ROW_HEIGHT: u16 = 1;

/// Default name shown in the pane title
pub const DEFAULT_PANE_NAME: &str = "LLVM Opt Pipeline Viewer";

/// Session-wide settings broadcast to every pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tab_width: u8,
    pub show_line_numbers: bool,
    pub word_wrap: bool,
    /// Mark lines that carry a source reference in the gutter
    pub highlight_source_links: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tab_width: 4,
            show_line_numbers: true,
            word_wrap: false,
            highlight_source_links: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, PaneError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Options a rendering surface is created with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    pub language: &'static str,
    pub read_only: bool,
    pub glyph_margin: bool,
    pub line_numbers_min_chars: usize,
}

impl SurfaceOptions {
    /// Options for the optimization-pipeline view
    pub fn llvm_ir() -> Self {
        SurfaceOptions {
            language: "llvm-ir",
            read_only: true,
            glyph_margin: true,
            line_numbers_min_chars: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"tab_width": 8}"#).unwrap();
        assert_eq!(settings.tab_width, 8);
        assert!(settings.show_line_numbers);
        assert!(!settings.word_wrap);
    }

    #[test]
    fn test_pipeline_surface_is_read_only() {
        let options = SurfaceOptions::llvm_ir();
        assert!(options.read_only);
        assert_eq!(options.language, "llvm-ir");
    }
}
