//! Recorded compiler output replayed onto a session
//!
//! The viewer does not compile anything. A fixture holds what a compilation
//! backend would have announced for one compiler: its metadata, the editor
//! it compiles, and the pipeline result.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bus::{CompileResult, CompilerInfo};
use crate::error::PaneError;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileFixture {
    pub compiler_id: u32,
    pub compiler: CompilerInfo,
    pub editor_id: u32,
    #[serde(default)]
    pub tree_id: Option<u32>,
    /// C source the result was compiled from, relative to the fixture file
    #[serde(default)]
    pub source_file: Option<PathBuf>,
    #[serde(default)]
    pub result: CompileResult,
}

impl CompileFixture {
    pub fn load(path: &Path) -> Result<Self, PaneError> {
        let contents = fs::read_to_string(path)?;
        let mut fixture: CompileFixture = serde_json::from_str(&contents)?;
        if let (Some(source), Some(dir)) = (fixture.source_file.as_ref(), path.parent()) {
            if source.is_relative() {
                fixture.source_file = Some(dir.join(source));
            }
        }
        Ok(fixture)
    }

    /// Read the source file, if the fixture names one
    pub fn read_source(&self) -> Result<String, PaneError> {
        match &self.source_file {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => Ok(String::new()),
        }
    }

    /// Display name of the source file
    pub fn source_name(&self) -> String {
        self.source_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map_or_else(|| "<source>".to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Announce the compiler and then its result, as a backend would
    pub fn replay(&self, session: &mut Session) -> Result<(), PaneError> {
        session.publish_compiler(
            self.compiler_id,
            Some(self.compiler.clone()),
            Some(self.editor_id),
            self.tree_id,
        );
        session.publish_result(self.compiler_id, self.compiler.clone(), self.result.clone());
        session.pump()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_from_json() {
        let fixture: CompileFixture = serde_json::from_str(
            r#"{
                "compiler_id": 1,
                "compiler": {"name": "clang", "supports_opt_pipeline_view": true},
                "editor_id": 2,
                "source_file": "example.c",
                "result": {"opt_pipeline_output": [
                    {"text": "ret i32 0", "source": {"file": "example.c", "line": 3}}
                ]}
            }"#,
        )
        .unwrap();

        assert_eq!(fixture.tree_id, None);
        assert_eq!(fixture.source_name(), "example.c");
        assert!(fixture.result.has_output());
    }
}
