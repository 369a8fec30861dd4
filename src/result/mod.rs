//! Storage for the most recent optimization-pipeline result
//!
//! A compile event delivers the whole IR rendering at once. [`ResultBuffer`]
//! keeps exactly one such result and replaces it wholesale on every update;
//! there is no merging or diffing between results.
//!
//! Line `i` of the buffer (0-based) is rendered as line `i + 1` of the
//! surface text. [`ResultBuffer::replace`] splits any entry containing an
//! embedded newline so that this correspondence always holds.

pub mod mapper;

use serde::{Deserialize, Serialize};

pub use mapper::{LineMapper, Resolution};

/// Rendered when the buffer holds no lines at all
pub const NO_IR_GENERATED: &str = "<No LLVM IR generated>";

/// Single placeholder line shown when the compiler supports the view but
/// produced nothing for it
pub const NO_OUTPUT: &str = "<No output>";

/// Shown when the bound compiler cannot produce pipeline output
pub const UNSUPPORTED_VIEW: &str = "<LLVM IR output is not supported for this compiler>";

/// Back-reference from an IR line to the source line that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// `None` for lines synthesized by the compiler with no file of origin
    #[serde(default)]
    pub file: Option<String>,
    pub line: u32,
}

impl SourceRef {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        SourceRef {
            file: Some(file.into()),
            line,
        }
    }
}

/// One line of IR text with its optional source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub text: String,
    #[serde(default)]
    pub source: Option<SourceRef>,
}

impl DisplayLine {
    /// A line with no source mapping
    pub fn plain(text: impl Into<String>) -> Self {
        DisplayLine {
            text: text.into(),
            source: None,
        }
    }

    pub fn mapped(text: impl Into<String>, source: SourceRef) -> Self {
        DisplayLine {
            text: text.into(),
            source: Some(source),
        }
    }
}

/// Holds the current result set
#[derive(Debug, Clone, Default)]
pub struct ResultBuffer {
    lines: Vec<DisplayLine>,
}

impl ResultBuffer {
    pub fn new() -> Self {
        ResultBuffer { lines: Vec::new() }
    }

    /// Discard the current result and store `lines` in its place.
    ///
    /// Entries whose text spans several physical lines are split, each part
    /// keeping the source reference of the original entry.
    pub fn replace(&mut self, lines: Vec<DisplayLine>) {
        let mut normalized = Vec::with_capacity(lines.len());
        for line in lines {
            if !line.text.contains('\n') {
                normalized.push(line);
                continue;
            }
            for part in line.text.split('\n') {
                normalized.push(DisplayLine {
                    text: part.strip_suffix('\r').unwrap_or(part).to_string(),
                    source: line.source.clone(),
                });
            }
        }
        self.lines = normalized;
    }

    /// Text handed to the rendering surface
    pub fn rendered_text(&self) -> String {
        if self.lines.is_empty() {
            return NO_IR_GENERATED.to_string();
        }
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Line at a 0-based index
    pub fn get(&self, index: usize) -> Option<&DisplayLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn mapper(&self) -> LineMapper<'_> {
        LineMapper::new(self)
    }
}
