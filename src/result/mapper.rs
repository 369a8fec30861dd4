//! Display line to source line resolution

use super::ResultBuffer;

/// Outcome of resolving a display line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Mapped { file: &'a str, line: u32 },
    /// Out of range, no source reference, or a reference without a file
    NotMapped,
}

impl Resolution<'_> {
    pub fn is_mapped(&self) -> bool {
        matches!(self, Resolution::Mapped { .. })
    }

    /// Source line, if mapped
    pub fn line(&self) -> Option<u32> {
        match self {
            Resolution::Mapped { line, .. } => Some(*line),
            Resolution::NotMapped => None,
        }
    }
}

/// Translates 1-based surface line numbers into source locations using
/// the current contents of a [`ResultBuffer`]
#[derive(Debug, Clone, Copy)]
pub struct LineMapper<'a> {
    buffer: &'a ResultBuffer,
}

impl<'a> LineMapper<'a> {
    pub fn new(buffer: &'a ResultBuffer) -> Self {
        LineMapper { buffer }
    }

    pub fn resolve(&self, display_line: usize) -> Resolution<'a> {
        let Some(index) = display_line.checked_sub(1) else {
            return Resolution::NotMapped;
        };
        let Some(source) = self.buffer.get(index).and_then(|l| l.source.as_ref()) else {
            return Resolution::NotMapped;
        };
        match source.file.as_deref() {
            Some(file) => Resolution::Mapped {
                file,
                line: source.line,
            },
            None => Resolution::NotMapped,
        }
    }
}
