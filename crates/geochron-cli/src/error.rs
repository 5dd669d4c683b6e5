use std::fmt;

use geochron_editor::EditorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// CLI usage error (missing args, invalid flags).
    Usage = 1,
    /// Input error (missing file, invalid ROI document, config or script).
    Input = 2,
    /// Processing error (a script gesture the editor refuses).
    Processing = 3,
}

#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Usage,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Input,
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Processing,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.code as i32
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Anything that fails while loading files is an input error.
impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::input(format!("{err:#}"))
    }
}

impl From<EditorError> for CliError {
    fn from(err: EditorError) -> Self {
        Self::processing(err.to_string())
    }
}
