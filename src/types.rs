use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Severity of a build diagnostic.
///
/// Numeric codes follow the build-tool convention: `1` for warnings, `2` for
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub const WARNING_CODE: i32 = 1;
    pub const ERROR_CODE: i32 = 2;

    pub fn code(self) -> i32 {
        match self {
            Severity::Warning => Self::WARNING_CODE,
            Severity::Error => Self::ERROR_CODE,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::WARNING_CODE => Some(Severity::Warning),
            Self::ERROR_CODE => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "invalid severity: {other} (expected \"warning\" or \"error\")"
            )),
        }
    }
}

/// A diagnostic attached to a file position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub severity: Severity,
    /// Rendered cause chain, if the diagnostic was raised from an error.
    pub cause: Option<String>,
}

impl Diagnostic {
    pub fn new(
        file: impl AsRef<Path>,
        line: u32,
        column: u32,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            line,
            column,
            message: message.into(),
            severity,
            cause: None,
        }
    }

    pub fn warning(file: impl AsRef<Path>, line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::new(file, line, column, message, Severity::Warning)
    }

    pub fn error(file: impl AsRef<Path>, line: u32, column: u32, message: impl Into<String>) -> Self {
        Self::new(file, line, column, message, Severity::Error)
    }

    pub fn with_cause(mut self, cause: &dyn std::error::Error) -> Self {
        self.cause = Some(render_cause(cause));
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.file.display(),
            self.line,
            self.column,
            self.severity,
            self.message
        )
    }
}

/// Flatten an error and its `source()` chain into one line.
pub fn render_cause(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(next) = source {
        out.push_str(": ");
        out.push_str(&next.to_string());
        source = next.source();
    }
    out
}
