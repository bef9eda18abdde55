//! Server messages
//!
//! Informational output the server emits while a batch runs (PostgreSQL
//! notices). Some of it signals an error even though the batch succeeded.

use std::fmt;

/// Substring that marks a server message as an error
pub const ERROR_MARKER: &str = "ERROR";

/// A diagnostic line emitted by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMessage {
    /// Severity (`NOTICE`, `WARNING`, `INFO`, ...)
    pub severity: String,

    /// SQLSTATE code
    pub code: Option<String>,

    /// Message text
    pub message: String,

    /// Optional detail line
    pub detail: Option<String>,

    /// Optional hint line
    pub hint: Option<String>,
}

impl ServerMessage {
    /// Creates a message with the given severity and text
    pub fn new(severity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: severity.into(),
            code: None,
            message: message.into(),
            detail: None,
            hint: None,
        }
    }

    /// Sets the SQLSTATE code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the detail line
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the hint line
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Whether the rendered message carries the error marker
    ///
    /// Matches anywhere in the text, so a `NOTICE` whose body reports an
    /// `ERROR` from a nested procedure also counts.
    pub fn is_error(&self) -> bool {
        self.to_string().contains(ERROR_MARKER)
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} {}: {}", self.severity, code, self.message)?,
            None => write!(f, "{}: {}", self.severity, self.message)?,
        }
        if let Some(detail) = &self.detail {
            write!(f, "\nDETAIL: {detail}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\nHINT: {hint}")?;
        }
        Ok(())
    }
}
