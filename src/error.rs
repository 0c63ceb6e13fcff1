//! Unified error types for the toolkit.

use std::fmt;
use std::io;

// ---------------------------------------------------------------------------
// SetupError
// ---------------------------------------------------------------------------

/// Caller-side configuration mistakes. These fail fast instead of being
/// silently corrected.
#[derive(Debug)]
pub enum SetupError {
    /// Contradictory selection bounds (`min > max`).
    InvalidBounds { min: usize, max: usize },
    /// A selection prompt was built with no choices.
    EmptyChoices,
    /// Requested theme name is neither built in nor configured.
    UnknownTheme(String),
    /// A theme override used a color word the markup language doesn't know.
    InvalidColor { token: String, value: String },
    /// A calendar was built for a date that doesn't exist.
    InvalidDate { year: i32, month: u32 },
    Io(io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { min, max } => {
                write!(f, "invalid selection bounds: min {min} > max {max}")
            }
            Self::EmptyChoices => write!(f, "selection prompt needs at least one choice"),
            Self::UnknownTheme(name) => write!(f, "unknown theme: {name}"),
            Self::InvalidColor { token, value } => {
                write!(f, "invalid color `{value}` for theme token `{token}`")
            }
            Self::InvalidDate { year, month } => {
                write!(f, "invalid calendar date: year {year} month {month}")
            }
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
        }
    }
}

impl std::error::Error for SetupError {}

impl From<io::Error> for SetupError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for SetupError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// PromptError
// ---------------------------------------------------------------------------

/// Errors from the interactive input path.
///
/// Validation failures never surface here; they re-prompt in place.
#[derive(Debug)]
pub enum PromptError {
    Io(io::Error),
    /// User aborted the prompt (Esc or Ctrl-C). Not recoverable by retry.
    Interrupted,
    /// Input source closed before a submission arrived.
    Eof,
    /// The prompt was constructed with contradictory settings.
    Setup(SetupError),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Interrupted => write!(f, "prompt interrupted"),
            Self::Eof => write!(f, "input stream closed"),
            Self::Setup(e) => write!(f, "setup: {e}"),
        }
    }
}

impl std::error::Error for PromptError {}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SetupError> for PromptError {
    fn from(e: SetupError) -> Self {
        Self::Setup(e)
    }
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors opening or driving a live/progress session.
#[derive(Debug)]
pub enum SessionError {
    /// Another live/progress session is already open. The terminal is a
    /// single exclusively-owned resource; sessions never overlap.
    Busy,
    Io(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "another live session is already open"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// UiError — top-level
// ---------------------------------------------------------------------------

/// Top-level error type aggregating every toolkit failure path.
#[derive(Debug)]
pub enum UiError {
    Setup(SetupError),
    Prompt(PromptError),
    Session(SessionError),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup(e) => write!(f, "setup: {e}"),
            Self::Prompt(e) => write!(f, "prompt: {e}"),
            Self::Session(e) => write!(f, "session: {e}"),
        }
    }
}

impl std::error::Error for UiError {}

impl From<SetupError> for UiError {
    fn from(e: SetupError) -> Self {
        Self::Setup(e)
    }
}

impl From<PromptError> for UiError {
    fn from(e: PromptError) -> Self {
        Self::Prompt(e)
    }
}

impl From<SessionError> for UiError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_error_display() {
        assert_eq!(
            SetupError::InvalidBounds { min: 3, max: 1 }.to_string(),
            "invalid selection bounds: min 3 > max 1"
        );
        assert_eq!(
            SetupError::EmptyChoices.to_string(),
            "selection prompt needs at least one choice"
        );
    }

    #[test]
    fn prompt_error_from_setup() {
        let e = PromptError::from(SetupError::EmptyChoices);
        assert!(e.to_string().starts_with("setup:"), "got: {e}");
    }

    #[test]
    fn session_error_busy_display() {
        assert_eq!(
            SessionError::Busy.to_string(),
            "another live session is already open"
        );
    }

    #[test]
    fn ui_error_aggregates_all_kinds() {
        let io_err = io::Error::new(io::ErrorKind::Other, "boom");
        assert!(UiError::from(PromptError::Interrupted)
            .to_string()
            .starts_with("prompt:"));
        assert!(UiError::from(SessionError::from(io_err))
            .to_string()
            .starts_with("session:"));
        assert!(UiError::from(SetupError::UnknownTheme("x".into()))
            .to_string()
            .contains("unknown theme"));
    }
}
