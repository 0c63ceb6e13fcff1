//! Constrained prompt protocol: presentation, validation, retry.
//!
//! Every prompt runs the same cycle: `Presenting → AwaitingInput →
//! Validating → Accepted | Rejected`. A rejection prints a styled message and
//! re-presents with prior state intact; there is no bound on retries, and the
//! cycle terminates only on valid input. Cancellation (Esc, Ctrl-C, EOF) is a
//! fatal abort surfaced as [`PromptError`], never a retry state.
//!
//! Prompts read keystrokes through crossterm when stdin/stderr are terminals
//! and fall back to plain line input otherwise, so scripts and pipes keep
//! working.

mod multi;
mod select;
mod text;

pub use multi::MultiSelect;
pub use select::Select;
pub use text::{Confirm, Secret, TextPrompt};

use crate::console::Console;
use crate::error::{PromptError, SetupError};
use crate::settings;
use crate::theme::ThemeToken;
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

/// Outcome of applying a validation rule to a candidate string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub message: Option<String>,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Cardinality constraint on a multi-select submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionBounds {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl SelectionBounds {
    /// Contradictory bounds are a caller bug; fail before any terminal IO.
    pub fn ensure_valid(&self) -> Result<(), SetupError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(SetupError::InvalidBounds { min, max });
            }
        }
        Ok(())
    }

    /// Violation message for a submission of `count` items, if any. Absent
    /// bounds leave that side unconstrained.
    pub fn violation(&self, count: usize) -> Option<String> {
        if let Some(min) = self.min {
            if count < min {
                return Some(settings::msg_select_at_least(min));
            }
        }
        if let Some(max) = self.max {
            if count > max {
                return Some(settings::msg_select_at_most(max));
            }
        }
        None
    }
}

/// Validation step result inside the retry cycle.
pub(crate) enum Step<T> {
    Accept(T),
    Reject(String),
}

/// Drive the retry cycle for line-based prompts until a submission is
/// accepted. `present` draws the prompt, `evaluate` judges one submission.
pub(crate) fn run_line_protocol<T>(
    console: &Console,
    mut present: impl FnMut(&Console),
    mut evaluate: impl FnMut(&str) -> Step<T>,
) -> Result<T, PromptError> {
    loop {
        present(console);
        let Some(line) = read_line()? else {
            return Err(PromptError::Eof);
        };
        match evaluate(&line) {
            Step::Accept(value) => return Ok(value),
            Step::Reject(message) => {
                tracing::debug!(%message, "prompt submission rejected");
                console.markup_line_stderr(&console.theme().paint(ThemeToken::Error, &message));
            }
        }
    }
}

/// Read one line from stdin. `None` means the stream closed.
pub(crate) fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Whether keystroke-driven prompt surfaces can run.
pub(crate) fn interactive_io() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Poll for the next pressed key, returning `None` on idle ticks.
pub(crate) fn next_key() -> io::Result<Option<KeyEvent>> {
    if !event::poll(Duration::from_millis(settings::EVENT_POLL_MS))? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat => {
            Ok(Some(key))
        }
        _ => Ok(None),
    }
}

/// Repaint an interactive frame in place and return its new row count.
pub(crate) fn redraw_frame(
    console: &Console,
    previous_rows: usize,
    lines: &[String],
) -> io::Result<usize> {
    let mut stderr = io::stderr();
    if previous_rows > 0 {
        stderr.queue(MoveUp(previous_rows as u16))?;
    }
    stderr.queue(MoveToColumn(0))?;
    stderr.queue(Clear(ClearType::FromCursorDown))?;
    for line in lines {
        stderr.queue(Print(console.styled_text(line)))?;
        stderr.queue(Print("\r\n"))?;
    }
    stderr.flush()?;
    Ok(lines.len())
}

/// Clear rows previously painted by an interactive frame.
pub(crate) fn clear_frame(previous_rows: usize) -> io::Result<()> {
    let mut stderr = io::stderr();
    if previous_rows > 0 {
        stderr.queue(MoveUp(previous_rows as u16))?;
    }
    stderr.queue(MoveToColumn(0))?;
    stderr.queue(Clear(ClearType::FromCursorDown))?;
    stderr.flush()?;
    Ok(())
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
pub(crate) struct RawModeGuard;

impl RawModeGuard {
    /// Enable terminal raw mode and return a guard that disables it on drop.
    pub(crate) fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_reject_min_above_max() {
        let bounds = SelectionBounds {
            min: Some(3),
            max: Some(1),
        };
        let err = bounds.ensure_valid().expect_err("should fail");
        assert!(err.to_string().contains("min 3 > max 1"), "err: {err}");
    }

    #[test]
    fn bounds_accept_equal_min_and_max() {
        let bounds = SelectionBounds {
            min: Some(2),
            max: Some(2),
        };
        assert!(bounds.ensure_valid().is_ok());
    }

    #[test]
    fn violation_messages_name_the_violated_side() {
        let bounds = SelectionBounds {
            min: Some(2),
            max: Some(3),
        };
        assert_eq!(
            bounds.violation(1).as_deref(),
            Some("select at least 2 item(s)")
        );
        assert_eq!(
            bounds.violation(4).as_deref(),
            Some("select at most 3 item(s)")
        );
        assert_eq!(bounds.violation(2), None);
        assert_eq!(bounds.violation(3), None);
    }

    #[test]
    fn absent_bounds_are_unconstrained() {
        let bounds = SelectionBounds::default();
        assert_eq!(bounds.violation(0), None);
        assert_eq!(bounds.violation(100), None);

        let min_only = SelectionBounds {
            min: Some(1),
            max: None,
        };
        assert_eq!(min_only.violation(100), None);
        assert!(min_only.violation(0).is_some());
    }

    #[test]
    fn validation_constructors() {
        assert!(Validation::ok().valid);
        let fail = Validation::fail("nope");
        assert!(!fail.valid);
        assert_eq!(fail.message.as_deref(), Some("nope"));
    }
}
