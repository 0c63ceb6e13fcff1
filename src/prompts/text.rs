//! Free text, secret, and confirmation prompts.

use super::{next_key, read_line, run_line_protocol, RawModeGuard, Step, Validation};
use crate::console::Console;
use crate::error::PromptError;
use crate::markup;
use crate::settings;
use crate::theme::ThemeToken;
use crossterm::event::{KeyCode, KeyModifiers};
use std::io::{self, IsTerminal, Write};

type ValidatorFn = Box<dyn Fn(&str) -> Validation>;

/// Line-based text entry with optional default, validator, and empty-input
/// policy.
///
/// With `allow_empty` off (the default) a blank submission is rejected before
/// any caller validator runs. The accepted value reaches the caller raw;
/// escaping on display is the caller's responsibility.
pub struct TextPrompt {
    label: String,
    allow_empty: bool,
    default_value: Option<String>,
    validator: Option<ValidatorFn>,
}

impl TextPrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            allow_empty: false,
            default_value: None,
            validator: None,
        }
    }

    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Value returned for a blank submission instead of rejecting it.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn validate(mut self, validator: impl Fn(&str) -> Validation + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn ask(&self, console: &Console) -> Result<String, PromptError> {
        run_line_protocol(
            console,
            |console| {
                console.markup_stderr(&prompt_chrome(
                    console,
                    &self.label,
                    self.default_value.as_deref(),
                ));
            },
            |line| evaluate_text(line, self.allow_empty, self.default_value.as_deref(), self.validator.as_deref()),
        )
    }
}

/// Apply the empty-input policy, default, and validator to one submission.
fn evaluate_text(
    input: &str,
    allow_empty: bool,
    default_value: Option<&str>,
    validator: Option<&(dyn Fn(&str) -> Validation)>,
) -> Step<String> {
    if input.is_empty() {
        if let Some(default_value) = default_value {
            return Step::Accept(default_value.to_string());
        }
        if allow_empty {
            return Step::Accept(String::new());
        }
        return Step::Reject(settings::MSG_INVALID_INPUT.to_string());
    }

    if let Some(validator) = validator {
        let verdict = validator(input);
        if !verdict.valid {
            return Step::Reject(
                verdict
                    .message
                    .unwrap_or_else(|| settings::MSG_INVALID_INPUT.to_string()),
            );
        }
    }
    Step::Accept(input.to_string())
}

/// Secret entry: masked per keystroke in a terminal, hidden entirely when
/// masking is disabled, plain line input on pipes.
pub struct Secret {
    label: String,
    mask: Option<char>,
}

impl Secret {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mask: Some(settings::DEFAULT_SECRET_MASK),
        }
    }

    /// Character echoed per keystroke. `None` disables echo completely.
    pub fn mask(mut self, mask: Option<char>) -> Self {
        self.mask = mask;
        self
    }

    pub fn ask(&self, console: &Console) -> Result<String, PromptError> {
        if !(io::stdin().is_terminal() && io::stderr().is_terminal()) {
            console.markup_stderr(&prompt_chrome(console, &self.label, None));
            return match read_line()? {
                Some(line) => Ok(line),
                None => Err(PromptError::Eof),
            };
        }

        match self.mask {
            Some(mask) => self.ask_masked(console, mask),
            None => {
                // Fully hidden entry delegates to rpassword, which disables
                // echo on the controlling terminal for us.
                let plain = markup::plain(&prompt_chrome(console, &self.label, None));
                Ok(rpassword::prompt_password(plain)?)
            }
        }
    }

    fn ask_masked(&self, console: &Console, mask: char) -> Result<String, PromptError> {
        console.markup_stderr(&prompt_chrome(console, &self.label, None));
        let _guard = RawModeGuard::acquire()?;
        let mut secret = String::new();
        let mut stderr = io::stderr();

        loop {
            let Some(key) = next_key()? else {
                continue;
            };
            match key.code {
                KeyCode::Enter => {
                    write!(stderr, "\r\n")?;
                    stderr.flush()?;
                    return Ok(secret);
                }
                KeyCode::Backspace => {
                    if secret.pop().is_some() {
                        // Erase one mask cell.
                        write!(stderr, "\u{8} \u{8}")?;
                        stderr.flush()?;
                    }
                }
                KeyCode::Esc => {
                    write!(stderr, "\r\n")?;
                    stderr.flush()?;
                    return Err(PromptError::Interrupted);
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    write!(stderr, "\r\n")?;
                    stderr.flush()?;
                    return Err(PromptError::Interrupted);
                }
                KeyCode::Char(ch) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        || key.modifiers.contains(KeyModifiers::ALT)
                    {
                        continue;
                    }
                    secret.push(ch);
                    write!(stderr, "{mask}")?;
                    stderr.flush()?;
                }
                _ => {}
            }
        }
    }
}

/// Yes/no confirmation with a default answer.
pub struct Confirm {
    label: String,
    default: bool,
}

impl Confirm {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            default: false,
        }
    }

    pub fn default_answer(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn ask(&self, console: &Console) -> Result<bool, PromptError> {
        let hint = if self.default { "[Y/n]" } else { "[y/N]" };
        run_line_protocol(
            console,
            |console| {
                let theme = console.theme();
                console.markup_stderr(&format!(
                    "{} [bold {}]{}[/] {} {}",
                    theme.paint(ThemeToken::Accent, settings::PROMPT_QUESTION_GLYPH),
                    theme.style_words(ThemeToken::Accent),
                    markup::escape(&self.label),
                    theme.paint(ThemeToken::Muted, &markup::escape(hint)),
                    theme.paint(ThemeToken::Muted, settings::PROMPT_ANSWER_SEPARATOR),
                ));
            },
            |line| match parse_confirm(line, self.default) {
                Some(answer) => Step::Accept(answer),
                None => Step::Reject(settings::MSG_CONFIRM_RETRY.to_string()),
            },
        )
    }
}

/// Interpret a confirmation reply; empty input takes the default.
pub(crate) fn parse_confirm(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Shared prompt chrome: question glyph, escaped label, default hint.
fn prompt_chrome(console: &Console, label: &str, default_value: Option<&str>) -> String {
    let theme = console.theme();
    let default_hint = match default_value {
        Some(value) => format!(
            " {}",
            theme.paint(ThemeToken::Muted, &format!("({})", markup::escape(value)))
        ),
        None => String::new(),
    };
    format!(
        "{} [bold {}]{}[/]{default_hint} {}",
        theme.paint(ThemeToken::Accent, settings::PROMPT_QUESTION_GLYPH),
        theme.style_words(ThemeToken::Accent),
        markup::escape(label),
        theme.paint(ThemeToken::Muted, settings::PROMPT_ANSWER_SEPARATOR),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(step: Step<String>) -> Option<String> {
        match step {
            Step::Accept(value) => Some(value),
            Step::Reject(_) => None,
        }
    }

    fn rejects(step: Step<String>) -> Option<String> {
        match step {
            Step::Accept(_) => None,
            Step::Reject(message) => Some(message),
        }
    }

    #[test]
    fn empty_submission_rejected_without_allow_empty() {
        // No validator: any non-empty string is accepted immediately.
        let step = evaluate_text("", false, None, None);
        assert_eq!(rejects(step).as_deref(), Some(settings::MSG_INVALID_INPUT));
        let step = evaluate_text("anything", false, None, None);
        assert_eq!(accepts(step).as_deref(), Some("anything"));
    }

    #[test]
    fn empty_submission_accepted_with_allow_empty() {
        let step = evaluate_text("", true, None, None);
        assert_eq!(accepts(step).as_deref(), Some(""));
    }

    #[test]
    fn blank_submission_takes_default() {
        let step = evaluate_text("", false, Some("fallback"), None);
        assert_eq!(accepts(step).as_deref(), Some("fallback"));
    }

    #[test]
    fn validator_failure_uses_its_message() {
        let validator: &dyn Fn(&str) -> Validation = &|input| {
            if input.contains(' ') {
                Validation::fail("no spaces allowed")
            } else {
                Validation::ok()
            }
        };
        let step = evaluate_text("a b", false, None, Some(validator));
        assert_eq!(rejects(step).as_deref(), Some("no spaces allowed"));
        let step = evaluate_text("ok", false, None, Some(validator));
        assert_eq!(accepts(step).as_deref(), Some("ok"));
    }

    #[test]
    fn validator_failure_without_message_uses_fallback() {
        let validator: &dyn Fn(&str) -> Validation = &|_| Validation {
            valid: false,
            message: None,
        };
        let step = evaluate_text("x", false, None, Some(validator));
        assert_eq!(rejects(step).as_deref(), Some(settings::MSG_INVALID_INPUT));
    }

    #[test]
    fn empty_input_skips_the_validator() {
        // The empty-input policy applies before the caller validator runs.
        let validator: &dyn Fn(&str) -> Validation = &|_| Validation::fail("validator ran");
        let step = evaluate_text("", false, None, Some(validator));
        assert_eq!(rejects(step).as_deref(), Some(settings::MSG_INVALID_INPUT));
    }

    #[test]
    fn accepted_value_is_raw_and_unescaped() {
        let step = evaluate_text("[red]raw[/]", false, None, None);
        assert_eq!(accepts(step).as_deref(), Some("[red]raw[/]"));
    }

    #[test]
    fn confirm_parsing_covers_defaults_and_words() {
        assert_eq!(parse_confirm("", true), Some(true));
        assert_eq!(parse_confirm("", false), Some(false));
        assert_eq!(parse_confirm("y", false), Some(true));
        assert_eq!(parse_confirm("YES", false), Some(true));
        assert_eq!(parse_confirm("n", true), Some(false));
        assert_eq!(parse_confirm("no", true), Some(false));
        assert_eq!(parse_confirm("maybe", true), None);
    }

    #[test]
    fn prompt_chrome_escapes_label_and_default() {
        let console = Console::new(false);
        let chrome = prompt_chrome(&console, "[name]", Some("[d]"));
        let plain = markup::plain(&chrome);
        assert!(plain.contains("[name]"), "plain: {plain}");
        assert!(plain.contains("([d])"));
    }
}
