//! Multi-selection list prompt with cardinality bounds.

use super::{
    clear_frame, interactive_io, next_key, read_line, redraw_frame, RawModeGuard, SelectionBounds,
};
use crate::console::Console;
use crate::error::{PromptError, SetupError};
use crate::markup;
use crate::settings;
use crate::theme::ThemeToken;
use crossterm::event::{KeyCode, KeyModifiers};

/// Ordered list of choices toggled on/off, validated against
/// [`SelectionBounds`] on submission.
///
/// A submission outside the bounds prints the violated side and re-presents
/// with the toggle state intact; the retry loop is unbounded and terminates
/// only on a valid submission.
pub struct MultiSelect {
    title: String,
    items: Vec<String>,
    bounds: SelectionBounds,
    preselected: Vec<usize>,
}

impl MultiSelect {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            bounds: SelectionBounds::default(),
            preselected: Vec::new(),
        }
    }

    pub fn items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    /// Minimum accepted selection count.
    pub fn min(mut self, min: usize) -> Self {
        self.bounds.min = Some(min);
        self
    }

    /// Maximum accepted selection count.
    pub fn max(mut self, max: usize) -> Self {
        self.bounds.max = Some(max);
        self
    }

    pub fn bounds(mut self, bounds: SelectionBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Indices toggled on before the first presentation.
    pub fn preselect<I: IntoIterator<Item = usize>>(mut self, indices: I) -> Self {
        self.preselected = indices.into_iter().collect();
        self
    }

    /// Present the prompt and return the accepted indices in item order.
    pub fn ask(&self, console: &Console) -> Result<Vec<usize>, PromptError> {
        self.bounds.ensure_valid()?;
        if self.items.is_empty() {
            return Err(SetupError::EmptyChoices.into());
        }

        let mut checked = vec![false; self.items.len()];
        for &index in &self.preselected {
            if let Some(slot) = checked.get_mut(index) {
                *slot = true;
            }
        }

        if interactive_io() {
            self.ask_interactive(console, checked)
        } else {
            self.ask_fallback(console, checked)
        }
    }

    fn ask_interactive(
        &self,
        console: &Console,
        mut checked: Vec<bool>,
    ) -> Result<Vec<usize>, PromptError> {
        let _guard = RawModeGuard::acquire()?;
        let mut cursor = 0usize;
        let mut rows = 0usize;
        let mut violation: Option<String> = None;

        loop {
            let lines = self.frame_lines(console, &checked, cursor, violation.as_deref());
            rows = redraw_frame(console, rows, &lines)?;

            let Some(key) = next_key()? else {
                continue;
            };
            match key.code {
                KeyCode::Up => {
                    cursor = if cursor == 0 {
                        self.items.len() - 1
                    } else {
                        cursor - 1
                    };
                }
                KeyCode::Down => {
                    cursor = (cursor + 1) % self.items.len();
                }
                KeyCode::Char(' ') => {
                    checked[cursor] = !checked[cursor];
                    violation = None;
                }
                KeyCode::Enter => {
                    let selection = checked_indices(&checked);
                    match self.bounds.violation(selection.len()) {
                        Some(message) => {
                            // Rejected: keep the toggle state and re-present.
                            tracing::debug!(%message, "multi-select submission rejected");
                            violation = Some(message);
                        }
                        None => {
                            clear_frame(rows)?;
                            // Leave raw mode before echoing so the line ends
                            // clean.
                            drop(_guard);
                            self.echo_selection(console, &selection);
                            return Ok(selection);
                        }
                    }
                }
                KeyCode::Esc => {
                    clear_frame(rows)?;
                    return Err(PromptError::Interrupted);
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    clear_frame(rows)?;
                    return Err(PromptError::Interrupted);
                }
                _ => {}
            }
        }
    }

    /// Line-based fallback: numbers toggle items, an empty line submits the
    /// current state. Bounds violations loop with state intact, same as the
    /// interactive path.
    fn ask_fallback(
        &self,
        console: &Console,
        mut checked: Vec<bool>,
    ) -> Result<Vec<usize>, PromptError> {
        let theme = console.theme();
        loop {
            console.markup_line_stderr(&format!(
                "{} [bold {}]{}[/]",
                theme.paint(ThemeToken::Muted, settings::GLYPH_SECTION_BULLET),
                theme.style_words(ThemeToken::Accent),
                markup::escape(&self.title)
            ));
            for (index, item) in self.items.iter().enumerate() {
                let mark = if checked[index] {
                    settings::GLYPH_CHECKED
                } else {
                    settings::GLYPH_UNCHECKED
                };
                console.markup_line_stderr(&format!(
                    "{}{}. {mark} {}",
                    settings::INDENT_1,
                    index + 1,
                    markup::escape(item)
                ));
            }
            console.markup_stderr(&format!(
                "{}{}",
                settings::INDENT_1,
                settings::PROMPT_FALLBACK_TOGGLE
            ));

            let Some(line) = read_line()? else {
                return Err(PromptError::Eof);
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                let selection = checked_indices(&checked);
                match self.bounds.violation(selection.len()) {
                    Some(message) => {
                        tracing::debug!(%message, "multi-select submission rejected");
                        console
                            .markup_line_stderr(&theme.paint(ThemeToken::Error, &message));
                    }
                    None => return Ok(selection),
                }
                continue;
            }
            for index in parse_toggle_list(trimmed, self.items.len()) {
                checked[index] = !checked[index];
            }
        }
    }

    fn frame_lines(
        &self,
        console: &Console,
        checked: &[bool],
        cursor: usize,
        violation: Option<&str>,
    ) -> Vec<String> {
        let theme = console.theme();
        let mut lines = vec![
            format!(
                "{} [bold {}]{}[/]",
                theme.paint(ThemeToken::Muted, settings::GLYPH_SECTION_BULLET),
                theme.style_words(ThemeToken::Accent),
                markup::escape(&self.title)
            ),
            theme.paint(
                ThemeToken::Muted,
                &format!("{}{}", settings::INDENT_1, settings::MULTI_SELECT_HELP),
            ),
        ];
        if let Some(message) = violation {
            lines.push(format!(
                "{}{}",
                settings::INDENT_1,
                theme.paint(ThemeToken::Error, message)
            ));
        }
        for (index, item) in self.items.iter().enumerate() {
            let active = index == cursor;
            let marker = if active {
                theme.paint(ThemeToken::Marker, settings::GLYPH_MARKER_SELECTED)
            } else {
                theme.paint(ThemeToken::Muted, settings::GLYPH_MARKER_UNSELECTED)
            };
            let mark = if checked[index] {
                theme.paint(ThemeToken::Ok, settings::GLYPH_CHECKED)
            } else {
                settings::GLYPH_UNCHECKED.to_string()
            };
            let text = markup::escape(item);
            let body = if active {
                theme.paint(ThemeToken::Highlight, &text)
            } else {
                text
            };
            lines.push(format!("{}{marker} {mark} {body}", settings::INDENT_1));
        }
        lines
    }

    fn echo_selection(&self, console: &Console, selection: &[usize]) {
        let theme = console.theme();
        let chosen = markup::join_comma_escaped(
            selection.iter().map(|&index| self.items[index].as_str()),
        );
        console.markup_line_stderr(&format!(
            "{} {}: {}",
            theme.paint(ThemeToken::Muted, settings::GLYPH_SECTION_BULLET),
            markup::escape(&self.title),
            theme.paint(ThemeToken::Highlight, &chosen),
        ));
    }
}

/// Indices whose toggle is on, in item order.
pub(crate) fn checked_indices(checked: &[bool]) -> Vec<usize> {
    checked
        .iter()
        .enumerate()
        .filter(|(_, on)| **on)
        .map(|(index, _)| index)
        .collect()
}

/// Parse a toggle submission: whitespace/comma-separated 1-based numbers.
/// Out-of-range and non-numeric tokens are ignored.
pub(crate) fn parse_toggle_list(line: &str, len: usize) -> Vec<usize> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<usize>().ok())
        .filter(|&number| number >= 1 && number <= len)
        .map(|number| number - 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;

    #[test]
    fn invalid_bounds_fail_before_any_io() {
        let console = Console::new(false);
        let err = MultiSelect::new("pick")
            .items(["a"])
            .min(3)
            .max(1)
            .ask(&console)
            .expect_err("should fail");
        assert!(err.to_string().contains("min 3 > max 1"), "err: {err}");
    }

    #[test]
    fn empty_choice_list_fails_fast() {
        let console = Console::new(false);
        let err = MultiSelect::new("pick").ask(&console).expect_err("fails");
        assert!(matches!(
            err,
            PromptError::Setup(SetupError::EmptyChoices)
        ));
    }

    #[test]
    fn checked_indices_preserve_item_order() {
        assert_eq!(checked_indices(&[true, false, true]), vec![0, 2]);
        assert!(checked_indices(&[false, false]).is_empty());
    }

    #[test]
    fn toggle_list_parses_numbers_and_ignores_junk() {
        assert_eq!(parse_toggle_list("1, 3", 3), vec![0, 2]);
        assert_eq!(parse_toggle_list("2 4 x 0", 3), vec![1]);
        assert!(parse_toggle_list("", 3).is_empty());
    }

    #[test]
    fn frame_keeps_toggle_state_and_violation_message() {
        let console = Console::new(false);
        let prompt = MultiSelect::new("pick").items(["a", "b", "c"]).min(2);
        let checked = vec![true, false, true];
        let lines = prompt.frame_lines(&console, &checked, 1, Some("select at least 2 item(s)"));
        let joined = lines.join("\n");
        assert!(joined.contains("select at least 2 item(s)"));
        assert_eq!(joined.matches("[[x]]").count(), 2);
    }

    #[test]
    fn preselect_marks_only_valid_indices() {
        let prompt = MultiSelect::new("pick")
            .items(["a", "b"])
            .preselect([1, 9]);
        // Exercised through ask() in non-test contexts; here we verify the
        // builder recorded what it was given.
        assert_eq!(prompt.preselected, vec![1, 9]);
    }
}
