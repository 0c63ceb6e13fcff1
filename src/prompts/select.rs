//! Single-selection list prompt.

use super::{
    clear_frame, interactive_io, next_key, redraw_frame, run_line_protocol, RawModeGuard, Step,
};
use crate::console::Console;
use crate::error::{PromptError, SetupError};
use crate::markup;
use crate::settings;
use crate::theme::ThemeToken;
use crossterm::event::{KeyCode, KeyModifiers};

/// Ordered list of choices resolved to exactly one selection.
///
/// Interactive mode supports arrow keys, live substring filtering, and an
/// optional paged window. Selection cannot produce an invalid choice by
/// construction, so there is no retry loop in interactive mode; the numeric
/// fallback re-prompts until the number parses in range.
pub struct Select {
    title: String,
    items: Vec<String>,
    filter_enabled: bool,
    page_size: Option<usize>,
    initial: usize,
}

impl Select {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            filter_enabled: true,
            page_size: None,
            initial: 0,
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

    pub fn item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Toggle live substring filtering (on by default).
    pub fn enable_filter(mut self, enabled: bool) -> Self {
        self.filter_enabled = enabled;
        self
    }

    /// Show at most `size` choices at a time, scrolling around the cursor.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size.max(1));
        self
    }

    pub fn initial(mut self, index: usize) -> Self {
        self.initial = index;
        self
    }

    /// Present the prompt and return the selected index into the items.
    pub fn ask(&self, console: &Console) -> Result<usize, PromptError> {
        if self.items.is_empty() {
            return Err(SetupError::EmptyChoices.into());
        }
        if interactive_io() {
            self.ask_interactive(console)
        } else {
            self.ask_fallback(console)
        }
    }

    /// Present the prompt and return the selected item text.
    pub fn ask_value(&self, console: &Console) -> Result<String, PromptError> {
        let index = self.ask(console)?;
        Ok(self.items[index].clone())
    }

    fn ask_fallback(&self, console: &Console) -> Result<usize, PromptError> {
        let count = self.items.len();
        run_line_protocol(
            console,
            |console| {
                let theme = console.theme();
                console.markup_line_stderr(&format!(
                    "{} [bold {}]{}[/]",
                    theme.paint(ThemeToken::Muted, settings::GLYPH_SECTION_BULLET),
                    theme.style_words(ThemeToken::Accent),
                    markup::escape(&self.title)
                ));
                for (index, item) in self.items.iter().enumerate() {
                    console.markup_line_stderr(&format!(
                        "{}{}. {}",
                        settings::INDENT_1,
                        index + 1,
                        markup::escape(item)
                    ));
                }
                console.markup_stderr(&format!(
                    "{}{}",
                    settings::INDENT_1,
                    settings::PROMPT_FALLBACK_PICK
                ));
            },
            |line| match line.trim().parse::<usize>() {
                Ok(number) if number >= 1 && number <= count => Step::Accept(number - 1),
                _ => Step::Reject(format!("enter a number between 1 and {count}")),
            },
        )
    }

    fn ask_interactive(&self, console: &Console) -> Result<usize, PromptError> {
        let _guard = RawModeGuard::acquire()?;
        let mut filter = String::new();
        let mut selected = self.initial.min(self.items.len() - 1);
        let mut rows = 0usize;

        loop {
            let visible = filtered_indices(&self.items, &filter);
            if selected >= visible.len() {
                selected = visible.len().saturating_sub(1);
            }
            let lines = self.frame_lines(console, &visible, selected, &filter);
            rows = redraw_frame(console, rows, &lines)?;

            let Some(key) = next_key()? else {
                continue;
            };
            match key.code {
                KeyCode::Up => {
                    if !visible.is_empty() {
                        selected = if selected == 0 {
                            visible.len() - 1
                        } else {
                            selected - 1
                        };
                    }
                }
                KeyCode::Down => {
                    if !visible.is_empty() {
                        selected = (selected + 1) % visible.len();
                    }
                }
                KeyCode::Enter => {
                    if let Some(&index) = visible.get(selected) {
                        clear_frame(rows)?;
                        // Leave raw mode before echoing so the line ends clean.
                        drop(_guard);
                        echo_choice(console, &self.title, &self.items[index]);
                        return Ok(index);
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
                KeyCode::Backspace => {
                    filter.pop();
                    selected = 0;
                }
                KeyCode::Char(ch) => {
                    if self.filter_enabled
                        && !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT)
                    {
                        filter.push(ch);
                        selected = 0;
                    }
                }
                _ => {}
            }
        }
    }

    fn frame_lines(
        &self,
        console: &Console,
        visible: &[usize],
        selected: usize,
        filter: &str,
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
                &format!("{}{}", settings::INDENT_1, settings::SELECT_HELP),
            ),
        ];
        if !filter.is_empty() {
            lines.push(theme.paint(
                ThemeToken::Muted,
                &format!("{}filter: {}", settings::INDENT_1, markup::escape(filter)),
            ));
        }

        let (start, end) = page_window(visible.len(), selected, self.page_size);
        if start > 0 {
            lines.push(theme.paint(ThemeToken::Muted, "  ..."));
        }
        for (offset, &item_index) in visible[start..end].iter().enumerate() {
            let position = start + offset;
            let active = position == selected;
            let marker = if active {
                theme.paint(ThemeToken::Marker, settings::GLYPH_MARKER_SELECTED)
            } else {
                theme.paint(ThemeToken::Muted, settings::GLYPH_MARKER_UNSELECTED)
            };
            let text = markup::escape(&self.items[item_index]);
            let body = if active {
                theme.paint(ThemeToken::Highlight, &text)
            } else {
                text
            };
            lines.push(format!("{}{marker} {body}", settings::INDENT_1));
        }
        if end < visible.len() {
            lines.push(theme.paint(ThemeToken::Muted, "  ..."));
        }
        if visible.is_empty() {
            lines.push(theme.paint(ThemeToken::Muted, "  (no matches)"));
        }
        lines
    }
}

/// Echo the accepted choice where the frame used to be.
fn echo_choice(console: &Console, title: &str, item: &str) {
    let theme = console.theme();
    console.markup_line_stderr(&format!(
        "{} {}: {}",
        theme.paint(ThemeToken::Muted, settings::GLYPH_SECTION_BULLET),
        markup::escape(title),
        theme.paint(ThemeToken::Highlight, &markup::escape(item)),
    ));
}

/// Indices of items whose text contains `filter`, case-insensitively.
pub(crate) fn filtered_indices(items: &[String], filter: &str) -> Vec<usize> {
    if filter.is_empty() {
        return (0..items.len()).collect();
    }
    let needle = filter.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

/// Visible window into a paged list, keeping the cursor centered.
pub(crate) fn page_window(len: usize, selected: usize, page_size: Option<usize>) -> (usize, usize) {
    let Some(page) = page_size else {
        return (0, len);
    };
    if page >= len {
        return (0, len);
    }
    let start = selected.saturating_sub(page / 2).min(len - page);
    (start, start + page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_filter_keeps_every_item() {
        let all = filtered_indices(&items(&["a", "b"]), "");
        assert_eq!(all, vec![0, 1]);
    }

    #[test]
    fn filter_matches_substrings_case_insensitively() {
        let list = items(&["Apple", "banana", "Pineapple"]);
        assert_eq!(filtered_indices(&list, "apple"), vec![0, 2]);
        assert_eq!(filtered_indices(&list, "NAN"), vec![1]);
        assert!(filtered_indices(&list, "zzz").is_empty());
    }

    #[test]
    fn page_window_covers_short_lists_entirely() {
        assert_eq!(page_window(3, 0, Some(10)), (0, 3));
        assert_eq!(page_window(3, 2, None), (0, 3));
    }

    #[test]
    fn page_window_tracks_the_cursor() {
        assert_eq!(page_window(10, 0, Some(4)), (0, 4));
        let (start, end) = page_window(10, 5, Some(4));
        assert!(start <= 5 && 5 < end);
        assert_eq!(end - start, 4);
        // Window never runs past the end of the list.
        assert_eq!(page_window(10, 9, Some(4)), (6, 10));
    }

    #[test]
    fn asking_with_no_items_fails_fast() {
        let console = Console::new(false);
        let err = Select::new("pick").ask(&console).expect_err("should fail");
        assert!(err.to_string().contains("at least one choice"), "err: {err}");
    }

    #[test]
    fn frame_marks_the_selected_row() {
        let console = Console::new(false);
        let select = Select::new("pick").items(["one", "two"]);
        let lines = select.frame_lines(&console, &[0, 1], 1, "");
        let joined = lines.join("\n");
        assert!(joined.contains(settings::GLYPH_MARKER_SELECTED));
        let marked: Vec<&String> = lines
            .iter()
            .filter(|l| l.contains(settings::GLYPH_MARKER_SELECTED))
            .collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("two"));
    }
}
