//! Widget description builders.
//!
//! Each builder turns application data into escaped, render-ready markup
//! lines; the console draws them. Builders never measure the real terminal —
//! the target width arrives at render time.

mod calendar;
mod chart;
mod grid;
mod panel;
mod table;

pub use calendar::{Calendar, CalendarEvent};
pub use chart::{BarChart, BreakdownChart};
pub use grid::{Columns, Grid};
pub use panel::Panel;
pub use table::Table;

use crate::console::Widget;
use crate::markup;
use crate::textutil;
use crate::theme::Theme;

/// Plain text block. Content is escaped and soft-wrapped to the target width.
#[derive(Debug, Clone)]
pub struct Text {
    lines: Vec<String>,
    is_markup: bool,
}

impl Text {
    /// Arbitrary text, escaped so it renders literally.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            lines: content.into().lines().map(str::to_string).collect(),
            is_markup: false,
        }
    }

    /// Toolkit-authored markup lines, passed through unwrapped.
    pub fn from_markup(lines: Vec<String>) -> Self {
        Self {
            lines,
            is_markup: true,
        }
    }
}

impl Widget for Text {
    fn markup_lines(&self, width: usize, _theme: &Theme) -> Vec<String> {
        if self.is_markup {
            return self.lines.clone();
        }
        let mut out = Vec::new();
        for line in &self.lines {
            // Wrap on the raw text, then escape each row, so a wrap point can
            // never split an escaped bracket pair.
            for row in textutil::wrap_line(line, width.max(1)) {
                out.push(markup::escape(&row));
            }
        }
        if out.is_empty() {
            out.push(String::new());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::plain;

    #[test]
    fn text_escapes_content() {
        let lines = Text::new("[red]x").markup_lines(80, &Theme::default());
        assert_eq!(lines, vec!["[[red]]x".to_string()]);
        assert_eq!(plain(&lines[0]), "[red]x");
    }

    #[test]
    fn text_wraps_before_escaping() {
        let lines = Text::new("[a] [b]").markup_lines(3, &Theme::default());
        let rendered: Vec<String> = lines.iter().map(|l| plain(l)).collect();
        assert_eq!(rendered, vec!["[a]".to_string(), "[b]".to_string()]);
    }

    #[test]
    fn markup_text_passes_through() {
        let lines =
            Text::from_markup(vec!["[bold]hi[/]".to_string()]).markup_lines(2, &Theme::default());
        assert_eq!(lines, vec!["[bold]hi[/]".to_string()]);
    }

    #[test]
    fn empty_text_still_produces_one_row() {
        let lines = Text::new("").markup_lines(10, &Theme::default());
        assert_eq!(lines.len(), 1);
    }
}
