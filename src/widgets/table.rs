//! Styled table widget with rounded borders.

use crate::console::Widget;
use crate::markup;
use crate::settings;
use crate::textutil;
use crate::theme::{Theme, ThemeToken};

/// A titled table sized to its content. Headers and cells are arbitrary text;
/// escaping happens at render so brackets in data stay literal.
#[derive(Debug, Clone, Default)]
pub struct Table {
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn row<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    fn column_widths(&self, columns: usize) -> Vec<usize> {
        let mut widths = vec![1usize; columns];
        for (index, header) in self.headers.iter().enumerate() {
            widths[index] = widths[index].max(textutil::visible_width(header));
        }
        for row in &self.rows {
            for (index, cell) in row.iter().enumerate() {
                widths[index] = widths[index].max(textutil::visible_width(cell));
            }
        }
        widths
    }
}

impl Widget for Table {
    fn markup_lines(&self, _width: usize, theme: &Theme) -> Vec<String> {
        let columns = self.column_count();
        if columns == 0 {
            return Vec::new();
        }
        let widths = self.column_widths(columns);
        let border = theme.style_words(ThemeToken::Border);
        let header_words = theme.style_words(ThemeToken::HeaderText);

        // Total width: per column content + one space padding each side and a
        // vertical separator, plus the closing edge.
        let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        let mut lines = Vec::new();

        if let Some(title) = self.title.as_deref() {
            let escaped = markup::escape(title);
            let title_width = markup::visible_markup_width(&escaped);
            let pad = total.saturating_sub(title_width) / 2;
            lines.push(format!("{}[bold]{escaped}[/]", " ".repeat(pad)));
        }

        lines.push(horizontal_edge(
            &widths,
            settings::BOX_TOP_LEFT,
            settings::BOX_TEE_DOWN,
            settings::BOX_TOP_RIGHT,
            border,
        ));

        if !self.headers.is_empty() {
            let cells: Vec<String> = (0..columns)
                .map(|index| {
                    let text = self.headers.get(index).map(String::as_str).unwrap_or("");
                    format!("[{header_words}]{}[/]", markup::escape(text))
                })
                .collect();
            lines.push(content_row(&widths, &cells, border));
            lines.push(horizontal_edge(
                &widths,
                settings::BOX_TEE_RIGHT,
                settings::BOX_CROSS,
                settings::BOX_TEE_LEFT,
                border,
            ));
        }

        for row in &self.rows {
            let cells: Vec<String> = (0..columns)
                .map(|index| markup::escape(row.get(index).map(String::as_str).unwrap_or("")))
                .collect();
            lines.push(content_row(&widths, &cells, border));
        }

        lines.push(horizontal_edge(
            &widths,
            settings::BOX_BOTTOM_LEFT,
            settings::BOX_TEE_UP,
            settings::BOX_BOTTOM_RIGHT,
            border,
        ));
        lines
    }
}

fn horizontal_edge(
    widths: &[usize],
    left: char,
    junction: char,
    right: char,
    border_words: &str,
) -> String {
    let mut bar = String::new();
    bar.push(left);
    for (index, width) in widths.iter().enumerate() {
        if index > 0 {
            bar.push(junction);
        }
        for _ in 0..width + 2 {
            bar.push(settings::BOX_HORIZONTAL);
        }
    }
    bar.push(right);
    format!("[{border_words}]{bar}[/]")
}

fn content_row(widths: &[usize], cells: &[String], border_words: &str) -> String {
    let edge = format!("[{border_words}]{}[/]", settings::BOX_VERTICAL);
    let mut line = String::new();
    line.push_str(&edge);
    for (index, width) in widths.iter().enumerate() {
        let cell = cells.get(index).map(String::as_str).unwrap_or("");
        line.push(' ');
        line.push_str(&markup::pad_visible(cell, *width));
        line.push(' ');
        line.push_str(&edge);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::plain;

    fn plain_lines(table: &Table) -> Vec<String> {
        table
            .markup_lines(80, &Theme::default())
            .iter()
            .map(|l| plain(l))
            .collect()
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert!(Table::new()
            .markup_lines(80, &Theme::default())
            .is_empty());
    }

    #[test]
    fn columns_size_to_widest_cell() {
        let table = Table::new()
            .headers(["name", "id"])
            .row(["a-much-longer-value", "1"]);
        let lines = plain_lines(&table);
        assert!(lines[0].starts_with('╭'));
        assert!(lines[1].contains("name"));
        assert!(lines[3].contains("a-much-longer-value"));
        // Every row spans the same total width.
        let width = lines[0].chars().count();
        for line in &lines {
            assert_eq!(line.chars().count(), width, "line: {line}");
        }
    }

    #[test]
    fn header_separator_present_only_with_headers() {
        let with_headers = Table::new().headers(["h"]).row(["x"]);
        let without = Table::new().row(["x"]);
        assert!(plain_lines(&with_headers).iter().any(|l| l.contains('┼') || l.contains('├')));
        assert!(!plain_lines(&without).iter().any(|l| l.contains('├')));
    }

    #[test]
    fn title_is_centered_and_escaped() {
        let table = Table::new().title("[T]").headers(["col"]).row(["v"]);
        let lines = plain_lines(&table);
        assert!(lines[0].trim() == "[T]", "line: {:?}", lines[0]);
        assert!(lines[0].starts_with(' '));
    }

    #[test]
    fn ragged_rows_pad_to_column_count() {
        let table = Table::new().headers(["a", "b"]).row(["only"]);
        let lines = plain_lines(&table);
        let width = lines[1].chars().count();
        assert_eq!(lines[3].chars().count(), width);
    }

    #[test]
    fn cells_with_brackets_render_literally() {
        let table = Table::new().headers(["h"]).row(["[red]"]);
        let lines = plain_lines(&table);
        assert!(lines.iter().any(|l| l.contains("[red]")));
    }
}
