//! Borderless grid and responsive column widgets.

use crate::console::Widget;
use crate::markup;
use crate::settings;
use crate::textutil;
use crate::theme::Theme;

/// Borderless rows/columns with per-column gaps. The column count comes from
/// the first row; later rows pad or clip to it.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    gaps: Option<Vec<usize>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Per-column trailing gap widths, replacing the default spacing.
    pub fn column_gaps<I: IntoIterator<Item = usize>>(mut self, gaps: I) -> Self {
        self.gaps = Some(gaps.into_iter().collect());
        self
    }

    fn gap(&self, column: usize) -> usize {
        match &self.gaps {
            Some(gaps) => gaps.get(column).copied().unwrap_or(0),
            None => settings::COLUMNS_ITEM_GAP,
        }
    }
}

impl Widget for Grid {
    fn markup_lines(&self, _width: usize, _theme: &Theme) -> Vec<String> {
        let Some(first) = self.rows.first() else {
            return Vec::new();
        };
        let columns = first.len();
        if columns == 0 {
            return Vec::new();
        }

        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (index, cell) in row.iter().enumerate().take(columns) {
                widths[index] = widths[index].max(textutil::visible_width(cell));
            }
        }

        self.rows
            .iter()
            .map(|row| {
                let mut line = String::new();
                for (index, width) in widths.iter().enumerate() {
                    let cell = row.get(index).map(String::as_str).unwrap_or("");
                    line.push_str(&markup::pad_visible(&markup::escape(cell), *width));
                    if index + 1 < widths.len() {
                        line.push_str(&" ".repeat(self.gap(index)));
                    }
                }
                line.trim_end().to_string()
            })
            .collect()
    }
}

/// Items flowed into as many equal-width columns as fit the target width.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    items: Vec<String>,
}

impl Columns {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl Widget for Columns {
    fn markup_lines(&self, width: usize, _theme: &Theme) -> Vec<String> {
        if self.items.is_empty() {
            return Vec::new();
        }
        let cell = self
            .items
            .iter()
            .map(|item| textutil::visible_width(item))
            .max()
            .unwrap_or(1)
            .max(1)
            + settings::COLUMNS_ITEM_GAP;
        let per_row = (width / cell).max(1);

        self.items
            .chunks(per_row)
            .map(|chunk| {
                let mut line = String::new();
                for item in chunk {
                    line.push_str(&markup::pad_visible(&markup::escape(item), cell));
                }
                line.trim_end().to_string()
            })
            .collect()
    }
}
