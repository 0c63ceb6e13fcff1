//! Bordered panel widget.

use crate::console::{Justify, Widget};
use crate::markup;
use crate::settings;
use crate::textutil;
use crate::theme::{Theme, ThemeToken};

/// A box around arbitrary content, expanded to the target width, with an
/// optional bold header inset into the top border.
#[derive(Debug, Clone)]
pub struct Panel {
    content: String,
    header: Option<String>,
    header_justify: Justify,
    border_color: Option<String>,
}

impl Panel {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            header: None,
            header_justify: Justify::Left,
            border_color: None,
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn header_justify(mut self, justify: Justify) -> Self {
        self.header_justify = justify;
        self
    }

    /// Border style words (e.g. `"green"`). Invalid words fall back to the
    /// theme border color at render time.
    pub fn border_color(mut self, words: impl Into<String>) -> Self {
        self.border_color = Some(words.into());
        self
    }

    fn border_words<'a>(&'a self, theme: &'a Theme) -> &'a str {
        match self.border_color.as_deref() {
            Some(words) if markup::is_style_tag(words) => words,
            _ => theme.style_words(ThemeToken::Border),
        }
    }
}

impl Widget for Panel {
    fn markup_lines(&self, width: usize, theme: &Theme) -> Vec<String> {
        let width = width.max(6);
        let inner = width - 4;
        let border = self.border_words(theme);
        let mut lines = Vec::new();

        lines.push(top_border(
            self.header.as_deref(),
            self.header_justify,
            width,
            border,
        ));

        let edge = format!("[{border}]{}[/]", settings::BOX_VERTICAL);
        for raw_line in self.content.lines() {
            for row in textutil::wrap_line(raw_line, inner) {
                let cell = markup::pad_visible(&markup::escape(&row), inner);
                lines.push(format!("{edge} {cell} {edge}"));
            }
        }
        if self.content.is_empty() {
            lines.push(format!("{edge} {} {edge}", " ".repeat(inner)));
        }

        let mut bottom = String::new();
        bottom.push(settings::BOX_BOTTOM_LEFT);
        for _ in 0..width - 2 {
            bottom.push(settings::BOX_HORIZONTAL);
        }
        bottom.push(settings::BOX_BOTTOM_RIGHT);
        lines.push(format!("[{border}]{bottom}[/]"));
        lines
    }
}

/// Top border with the header inset at the requested alignment.
fn top_border(header: Option<&str>, justify: Justify, width: usize, border: &str) -> String {
    let bar_len = width - 2;
    let Some(header) = header.filter(|h| !h.is_empty()) else {
        let mut bar = String::new();
        bar.push(settings::BOX_TOP_LEFT);
        for _ in 0..bar_len {
            bar.push(settings::BOX_HORIZONTAL);
        }
        bar.push(settings::BOX_TOP_RIGHT);
        return format!("[{border}]{bar}[/]");
    };

    let inset = format!(" [bold]{}[/] ", markup::escape(header));
    let inset_width = markup::visible_markup_width(&inset);
    if inset_width >= bar_len {
        // Header too wide for the border: keep the structure, drop the inset.
        return top_border(None, justify, width, border);
    }

    let remaining = bar_len - inset_width;
    let (left, right) = match justify {
        Justify::Left => (1.min(remaining), remaining.saturating_sub(1)),
        Justify::Center => (remaining / 2, remaining - remaining / 2),
        Justify::Right => (remaining.saturating_sub(1), 1.min(remaining)),
    };

    let mut left_bar = String::new();
    left_bar.push(settings::BOX_TOP_LEFT);
    for _ in 0..left {
        left_bar.push(settings::BOX_HORIZONTAL);
    }
    let mut right_bar = String::new();
    for _ in 0..right {
        right_bar.push(settings::BOX_HORIZONTAL);
    }
    right_bar.push(settings::BOX_TOP_RIGHT);

    format!("[{border}]{left_bar}[/]{inset}[{border}]{right_bar}[/]")
}
