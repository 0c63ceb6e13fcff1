//! Terminal renderer for widget descriptions and styled markup.
//!
//! The console is the single drawing surface: widget builders hand it
//! pre-composed markup lines and it resolves styles through the active theme.
//! Widgets and diagnostics write to stdout; interactive chrome (prompts,
//! progress frames) writes to stderr so piped output stays clean.

use crate::markup;
use crate::settings;
use crate::textutil;
use crate::theme::{Theme, ThemeToken};
use crossterm::{cursor, terminal, QueueableCommand};
use std::io::{self, IsTerminal, Write};
use termimad::MadSkin;

/// Title/label alignment shared by rules, panel headers, and chart labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

/// A renderable structural description, independent of final cell rendering.
///
/// Implementations return fully composed markup lines for a target width; the
/// console (not the widget) owns styling resolution and actual drawing, so
/// widget output stays inspectable in tests.
pub trait Widget {
    fn markup_lines(&self, width: usize, theme: &Theme) -> Vec<String>;
}

/// Handles all terminal output formatting.
#[derive(Debug, Clone)]
pub struct Console {
    /// Whether ANSI color/style output is enabled.
    color: bool,
    theme: Theme,
}

impl Console {
    /// Create a console with optional color output and the default theme.
    pub fn new(color: bool) -> Self {
        Self {
            color,
            theme: Theme::default(),
        }
    }

    /// Create a console with an explicit theme.
    pub fn with_theme(color: bool, theme: Theme) -> Self {
        Self { color, theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Current terminal width, with a stable fallback when detection fails.
    pub fn width(&self) -> usize {
        match terminal::size() {
            Ok((cols, _)) if cols > 0 => cols as usize,
            _ => settings::FALLBACK_COLUMNS,
        }
    }

    /// Resolve markup into a printable string (ANSI when color is enabled).
    pub(crate) fn styled_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for segment in markup::parse(text) {
            if self.color && segment.style != markup::Style::default() {
                let styled = segment.style.content_style().apply(&segment.text);
                out.push_str(&styled.to_string());
            } else {
                out.push_str(&segment.text);
            }
        }
        out
    }

    /// Write raw markup to stdout without a trailing newline.
    pub fn markup(&self, text: &str) {
        print!("{}", self.styled_text(text));
        let _ = io::stdout().flush();
    }

    /// Write one raw markup line to stdout.
    pub fn markup_line(&self, text: &str) {
        println!("{}", self.styled_text(text));
    }

    /// Write one raw markup line to stderr.
    pub(crate) fn markup_line_stderr(&self, text: &str) {
        eprintln!("{}", self.styled_text(text));
    }

    /// Write raw markup to stderr without a trailing newline.
    pub(crate) fn markup_stderr(&self, text: &str) {
        eprint!("{}", self.styled_text(text));
        let _ = io::stderr().flush();
    }

    // -----------------------------------------------------------------------
    // Styled one-liners
    // -----------------------------------------------------------------------

    /// Display a success message.
    pub fn ok(&self, message: &str) {
        self.markup_line(&self.theme.paint(ThemeToken::Ok, &markup::escape(message)));
    }

    /// Display an informational message.
    pub fn info(&self, message: &str) {
        self.markup_line(&self.theme.paint(ThemeToken::Info, &markup::escape(message)));
    }

    /// Display a warning (to stderr).
    pub fn warn(&self, message: &str) {
        self.markup_line_stderr(&self.theme.paint(ThemeToken::Warning, &markup::escape(message)));
    }

    /// Display an error with a label prefix (to stderr).
    pub fn error(&self, message: &str) {
        let body = format!("error: {}", markup::escape(message));
        self.markup_line_stderr(&self.theme.paint(ThemeToken::Error, &body));
    }

    /// Display a muted note.
    pub fn note(&self, message: &str) {
        self.markup_line(&self.theme.paint(ThemeToken::Note, &markup::escape(message)));
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Horizontal rule across the full width.
    pub fn rule(&self) {
        self.rule_titled(None, Justify::Left);
    }

    /// Horizontal rule with an optional bold title inset.
    pub fn rule_titled(&self, title: Option<&str>, justify: Justify) {
        self.markup_line(&compose_rule(title, justify, self.width(), &self.theme));
    }

    /// Large banner header for section starts.
    pub fn banner(&self, text: &str) {
        let width = self.width();
        let line: String = std::iter::repeat(settings::BANNER_HORIZONTAL)
            .take(width)
            .collect();
        let title = textutil::center(&markup::escape(text), width);
        self.markup_line(&self.theme.paint(ThemeToken::Border, &line));
        self.markup_line(&format!(
            "[bold {}]{title}[/]",
            self.theme.style_words(ThemeToken::Accent)
        ));
        self.markup_line(&self.theme.paint(ThemeToken::Border, &line));
    }

    /// Print `count` blank lines.
    pub fn blank_lines(&self, count: usize) {
        for _ in 0..count {
            println!();
        }
    }

    /// Clear the screen and move the cursor home.
    pub fn clear(&self) {
        let mut out = io::stdout();
        let _ = out
            .queue(terminal::Clear(terminal::ClearType::All))
            .and_then(|out| out.queue(cursor::MoveTo(0, 0)))
            .map(|_| ());
        let _ = out.flush();
    }

    /// Render a markdown document with terminal-friendly layout.
    pub fn markdown(&self, input: &str) {
        let skin = if self.color {
            MadSkin::default()
        } else {
            MadSkin::no_style()
        };
        let formatted = skin.text(input, None).to_string();
        println!("{}", formatted.trim_end_matches('\n'));
    }

    /// Draw a widget description at the current terminal width.
    pub fn draw(&self, widget: &impl Widget) {
        for line in self.render_widget(widget) {
            self.markup_line(&line);
        }
    }

    /// Compose a widget into markup lines without drawing it.
    pub fn render_widget(&self, widget: &impl Widget) -> Vec<String> {
        widget.markup_lines(self.width(), &self.theme)
    }

    // -----------------------------------------------------------------------
    // Environment
    // -----------------------------------------------------------------------

    /// Whether stdin and stdout are both attached to a terminal.
    pub fn is_interactive(&self) -> bool {
        io::stdin().is_terminal() && io::stdout().is_terminal()
    }

    /// Ensure interactive operations can run. Prints guidance and an example
    /// invocation instead of letting a prompt hang on a pipe.
    pub fn require_interactive(&self, example: Option<&str>) -> bool {
        if self.is_interactive() {
            return true;
        }
        self.error(settings::MSG_NOT_INTERACTIVE);
        if let Some(example) = example {
            self.warn(&format!("example: {example}"));
        }
        false
    }
}

/// Compose the markup for a rule line with an optional title inset.
fn compose_rule(title: Option<&str>, justify: Justify, width: usize, theme: &Theme) -> String {
    let line_words = theme.style_words(ThemeToken::RuleLine);
    let Some(title) = title.filter(|t| !t.is_empty()) else {
        let bar: String = std::iter::repeat(settings::RULE_CHAR).take(width).collect();
        return format!("[{line_words}]{bar}[/]");
    };

    let inset = format!(" [bold]{}[/] ", markup::escape(title));
    let inset_width = markup::visible_markup_width(&inset);
    if inset_width + 2 >= width {
        return inset;
    }

    let remaining = width - inset_width;
    let (left, right) = match justify {
        Justify::Left => (2.min(remaining), remaining.saturating_sub(2)),
        Justify::Center => (remaining / 2, remaining - remaining / 2),
        Justify::Right => (remaining.saturating_sub(2), 2.min(remaining)),
    };
    let left_bar: String = std::iter::repeat(settings::RULE_CHAR).take(left).collect();
    let right_bar: String = std::iter::repeat(settings::RULE_CHAR).take(right).collect();
    format!("[{line_words}]{left_bar}[/]{inset}[{line_words}]{right_bar}[/]")
}
