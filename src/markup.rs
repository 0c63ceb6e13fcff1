//! Markup language and escaping discipline.
//!
//! Styled console text uses bracket tags: `[bold cyan]title[/]`. Tags nest,
//! `[/]` closes the innermost span, and doubled brackets (`[[`, `]]`) render
//! as literal brackets. [`escape`] neutralizes arbitrary text so it renders
//! exactly as written; it must be applied exactly once to every piece of
//! user-supplied text before embedding it in a toolkit-authored template, and
//! never to strings that are themselves markup.

use crossterm::style::{Attribute, Attributes, Color, ContentStyle};

/// Escape arbitrary text so every markup delimiter renders literally.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '[' => out.push_str("[["),
            ']' => out.push_str("]]"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape optional text; absent text is treated as empty.
pub fn escape_opt(text: Option<&str>) -> String {
    escape(text.unwrap_or_default())
}

/// Join values into one comma-separated string, escaping each value.
pub fn join_comma_escaped<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| escape(v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Resolved style of one markup span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
    pub strike: bool,
}

impl Style {
    /// Convert into a crossterm content style for terminal output.
    pub fn content_style(&self) -> ContentStyle {
        let mut attributes = Attributes::default();
        if self.bold {
            attributes.set(Attribute::Bold);
        }
        if self.dim {
            attributes.set(Attribute::Dim);
        }
        if self.italic {
            attributes.set(Attribute::Italic);
        }
        if self.underline {
            attributes.set(Attribute::Underlined);
        }
        if self.reverse {
            attributes.set(Attribute::Reverse);
        }
        if self.strike {
            attributes.set(Attribute::CrossedOut);
        }

        let mut style = ContentStyle::new();
        style.foreground_color = self.fg;
        style.background_color = self.bg;
        style.attributes = attributes;
        style
    }
}

/// One run of text carrying a single resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// Resolve a markup color word to a concrete terminal color.
pub fn color_by_name(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::Black,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        "grey" | "gray" => Color::Grey,
        "white" => Color::White,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        _ => return None,
    };
    Some(color)
}

/// Whether `tag` is a valid style tag body (color/attribute words only).
pub fn is_style_tag(tag: &str) -> bool {
    style_from_tag(tag, Style::default()).is_some()
}

fn style_from_tag(tag: &str, base: Style) -> Option<Style> {
    let mut style = base;
    let mut seen_any = false;
    for word in tag.split_whitespace() {
        seen_any = true;
        if let Some(bg_name) = word.strip_prefix("on_") {
            style.bg = Some(color_by_name(bg_name)?);
            continue;
        }
        match word {
            "bold" => style.bold = true,
            "dim" => style.dim = true,
            "italic" => style.italic = true,
            "underline" => style.underline = true,
            "reverse" => style.reverse = true,
            "strike" => style.strike = true,
            _ => style.fg = Some(color_by_name(word)?),
        }
    }
    if seen_any {
        Some(style)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Resolve a markup string into styled segments.
///
/// Unknown tags and unbalanced closers render literally rather than erroring,
/// so plain text containing stray brackets stays visible.
pub fn parse(markup: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut stack: Vec<Style> = vec![Style::default()];
    let mut buffer = String::new();
    let mut chars = markup.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '[' if chars.peek() == Some(&'[') => {
                chars.next();
                buffer.push('[');
            }
            ']' if chars.peek() == Some(&']') => {
                chars.next();
                buffer.push(']');
            }
            '[' => {
                let mut tag = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == ']' {
                        closed = true;
                        break;
                    }
                    tag.push(next);
                }
                if !closed {
                    // Unterminated tag: keep the raw text visible.
                    buffer.push('[');
                    buffer.push_str(&tag);
                    continue;
                }

                if tag == "/" {
                    if stack.len() > 1 {
                        flush(&mut segments, &mut buffer, current(&stack));
                        stack.pop();
                    } else {
                        buffer.push_str("[/]");
                    }
                } else if let Some(style) = style_from_tag(&tag, current(&stack)) {
                    flush(&mut segments, &mut buffer, current(&stack));
                    stack.push(style);
                } else {
                    buffer.push('[');
                    buffer.push_str(&tag);
                    buffer.push(']');
                }
            }
            _ => buffer.push(ch),
        }
    }

    flush(&mut segments, &mut buffer, current(&stack));
    segments
}

fn current(stack: &[Style]) -> Style {
    stack.last().copied().unwrap_or_default()
}

fn flush(segments: &mut Vec<Segment>, buffer: &mut String, style: Style) {
    if buffer.is_empty() {
        return;
    }
    segments.push(Segment {
        text: std::mem::take(buffer),
        style,
    });
}

/// Strip tags and un-double brackets: the text a reader actually sees.
pub fn plain(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for segment in parse(markup) {
        out.push_str(&segment.text);
    }
    out
}

/// Visible character width of a markup line after tag resolution.
pub fn visible_markup_width(markup: &str) -> usize {
    plain(markup).chars().count()
}

/// Right-pad a markup line with spaces to `width` visible characters.
pub fn pad_visible(markup: &str, width: usize) -> String {
    let current = visible_markup_width(markup);
    if current >= width {
        return markup.to_string();
    }
    let mut out = String::with_capacity(markup.len() + width - current);
    out.push_str(markup);
    for _ in current..width {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_is_identity_on_plain_text() {
        assert_eq!(escape("hello world"), "hello world");
    }

    #[test]
    fn escape_doubles_every_bracket() {
        assert_eq!(escape("[red]x[/]"), "[[red]]x[[/]]");
    }

    #[test]
    fn escaped_text_round_trips_through_plain() {
        // Escaping then rendering must display the original characters.
        for text in ["", "plain", "[bold]", "a[b]c", "[[already]]", "tail]"] {
            assert_eq!(plain(&escape(text)), text, "text: {text}");
        }
    }

    #[test]
    fn parse_resolves_nested_styles() {
        let segments = parse("[red]a[bold]b[/]c[/]");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "a");
        assert_eq!(segments[0].style.fg, Some(Color::Red));
        assert!(!segments[0].style.bold);
        assert_eq!(segments[1].text, "b");
        assert_eq!(segments[1].style.fg, Some(Color::Red));
        assert!(segments[1].style.bold);
        assert_eq!(segments[2].text, "c");
        assert!(!segments[2].style.bold);
    }

    #[test]
    fn parse_supports_background_and_attributes() {
        let segments = parse("[bold on_dark_grey cyan]x[/]");
        assert_eq!(segments.len(), 1);
        let style = segments[0].style;
        assert_eq!(style.fg, Some(Color::Cyan));
        assert_eq!(style.bg, Some(Color::DarkGrey));
        assert!(style.bold);
    }

    #[test]
    fn unknown_tag_renders_literally() {
        assert_eq!(plain("[not_a_style]x[/]"), "[not_a_style]x[/]");
    }

    #[test]
    fn unbalanced_closer_renders_literally() {
        assert_eq!(plain("a[/]b"), "a[/]b");
    }

    #[test]
    fn unterminated_tag_keeps_raw_text() {
        assert_eq!(plain("a[red"), "a[red");
    }

    #[test]
    fn doubled_brackets_render_single() {
        assert_eq!(plain("[[x]]"), "[x]");
    }

    #[test]
    fn join_comma_escaped_escapes_each_value() {
        assert_eq!(join_comma_escaped(["a", "[b]"]), "a, [[b]]");
    }

    #[test]
    fn pad_visible_measures_rendered_width() {
        // Tags and doubled brackets must not count toward padding width.
        let padded = pad_visible("[red]ab[/]", 4);
        assert_eq!(visible_markup_width(&padded), 4);
        assert_eq!(plain(&padded), "ab  ");
    }

    #[test]
    fn style_converts_to_content_style() {
        let segments = parse("[bold red]x[/]");
        let style = segments[0].style.content_style();
        assert_eq!(style.foreground_color, Some(Color::Red));
    }
}
