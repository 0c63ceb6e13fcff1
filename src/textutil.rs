//! Shared UTF-8-safe text measurement and padding helpers.
//!
//! Widget rendering pads and clips by visible characters, not bytes; byte
//! slicing can panic when the cut falls inside a multi-byte character. These
//! helpers centralize safe width behavior for the renderer side.

/// Count visible character width (single-cell approximation).
pub fn visible_width(s: &str) -> usize {
    s.chars().count()
}

/// Clip a string to at most `max_width` visible characters.
pub fn clip_to_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Right-pad with spaces up to `width` visible characters.
pub fn pad_right(s: &str, width: usize) -> String {
    let current = visible_width(s);
    if current >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + width - current);
    out.push_str(s);
    for _ in current..width {
        out.push(' ');
    }
    out
}

/// Left-pad with spaces up to `width` visible characters.
pub fn pad_left(s: &str, width: usize) -> String {
    let current = visible_width(s);
    if current >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + width - current);
    for _ in current..width {
        out.push(' ');
    }
    out.push_str(s);
    out
}

/// Center within `width`, biasing the extra space to the right.
pub fn center(s: &str, width: usize) -> String {
    let current = visible_width(s);
    if current >= width {
        return s.to_string();
    }
    let left = (width - current) / 2;
    let right = width - current - left;
    let mut out = String::with_capacity(s.len() + width - current);
    for _ in 0..left {
        out.push(' ');
    }
    out.push_str(s);
    for _ in 0..right {
        out.push(' ');
    }
    out
}

/// Greedy word wrap to fit `max_width` visible characters.
///
/// Words longer than a full row are hard-split; runs of whitespace collapse
/// to single separators.
pub fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }

    let mut rows: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let separator = usize::from(!current.is_empty());
            let room = max_width.saturating_sub(visible_width(&current) + separator);
            if visible_width(&word) <= room {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&word);
                break;
            }
            if current.is_empty() {
                // No boundary to fall back to: hard-split the word.
                rows.push(word.chars().take(max_width).collect());
                word = word.chars().skip(max_width).collect();
                continue;
            }
            rows.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Flatten newlines and clip for one-row previews.
pub fn truncate_single_line(s: &str, max_chars: usize) -> String {
    let flat: String = s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
    if flat.chars().count() > max_chars {
        format!("{}...", clip_to_width(&flat, max_chars))
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_width_counts_chars_not_bytes() {
        assert_eq!(visible_width("abc"), 3);
        assert_eq!(visible_width("héllo"), 5);
    }

    #[test]
    fn pad_right_reaches_exact_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcd", 2), "abcd");
    }

    #[test]
    fn pad_left_reaches_exact_width() {
        assert_eq!(pad_left("7", 3), "  7");
    }

    #[test]
    fn center_biases_extra_space_right() {
        assert_eq!(center("ab", 5), " ab  ");
    }

    #[test]
    fn wrap_line_prefers_word_boundaries() {
        let wrapped = wrap_line("one two three", 7);
        assert_eq!(wrapped, vec!["one two".to_string(), "three".to_string()]);
    }

    #[test]
    fn wrap_line_falls_back_to_hard_wrap() {
        let wrapped = wrap_line("superlongtoken", 5);
        assert_eq!(
            wrapped,
            vec!["super".to_string(), "longt".to_string(), "oken".to_string()]
        );
    }

    #[test]
    fn wrap_line_collapses_whitespace_runs() {
        assert_eq!(wrap_line("a    b", 10), vec!["a b".to_string()]);
        assert_eq!(wrap_line("", 10), vec![String::new()]);
        assert_eq!(wrap_line("   ", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_flattens_and_clips() {
        assert_eq!(truncate_single_line("hello\nworld", 8), "hello wo...");
    }
}
