//! Fixed 2×2 quadrant layout composition.
//!
//! The split structure never varies: a root region divides into `left` and
//! `right` columns, each divided into `top` and `bottom` rows. Content is
//! optional per quadrant; an empty quadrant still occupies its share of the
//! width and of its row's height.

use crate::console::Widget;
use crate::markup;
use crate::settings;
use crate::theme::Theme;

/// One of the four fixed regions of the 2×2 split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Column name in the split structure.
    pub fn column(self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomLeft => "left",
            Self::TopRight | Self::BottomRight => "right",
        }
    }

    /// Row name in the split structure.
    pub fn row(self) -> &'static str {
        match self {
            Self::TopLeft | Self::TopRight => "top",
            Self::BottomLeft | Self::BottomRight => "bottom",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}

/// A 2×2 spatial partition holding up to four content blocks.
#[derive(Default)]
pub struct QuadrantLayout {
    regions: [Option<Box<dyn Widget>>; 4],
}

impl QuadrantLayout {
    /// Build the fixed split with all four quadrants empty. An empty layout
    /// is valid and renderable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign content to a named quadrant.
    pub fn set(mut self, quadrant: Quadrant, content: impl Widget + 'static) -> Self {
        self.regions[quadrant.index()] = Some(Box::new(content));
        self
    }

    pub fn top_left(self, content: impl Widget + 'static) -> Self {
        self.set(Quadrant::TopLeft, content)
    }

    pub fn top_right(self, content: impl Widget + 'static) -> Self {
        self.set(Quadrant::TopRight, content)
    }

    pub fn bottom_left(self, content: impl Widget + 'static) -> Self {
        self.set(Quadrant::BottomLeft, content)
    }

    pub fn bottom_right(self, content: impl Widget + 'static) -> Self {
        self.set(Quadrant::BottomRight, content)
    }

    fn region_lines(&self, quadrant: Quadrant, width: usize, theme: &Theme) -> Vec<String> {
        match &self.regions[quadrant.index()] {
            Some(widget) => widget.markup_lines(width, theme),
            None => Vec::new(),
        }
    }
}

impl Widget for QuadrantLayout {
    fn markup_lines(&self, width: usize, theme: &Theme) -> Vec<String> {
        let column_width = width.saturating_sub(settings::LAYOUT_GUTTER) / 2;
        let mut lines = Vec::new();
        compose_row(
            self.region_lines(Quadrant::TopLeft, column_width, theme),
            self.region_lines(Quadrant::TopRight, column_width, theme),
            column_width,
            &mut lines,
        );
        compose_row(
            self.region_lines(Quadrant::BottomLeft, column_width, theme),
            self.region_lines(Quadrant::BottomRight, column_width, theme),
            column_width,
            &mut lines,
        );
        lines
    }
}

/// Join one split row: both columns padded to equal height and width.
fn compose_row(
    left: Vec<String>,
    right: Vec<String>,
    column_width: usize,
    out: &mut Vec<String>,
) {
    let height = left.len().max(right.len());
    let gutter = " ".repeat(settings::LAYOUT_GUTTER);
    for row in 0..height {
        let left_cell = left.get(row).map(String::as_str).unwrap_or("");
        let right_cell = right.get(row).map(String::as_str).unwrap_or("");
        out.push(format!(
            "{}{gutter}{right_cell}",
            markup::pad_visible(left_cell, column_width)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::plain;
    use crate::widgets::Text;

    #[test]
    fn empty_layout_is_valid_and_renders_nothing() {
        let layout = QuadrantLayout::new();
        assert!(layout.markup_lines(80, &Theme::default()).is_empty());
    }

    #[test]
    fn quadrant_names_follow_the_split_structure() {
        assert_eq!(Quadrant::TopLeft.column(), "left");
        assert_eq!(Quadrant::TopLeft.row(), "top");
        assert_eq!(Quadrant::BottomRight.column(), "right");
        assert_eq!(Quadrant::BottomRight.row(), "bottom");
    }

    #[test]
    fn lone_quadrant_still_occupies_its_column() {
        // Right-column content must start after the left column's width even
        // when the left quadrant is empty.
        let layout = QuadrantLayout::new().top_right(Text::new("hi"));
        let lines = layout.markup_lines(20, &Theme::default());
        assert_eq!(lines.len(), 1);
        let plain_line = plain(&lines[0]);
        let column_width = (20 - settings::LAYOUT_GUTTER) / 2;
        assert!(plain_line.starts_with(&" ".repeat(column_width)));
        assert!(plain_line.trim_start().starts_with("hi"));
    }

    #[test]
    fn rows_pad_to_the_taller_column() {
        let layout = QuadrantLayout::new()
            .top_left(Text::new("one\ntwo\nthree"))
            .top_right(Text::new("a"))
            .bottom_left(Text::new("b"));
        let lines = layout.markup_lines(40, &Theme::default());
        // Top row: 3 lines, bottom row: 1 line.
        assert_eq!(lines.len(), 4);
        let column_width = (40 - settings::LAYOUT_GUTTER) / 2;
        for line in &lines[..3] {
            assert!(plain(line).chars().count() >= column_width);
        }
    }

    #[test]
    fn all_four_quadrants_render_in_place() {
        let layout = QuadrantLayout::new()
            .top_left(Text::new("TL"))
            .top_right(Text::new("TR"))
            .bottom_left(Text::new("BL"))
            .bottom_right(Text::new("BR"));
        let lines = layout.markup_lines(20, &Theme::default());
        assert_eq!(lines.len(), 2);
        let top = plain(&lines[0]);
        let bottom = plain(&lines[1]);
        assert!(top.contains("TL") && top.contains("TR"));
        assert!(bottom.contains("BL") && bottom.contains("BR"));
        assert!(top.find("TL").unwrap() < top.find("TR").unwrap());
    }
}
