//! Horizontal bar and breakdown chart widgets.

use crate::console::{Justify, Widget};
use crate::markup;
use crate::settings;
use crate::textutil;
use crate::theme::Theme;

const DEFAULT_BAR_COLOR: &str = "grey";

#[derive(Debug, Clone)]
struct BarItem {
    label: String,
    value: f64,
    color: Option<String>,
}

/// Labeled horizontal bars scaled against the largest value.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    title: Option<String>,
    items: Vec<BarItem>,
    bar_width: Option<usize>,
    label_align: Justify,
}

impl BarChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Width of the bar area in cells (labels and values are extra).
    pub fn bar_width(mut self, width: usize) -> Self {
        self.bar_width = Some(width.max(1));
        self
    }

    pub fn label_align(mut self, align: Justify) -> Self {
        self.label_align = align;
        self
    }

    /// Add one bar. Negative values clamp to zero; an invalid color word
    /// falls back to the default bar color.
    pub fn item(mut self, label: impl Into<String>, value: f64, color: Option<&str>) -> Self {
        self.items.push(BarItem {
            label: label.into(),
            value: value.max(0.0),
            color: color.map(str::to_string),
        });
        self
    }
}

impl Widget for BarChart {
    fn markup_lines(&self, _width: usize, _theme: &Theme) -> Vec<String> {
        if self.items.is_empty() {
            return Vec::new();
        }
        let bar_area = self.bar_width.unwrap_or(settings::DEFAULT_CHART_WIDTH);
        let label_width = self
            .items
            .iter()
            .map(|item| textutil::visible_width(&item.label))
            .max()
            .unwrap_or(0);
        let max_value = self
            .items
            .iter()
            .map(|item| item.value)
            .fold(0.0_f64, f64::max);

        let mut lines = Vec::new();
        if let Some(title) = self.title.as_deref() {
            let escaped = markup::escape(title);
            let chart_width = label_width + 1 + bar_area;
            let pad = chart_width.saturating_sub(textutil::visible_width(title)) / 2;
            lines.push(format!("{}[bold]{escaped}[/]", " ".repeat(pad)));
        }

        for item in &self.items {
            let filled = if max_value > 0.0 {
                ((item.value / max_value) * bar_area as f64).round() as usize
            } else {
                0
            };
            let filled = filled.min(bar_area);
            let bar: String = std::iter::repeat(settings::BAR_FILL).take(filled).collect();
            let color = bar_color(item.color.as_deref());
            let label = align_label(&item.label, label_width, self.label_align);
            lines.push(format!(
                "{label} [{color}]{bar}[/] {}",
                format_value(item.value)
            ));
        }
        lines
    }
}

/// Single proportional bar plus a legend with percentages.
#[derive(Debug, Clone, Default)]
pub struct BreakdownChart {
    title: Option<String>,
    items: Vec<BarItem>,
    bar_width: Option<usize>,
}

impl BreakdownChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn bar_width(mut self, width: usize) -> Self {
        self.bar_width = Some(width.max(1));
        self
    }

    pub fn item(mut self, label: impl Into<String>, value: f64, color: &str) -> Self {
        self.items.push(BarItem {
            label: label.into(),
            value: value.max(0.0),
            color: Some(color.to_string()),
        });
        self
    }
}

impl Widget for BreakdownChart {
    fn markup_lines(&self, _width: usize, _theme: &Theme) -> Vec<String> {
        if self.items.is_empty() {
            return Vec::new();
        }
        let bar_area = self.bar_width.unwrap_or(settings::BREAKDOWN_BAR_WIDTH);
        let total: f64 = self.items.iter().map(|item| item.value).sum();

        let mut lines = Vec::new();
        if let Some(title) = self.title.as_deref() {
            let pad = bar_area.saturating_sub(textutil::visible_width(title)) / 2;
            lines.push(format!(
                "{}[bold]{}[/]",
                " ".repeat(pad),
                markup::escape(title)
            ));
        }

        // Proportional slices; the last slice absorbs rounding drift so the
        // bar always spans exactly the configured width.
        let mut bar = String::new();
        let mut used = 0usize;
        for (index, item) in self.items.iter().enumerate() {
            let cells = if total <= 0.0 {
                0
            } else if index + 1 == self.items.len() {
                bar_area - used
            } else {
                (((item.value / total) * bar_area as f64).round() as usize)
                    .min(bar_area - used)
            };
            used += cells;
            let slice: String = std::iter::repeat(settings::BAR_FILL).take(cells).collect();
            if !slice.is_empty() {
                bar.push_str(&format!("[{}]{slice}[/]", bar_color(item.color.as_deref())));
            }
        }
        lines.push(bar);

        for item in &self.items {
            let percent = if total > 0.0 {
                item.value / total * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "[{}]{}[/] {} {} ({percent:.1}%)",
                bar_color(item.color.as_deref()),
                settings::BREAKDOWN_LEGEND_BLOCK,
                markup::escape(&item.label),
                format_value(item.value)
            ));
        }
        lines
    }
}

fn bar_color(words: Option<&str>) -> &str {
    match words {
        Some(words) if markup::is_style_tag(words) => words,
        _ => DEFAULT_BAR_COLOR,
    }
}

fn align_label(label: &str, width: usize, align: Justify) -> String {
    let escaped = markup::escape(label);
    // Padding math runs on the raw label; the escaped text renders at the
    // same visible width.
    match align {
        Justify::Left => {
            let pad = width.saturating_sub(textutil::visible_width(label));
            format!("{escaped}{}", " ".repeat(pad))
        }
        Justify::Right => {
            let pad = width.saturating_sub(textutil::visible_width(label));
            format!("{}{escaped}", " ".repeat(pad))
        }
        Justify::Center => {
            let pad = width.saturating_sub(textutil::visible_width(label));
            let left = pad / 2;
            format!("{}{escaped}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}

fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}
