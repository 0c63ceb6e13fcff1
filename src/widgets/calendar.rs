//! Month calendar widget with highlighted events.

use crate::console::Widget;
use crate::error::SetupError;
use crate::markup;
use crate::settings;
use crate::textutil;
use crate::theme::{Theme, ThemeToken};
use chrono::{Datelike, NaiveDate};

/// One calendar event. Description and style are both optional; which fields
/// are present decides how the event renders (see [`presentation`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub description: Option<String>,
    pub style: Option<String>,
}

impl CalendarEvent {
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            description: None,
            style: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Highlight style words (e.g. `"bold red"`).
    pub fn style(mut self, words: impl Into<String>) -> Self {
        self.style = Some(words.into());
        self
    }
}

/// Resolved rendering of one event: day-cell style words plus the optional
/// escaped legend text.
///
/// This is the single decision point for the optional-field combinations: a
/// missing style falls back to the theme's event color, a missing description
/// simply has no legend row. No per-combination constructors.
fn presentation(event: &CalendarEvent, theme: &Theme) -> (String, Option<String>) {
    let style = match event.style.as_deref() {
        Some(words) if markup::is_style_tag(words) => words.to_string(),
        _ => theme.style_words(ThemeToken::EventDay).to_string(),
    };
    let legend = event.description.as_deref().map(markup::escape);
    (style, legend)
}

/// One month, Sunday-first, with event days highlighted and described events
/// listed under the grid.
#[derive(Debug, Clone)]
pub struct Calendar {
    year: i32,
    month: u32,
    events: Vec<CalendarEvent>,
}

impl Calendar {
    /// Build a calendar for a month. Fails fast on impossible dates instead
    /// of guessing what the caller meant.
    pub fn new(year: i32, month: u32) -> Result<Self, SetupError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(SetupError::InvalidDate { year, month });
        }
        Ok(Self {
            year,
            month,
            events: Vec::new(),
        })
    }

    pub fn event(mut self, event: CalendarEvent) -> Self {
        self.events.push(event);
        self
    }

    fn event_for_day(&self, day: u32) -> Option<&CalendarEvent> {
        self.events
            .iter()
            .find(|e| e.year == self.year && e.month == self.month && e.day == day)
    }

    fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Widget for Calendar {
    fn markup_lines(&self, _width: usize, theme: &Theme) -> Vec<String> {
        // Validated in `new`; a failure here would be a construction bypass.
        let Some(first) = NaiveDate::from_ymd_opt(self.year, self.month, 1) else {
            return Vec::new();
        };
        let grid_width = textutil::visible_width(settings::WEEKDAY_HEADER);

        let title = format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year);
        let mut lines = vec![format!(
            "[bold {}]{}[/]",
            theme.style_words(ThemeToken::Accent),
            textutil::center(&title, grid_width)
        )];
        lines.push(theme.paint(ThemeToken::HeaderText, settings::WEEKDAY_HEADER));

        let lead = first.weekday().num_days_from_sunday() as usize;
        let days = self.days_in_month();
        let mut row = " ".repeat(lead * settings::CALENDAR_CELL_WIDTH);
        let mut column = lead;

        for day in 1..=days {
            let cell = textutil::pad_left(&day.to_string(), 2);
            match self.event_for_day(day) {
                Some(event) => {
                    let (style, _) = presentation(event, theme);
                    row.push_str(&format!("[bold {style}]{cell}[/]"));
                }
                None => row.push_str(&cell),
            }
            column += 1;
            if column == 7 {
                lines.push(row.trim_end().to_string());
                row = String::new();
                column = 0;
            } else {
                row.push(' ');
            }
        }
        if !row.trim_end().is_empty() {
            lines.push(row.trim_end().to_string());
        }

        for event in &self.events {
            if event.year != self.year || event.month != self.month {
                continue;
            }
            let (style, legend) = presentation(event, theme);
            if let Some(legend) = legend {
                lines.push(format!(
                    "[{style}]{}[/] {:>2} {legend}",
                    settings::GLYPH_SECTION_BULLET,
                    event.day
                ));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::plain;

    #[test]
    fn rejects_impossible_months() {
        let err = Calendar::new(2026, 13).expect_err("should fail");
        assert!(err.to_string().contains("month 13"), "err: {err}");
        assert!(Calendar::new(2026, 12).is_ok());
    }

    #[test]
    fn first_week_is_indented_to_the_weekday() {
        // August 2026 starts on a Saturday.
        let calendar = Calendar::new(2026, 8).expect("valid month");
        let lines = calendar.markup_lines(80, &Theme::default());
        let first_week = plain(&lines[2]);
        assert_eq!(first_week.trim(), "1");
        assert!(first_week.starts_with(&" ".repeat(6 * settings::CALENDAR_CELL_WIDTH)));
    }

    #[test]
    fn all_days_of_the_month_appear() {
        let calendar = Calendar::new(2026, 2).expect("valid month");
        let lines = calendar.markup_lines(80, &Theme::default());
        let body: String = lines[2..].iter().map(|l| plain(l)).collect::<Vec<_>>().join(" ");
        // February 2026 has 28 days.
        assert!(body.split_whitespace().any(|w| w == "28"));
        assert!(!body.split_whitespace().any(|w| w == "29"));
    }

    #[test]
    fn title_names_month_and_year() {
        let calendar = Calendar::new(2026, 8).expect("valid month");
        let lines = calendar.markup_lines(80, &Theme::default());
        assert!(plain(&lines[0]).contains("August 2026"));
    }

    #[test]
    fn presentation_resolves_optional_fields() {
        let theme = Theme::default();

        let bare = CalendarEvent::on(2026, 8, 7);
        let (style, legend) = presentation(&bare, &theme);
        assert_eq!(style, theme.style_words(ThemeToken::EventDay));
        assert!(legend.is_none());

        let styled = CalendarEvent::on(2026, 8, 7).style("bold red");
        assert_eq!(presentation(&styled, &theme).0, "bold red");

        let described = CalendarEvent::on(2026, 8, 7).description("ship [v1]");
        let (_, legend) = presentation(&described, &theme);
        assert_eq!(legend.as_deref(), Some("ship [[v1]]"));

        let bad_style = CalendarEvent::on(2026, 8, 7).style("glitter");
        assert_eq!(
            presentation(&bad_style, &theme).0,
            theme.style_words(ThemeToken::EventDay)
        );
    }

    #[test]
    fn described_events_get_legend_rows() {
        let calendar = Calendar::new(2026, 8)
            .expect("valid month")
            .event(CalendarEvent::on(2026, 8, 7).description("release"))
            .event(CalendarEvent::on(2026, 8, 12));
        let lines = calendar.markup_lines(80, &Theme::default());
        let legends: Vec<String> = lines
            .iter()
            .map(|l| plain(l))
            .filter(|l| l.contains('•'))
            .collect();
        assert_eq!(legends.len(), 1);
        assert!(legends[0].contains("release"));
    }

    #[test]
    fn events_outside_the_month_are_ignored() {
        let calendar = Calendar::new(2026, 8)
            .expect("valid month")
            .event(CalendarEvent::on(2026, 9, 1).description("next month"));
        let lines = calendar.markup_lines(80, &Theme::default());
        assert!(!lines.iter().any(|l| l.contains("next month")));
    }
}
