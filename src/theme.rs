//! Semantic terminal theme system.
//!
//! All toolkit colors resolve through a [`Theme`] so widgets and prompts stay
//! consistent and user configs can restyle the whole surface at once. Theme
//! values are markup style words (`"cyan"`, `"bold yellow"`), resolved by the
//! markup parser at render time.
//!
//! Configuration precedence follows the usual file lookup: an explicit
//! `--config` path must exist and parse; otherwise
//! `~/.config/termkit/termkit.toml` is used when present; otherwise built-in
//! defaults apply.

use crate::error::SetupError;
use crate::markup;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Semantic color token used by toolkit rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeToken {
    /// Titles, prompt labels, banner text.
    Accent,
    Ok,
    Info,
    Warning,
    Error,
    Note,
    /// Panel/table/banner borders.
    Border,
    /// Table header cells and calendar weekday row.
    HeaderText,
    RuleLine,
    TreeGuide,
    /// Selection marker glyph in list prompts.
    Marker,
    /// Highlighted (selected) list item text.
    Highlight,
    /// Help lines, unselected items, secondary chrome.
    Muted,
    ProgressFrame,
    ProgressDone,
    ProgressRest,
    /// Default highlight for calendar event days.
    EventDay,
}

impl ThemeToken {
    /// Stable config key for this token (used by `[themes.<name>]` overrides).
    pub fn key(self) -> &'static str {
        match self {
            Self::Accent => "accent",
            Self::Ok => "ok",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Note => "note",
            Self::Border => "border",
            Self::HeaderText => "header_text",
            Self::RuleLine => "rule_line",
            Self::TreeGuide => "tree_guide",
            Self::Marker => "marker",
            Self::Highlight => "highlight",
            Self::Muted => "muted",
            Self::ProgressFrame => "progress_frame",
            Self::ProgressDone => "progress_done",
            Self::ProgressRest => "progress_rest",
            Self::EventDay => "event_day",
        }
    }

    fn all() -> &'static [ThemeToken] {
        &[
            Self::Accent,
            Self::Ok,
            Self::Info,
            Self::Warning,
            Self::Error,
            Self::Note,
            Self::Border,
            Self::HeaderText,
            Self::RuleLine,
            Self::TreeGuide,
            Self::Marker,
            Self::Highlight,
            Self::Muted,
            Self::ProgressFrame,
            Self::ProgressDone,
            Self::ProgressRest,
            Self::EventDay,
        ]
    }
}

/// Named theme resolved by token.
#[derive(Debug, Clone)]
pub struct Theme {
    /// User-facing theme name (`dark`, `light`, or custom key).
    pub name: String,
    colors: BTreeMap<ThemeToken, String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Built-in dark (default) theme.
    pub fn dark() -> Self {
        let entries = [
            (ThemeToken::Accent, "cyan"),
            (ThemeToken::Ok, "green"),
            (ThemeToken::Info, "cyan"),
            (ThemeToken::Warning, "yellow"),
            (ThemeToken::Error, "red"),
            (ThemeToken::Note, "grey"),
            (ThemeToken::Border, "dark_grey"),
            (ThemeToken::HeaderText, "yellow"),
            (ThemeToken::RuleLine, "dark_grey"),
            (ThemeToken::TreeGuide, "dark_grey"),
            (ThemeToken::Marker, "dark_yellow"),
            (ThemeToken::Highlight, "yellow"),
            (ThemeToken::Muted, "dark_grey"),
            (ThemeToken::ProgressFrame, "cyan"),
            (ThemeToken::ProgressDone, "cyan"),
            (ThemeToken::ProgressRest, "dark_grey"),
            (ThemeToken::EventDay, "cyan"),
        ];
        Self::from_entries("dark", &entries)
    }

    /// Built-in light theme with darker foregrounds.
    pub fn light() -> Self {
        let entries = [
            (ThemeToken::Accent, "dark_cyan"),
            (ThemeToken::Ok, "dark_green"),
            (ThemeToken::Info, "dark_cyan"),
            (ThemeToken::Warning, "dark_yellow"),
            (ThemeToken::Error, "dark_red"),
            (ThemeToken::Note, "dark_grey"),
            (ThemeToken::Border, "grey"),
            (ThemeToken::HeaderText, "dark_yellow"),
            (ThemeToken::RuleLine, "grey"),
            (ThemeToken::TreeGuide, "grey"),
            (ThemeToken::Marker, "dark_yellow"),
            (ThemeToken::Highlight, "dark_blue"),
            (ThemeToken::Muted, "grey"),
            (ThemeToken::ProgressFrame, "dark_cyan"),
            (ThemeToken::ProgressDone, "dark_cyan"),
            (ThemeToken::ProgressRest, "grey"),
            (ThemeToken::EventDay, "dark_cyan"),
        ];
        Self::from_entries("light", &entries)
    }

    fn from_entries(name: &str, entries: &[(ThemeToken, &str)]) -> Self {
        let colors = entries
            .iter()
            .map(|(token, value)| (*token, (*value).to_string()))
            .collect();
        Self {
            name: name.to_string(),
            colors,
        }
    }

    /// Look up a built-in theme by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Markup style words for a token.
    pub fn style_words(&self, token: ThemeToken) -> &str {
        self.colors
            .get(&token)
            .map(String::as_str)
            .unwrap_or("white")
    }

    /// Opening markup tag for a token.
    pub fn tag(&self, token: ThemeToken) -> String {
        format!("[{}]", self.style_words(token))
    }

    /// Wrap already markup-safe text in this token's style span.
    pub fn paint(&self, token: ThemeToken, text: &str) -> String {
        format!("[{}]{}[/]", self.style_words(token), text)
    }

    /// Override one token. The value must be valid markup style words.
    pub fn set(&mut self, token: ThemeToken, value: &str) -> Result<(), SetupError> {
        if !markup::is_style_tag(value) {
            return Err(SetupError::InvalidColor {
                token: token.key().to_string(),
                value: value.to_string(),
            });
        }
        self.colors.insert(token, value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// Resolved display configuration for the toolkit.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    pub theme: Theme,
    pub color: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            theme: Theme::dark(),
            color: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    display: DisplaySection,
    #[serde(default)]
    themes: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
struct DisplaySection {
    theme: Option<String>,
    color: Option<bool>,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("termkit").join("termkit.toml"))
}

/// Load display config from a TOML file and resolve the active theme.
///
/// `theme_override` (typically a CLI flag) wins over the file's
/// `display.theme`. An explicit `path` must exist; the default path is
/// optional.
pub fn load_theme_config(
    path: Option<&Path>,
    theme_override: Option<&str>,
) -> Result<ThemeConfig, SetupError> {
    let file = match path {
        Some(explicit) => parse_config_file(explicit)?,
        None => match default_config_path() {
            Some(default) if default.is_file() => parse_config_file(&default)?,
            _ => ConfigFile::default(),
        },
    };

    let color = file.display.color.unwrap_or(true);
    let requested = theme_override
        .or(file.display.theme.as_deref())
        .unwrap_or("dark");
    let theme = resolve_theme(requested, &file.themes)?;
    tracing::debug!(theme = %theme.name, color, "display config resolved");
    Ok(ThemeConfig { theme, color })
}

fn parse_config_file(path: &Path) -> Result<ConfigFile, SetupError> {
    let raw = fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Resolve a theme name against built-ins plus `[themes.<name>]` overrides.
///
/// A custom section may name a `base` built-in to start from; without one it
/// starts from `dark`. Override keys that are not theme tokens are ignored
/// with a warning so configs stay forward compatible.
fn resolve_theme(
    name: &str,
    overrides: &BTreeMap<String, BTreeMap<String, String>>,
) -> Result<Theme, SetupError> {
    let section = overrides.get(name);
    let mut theme = match Theme::builtin(name) {
        Some(theme) => theme,
        None => {
            let Some(section) = section else {
                return Err(SetupError::UnknownTheme(name.to_string()));
            };
            let base = section.get("base").map(String::as_str).unwrap_or("dark");
            let mut theme =
                Theme::builtin(base).ok_or_else(|| SetupError::UnknownTheme(base.to_string()))?;
            theme.name = name.to_string();
            theme
        }
    };

    if let Some(section) = section {
        for (key, value) in section {
            if key == "base" {
                continue;
            }
            let Some(token) = token_by_key(key) else {
                tracing::warn!(key = %key, theme = %name, "ignoring unknown theme token");
                continue;
            };
            theme.set(token, value)?;
        }
    }

    Ok(theme)
}

fn token_by_key(key: &str) -> Option<ThemeToken> {
    ThemeToken::all()
        .iter()
        .copied()
        .find(|token| token.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_has_a_color_in_both_builtins() {
        for theme in [Theme::dark(), Theme::light()] {
            for token in ThemeToken::all() {
                assert!(
                    markup::is_style_tag(theme.style_words(*token)),
                    "{}: {:?}",
                    theme.name,
                    token
                );
            }
        }
    }

    #[test]
    fn paint_produces_parseable_markup() {
        let theme = Theme::dark();
        let painted = theme.paint(ThemeToken::Error, "boom");
        assert_eq!(markup::plain(&painted), "boom");
    }

    #[test]
    fn set_rejects_unknown_color_words() {
        let mut theme = Theme::dark();
        let err = theme
            .set(ThemeToken::Accent, "sparkly")
            .expect_err("should fail");
        assert!(err.to_string().contains("sparkly"), "err: {err}");
    }

    #[test]
    fn resolve_theme_applies_overrides_on_builtin() {
        let mut section = BTreeMap::new();
        section.insert("accent".to_string(), "magenta".to_string());
        let mut overrides = BTreeMap::new();
        overrides.insert("dark".to_string(), section);

        let theme = resolve_theme("dark", &overrides).expect("resolves");
        assert_eq!(theme.style_words(ThemeToken::Accent), "magenta");
        assert_eq!(theme.style_words(ThemeToken::Error), "red");
    }

    #[test]
    fn resolve_theme_supports_custom_names_with_base() {
        let mut section = BTreeMap::new();
        section.insert("base".to_string(), "light".to_string());
        section.insert("highlight".to_string(), "magenta".to_string());
        let mut overrides = BTreeMap::new();
        overrides.insert("paper".to_string(), section);

        let theme = resolve_theme("paper", &overrides).expect("resolves");
        assert_eq!(theme.name, "paper");
        assert_eq!(theme.style_words(ThemeToken::Highlight), "magenta");
        assert_eq!(theme.style_words(ThemeToken::Accent), "dark_cyan");
    }

    #[test]
    fn resolve_theme_rejects_unknown_names() {
        let overrides = BTreeMap::new();
        let err = resolve_theme("nope", &overrides).expect_err("should fail");
        assert!(err.to_string().contains("nope"));
    }
}
