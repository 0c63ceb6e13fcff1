//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// Terminal widget and prompt showcase for the termkit library.
#[derive(Debug, Parser)]
#[command(name = "termkit", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: ~/.config/termkit/termkit.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Theme name (built-in `dark`/`light` or a `[themes.<name>]` entry).
    #[arg(long = "theme")]
    pub theme: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Render a path tree with decorations.
    Tree,
    /// Render a bordered table and a grid.
    Table,
    /// Render bar and breakdown charts.
    Charts,
    /// Render a 2x2 quadrant layout.
    Layout,
    /// Render a month calendar with events.
    Calendar,
    /// Walk through every interactive prompt kind.
    Prompts,
    /// Run tasks under a progress UI.
    Progress,
    /// Run a live-updating frame.
    Live,
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;

    #[test]
    fn no_subcommand_runs_the_full_showcase() {
        let args = Args::parse_from(["termkit"]);
        assert!(args.command.is_none());
        assert!(!args.no_color);
    }

    #[test]
    fn theme_and_color_flags_parse() {
        let args = Args::parse_from(["termkit", "--theme", "light", "--no-color", "tree"]);
        assert_eq!(args.theme.as_deref(), Some("light"));
        assert!(args.no_color);
        assert_eq!(args.command, Some(Command::Tree));
    }

    #[test]
    fn config_flag_accepts_a_path() {
        let args = Args::parse_from(["termkit", "-c", "custom.toml", "prompts"]);
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        assert_eq!(args.command, Some(Command::Prompts));
    }
}
