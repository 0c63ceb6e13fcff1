//! termkit — declarative terminal widgets and validated interactive input.
//!
//! Callers describe *what* to show (trees, tables, grids, charts, panels,
//! calendars, 2×2 layouts) or *what* to ask (selections, text, secrets,
//! confirmations); the toolkit uniformly handles markup escaping, widget
//! composition, validation/retry loops, and scoped live rendering.
//!
//! # Quick start
//!
//! ```no_run
//! use termkit::console::Console;
//! use termkit::prompts::Select;
//! use termkit::tree::{build_tree, PathEntry};
//! use termkit::widgets::Table;
//!
//! # fn example() -> Result<(), termkit::error::UiError> {
//! let console = Console::new(true);
//!
//! let tree = build_tree(
//!     "project",
//!     &[PathEntry::new("src/lib.rs"), PathEntry::decorated("src/main.rs", "★")],
//! );
//! console.draw(&tree);
//!
//! console.draw(&Table::new().headers(["name", "state"]).row(["worker", "idle"]));
//!
//! let index = Select::new("pick a target").items(["debug", "release"]).ask(&console)?;
//! console.ok(&format!("selected #{index}"));
//! # Ok(())
//! # }
//! ```

pub mod build_info;
pub mod console;
pub mod error;
pub mod layout;
pub mod live;
pub mod markup;
pub mod prompts;
pub mod settings;
pub mod textutil;
pub mod theme;
pub mod tree;
pub mod widgets;
