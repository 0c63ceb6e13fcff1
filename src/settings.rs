//! Centralized, hardcoded UI settings for the toolkit.
//!
//! This is the single place to tweak glyphs, prompt strings, messages,
//! spinner behavior, and layout fallbacks.

// ---------------------------------------------------------------------------
// Layout / width
// ---------------------------------------------------------------------------

pub const FALLBACK_COLUMNS: usize = 100;
pub const LAYOUT_GUTTER: usize = 2;
pub const COLUMNS_ITEM_GAP: usize = 2;
pub const DEFAULT_CHART_WIDTH: usize = 40;
pub const BREAKDOWN_BAR_WIDTH: usize = 40;
pub const INDENT_1: &str = "  ";

// ---------------------------------------------------------------------------
// Glyphs
// ---------------------------------------------------------------------------

pub const GLYPH_SECTION_BULLET: &str = "•";
pub const GLYPH_MARKER_SELECTED: &str = "▶";
pub const GLYPH_MARKER_UNSELECTED: &str = "·";
pub const GLYPH_MARKER_SELECTED_PLAIN: &str = ">";
pub const GLYPH_CHECKED: &str = "[[x]]";
pub const GLYPH_UNCHECKED: &str = "[[ ]]";

pub const TREE_BRANCH: &str = "├── ";
pub const TREE_BRANCH_LAST: &str = "└── ";
pub const TREE_GUIDE: &str = "│   ";
pub const TREE_GUIDE_BLANK: &str = "    ";

// Rounded box drawing set shared by panels and tables.
pub const BOX_TOP_LEFT: char = '╭';
pub const BOX_TOP_RIGHT: char = '╮';
pub const BOX_BOTTOM_LEFT: char = '╰';
pub const BOX_BOTTOM_RIGHT: char = '╯';
pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';
pub const BOX_TEE_DOWN: char = '┬';
pub const BOX_TEE_UP: char = '┴';
pub const BOX_CROSS: char = '┼';
pub const BOX_TEE_RIGHT: char = '├';
pub const BOX_TEE_LEFT: char = '┤';

pub const BANNER_HORIZONTAL: char = '═';
pub const RULE_CHAR: char = '─';

pub const BAR_FILL: char = '█';
pub const BAR_EMPTY: char = '░';
pub const BREAKDOWN_LEGEND_BLOCK: &str = "■";

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

pub const PROMPT_QUESTION_GLYPH: &str = "?";
pub const PROMPT_ANSWER_SEPARATOR: &str = "› ";
pub const PROMPT_FALLBACK_PICK: &str = "pick (number): ";
pub const PROMPT_FALLBACK_TOGGLE: &str = "toggle (numbers, empty line to submit): ";
pub const SELECT_HELP: &str = "↑/↓ move, type to filter, Enter to confirm, Esc to cancel";
pub const MULTI_SELECT_HELP: &str = "↑/↓ move, Space to toggle, Enter to accept, Esc to cancel";
pub const DEFAULT_SECRET_MASK: char = '*';

pub const MSG_INVALID_INPUT: &str = "invalid input";
pub const MSG_CONFIRM_RETRY: &str = "reply with y/yes or n/no";
pub const MSG_NOT_INTERACTIVE: &str =
    "interactive mode requires a terminal. Use specific commands instead.";

/// Cardinality violation text for a minimum bound.
pub fn msg_select_at_least(min: usize) -> String {
    format!("select at least {min} item(s)")
}

/// Cardinality violation text for a maximum bound.
pub fn msg_select_at_most(max: usize) -> String {
    format!("select at most {max} item(s)")
}

// ---------------------------------------------------------------------------
// Spinner / progress / live
// ---------------------------------------------------------------------------

pub const PROGRESS_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
pub const PROGRESS_TICK_MS: u64 = 100;
pub const PROGRESS_BAR_WIDTH: usize = 24;
pub const EVENT_POLL_MS: u64 = 80;

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

pub const WEEKDAY_HEADER: &str = "Su Mo Tu We Th Fr Sa";
pub const CALENDAR_CELL_WIDTH: usize = 3;
