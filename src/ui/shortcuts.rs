//! Keyboard shortcut constants for consistent documentation.

pub const FOCUS_QUERY: &str = "/";
pub const SUBMIT: &str = "Enter";
pub const NAV_DOWN: &str = "j/Down";
pub const NAV_UP: &str = "k/Up";
pub const OPEN: &str = "l/Enter";
pub const DIRECT_SELECT: &str = "1-9";
pub const HISTORY_CYCLE: &str = "Ctrl+R";
pub const HELP: &str = "F1/?";
pub const QUIT: &str = "q/Esc";
