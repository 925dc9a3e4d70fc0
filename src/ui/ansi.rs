// ANSI/VT100 control sequences shared by the shell and the grid renderer.

/// Clear the entire screen.
pub const CLEAR_SCREEN: &str = crate::csi!("2J");
/// Move the cursor to the top-left corner.
pub const CURSOR_HOME: &str = crate::csi!("H");
/// Clear from cursor to end of line.
pub const CLEAR_LINE_REST: &str = crate::csi!("0K");
/// Move the cursor up one line.
pub const CURSOR_UP_ONE: &str = crate::csi!("1A");

/// Reset terminal styling to defaults.
pub const STYLE_RESET: &str = crate::csi!("0m");
pub const STYLE_BOLD: &str = crate::csi!("1m");
pub const STYLE_ITALIC: &str = crate::csi!("3m");
/// Swapped foreground/background; marks the selected block.
pub const STYLE_REVERSE: &str = crate::csi!("7m");
/// Light gray foreground.
pub const FG_LIGHT_GRAY: &str = crate::csi!("37m");
/// Red foreground for the current-time line.
pub const FG_RED: &str = crate::csi!("31m");
/// Dark gray background with white text for input prompts.
pub const PROMPT_STYLE: &str = crate::csi2!("38;5;15m", "48;5;236m");
