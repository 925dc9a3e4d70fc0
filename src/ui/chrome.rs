use crate::core::models::TimeBlock;
use crate::core::types::ViewKind;
use crate::ui::ansi::{
    CLEAR_LINE_REST, CURSOR_UP_ONE, FG_LIGHT_GRAY, PROMPT_STYLE, STYLE_BOLD, STYLE_ITALIC,
    STYLE_RESET,
};
use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const BANNER_INNER_WIDTH: usize = 50;

/// Screen-level helpers (banner, status line, prompt).
#[derive(Debug, Default, Clone)]
pub struct UiChrome {
    util: WidthUtil,
}

impl UiChrome {
    pub fn new() -> Self {
        Self {
            util: WidthUtil::default(),
        }
    }

    pub fn render_banner<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let version = env!("CARGO_PKG_VERSION");
        let title = format!(
            "{STYLE_BOLD}B L O C K G R I D{STYLE_RESET} {FG_LIGHT_GRAY}(v{version}){STYLE_RESET}"
        );
        let subtitle = format!("{STYLE_ITALIC}Your day, one block at a time{STYLE_RESET}");
        writeln!(out, "╭{}╮", "─".repeat(BANNER_INNER_WIDTH))?;
        writeln!(out, "│{}│", " ".repeat(BANNER_INNER_WIDTH))?;
        writeln!(out, "│{}│", self.center_in_box(&title, BANNER_INNER_WIDTH))?;
        writeln!(out, "│{}│", self.center_in_box(&subtitle, BANNER_INNER_WIDTH))?;
        writeln!(out, "│{}│", " ".repeat(BANNER_INNER_WIDTH))?;
        writeln!(out, "╰{}╯", "─".repeat(BANNER_INNER_WIDTH))
    }

    pub fn print_banner(&self) {
        let _ = self.render_banner(&mut io::stdout());
    }

    /// Where the session stands: view, focus label, clock and selection.
    pub fn format_status_line(
        &self,
        view: ViewKind,
        label: &str,
        now_label: &str,
        selected: Option<&TimeBlock>,
    ) -> String {
        let selection = match selected {
            Some(b) => format!("selected #{} {}", b.id, self.util.truncate(&b.title, 24)),
            None => "nothing selected".to_string(),
        };
        format!("[{view}] {label} | now {now_label} | {selection}")
    }

    pub fn print_prompt(&self, prompt: &str) {
        self.print_prompt_line(prompt);
    }

    fn print_prompt_line(&self, line: &str) {
        self.print_prompt_padding_line();
        print!("{PROMPT_STYLE}{line}{CLEAR_LINE_REST}{STYLE_RESET}\n");
        print!("{PROMPT_STYLE}{CLEAR_LINE_REST}{STYLE_RESET}");
        let column = self.util.visible_width(line) + 1;
        print!("{CURSOR_UP_ONE}\x1B[{column}G{PROMPT_STYLE}");
        let _ = io::stdout().flush();
    }

    /// Finish the prompt band once a line has been entered.
    pub fn close_prompt(&self) {
        self.print_prompt_padding_line();
        println!("{STYLE_RESET}");
        let _ = io::stdout().flush();
    }

    fn print_prompt_padding_line(&self) {
        print!("{PROMPT_STYLE}{CLEAR_LINE_REST}{STYLE_RESET}\n");
    }

    fn center_in_box(&self, content: &str, width: usize) -> String {
        let content_width = self.util.visible_width(content);
        if content_width >= width {
            return content.to_string();
        }
        let left = (width - content_width) / 2;
        let right = width - content_width - left;
        format!("{}{}{}", " ".repeat(left), content, " ".repeat(right))
    }
}
