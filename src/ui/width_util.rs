use terminal_size::{Width, terminal_size};

use crate::ui::ascii::ESC;
type CharIter<'a> = std::iter::Peekable<std::str::Chars<'a>>;

#[derive(Debug, Default, Clone)]
pub struct WidthUtil;

impl WidthUtil {
    fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if Self::is_escape(c) && Self::is_csi_start(chars.peek()) {
                Self::consume_csi(&mut chars);
                continue;
            }
            out.push(c);
        }
        out
    }

    fn is_escape(c: char) -> bool {
        c == ESC
    }

    fn is_csi_start(next: Option<&char>) -> bool {
        matches!(next, Some('['))
    }

    fn consume_csi(chars: &mut CharIter<'_>) {
        let _ = chars.next(); // skip '['
        for c in chars.by_ref() {
            if c.is_ascii_alphabetic() {
                break;
            }
        }
    }

    pub fn visible_width(&self, s: &str) -> usize {
        Self::strip_ansi(s).chars().count()
    }

    #[cfg(test)]
    pub(crate) fn strip_ansi_for_test(s: &str) -> String {
        Self::strip_ansi(s)
    }

    pub fn pad_visible(&self, s: &str, width: usize) -> String {
        let w = self.visible_width(s);
        if w >= width {
            s.to_string()
        } else {
            let mut out = String::with_capacity(s.len() + (width - w));
            out.push_str(s);
            out.push_str(&" ".repeat(width - w));
            out
        }
    }

    /// Cut plain text to `max` visible chars, ending in `…` when shortened.
    pub fn truncate(&self, s: &str, max: usize) -> String {
        if s.chars().count() <= max {
            return s.to_string();
        }
        if max == 0 {
            return String::new();
        }
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }

    /// Best-effort terminal width (defaults to 80).
    pub fn terminal_width(&self) -> usize {
        if let Some((Width(w), _)) = terminal_size() {
            w as usize
        } else {
            80
        }
    }

    /// Left padding to center a box of `content_width` inside the terminal.
    pub fn center_pad(&self, content_width: usize) -> usize {
        let tw = self.terminal_width();
        tw.saturating_sub(content_width) / 2
    }
}
