use super::{refs, sample_store};
use crate::core::types::ViewKind;
use crate::ui::chrome::UiChrome;
use crate::ui::width_util::WidthUtil;

#[test]
fn banner_is_a_closed_box() {
    let mut buf = Vec::new();
    UiChrome::new().render_banner(&mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with('╭'));
    assert!(lines[5].starts_with('╰'));
    assert!(out.contains("B L O C K G R I D"));
    let util = WidthUtil::default();
    for line in &lines {
        assert_eq!(util.visible_width(line), 52);
    }
}

#[test]
fn status_line_names_view_and_selection() {
    let chrome = UiChrome::new();
    let store = sample_store();
    let blocks = refs(&store);

    let line = chrome.format_status_line(ViewKind::Week, "Mar 9 - Mar 15, 2025", "09:41", None);
    assert_eq!(line, "[week] Mar 9 - Mar 15, 2025 | now 09:41 | nothing selected");

    let line = chrome.format_status_line(ViewKind::Day, "Friday", "10:00", Some(blocks[0]));
    assert!(line.ends_with("| selected #1 Standup"));
}
