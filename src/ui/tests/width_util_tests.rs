use crate::core::types::BlockColor;
use crate::ui::width_util::WidthUtil;

#[test]
fn visible_width_ignores_ansi_sequences() {
    let util = WidthUtil::default();
    let s = BlockColor::Tomato.paint("Red");
    assert_eq!(util.visible_width(&s), 3);
}

#[test]
fn strip_ansi_keeps_multibyte_text() {
    let s = BlockColor::Peacock.paint("Café ██");
    assert_eq!(WidthUtil::strip_ansi_for_test(&s), "Café ██");
    assert_eq!(WidthUtil::default().visible_width(&s), 7);
}

#[test]
fn pad_visible_pads_painted_cells_to_visible_width() {
    let util = WidthUtil::default();
    assert_eq!(util.pad_visible("abc", 5), "abc  ");
    let painted = BlockColor::Sage.paint("ab");
    let padded = util.pad_visible(&painted, 4);
    assert_eq!(util.visible_width(&padded), 4);
    assert!(padded.ends_with("  "));
}

#[test]
fn truncate_marks_cut_text() {
    let util = WidthUtil::default();
    assert_eq!(util.truncate("Standup", 10), "Standup");
    assert_eq!(util.truncate("Quarterly planning", 8), "Quarter…");
    assert_eq!(util.truncate("abc", 0), "");
}

#[test]
fn center_pad_uses_terminal_width() {
    let util = WidthUtil::default();
    assert!(util.center_pad(10) <= util.terminal_width());
}
