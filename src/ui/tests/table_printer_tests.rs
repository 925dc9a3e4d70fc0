use crate::core::types::BlockColor;
use crate::ui::table_printer::TablePrinter;

#[test]
fn renders_banner_header_and_rows() {
    let printer = TablePrinter::new();
    let headers = ["ID", "TITLE"];
    let rows = vec![
        vec!["1".to_string(), "Standup".to_string()],
        vec!["12".to_string(), "Review".to_string()],
    ];
    let mut buf = Vec::new();
    printer
        .render_table("Blocks", &headers, &rows, None, None, &mut buf)
        .unwrap();
    let expected = "\
------------
BLOCKS
------------
ID | TITLE
------------
1  | Standup
12 | Review
------------
";
    assert_eq!(String::from_utf8(buf).unwrap(), expected);
}

#[test]
fn empty_table_prints_message_instead_of_header() {
    let printer = TablePrinter::new();
    let rows: Vec<Vec<String>> = Vec::new();
    let mut buf = Vec::new();
    printer
        .render_table("Blocks", &["ID"], &rows, Some("Nothing here."), None, &mut buf)
        .unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "-------------\nBLOCKS\n-------------\nNothing here.\n-------------\n"
    );
}

#[test]
fn computes_width_from_visible_chars() {
    let printer = TablePrinter::new();
    let rows = vec![vec![BlockColor::Basil.paint("Alice"), "1".to_string()]];
    // 5 + 3 + 2
    assert_eq!(printer.compute_table_width(&["NAME", "ID"], &rows), 10);
}

#[test]
fn min_width_stretches_rules() {
    let printer = TablePrinter::new();
    let mut buf = Vec::new();
    printer.render_banner("abc", 5, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "-----\nABC\n-----\n");
}
