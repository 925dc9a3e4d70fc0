use chrono::NaiveDate;

use crate::common::*;
use blockgrid::core::models::BlockId;

fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn move_snaps_to_the_half_hour_on_the_dropped_column() {
    let dir = make_temp_dir("move");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    execute_command("add \"Focus\" 9:00 60 2025-03-14", &mut ctx);
    execute_command("move 1 15 50 2025-03-14", &mut ctx);
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.start_time, at(15, 30));
    assert_eq!(block.end_time, at(16, 30));
    assert!(ctx.pointer.is_idle());
}

#[test]
fn resize_start_edge_moves_only_the_start() {
    let dir = make_temp_dir("resize");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    execute_command("add \"Focus\" 9:00 60 2025-03-14", &mut ctx);
    execute_command("resize 1 start -40", &mut ctx);
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.start_time, at(8, 30));
    assert_eq!(block.end_time, at(10, 0));
}

#[test]
fn place_then_sync_writes_one_outbox_event() {
    let dir = make_temp_dir("placesync");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    execute_command("place 10 0 2025-03-14", &mut ctx);
    assert_eq!(ctx.store.selected_id(), Some(BlockId(1)));
    assert_eq!(ctx.store.get(BlockId(1)).unwrap().start_time, at(10, 0));

    execute_command("sync 1", &mut ctx);
    let outbox =
        std::fs::read_to_string(dir.join("outbox").join("calendar.jsonl")).unwrap();
    assert_eq!(outbox.lines().count(), 1);
}
