use crate::common::*;
use blockgrid::core::models::BlockId;

#[test]
fn save_then_read_restores_blocks_and_ids() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    execute_command("add \"Plan\" 8:00 30 2025-03-14", &mut ctx);
    execute_command("add \"Write\" 9:00 120 2025-03-14 #work", &mut ctx);
    execute_command("save \"week\"", &mut ctx);
    assert!(dir.join("saves").join("week.json").exists());

    let mut fresh = build_context(&dir);
    execute_command("read \"week\"", &mut fresh);
    assert_eq!(fresh.store.len(), 2);
    assert_eq!(fresh.store.get(BlockId(2)).unwrap().title, "Write");

    execute_command("add \"Next\" 13:00 2025-03-14", &mut fresh);
    assert!(fresh.store.get(BlockId(3)).is_some());
}

#[test]
fn reading_a_corrupt_file_keeps_the_current_blocks() {
    let dir = make_temp_dir("corrupt");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    execute_command("add \"Keep\" 8:00 2025-03-14", &mut ctx);

    std::fs::create_dir_all(dir.join("saves")).unwrap();
    std::fs::write(dir.join("saves").join("bad.json"), "{ not json").unwrap();

    assert!(try_command("read \"bad\"", &mut ctx).is_err());
    assert_eq!(ctx.store.len(), 1);
    assert_eq!(ctx.store.get(BlockId(1)).unwrap().title, "Keep");
}

#[test]
fn save_through_the_binary_creates_the_file() {
    let dir = make_temp_dir("binsave");
    write_valid_config(&dir);
    let output = run_with_input(
        &dir,
        "add \"Deep work\" 9:30 90 2025-03-14\nsave \"monday\"\nexit\n",
    );
    assert!(output.status.success());
    assert!(dir.join("saves").join("monday.json").exists());
}
