use crate::common::*;
use blockgrid::core::models::BlockId;
use blockgrid::core::types::{BlockStatus, Priority};

#[test]
fn unknown_command_is_reported_and_shell_keeps_running() {
    let dir = make_temp_dir("unknown");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "frobnicate\nexit\n");
    assert!(output.status.success());

    let stderr = normalized_lines(&output.stderr);
    assert!(
        stderr
            .iter()
            .any(|l| l == "Command resolution failed for 'frobnicate'. Unknown command: frobnicate"),
        "stderr was {stderr:?}"
    );
}

#[test]
fn add_prints_the_new_block() {
    let dir = make_temp_dir("add");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "add \"Deep work\" 9:30 90 2025-03-14\nexit\n");
    assert!(output.status.success());

    let stdout = normalized_lines(&output.stdout);
    assert!(
        stdout
            .iter()
            .any(|l| l.starts_with("Added block with id 1: TimeBlock(id=1, title='Deep work'")),
        "stdout was {stdout:?}"
    );
}

#[test]
fn man_prints_the_general_page() {
    let dir = make_temp_dir("man");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "man\nexit\n");
    let stdout = normalized_lines(&output.stdout);
    assert!(stdout.iter().any(|l| l == "NAME"));
    assert!(
        stdout
            .iter()
            .any(|l| l == "blockgrid - Time-block calendar in the terminal.")
    );
}

#[test]
fn commands_are_logged_to_the_session_file() {
    let dir = make_temp_dir("logfile");
    write_valid_config(&dir);
    run_with_input(&dir, "add \"Gym\" 7:00 2025-03-14\nexit\n");

    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("Command run: add \"Gym\" 7:00 2025-03-14"));
    assert!(log.contains("Added block with id 1"));
}

#[test]
fn add_modify_delete_through_the_command_layer() {
    let dir = make_temp_dir("crud");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    execute_command("add \"Review\" 14:00 45 2025-03-14 high #work +weekly", &mut ctx);
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.duration_minutes(), 45);
    assert_eq!(block.priority, Priority::High);
    assert_eq!(block.category.as_str(), "work");
    assert_eq!(block.tags, vec!["weekly".to_string()]);

    execute_command("mod 1 in-progress", &mut ctx);
    assert_eq!(
        ctx.store.get(BlockId(1)).unwrap().status,
        BlockStatus::InProgress
    );

    execute_command("del 1", &mut ctx);
    assert!(ctx.store.is_empty());
}

#[test]
fn deleting_a_missing_block_fails() {
    let dir = make_temp_dir("missing");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    assert!(try_command("del 7", &mut ctx).is_err());
}

#[test]
fn filter_narrows_what_the_views_show() {
    let dir = make_temp_dir("filter");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    execute_command("add \"A\" 9:00 2025-03-14 #work", &mut ctx);
    execute_command("add \"B\" 11:00 2025-03-14 #home", &mut ctx);
    execute_command("filter #work", &mut ctx);
    let visible: Vec<_> = ctx.store.visible().iter().map(|b| b.id).collect();
    assert_eq!(visible, vec![BlockId(1)]);

    execute_command("filter reset", &mut ctx);
    assert_eq!(ctx.store.visible().len(), 2);
}
