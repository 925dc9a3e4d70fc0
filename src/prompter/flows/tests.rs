use super::main_flow::MainFlow;
use crate::config::Config;
use crate::core::cli::CliPaths;
use crate::core::context::AppContext;
use crate::core::models::BlockId;
use crate::core::types::{BlockStatus, ViewKind, WeekStart};
use crate::prompter::models::{Flow, FlowCtrl};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_ctx() -> AppContext {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("blockgrid-flow-{nanos}-{uniq}"));
    fs::create_dir_all(&dir).unwrap();
    let config_path = dir.join("config.json");
    Config::create_default(&config_path, WeekStart::Monday).unwrap();
    AppContext::new_with_paths(&CliPaths {
        config_path,
        saves_dir: dir.join("saves"),
        logs_dir: dir.join("logs"),
        outbox_path: dir.join("outbox.jsonl"),
    })
    .unwrap()
}

#[test]
fn main_flow_render_sets_startup_and_prompts() {
    let mut ctx = make_ctx();
    let mut flow = MainFlow::new(&mut ctx);
    flow.render().unwrap();
    flow.render().unwrap();
    drop(flow);
    assert!(ctx.startup_displayed);
}

#[test]
fn main_flow_handles_exit_and_empty() {
    let mut ctx = make_ctx();
    let mut flow = MainFlow::new(&mut ctx);
    assert_eq!(flow.handle_input("").unwrap(), FlowCtrl::Continue);
    assert_eq!(flow.handle_input("  ").unwrap(), FlowCtrl::Continue);
    assert_eq!(flow.handle_input("exit").unwrap(), FlowCtrl::Finish);
    assert_eq!(flow.handle_input("  EXIT ").unwrap(), FlowCtrl::Finish);
    assert_eq!(flow.handle_input("exit now").unwrap(), FlowCtrl::Continue);
}

#[test]
fn main_flow_parses_and_executes_block_commands() {
    let mut ctx = make_ctx();
    let mut flow = MainFlow::new(&mut ctx);
    let ctrl = flow
        .handle_input(r#"add "Deep work" 9:30 90 2025-03-14 high #work +focus"#)
        .unwrap();
    assert_eq!(ctrl, FlowCtrl::Continue);
    flow.handle_input("mod 1 completed").unwrap();
    flow.handle_input("select 1").unwrap();
    drop(flow);

    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.title, "Deep work");
    assert_eq!(block.duration_minutes(), 90);
    assert_eq!(block.status, BlockStatus::Completed);
    assert_eq!(block.tags, vec!["focus".to_string()]);
    assert_eq!(ctx.store.selected_id(), Some(BlockId(1)));
}

#[test]
fn main_flow_survives_bad_input() {
    let mut ctx = make_ctx();
    let mut flow = MainFlow::new(&mut ctx);
    assert_eq!(flow.handle_input("frobnicate 3").unwrap(), FlowCtrl::Continue);
    assert_eq!(flow.handle_input(r#"add "Tiny" 9:00 5"#).unwrap(), FlowCtrl::Continue);
    assert_eq!(flow.handle_input("del 42").unwrap(), FlowCtrl::Continue);
    assert_eq!(flow.handle_input(r#"add "unterminated 9:00"#).unwrap(), FlowCtrl::Continue);
    drop(flow);
    assert!(ctx.store.is_empty());
}

#[test]
fn main_flow_navigates_views() {
    let mut ctx = make_ctx();
    let mut flow = MainFlow::new(&mut ctx);
    flow.handle_input("view month").unwrap();
    flow.handle_input("pick 2025-02-10").unwrap();
    flow.handle_input("show").unwrap();
    drop(flow);
    assert_eq!(ctx.view.current_view(), ViewKind::Day);
    assert_eq!(
        ctx.view.current_date(),
        chrono::NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
    );
}

#[test]
fn main_flow_edits_config_in_place() {
    let mut ctx = make_ctx();
    let mut flow = MainFlow::new(&mut ctx);
    flow.handle_input("config FILE_LOGGING_ENABLED False").unwrap();
    flow.handle_input("config PIXELS_PER_HOUR 120").unwrap();
    drop(flow);

    assert!(!ctx.config.file_logging_enabled());
    assert!(!ctx.logger.file_logging_enabled());
    assert_eq!(ctx.pointer.scale().pixels_per_hour(), 120.0);
}
