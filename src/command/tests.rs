use super::command_parser::CommandParser;
use super::command_resolver::{
    BlockResolver, CommandResolver, GlobalResolver, TypeHelpResolver, ViewResolver,
};
use crate::arg::args::Arg;
use crate::command::manual::{ManualCatalog, ManualTopic};
use crate::config::Config;
use crate::core::cli::CliPaths;
use crate::core::context::AppContext;
use crate::core::models::{BlockId, Category, TimeBlockDraft};
use crate::core::types::{BlockStatus, ClockTime, Date, Flag, ResizeEdge, ViewKind, WeekStart};
use crate::errors::Error;
use crate::sync::{OutboxCalendar, SyncError};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use strum::IntoEnumIterator;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("blockgrid-cmd-{nanos}-{uniq}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn ctx_in(dir: &PathBuf) -> AppContext {
    let config_path = dir.join("config.json");
    Config::create_default(&config_path, WeekStart::Sunday).unwrap();
    let paths = CliPaths {
        config_path,
        saves_dir: dir.join("saves"),
        logs_dir: dir.join("logs"),
        outbox_path: dir.join("outbox").join("calendar.jsonl"),
    };
    AppContext::new_with_paths(&paths).unwrap()
}

fn ctx() -> AppContext {
    ctx_in(&temp_dir())
}

fn at(ctx: &AppContext, h: u32, m: u32) -> NaiveDateTime {
    ctx.today().and_hms_opt(h, m, 0).unwrap()
}

/// Context holding block 1: "Focus", today 09:00-10:00.
fn ctx_with_block() -> AppContext {
    let mut ctx = ctx();
    let start = at(&ctx, 9, 0);
    ctx.store
        .add(TimeBlockDraft::new("Focus", start, 60))
        .unwrap();
    ctx
}

fn run(ctx: &mut AppContext, command: &str, args: &[Arg]) -> crate::errors::Result<()> {
    CommandParser::new().parse(command, args)?.execute(ctx)
}

fn date(s: &str) -> Arg {
    Arg::Date(Date::try_from_str(s).unwrap())
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------- resolution ----------
#[test]
fn command_parser_unknown_command_errors() {
    let parser = CommandParser::new();
    assert!(matches!(
        parser.parse("does-not-exist", &[]),
        Err(Error::UnknownCommand(_))
    ));
}

#[test]
fn resolvers_split_the_command_words() {
    assert!(BlockResolver.can_resolve("add"));
    assert!(BlockResolver.can_resolve("mod"));
    assert!(BlockResolver.can_resolve("resize"));
    assert!(!BlockResolver.can_resolve("view"));

    assert!(ViewResolver.can_resolve("next"));
    assert!(ViewResolver.can_resolve("today"));
    assert!(!ViewResolver.can_resolve("slots"));

    for cmd in ["slots", "stats", "filter", "config", "log", "save", "read", "man"] {
        assert!(GlobalResolver.can_resolve(cmd), "{cmd}");
    }

    for cmd in ["date", "time", "colors"] {
        assert!(TypeHelpResolver.can_resolve(cmd));
        let usage = TypeHelpResolver.resolve(cmd, &[]).unwrap().usage();
        assert!(!usage.is_empty());
    }
}

#[test]
fn block_command_usage_lists_its_pattern() {
    let cmd = BlockResolver.resolve("move", &[]).unwrap();
    assert!(cmd.usage().starts_with("Usage: move <id> <hour> <offsetPx> [date]"));
}

#[test]
fn help_flag_prints_usage_instead_of_running() {
    let mut ctx = ctx();
    let args = vec![Arg::Flag(Flag::Help)];
    run(&mut ctx, "add", &args).unwrap();
    assert!(ctx.store.is_empty());
}

#[test]
fn bare_commands_reject_arguments() {
    let mut ctx = ctx();
    let err = run(&mut ctx, "next", &[Arg::Int(2)]).unwrap_err();
    assert!(matches!(err, Error::Parse(msg) if msg.starts_with("Unexpected argument 2")));
}

// ---------- block commands ----------
#[test]
fn add_then_modify_then_delete() {
    let mut ctx = ctx();
    let args = vec![
        Arg::Name("Write".into()),
        Arg::Time(ClockTime::try_from_str("9:00").unwrap()),
        Arg::Int(45),
        Arg::Category(Category::new("work").unwrap()),
    ];
    run(&mut ctx, "add", &args).unwrap();
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.duration_minutes(), 45);
    assert_eq!(block.category.as_str(), "work");

    let args = vec![Arg::Int(1), Arg::Name("Rewrite".into()), Arg::Status(BlockStatus::Completed)];
    run(&mut ctx, "mod", &args).unwrap();
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.title, "Rewrite");
    assert_eq!(block.status, BlockStatus::Completed);

    run(&mut ctx, "del", &[Arg::Int(1)]).unwrap();
    assert!(ctx.store.is_empty());

    let err = run(&mut ctx, "del", &[Arg::Int(1)]).unwrap_err();
    assert!(matches!(err, Error::Parse(msg) if msg.starts_with("Block with id 1 does not exist.")));
}

#[test]
fn add_without_arguments_only_lists() {
    let mut ctx = ctx_with_block();
    run(&mut ctx, "add", &[]).unwrap();
    assert_eq!(ctx.store.len(), 1);
}

#[test]
fn move_drops_on_the_target_hour_and_keeps_duration() {
    let mut ctx = ctx_with_block();
    run(&mut ctx, "move", &[Arg::Int(1), Arg::Int(14), Arg::Int(40)]).unwrap();
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.start_time, at(&ctx, 14, 30));
    assert_eq!(block.end_time, at(&ctx, 15, 30));
    assert!(ctx.pointer.is_idle());
    assert_eq!(ctx.store.dragged_id(), None);
}

#[test]
fn move_off_the_grid_changes_nothing() {
    let mut ctx = ctx_with_block();
    run(&mut ctx, "move", &[Arg::Int(1), Arg::Int(-1), Arg::Int(0)]).unwrap();
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.start_time, at(&ctx, 9, 0));
    assert!(ctx.pointer.is_idle());
}

#[test]
fn resize_applies_every_valid_frame() {
    let mut ctx = ctx_with_block();
    let args = vec![
        Arg::Int(1),
        Arg::Edge(ResizeEdge::End),
        Arg::Int(40),
        Arg::Int(80),
    ];
    run(&mut ctx, "resize", &args).unwrap();
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.start_time, at(&ctx, 9, 0));
    assert_eq!(block.end_time, at(&ctx, 11, 0));
    assert!(ctx.pointer.is_idle());
}

#[test]
fn resize_keeps_the_last_valid_shape() {
    let mut ctx = ctx_with_block();
    let args = vec![
        Arg::Int(1),
        Arg::Edge(ResizeEdge::End),
        Arg::Int(-80),
    ];
    run(&mut ctx, "resize", &args).unwrap();
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.end_time, at(&ctx, 10, 0));
}

#[test]
fn resize_with_an_oversize_delta_keeps_the_block_and_ends() {
    let mut ctx = ctx_with_block();
    let args = vec![
        Arg::Int(1),
        Arg::Edge(ResizeEdge::End),
        Arg::Int(1_000_000_000_000_000_000),
    ];
    run(&mut ctx, "resize", &args).unwrap();
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.end_time, at(&ctx, 10, 0));
    assert!(ctx.pointer.is_idle());
}

#[test]
fn mod_with_an_oversize_duration_is_refused() {
    let mut ctx = ctx_with_block();
    let err = run(&mut ctx, "mod", &[Arg::Int(1), Arg::Int(i64::MAX)]).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.duration_minutes(), 60);
}

#[test]
fn place_creates_and_selects_a_default_block() {
    let mut ctx = ctx();
    let args = vec![Arg::Int(10), Arg::Int(40), date("2025-03-15")];
    run(&mut ctx, "place", &args).unwrap();
    let block = ctx.store.get(BlockId(1)).unwrap();
    assert_eq!(block.title, "New Block");
    assert_eq!(
        block.start_time,
        day(2025, 3, 15).and_hms_opt(10, 30, 0).unwrap()
    );
    assert_eq!(block.duration_minutes(), ctx.config.default_duration());
    assert_eq!(ctx.store.selected_id(), Some(BlockId(1)));
}

#[test]
fn select_sets_and_clears() {
    let mut ctx = ctx_with_block();
    run(&mut ctx, "select", &[Arg::Int(1)]).unwrap();
    assert_eq!(ctx.store.selected_id(), Some(BlockId(1)));
    run(&mut ctx, "select", &[]).unwrap();
    assert_eq!(ctx.store.selected_id(), None);
}

#[test]
fn sync_appends_to_the_outbox() {
    let dir = temp_dir();
    let mut ctx = ctx_in(&dir);
    let start = at(&ctx, 9, 0);
    ctx.store
        .add(TimeBlockDraft::new("Focus", start, 60))
        .unwrap();
    run(&mut ctx, "sync", &[Arg::Int(1)]).unwrap();

    let outbox = fs::read_to_string(dir.join("outbox").join("calendar.jsonl")).unwrap();
    assert_eq!(outbox.lines().count(), 1);
    assert!(outbox.contains("\"summary\":\"Focus\""));
}

#[test]
fn sync_without_authorization_leaves_the_block_alone() {
    let mut ctx = ctx_with_block().with_calendar(Box::new(OutboxCalendar::unauthorized()));
    let before = ctx.store.get(BlockId(1)).cloned();
    let err = run(&mut ctx, "sync", &[Arg::Int(1)]).unwrap_err();
    assert!(matches!(err, Error::Sync(SyncError::NotAuthorized)));
    assert_eq!(ctx.store.get(BlockId(1)).cloned(), before);
}

// ---------- views ----------
#[test]
fn view_next_and_pick() {
    let mut ctx = ctx();
    let today = ctx.today();
    run(&mut ctx, "view", &[Arg::View(ViewKind::Month)]).unwrap();
    assert_eq!(ctx.view.current_view(), ViewKind::Month);

    run(&mut ctx, "pick", &[date("2025-03-14")]).unwrap();
    assert_eq!(ctx.view.current_view(), ViewKind::Day);
    assert_eq!(ctx.view.current_date(), day(2025, 3, 14));

    run(&mut ctx, "next", &[]).unwrap();
    assert_eq!(ctx.view.current_date(), day(2025, 3, 15));

    run(&mut ctx, "today", &[]).unwrap();
    assert_eq!(ctx.view.current_date(), today);

    run(&mut ctx, "show", &[]).unwrap();
}

#[test]
fn pick_needs_a_date() {
    let mut ctx = ctx();
    assert!(run(&mut ctx, "pick", &[]).is_err());
}

// ---------- filter ----------
#[test]
fn filter_narrows_and_resets() {
    let mut ctx = ctx_with_block();
    let start = at(&ctx, 13, 0);
    ctx.store
        .add(TimeBlockDraft::new("Done", start, 30).with_status(BlockStatus::Completed))
        .unwrap();
    assert_eq!(ctx.store.visible().len(), 1);

    run(&mut ctx, "filter", &[Arg::Status(BlockStatus::Completed)]).unwrap();
    let visible: Vec<BlockId> = ctx.store.visible().iter().map(|b| b.id).collect();
    assert_eq!(visible, vec![BlockId(2)]);

    run(&mut ctx, "filter", &[Arg::Word("reset".into())]).unwrap();
    assert_eq!(ctx.store.visible().len(), 1);
}

#[test]
fn filter_date_range_needs_two_dates() {
    let mut ctx = ctx();
    let err = run(&mut ctx, "filter", &[date("2025-03-01")]).unwrap_err();
    assert!(matches!(err, Error::Parse(msg) if msg.starts_with("A date range needs")));

    run(&mut ctx, "filter", &[date("2025-03-01"), date("2025-03-31")]).unwrap();
    assert!(ctx.store.filter().date_range.is_some());
}

// ---------- global ----------
#[test]
fn config_set_by_key_and_by_index() {
    let mut ctx = ctx();
    let args = vec![Arg::Name("DEFAULT_DURATION".into()), Arg::Name("30".into())];
    run(&mut ctx, "config", &args).unwrap();
    assert_eq!(ctx.config.default_duration(), 30);

    let args = vec![Arg::Name("3".into()), Arg::Name("45".into())];
    run(&mut ctx, "config", &args).unwrap();
    assert_eq!(ctx.config.default_duration(), 45);

    let reloaded = Config::load_from(ctx.config.path()).unwrap();
    assert_eq!(reloaded.default_duration(), 45);

    let args = vec![Arg::Name("NOPE".into()), Arg::Name("1".into())];
    assert!(run(&mut ctx, "config", &args).is_err());
}

#[test]
fn save_and_read_round_trip_through_the_saves_dir() {
    let mut ctx = ctx_with_block();
    run(&mut ctx, "save", &[Arg::Name("week".into())]).unwrap();
    assert!(ctx.saves_dir.join("week.json").exists());

    run(&mut ctx, "del", &[Arg::Int(1)]).unwrap();
    assert!(ctx.store.is_empty());

    run(&mut ctx, "read", &[Arg::Word("week".into())]).unwrap();
    assert_eq!(ctx.store.get(BlockId(1)).unwrap().title, "Focus");
}

#[test]
fn read_of_a_missing_file_keeps_the_store() {
    let mut ctx = ctx_with_block();
    assert!(run(&mut ctx, "read", &[Arg::Name("absent".into())]).is_err());
    assert_eq!(ctx.store.len(), 1);
}

#[test]
fn slots_and_stats_run() {
    let mut ctx = ctx_with_block();
    run(&mut ctx, "slots", &[]).unwrap();
    run(&mut ctx, "slots", &[date("2025-03-14")]).unwrap();
    run(&mut ctx, "stats", &[]).unwrap();
    assert!(run(&mut ctx, "stats", &[Arg::Int(1)]).is_err());
}

// ---------- manual ----------
#[test]
fn manual_catalog_renders_general_page() {
    let output = ManualCatalog::new().page_for(None).unwrap().render();
    assert!(output.starts_with("NAME\n  blockgrid - "));
}

#[test]
fn manual_catalog_errors_on_unknown_topic() {
    let err = ManualCatalog::new().page_for(Some("unknown")).unwrap_err();
    match err {
        Error::Parse(msg) => assert!(msg.contains("Valid topics")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn manual_catalog_renders_pages_for_all_topics() {
    let catalog = ManualCatalog::new();
    for topic in ManualTopic::iter() {
        let output = catalog.page_for(Some(&topic.to_string())).unwrap().render();
        assert!(!output.is_empty());
    }
}

#[test]
fn manual_block_pages_show_usage() {
    let output = ManualCatalog::new().page_for(Some("resize")).unwrap().render();
    assert!(output.contains("resize <id> <start|end> <deltaPx>..."));

    let output = ManualCatalog::new().page_for(Some("mod")).unwrap().render();
    assert!(output.contains("mod <id>"));
}

#[test]
fn manual_type_help_page_includes_usage_lines() {
    let output = ManualCatalog::new().page_for(Some("date")).unwrap().render();
    assert!(output.contains("Supported formats"));
}
