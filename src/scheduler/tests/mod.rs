
use crate::config::Config;
use crate::core::cli::CliPaths;
use crate::core::context::AppContext;
use crate::core::models::{TimeBlock, TimeBlockDraft};
use crate::core::store::TimeBlockStore;
use crate::core::types::{BlockStatus, WeekStart};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub(super) fn make_ctx() -> AppContext {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("blockgrid-scheduler-{nanos}-{uniq}"));
    fs::create_dir_all(&dir).unwrap();
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

/// Friday, 2025-03-14.
pub(super) fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

pub(super) fn at(h: u32, m: u32) -> NaiveDateTime {
    sample_date().and_hms_opt(h, m, 0).unwrap()
}

pub(super) fn on(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, 0).unwrap()
}

pub(super) fn store_with(drafts: Vec<TimeBlockDraft>) -> TimeBlockStore {
    let mut store = TimeBlockStore::new();
    for d in drafts {
        store.add(d).unwrap();
    }
    store
}

pub(super) fn block(start: NaiveDateTime, minutes: i64, status: BlockStatus) -> TimeBlock {
    store_with(vec![
        TimeBlockDraft::new("block", start, minutes).with_status(status),
    ])
    .blocks()[0]
        .clone()
}
