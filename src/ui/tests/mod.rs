mod chrome_tests;
mod table_printer_tests;
mod width_util_tests;

use crate::core::models::{Category, TimeBlock, TimeBlockDraft};
use crate::core::store::TimeBlockStore;
use crate::core::types::BlockStatus;
use chrono::{NaiveDate, NaiveDateTime};

/// Friday, 2025-03-14.
pub(super) fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

pub(super) fn at(h: u32, m: u32) -> NaiveDateTime {
    sample_date().and_hms_opt(h, m, 0).unwrap()
}

/// Store holding "Standup" 09:00-09:30 (#work) and "Deep work"
/// 13:00-15:00 (completed, #1).
pub(super) fn sample_store() -> TimeBlockStore {
    let mut store = TimeBlockStore::new();
    store
        .add(
            TimeBlockDraft::new("Standup", at(9, 0), 30)
                .with_category(Category::new("work").unwrap())
                .with_tags(vec!["team".into()]),
        )
        .unwrap();
    store
        .add(TimeBlockDraft::new("Deep work", at(13, 0), 120).with_status(BlockStatus::Completed))
        .unwrap();
    store
}

pub(super) fn refs(store: &TimeBlockStore) -> Vec<&TimeBlock> {
    store.blocks().iter().collect()
}
