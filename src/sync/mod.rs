pub mod event_mapper;
pub mod outbox;

use std::fmt;

use thiserror::Error;

pub use event_mapper::{CalendarEvent, CalendarEventDateTime, encode_block_event};
pub use outbox::OutboxCalendar;

/// Failures reported by an external calendar.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("not authorized with the external calendar")]
    NotAuthorized,

    #[error("block time cannot be expressed in the local timezone: {0}")]
    InvalidTime(String),

    #[error("event rejected: {0}")]
    Rejected(String),

    #[error("outbox I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("event encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Remote calendar that accepts one event per call and answers with the id
/// it assigned. Calls block until the remote side answers.
pub trait CalendarSync: fmt::Debug {
    fn push(&mut self, event: &CalendarEvent) -> Result<String, SyncError>;

    fn is_authorized(&self) -> bool {
        true
    }
}
