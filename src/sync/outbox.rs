use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::sync::{CalendarEvent, CalendarSync, SyncError};

/// Calendar that queues events as JSON lines for a separate uploader.
#[derive(Debug, Clone)]
pub struct OutboxCalendar {
    path: Option<PathBuf>,
    pushed: u32,
}

impl OutboxCalendar {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            pushed: 0,
        }
    }

    /// An outbox with nowhere to write; every push is refused.
    pub fn unauthorized() -> Self {
        Self {
            path: None,
            pushed: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl CalendarSync for OutboxCalendar {
    fn push(&mut self, event: &CalendarEvent) -> Result<String, SyncError> {
        let path = self.path.as_ref().ok_or(SyncError::NotAuthorized)?;
        let block = event
            .block_id()
            .ok_or_else(|| SyncError::Rejected("event carries no block id".to_string()))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let line = serde_json::to_string(event)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")?;

        self.pushed += 1;
        Ok(format!("blockgrid-{}-{}", block, self.pushed))
    }

    fn is_authorized(&self) -> bool {
        self.path.is_some()
    }
}
