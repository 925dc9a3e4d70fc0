use thiserror::Error;

use crate::core::models::BlockId;
use crate::sync::SyncError;

pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error set.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing & Routing --------------------------------------------------
    /// Token, argument or value parsing problems.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No resolver matched the command word.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // ---- Blocks / Gestures --------------------------------------------------
    /// A draft, edit or frame was refused at the boundary; nothing was mutated.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A gesture was started while another one was still open.
    #[error("A {active} gesture on block {block_id} is still in progress.")]
    GestureInProgress {
        active: &'static str,
        block_id: BlockId,
    },

    /// Pushing a block to the external calendar failed. Local state is untouched.
    #[error("Calendar sync failed: {0}")]
    Sync(#[from] SyncError),

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing configuration item: {item}")]
    ConfigItemMissing { item: &'static str },

    // ---- Plumbing / Wrappers ------------------------------------------------
    #[error("{0}")]
    Domain(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn unknown<S: Into<String>>(cmd: S) -> Self {
        Error::UnknownCommand(cmd.into())
    }
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }
}

// ----------------------- Small result helpers --------------------------------

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}

/// Map an `Option<T>` into `Result<T, Error::ConfigItemMissing>` with a static key.
pub fn require_config_item<T>(opt: Option<T>, item: &'static str) -> Result<T> {
    opt.ok_or_else(|| Error::ConfigItemMissing { item })
}
