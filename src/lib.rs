pub mod arg;
pub mod command;
pub mod config;
pub mod core;
pub mod errors;
pub mod extensions;
pub mod logging;
pub mod prompter;
pub mod scheduler;
pub mod sync;
pub mod ui;
