pub mod block;
pub mod common;
pub mod core;
