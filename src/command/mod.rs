pub mod block_spec;
pub mod command_parser;
pub mod command_resolver;
pub mod commands;
pub mod manual;
mod policies;
#[cfg(test)]
mod tests;
