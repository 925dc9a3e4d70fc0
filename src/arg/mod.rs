pub mod arg_extractor;
pub mod arg_matcher;
pub mod arg_parse_strategy;
pub mod arg_parser;
pub mod args;
