use crate::arg::args::{
    Arg, CategoryArg, DateArg, DecimalArg, EdgeArg, FlagArg, IntArg, NameArg, NumberArg,
    PriorityArg, StatusArg, TagArg, TimeArg, ViewArg, WordArg,
};
use crate::core::types::{BlockStatus, ClockTime, Date, Flag, Priority, ResizeEdge, ViewKind};
use crate::errors::Error;
use crate::extensions::enums::valid_csv;

pub trait ArgMatcher {
    fn matches_variant(actual: &Arg) -> bool;
    fn expected_error(provided: &Arg) -> Error;
}

impl ArgMatcher for NameArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Name(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!("Expected quoted text, got {}", provided))
    }
}

impl ArgMatcher for IntArg {
    fn matches_variant(a: &Arg) -> bool {
        matches!(a, Arg::Int(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!("Expected an integer, got {}", provided))
    }
}

impl ArgMatcher for DecimalArg {
    fn matches_variant(a: &Arg) -> bool {
        matches!(a, Arg::Decimal(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!("Expected a decimal number, got {}", provided))
    }
}

impl ArgMatcher for NumberArg {
    fn matches_variant(a: &Arg) -> bool {
        matches!(a, Arg::Int(_) | Arg::Decimal(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!("Expected a number of pixels, got {}", provided))
    }
}

impl ArgMatcher for FlagArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Flag(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a flag, got {}. Valid flags: {}",
            provided,
            valid_csv::<Flag>()
        ))
    }
}

impl ArgMatcher for StatusArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Status(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a status, got {}. Valid statuses: {}",
            provided,
            valid_csv::<BlockStatus>()
        ))
    }
}

impl ArgMatcher for PriorityArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Priority(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a priority, got {}. Valid priorities: {}",
            provided,
            valid_csv::<Priority>()
        ))
    }
}

impl ArgMatcher for EdgeArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Edge(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a block edge, got {}. Valid edges: {}",
            provided,
            valid_csv::<ResizeEdge>()
        ))
    }
}

impl ArgMatcher for ViewArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::View(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a view, got {}. Valid views: {}",
            provided,
            valid_csv::<ViewKind>()
        ))
    }
}

impl ArgMatcher for CategoryArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Category(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a category in the format '#<name>', got {}.",
            provided
        ))
    }
}

impl ArgMatcher for TagArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Tag(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a tag in the format '+<tag>', got {}.",
            provided
        ))
    }
}

impl ArgMatcher for TimeArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Time(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a time of day, got {}. {}",
            provided,
            ClockTime::usage()
        ))
    }
}

impl ArgMatcher for DateArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Date(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!(
            "Expected a valid date, got {}. {}",
            provided,
            Date::usage()
        ))
    }
}

impl ArgMatcher for WordArg {
    fn matches_variant(actual: &Arg) -> bool {
        matches!(actual, Arg::Word(_))
    }
    fn expected_error(provided: &Arg) -> Error {
        Error::Parse(format!("Expected a keyword, got {}.", provided))
    }
}
