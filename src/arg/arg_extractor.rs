use crate::arg::arg_matcher::ArgMatcher;
use crate::arg::args::{
    Arg, CategoryArg, DateArg, EdgeArg, FlagArg, IntArg, NameArg, NumberArg, PriorityArg,
    StatusArg, TagArg, TimeArg, ViewArg, WordArg,
};
use crate::core::models::Category;
use crate::core::types::{BlockStatus, ClockTime, Date, Flag, Priority, ResizeEdge, ViewKind};
use crate::errors::{Error, Result};

pub trait ArgExtractor<'a>: ArgMatcher {
    type Out;

    fn try_extract(actual: &'a Arg) -> Option<Self::Out>;
}

/// Typed value at `idx`; a missing or mistyped argument is a parse error.
pub fn extract_at<'a, E: ArgExtractor<'a>>(args: &'a [Arg], idx: usize) -> Result<E::Out> {
    let Some(a) = args.get(idx) else {
        return Err(Error::Parse(format!(
            "Missing argument at position {}.",
            idx + 1
        )));
    };
    E::try_extract(a).ok_or_else(|| E::expected_error(a))
}

/// Every argument of one kind, in order.
pub fn extract_all<'a, E: ArgExtractor<'a>>(args: &'a [Arg]) -> Vec<E::Out> {
    args.iter().filter_map(E::try_extract).collect()
}

impl<'a> ArgExtractor<'a> for NameArg {
    type Out = &'a String;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Name(s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for IntArg {
    type Out = i64;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for NumberArg {
    type Out = f64;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Int(v) => Some(*v as f64),
            Arg::Decimal(v) => Some(*v),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for DateArg {
    type Out = Date; // Copy
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for TimeArg {
    type Out = ClockTime; // Copy
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for StatusArg {
    type Out = BlockStatus;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Status(s) => Some(*s),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for PriorityArg {
    type Out = Priority;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Priority(p) => Some(*p),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for EdgeArg {
    type Out = ResizeEdge;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Edge(e) => Some(*e),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for ViewArg {
    type Out = ViewKind;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::View(v) => Some(*v),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for CategoryArg {
    type Out = &'a Category;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Category(c) => Some(c),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for TagArg {
    type Out = &'a String;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Tag(t) => Some(t),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for FlagArg {
    type Out = Flag;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Flag(f) => Some(*f),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for WordArg {
    type Out = &'a String;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Word(w) => Some(w),
            _ => None,
        }
    }
}
