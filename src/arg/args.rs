use std::fmt;
use std::marker::PhantomData;

use crate::core::models::Category;
use crate::core::types::{BlockStatus, ClockTime, Date, Flag, Priority, ResizeEdge, ViewKind};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Flag(Flag),
    Int(i64),
    Decimal(f64),
    Name(String),
    Time(ClockTime),
    Date(Date),
    Status(BlockStatus),
    Priority(Priority),
    Category(Category),
    Tag(String),
    Edge(ResizeEdge),
    View(ViewKind),
    Word(String),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Flag(x) => write!(f, "{x}"),
            Arg::Int(x) => write!(f, "{x}"),
            Arg::Decimal(x) => write!(f, "{x}"),
            Arg::Name(x) => write!(f, "\"{x}\""),
            Arg::Time(x) => write!(f, "{x}"),
            Arg::Date(x) => write!(f, "{x}"),
            Arg::Status(x) => write!(f, "{x}"),
            Arg::Priority(x) => write!(f, "{x}"),
            Arg::Category(x) => write!(f, "#{x}"),
            Arg::Tag(x) => write!(f, "+{x}"),
            Arg::Edge(x) => write!(f, "{x}"),
            Arg::View(x) => write!(f, "{x}"),
            Arg::Word(x) => write!(f, "{x}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenStream {
    toks: Vec<String>,
    i: usize,
}
impl TokenStream {
    pub fn new(raw: &[String]) -> Self {
        Self {
            toks: raw.to_vec(),
            i: 0,
        }
    }
    pub fn eof(&self) -> bool {
        self.i >= self.toks.len()
    }
    pub fn peek(&self) -> Result<&str> {
        self.toks
            .get(self.i)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::Parse("EOF".into()))
    }
    pub fn next(&mut self) -> Result<String> {
        let s = self.peek()?.to_string();
        self.i += 1;
        Ok(s)
    }
}

pub trait SingleTokenArg {
    fn accepts(tok: &str) -> bool;
    fn new(tok: &str) -> Result<Arg>;
}

pub trait MultiTokenArg: SingleTokenArg {
    fn starts_sequence(tok: &str) -> bool;
}

pub trait ArgFactory {
    fn can_start(&self, tok: &str) -> bool;
    fn parse(&self, ts: &mut TokenStream) -> Result<Arg>;
}

pub struct SingleTokenFactory<A: SingleTokenArg>(PhantomData<A>);
impl<A: SingleTokenArg> SingleTokenFactory<A> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<A: SingleTokenArg> ArgFactory for SingleTokenFactory<A> {
    fn can_start(&self, tok: &str) -> bool {
        A::accepts(tok)
    }
    fn parse(&self, ts: &mut TokenStream) -> Result<Arg> {
        let tok = ts.next()?;
        A::new(&tok)
    }
}

pub struct MultiTokenFactory<A: MultiTokenArg>(PhantomData<A>);
impl<A: MultiTokenArg> MultiTokenFactory<A> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<A: MultiTokenArg> ArgFactory for MultiTokenFactory<A> {
    fn can_start(&self, tok: &str) -> bool {
        A::starts_sequence(tok)
    }
    fn parse(&self, ts: &mut TokenStream) -> Result<Arg> {
        let mut buf: Vec<String> = vec![ts.next()?];
        loop {
            let joined = buf.join(" ");
            if A::accepts(&joined) || ts.eof() {
                return A::new(&joined);
            }
            buf.push(ts.next()?);
        }
    }
}

/// Quoted free text: titles, descriptions, save names.
pub struct NameArg;
impl MultiTokenArg for NameArg {
    fn starts_sequence(value: &str) -> bool {
        matches!(value.as_bytes().first(), Some(b'\'' | b'"'))
    }
}

impl SingleTokenArg for NameArg {
    fn accepts(value: &str) -> bool {
        if value.len() < 2 {
            return false;
        }
        let q = value.as_bytes()[0] as char;
        if q != '\'' && q != '"' {
            return false;
        }
        value.ends_with(q) && !value[1..value.len() - 1].trim().is_empty()
    }
    fn new(value: &str) -> Result<Arg> {
        if !Self::accepts(value) {
            return Err(Error::Parse(
                "Name must contain text wrapped in single or double quotes.".into(),
            ));
        }
        Ok(Arg::Name(value[1..value.len() - 1].to_string()))
    }
}

pub struct FlagArg;
impl SingleTokenArg for FlagArg {
    fn accepts(value: &str) -> bool {
        Flag::try_from(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Flag(Flag::try_from(value)?))
    }
}

fn is_signed_digits(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Whole number, optionally negative (`-40` is a pointer delta upwards).
pub struct IntArg;
impl SingleTokenArg for IntArg {
    fn accepts(value: &str) -> bool {
        is_signed_digits(value)
    }
    fn new(value: &str) -> Result<Arg> {
        value
            .parse::<i64>()
            .map(Arg::Int)
            .map_err(|_| Error::Parse(format!("Expected an integer, got '{}'", value)))
    }
}

pub struct DecimalArg;
impl SingleTokenArg for DecimalArg {
    fn accepts(value: &str) -> bool {
        match value.split_once('.') {
            Some((whole, frac)) => {
                (whole.is_empty() || whole == "-" || is_signed_digits(whole))
                    && !frac.is_empty()
                    && frac.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }
    fn new(value: &str) -> Result<Arg> {
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Arg::Decimal(v)),
            _ => Err(Error::Parse(format!(
                "Expected a decimal number, got '{}'",
                value
            ))),
        }
    }
}

/// Any number; used by slots that take pixels, not by the tokenizer.
pub struct NumberArg;

pub struct StatusArg;
impl SingleTokenArg for StatusArg {
    fn accepts(value: &str) -> bool {
        BlockStatus::try_from(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Status(BlockStatus::try_from(value)?))
    }
}

pub struct PriorityArg;
impl SingleTokenArg for PriorityArg {
    fn accepts(value: &str) -> bool {
        Priority::try_from(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Priority(Priority::try_from(value)?))
    }
}

pub struct EdgeArg;
impl SingleTokenArg for EdgeArg {
    fn accepts(value: &str) -> bool {
        ResizeEdge::try_from(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Edge(ResizeEdge::try_from(value)?))
    }
}

pub struct ViewArg;
impl SingleTokenArg for ViewArg {
    fn accepts(value: &str) -> bool {
        ViewKind::try_from(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::View(ViewKind::try_from(value)?))
    }
}

pub struct CategoryArg;
impl SingleTokenArg for CategoryArg {
    fn accepts(value: &str) -> bool {
        match value.strip_prefix('#') {
            Some(rest) => !rest.trim().is_empty(),
            None => false,
        }
    }

    fn new(value: &str) -> Result<Arg> {
        if !Self::accepts(value) {
            return Err(Error::Parse(format!(
                "Invalid category: '{}'. Expected format '#<name>' (e.g., #work or #3).",
                value
            )));
        }
        Ok(Arg::Category(Category::new(&value[1..])?))
    }
}

pub struct TagArg;
impl SingleTokenArg for TagArg {
    fn accepts(value: &str) -> bool {
        match value.strip_prefix('+') {
            Some(rest) => !rest.is_empty() && !rest.starts_with('+'),
            None => false,
        }
    }

    fn new(value: &str) -> Result<Arg> {
        if !Self::accepts(value) {
            return Err(Error::Parse(format!(
                "Invalid tag: '{}'. Expected format '+<tag>' (e.g., +deep-work).",
                value
            )));
        }
        Ok(Arg::Tag(value[1..].to_string()))
    }
}

pub struct TimeArg;
impl SingleTokenArg for TimeArg {
    fn accepts(value: &str) -> bool {
        ClockTime::try_from_str(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Time(ClockTime::try_from_str(value)?))
    }
}

pub struct DateArg;
impl SingleTokenArg for DateArg {
    fn accepts(value: &str) -> bool {
        Date::try_from_str(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Date(Date::try_from_str(value)?))
    }
}

/// Bare identifier such as `reset`; tried last.
pub struct WordArg;
impl SingleTokenArg for WordArg {
    fn accepts(value: &str) -> bool {
        let mut chars = value.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            }
            _ => false,
        }
    }
    fn new(value: &str) -> Result<Arg> {
        if !Self::accepts(value) {
            return Err(Error::Parse(format!(
                "Invalid word: '{}'. Expected letters, digits, '-' or '_'.",
                value
            )));
        }
        Ok(Arg::Word(value.to_string()))
    }
}
