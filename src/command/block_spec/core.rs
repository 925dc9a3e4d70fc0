use crate::arg::arg_extractor::ArgExtractor;
use crate::arg::arg_matcher::ArgMatcher;
use crate::arg::args::Arg;
use crate::core::context::AppContext;
use crate::core::types::BlockCommand;
use crate::errors::{Error, Result};
use std::fmt::Display;

pub type ArgPattern = Vec<ArgSlot>;

/// One position in an argument pattern.
pub struct ArgSlot {
    matcher: fn(&Arg) -> Result<()>,
    validator: Option<Box<dyn Fn(&Arg, &AppContext) -> Result<()>>>,
    optional: bool,
    repeated: bool,
}

#[derive(Debug)]
pub enum SlotMatch {
    Match,
    KindMismatch(Error),
    ValidatorFail(Error),
}

impl ArgSlot {
    pub fn is_of_arg_type<A: ArgMatcher + ?Sized>() -> Self {
        Self {
            matcher: |a| {
                if A::matches_variant(a) {
                    Ok(())
                } else {
                    Err(A::expected_error(a))
                }
            },
            validator: None,
            optional: false,
            repeated: false,
        }
    }

    pub fn classify(&self, actual: &Arg, ctx: &AppContext) -> SlotMatch {
        match (self.matcher)(actual) {
            Err(e) => SlotMatch::KindMismatch(e),
            Ok(()) => match &self.validator {
                Some(v) => match v(actual, ctx) {
                    Ok(()) => SlotMatch::Match,
                    Err(e) => SlotMatch::ValidatorFail(e),
                },
                None => SlotMatch::Match,
            },
        }
    }

    #[inline]
    pub fn kind_matches(&self, actual: &Arg) -> bool {
        (self.matcher)(actual).is_ok()
    }

    pub fn with_validator(mut self, v: impl Fn(&Arg) -> Result<()> + 'static) -> Self {
        self.validator = Some(Box::new(move |a, _ctx: &AppContext| v(a)));
        self
    }

    pub fn with_validator_ctx(
        mut self,
        v: impl Fn(&Arg, &AppContext) -> Result<()> + 'static,
    ) -> Self {
        self.validator = Some(Box::new(v));
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// One or more consecutive args; combine with `optional()` for zero or more.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn is_repeated(&self) -> bool {
        self.repeated
    }
}

#[derive(Debug)]
pub struct ArgMatchFailure {
    position: usize,
    error: Error,
}

pub trait PatternIdExt {
    fn pattern(&self) -> ArgPattern;
}

/// Argument patterns per block command. The first pattern that matches
/// wins; otherwise the failure that got furthest is reported.
pub trait ArgSchema {
    type PatternId: Copy + Eq + PatternIdExt + Display;

    fn patterns_for(&self, command: BlockCommand) -> Vec<Self::PatternId>;

    fn assert_matches_pattern(
        &self,
        ctx: &AppContext,
        args: &[Arg],
        command: BlockCommand,
    ) -> Result<Self::PatternId> {
        let mut deepest: Option<ArgMatchFailure> = None;
        for pid in self.patterns_for(command) {
            match match_pattern(ctx, args, &pid.pattern(), command, &pid) {
                Ok(()) => return Ok(pid),
                Err(fail) => {
                    if deepest.as_ref().map(|d| d.position).unwrap_or(0) <= fail.position {
                        deepest = Some(fail);
                    }
                }
            }
        }

        match deepest {
            Some(f) => Err(f.error),
            None => Err(Error::Parse(
                "No matching pattern of arguments found.".into(),
            )),
        }
    }
}

fn normalize_parse(err: &Error) -> String {
    match err {
        Error::Parse(msg) => msg.trim_end_matches('.').to_string(),
        other => other.to_string(),
    }
}

fn fail(position: usize, msg: String, command: BlockCommand, usage: &dyn Display) -> ArgMatchFailure {
    ArgMatchFailure {
        position,
        error: Error::Parse(format!("{msg}.\nUsage: {command} {usage}")),
    }
}

pub fn match_pattern(
    ctx: &AppContext,
    args: &[Arg],
    pattern: &[ArgSlot],
    command: BlockCommand,
    usage: &dyn Display,
) -> std::result::Result<(), ArgMatchFailure> {
    let mut args_it = args.iter().peekable();
    let mut last_slot_idx = 0;

    for (slot_idx, slot) in pattern.iter().enumerate() {
        last_slot_idx = slot_idx;
        let mut consumed = 0usize;

        loop {
            let Some(arg) = args_it.peek() else {
                break;
            };
            match slot.classify(arg, ctx) {
                SlotMatch::Match => {
                    let _ = args_it.next();
                    consumed += 1;
                    if !slot.is_repeated() {
                        break;
                    }
                }
                SlotMatch::KindMismatch(e) => {
                    if consumed == 0 && !slot.is_optional() {
                        return Err(fail(slot_idx, normalize_parse(&e), command, usage));
                    }
                    break;
                }
                SlotMatch::ValidatorFail(e) => {
                    return Err(fail(slot_idx, normalize_parse(&e), command, usage));
                }
            }
        }

        if consumed == 0 && !slot.is_optional() {
            return Err(fail(
                slot_idx,
                "Missing argument(s)".to_string(),
                command,
                usage,
            ));
        }
    }

    if args_it.peek().is_some() {
        return Err(fail(
            last_slot_idx,
            "Too many arguments provided".to_string(),
            command,
            usage,
        ));
    }

    Ok(())
}

/// Walks args alongside the slots of an already matched pattern.
pub struct ColumnIndexer<'a> {
    args: &'a [Arg],
    slots: &'a [ArgSlot],
    arg_idx: usize,
    slot_idx: usize,
}

impl<'a> ColumnIndexer<'a> {
    pub fn new(args: &'a [Arg], pattern: &'a [ArgSlot]) -> Self {
        Self {
            args,
            slots: pattern,
            arg_idx: 0,
            slot_idx: 0,
        }
    }

    /// Value for the next slot when it holds an `E`; skips an optional slot
    /// whose argument was left out.
    pub fn next_opt<E: ArgExtractor<'a>>(&mut self) -> Option<E::Out> {
        loop {
            let slot = self.slots.get(self.slot_idx)?;
            let Some(a) = self.args.get(self.arg_idx) else {
                self.slot_idx += 1;
                if slot.is_optional() {
                    continue;
                }
                return None;
            };

            if slot.kind_matches(a) {
                if let Some(v) = E::try_extract(a) {
                    self.slot_idx += 1;
                    self.arg_idx += 1;
                    return Some(v);
                }
            }

            if slot.is_optional() && !slot.kind_matches(a) {
                self.slot_idx += 1;
                continue;
            }
            return None;
        }
    }

    pub fn next<E: ArgExtractor<'a>>(&mut self) -> Result<E::Out> {
        self.next_opt::<E>()
            .ok_or_else(|| Error::Parse("Missing required argument.".into()))
    }

    /// Every consecutive value for a repeated slot.
    pub fn take_all<E: ArgExtractor<'a>>(&mut self) -> Vec<E::Out> {
        let mut out = Vec::new();
        if self.slot_idx >= self.slots.len() {
            return out;
        }
        while let Some(a) = self.args.get(self.arg_idx) {
            match E::try_extract(a) {
                Some(v) => {
                    out.push(v);
                    self.arg_idx += 1;
                }
                None => break,
            }
        }
        self.slot_idx += 1;
        out
    }
}
