use crate::arg::args::Arg;
use crate::core::types::Flag;
use crate::errors::Error;

#[derive(Debug)]
pub enum FlagDecision {
    /// Stop execution and just print usage()
    ShortCircuitUsage,
    /// Continue command execution
    Continue,
    /// Turn into an error
    Error(Error),
}

pub trait FlagRule {
    fn check(&self, args: &[Arg]) -> FlagDecision;
}

pub struct HelpAtIdx(pub usize);

impl FlagRule for HelpAtIdx {
    fn check(&self, args: &[Arg]) -> FlagDecision {
        match args.get(self.0) {
            Some(Arg::Flag(Flag::Help)) => FlagDecision::ShortCircuitUsage,
            _ => FlagDecision::Continue,
        }
    }
}

/// For bare commands such as `next` or `stats`.
pub struct NoArgs;

impl FlagRule for NoArgs {
    fn check(&self, args: &[Arg]) -> FlagDecision {
        match args.first() {
            None => FlagDecision::Continue,
            Some(extra) => FlagDecision::Error(Error::parse(format!(
                "Unexpected argument {extra}; this command takes none. Use -h for usage."
            ))),
        }
    }
}

pub struct FlagPolicy {
    rules: Vec<Box<dyn FlagRule>>,
}

impl FlagPolicy {
    pub fn new(rules: Vec<Box<dyn FlagRule>>) -> Self {
        Self { rules }
    }

    pub fn none() -> Self {
        Self { rules: vec![] }
    }

    pub fn evaluate(&self, args: &[Arg]) -> FlagDecision {
        // First non-Continue decision wins.
        for r in &self.rules {
            match r.check(args) {
                FlagDecision::Continue => continue,
                other => return other,
            }
        }
        FlagDecision::Continue
    }
}
