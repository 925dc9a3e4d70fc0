use super::flag_policy::{FlagDecision, FlagPolicy, FlagRule, HelpAtIdx, NoArgs};
use crate::arg::args::Arg;
use crate::core::types::Flag;
use crate::errors::Error;

struct AlwaysError;
impl FlagRule for AlwaysError {
    fn check(&self, _: &[Arg]) -> FlagDecision {
        FlagDecision::Error(Error::parse("boom"))
    }
}

#[test]
fn help_rule_short_circuits_by_position() {
    let policy = FlagPolicy::new(vec![Box::new(HelpAtIdx(1))]);
    let args = vec![Arg::Int(3), Arg::Flag(Flag::Help)];
    assert!(matches!(
        policy.evaluate(&args),
        FlagDecision::ShortCircuitUsage
    ));
    assert!(matches!(policy.evaluate(&args[1..]), FlagDecision::Continue));
}

#[test]
fn policy_defaults_to_continue_when_no_rules_trigger() {
    let policy = FlagPolicy::none();
    assert!(matches!(policy.evaluate(&[]), FlagDecision::Continue));
}

#[test]
fn first_rule_wins_in_order() {
    let policy = FlagPolicy::new(vec![Box::new(AlwaysError), Box::new(HelpAtIdx(0))]);
    let args = vec![Arg::Flag(Flag::Help)];
    match policy.evaluate(&args) {
        FlagDecision::Error(Error::Parse(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected error from first rule, got {other:?}"),
    }
}

#[test]
fn no_args_rule_lets_help_through_first() {
    let policy = FlagPolicy::new(vec![Box::new(HelpAtIdx(0)), Box::new(NoArgs)]);
    assert!(matches!(policy.evaluate(&[]), FlagDecision::Continue));
    assert!(matches!(
        policy.evaluate(&[Arg::Flag(Flag::Help)]),
        FlagDecision::ShortCircuitUsage
    ));
    match policy.evaluate(&[Arg::Int(2)]) {
        FlagDecision::Error(Error::Parse(msg)) => {
            assert!(msg.starts_with("Unexpected argument 2;"))
        }
        other => panic!("expected error, got {other:?}"),
    }
}
