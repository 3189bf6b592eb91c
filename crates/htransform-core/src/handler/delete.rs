use super::Handler;
use crate::error::RuleError;
use crate::rule::{Phase, RawRule, Rule};
use crate::target::HeaderTarget;

pub(super) static HANDLER: Handler = Handler { validate, apply };

/// Nothing beyond the checks every rule goes through
#[allow(clippy::unnecessary_wraps)]
const fn validate(_raw: &RawRule) -> Result<(), RuleError> {
    Ok(())
}

/// Remove the targeted header
///
/// Response deletes target the rule's logical `name`; request deletes
/// target its `header`. Deleting an absent header is a no-op.
fn apply(rule: &Rule, target: &mut dyn HeaderTarget, phase: Phase) -> usize {
    let name = match phase {
        Phase::Request => rule.header_name(),
        Phase::Response => rule.name_as_header(),
    };
    let Some(name) = name else {
        return 0;
    };

    let headers = target.headers_mut();
    let removed = headers.get_all(name).iter().count();
    headers.remove(name);
    removed
}
