//! One handler per [`RuleKind`], looked up through a closed table

mod delete;
mod rename;
mod set;

use crate::error::RuleError;
use crate::rule::{Phase, RawRule, Rule, RuleKind};
use crate::target::HeaderTarget;

/// Uniform validate/apply contract shared by every rule kind
///
/// `validate` runs after the checks shared by every kind have passed.
/// `apply` returns how many header entries it changed; zero means the rule
/// did not match and left the target untouched.
#[derive(Debug)]
pub(crate) struct Handler {
    pub validate: fn(&RawRule) -> Result<(), RuleError>,
    pub apply: fn(&Rule, &mut dyn HeaderTarget, Phase) -> usize,
}

pub(crate) fn handler(kind: RuleKind) -> &'static Handler {
    match kind {
        RuleKind::Rename => &rename::HANDLER,
        RuleKind::Delete => &delete::HANDLER,
        RuleKind::Set => &set::HANDLER,
    }
}
