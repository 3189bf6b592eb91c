use crate::error::{BuildError, RuleError};
use crate::handler::handler;
use crate::rule::{Phase, RawRule, Rule, RuleKind};
use crate::target::HeaderTarget;

/// Summary of one pass over a header collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
    /// Rules that ran in this phase
    pub rules: usize,
    /// Header entries changed across all rules
    pub changed: usize,
}

impl Applied {
    /// No rule changed anything
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.changed == 0
    }
}

/// Ordered, validated rule list executed against each exchange
///
/// Built once from configuration and read-only afterwards, so a single
/// instance can be shared by any number of concurrent exchanges.
#[derive(Debug, Default)]
pub struct Dispatcher {
    rules: Vec<Rule>,
}

impl Dispatcher {
    /// Validate and compile every rule, in order
    ///
    /// # Errors
    ///
    /// Fails on the first rule with an unknown type or that its handler
    /// rejects. No dispatcher is returned for a partially valid rule set.
    pub fn build<'a, I>(raw_rules: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = &'a RawRule>,
    {
        let mut rules = Vec::new();

        for (index, raw) in raw_rules.into_iter().enumerate() {
            let rule = compile(raw).map_err(|error| BuildError {
                index,
                name: raw.name.clone(),
                error,
            })?;

            tracing::debug!(
                index,
                name = rule.name(),
                kind = %rule.kind(),
                header = rule.header(),
                phase = %rule.phase(),
                "compiled header rule"
            );

            rules.push(rule);
        }

        Ok(Self { rules })
    }

    /// Rules in configured order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every request-phase rule against the incoming request
    pub fn apply_to_request<T: HeaderTarget>(&self, request: &mut T) -> Applied {
        self.apply(Phase::Request, request)
    }

    /// Run every response-phase rule against the outgoing response
    pub fn apply_to_response<T: HeaderTarget>(&self, response: &mut T) -> Applied {
        self.apply(Phase::Response, response)
    }

    fn apply(&self, phase: Phase, target: &mut dyn HeaderTarget) -> Applied {
        let mut applied = Applied::default();

        for rule in self.rules.iter().filter(|rule| rule.phase() == phase) {
            let changed = (handler(rule.kind()).apply)(rule, target, phase);

            if changed > 0 {
                tracing::trace!(
                    name = rule.name(),
                    kind = %rule.kind(),
                    header = rule.header(),
                    %phase,
                    changed,
                    "header rule applied"
                );
            }

            applied.rules += 1;
            applied.changed += changed;
        }

        applied
    }
}

fn compile(raw: &RawRule) -> Result<Rule, RuleError> {
    let kind: RuleKind = raw
        .kind
        .parse()
        .map_err(|_| RuleError::UnknownRuleType(raw.kind.clone()))?;

    let rule = Rule::compile(raw, kind)?;
    (handler(kind).validate)(raw)?;

    Ok(rule)
}
