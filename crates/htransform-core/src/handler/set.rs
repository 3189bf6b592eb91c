use http::header::{HeaderName, HeaderValue};

use super::Handler;
use crate::error::RuleError;
use crate::rule::{Phase, RawRule, Rule};
use crate::target::HeaderTarget;

pub(super) static HANDLER: Handler = Handler { validate, apply };

fn validate(raw: &RawRule) -> Result<(), RuleError> {
    HeaderName::from_bytes(raw.header.as_bytes())
        .map_err(|_| RuleError::InvalidRule(format!("`{}` is not a valid header name", raw.header)))?;
    HeaderValue::from_str(&raw.value)
        .map_err(|_| RuleError::InvalidRule(format!("`{}` is not a valid header value", raw.value)))?;

    Ok(())
}

/// Overwrite the header with the configured value
///
/// Counts as a change only when the header did not already hold exactly
/// that single value.
fn apply(rule: &Rule, target: &mut dyn HeaderTarget, _phase: Phase) -> usize {
    let (Some(name), Some(value)) = (rule.header_name(), rule.header_value()) else {
        return 0;
    };

    let headers = target.headers_mut();
    let mut existing = headers.get_all(name).iter();
    if existing.next() == Some(value) && existing.next().is_none() {
        return 0;
    }

    headers.insert(name.clone(), value.clone());
    1
}
