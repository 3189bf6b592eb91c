use http::header::{HeaderName, HeaderValue};

use super::Handler;
use crate::error::RuleError;
use crate::matcher::is_host_pseudo_header;
use crate::rule::{Phase, RawRule, Rule, RuleKind};
use crate::target::{HeaderTarget, HostUpdate};

pub(super) static HANDLER: Handler = Handler { validate, apply };

/// Pattern checks happen in [`Rule::compile`]; a rename only adds the
/// destination requirement.
fn validate(raw: &RawRule) -> Result<(), RuleError> {
    if raw.value.is_empty() {
        return Err(RuleError::MissingValue(RuleKind::Rename));
    }

    Ok(())
}

/// Move every matching header to the expanded destination name
///
/// A destination of `Host` goes to the transport host field when the target
/// has one. Destinations equal to the source name are skipped, so applying
/// a rule to its own output changes nothing.
fn apply(rule: &Rule, target: &mut dyn HeaderTarget, _phase: Phase) -> usize {
    let pattern = rule.pattern();
    let mut renamed = 0;

    for source in pattern.matching_names(target.headers()) {
        let Some(destination) = pattern.expand(&source, rule.value()) else {
            continue;
        };

        if destination.eq_ignore_ascii_case(source.as_str()) {
            continue;
        }

        if is_host_pseudo_header(&destination) {
            let Some(host) = target.headers().get(&source).cloned() else {
                continue;
            };
            match target.set_host(&host) {
                HostUpdate::Updated => {
                    target.headers_mut().remove(&source);
                    renamed += 1;
                    continue;
                }
                HostUpdate::Rejected => continue,
                HostUpdate::Unsupported => {}
            }
        }

        let Ok(destination) = HeaderName::from_bytes(destination.as_bytes()) else {
            tracing::warn!(
                rule = rule.name(),
                source = %source,
                destination = %destination,
                "skipping rename: destination is not a valid header name"
            );
            continue;
        };

        let headers = target.headers_mut();
        let values: Vec<HeaderValue> = headers.get_all(&source).iter().cloned().collect();
        if values.is_empty() {
            continue;
        }

        headers.remove(&source);
        headers.remove(&destination);
        for value in values {
            headers.append(&destination, value);
        }
        renamed += 1;
    }

    renamed
}
