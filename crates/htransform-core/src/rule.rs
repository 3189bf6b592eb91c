use http::header::{HeaderName, HeaderValue};
use serde::Deserialize;

use crate::error::RuleError;
use crate::matcher::HeaderPattern;

/// Rule descriptor as it arrives from configuration
///
/// Nothing is checked here; [`crate::Dispatcher::build`] validates and
/// compiles descriptors into [`Rule`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRule {
    /// Logical name of the rule, used in logs and by response-side deletes
    #[serde(default)]
    pub name: String,
    /// Rule type (`Rename`, `Delete`, `Set`), case-insensitive
    #[serde(rename = "type")]
    pub kind: String,
    /// Header name or header name pattern
    #[serde(default)]
    pub header: String,
    /// Destination name for renames, assigned value for sets
    #[serde(default)]
    pub value: String,
    /// Apply to the response instead of the request
    #[serde(default, alias = "setOnResponse")]
    pub set_on_response: bool,
}

impl RawRule {
    fn new(kind: RuleKind, header: &str, value: &str) -> Self {
        Self {
            name: String::new(),
            kind: kind.to_string(),
            header: header.to_owned(),
            value: value.to_owned(),
            set_on_response: false,
        }
    }

    /// Rename headers matching `header` to `destination`
    #[must_use]
    pub fn rename(header: &str, destination: &str) -> Self {
        Self::new(RuleKind::Rename, header, destination)
    }

    /// Delete the header named `header`
    #[must_use]
    pub fn delete(header: &str) -> Self {
        Self::new(RuleKind::Delete, header, "")
    }

    /// Set `header` to `value`, replacing existing values
    #[must_use]
    pub fn set(header: &str, value: &str) -> Self {
        Self::new(RuleKind::Set, header, value)
    }

    /// Attach a logical name
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Move the rule to the response phase
    #[must_use]
    pub fn on_response(mut self) -> Self {
        self.set_on_response = true;
        self
    }
}

/// Closed set of rule kinds, each backed by one handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum RuleKind {
    /// Move matching headers to a new name
    Rename,
    /// Remove a header
    Delete,
    /// Assign a header value
    Set,
}

/// Which half of the exchange a rule runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Incoming request headers
    Request,
    /// Outgoing response headers
    Response,
}

/// Validated, compiled rule
///
/// Immutable once built and safe to share across concurrent exchanges.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    name: String,
    header: String,
    value: String,
    set_on_response: bool,
    pattern: HeaderPattern,
    header_name: Option<HeaderName>,
    name_as_header: Option<HeaderName>,
    header_value: Option<HeaderValue>,
}

impl Rule {
    /// Compile a descriptor whose kind-specific checks already passed
    ///
    /// Enforces the checks shared by every kind: `header` is non-empty and
    /// compiles as a pattern.
    pub(crate) fn compile(raw: &RawRule, kind: RuleKind) -> Result<Self, RuleError> {
        if raw.header.is_empty() {
            return Err(RuleError::InvalidRule("header must not be empty".to_owned()));
        }

        let pattern = HeaderPattern::new(&raw.header).map_err(|source| RuleError::InvalidPattern {
            pattern: raw.header.clone(),
            source,
        })?;

        Ok(Self {
            kind,
            name: raw.name.clone(),
            header: raw.header.clone(),
            value: raw.value.clone(),
            set_on_response: raw.set_on_response,
            pattern,
            header_name: HeaderName::from_bytes(raw.header.as_bytes()).ok(),
            name_as_header: HeaderName::from_bytes(raw.name.as_bytes()).ok(),
            header_value: HeaderValue::from_str(&raw.value).ok(),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn set_on_response(&self) -> bool {
        self.set_on_response
    }

    /// Phase this rule runs in
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.set_on_response { Phase::Response } else { Phase::Request }
    }

    /// Compiled form of `header`
    #[must_use]
    pub const fn pattern(&self) -> &HeaderPattern {
        &self.pattern
    }

    /// `header` read as a literal header name, if it is one
    #[must_use]
    pub const fn header_name(&self) -> Option<&HeaderName> {
        self.header_name.as_ref()
    }

    /// Logical `name` read as a literal header name, if it is one
    #[must_use]
    pub const fn name_as_header(&self) -> Option<&HeaderName> {
        self.name_as_header.as_ref()
    }

    /// `value` read as a header value, if it is one
    #[must_use]
    pub const fn header_value(&self) -> Option<&HeaderValue> {
        self.header_value.as_ref()
    }
}
