//! Header transformation engine
//!
//! Rules rename, set, or delete HTTP headers on the request and, when
//! flagged, on the response. A [`Dispatcher`] is built once from raw rule
//! descriptors, rejecting malformed rules up front, and then applied to
//! every exchange in configured order. Applying rules never fails: a rule
//! that does not match simply leaves the headers alone.

mod dispatcher;
mod error;
mod handler;
mod matcher;
mod rule;
mod target;

pub use dispatcher::{Applied, Dispatcher};
pub use error::{BuildError, RuleError};
pub use matcher::{HeaderPattern, is_host_pseudo_header};
pub use rule::{Phase, RawRule, Rule, RuleKind};
pub use target::{HeaderTarget, HostUpdate};
