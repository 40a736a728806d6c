//! Observability for token and rating flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `ups_rates.flow` with the `flow` (token or
//!   rating) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `ups_rates_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.
//!
//! [`DebugLog`] is always available and writes the operator-facing per-day debug file when
//! the module's debug setting is on.

mod debug_log;
mod metrics;
mod tracing;

pub use debug_log::*;
pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Carrier round trips observed by the module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// OAuth client-credentials token request.
	Token,
	/// Rate-shop request.
	Rating,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Token => "token",
			FlowKind::Rating => "rating",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Cached value reused without a round trip.
	Reused,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Reused => "reused",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
