//! Optional observability helpers for the dispatcher.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `twitter_dispatch.request` with the `method`
//!   and `endpoint` fields, plus `debug` events for throttle sleeps and dispatcher shutdown.
//! - Enable `metrics` to increment the `twitter_dispatch_request_total` counter for every
//!   attempt/success/failure, labeled by `method` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each executed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// The dispatcher dequeued the request.
	Attempt,
	/// The remote service answered 2xx.
	Success,
	/// Any error propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}

	/// Maps a request result to its outcome label.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
