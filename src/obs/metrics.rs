// self
use crate::{obs::RequestOutcome, request::Method};

/// Records a request outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(method: Method, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"twitter_dispatch_request_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}
