// self
use crate::{_prelude::*, request::Method};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Span wrapping one execution on the dispatcher.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the request method + endpoint path.
	pub fn new(method: Method, endpoint: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let method = method.as_str();
			let span = tracing::debug_span!("twitter_dispatch.request", method, endpoint);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, endpoint);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Notes that the dispatcher is about to sleep before the next dequeue.
pub fn throttle_sleep(remaining: Duration, delay: Duration) {
	#[cfg(feature = "tracing")]
	tracing::debug!(
		remaining_ms = remaining.as_millis() as u64,
		delay_ms = delay.as_millis() as u64,
		"throttling dispatcher"
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (remaining, delay);
}

/// Notes that every client handle is gone and the dispatcher loop returned.
pub fn dispatcher_stopped() {
	#[cfg(feature = "tracing")]
	tracing::debug!("request dispatcher stopped");
}
