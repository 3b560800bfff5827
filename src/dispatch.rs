//! Serialized, throttled request dispatcher.
//!
//! Every [`Client`](crate::Client) owns one dispatcher task. Callers hand it a [`Job`] through a
//! bounded queue and wait on a private reply channel; the task executes jobs strictly one at a
//! time, in arrival order, and keeps at least the configured delay between the starts of two
//! consecutive executions. The delay is shared with the client handle and may be changed at any
//! time; the new value applies from the next sleep on.

// crates.io
use tokio::{
	runtime::Handle,
	sync::{mpsc, oneshot},
	time::{self, Instant},
};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	exec::{Decoder, Executor},
	http::RawResponse,
	obs::{self, RequestOutcome, RequestSpan},
	request::ApiRequest,
};

// Callers block on the handoff until the dispatcher is ready for the next job.
const QUEUE_CAPACITY: usize = 1;

type Completion = Box<dyn FnOnce(Result<RawResponse>) + Send>;

/// One queued request and the continuation that routes its result back to the caller.
pub struct Job {
	request: ApiRequest,
	complete: Completion,
}
impl Job {
	/// Pairs a request with the closure receiving its raw result.
	pub fn new<F>(request: ApiRequest, complete: F) -> Self
	where
		F: 'static + Send + FnOnce(Result<RawResponse>),
	{
		Self { request, complete: Box::new(complete) }
	}
}
impl Debug for Job {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Job").field("request", &self.request).finish_non_exhaustive()
	}
}

/// Inter-request delay shared between the dispatcher task and client handles.
#[derive(Clone, Debug, Default)]
pub struct Throttle(Arc<Mutex<Duration>>);
impl Throttle {
	/// Creates a throttle with the initial delay.
	pub fn new(delay: Duration) -> Self {
		Self(Arc::new(Mutex::new(delay)))
	}

	/// Current delay.
	pub fn get(&self) -> Duration {
		*self.0.lock()
	}

	/// Replaces the delay; zero disables throttling.
	pub fn set(&self, delay: Duration) {
		*self.0.lock() = delay;
	}
}

/// Handle to a running dispatcher task.
///
/// Clones share the queue and the throttle. The task stops once every handle is dropped and
/// the jobs already queued have been executed.
#[derive(Clone, Debug)]
pub struct Dispatcher {
	queue: mpsc::Sender<Job>,
	throttle: Throttle,
}
impl Dispatcher {
	/// Spawns the dispatcher loop on the ambient tokio runtime.
	pub fn spawn(executor: Executor, delay: Duration) -> Result<Self, ConfigError> {
		let handle = Handle::try_current().map_err(|_| ConfigError::MissingRuntime)?;
		let (queue, jobs) = mpsc::channel(QUEUE_CAPACITY);
		let throttle = Throttle::new(delay);

		handle.spawn(run(executor, jobs, throttle.clone()));

		Ok(Self { queue, throttle })
	}

	/// Queues `request` and waits for its decoded result.
	///
	/// Decoding happens on the dispatcher right after execution, so a caller that stops waiting
	/// does not cancel the request: it is still executed and counted against the delay.
	pub async fn submit<D>(&self, request: ApiRequest, decoder: D) -> Result<D::Output>
	where
		D: Decoder,
	{
		let (reply, response) = oneshot::channel();
		let url = request.url().clone();
		let job = Job::new(request, move |result| {
			let _ = reply.send(result.and_then(|raw| decoder.decode(&url, raw)));
		});

		self.enqueue(job).await?;

		response.await.map_err(|_| Error::DispatcherClosed)?
	}

	/// Hands a prepared job to the dispatcher.
	pub async fn enqueue(&self, job: Job) -> Result<()> {
		self.queue.send(job).await.map_err(|_| Error::DispatcherClosed)
	}

	/// Current inter-request delay.
	pub fn delay(&self) -> Duration {
		self.throttle.get()
	}

	/// Changes the inter-request delay.
	pub fn set_delay(&self, delay: Duration) {
		self.throttle.set(delay);
	}
}

async fn run(executor: Executor, mut jobs: mpsc::Receiver<Job>, throttle: Throttle) {
	while let Some(Job { request, complete }) = jobs.recv().await {
		let started = Instant::now();
		let method = request.method();

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let span = RequestSpan::new(method, request.endpoint());
		let result = span.instrument(executor.execute(&request)).await;

		obs::record_request_outcome(method, RequestOutcome::of(&result));
		complete(result);

		let delay = throttle.get();

		if let Some(remaining) = delay.checked_sub(started.elapsed()).filter(|d| !d.is_zero()) {
			obs::throttle_sleep(remaining, delay);
			time::sleep(remaining).await;
		}
	}

	obs::dispatcher_stopped();
}

#[cfg(test)]
mod tests {
	// crates.io
	use tokio::task::JoinSet;
	// self
	use super::*;
	use crate::{
		_preludet::*,
		config::ClientConfig,
		error::ApiError,
		exec::{Empty, Json},
		ext::BearerSigner,
		request::Form,
	};

	#[derive(Debug, Deserialize)]
	struct Echo {
		id: String,
	}

	fn dispatcher(transport: Arc<RecordingTransport>, delay: Duration) -> Dispatcher {
		Dispatcher::spawn(Executor::new(transport, Arc::new(BearerSigner::new("t"))), delay)
			.expect("Dispatcher should spawn inside a runtime.")
	}

	fn request(id: usize) -> ApiRequest {
		let url = Url::parse("https://api.twitter.com/1.1/statuses/show.json")
			.expect("Test URL should parse.");

		ApiRequest::get(url, Some(Form::new().with("id", id.to_string())))
	}

	fn gaps(calls: &[RecordedCall]) -> Vec<Duration> {
		calls.windows(2).map(|pair| pair[1].at.duration_since(pair[0].at)).collect()
	}

	#[test]
	fn spawning_without_runtime_fails() {
		let transport = Arc::new(RecordingTransport::echo());
		let executor = Executor::new(transport, Arc::new(BearerSigner::new("t")));
		let err = Dispatcher::spawn(executor, Duration::ZERO)
			.expect_err("No runtime is running in a plain test.");

		assert!(matches!(err, ConfigError::MissingRuntime));
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_callers_receive_their_own_results() {
		let transport = Arc::new(RecordingTransport::echo());
		let dispatcher = dispatcher(transport.clone(), Duration::ZERO);
		let mut set = JoinSet::new();

		for id in 0..16 {
			let dispatcher = dispatcher.clone();

			set.spawn(async move {
				let echo = dispatcher
					.submit(request(id), Json::<Echo>::new())
					.await
					.expect("Echo request should succeed.");

				(id, echo.id)
			});
		}

		while let Some(joined) = set.join_next().await {
			let (id, echoed) = joined.expect("Caller task should not panic.");

			assert_eq!(echoed, id.to_string());
		}

		assert_eq!(transport.calls().len(), 16);
		assert_eq!(transport.max_in_flight(), 1);
	}

	#[tokio::test]
	async fn starts_are_spaced_by_the_delay() {
		let transport = Arc::new(RecordingTransport::echo());
		let dispatcher = dispatcher(transport.clone(), Duration::from_millis(40));
		let (a, b, c) = tokio::join!(
			dispatcher.submit(request(1), Empty),
			dispatcher.submit(request(2), Empty),
			dispatcher.submit(request(3), Empty),
		);

		a.and(b).and(c).expect("Every request should succeed.");

		for gap in gaps(&transport.calls()) {
			assert!(gap >= Duration::from_millis(35), "{gap:?}");
		}
	}

	#[tokio::test]
	async fn join_order_is_execution_order() {
		let transport = Arc::new(RecordingTransport::echo());
		let dispatcher = dispatcher(transport.clone(), Duration::from_millis(5));
		let _ = tokio::join!(
			dispatcher.submit(request(1), Empty),
			dispatcher.submit(request(2), Empty),
			dispatcher.submit(request(3), Empty),
		);
		let order = transport
			.calls()
			.iter()
			.filter_map(|call| call.form.get("id").map(str::to_owned))
			.collect::<Vec<_>>();

		assert_eq!(order, ["1", "2", "3"]);
	}

	#[tokio::test]
	async fn zero_delay_runs_back_to_back() {
		let transport = Arc::new(RecordingTransport::echo());
		let dispatcher = dispatcher(transport.clone(), Duration::ZERO);
		let started = Instant::now();

		for id in 0..5 {
			dispatcher.submit(request(id), Empty).await.expect("Echo request should succeed.");
		}

		assert!(started.elapsed() < Duration::from_secs(1));
		assert_eq!(transport.calls().len(), 5);
	}

	#[tokio::test]
	async fn failures_do_not_stop_the_loop() {
		let transport = Arc::new(RecordingTransport::responding(|request| {
			match request.form().get("id") {
				Some("1") => RawResponse::new(503, "not json"),
				_ => RawResponse::new(200, r#"{"id":"ok"}"#),
			}
		}));
		let dispatcher = dispatcher(transport.clone(), Duration::ZERO);
		let err = dispatcher
			.submit(request(1), Json::<Echo>::new())
			.await
			.expect_err("503 should surface to the caller.");

		assert!(matches!(err, Error::Api(ApiError { status: 503, .. })));

		let echo = dispatcher
			.submit(request(2), Json::<Echo>::new())
			.await
			.expect("Dispatcher should keep serving after a failure.");

		assert_eq!(echo.id, "ok");
	}

	#[tokio::test]
	async fn delay_changes_apply_to_the_next_sleep() {
		let transport = Arc::new(RecordingTransport::echo());
		let dispatcher = dispatcher(transport.clone(), ClientConfig::DEFAULT_DELAY);

		assert_eq!(dispatcher.delay(), ClientConfig::DEFAULT_DELAY);

		dispatcher.set_delay(Duration::ZERO);
		dispatcher.submit(request(1), Empty).await.expect("First request should succeed.");

		let started = Instant::now();

		dispatcher.submit(request(2), Empty).await.expect("Second request should succeed.");

		assert!(started.elapsed() < Duration::from_secs(1));
		assert_eq!(dispatcher.delay(), Duration::ZERO);
	}

	#[tokio::test]
	async fn raising_the_delay_mid_sleep_does_not_extend_it() {
		let transport = Arc::new(RecordingTransport::echo());
		let dispatcher = dispatcher(transport.clone(), Duration::from_millis(100));

		dispatcher.submit(request(1), Empty).await.expect("First request should succeed.");
		time::sleep(Duration::from_millis(10)).await;
		dispatcher.set_delay(Duration::from_secs(1));
		dispatcher.submit(request(2), Empty).await.expect("Second request should succeed.");

		let gap = gaps(&transport.calls())[0];

		assert!(gap >= Duration::from_millis(95), "{gap:?}");
		assert!(gap < Duration::from_millis(500), "{gap:?}");
	}

	#[tokio::test]
	async fn slow_executions_are_followed_without_catch_up() {
		let transport =
			Arc::new(RecordingTransport::echo().with_latency(Duration::from_millis(120)));
		let dispatcher = dispatcher(transport.clone(), Duration::from_millis(50));
		let (a, b) = tokio::join!(
			dispatcher.submit(request(1), Empty),
			dispatcher.submit(request(2), Empty),
		);

		a.and(b).expect("Both requests should succeed.");

		let gap = gaps(&transport.calls())[0];

		assert!(gap >= Duration::from_millis(115), "{gap:?}");
		assert!(gap < Duration::from_millis(200), "{gap:?}");
	}

	#[tokio::test]
	async fn abandoned_requests_still_execute_and_throttle() {
		let transport =
			Arc::new(RecordingTransport::echo().with_latency(Duration::from_millis(50)));
		let dispatcher = dispatcher(transport.clone(), Duration::from_millis(80));
		let abandoned =
			time::timeout(Duration::from_millis(10), dispatcher.submit(request(1), Empty)).await;

		assert!(abandoned.is_err());

		dispatcher.submit(request(2), Empty).await.expect("Second request should succeed.");

		let calls = transport.calls();

		assert_eq!(calls.len(), 2);
		assert!(gaps(&calls)[0] >= Duration::from_millis(75));
	}

	#[tokio::test]
	async fn query_rejection_reaches_only_its_caller() {
		let transport = Arc::new(RecordingTransport::echo());
		let dispatcher = dispatcher(transport.clone(), Duration::ZERO);
		let url = Url::parse("https://api.twitter.com/1.1/statuses/show.json?id=1")
			.expect("Test URL should parse.");
		let err = dispatcher
			.submit(ApiRequest::get(url, None), Empty)
			.await
			.expect_err("Query URLs are rejected.");

		assert!(matches!(err, Error::Config(ConfigError::QueryInUrl { .. })));

		dispatcher.submit(request(1), Empty).await.expect("Next request should succeed.");

		assert_eq!(transport.calls().len(), 1);
	}
}
