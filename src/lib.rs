//! Throttled, OAuth 1.0a-signed Twitter REST client.
//!
//! Each [`Client`] owns one dispatcher task that executes calls strictly one at a time, keeps a
//! configurable delay between consecutive calls, and routes every result back to the caller that
//! submitted it.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod ext;
pub mod http;
pub mod obs;
pub mod request;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use tokio::time::{self, Instant};
	// self
	use crate::{
		auth::ConsumerCredentials,
		client::Client,
		config::ClientConfig,
		ext::BearerSigner,
		http::{HttpTransport, RawResponse, TransportFuture},
		request::{ApiRequest, Form, Method},
	};

	type Responder = Box<dyn Fn(&ApiRequest) -> RawResponse + Send + Sync>;

	/// One call observed by [`RecordingTransport`].
	#[derive(Clone, Debug)]
	pub struct RecordedCall {
		/// HTTP verb.
		pub method: Method,
		/// Request URL as handed to the transport.
		pub url: Url,
		/// Form parameters.
		pub form: Form,
		/// `Authorization` header value produced by the signer.
		pub authorization: String,
		/// Instant the transport was entered.
		pub at: Instant,
	}

	/// In-process transport that records every call and answers from a closure.
	pub struct RecordingTransport {
		calls: Mutex<Vec<RecordedCall>>,
		respond: Responder,
		latency: Duration,
		in_flight: AtomicUsize,
		max_in_flight: AtomicUsize,
	}
	impl RecordingTransport {
		/// Answers 200 with a JSON object mapping each form key to its first value.
		pub fn echo() -> Self {
			Self::responding(|request| {
				let body = request
					.form()
					.pairs()
					.map(|(k, v)| (k.to_owned(), serde_json::Value::String(v.to_owned())))
					.collect::<serde_json::Map<_, _>>();

				RawResponse::new(200, serde_json::Value::Object(body).to_string())
			})
		}

		/// Answers every call with `respond`.
		pub fn responding<F>(respond: F) -> Self
		where
			F: 'static + Send + Sync + Fn(&ApiRequest) -> RawResponse,
		{
			Self {
				calls: Mutex::new(Vec::new()),
				respond: Box::new(respond),
				latency: Duration::ZERO,
				in_flight: AtomicUsize::new(0),
				max_in_flight: AtomicUsize::new(0),
			}
		}

		/// Delays every answer by `latency`.
		pub fn with_latency(mut self, latency: Duration) -> Self {
			self.latency = latency;

			self
		}

		/// Calls observed so far, in arrival order.
		pub fn calls(&self) -> Vec<RecordedCall> {
			self.calls.lock().clone()
		}

		/// Most recent call.
		pub fn last_call(&self) -> RecordedCall {
			self.calls.lock().last().cloned().expect("Transport should have been called.")
		}

		/// Highest number of calls observed in flight at once.
		pub fn max_in_flight(&self) -> usize {
			self.max_in_flight.load(Ordering::SeqCst)
		}
	}
	impl HttpTransport for RecordingTransport {
		fn send<'a>(
			&'a self,
			request: &'a ApiRequest,
			authorization: String,
		) -> TransportFuture<'a> {
			Box::pin(async move {
				let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

				self.max_in_flight.fetch_max(current, Ordering::SeqCst);
				self.calls.lock().push(RecordedCall {
					method: request.method(),
					url: request.url().clone(),
					form: request.form().clone(),
					authorization,
					at: Instant::now(),
				});

				if !self.latency.is_zero() {
					time::sleep(self.latency).await;
				}

				self.in_flight.fetch_sub(1, Ordering::SeqCst);

				Ok((self.respond)(request))
			})
		}
	}

	/// Builds a validated configuration rooted at `api_base`.
	pub fn test_config(api_base: &str, delay: Duration) -> ClientConfig {
		ClientConfig::builder(ConsumerCredentials::new("consumer-key", "consumer-secret"))
			.api_base(api_base)
			.delay(delay)
			.build()
			.expect("Test configuration should build.")
	}

	/// Builds a client over an echoing [`RecordingTransport`].
	pub fn recording_client(delay: Duration) -> (Client, Arc<RecordingTransport>) {
		recording_client_over(delay, RecordingTransport::echo())
	}

	/// Builds a client whose transport answers with `respond`.
	pub fn recording_client_with<F>(
		delay: Duration,
		respond: F,
	) -> (Client, Arc<RecordingTransport>)
	where
		F: 'static + Send + Sync + Fn(&ApiRequest) -> RawResponse,
	{
		recording_client_over(delay, RecordingTransport::responding(respond))
	}

	fn recording_client_over(
		delay: Duration,
		transport: RecordingTransport,
	) -> (Client, Arc<RecordingTransport>) {
		let transport = Arc::new(transport);
		let client = Client::with_parts(
			test_config("https://api.twitter.com/1.1", delay),
			transport.clone(),
			Arc::new(BearerSigner::new("app-token")),
		)
		.expect("Test client should start inside a runtime.");

		(client, transport)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use client::Client;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
