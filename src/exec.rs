//! Transport executor: validates, signs, sends, and classifies one request.
//!
//! The executor never retries and never logs failures; every outcome is handed back to the
//! dispatcher, which forwards it to the submitting caller untouched.

// std
use std::marker::PhantomData;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ApiError, ConfigError, DecodeError},
	ext::RequestSigner,
	http::{HttpTransport, RawResponse},
	request::ApiRequest,
};

/// Signs and sends requests, turning non-2xx statuses into [`ApiError`]s.
#[derive(Clone)]
pub struct Executor {
	transport: Arc<dyn HttpTransport>,
	signer: Arc<dyn RequestSigner>,
}
impl Executor {
	/// Creates an executor from a transport and a signer.
	pub fn new(transport: Arc<dyn HttpTransport>, signer: Arc<dyn RequestSigner>) -> Self {
		Self { transport, signer }
	}

	/// Executes `request` and returns the undecoded 2xx response.
	///
	/// Fails with [`ConfigError::QueryInUrl`] before signing when the URL already carries a
	/// query component; such requests never reach the transport.
	pub async fn execute(&self, request: &ApiRequest) -> Result<RawResponse> {
		if request.url().query().is_some() {
			return Err(ConfigError::QueryInUrl { url: request.url().to_string() }.into());
		}

		let authorization = self
			.signer
			.authorization(request.method(), request.url(), request.form())
			.map_err(ConfigError::from)?;
		let response = self.transport.send(request, authorization).await?;

		if !response.is_success() {
			return Err(ApiError::from_response(
				response.status,
				request.url(),
				&response.body,
				response.metadata,
			)
			.into());
		}

		Ok(response)
	}
}
impl Debug for Executor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Executor(..)")
	}
}

/// Turns a successful response into the value handed back to the caller.
///
/// Decoding runs on the dispatcher right after the call completes, so the decode target is
/// written exactly once, by exactly one task.
pub trait Decoder
where
	Self: 'static + Send,
{
	/// Value delivered to the caller.
	type Output: 'static + Send;

	/// Decodes `response`, which was returned for `url`.
	fn decode(self, url: &Url, response: RawResponse) -> Result<Self::Output>;
}

/// Decodes the body as JSON into `T`.
pub struct Json<T>(PhantomData<fn() -> T>);
impl<T> Json<T> {
	/// Creates a JSON decoder for `T`.
	pub fn new() -> Self {
		Self(PhantomData)
	}
}
impl<T> Default for Json<T> {
	fn default() -> Self {
		Self::new()
	}
}
impl<T> Decoder for Json<T>
where
	T: 'static + Send + DeserializeOwned,
{
	type Output = T;

	fn decode(self, url: &Url, response: RawResponse) -> Result<T> {
		decode_json(url, &response.body)
	}
}

/// Discards the body; used by operations that only signal success or failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct Empty;
impl Decoder for Empty {
	type Output = ();

	fn decode(self, _: &Url, _: RawResponse) -> Result<()> {
		Ok(())
	}
}

/// Hands back the raw response for media and other non-JSON payloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Raw;
impl Decoder for Raw {
	type Output = RawResponse;

	fn decode(self, _: &Url, response: RawResponse) -> Result<RawResponse> {
		Ok(response)
	}
}

/// Decodes a JSON body, reporting the failing path on mismatch.
pub fn decode_json<T>(url: &Url, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| DecodeError { url: url.to_string(), source }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, ext::BearerSigner, request::Form};

	#[derive(Debug, PartialEq, Deserialize)]
	struct Message {
		text: String,
	}

	fn url(path: &str) -> Url {
		Url::parse(&format!("https://api.twitter.com/1.1{path}")).expect("Test URL should parse.")
	}

	fn executor(transport: Arc<RecordingTransport>) -> Executor {
		Executor::new(transport, Arc::new(BearerSigner::new("token")))
	}

	#[tokio::test]
	async fn query_in_url_is_rejected_before_sending() {
		let transport = Arc::new(RecordingTransport::echo());
		let request = ApiRequest::get(url("/statuses/show.json?id=1"), None);
		let err = executor(transport.clone())
			.execute(&request)
			.await
			.expect_err("URLs with a query cannot be signed.");

		assert!(matches!(err, Error::Config(ConfigError::QueryInUrl { .. })));
		assert!(transport.calls().is_empty());
	}

	#[tokio::test]
	async fn signer_output_reaches_the_transport() {
		let transport = Arc::new(RecordingTransport::echo());
		let form = Form::new().with("text", "hi");
		let request = ApiRequest::post(url("/direct_messages/new.json"), Some(form));

		executor(transport.clone()).execute(&request).await.expect("Echo transport succeeds.");

		let calls = transport.calls();

		assert_eq!(calls.len(), 1);
		assert_eq!(calls[0].authorization, "Bearer token");
		assert_eq!(calls[0].form.get("text"), Some("hi"));
	}

	#[tokio::test]
	async fn non_success_status_becomes_api_error() {
		let transport =
			Arc::new(RecordingTransport::responding(|_| RawResponse::new(503, "not json")));
		let err = executor(transport)
			.execute(&ApiRequest::get(url("/statuses/home_timeline.json"), None))
			.await
			.expect_err("503 must surface as an error.");
		let text = err.to_string();

		assert!(matches!(err, Error::Api(ApiError { status: 503, .. })));
		assert!(text.contains("503") && text.contains("not json"), "{text}");
	}

	#[test]
	fn json_decoder_populates_target() {
		let response = RawResponse::new(200, r#"{"text":"hello"}"#);
		let message = Json::<Message>::new()
			.decode(&url("/x.json"), response)
			.expect("Valid JSON should decode.");

		assert_eq!(message, Message { text: "hello".into() });
	}

	#[test]
	fn decode_errors_report_path_and_are_stable() {
		let body = br#"{"text":7}"#;
		let first = decode_json::<Message>(&url("/x.json"), body).expect_err("Shape mismatch.");
		let second = decode_json::<Message>(&url("/x.json"), body).expect_err("Shape mismatch.");

		match (&first, &second) {
			(Error::Decode(a), Error::Decode(b)) => {
				assert_eq!(a.source.path().to_string(), "text");
				assert_eq!(a.source.to_string(), b.source.to_string());
			},
			other => panic!("Expected decode errors, got {other:?}."),
		}
	}

	#[test]
	fn invalid_json_is_a_decode_error() {
		let err = decode_json::<Message>(&url("/x.json"), b"<html>").expect_err("Not JSON.");

		assert!(matches!(err, Error::Decode(_)));
	}

	#[test]
	fn empty_and_raw_skip_json() {
		let response = RawResponse::new(204, Vec::new());

		Empty.decode(&url("/x.json"), response.clone()).expect("Empty never fails.");

		let raw = Raw.decode(&url("/x.json"), response.clone()).expect("Raw never fails.");

		assert_eq!(raw, response);
	}
}
