//! Transport primitives for signed API calls.
//!
//! The module exposes [`HttpTransport`] alongside [`RawResponse`] and [`ResponseMetadata`] so
//! downstream crates can plug in custom HTTP stacks. A transport only moves bytes: it receives
//! an [`ApiRequest`] plus the already computed `Authorization` header, and hands back the
//! status, rate-limit metadata, and body. Status classification and JSON decoding stay in
//! [`crate::exec`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, request::ApiRequest};
#[cfg(feature = "reqwest")]
use crate::{
	config::ClientConfig,
	error::{ConfigError, TransportError},
	request::Method,
};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<RawResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing one signed call.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by the
/// dispatcher task and the OAuth handshake helpers. GET and DELETE requests carry the form in
/// the query string; POST and PUT send it as an `application/x-www-form-urlencoded` body.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` with the provided `Authorization` header value.
	fn send<'a>(&'a self, request: &'a ApiRequest, authorization: String) -> TransportFuture<'a>;
}

/// Rate-limit window advertised through the `x-rate-limit-*` headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitStatus {
	/// Calls allowed per window.
	pub limit: u32,
	/// Calls left in the current window.
	pub remaining: u32,
	/// Instant the window resets.
	pub reset_at: OffsetDateTime,
}

/// Captures metadata from an HTTP response for callers and error mapping.
///
/// Additional metadata fields may be added in future releases, so downstream code
/// should construct values using field names instead of struct update syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code, if available.
	pub status: Option<u16>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
	/// Rate-limit window, when the service advertised one.
	pub rate_limit: Option<RateLimitStatus>,
}
impl ResponseMetadata {
	/// Builds metadata from a status code and a header lookup function.
	pub fn from_headers<'h, F>(status: u16, header: F) -> Self
	where
		F: Fn(&str) -> Option<&'h str>,
	{
		Self {
			status: Some(status),
			retry_after: header("retry-after").and_then(parse_retry_after),
			rate_limit: parse_rate_limit(&header),
		}
	}
}

/// Undecoded response returned by transports and by the media path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// `Content-Type` header, if any.
	pub content_type: Option<String>,
	/// Status, retry, and rate-limit metadata.
	pub metadata: ResponseMetadata,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Creates a response with empty metadata besides the status.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			content_type: None,
			metadata: ResponseMetadata { status: Some(status), ..Default::default() },
			body: body.into(),
		}
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Body as lossy UTF-8 text.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the configured timeout and user agent.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.user_agent(config.user_agent.as_str())
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send<'a>(&'a self, request: &'a ApiRequest, authorization: String) -> TransportFuture<'a> {
		Box::pin(async move {
			let method = match request.method() {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Delete => reqwest::Method::DELETE,
			};
			let builder = if request.method().sends_body() {
				self.0
					.request(method, request.url().clone())
					.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
					.body(request.form().encode())
			} else {
				let mut url = request.url().clone();

				if !request.form().is_empty() {
					url.set_query(Some(&request.form().encode()));
				}

				self.0.request(method, url)
			};
			let response = builder
				.header(AUTHORIZATION, authorization)
				.send()
				.await
				.map_err(|e| map_reqwest_error(request.url(), e))?;
			let status = response.status().as_u16();
			let headers = response.headers().to_owned();
			let metadata =
				ResponseMetadata::from_headers(status, |name| header_str(&headers, name));
			let content_type = header_str(&headers, CONTENT_TYPE.as_str()).map(str::to_owned);
			let body =
				response.bytes().await.map_err(|e| map_reqwest_error(request.url(), e))?.to_vec();

			Ok(RawResponse { status, content_type, metadata, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
	headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(url: &Url, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::http_client_build(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { url: url.to_string() }.into();
	}

	TransportError::network(url, err).into()
}

fn parse_retry_after(raw: &str) -> Option<Duration> {
	let raw = raw.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::from_secs(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Duration::try_from(delta).ok();
		}
	}

	None
}

fn parse_rate_limit<'h, F>(header: &F) -> Option<RateLimitStatus>
where
	F: Fn(&str) -> Option<&'h str>,
{
	let limit = header("x-rate-limit-limit")?.trim().parse().ok()?;
	let remaining = header("x-rate-limit-remaining")?.trim().parse().ok()?;
	let reset = header("x-rate-limit-reset")?.trim().parse::<i64>().ok()?;
	let reset_at = OffsetDateTime::from_unix_timestamp(reset).ok()?;

	Some(RateLimitStatus { limit, remaining, reset_at })
}
