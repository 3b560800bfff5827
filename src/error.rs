//! Client-level error types shared across the dispatcher, executor, and endpoint callers.

// self
use crate::{_prelude::*, http::ResponseMetadata};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Request or client construction problem; never retried.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Remote service answered with a non-2xx status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Remote service answered 2xx with a body that does not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// The dispatcher task is gone, so the request never received a result.
	#[error("Request dispatcher is no longer running.")]
	DispatcherClosed,
}
impl Error {
	/// Returns the remote error payload when the failure came from a non-2xx response.
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}
}

/// Construction failures raised before a request reaches the network.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Signing needs a canonical URL, so request URLs must not carry a query component.
	#[error("Request URL must not contain a query component: {url}.")]
	QueryInUrl {
		/// Offending URL.
		url: String,
	},
	/// Endpoint URL could not be assembled from the configured base URL.
	#[error("Endpoint URL `{path}` is invalid.")]
	InvalidEndpoint {
		/// Path that was joined onto the base URL.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The dispatcher needs an ambient tokio runtime to be spawned on.
	#[error("A tokio runtime is required to start the request dispatcher.")]
	MissingRuntime,
	/// The signer could not produce an authorization header.
	#[error(transparent)]
	Sign(#[from] SignError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Failures raised by request signers.
#[derive(Debug, ThisError)]
pub enum SignError {
	/// The signing key was rejected by the MAC implementation.
	#[error("Signing key is invalid.")]
	InvalidKey,
	/// Signer-specific failure.
	#[error("Request signing failed: {message}.")]
	Other {
		/// Signer-supplied message.
		message: String,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// URL being requested.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete within the configured timeout.
	#[error("Request to {url} timed out.")]
	Timeout {
		/// URL being requested.
		url: String,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(url: &Url, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { url: url.to_string(), source: Box::new(src) }
	}
}

/// Single entry of the remote `{"errors":[...]}` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
	/// Remote error code.
	#[serde(default)]
	pub code: i64,
	/// Human-readable message.
	#[serde(default)]
	pub message: String,
}

/// Structured remote error payload returned with non-2xx statuses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
	/// Every error the service reported.
	pub errors: Vec<ApiErrorDetail>,
}
impl ApiErrorResponse {
	/// Joins every reported message into one line.
	pub fn summary(&self) -> String {
		self.errors
			.iter()
			.map(|e| format!("{} (code {})", e.message, e.code))
			.collect::<Vec<_>>()
			.join("; ")
	}
}

/// Non-2xx response surfaced to callers.
///
/// `message` and `errors` are populated when the body decoded as an [`ApiErrorResponse`];
/// otherwise they are empty and `body` carries the raw text.
#[derive(Clone, Debug, ThisError)]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Request URL (without query).
	pub url: String,
	/// Structured message, when the error body decoded.
	pub message: Option<String>,
	/// Structured error entries, when the error body decoded.
	pub errors: Vec<ApiErrorDetail>,
	/// Raw body text.
	pub body: String,
	/// Response metadata (rate-limit and retry hints).
	pub metadata: ResponseMetadata,
}
impl ApiError {
	/// Builds an error from a non-2xx status, decoding the structured payload when possible.
	pub fn from_response(
		status: u16,
		url: &Url,
		body: &[u8],
		metadata: ResponseMetadata,
	) -> Self {
		let text = String::from_utf8_lossy(body).into_owned();

		match serde_json::from_slice::<ApiErrorResponse>(body) {
			Ok(payload) => Self {
				status,
				url: url.to_string(),
				message: Some(payload.summary()),
				errors: payload.errors,
				body: text,
				metadata,
			},
			Err(_) => Self {
				status,
				url: url.to_string(),
				message: None,
				errors: Vec::new(),
				body: text,
				metadata,
			},
		}
	}

	/// Returns `true` when the remote error body decoded as a structured payload.
	pub fn is_structured(&self) -> bool {
		self.message.is_some()
	}
}
impl Display for ApiError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match &self.message {
			Some(message) =>
				write!(f, "Request to {} returned status {}: {message}.", self.url, self.status),
			None => write!(
				f,
				"Could not parse error body. Request to {} returned status {}: {}",
				self.url, self.status, self.body
			),
		}
	}
}

/// 2xx body that could not be decoded into the caller's target.
#[derive(Debug, ThisError)]
#[error("Response from {url} could not be decoded.")]
pub struct DecodeError {
	/// Request URL.
	pub url: String,
	/// Structured parsing failure including the JSON path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
