// self
use crate::{
	_prelude::*,
	auth::ConsumerCredentials,
	config::{ApiEndpoints, ClientConfig},
};

/// Errors raised while constructing or validating configurations.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// A configured URL could not be parsed.
	#[error("The {endpoint} URL is invalid: {url}.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Raw value that failed to parse.
		url: String,
	},
	/// Endpoints must use HTTP(S).
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoints are signed, so they must not carry a query or fragment.
	#[error("The {endpoint} endpoint must not contain a query or fragment: {url}.")]
	UnexpectedQuery {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Consumer key is empty.
	#[error("Consumer key must not be empty.")]
	EmptyConsumerKey,
	/// Consumer secret is empty.
	#[error("Consumer secret must not be empty.")]
	EmptyConsumerSecret,
	/// User agent is empty.
	#[error("User agent must not be empty.")]
	EmptyUserAgent,
	/// Timeout is zero.
	#[error("Request timeout must be positive.")]
	ZeroTimeout,
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Application key pair.
	pub consumer: ConsumerCredentials,
	/// REST API root.
	pub api_base: String,
	/// Temporary-credential endpoint.
	pub request_token: String,
	/// Authorization page.
	pub authorize: String,
	/// Token-credential endpoint.
	pub access_token: String,
	/// Inter-request delay.
	pub delay: Duration,
	/// Per-request timeout.
	pub timeout: Duration,
	/// `User-Agent` header value.
	pub user_agent: String,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with reference defaults.
	pub fn new(consumer: ConsumerCredentials) -> Self {
		Self {
			consumer,
			api_base: ClientConfig::DEFAULT_API_BASE.into(),
			request_token: ClientConfig::DEFAULT_REQUEST_TOKEN.into(),
			authorize: ClientConfig::DEFAULT_AUTHORIZE.into(),
			access_token: ClientConfig::DEFAULT_ACCESS_TOKEN.into(),
			delay: ClientConfig::DEFAULT_DELAY,
			timeout: ClientConfig::DEFAULT_TIMEOUT,
			user_agent: concat!("twitter-dispatch/", env!("CARGO_PKG_VERSION")).into(),
		}
	}

	/// Overrides the REST API root.
	pub fn api_base(mut self, url: impl Into<String>) -> Self {
		self.api_base = url.into();

		self
	}

	/// Overrides the three OAuth handshake endpoints.
	pub fn oauth_endpoints(
		mut self,
		request_token: impl Into<String>,
		authorize: impl Into<String>,
		access_token: impl Into<String>,
	) -> Self {
		self.request_token = request_token.into();
		self.authorize = authorize.into();
		self.access_token = access_token.into();

		self
	}

	/// Overrides the initial inter-request delay; zero disables throttling.
	pub fn delay(mut self, delay: Duration) -> Self {
		self.delay = delay;

		self
	}

	/// Overrides the per-request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		if self.consumer.key.trim().is_empty() {
			return Err(ClientConfigError::EmptyConsumerKey);
		}
		if self.consumer.secret.is_blank() {
			return Err(ClientConfigError::EmptyConsumerSecret);
		}
		if self.user_agent.trim().is_empty() {
			return Err(ClientConfigError::EmptyUserAgent);
		}
		if self.timeout.is_zero() {
			return Err(ClientConfigError::ZeroTimeout);
		}

		let endpoints = ApiEndpoints {
			api_base: validate_endpoint("api_base", &self.api_base)?,
			request_token: validate_endpoint("request_token", &self.request_token)?,
			authorize: validate_endpoint("authorize", &self.authorize)?,
			access_token: validate_endpoint("access_token", &self.access_token)?,
		};

		Ok(ClientConfig {
			consumer: self.consumer,
			endpoints,
			delay: self.delay,
			timeout: self.timeout,
			user_agent: self.user_agent,
		})
	}
}

fn validate_endpoint(name: &'static str, raw: &str) -> Result<Url, ClientConfigError> {
	let url = Url::parse(raw)
		.map_err(|_| ClientConfigError::InvalidUrl { endpoint: name, url: raw.to_owned() })?;

	if !matches!(url.scheme(), "http" | "https") {
		return Err(ClientConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() });
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(ClientConfigError::UnexpectedQuery { endpoint: name, url: url.to_string() });
	}

	Ok(url)
}
