//! Per-client configuration.
//!
//! Every [`Client`](crate::Client) owns its [`ClientConfig`], so differently configured
//! clients (other consumer keys, base URLs, or delays) coexist in one process without any
//! shared mutable state. Build values through [`ClientConfigBuilder`], which validates URLs
//! before a dispatcher is ever started.

/// Builder API for assembling client configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::ConsumerCredentials, error::ConfigError};

/// Endpoint set used by the client and the OAuth handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoints {
	/// REST API root every endpoint path is appended to.
	pub api_base: Url,
	/// OAuth 1.0a temporary-credential endpoint.
	pub request_token: Url,
	/// End-user authorization page.
	pub authorize: Url,
	/// OAuth 1.0a token-credential endpoint.
	pub access_token: Url,
}

/// Immutable client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Application key pair used for every signature.
	pub consumer: ConsumerCredentials,
	/// Endpoint definitions.
	pub endpoints: ApiEndpoints,
	/// Minimum spacing between the starts of consecutive requests.
	pub delay: Duration,
	/// Per-request transport timeout.
	pub timeout: Duration,
	/// `User-Agent` sent by the default transport.
	pub user_agent: String,
}
impl ClientConfig {
	/// Default inter-request delay.
	pub const DEFAULT_DELAY: Duration = Duration::from_secs(10);
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
	/// Default REST API root.
	pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";
	/// Default temporary-credential endpoint.
	pub const DEFAULT_REQUEST_TOKEN: &str = "https://api.twitter.com/oauth/request_token";
	/// Default authorization page.
	pub const DEFAULT_AUTHORIZE: &str = "https://api.twitter.com/oauth/authenticate";
	/// Default token-credential endpoint.
	pub const DEFAULT_ACCESS_TOKEN: &str = "https://api.twitter.com/oauth/access_token";

	/// Creates a new builder for the provided consumer key pair.
	pub fn builder(consumer: ConsumerCredentials) -> ClientConfigBuilder {
		ClientConfigBuilder::new(consumer)
	}

	/// Appends `path` to the API root.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let joined = format!(
			"{}/{}",
			self.endpoints.api_base.as_str().trim_end_matches('/'),
			path.trim_start_matches('/')
		);

		Url::parse(&joined)
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> ClientConfig {
		ClientConfig::builder(ConsumerCredentials::new("key", "secret"))
			.build()
			.expect("Default configuration should build.")
	}

	#[test]
	fn endpoint_appends_to_versioned_root() {
		let url = config()
			.endpoint("/direct_messages/events/list.json")
			.expect("Endpoint should join onto the API root.");

		assert_eq!(url.as_str(), "https://api.twitter.com/1.1/direct_messages/events/list.json");
	}

	#[test]
	fn defaults_match_reference_values() {
		let config = config();

		assert_eq!(config.delay, Duration::from_secs(10));
		assert_eq!(config.endpoints.api_base.as_str(), "https://api.twitter.com/1.1");
		assert_eq!(config.consumer.key, "key");
	}
}
