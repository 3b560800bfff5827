//! Credential pairs used by the OAuth 1.0a signer and handshake.

// self
use crate::{_prelude::*, auth::Secret};

/// Application-level key pair issued on the developer portal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerCredentials {
	/// Consumer (API) key.
	pub key: String,
	/// Consumer (API) secret.
	pub secret: Secret,
}
impl ConsumerCredentials {
	/// Creates a consumer key pair.
	pub fn new(key: impl Into<String>, secret: impl Into<Secret>) -> Self {
		Self { key: key.into(), secret: secret.into() }
	}
}

/// User-level access token pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCredentials {
	/// Access token.
	pub token: String,
	/// Access token secret.
	pub secret: Secret,
	/// Numeric user id returned by the access-token exchange, if known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// Screen name returned by the access-token exchange, if known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub screen_name: Option<String>,
}
impl AccessCredentials {
	/// Creates an access token pair without account metadata.
	pub fn new(token: impl Into<String>, secret: impl Into<Secret>) -> Self {
		Self { token: token.into(), secret: secret.into(), user_id: None, screen_name: None }
	}
}

/// Short-lived request token issued during the three-legged handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemporaryCredentials {
	/// Request token.
	pub token: String,
	/// Request token secret.
	pub secret: Secret,
	/// Whether the service acknowledged the callback URL.
	pub callback_confirmed: bool,
}
