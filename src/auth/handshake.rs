//! Three-legged OAuth 1.0a handshake.
//!
//! The handshake runs before a user-context [`Client`](crate::Client) exists, so its calls go
//! straight to the transport instead of through a dispatcher and are not throttled.

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;
use crate::{
	_prelude::*,
	auth::{
		AccessCredentials, TemporaryCredentials,
		oauth1::{self, SignatureInput},
	},
	config::ClientConfig,
	error::{ApiError, ConfigError, DecodeError},
	http::HttpTransport,
	request::{ApiRequest, Form, Method},
};

#[derive(Debug, Deserialize)]
struct TokenForm {
	oauth_token: String,
	oauth_token_secret: String,
	#[serde(default)]
	oauth_callback_confirmed: Option<String>,
	#[serde(default)]
	user_id: Option<String>,
	#[serde(default)]
	screen_name: Option<String>,
}

/// Drives the request-token, authorize, and access-token legs for one consumer.
#[derive(Clone)]
pub struct Handshake {
	config: Arc<ClientConfig>,
	transport: Arc<dyn HttpTransport>,
}
impl Handshake {
	/// Creates a handshake over a custom transport.
	pub fn new(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
		Self { config: Arc::new(config), transport }
	}

	/// Creates a handshake backed by reqwest.
	#[cfg(feature = "reqwest")]
	pub fn with_reqwest(config: ClientConfig) -> Result<Self, ConfigError> {
		let transport = ReqwestTransport::from_config(&config)?;

		Ok(Self::new(config, Arc::new(transport)))
	}

	/// Obtains temporary credentials bound to `callback` (`oob` for PIN-based flows).
	pub async fn request_temporary_credentials(
		&self,
		callback: &str,
	) -> Result<TemporaryCredentials> {
		let url = &self.config.endpoints.request_token;
		let form = self.exchange(url, None, &[("oauth_callback", callback)]).await?;

		Ok(TemporaryCredentials {
			token: form.oauth_token,
			secret: form.oauth_token_secret.into(),
			callback_confirmed: form.oauth_callback_confirmed.as_deref() == Some("true"),
		})
	}

	/// Builds the page URL the user must visit to approve `temporary`.
	pub fn authorization_url(&self, temporary: &TemporaryCredentials) -> Url {
		let mut url = self.config.endpoints.authorize.clone();

		url.query_pairs_mut().append_pair("oauth_token", &temporary.token);

		url
	}

	/// Requests temporary credentials and returns the matching authorization URL.
	pub async fn start(&self, callback: &str) -> Result<(TemporaryCredentials, Url)> {
		let temporary = self.request_temporary_credentials(callback).await?;
		let url = self.authorization_url(&temporary);

		Ok((temporary, url))
	}

	/// Trades the verifier returned to the callback for long-lived access credentials.
	pub async fn exchange_verifier(
		&self,
		temporary: &TemporaryCredentials,
		verifier: &str,
	) -> Result<AccessCredentials> {
		let url = &self.config.endpoints.access_token;
		let token = (temporary.token.as_str(), temporary.secret.expose());
		let form = self.exchange(url, Some(token), &[("oauth_verifier", verifier)]).await?;

		Ok(AccessCredentials {
			token: form.oauth_token,
			secret: form.oauth_token_secret.into(),
			user_id: form.user_id,
			screen_name: form.screen_name,
		})
	}

	async fn exchange(
		&self,
		url: &Url,
		token: Option<(&str, &str)>,
		extra: &[(&str, &str)],
	) -> Result<TokenForm> {
		let form = Form::new();
		let nonce = oauth1::nonce();
		let authorization = SignatureInput {
			method: Method::Post,
			url,
			form: &form,
			token,
			extra,
			nonce: &nonce,
			timestamp: OffsetDateTime::now_utc().unix_timestamp(),
		}
		.header(&self.config.consumer)
		.map_err(ConfigError::from)?;
		let request = ApiRequest::post(url.clone(), None);
		let response = self.transport.send(&request, authorization).await?;

		if !response.is_success() {
			return Err(ApiError::from_response(
				response.status,
				url,
				&response.body,
				response.metadata,
			)
			.into());
		}

		parse_token_form(url, &response.body)
	}
}
impl Debug for Handshake {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Handshake").field("config", &self.config).finish_non_exhaustive()
	}
}

fn parse_token_form(url: &Url, body: &[u8]) -> Result<TokenForm> {
	let fields = url::form_urlencoded::parse(body)
		.map(|(k, v)| (k.into_owned(), serde_json::Value::String(v.into_owned())))
		.collect::<serde_json::Map<_, _>>();

	serde_path_to_error::deserialize(serde_json::Value::Object(fields))
		.map_err(|source| DecodeError { url: url.to_string(), source }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, http::RawResponse};

	fn handshake(transport: Arc<RecordingTransport>) -> Handshake {
		Handshake::new(test_config("https://api.twitter.com/1.1", Duration::ZERO), transport)
	}

	#[tokio::test]
	async fn temporary_credentials_sign_the_callback() {
		let transport = Arc::new(RecordingTransport::responding(|_| {
			RawResponse::new(
				200,
				"oauth_token=req&oauth_token_secret=req-secret&oauth_callback_confirmed=true",
			)
		}));
		let temporary = handshake(transport.clone())
			.request_temporary_credentials("https://app.test/cb")
			.await
			.expect("Request token response should parse.");
		let call = transport.last_call();

		assert_eq!(temporary.token, "req");
		assert_eq!(temporary.secret.expose(), "req-secret");
		assert!(temporary.callback_confirmed);
		assert_eq!(call.method, Method::Post);
		assert_eq!(call.url.as_str(), "https://api.twitter.com/oauth/request_token");
		assert!(call.authorization.contains("oauth_callback=\"https%3A%2F%2Fapp.test%2Fcb\""));
		assert!(!call.authorization.contains("oauth_token="));
	}

	#[test]
	fn authorization_url_carries_the_request_token() {
		let transport = Arc::new(RecordingTransport::echo());
		let temporary = TemporaryCredentials {
			token: "req token".into(),
			secret: "s".into(),
			callback_confirmed: true,
		};
		let url = handshake(transport).authorization_url(&temporary);

		assert_eq!(url.path(), "/oauth/authenticate");
		assert_eq!(url.query(), Some("oauth_token=req+token"));
	}

	#[tokio::test]
	async fn verifier_exchange_returns_account_metadata() {
		let transport = Arc::new(RecordingTransport::responding(|_| {
			RawResponse::new(
				200,
				"oauth_token=acc&oauth_token_secret=acc-secret&user_id=6253282&screen_name=api",
			)
		}));
		let temporary = TemporaryCredentials {
			token: "req".into(),
			secret: "s".into(),
			callback_confirmed: true,
		};
		let access = handshake(transport.clone())
			.exchange_verifier(&temporary, "pin")
			.await
			.expect("Access token response should parse.");
		let authorization = transport.last_call().authorization;

		assert_eq!(access.token, "acc");
		assert_eq!(access.user_id.as_deref(), Some("6253282"));
		assert_eq!(access.screen_name.as_deref(), Some("api"));
		assert!(authorization.contains("oauth_token=\"req\""));
		assert!(authorization.contains("oauth_verifier=\"pin\""));
	}

	#[tokio::test]
	async fn rejected_handshake_surfaces_remote_error() {
		let transport =
			Arc::new(RecordingTransport::responding(|_| RawResponse::new(401, "Invalid request")));
		let err = handshake(transport)
			.request_temporary_credentials("oob")
			.await
			.expect_err("401 must surface.");

		assert!(matches!(err, Error::Api(ApiError { status: 401, .. })));
	}

	#[test]
	fn missing_token_secret_is_a_decode_error() {
		let url = Url::parse("https://api.twitter.com/oauth/access_token").expect("URL parses.");
		let err = parse_token_form(&url, b"oauth_token=only").expect_err("Secret is required.");

		assert!(matches!(err, Error::Decode(_)));
	}
}
