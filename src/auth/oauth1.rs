//! HMAC-SHA1 OAuth 1.0a request signing (RFC 5849).

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{AccessCredentials, ConsumerCredentials},
	error::SignError,
	ext::RequestSigner,
	request::{Form, Method},
};

type HmacSha1 = Hmac<Sha1>;

const NONCE_LEN: usize = 32;
const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";

/// Signs requests on behalf of one consumer and, optionally, one access token.
#[derive(Clone, Debug)]
pub struct OAuth1Signer {
	consumer: ConsumerCredentials,
	token: Option<AccessCredentials>,
}
impl OAuth1Signer {
	/// Creates a user-context signer.
	pub fn new(consumer: ConsumerCredentials, token: AccessCredentials) -> Self {
		Self { consumer, token: Some(token) }
	}

	/// Creates a signer that only carries the consumer key pair.
	pub fn consumer_only(consumer: ConsumerCredentials) -> Self {
		Self { consumer, token: None }
	}

	/// Builds the header with a caller-supplied nonce and timestamp.
	pub fn authorization_at(
		&self,
		method: Method,
		url: &Url,
		form: &Form,
		nonce: &str,
		timestamp: i64,
	) -> Result<String, SignError> {
		let token = self.token.as_ref().map(|t| (t.token.as_str(), t.secret.expose()));

		SignatureInput { method, url, form, token, extra: &[], nonce, timestamp }
			.header(&self.consumer)
	}
}
impl RequestSigner for OAuth1Signer {
	fn authorization(&self, method: Method, url: &Url, form: &Form) -> Result<String, SignError> {
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		self.authorization_at(method, url, form, &nonce(), timestamp)
	}
}

/// Everything that feeds one signature.
pub(crate) struct SignatureInput<'a> {
	pub(crate) method: Method,
	pub(crate) url: &'a Url,
	pub(crate) form: &'a Form,
	/// Token and token secret, when signing in a token context.
	pub(crate) token: Option<(&'a str, &'a str)>,
	/// Additional `oauth_*` protocol parameters (`oauth_callback`, `oauth_verifier`).
	pub(crate) extra: &'a [(&'a str, &'a str)],
	pub(crate) nonce: &'a str,
	pub(crate) timestamp: i64,
}
impl SignatureInput<'_> {
	pub(crate) fn header(&self, consumer: &ConsumerCredentials) -> Result<String, SignError> {
		let timestamp = self.timestamp.to_string();
		let mut oauth = vec![
			("oauth_consumer_key", consumer.key.as_str()),
			("oauth_nonce", self.nonce),
			("oauth_signature_method", SIGNATURE_METHOD),
			("oauth_timestamp", timestamp.as_str()),
			("oauth_version", VERSION),
		];

		if let Some((token, _)) = self.token {
			oauth.push(("oauth_token", token));
		}

		oauth.extend_from_slice(self.extra);

		let base = self.base_string(&oauth);
		let key = format!(
			"{}&{}",
			consumer.secret.key_part(),
			encode(self.token.map(|(_, secret)| secret).unwrap_or_default())
		);
		let mut mac =
			HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| SignError::InvalidKey)?;

		mac.update(base.as_bytes());

		let signature = STANDARD.encode(mac.finalize().into_bytes());

		oauth.push(("oauth_signature", signature.as_str()));
		oauth.sort_unstable();

		let fields = oauth
			.iter()
			.map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
			.collect::<Vec<_>>()
			.join(", ");

		Ok(format!("OAuth {fields}"))
	}

	fn base_string(&self, oauth: &[(&str, &str)]) -> String {
		let mut params = self
			.form
			.pairs()
			.chain(oauth.iter().copied())
			.map(|(k, v)| (encode(k), encode(v)))
			.collect::<Vec<_>>();

		params.sort_unstable();

		let params =
			params.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&");

		format!(
			"{}&{}&{}",
			self.method.as_str(),
			encode(&normalized_url(self.url)),
			encode(&params)
		)
	}
}

/// RFC 3986 percent-encoding (unreserved characters pass through).
pub(crate) fn encode(value: &str) -> String {
	urlencoding::encode(value).into_owned()
}

fn normalized_url(url: &Url) -> String {
	let host = url.host_str().unwrap_or_default().to_ascii_lowercase();

	match url.port() {
		Some(port) => format!("{}://{host}:{port}{}", url.scheme(), url.path()),
		None => format!("{}://{host}{}", url.scheme(), url.path()),
	}
}

pub(crate) fn nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}
