//! Request signing contract consulted by the executor before every call.

// self
use crate::{
	_prelude::*,
	auth::Secret,
	error::SignError,
	request::{Form, Method},
};

/// Produces the `Authorization` header for one canonical request.
///
/// The executor calls the signer with the exact method, query-free URL, and form that the
/// transport will send, so implementations may hash all three. The crate ships
/// [`OAuth1Signer`](crate::auth::OAuth1Signer); bearer-token or proxy-signing schemes can be
/// plugged in through [`Client::with_parts`](crate::Client::with_parts).
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Returns the header value for the request.
	fn authorization(&self, method: Method, url: &Url, form: &Form) -> Result<String, SignError>;
}

/// Application-only bearer token signer.
#[derive(Clone, Debug)]
pub struct BearerSigner(Secret);
impl BearerSigner {
	/// Wraps an app-only bearer token.
	pub fn new(token: impl Into<Secret>) -> Self {
		Self(token.into())
	}
}
impl RequestSigner for BearerSigner {
	fn authorization(&self, _: Method, _: &Url, _: &Form) -> Result<String, SignError> {
		Ok(format!("Bearer {}", self.0.expose()))
	}
}
