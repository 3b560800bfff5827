//! Client handle tying configuration, signer, transport, and dispatcher together.

// crates.io
use serde::de::DeserializeOwned;
// self
#[cfg(feature = "reqwest")]
use crate::{
	auth::{AccessCredentials, OAuth1Signer},
	http::ReqwestTransport,
};
use crate::{
	_prelude::*,
	config::ClientConfig,
	dispatch::Dispatcher,
	exec::{Decoder, Empty, Executor, Json, Raw},
	ext::RequestSigner,
	http::{HttpTransport, RawResponse},
	request::{ApiRequest, Form, Method},
};

/// Throttled API client.
///
/// Construction spawns the dispatcher on the ambient tokio runtime. Clones share the dispatcher
/// and its delay, so every clone observes [`Client::set_delay`] and all of them are serialized
/// against each other. The dispatcher stops once the last clone is dropped.
#[derive(Clone, Debug)]
pub struct Client {
	config: Arc<ClientConfig>,
	dispatcher: Dispatcher,
}
impl Client {
	/// Creates a user-context client backed by reqwest and the OAuth 1.0a signer.
	#[cfg(feature = "reqwest")]
	pub fn new(config: ClientConfig, access: AccessCredentials) -> Result<Self> {
		let transport = ReqwestTransport::from_config(&config)?;
		let signer = OAuth1Signer::new(config.consumer.clone(), access);

		Self::with_parts(config, Arc::new(transport), Arc::new(signer))
	}

	/// Creates a client from custom collaborators.
	pub fn with_parts(
		config: ClientConfig,
		transport: Arc<dyn HttpTransport>,
		signer: Arc<dyn RequestSigner>,
	) -> Result<Self> {
		let dispatcher = Dispatcher::spawn(Executor::new(transport, signer), config.delay)?;

		Ok(Self { config: Arc::new(config), dispatcher })
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Current inter-request delay.
	pub fn delay(&self) -> Duration {
		self.dispatcher.delay()
	}

	/// Changes the inter-request delay; zero disables throttling.
	pub fn set_delay(&self, delay: Duration) {
		self.dispatcher.set_delay(delay);
	}

	/// Resolves `path` against the configured API root.
	pub fn endpoint(&self, path: &str) -> Result<Url> {
		Ok(self.config.endpoint(path)?)
	}

	/// Builds a request for `path` relative to the API root.
	pub fn request(&self, method: Method, path: &str, form: Option<Form>) -> Result<ApiRequest> {
		Ok(ApiRequest::new(method, self.endpoint(path)?, form))
	}

	/// Submits `request` and decodes the JSON body into `T`.
	pub async fn submit<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: 'static + Send + DeserializeOwned,
	{
		self.dispatcher.submit(request, Json::new()).await
	}

	/// Submits `request` for its side effect only; the body is ignored.
	pub async fn submit_empty(&self, request: ApiRequest) -> Result<()> {
		self.dispatcher.submit(request, Empty).await
	}

	/// Submits `request` and returns the undecoded 2xx response.
	pub async fn submit_raw(&self, request: ApiRequest) -> Result<RawResponse> {
		self.dispatcher.submit(request, Raw).await
	}

	/// Submits `request` with a custom decoder.
	pub async fn submit_with<D>(&self, request: ApiRequest, decoder: D) -> Result<D::Output>
	where
		D: Decoder,
	{
		self.dispatcher.submit(request, decoder).await
	}

	pub(crate) async fn call<T>(&self, method: Method, path: &str, form: Option<Form>) -> Result<T>
	where
		T: 'static + Send + DeserializeOwned,
	{
		self.submit(self.request(method, path, form)?).await
	}

	pub(crate) async fn call_empty(
		&self,
		method: Method,
		path: &str,
		form: Option<Form>,
	) -> Result<()> {
		self.submit_empty(self.request(method, path, form)?).await
	}
}
