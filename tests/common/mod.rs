// std
use std::sync::Arc;
// self
use twitter_dispatch::{
	Client,
	auth::{AccessCredentials, OAuth1Signer},
	config::ClientConfig,
	http::ReqwestTransport,
	reqwest,
};

/// Builds a reqwest transport that accepts the self-signed certificates produced by `httpmock`.
pub fn test_reqwest_transport() -> Arc<ReqwestTransport> {
	let client = reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	Arc::new(ReqwestTransport::with_client(client))
}

/// Builds a user-context client over [`test_reqwest_transport`].
pub fn build_test_client(config: ClientConfig) -> Client {
	let signer = OAuth1Signer::new(
		config.consumer.clone(),
		AccessCredentials::new("access-token", "access-secret"),
	);

	Client::with_parts(config, test_reqwest_transport(), Arc::new(signer))
		.expect("Client should start inside the test runtime.")
}
