//! Account activity webhook and subscription endpoints.
//!
//! Premium environments are addressed by environment name, enterprise ones by webhook id, so
//! most operations take both and let [`ApiTier`] pick the URL shape.

// self
use crate::{
	_prelude::*,
	api::{SubscriptionList, Webhook, WebhookCount},
	auth::oauth1,
	client::Client,
	request::{Form, Method},
};

/// Account activity API product tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiTier {
	/// Premium tier, addressed by environment name.
	#[default]
	Premium,
	/// Enterprise tier, addressed by webhook id.
	Enterprise,
}
impl ApiTier {
	fn webhooks_path(self) -> &'static str {
		match self {
			ApiTier::Premium => "account_activity/all/webhooks.json",
			ApiTier::Enterprise => "account_activity/webhooks.json",
		}
	}

	fn environment_webhooks_path(self, env_name: &str) -> String {
		match self {
			ApiTier::Premium => format!("account_activity/all/{}/webhooks.json", segment(env_name)),
			ApiTier::Enterprise => self.webhooks_path().into(),
		}
	}

	fn webhook_path(self, env_name: &str, webhook_id: &str) -> String {
		match self {
			ApiTier::Premium => format!(
				"account_activity/all/{}/webhooks/{}.json",
				segment(env_name),
				segment(webhook_id)
			),
			ApiTier::Enterprise =>
				format!("account_activity/webhooks/{}.json", segment(webhook_id)),
		}
	}

	fn subscriptions_path(self, env_name: &str, webhook_id: &str) -> String {
		match self {
			ApiTier::Premium =>
				format!("account_activity/all/{}/subscriptions.json", segment(env_name)),
			ApiTier::Enterprise => format!(
				"account_activity/webhooks/{}/subscriptions/all.json",
				segment(webhook_id)
			),
		}
	}

	fn subscription_list_path(self, env_name: &str, webhook_id: &str) -> String {
		match self {
			ApiTier::Premium =>
				format!("account_activity/all/{}/subscriptions/list.json", segment(env_name)),
			ApiTier::Enterprise => format!(
				"account_activity/webhooks/{}/subscriptions/all/list.json",
				segment(webhook_id)
			),
		}
	}
}
impl Display for ApiTier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			ApiTier::Premium => f.write_str("premium"),
			ApiTier::Enterprise => f.write_str("enterprise"),
		}
	}
}

impl Client {
	/// Lists every webhook registered for the application.
	pub async fn app_activity_webhooks(
		&self,
		tier: ApiTier,
		form: Option<Form>,
	) -> Result<Vec<Webhook>> {
		self.call(Method::Get, tier.webhooks_path(), form).await
	}

	/// Counts active subscriptions; requires an application-only signer.
	pub async fn count_app_activity_webhooks(&self, form: Option<Form>) -> Result<WebhookCount> {
		self.call(Method::Get, "account_activity/subscriptions/count.json", form).await
	}

	/// Registers a webhook; pass its callback `url` in `form`.
	pub async fn set_app_activity_webhook(
		&self,
		env_name: &str,
		tier: ApiTier,
		form: Option<Form>,
	) -> Result<Webhook> {
		self.call(Method::Post, &tier.environment_webhooks_path(env_name), form).await
	}

	/// Removes a webhook from the application.
	pub async fn delete_app_activity_webhook(
		&self,
		env_name: &str,
		webhook_id: &str,
		tier: ApiTier,
		form: Option<Form>,
	) -> Result<()> {
		self.call_empty(Method::Delete, &tier.webhook_path(env_name, webhook_id), form).await
	}

	/// Re-enables a webhook by triggering a new challenge-response check.
	pub async fn put_app_activity_webhook(
		&self,
		env_name: &str,
		webhook_id: &str,
		tier: ApiTier,
		form: Option<Form>,
	) -> Result<()> {
		self.call_empty(Method::Put, &tier.webhook_path(env_name, webhook_id), form).await
	}

	/// Subscribes the application to the authenticating user's activity.
	pub async fn set_webhook_subscription(
		&self,
		env_name: &str,
		webhook_id: &str,
		tier: ApiTier,
		form: Option<Form>,
	) -> Result<()> {
		self.call_empty(Method::Post, &tier.subscriptions_path(env_name, webhook_id), form).await
	}

	/// Succeeds when the authenticating user is subscribed.
	pub async fn webhook_subscription(
		&self,
		env_name: &str,
		webhook_id: &str,
		tier: ApiTier,
		form: Option<Form>,
	) -> Result<()> {
		self.call_empty(Method::Get, &tier.subscriptions_path(env_name, webhook_id), form).await
	}

	/// Lists subscribed users; requires an application-only signer.
	pub async fn webhook_subscription_list(
		&self,
		env_name: &str,
		webhook_id: &str,
		tier: ApiTier,
		form: Option<Form>,
	) -> Result<SubscriptionList> {
		self.call(Method::Get, &tier.subscription_list_path(env_name, webhook_id), form).await
	}

	/// Deactivates the authenticating user's subscription.
	pub async fn delete_webhook_subscription(
		&self,
		env_name: &str,
		webhook_id: &str,
		tier: ApiTier,
		form: Option<Form>,
	) -> Result<()> {
		self.call_empty(Method::Delete, &tier.subscriptions_path(env_name, webhook_id), form).await
	}
}

fn segment(value: &str) -> String {
	oauth1::encode(value)
}
