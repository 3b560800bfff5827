//! Direct message endpoints.

// self
use crate::{
	_prelude::*,
	api::{DirectMessage, DmEventList},
	client::Client,
	request::{Form, Method},
};

impl Client {
	/// Lists direct message events (sent and received) from the last 30 days, newest first.
	pub async fn direct_messages_list(&self, form: Option<Form>) -> Result<DmEventList> {
		self.call(Method::Get, "direct_messages/events/list.json", form).await
	}

	/// Lists legacy direct messages sent by the authenticated user.
	pub async fn direct_messages_sent(&self, form: Option<Form>) -> Result<Vec<DirectMessage>> {
		self.call(Method::Get, "direct_messages/sent.json", form).await
	}

	/// Fetches one direct message; pass its `id` in `form`.
	pub async fn direct_message_show(&self, form: Option<Form>) -> Result<DirectMessage> {
		self.call(Method::Get, "direct_messages/events/show.json", form).await
	}

	/// Sends a legacy direct message to `screen_name`.
	pub async fn post_dm_to_screen_name(
		&self,
		text: &str,
		screen_name: &str,
	) -> Result<DirectMessage> {
		let form = Form::new().with("screen_name", screen_name).with("text", text);

		self.call(Method::Post, "direct_messages/new.json", Some(form)).await
	}

	/// Sends a legacy direct message to `user_id`.
	pub async fn post_dm_to_user_id(&self, text: &str, user_id: i64) -> Result<DirectMessage> {
		let form = Form::new().with("user_id", user_id.to_string()).with("text", text);

		self.call(Method::Post, "direct_messages/new.json", Some(form)).await
	}

	/// Deletes the direct message `id`.
	pub async fn delete_direct_message(
		&self,
		id: i64,
		include_entities: bool,
	) -> Result<DirectMessage> {
		let form = Form::new()
			.with("id", id.to_string())
			.with("include_entities", include_entities.to_string());

		self.call(Method::Post, "direct_messages/events/destroy.json", Some(form)).await
	}

	/// Shows a typing indicator to `recipient_id`. The response carries no payload.
	pub async fn indicate_typing(&self, recipient_id: i64) -> Result<()> {
		let form = Form::new().with("recipient_id", recipient_id.to_string());

		self.call_empty(Method::Post, "direct_messages/indicate_typing.json", Some(form)).await
	}
}
