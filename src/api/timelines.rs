//! Timeline endpoints.

// self
use crate::{
	_prelude::*,
	api::Tweet,
	client::Client,
	request::{Form, Method},
};

impl Client {
	/// Most recent tweets and retweets posted by the user and the accounts they follow.
	pub async fn home_timeline(&self, form: Option<Form>) -> Result<Vec<Tweet>> {
		self.call(Method::Get, "statuses/home_timeline.json", form).await
	}

	/// Most recent tweets posted by the user named through `user_id` or `screen_name`.
	pub async fn user_timeline(&self, form: Option<Form>) -> Result<Vec<Tweet>> {
		self.call(Method::Get, "statuses/user_timeline.json", form).await
	}

	/// Most recent mentions of the authenticating user.
	pub async fn mentions_timeline(&self, form: Option<Form>) -> Result<Vec<Tweet>> {
		self.call(Method::Get, "statuses/mentions_timeline.json", form).await
	}
}
