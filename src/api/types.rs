//! Records decoded from API responses.
//!
//! Only the fields the crate's operations rely on are modelled; unknown fields are ignored and
//! missing ones fall back to their defaults, so partial payloads still decode.

// self
use crate::_prelude::*;

/// Hashtag entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hashtag {
	/// Hashtag text without the leading `#`.
	pub text: String,
	/// Start and end offsets in the text.
	pub indices: Vec<i64>,
}

/// URL entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlEntity {
	/// Shortened URL as it appears in the text.
	pub url: String,
	/// Original URL.
	pub expanded_url: String,
	/// URL shown to users.
	pub display_url: String,
	/// Start and end offsets in the text.
	pub indices: Vec<i64>,
}

/// Mention entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserMention {
	/// Numeric user id.
	pub id: i64,
	/// User id as a string.
	pub id_str: String,
	/// Display name.
	pub name: String,
	/// Screen name.
	pub screen_name: String,
	/// Start and end offsets in the text.
	pub indices: Vec<i64>,
}

/// Entities extracted from a text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entities {
	/// Hashtags.
	pub hashtags: Vec<Hashtag>,
	/// Links.
	pub urls: Vec<UrlEntity>,
	/// Mentions.
	pub user_mentions: Vec<UserMention>,
}

/// Account profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
	/// Numeric user id.
	pub id: i64,
	/// User id as a string.
	pub id_str: String,
	/// Display name.
	pub name: String,
	/// Screen name.
	pub screen_name: String,
	/// Free-form location.
	pub location: String,
	/// Profile description.
	pub description: String,
	/// Follower count.
	pub followers_count: i64,
	/// Following count.
	pub friends_count: i64,
	/// Whether tweets are protected.
	pub protected: bool,
	/// Whether the account is verified.
	pub verified: bool,
	/// Creation time as rendered by the service.
	pub created_at: String,
}

/// Status update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tweet {
	/// Numeric id.
	pub id: i64,
	/// Id as a string.
	pub id_str: String,
	/// Creation time as rendered by the service.
	pub created_at: String,
	/// Text in compatibility mode.
	pub text: String,
	/// Untruncated text in extended mode.
	pub full_text: Option<String>,
	/// Author.
	pub user: User,
	/// Entities found in the text.
	pub entities: Entities,
	/// Id of the status replied to.
	pub in_reply_to_status_id_str: Option<String>,
	/// Retweet count.
	pub retweet_count: i64,
	/// Like count.
	pub favorite_count: i64,
	/// Detected language.
	pub lang: Option<String>,
}

/// Legacy direct message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectMessage {
	/// Numeric id.
	pub id: i64,
	/// Id as a string.
	pub id_str: String,
	/// Creation time as rendered by the service.
	pub created_at: String,
	/// Message text.
	pub text: String,
	/// Entities found in the text.
	pub entities: Entities,
	/// Recipient profile.
	pub recipient: User,
	/// Recipient id.
	pub recipient_id: i64,
	/// Recipient screen name.
	pub recipient_screen_name: String,
	/// Sender profile.
	pub sender: User,
	/// Sender id.
	pub sender_id: i64,
	/// Sender screen name.
	pub sender_screen_name: String,
}

/// Text and entities of a direct message event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageData {
	/// Message text.
	pub text: String,
	/// Entities found in the text.
	pub entities: Entities,
}

/// Recipient of a direct message event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTarget {
	/// Recipient id.
	pub recipient_id: String,
}

/// `message_create` payload of a direct message event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCreate {
	/// Recipient.
	pub target: MessageTarget,
	/// Sender id.
	pub sender_id: String,
	/// Message body.
	pub message_data: MessageData,
}

/// Direct message event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmEvent {
	/// Event type, `message_create` for messages.
	#[serde(rename = "type")]
	pub event_type: String,
	/// Event id.
	pub id: String,
	/// Creation time in epoch milliseconds, as a string.
	pub created_timestamp: String,
	/// Message payload.
	pub message_create: MessageCreate,
}

/// Page of direct message events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmEventList {
	/// Cursor of the next page, absent on the last one.
	pub next_cursor: Option<String>,
	/// Events, newest first.
	pub events: Vec<DmEvent>,
}

/// Account activity subscription counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookCount {
	/// Application account name.
	pub account_name: String,
	/// Active subscriptions across all activities.
	#[serde(rename = "subscriptions_count_all")]
	pub subscriptions_all: String,
	/// Active direct message subscriptions.
	#[serde(rename = "subscriptions_count_direct_messages")]
	pub subscriptions_direct_messages: String,
}

/// Registered webhook.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
	/// Webhook id.
	pub id: String,
	/// Callback URL.
	pub url: String,
	/// Whether the last challenge-response check passed.
	pub valid: bool,
	/// Registration time as rendered by the service.
	#[serde(alias = "created_timestamp")]
	pub created_at: String,
}

/// One subscribed user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
	/// Subscribed user id.
	pub user_id: String,
}

/// Subscriptions of a webhook environment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionList {
	/// Environment name.
	pub environment: String,
	/// Application id.
	pub application_id: String,
	/// Subscribed users.
	pub subscriptions: Vec<Subscription>,
}
