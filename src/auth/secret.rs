//! Consumer and token secrets.
//!
//! Secrets only ever leave this type in two shapes: the raw value through [`Secret::expose`],
//! and the percent-encoded half of an HMAC signing key. Formatting never prints the value.

// self
use crate::{_prelude::*, auth::oauth1};

const REDACTED: &str = "<redacted>";

/// Shared secret that stays out of logs and debug output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	/// Wraps a secret value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw value. Never log it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the secret is empty or whitespace only.
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}

	/// Percent-encoded form used as one half of an HMAC-SHA1 signing key.
	pub(crate) fn key_part(&self) -> String {
		oauth1::encode(&self.0)
	}
}
impl From<&str> for Secret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for Secret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Secret({REDACTED})")
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(REDACTED)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn formatting_never_prints_the_value() {
		let secret = Secret::new("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw");

		assert_eq!(format!("{secret:?}"), "Secret(<redacted>)");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(format!("{:?}", Some(&secret)), "Some(Secret(<redacted>))");
	}

	#[test]
	fn key_part_is_percent_encoded() {
		assert_eq!(Secret::new("a b&c").key_part(), "a%20b%26c");
		assert_eq!(Secret::default().key_part(), "");
	}

	#[test]
	fn blank_secrets_are_detected() {
		assert!(Secret::new(" \t").is_blank());
		assert!(!Secret::new("s").is_blank());
	}

	#[test]
	fn serializes_as_plain_string() {
		let json = serde_json::to_string(&Secret::new("abc")).expect("Secret should serialize.");

		assert_eq!(json, "\"abc\"");
	}
}
