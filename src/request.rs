//! Request descriptors handed from endpoint callers to the dispatcher.

// std
use std::collections::btree_map::Entry;
// self
use crate::_prelude::*;

/// HTTP verbs understood by the executor.
///
/// [`Method::Get`] is the read method; the other variants are write-like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	/// Read.
	Get,
	/// Create or mutate.
	Post,
	/// Replace or re-enable.
	Put,
	/// Remove.
	Delete,
}
impl Method {
	/// Returns the canonical upper-case verb used in signatures and on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}

	/// Returns `true` when parameters travel in the request body instead of the query.
	pub const fn sends_body(self) -> bool {
		matches!(self, Method::Post | Method::Put)
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ordered, multi-valued form parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form(BTreeMap<String, Vec<String>>);
impl Form {
	/// Creates an empty form.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces every value stored under `key` with `value`.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.0.insert(key.into(), vec![value.into()]);

		self
	}

	/// Appends `value` to the values stored under `key`.
	pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		match self.0.entry(key.into()) {
			Entry::Occupied(mut e) => e.get_mut().push(value.into()),
			Entry::Vacant(e) => {
				e.insert(vec![value.into()]);
			},
		}

		self
	}

	/// Builder-style [`Form::set`].
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(key, value);

		self
	}

	/// Returns the first value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(|values| values.first()).map(String::as_str)
	}

	/// Returns every value stored under `key`.
	pub fn get_all(&self, key: &str) -> &[String] {
		self.0.get(key).map(Vec::as_slice).unwrap_or_default()
	}

	/// Returns `true` when no parameter is present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over `(key, value)` pairs, repeating keys for multi-valued entries.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0
			.iter()
			.flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
	}

	/// Serializes the form as `application/x-www-form-urlencoded`.
	pub fn encode(&self) -> String {
		url::form_urlencoded::Serializer::new(String::new()).extend_pairs(self.pairs()).finish()
	}
}
impl<K, V> FromIterator<(K, V)> for Form
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut form = Form::new();

		for (k, v) in iter {
			form.add(k, v);
		}

		form
	}
}

/// Immutable description of one API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	method: Method,
	url: Url,
	form: Form,
}
impl ApiRequest {
	/// Creates a request for `url` with the given verb and parameters.
	pub fn new(method: Method, url: Url, form: Option<Form>) -> Self {
		Self { method, url, form: form.unwrap_or_default() }
	}

	/// Shorthand for a [`Method::Get`] request.
	pub fn get(url: Url, form: Option<Form>) -> Self {
		Self::new(Method::Get, url, form)
	}

	/// Shorthand for a [`Method::Post`] request.
	pub fn post(url: Url, form: Option<Form>) -> Self {
		Self::new(Method::Post, url, form)
	}

	/// HTTP verb.
	pub fn method(&self) -> Method {
		self.method
	}

	/// Target URL.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Form parameters.
	pub fn form(&self) -> &Form {
		&self.form
	}

	/// URL path, used as the endpoint label in spans and metrics.
	pub fn endpoint(&self) -> &str {
		self.url.path()
	}
}
