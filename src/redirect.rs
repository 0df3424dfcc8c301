//! Inbound front-channel requests delivered to the redirect URI.

// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, params::Params, schema::content_type};

/// Parameters of the request that invoked the redirect handler.
///
/// Lookups return the first non-empty occurrence of a field, so a value in the query string
/// wins over one repeated in the fragment or form body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectRequest {
	content_type: String,
	fields: Vec<(String, String)>,
}
impl RedirectRequest {
	/// Wraps already-decoded fields with the request's content type.
	pub fn new<I, K, V>(content_type: impl Into<String>, fields: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			content_type: content_type.into(),
			fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}

	/// Reads the query string and the fragment of a callback URL.
	///
	/// Implicit-flow servers return the token in the fragment, which browsers never send to the
	/// server; redirect pages usually forward it in a follow-up request and can rebuild the URL
	/// they received.
	pub fn from_url(url: &Url) -> Self {
		let mut fields: Vec<(String, String)> = url.query_pairs().into_owned().collect();

		if let Some(fragment) = url.fragment() {
			fields.extend(form_urlencoded::parse(fragment.as_bytes()).into_owned());
		}

		Self { content_type: content_type::FORM_ENCODED.into(), fields }
	}

	/// Parses a raw query string, with or without its leading `?`.
	pub fn from_query(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);

		Self {
			content_type: content_type::FORM_ENCODED.into(),
			fields: form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
		}
	}

	/// Parses a posted body; the declared content type is kept for validation.
	pub fn from_form_body(content_type: impl Into<String>, body: &[u8]) -> Self {
		Self {
			content_type: content_type.into(),
			fields: form_urlencoded::parse(body).into_owned().collect(),
		}
	}

	/// Declared content type.
	pub fn content_type(&self) -> &str {
		&self.content_type
	}

	/// First non-empty value of `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.fields.iter().find(|(k, v)| k == name && !v.is_empty()).map(|(_, v)| v.as_str())
	}

	/// Snapshot of the fields as [`Params`], keeping the first non-empty value of each key.
	pub fn to_params(&self) -> Params {
		let mut params = Params::new();

		for (key, value) in &self.fields {
			if !value.is_empty() && !params.contains(key) {
				params.set(key, value);
			}
		}

		params
	}
}
impl FromStr for RedirectRequest {
	type Err = url::ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Url::parse(s).map(|url| Self::from_url(&url))
	}
}
