//! Ordered request parameters handed to provider hooks before serialization.

// std
use std::slice::Iter;
// crates.io
use url::form_urlencoded;

/// Insertion-ordered list of wire parameters.
///
/// A `None` value keeps the key in place but omits it from the serialized output, so hooks can
/// suppress a field without disturbing the order of the others.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, Option<String>)>);
impl Params {
	/// Creates an empty parameter list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`, replacing an existing entry in place or appending a new one.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.put(key.into(), Some(value.into()))
	}

	/// Sets `key` only when `value` is present and not blank.
	pub fn set_if_present(&mut self, key: impl Into<String>, value: Option<&str>) -> &mut Self {
		if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
			self.set(key, value);
		}

		self
	}

	/// Keeps `key` in position but clears its value so it is not serialized.
	pub fn clear(&mut self, key: &str) -> &mut Self {
		self.put(key.to_owned(), None)
	}

	/// Removes `key` entirely, returning its value if it had one.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		let idx = self.0.iter().position(|(k, _)| k == key)?;

		self.0.remove(idx).1
	}

	/// Renames `from` to `to` without moving it. Returns false when `from` is absent.
	pub fn rename(&mut self, from: &str, to: impl Into<String>) -> bool {
		if !self.contains(from) {
			return false;
		}

		let to = to.into();

		if to != from {
			self.0.retain(|(k, _)| *k != to);

			if let Some(entry) = self.0.iter_mut().find(|(k, _)| k == from) {
				entry.0 = to;
			}
		}

		true
	}

	/// Returns the value for `key`, if set.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).and_then(|(_, v)| v.as_deref())
	}

	/// Returns true when `key` is present, with or without a value.
	pub fn contains(&self, key: &str) -> bool {
		self.0.iter().any(|(k, _)| k == key)
	}

	/// Number of entries, including cleared ones.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the list holds no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over entries that will be serialized.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		ParamsIter { inner: self.0.iter() }
	}

	/// `application/x-www-form-urlencoded` serialization without a leading `?`.
	pub fn to_form_body(&self) -> String {
		let mut serializer = form_urlencoded::Serializer::new(String::new());

		for (key, value) in self.iter() {
			serializer.append_pair(key, value);
		}

		serializer.finish()
	}

	/// Query-string serialization: `?` followed by the form body, or an empty string when
	/// nothing would be serialized.
	pub fn to_query_string(&self) -> String {
		let body = self.to_form_body();

		if body.is_empty() { body } else { format!("?{body}") }
	}

	/// Appends the serialized parameters to the query of `base`, joining with `&` when `base`
	/// already has a query component.
	///
	/// A `#fragment` on `base` stays after the query.
	pub fn append_to(&self, base: &str) -> String {
		let body = self.to_form_body();

		if body.is_empty() {
			return base.to_owned();
		}

		let (base, fragment) = match base.find('#') {
			Some(idx) => base.split_at(idx),
			None => (base, ""),
		};

		match base.find('?') {
			None => format!("{base}?{body}{fragment}"),
			Some(idx) if idx + 1 == base.len() || base.ends_with('&') =>
				format!("{base}{body}{fragment}"),
			Some(_) => format!("{base}&{body}{fragment}"),
		}
	}

	fn put(&mut self, key: String, value: Option<String>) -> &mut Self {
		match self.0.iter_mut().find(|(k, _)| *k == key) {
			Some(entry) => entry.1 = value,
			None => self.0.push((key, value)),
		}

		self
	}
}
impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut params = Self::new();

		for (key, value) in iter {
			params.set(key, value);
		}

		params
	}
}

struct ParamsIter<'a> {
	inner: Iter<'a, (String, Option<String>)>,
}
impl<'a> Iterator for ParamsIter<'a> {
	type Item = (&'a str, &'a str);

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let (key, value) = self.inner.next()?;

			if let Some(value) = value {
				return Some((key.as_str(), value.as_str()));
			}
		}
	}
}
