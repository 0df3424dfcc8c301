//! Wire vocabulary shared by the front and back channels.
//!
//! Field names, content types, grant and response types, and the token-type enumeration are
//! spelled exactly as RFC 6749 servers expect them.

// self
use crate::_prelude::*;

/// Request and response parameter names.
pub mod param {
	/// `access_token`
	pub const ACCESS_TOKEN: &str = "access_token";
	/// `client_id`
	pub const CLIENT_ID: &str = "client_id";
	/// `client_secret`
	pub const CLIENT_SECRET: &str = "client_secret";
	/// `code`
	pub const CODE: &str = "code";
	/// `error`
	pub const ERROR: &str = "error";
	/// `error_description`
	pub const ERROR_DESCRIPTION: &str = "error_description";
	/// `error_uri`
	pub const ERROR_URI: &str = "error_uri";
	/// `expires_in`
	pub const EXPIRES_IN: &str = "expires_in";
	/// `grant_type`
	pub const GRANT_TYPE: &str = "grant_type";
	/// `redirect_uri`
	pub const REDIRECT_URI: &str = "redirect_uri";
	/// `refresh_token`
	pub const REFRESH_TOKEN: &str = "refresh_token";
	/// `response_type`
	pub const RESPONSE_TYPE: &str = "response_type";
	/// `scope`
	pub const SCOPE: &str = "scope";
	/// `state`
	pub const STATE: &str = "state";
	/// `token_type`
	pub const TOKEN_TYPE: &str = "token_type";
}

/// Content types recognized on either channel.
pub mod content_type {
	/// `application/x-www-form-urlencoded`, used by redirects and token requests.
	pub const FORM_ENCODED: &str = "application/x-www-form-urlencoded";
	/// `application/json`, the standard token endpoint response type.
	pub const JSON: &str = "application/json";
	/// `text/javascript`, a legacy token endpoint response type.
	pub const JAVASCRIPT: &str = "text/javascript";

	/// Returns true when `actual` starts with `expected`, ignoring ASCII case.
	pub fn matches(actual: &str, expected: &str) -> bool {
		actual.len() >= expected.len()
			&& actual.as_bytes()[..expected.len()].eq_ignore_ascii_case(expected.as_bytes())
	}
}

/// Grant types accepted by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	AuthorizationCode,
	/// Refresh Token grant.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Authorization request flavors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
	/// Authorization Code flow; the redirect carries a `code`.
	#[default]
	Code,
	/// Implicit flow; the redirect carries the token itself.
	Token,
}
impl ResponseType {
	/// Returns the RFC 6749 `response_type` value.
	pub fn as_str(self) -> &'static str {
		match self {
			ResponseType::Code => "code",
			ResponseType::Token => "token",
		}
	}
}
impl Display for ResponseType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Access token presentation schemes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
	/// `Authorization: Bearer <token>`.
	#[default]
	Bearer,
	/// `Authorization: MAC <token>`.
	Mac,
}
impl TokenType {
	const TABLE: [(&'static str, TokenType); 2] =
		[("bearer", TokenType::Bearer), ("mac", TokenType::Mac)];

	/// Looks up a wire value case-insensitively, returning `None` for unknown types.
	pub fn parse(value: &str) -> Option<Self> {
		let lowered = value.trim().to_ascii_lowercase();

		Self::TABLE.iter().find(|(key, _)| *key == lowered).map(|(_, kind)| *kind)
	}

	/// Like [`TokenType::parse`] but falls back to [`TokenType::default`].
	pub fn parse_or_default(value: Option<&str>) -> Self {
		value.and_then(Self::parse).unwrap_or_default()
	}

	/// Returns the lowercase wire value.
	pub fn as_str(self) -> &'static str {
		match self {
			TokenType::Bearer => "bearer",
			TokenType::Mac => "mac",
		}
	}

	/// Returns the `Authorization` header scheme.
	pub fn scheme(self) -> &'static str {
		match self {
			TokenType::Bearer => "Bearer",
			TokenType::Mac => "MAC",
		}
	}
}
impl Display for TokenType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_type_lookup_ignores_case() {
		assert_eq!(TokenType::parse("Bearer"), Some(TokenType::Bearer));
		assert_eq!(TokenType::parse("MAC"), Some(TokenType::Mac));
		assert_eq!(TokenType::parse("pop"), None);
		assert_eq!(TokenType::parse_or_default(Some("pop")), TokenType::Bearer);
		assert_eq!(TokenType::parse_or_default(None), TokenType::Bearer);
	}

	#[test]
	fn content_type_match_is_prefix_and_case_insensitive() {
		assert!(content_type::matches("Application/JSON; charset=utf-8", content_type::JSON));
		assert!(!content_type::matches("text/html", content_type::JSON));
		assert!(!content_type::matches("", content_type::FORM_ENCODED));
	}
}
