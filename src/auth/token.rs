//! Access token value produced by the front- and back-channel parsers.

mod parse;
pub mod secret;

pub use secret::*;

// crates.io
use time::macros;
// self
use crate::{
	_prelude::*,
	auth::StatePolicy,
	error::ProtocolError,
	http::TokenResponse,
	redirect::RedirectRequest,
	schema::TokenType,
};

/// Immutable access token.
///
/// The access token is never empty; every constructor rejects a blank value with
/// [`ProtocolError::NO_ACCESS_TOKEN`], deserialization included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawToken")]
pub struct Token {
	access_token: TokenSecret,
	token_type: TokenType,
	expires_at: Option<OffsetDateTime>,
	scope: Vec<String>,
	refresh_token: Option<TokenSecret>,
}
impl Token {
	/// Expiration reported for tokens without a lifetime.
	pub const NO_EXPIRY: OffsetDateTime = macros::datetime!(9999-12-31 23:59:59 UTC);

	/// Creates a token, rejecting a blank access token.
	pub fn new(access_token: impl Into<String>, token_type: TokenType) -> Result<Self> {
		let access_token = access_token.into();

		if access_token.trim().is_empty() {
			return Err(ProtocolError::local(ProtocolError::NO_ACCESS_TOKEN).into());
		}

		Ok(Self {
			access_token: TokenSecret::new(access_token),
			token_type,
			expires_at: None,
			scope: Vec::new(),
			refresh_token: None,
		})
	}

	/// Parses an implicit-flow redirect, requiring the state to be echoed when one is expected.
	pub fn from_redirect(redirect: &RedirectRequest, expected_state: Option<&str>) -> Result<Self> {
		Self::from_redirect_with_policy(redirect, expected_state, StatePolicy::Strict)
	}

	/// Parses an implicit-flow redirect with an explicit state policy.
	pub fn from_redirect_with_policy(
		redirect: &RedirectRequest,
		expected_state: Option<&str>,
		policy: StatePolicy,
	) -> Result<Self> {
		parse::front_channel(redirect, expected_state, policy, OffsetDateTime::now_utc())
	}

	/// Parses a token endpoint response. An echoed state is checked only when present.
	pub fn from_token_response(
		response: &TokenResponse,
		expected_state: Option<&str>,
	) -> Result<Self> {
		parse::back_channel(response, expected_state, OffsetDateTime::now_utc())
	}

	/// Sets an absolute expiry.
	pub fn with_expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Replaces the granted scope.
	pub fn with_scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = scope.into_iter().map(Into::into).collect();

		self
	}

	/// Attaches a refresh token; blank values are ignored.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		let refresh_token = refresh_token.into();

		if !refresh_token.trim().is_empty() {
			self.refresh_token = Some(TokenSecret::new(refresh_token));
		}

		self
	}

	/// Access token secret; callers must avoid logging it.
	pub fn access_token(&self) -> &TokenSecret {
		&self.access_token
	}

	/// Presentation scheme.
	pub fn token_type(&self) -> TokenType {
		self.token_type
	}

	/// Absolute expiry, or `None` when the server supplied no usable lifetime.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// Absolute expiry, or [`Token::NO_EXPIRY`].
	pub fn expiration(&self) -> OffsetDateTime {
		self.expires_at.unwrap_or(Self::NO_EXPIRY)
	}

	/// Granted scope in wire order, duplicates preserved.
	pub fn scope(&self) -> &[String] {
		&self.scope
	}

	/// Refresh token, only ever issued through the back channel.
	pub fn refresh_token(&self) -> Option<&TokenSecret> {
		self.refresh_token.as_ref()
	}

	/// Returns true once `instant` reaches the expiry.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}

	/// Checks expiry against the current UTC clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// `Authorization` header value for resource requests, e.g. `Bearer <token>`.
	pub fn authorization_header(&self) -> String {
		format!("{} {}", self.token_type.scheme(), self.access_token.expose())
	}
}

#[derive(Deserialize)]
struct RawToken {
	access_token: String,
	#[serde(default)]
	token_type: TokenType,
	#[serde(default)]
	expires_at: Option<OffsetDateTime>,
	#[serde(default)]
	scope: Vec<String>,
	#[serde(default)]
	refresh_token: Option<String>,
}
impl TryFrom<RawToken> for Token {
	type Error = ProtocolError;

	fn try_from(raw: RawToken) -> Result<Self, Self::Error> {
		let mut token = Token::new(raw.access_token, raw.token_type)
			.map_err(|_| ProtocolError::local(ProtocolError::NO_ACCESS_TOKEN))?
			.with_scope(raw.scope);

		token.expires_at = raw.expires_at;

		if let Some(refresh_token) = raw.refresh_token {
			token = token.with_refresh_token(refresh_token);
		}

		Ok(token)
	}
}
