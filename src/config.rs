//! Client registration settings supplied by the caller's configuration store.

// self
use crate::{_prelude::*, error::ConfigError};

/// Read-only client registration consumed by [`Client`](crate::flows::Client).
///
/// Field names deserialize from camelCase keys (`clientId`, `authorizationUrl`, ...), so a
/// configuration file can be loaded with any serde format. Values are checked lazily with
/// [`ClientConfiguration::validate`] because every flow validates before doing any work.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfiguration {
	/// Authorization endpoint users are redirected to.
	#[serde(default)]
	pub authorization_url: String,
	/// Token endpoint used for code exchange and refresh.
	#[serde(default)]
	pub token_url: String,
	/// OAuth client identifier.
	#[serde(default)]
	pub client_id: String,
	/// OAuth client secret.
	#[serde(default)]
	pub client_secret: String,
	/// Redirect URI registered with the provider.
	#[serde(default)]
	pub redirect_url: Option<String>,
	/// Space-delimited scope requested by the client.
	#[serde(default)]
	pub scope: Option<String>,
	/// Requires callers to supply a CSRF state when building authorization URLs.
	#[serde(default)]
	pub authorization_state_required: bool,
}
impl ClientConfiguration {
	/// Creates a configuration with the four required settings.
	pub fn new(
		authorization_url: impl Into<String>,
		token_url: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		Self {
			authorization_url: authorization_url.into(),
			token_url: token_url.into(),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			redirect_url: None,
			scope: None,
			authorization_state_required: false,
		}
	}

	/// Sets the redirect URI.
	pub fn with_redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
		self.redirect_url = Some(redirect_url.into());

		self
	}

	/// Sets the requested scope.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Toggles the CSRF state requirement.
	pub fn with_authorization_state_required(mut self, required: bool) -> Self {
		self.authorization_state_required = required;

		self
	}

	/// Rejects blank required settings.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let required = [
			("authorizationUrl", &self.authorization_url),
			("clientId", &self.client_id),
			("clientSecret", &self.client_secret),
			("tokenUrl", &self.token_url),
		];

		for (setting, value) in required {
			if value.trim().is_empty() {
				return Err(ConfigError::MissingSetting { setting });
			}
		}

		Ok(())
	}

	/// Parses the token endpoint.
	pub fn token_endpoint(&self) -> Result<Url, ConfigError> {
		Url::parse(self.token_url.trim())
			.map_err(|source| ConfigError::InvalidUrl { setting: "tokenUrl", source })
	}

	pub(crate) fn scope_value(&self) -> Option<&str> {
		self.scope.as_deref().filter(|s| !s.trim().is_empty())
	}

	pub(crate) fn redirect_value(&self) -> Option<&str> {
		self.redirect_url.as_deref().filter(|s| !s.trim().is_empty())
	}
}
impl Debug for ClientConfiguration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfiguration")
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("redirect_url", &self.redirect_url)
			.field("scope", &self.scope)
			.field("authorization_state_required", &self.authorization_state_required)
			.finish()
	}
}
