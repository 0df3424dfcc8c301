//! Front-channel helpers: the authorization redirect URL and the code returned to the redirect.

// self
use crate::{
	_prelude::*,
	auth::StatePolicy,
	error::{ArgumentError, ConfigError, ProtocolError},
	flows::Client,
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	params::Params,
	redirect::RedirectRequest,
	schema::{ResponseType, param},
};

/// Authorization code delivered to the redirect URI.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationReturn {
	/// Single-use authorization code, never empty.
	pub code: String,
	/// State echoed by the server, if any.
	pub state: Option<String>,
}
impl AuthorizationReturn {
	/// Reads the authorization result from a redirect.
	///
	/// A declared `error` always wins, even next to a `code`. A redirect without a code yields
	/// `Ok(None)`, meaning the user has not come back from the authorization server yet.
	pub fn extract(
		redirect: &RedirectRequest,
		expected_state: Option<&str>,
		policy: StatePolicy,
	) -> Result<Option<Self>> {
		if let Some(error) = redirect.get(param::ERROR) {
			let field = |name: &str| redirect.get(name).map(str::to_owned);

			return Err(ProtocolError::from_server(
				error,
				field(param::ERROR_DESCRIPTION),
				field(param::ERROR_URI),
				field(param::STATE),
			)
			.into());
		}

		let Some(code) = redirect.get(param::CODE) else {
			return Ok(None);
		};
		let state = redirect.get(param::STATE);

		policy.verify(expected_state, state)?;

		Ok(Some(Self { code: code.to_owned(), state: state.map(str::to_owned) }))
	}
}
impl Debug for AuthorizationReturn {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationReturn")
			.field("code", &"<redacted>")
			.field("state", &self.state)
			.finish()
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the URL the user agent is redirected to.
	///
	/// Fields are emitted as `response_type`, `client_id`, `scope`, `redirect_uri`, then `state`,
	/// after which [`ProviderStrategy::augment_authorization_request`] may adjust them.
	///
	/// The result is a parsed [`Url`], so a host-only endpoint such as `https://a` comes back
	/// with its root path as `https://a/?...`.
	///
	/// [`ProviderStrategy::augment_authorization_request`]:
	/// crate::provider::ProviderStrategy::augment_authorization_request
	pub fn authorization_url(
		&self,
		state: Option<&str>,
		response_type: ResponseType,
	) -> Result<Url> {
		const KIND: FlowKind = FlowKind::AuthorizationUrl;

		let _guard = FlowSpan::new(KIND, "authorization_url").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = self.build_authorization_url(state, response_type);

		obs::record_result(KIND, &result);

		result
	}

	/// Extracts the authorization code from a redirect using the client's state policy.
	pub fn authorization_return(
		&self,
		redirect: &RedirectRequest,
		expected_state: Option<&str>,
	) -> Result<Option<AuthorizationReturn>> {
		const KIND: FlowKind = FlowKind::AuthorizationReturn;

		let _guard = FlowSpan::new(KIND, "authorization_return").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result =
			AuthorizationReturn::extract(redirect, expected_state, self.quirks.callback_state_policy);

		obs::record_result(KIND, &result);

		result
	}

	fn build_authorization_url(
		&self,
		state: Option<&str>,
		response_type: ResponseType,
	) -> Result<Url> {
		let configuration = self.configuration.as_ref();

		configuration.validate()?;

		let state = state.filter(|s| !s.trim().is_empty());

		if configuration.authorization_state_required && state.is_none() {
			return Err(ArgumentError::StateRequired.into());
		}

		let mut params = Params::new();

		params
			.set(param::RESPONSE_TYPE, response_type.as_str())
			.set(param::CLIENT_ID, configuration.client_id.as_str())
			.set_if_present(param::SCOPE, configuration.scope_value())
			.set_if_present(param::REDIRECT_URI, configuration.redirect_value())
			.set_if_present(param::STATE, state);

		self.strategy.augment_authorization_request(&mut params);

		let raw = params.append_to(configuration.authorization_url.trim());

		Url::parse(&raw)
			.map_err(|source| ConfigError::InvalidUrl { setting: "authorizationUrl", source }.into())
	}
}
