//! Authorization code exchange and implicit-flow token extraction.

// self
use crate::{
	_prelude::*,
	auth::Token,
	flows::{Client, common},
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	params::Params,
	redirect::RedirectRequest,
	schema::{GrantType, param},
};

impl<C, M> Client<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges an authorization code for a token at the token endpoint.
	///
	/// The form carries `grant_type`, `code`, `client_id`, `client_secret` and, when configured,
	/// `redirect_uri`. Any response the server returns, whatever its status, is parsed with
	/// `expected_state`; only failures without a response surface as transport faults.
	/// `deadline` bounds the round trip.
	pub async fn exchange_code(
		&self,
		code: &str,
		expected_state: Option<&str>,
		deadline: Option<Duration>,
	) -> Result<Token> {
		const KIND: FlowKind = FlowKind::CodeExchange;

		let span = FlowSpan::new(KIND, "exchange_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let configuration = self.configuration.as_ref();

				configuration.validate()?;

				let code = common::required(param::CODE, code)?;
				let deadline = common::request_deadline(deadline)?;
				let endpoint = configuration.token_endpoint()?;
				let grant = GrantType::AuthorizationCode;
				let mut params = Params::new();

				params
					.set(param::GRANT_TYPE, grant.as_str())
					.set(param::CODE, code)
					.set(param::CLIENT_ID, configuration.client_id.as_str())
					.set(param::CLIENT_SECRET, configuration.client_secret.as_str())
					.set_if_present(param::REDIRECT_URI, configuration.redirect_value());

				self.strategy.augment_exchange_request(&mut params);

				let request = common::token_request(
					&endpoint,
					&params,
					self.quirks.token_request_encoding,
					deadline,
				)?;

				common::dispatch(self, grant, request, expected_state).await
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Reads an implicit-flow token from a redirect; no request is sent.
	///
	/// The returned state is checked with the client's callback state policy.
	pub fn implicit_token(
		&self,
		redirect: &RedirectRequest,
		expected_state: Option<&str>,
	) -> Result<Token> {
		const KIND: FlowKind = FlowKind::Implicit;

		let _guard = FlowSpan::new(KIND, "implicit_token").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = self.configuration.validate().map_err(Error::from).and_then(|()| {
			Token::from_redirect_with_policy(
				redirect,
				expected_state,
				self.quirks.callback_state_policy,
			)
		});

		obs::record_result(KIND, &result);

		result
	}
}
