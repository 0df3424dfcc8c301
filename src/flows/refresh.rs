//! Refresh token grant.

// self
use crate::{
	_prelude::*,
	auth::Token,
	flows::{Client, common},
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	params::Params,
	schema::{GrantType, param},
};

impl<C, M> Client<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Trades a refresh token for a new access token.
	///
	/// The form carries `grant_type`, `refresh_token`, `client_id`, `client_secret` and, when
	/// configured, `scope`. The client credentials are left out when
	/// [`ClientQuirks::refresh_omits_client_credentials`](crate::provider::ClientQuirks) is set,
	/// and strategies can also [`clear`](Params::clear) them in
	/// [`augment_refresh_request`](crate::provider::ProviderStrategy::augment_refresh_request).
	/// Servers that omit a new refresh token yield a token without one; keep the old value if
	/// it remains valid for the provider.
	pub async fn refresh_token(
		&self,
		refresh_token: &str,
		deadline: Option<Duration>,
	) -> Result<Token> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let configuration = self.configuration.as_ref();

				configuration.validate()?;

				let refresh_token = common::required(param::REFRESH_TOKEN, refresh_token)?;
				let deadline = common::request_deadline(deadline)?;
				let endpoint = configuration.token_endpoint()?;
				let grant = GrantType::RefreshToken;
				let mut params = Params::new();

				params
					.set(param::GRANT_TYPE, grant.as_str())
					.set(param::REFRESH_TOKEN, refresh_token);

				if !self.quirks.refresh_omits_client_credentials {
					params
						.set(param::CLIENT_ID, configuration.client_id.as_str())
						.set(param::CLIENT_SECRET, configuration.client_secret.as_str());
				}

				params.set_if_present(param::SCOPE, configuration.scope_value());

				self.strategy.augment_refresh_request(&mut params);

				let request = common::token_request(
					&endpoint,
					&params,
					self.quirks.token_request_encoding,
					deadline,
				)?;

				common::dispatch(self, grant, request, None).await
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}
}
