//! Provider strategy hooks that customize authorization and token requests.
//!
//! Implementations decorate outgoing parameters and normalize token responses without tying
//! flows to any particular HTTP client.

// self
use crate::{_prelude::*, auth::Token, http::TokenResponse, params::Params};

/// Strategy hook that allows providers to decorate requests and reinterpret responses.
///
/// Implementors are required to be `Send + Sync`, and the hooks use crate-owned data types so
/// downstream crates never depend on transport-specific structures. Every hook has a default,
/// so override only what a provider needs.
pub trait ProviderStrategy: Send + Sync {
	/// Adjusts the authorization redirect parameters before they are serialized.
	fn augment_authorization_request(&self, _params: &mut Params) {}

	/// Adjusts the code exchange form before dispatch.
	///
	/// Use this for fields such as `audience` or `resource`, or to drop `client_secret` for
	/// providers that authenticate clients differently.
	fn augment_exchange_request(&self, _params: &mut Params) {}

	/// Adjusts the refresh form before dispatch.
	fn augment_refresh_request(&self, _params: &mut Params) {}

	/// Converts a retrievable token endpoint response, of any HTTP status, into a token.
	///
	/// The default runs the standard back-channel parser.
	fn parse_token_response(
		&self,
		response: &TokenResponse,
		expected_state: Option<&str>,
	) -> Result<Token> {
		Token::from_token_response(response, expected_state)
	}
}

/// Strategy that applies no provider-specific behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {}
