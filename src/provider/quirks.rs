//! Declarative client quirks that influence how flows talk to a provider.

// self
use crate::{_prelude::*, auth::StatePolicy};

/// Client-level quirks, loadable from configuration with snake_case keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientQuirks {
	/// Wire shape of code exchange and refresh requests.
	pub token_request_encoding: TokenRequestEncoding,
	/// State comparison applied to front-channel redirects.
	pub callback_state_policy: StatePolicy,
	/// Leave `client_id` and `client_secret` out of refresh requests, for servers that only
	/// expect `grant_type`, `refresh_token`, and `scope` there.
	pub refresh_omits_client_credentials: bool,
}

/// How token endpoint requests carry their fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenRequestEncoding {
	/// `POST` with an `application/x-www-form-urlencoded` body.
	#[default]
	FormBody,
	/// `GET` with the fields in the query string, for servers that only accept that shape.
	LegacyQuery,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn quirks_deserialize_with_defaults() {
		let quirks: ClientQuirks = serde_json::from_str(r#"{"token_request_encoding":"legacy_query"}"#)
			.expect("Quirks fixture should deserialize.");

		assert_eq!(quirks.token_request_encoding, TokenRequestEncoding::LegacyQuery);
		assert_eq!(quirks.callback_state_policy, StatePolicy::Strict);
		assert!(!quirks.refresh_omits_client_credentials);
		assert_eq!(
			serde_json::from_str::<ClientQuirks>("{}").expect("Empty quirks should deserialize."),
			ClientQuirks::default()
		);
	}
}
