//! Flow orchestrators for the authorization code, implicit, and refresh grants.

pub mod authorize;

mod common;
mod exchange;
mod refresh;

pub use authorize::*;

// self
use crate::{
	_prelude::*,
	config::ClientConfiguration,
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	provider::{ClientQuirks, ProviderStrategy},
};
#[cfg(feature = "reqwest")]
use crate::{
	error::ConfigError, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper,
	provider::DefaultProviderStrategy,
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestFlowClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Coordinates OAuth 2.0 flows for a single client registration.
///
/// The client owns the HTTP transport, the transport error mapper, the configuration, and the
/// provider strategy so each flow only deals with its grant-specific fields. It holds no mutable
/// state, so clones are cheap and may be shared across tasks.
#[derive(Clone)]
pub struct Client<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every back-channel request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Client registration, never mutated after construction.
	pub configuration: Arc<ClientConfiguration>,
	/// Strategy responsible for provider-specific request and response adjustments.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// Declarative wire and state-checking toggles.
	pub quirks: ClientQuirks,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		configuration: impl Into<Arc<ClientConfiguration>>,
		strategy: Arc<dyn ProviderStrategy>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			configuration: configuration.into(),
			strategy,
			quirks: ClientQuirks::default(),
		}
	}

	/// Replaces the provider strategy.
	pub fn with_strategy(mut self, strategy: Arc<dyn ProviderStrategy>) -> Self {
		self.strategy = strategy;

		self
	}

	/// Replaces the client quirks.
	pub fn with_quirks(mut self, quirks: ClientQuirks) -> Self {
		self.quirks = quirks;

		self
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client with the default strategy and its own reqwest transport.
	///
	/// The transport never follows redirects, since token endpoints answer directly.
	pub fn new(configuration: impl Into<Arc<ClientConfiguration>>) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(
			configuration,
			Arc::new(DefaultProviderStrategy),
			ReqwestHttpClient::no_redirects()?,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("configuration", &self.configuration)
			.field("quirks", &self.quirks)
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::provider::TokenRequestEncoding;

	#[test]
	fn debug_output_hides_the_secret() {
		let configuration =
			ClientConfiguration::new("https://a/authorize", "https://a/token", "C", "hunter2");
		let client = Client::new(configuration)
			.expect("Client should build.")
			.with_quirks(ClientQuirks {
				token_request_encoding: TokenRequestEncoding::LegacyQuery,
				..Default::default()
			});
		let rendered = format!("{client:?}");

		assert!(!rendered.contains("hunter2"));
		assert!(rendered.contains("LegacyQuery"));
	}
}
