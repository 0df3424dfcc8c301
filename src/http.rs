//! Transport primitives for back-channel token requests.
//!
//! The module exposes [`TokenHttpClient`] alongside [`ResponseMetadata`] and
//! [`ResponseMetadataSlot`] so downstream crates can plug in custom HTTP clients. Implementations
//! call [`ResponseMetadataSlot::take`] before dispatching a request and
//! [`ResponseMetadataSlot::store`] once an HTTP status is known, so transport failures that
//! happen after the headers arrive (for example a truncated body) still carry the status.
//!
//! Requests may carry a [`RequestDeadline`] extension. Transports must bound the round trip
//! by it and report an expired deadline as a timeout.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::header::{CONTENT_TYPE, HeaderValue},
};
// self
use crate::{_prelude::*, error::TransportError};

/// Abstraction over HTTP transports capable of executing token requests while publishing
/// response metadata.
///
/// Callers provide an implementation (typically behind `Arc<T>`) and the client requests
/// short-lived [`AsyncHttpClient`] handles that each carry a clone of a
/// [`ResponseMetadataSlot`]. Implementations must be `Send + Sync + 'static` so they can be
/// shared across clients, and the futures their handles return must be `Send`.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle tied to a [`ResponseMetadataSlot`].
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle that records outcomes in `slot`.
	///
	/// # Metadata Contract
	///
	/// - Call [`ResponseMetadataSlot::take`] before submitting the HTTP request so stale
	///   information never leaks across calls.
	/// - Once an HTTP response provides a status, save it with [`ResponseMetadataSlot::store`].
	/// - Honor the [`RequestDeadline`] extension when present.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Captures metadata from the most recent HTTP response for downstream error mapping.
///
/// Additional metadata fields may be added in future releases, so downstream code
/// should construct values using field names instead of struct update syntax.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the token endpoint, if available.
	pub status: Option<u16>,
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Upper bound for a single round trip, attached to [`HttpRequest`] extensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestDeadline(pub std::time::Duration);
impl RequestDeadline {
	/// Reads the deadline attached to `request`, if any.
	pub fn of(request: &HttpRequest) -> Option<std::time::Duration> {
		request.extensions().get::<Self>().map(|deadline| deadline.0)
	}
}

/// Raw back-channel response handed to the token parser.
///
/// Every response the transport retrieves lands here, including `4xx` bodies, because that is
/// how token endpoints report protocol errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
	/// HTTP status code.
	pub status: u16,
	/// `Content-Type` header, if any.
	pub content_type: Option<String>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl TokenResponse {
	/// Builds a response from its parts.
	pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
		Self { status, content_type: content_type.map(str::to_owned), body: body.into() }
	}

	/// Converts a transport response.
	pub fn from_http(response: HttpResponse) -> Self {
		let content_type = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value: &HeaderValue| value.to_str().ok())
			.map(str::to_owned);

		Self { status: response.status().as_u16(), content_type, body: response.into_body() }
	}

	/// Declared content type, or an empty string.
	pub fn content_type(&self) -> &str {
		self.content_type.as_deref().unwrap_or_default()
	}

	/// Returns true for `2xx` statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Parses the body as a JSON object.
	pub fn json(&self) -> Result<serde_json::Map<String, serde_json::Value>, TransportError> {
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| TransportError::MalformedBody { source, status: Some(self.status) })
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token
/// endpoints return results directly instead of delegating to another URI. Configure
/// any custom [`ReqwestClient`] to disable redirect following.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that never follows redirects.
	pub fn no_redirects() -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	pub(crate) fn instrumented(&self, slot: ResponseMetadataSlot) -> InstrumentedHandle {
		InstrumentedHandle::new(self.0.clone(), slot)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

#[cfg(feature = "reqwest")]
/// Instrumented adapter that implements [`AsyncHttpClient`] for reqwest.
pub(crate) struct InstrumentedHttpClient {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}

#[cfg(feature = "reqwest")]
/// Public handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[derive(Clone)]
pub struct InstrumentedHandle(Arc<InstrumentedHttpClient>);
#[cfg(feature = "reqwest")]
impl InstrumentedHandle {
	fn new(client: ReqwestClient, slot: ResponseMetadataSlot) -> Self {
		Self(Arc::new(InstrumentedHttpClient { client, slot }))
	}
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for InstrumentedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			client.slot.take();

			let deadline = RequestDeadline::of(&request);
			let mut request: reqwest::Request = request.try_into().map_err(Box::new)?;

			if let Some(deadline) = deadline {
				*request.timeout_mut() = Some(deadline);
			}

			let response = client.client.execute(request).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			client.slot.store(ResponseMetadata { status: Some(status.as_u16()) });

			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = InstrumentedHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		self.instrumented(slot)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_response_reads_content_type_and_status() {
		let mut http = HttpResponse::new(br#"{"access_token":"T"}"#.to_vec());

		*http.status_mut() = oauth2::http::StatusCode::BAD_REQUEST;
		http.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		let response = TokenResponse::from_http(http);

		assert_eq!(response.status, 400);
		assert!(!response.is_success());
		assert_eq!(response.content_type(), "application/json");
		assert_eq!(
			response.json().expect("Fixture body should parse.").get("access_token"),
			Some(&serde_json::Value::String("T".into()))
		);
	}

	#[test]
	fn non_object_bodies_are_transport_faults() {
		let response = TokenResponse::new(200, Some("application/json"), b"[1,2]".to_vec());
		let err = response.json().expect_err("Arrays are not token responses.");

		assert!(matches!(err, TransportError::MalformedBody { status: Some(200), .. }));
		assert!(err.to_string().starts_with("Could not get an access token -- "));
	}

	#[test]
	fn metadata_slot_take_clears_value() {
		let slot = ResponseMetadataSlot::default();

		slot.store(ResponseMetadata { status: Some(502) });

		assert_eq!(slot.take().and_then(|meta| meta.status), Some(502));
		assert!(slot.take().is_none());
	}

	#[test]
	fn deadline_round_trips_through_extensions() {
		let mut request = HttpRequest::new(Vec::new());

		assert_eq!(RequestDeadline::of(&request), None);

		request.extensions_mut().insert(RequestDeadline(std::time::Duration::from_secs(3)));

		assert_eq!(RequestDeadline::of(&request), Some(std::time::Duration::from_secs(3)));
	}
}
