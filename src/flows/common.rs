//! Shared helpers for flow implementations (argument checks, request assembly, dispatch).

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::Token,
	error::{ArgumentError, ConfigError},
	flows::Client,
	http::{RequestDeadline, ResponseMetadataSlot, TokenHttpClient, TokenResponse},
	oauth::TransportErrorMapper,
	params::Params,
	provider::TokenRequestEncoding,
	schema::{GrantType, content_type},
};

/// Returns `value` when it is not blank, otherwise an [`ArgumentError::Missing`].
pub(crate) fn required<'a>(argument: &'static str, value: &'a str) -> Result<&'a str> {
	if value.trim().is_empty() {
		Err(ArgumentError::Missing { argument }.into())
	} else {
		Ok(value)
	}
}

/// Converts a caller deadline into the transport representation, rejecting non-positive values.
pub(crate) fn request_deadline(deadline: Option<Duration>) -> Result<Option<RequestDeadline>> {
	let Some(deadline) = deadline else {
		return Ok(None);
	};

	if !deadline.is_positive() {
		return Err(ArgumentError::InvalidDeadline.into());
	}

	let deadline =
		std::time::Duration::try_from(deadline).map_err(|_| ArgumentError::InvalidDeadline)?;

	Ok(Some(RequestDeadline(deadline)))
}

/// Assembles a token endpoint request in the configured wire shape.
pub(crate) fn token_request(
	endpoint: &Url,
	params: &Params,
	encoding: TokenRequestEncoding,
	deadline: Option<RequestDeadline>,
) -> Result<HttpRequest> {
	let builder = Request::builder().header(CONTENT_TYPE, content_type::FORM_ENCODED);
	let mut request = match encoding {
		TokenRequestEncoding::FormBody => builder
			.method(Method::POST)
			.uri(endpoint.as_str())
			.header(ACCEPT, content_type::JSON)
			.body(params.to_form_body().into_bytes()),
		TokenRequestEncoding::LegacyQuery =>
			builder.method(Method::GET).uri(params.append_to(endpoint.as_str())).body(Vec::new()),
	}
	.map_err(ConfigError::from)?;

	if let Some(deadline) = deadline {
		request.extensions_mut().insert(deadline);
	}

	Ok(request)
}

/// Sends `request` and hands any retrieved response to the provider strategy.
///
/// Every retrieved response reaches the parser regardless of its status, since token endpoints
/// declare protocol errors in `4xx` bodies. Only failures without a response go to the mapper.
pub(crate) async fn dispatch<C, M>(
	client: &Client<C, M>,
	grant: GrantType,
	request: HttpRequest,
	expected_state: Option<&str>,
) -> Result<Token>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let meta = ResponseMetadataSlot::default();
	let instrumented = client.http_client.with_metadata(meta.clone());

	match instrumented.call(request).await {
		Ok(response) => client
			.strategy
			.parse_token_response(&TokenResponse::from_http(response), expected_state),
		Err(err) =>
			Err(client.transport_mapper.map_transport_error(grant, meta.take().as_ref(), err)),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn fields() -> Params {
		let mut params = Params::new();

		params.set("grant_type", "refresh_token").set("refresh_token", "R r");

		params
	}

	#[test]
	fn deadlines_must_be_positive() {
		assert!(matches!(request_deadline(None), Ok(None)));
		assert!(matches!(
			request_deadline(Some(Duration::ZERO)),
			Err(Error::Argument(ArgumentError::InvalidDeadline))
		));
		assert!(matches!(
			request_deadline(Some(Duration::seconds(-1))),
			Err(Error::Argument(ArgumentError::InvalidDeadline))
		));
		assert_eq!(
			request_deadline(Some(Duration::milliseconds(1500)))
				.expect("Positive deadlines are valid."),
			Some(RequestDeadline(std::time::Duration::from_millis(1500)))
		);
	}

	#[test]
	fn blank_arguments_are_missing() {
		assert!(required("code", "abc").is_ok());
		assert!(matches!(
			required("code", " "),
			Err(Error::Argument(ArgumentError::Missing { argument: "code" }))
		));
	}

	#[test]
	fn form_body_requests_post_the_fields() {
		let endpoint = Url::parse("https://a/token").expect("Endpoint fixture should parse.");
		let request = token_request(
			&endpoint,
			&fields(),
			TokenRequestEncoding::FormBody,
			Some(RequestDeadline(std::time::Duration::from_secs(2))),
		)
		.expect("Request should build.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri(), "https://a/token");
		assert_eq!(request.headers()[CONTENT_TYPE], content_type::FORM_ENCODED);
		assert_eq!(request.headers()[ACCEPT], content_type::JSON);
		assert_eq!(request.body().as_slice(), b"grant_type=refresh_token&refresh_token=R+r");
		assert_eq!(RequestDeadline::of(&request), Some(std::time::Duration::from_secs(2)));
	}

	#[test]
	fn legacy_requests_carry_the_fields_in_the_query() {
		let endpoint = Url::parse("https://a/token?tenant=t").expect("Endpoint fixture should parse.");
		let request =
			token_request(&endpoint, &fields(), TokenRequestEncoding::LegacyQuery, None)
				.expect("Request should build.");

		assert_eq!(request.method(), Method::GET);
		assert_eq!(
			request.uri(),
			"https://a/token?tenant=t&grant_type=refresh_token&refresh_token=R+r"
		);
		assert_eq!(request.headers()[CONTENT_TYPE], content_type::FORM_ENCODED);
		assert!(request.body().is_empty());
		assert_eq!(RequestDeadline::of(&request), None);
	}
}
