//! Request signing contracts that attach issued tokens to outbound resource requests.

// crates.io
use oauth2::{
	HttpRequest,
	http::header::{AUTHORIZATION, HeaderValue},
};
// self
use crate::{_prelude::*, auth::Token, error::ArgumentError};
#[cfg(feature = "reqwest")]
use crate::{flows::Client, http::ReqwestHttpClient, oauth::TransportErrorMapper};

/// Describes how to attach a [`Token`] to an outbound request without constraining the HTTP
/// client type.
///
/// The trait is generic over both the request and error types so implementers can integrate
/// with any client builder while keeping this crate free of those dependencies.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects authorization state derived from `token`.
	fn attach_token(&self, request: Request, token: &Token) -> Result<Request, Error>;
}

/// Signer that sets `Authorization: <scheme> <access token>`.
///
/// The scheme follows the token type, `Bearer` or `MAC`. The header is marked sensitive so
/// HTTP clients leave it out of their debug output.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorizationHeaderSigner;
impl AuthorizationHeaderSigner {
	fn header_value(token: &Token) -> Result<HeaderValue> {
		let mut value =
			HeaderValue::from_str(&token.authorization_header()).map_err(ArgumentError::from)?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl RequestSignerExt<HttpRequest, Error> for AuthorizationHeaderSigner {
	fn attach_token(&self, mut request: HttpRequest, token: &Token) -> Result<HttpRequest> {
		request.headers_mut().insert(AUTHORIZATION, Self::header_value(token)?);

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder, Error> for AuthorizationHeaderSigner {
	fn attach_token(
		&self,
		request: reqwest::RequestBuilder,
		token: &Token,
	) -> Result<reqwest::RequestBuilder> {
		Ok(request.header(AUTHORIZATION, Self::header_value(token)?))
	}
}

#[cfg(feature = "reqwest")]
impl<M> Client<ReqwestHttpClient, M>
where
	M: ?Sized + TransportErrorMapper<ReqwestError>,
{
	/// Builds a resource request on the client's transport, signed with `token`.
	pub fn authorized_request(
		&self,
		method: reqwest::Method,
		uri: &str,
		token: &Token,
	) -> Result<reqwest::RequestBuilder> {
		if uri.trim().is_empty() {
			return Err(ArgumentError::Missing { argument: "uri" }.into());
		}

		let url = Url::parse(uri.trim())
			.map_err(|source| ArgumentError::InvalidUri { argument: "uri", source })?;

		AuthorizationHeaderSigner.attach_token(self.http_client.request(method, url), token)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::schema::TokenType;

	#[test]
	fn signer_sets_the_scheme_from_the_token_type() {
		let token = Token::new("abc", TokenType::Mac).expect("Token fixture should build.");
		let request = AuthorizationHeaderSigner
			.attach_token(HttpRequest::new(Vec::new()), &token)
			.expect("Signing should succeed.");
		let header = &request.headers()[AUTHORIZATION];

		assert_eq!(header, "MAC abc");
		assert!(header.is_sensitive());
	}

	#[test]
	fn control_characters_are_argument_faults() {
		let token = Token::new("a\nb", TokenType::Bearer).expect("Token fixture should build.");
		let err = AuthorizationHeaderSigner
			.attach_token(HttpRequest::new(Vec::new()), &token)
			.expect_err("Newlines cannot appear in headers.");

		assert!(matches!(err, Error::Argument(ArgumentError::InvalidHeaderValue(_))));
	}
}
