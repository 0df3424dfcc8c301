//! Fault taxonomy shared by the builder, the extractor, the parsers, and the orchestrator.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical fault exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// A required setting is missing or malformed; fatal, never retried.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A required call argument is missing or blank; a caller bug.
	#[error(transparent)]
	Argument(#[from] ArgumentError),
	/// The server declared an error, or its response was missing, malformed, or mismatched.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// Network-level failure without a retrievable response.
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Returns the fault class.
	pub fn kind(&self) -> FaultKind {
		match self {
			Error::Config(_) => FaultKind::Configuration,
			Error::Argument(_) => FaultKind::Argument,
			Error::Protocol(_) => FaultKind::Protocol,
			Error::Transport(_) => FaultKind::Transport,
		}
	}

	/// Returns the protocol fault, if this is one.
	pub fn as_protocol(&self) -> Option<&ProtocolError> {
		match self {
			Error::Protocol(err) => Some(err),
			_ => None,
		}
	}
}

/// Fault classes, used for branching and observability labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
	/// See [`Error::Config`].
	Configuration,
	/// See [`Error::Argument`].
	Argument,
	/// See [`Error::Protocol`].
	Protocol,
	/// See [`Error::Transport`].
	Transport,
}
impl FaultKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FaultKind::Configuration => "configuration",
			FaultKind::Argument => "argument",
			FaultKind::Protocol => "protocol",
			FaultKind::Transport => "transport",
		}
	}
}
impl Display for FaultKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configuration failures raised before any request is issued.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required setting is blank.
	#[error("{setting} is not set.")]
	MissingSetting {
		/// Configuration key, e.g. `clientId`.
		setting: &'static str,
	},
	/// A configured URL cannot be parsed.
	#[error("{setting} is not a valid URL.")]
	InvalidUrl {
		/// Configuration key, e.g. `tokenUrl`.
		setting: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Caller contract violations.
#[derive(Debug, ThisError)]
pub enum ArgumentError {
	/// A required argument is missing or blank.
	#[error("The `{argument}` argument is required.")]
	Missing {
		/// Argument name.
		argument: &'static str,
	},
	/// The configuration demands a CSRF state but none was supplied.
	#[error("State is required.")]
	StateRequired,
	/// A resource URI cannot be parsed.
	#[error("The `{argument}` argument is not a valid URI.")]
	InvalidUri {
		/// Argument name.
		argument: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request deadlines must be positive.
	#[error("The request deadline must be positive.")]
	InvalidDeadline,
	/// A token cannot be encoded into an `Authorization` header.
	#[error("The access token cannot be used as an Authorization header value.")]
	InvalidHeaderValue(#[from] oauth2::http::header::InvalidHeaderValue),
}

/// Server-declared or response-shape protocol failure.
///
/// The error code is always non-empty. [`Display`] prints the description when the server
/// supplied one and the error code otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolError {
	/// OAuth `error` code, or a locally synthesized message.
	pub error: String,
	/// OAuth `error_description`, if any.
	pub description: Option<String>,
	/// OAuth `error_uri`, if any.
	pub error_uri: Option<String>,
	/// `state` echoed alongside the error, if any.
	pub state: Option<String>,
}
impl ProtocolError {
	/// Raised when a response carries no usable `access_token`.
	pub const NO_ACCESS_TOKEN: &'static str = "No access_token.";
	/// Raised when the front channel omits or garbles `token_type`.
	pub const UNSUPPORTED_TOKEN_TYPE: &'static str = "Unsupported or missing token type.";
	/// Raised when the returned state does not satisfy the expected one.
	pub const STATE_MISMATCH: &'static str = "The expected state was not received.";

	/// Builds a fault from server-supplied error fields.
	pub fn from_server(
		error: impl Into<String>,
		description: Option<String>,
		error_uri: Option<String>,
		state: Option<String>,
	) -> Self {
		Self { error: error.into(), description, error_uri, state }
	}

	/// Builds a locally detected fault whose code doubles as its message.
	pub fn local(message: impl Into<String>) -> Self {
		Self { error: message.into(), description: None, error_uri: None, state: None }
	}

	/// Fault raised for an unexpected content type.
	pub fn unsupported_content_type(content_type: &str) -> Self {
		Self::local(format!("Unsupported content type \"{content_type}\"."))
	}

	/// Human-readable message: the description, falling back to the error code.
	pub fn message(&self) -> &str {
		self.description.as_deref().filter(|d| !d.is_empty()).unwrap_or(&self.error)
	}

	/// Maps the error code onto the RFC 6749 vocabulary, when it belongs to it.
	pub fn well_known(&self) -> Option<OAuthErrorCode> {
		OAuthErrorCode::parse(&self.error)
	}
}
impl Display for ProtocolError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.message())
	}
}
impl StdError for ProtocolError {}

/// Error codes defined by RFC 6749 sections 4.1.2.1 and 5.2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OAuthErrorCode {
	/// `invalid_request`
	InvalidRequest,
	/// `invalid_client`
	InvalidClient,
	/// `invalid_grant`
	InvalidGrant,
	/// `unauthorized_client`
	UnauthorizedClient,
	/// `unsupported_grant_type`
	UnsupportedGrantType,
	/// `unsupported_response_type`
	UnsupportedResponseType,
	/// `invalid_scope`
	InvalidScope,
	/// `access_denied`
	AccessDenied,
	/// `server_error`
	ServerError,
	/// `temporarily_unavailable`
	TemporarilyUnavailable,
}
impl OAuthErrorCode {
	const TABLE: [(&'static str, OAuthErrorCode); 10] = [
		("invalid_request", OAuthErrorCode::InvalidRequest),
		("invalid_client", OAuthErrorCode::InvalidClient),
		("invalid_grant", OAuthErrorCode::InvalidGrant),
		("unauthorized_client", OAuthErrorCode::UnauthorizedClient),
		("unsupported_grant_type", OAuthErrorCode::UnsupportedGrantType),
		("unsupported_response_type", OAuthErrorCode::UnsupportedResponseType),
		("invalid_scope", OAuthErrorCode::InvalidScope),
		("access_denied", OAuthErrorCode::AccessDenied),
		("server_error", OAuthErrorCode::ServerError),
		("temporarily_unavailable", OAuthErrorCode::TemporarilyUnavailable),
	];

	/// Parses a wire code, ignoring ASCII case.
	pub fn parse(value: &str) -> Option<Self> {
		Self::TABLE.iter().find(|(key, _)| value.eq_ignore_ascii_case(key)).map(|(_, c)| *c)
	}

	/// Returns the wire code.
	pub fn as_str(self) -> &'static str {
		Self::TABLE.iter().find(|(_, code)| *code == self).map(|(key, _)| *key).unwrap_or_default()
	}
}
impl Display for OAuthErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-level failures. Every message is prefixed with
/// `Could not get an access token -- ` and the original cause is kept as the source.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Could not get an access token -- {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("Could not get an access token -- {0}")]
	Io(#[from] std::io::Error),
	/// The round trip exceeded the caller's deadline.
	#[error("Could not get an access token -- the request did not complete before its deadline.")]
	Timeout {
		/// Transport-specific timeout error, when one was reported.
		#[source]
		source: Option<BoxError>,
	},
	/// The token endpoint body is not a JSON object.
	#[error("Could not get an access token -- {source}")]
	MalformedBody {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Anything else the HTTP client reported.
	#[error("Could not get an access token -- {message}")]
	Other {
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Some(Box::new(src)) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn protocol_message_falls_back_to_code() {
		let bare = ProtocolError::from_server("access_denied", None, None, Some("s".into()));
		let described =
			ProtocolError::from_server("invalid_grant", Some("Code expired.".into()), None, None);

		assert_eq!(bare.to_string(), "access_denied");
		assert_eq!(described.to_string(), "Code expired.");
		assert_eq!(described.well_known(), Some(OAuthErrorCode::InvalidGrant));
		assert_eq!(ProtocolError::local(ProtocolError::NO_ACCESS_TOKEN).well_known(), None);
	}

	#[test]
	fn transport_messages_are_prefixed_and_keep_their_cause() {
		let io = std::io::Error::other("connection reset");
		let err = Error::from(TransportError::from(io));

		assert_eq!(err.to_string(), "Could not get an access token -- connection reset");
		assert_eq!(err.kind(), FaultKind::Transport);
		assert!(StdError::source(&err).is_some());
	}

	#[test]
	fn config_messages_name_the_setting() {
		let err = Error::from(ConfigError::MissingSetting { setting: "clientId" });

		assert_eq!(err.to_string(), "clientId is not set.");
		assert_eq!(err.kind(), FaultKind::Configuration);
	}

	#[test]
	fn error_codes_round_trip_through_the_table() {
		assert_eq!(OAuthErrorCode::parse("ACCESS_DENIED"), Some(OAuthErrorCode::AccessDenied));
		assert_eq!(OAuthErrorCode::TemporarilyUnavailable.as_str(), "temporarily_unavailable");
		assert_eq!(OAuthErrorCode::parse("slow_down"), None);
	}
}
