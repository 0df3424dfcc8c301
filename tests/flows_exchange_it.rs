#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use oauth2_flow::{
	Result,
	auth::Token,
	config::ClientConfiguration,
	error::{FaultKind, OAuthErrorCode, ProtocolError},
	flows::{Client, ReqwestFlowClient},
	http::TokenResponse,
	params::Params,
	provider::{ClientQuirks, ProviderStrategy, TokenRequestEncoding},
	schema::TokenType,
	url::form_urlencoded,
};

const CLIENT_ID: &str = "client-it";
const CLIENT_SECRET: &str = "secret-it";
const REDIRECT_URL: &str = "https://app.example.com/callback";

fn configuration(server: &MockServer) -> ClientConfiguration {
	ClientConfiguration::new(
		server.url("/authorize"),
		server.url("/token"),
		CLIENT_ID,
		CLIENT_SECRET,
	)
	.with_redirect_url(REDIRECT_URL)
}

fn client(server: &MockServer) -> ReqwestFlowClient {
	Client::new(configuration(server)).expect("Reqwest client should build.")
}

#[tokio::test]
async fn exchange_code_posts_the_form_and_parses_the_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.header("accept", "application/json")
				.form_urlencoded_tuple("grant_type", "authorization_code")
				.form_urlencoded_tuple("code", "code-123")
				.form_urlencoded_tuple("client_id", CLIENT_ID)
				.form_urlencoded_tuple("client_secret", CLIENT_SECRET)
				.form_urlencoded_tuple("redirect_uri", REDIRECT_URL);
			then.status(200).header("content-type", "application/json; charset=utf-8").body(
				"{\"access_token\":\"access-success\",\"token_type\":\"Bearer\",\"expires_in\":\"3600\",\"scope\":\"a b\",\"refresh_token\":\"refresh-success\"}",
			);
		})
		.await;
	let before = time::OffsetDateTime::now_utc();
	let token = client(&server)
		.exchange_code("code-123", None, None)
		.await
		.expect("Authorization code exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token().expose(), "access-success");
	assert_eq!(token.token_type(), TokenType::Bearer);
	assert_eq!(token.scope(), ["a", "b"]);
	assert_eq!(token.refresh_token().map(|secret| secret.expose()), Some("refresh-success"));

	let expires_at = token.expires_at().expect("Lifetime should be converted to an instant.");
	let lifetime = expires_at - before;

	assert!(lifetime >= time::Duration::seconds(3595) && lifetime <= time::Duration::seconds(3605));
}

#[tokio::test]
async fn exchange_code_surfaces_declared_errors_from_4xx_bodies() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\",\"error_description\":\"Code expired.\"}");
		})
		.await;
	let err = client(&server)
		.exchange_code("stale-code", None, None)
		.await
		.expect_err("Declared errors must fail the exchange.");

	mock.assert_async().await;

	assert_eq!(err.kind(), FaultKind::Protocol);
	assert_eq!(err.to_string(), "Code expired.");
	assert_eq!(
		err.as_protocol().and_then(ProtocolError::well_known),
		Some(OAuthErrorCode::InvalidGrant)
	);
}

#[tokio::test]
async fn exchange_code_rejects_html_error_pages() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(502).header("content-type", "text/html").body("<h1>Bad Gateway</h1>");
		})
		.await;
	let err = client(&server)
		.exchange_code("code-123", None, None)
		.await
		.expect_err("HTML bodies are not token responses.");

	assert_eq!(err.kind(), FaultKind::Protocol);
	assert_eq!(err.to_string(), "Unsupported content type \"text/html\".");
}

#[tokio::test]
async fn exchange_code_rejects_a_mismatched_echoed_state() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"T\",\"state\":\"other\"}");
		})
		.await;
	let client = client(&server);
	let err = client
		.exchange_code("code-123", Some("expected"), None)
		.await
		.expect_err("A different echoed state must fail.");

	assert_eq!(err.to_string(), ProtocolError::STATE_MISMATCH);
}

#[tokio::test]
async fn legacy_encoding_sends_the_fields_in_the_query() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.query_param("grant_type", "authorization_code")
				.query_param("code", "code-123")
				.query_param("client_id", CLIENT_ID)
				.query_param("client_secret", CLIENT_SECRET)
				.query_param("redirect_uri", REDIRECT_URL);
			then.status(200)
				.header("content-type", "text/javascript")
				.body("{\"access_token\":\"legacy\",\"token_type\":\"mac\"}");
		})
		.await;
	let client = client(&server).with_quirks(ClientQuirks {
		token_request_encoding: TokenRequestEncoding::LegacyQuery,
		..Default::default()
	});
	let token = client
		.exchange_code("code-123", None, None)
		.await
		.expect("Legacy exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(token.token_type(), TokenType::Mac);
	assert_eq!(token.authorization_header(), "MAC legacy");
}

#[tokio::test]
async fn exchange_code_validates_before_touching_the_network() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.path("/token");
			then.status(200);
		})
		.await;
	let mut configuration = configuration(&server);

	configuration.client_secret.clear();

	let err = Client::new(configuration)
		.expect("Reqwest client should build.")
		.exchange_code("code-123", None, None)
		.await
		.expect_err("A blank secret is a configuration fault.");

	assert_eq!(err.kind(), FaultKind::Configuration);
	assert_eq!(err.to_string(), "clientSecret is not set.");

	let err = client(&server)
		.exchange_code("  ", None, None)
		.await
		.expect_err("A blank code is an argument fault.");

	assert_eq!(err.kind(), FaultKind::Argument);

	mock.assert_hits_async(0).await;
}

/// Provider that wants an audience, authenticates without a posted secret, and answers with a
/// form-encoded body.
struct FormBodyProvider;
impl ProviderStrategy for FormBodyProvider {
	fn augment_exchange_request(&self, params: &mut Params) {
		params.clear("client_secret");
		params.set("audience", "api");
	}

	fn parse_token_response(
		&self,
		response: &TokenResponse,
		_expected_state: Option<&str>,
	) -> Result<Token> {
		let access_token = form_urlencoded::parse(&response.body)
			.find(|(key, _)| key == "access_token")
			.map(|(_, value)| value.into_owned())
			.unwrap_or_default();

		Token::new(access_token, TokenType::Bearer)
	}
}

#[tokio::test]
async fn strategy_hooks_shape_the_request_and_the_response() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").body(format!(
				"grant_type=authorization_code&code=code-123&client_id={CLIENT_ID}&audience=api"
			));
			then.status(200)
				.header("content-type", "text/plain")
				.body("access_token=form-token&expires=60");
		})
		.await;
	let configuration = ClientConfiguration::new(
		server.url("/authorize"),
		server.url("/token"),
		CLIENT_ID,
		CLIENT_SECRET,
	);
	let client = Client::new(configuration)
		.expect("Reqwest client should build.")
		.with_strategy(Arc::new(FormBodyProvider));
	let token = client
		.exchange_code("code-123", None, None)
		.await
		.expect("Custom parser should accept form bodies.");

	mock.assert_async().await;

	assert_eq!(token.access_token().expose(), "form-token");
}
