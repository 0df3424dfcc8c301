// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::{StatePolicy, Token},
	error::ProtocolError,
	http::TokenResponse,
	redirect::RedirectRequest,
	schema::{TokenType, content_type, param},
};

pub(super) fn front_channel(
	redirect: &RedirectRequest,
	expected_state: Option<&str>,
	policy: StatePolicy,
	now: OffsetDateTime,
) -> Result<Token> {
	let declared = redirect.content_type();

	if !content_type::matches(declared, content_type::FORM_ENCODED) {
		return Err(ProtocolError::unsupported_content_type(declared).into());
	}
	if let Some(err) = declared_error(|name| redirect.get(name).map(str::to_owned)) {
		return Err(err.into());
	}

	let access_token = redirect
		.get(param::ACCESS_TOKEN)
		.ok_or_else(|| ProtocolError::local(ProtocolError::NO_ACCESS_TOKEN))?;
	let token_type = redirect
		.get(param::TOKEN_TYPE)
		.and_then(TokenType::parse)
		.ok_or_else(|| ProtocolError::local(ProtocolError::UNSUPPORTED_TOKEN_TYPE))?;

	policy.verify(expected_state, redirect.get(param::STATE))?;

	let mut token = Token::new(access_token, token_type)?;

	// Zero is a real lifetime here: the token expires immediately.
	if let Some(seconds) = redirect.get(param::EXPIRES_IN).and_then(|v| v.trim().parse::<u32>().ok())
	{
		token = with_lifetime(token, now, i64::from(seconds));
	}
	if let Some(scope) = redirect.get(param::SCOPE) {
		token = token.with_scope(split_scope(scope));
	}

	Ok(token)
}

pub(super) fn back_channel(
	response: &TokenResponse,
	expected_state: Option<&str>,
	now: OffsetDateTime,
) -> Result<Token> {
	let declared = response.content_type();

	if !content_type::matches(declared, content_type::JSON)
		&& !content_type::matches(declared, content_type::JAVASCRIPT)
	{
		return Err(ProtocolError::unsupported_content_type(declared).into());
	}

	let body = response.json()?;

	if let Some(err) = declared_error(|name| json_string(&body, name)) {
		return Err(err.into());
	}

	let access_token = json_string(&body, param::ACCESS_TOKEN)
		.ok_or_else(|| ProtocolError::local(ProtocolError::NO_ACCESS_TOKEN))?;
	let token_type =
		TokenType::parse_or_default(json_string(&body, param::TOKEN_TYPE).as_deref());
	let mut token = Token::new(access_token, token_type)?;

	if let Some(seconds) = json_seconds(body.get(param::EXPIRES_IN)).filter(|s| *s > 0) {
		token = with_lifetime(token, now, seconds);
	}
	if let Some(scope) = json_string(&body, param::SCOPE) {
		token = token.with_scope(split_scope(&scope));
	}
	if let Some(refresh_token) = json_string(&body, param::REFRESH_TOKEN) {
		token = token.with_refresh_token(refresh_token);
	}

	StatePolicy::EchoedOnly.verify(expected_state, json_string(&body, param::STATE).as_deref())?;

	Ok(token)
}

/// Builds the server-declared fault when a non-empty `error` field is present.
fn declared_error(field: impl Fn(&str) -> Option<String>) -> Option<ProtocolError> {
	let error = field(param::ERROR).filter(|e| !e.is_empty())?;

	Some(ProtocolError::from_server(
		error,
		field(param::ERROR_DESCRIPTION),
		field(param::ERROR_URI),
		field(param::STATE),
	))
}

fn with_lifetime(token: Token, now: OffsetDateTime, seconds: i64) -> Token {
	match now.checked_add(Duration::seconds(seconds)) {
		Some(instant) => token.with_expires_at(instant),
		None => token,
	}
}

fn split_scope(value: &str) -> impl Iterator<Item = &str> {
	value.split(' ').filter(|scope| !scope.is_empty())
}

/// Reads a scalar JSON field as a non-empty string.
fn json_string(body: &Map<String, Value>, name: &str) -> Option<String> {
	match body.get(name)? {
		Value::String(value) if !value.is_empty() => Some(value.clone()),
		Value::Number(value) => Some(value.to_string()),
		Value::Bool(value) => Some(value.to_string()),
		_ => None,
	}
}

/// Reads a lifetime encoded either as a JSON number or a numeric string.
fn json_seconds(value: Option<&Value>) -> Option<i64> {
	match value? {
		Value::Number(number) => number
			.as_i64()
			.or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}
