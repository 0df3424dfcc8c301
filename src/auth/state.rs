//! CSRF state generation and verification.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, error::ProtocolError};

const STATE_LEN: usize = 32;

/// How strictly a returned `state` is compared with the expected one.
///
/// Only applies when the caller supplied a non-blank expected state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatePolicy {
	/// The returned state must be present and equal.
	#[default]
	Strict,
	/// Only a returned state that differs is rejected; a missing one is accepted.
	EchoedOnly,
}
impl StatePolicy {
	/// Checks `actual` against `expected`, treating blank values as absent.
	pub fn verify(self, expected: Option<&str>, actual: Option<&str>) -> Result<(), ProtocolError> {
		let Some(expected) = non_blank(expected) else {
			return Ok(());
		};

		match (non_blank(actual), self) {
			(Some(actual), _) if actual == expected => Ok(()),
			(None, StatePolicy::EchoedOnly) => Ok(()),
			_ => Err(ProtocolError::local(ProtocolError::STATE_MISMATCH)),
		}
	}
}

/// Generates a random alphanumeric CSRF state suitable for an authorization request.
pub fn generate_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn strict_policy_requires_the_echo() {
		let policy = StatePolicy::Strict;

		assert!(policy.verify(Some("s"), Some("s")).is_ok());
		assert!(policy.verify(Some("s"), None).is_err());
		assert!(policy.verify(Some("s"), Some("t")).is_err());
		assert!(policy.verify(None, Some("t")).is_ok());
		assert!(policy.verify(Some(" "), None).is_ok());
	}

	#[test]
	fn echoed_only_policy_tolerates_a_missing_echo() {
		let policy = StatePolicy::EchoedOnly;

		assert!(policy.verify(Some("s"), None).is_ok());
		assert!(policy.verify(Some("s"), Some("")).is_ok());

		let err = policy.verify(Some("s"), Some("t")).expect_err("Mismatched state must fail.");

		assert_eq!(err.error, ProtocolError::STATE_MISMATCH);
	}

	#[test]
	fn generated_states_are_random_alphanumerics() {
		let first = generate_state();

		assert_eq!(first.len(), STATE_LEN);
		assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first, generate_state());
	}
}
