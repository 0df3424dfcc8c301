//! Provider-facing hooks (behavior) and quirks (data).
//!
//! `strategy` defines [`ProviderStrategy`], an HTTP-client-agnostic hook the flows call to
//! decorate outgoing parameters and to turn raw token responses into [`Token`](crate::auth::Token)
//! values. `quirks` carries declarative per-client toggles, such as the token request encoding,
//! that can be loaded from configuration.

pub mod quirks;
pub mod strategy;

pub use quirks::*;
pub use strategy::*;
