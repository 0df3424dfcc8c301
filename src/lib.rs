//! OAuth 2.0 client flows for Rust: authorization URLs, redirect callbacks, code exchange,
//! implicit tokens, and refresh, normalized into one token type and one fault taxonomy.
//!
//! [`flows::Client`] drives every flow for a single [`config::ClientConfiguration`]. Token
//! endpoint responses and implicit-flow redirects are parsed into [`auth::Token`]; anything else
//! surfaces as an [`Error`] whose [`kind`](Error::kind) tells configuration, argument, protocol,
//! and transport faults apart.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod ext;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod params;
pub mod provider;
pub mod redirect;
pub mod schema;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use error::{Error, Result};

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
