//! Public extension contracts for using issued tokens against resource servers.
//!
//! [`RequestSignerExt`] stays generic over the request type so downstream services can sign
//! requests for any HTTP client; [`AuthorizationHeaderSigner`] covers the transports this
//! crate already speaks.

pub mod request_signer;

pub use request_signer::*;
