//! Rust’s turnkey Trello REST client—lazy OAuth 1.0a credential acquisition, per-request
//! HMAC-SHA1 signing, and self-healing token invalidation in one crate built for production.
//!
//! The crate is a narrow pipeline around one authenticated-request path. A [`client::Client`]
//! resolves a relative path and a verb into a signed HTTPS request, the [`auth::CredentialVault`]
//! lazily performs the three-legged token handshake the first time a credential is needed, and
//! the response classifier either hands back the raw body, surfaces a typed API failure, or
//! disposes of the access token when the server rejects the signature at the protocol level so
//! the next call can transparently re-acquire one.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod oauth;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use httpmock as _;
