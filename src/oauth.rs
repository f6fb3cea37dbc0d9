//! OAuth 1.0a protocol collaborator: handshake endpoints, request signing, the two-leg token
//! exchange, and the authorization-problem signal.

pub mod handshake;
pub mod problem;
pub mod signer;

pub use handshake::*;
pub use problem::*;
pub use signer::*;

// self
use crate::{_prelude::*, client::Verb, error::ConfigError};

const DEFAULT_SITE: &str = "https://trello.com";
const DEFAULT_REQUEST_TOKEN_PATH: &str = "/1/OAuthGetRequestToken";
const DEFAULT_AUTHORIZE_PATH: &str = "/1/OAuthAuthorizeToken";
const DEFAULT_ACCESS_TOKEN_PATH: &str = "/1/OAuthGetAccessToken";
const DEFAULT_SCOPE: &str = "read,write";

/// Provider endpoints and options for the three-legged handshake.
///
/// Defaults mirror Trello’s classic OAuth 1.0 endpoints; both token legs are issued with the
/// configured [`http_method`](Self::http_method).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandshakeEndpoints {
	/// Site the handshake paths are joined onto.
	pub site: Url,
	/// Path of the request-token endpoint.
	pub request_token_path: String,
	/// Path of the user-facing authorize endpoint.
	pub authorize_path: String,
	/// Path of the access-token endpoint.
	pub access_token_path: String,
	/// Scope requested alongside the request token.
	pub scope: String,
	/// Verb used for both token legs.
	pub http_method: Verb,
}
impl Default for HandshakeEndpoints {
	fn default() -> Self {
		Self {
			site: Url::parse(DEFAULT_SITE).expect("Hard-coded handshake site URL should parse."),
			request_token_path: DEFAULT_REQUEST_TOKEN_PATH.into(),
			authorize_path: DEFAULT_AUTHORIZE_PATH.into(),
			access_token_path: DEFAULT_ACCESS_TOKEN_PATH.into(),
			scope: DEFAULT_SCOPE.into(),
			http_method: Verb::Get,
		}
	}
}
impl HandshakeEndpoints {
	pub(crate) fn join(&self, path: &str, endpoint: &'static str) -> Result<Url> {
		Ok(self
			.site
			.join(path)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })?)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_the_classic_endpoints() {
		let endpoints = HandshakeEndpoints::default();

		assert_eq!(endpoints.site.as_str(), "https://trello.com/");
		assert_eq!(
			endpoints
				.join(&endpoints.request_token_path, "request_token")
				.expect("Default request-token endpoint should join.")
				.as_str(),
			"https://trello.com/1/OAuthGetRequestToken",
		);
		assert_eq!(endpoints.scope, "read,write");
		assert_eq!(endpoints.http_method, Verb::Get);
	}
}
