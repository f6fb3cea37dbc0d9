//! The request dispatcher: configuration, the four-verb surface, and response classification.

// std
use std::env;
// self
use crate::{
	_prelude::*,
	auth::{CredentialVault, TokenSecret, TokenSource},
	error::ConfigError,
	http::SignedTransport,
	oauth::{self, HandshakeEndpoints, OAuthHandshake},
};

/// Environment variable read for the consumer public key.
pub const PUBLIC_KEY_ENV: &str = "TRELLO_PUBLIC_KEY";
/// Environment variable read for the consumer secret.
pub const SECRET_ENV: &str = "TRELLO_SECRET";

const DEFAULT_API_BASE: &str = "https://api.trello.com";
const DEFAULT_API_VERSION: &str = "1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Closed verb set accepted by the API surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
	/// HTTP GET.
	Get,
	/// HTTP POST.
	Post,
	/// HTTP PUT.
	Put,
	/// HTTP DELETE.
	Delete,
}
impl Verb {
	/// Uppercase wire representation, as used in signature base strings.
	pub const fn as_str(self) -> &'static str {
		match self {
			Verb::Get => "GET",
			Verb::Post => "POST",
			Verb::Put => "PUT",
			Verb::Delete => "DELETE",
		}
	}

	pub(crate) fn as_method(self) -> reqwest::Method {
		match self {
			Verb::Get => reqwest::Method::GET,
			Verb::Post => reqwest::Method::POST,
			Verb::Put => reqwest::Method::PUT,
			Verb::Delete => reqwest::Method::DELETE,
		}
	}
}
impl Display for Verb {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Process-wide client configuration.
///
/// Key material typically comes from the environment or the embedding application’s own
/// configuration; it is validated lazily on first use, never here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Consumer public key; may also be set later via [`Client::set_public_key`].
	pub public_key: Option<String>,
	/// Consumer secret; may also be set later via [`Client::set_secret`].
	pub secret: Option<TokenSecret>,
	/// Version path segment joined between the API base and request paths.
	pub api_version: String,
	/// Deadline applied to every network round-trip.
	pub timeout: Duration,
	/// API host requests are issued against.
	pub api_base: Url,
	/// Endpoints and options of the token handshake.
	pub handshake: HandshakeEndpoints,
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			public_key: None,
			secret: None,
			api_version: DEFAULT_API_VERSION.into(),
			timeout: DEFAULT_TIMEOUT,
			api_base: Url::parse(DEFAULT_API_BASE).expect("Hard-coded API base URL should parse."),
			handshake: HandshakeEndpoints::default(),
		}
	}
}
impl ClientConfig {
	/// Reads key material from [`PUBLIC_KEY_ENV`] / [`SECRET_ENV`], leaving everything else at
	/// defaults. Missing variables stay unset; validation remains lazy.
	pub fn from_env() -> Self {
		Self {
			public_key: env::var(PUBLIC_KEY_ENV).ok(),
			secret: env::var(SECRET_ENV).ok().map(TokenSecret::new),
			..Self::default()
		}
	}
}

/// Authenticated Trello API client.
///
/// One instance per process is the intended shape, shared by reference across call sites. The
/// first authenticated request triggers the token handshake; a protocol-level rejection later
/// on disposes of the token so the next request transparently re-acquires one.
pub struct Client {
	vault: CredentialVault,
	source: Arc<dyn TokenSource>,
	transport: SignedTransport,
	api_base: Url,
	api_version: String,
}
impl Client {
	/// Builds a client (and its deadline-bounded transport) from `config`.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let transport = SignedTransport::new(config.timeout)?;
		let source: Arc<dyn TokenSource> =
			Arc::new(OAuthHandshake::new(config.handshake, transport.clone()));

		Ok(Self {
			vault: CredentialVault::new(config.public_key, config.secret),
			source,
			transport,
			api_base: config.api_base,
			api_version: config.api_version,
		})
	}

	/// Builds a client from [`ClientConfig::from_env`].
	pub fn from_env() -> Result<Self> {
		Self::new(ClientConfig::from_env())
	}

	/// Replaces the consumer public key; takes effect on the next acquisition.
	pub fn set_public_key(&self, key: impl Into<String>) {
		self.vault.set_public_key(key);
	}

	/// Replaces the consumer secret; takes effect on the next acquisition.
	pub fn set_secret(&self, secret: impl Into<String>) {
		self.vault.set_secret(secret);
	}

	/// GETs `path` with `params` attached to the query string.
	pub fn get(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Vec<u8>> {
		self.query(&self.api_version, path, Verb::Get, params)
	}

	/// POSTs to `path`; `params` stay on the query string, matching the API’s convention.
	pub fn post(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Vec<u8>> {
		self.query(&self.api_version, path, Verb::Post, params)
	}

	/// PUTs to `path`; `params` stay on the query string.
	pub fn put(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Vec<u8>> {
		self.query(&self.api_version, path, Verb::Put, params)
	}

	/// DELETEs `path` with `params` attached to the query string.
	pub fn delete(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Vec<u8>> {
		self.query(&self.api_version, path, Verb::Delete, params)
	}

	/// Sends one signed request and classifies the response.
	///
	/// Returns the raw body bytes on a 200. An authorization rejection disposes of the access
	/// token (logged with the rejected request’s headers) and then surfaces unchanged; it is
	/// never retried here—the next call re-acquires a credential lazily. Any other non-200
	/// surfaces as [`Error::Api`] and leaves the credential in place.
	pub fn query(
		&self,
		api_version: &str,
		path: &str,
		verb: Verb,
		params: &BTreeMap<String, String>,
	) -> Result<Vec<u8>> {
		let url = self.request_url(api_version, path, params)?;
		let token = self.vault.credential(self.source.as_ref())?;
		let authorization = oauth::authorization_header(
			verb,
			&url,
			token.keys(),
			Some((token.token(), token.secret().expose())),
			&[],
		);
		let request_headers = vec![("authorization".to_owned(), authorization)];
		let response = self.transport.execute(verb, url, &request_headers)?;

		match oauth::classify_response(response, &request_headers) {
			Err(Error::AuthorizationRejected(problem)) => {
				tracing::error!(
					token = %token,
					problem = %problem.problem,
					request_headers = ?problem.request_headers,
					"Disposing of the access token after an authorization rejection."
				);
				self.vault.invalidate();

				Err(Error::AuthorizationRejected(problem))
			},
			outcome => outcome,
		}
	}

	fn request_url(
		&self,
		api_version: &str,
		path: &str,
		params: &BTreeMap<String, String>,
	) -> Result<Url> {
		let joined =
			format!("{}/{api_version}{path}", self.api_base.as_str().trim_end_matches('/'));
		let mut url = Url::parse(&joined)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "api", source })?;

		if !params.is_empty() {
			url.query_pairs_mut().extend_pairs(params.iter());
		}

		Ok(url)
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("api_base", &self.api_base.as_str())
			.field("api_version", &self.api_version)
			.field("credential_held", &self.vault.has_credential())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_url_joins_version_path_and_params() {
		let client = Client::new(ClientConfig::default()).expect("Client should build.");
		let params = BTreeMap::from([
			("b".to_owned(), "2".to_owned()),
			("a".to_owned(), "1".to_owned()),
		]);
		let url = client
			.request_url("1", "/boards/abc", &params)
			.expect("URL construction should succeed.");

		assert_eq!(url.as_str(), "https://api.trello.com/1/boards/abc?a=1&b=2");

		let bare = client.request_url("1", "/members/me", &BTreeMap::new())
			.expect("URL construction should succeed.");

		assert_eq!(bare.as_str(), "https://api.trello.com/1/members/me");
	}

	#[test]
	fn verbs_render_their_wire_names() {
		assert_eq!(Verb::Get.as_str(), "GET");
		assert_eq!(Verb::Delete.to_string(), "DELETE");
		assert_eq!(Verb::Post.as_method(), reqwest::Method::POST);
	}
}
