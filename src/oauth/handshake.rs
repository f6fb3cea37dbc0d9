//! The two-round-trip token handshake behind the vault’s [`TokenSource`] seam.
//!
//! Leg one obtains a request token, leg three exchanges it for the long-lived access token; the
//! user-authorization leg in between is the embedding application’s responsibility and is
//! exposed through [`OAuthHandshake::authorize_url`]. Both token legs sign with the consumer
//! keys (leg three additionally with the request token) and parse the provider’s form-encoded
//! token response.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ConsumerKeys, RequestToken, TokenSecret, TokenSource},
	error::HandshakeError,
	http::SignedTransport,
	oauth::{self, HandshakeEndpoints},
};

const CALLBACK: &str = "oob";

/// Performs the OAuth 1.0a token handshake against the configured endpoints.
#[derive(Clone, Debug)]
pub struct OAuthHandshake {
	endpoints: HandshakeEndpoints,
	transport: SignedTransport,
}
impl OAuthHandshake {
	/// Creates a handshake bound to `endpoints`, calling out over `transport`.
	pub fn new(endpoints: HandshakeEndpoints, transport: SignedTransport) -> Self {
		Self { endpoints, transport }
	}

	/// URL the end user visits to approve `request_token` (the middle leg).
	pub fn authorize_url(&self, request_token: &RequestToken) -> Result<Url> {
		let mut url = self.endpoints.join(&self.endpoints.authorize_path, "authorize")?;

		url.query_pairs_mut()
			.append_pair("oauth_token", &request_token.token)
			.append_pair("scope", &self.endpoints.scope);

		Ok(url)
	}

	/// Leg one: obtains a request token signed with the consumer keys alone.
	pub fn request_token(&self, keys: &ConsumerKeys) -> Result<RequestToken> {
		let mut url = self.endpoints.join(&self.endpoints.request_token_path, "request_token")?;

		url.query_pairs_mut().append_pair("scope", &self.endpoints.scope);

		let fields = self.token_leg(
			keys,
			None,
			url,
			&[("oauth_callback".to_owned(), CALLBACK.to_owned())],
		)?;
		let (token, secret) = required_token_fields(&fields)?;

		Ok(RequestToken { token, secret })
	}

	/// Leg three: exchanges `request_token` for the long-lived access token.
	pub fn access_token(
		&self,
		keys: &ConsumerKeys,
		request_token: &RequestToken,
	) -> Result<AccessToken> {
		let url = self.endpoints.join(&self.endpoints.access_token_path, "access_token")?;
		let fields = self.token_leg(
			keys,
			Some((&request_token.token, request_token.secret.expose())),
			url,
			&[],
		)?;
		let (token, secret) = required_token_fields(&fields)?;

		Ok(AccessToken::new(keys.clone(), token, secret))
	}

	fn token_leg(
		&self,
		keys: &ConsumerKeys,
		token: Option<(&str, &str)>,
		url: Url,
		extra: &[(String, String)],
	) -> Result<Vec<(String, String)>> {
		let verb = self.endpoints.http_method;
		let authorization = oauth::authorization_header(verb, &url, keys, token, extra);
		let request_headers = vec![("authorization".to_owned(), authorization)];
		let response = self.transport.execute(verb, url, &request_headers)?;
		let body = oauth::classify_response(response, &request_headers)?;

		Ok(url::form_urlencoded::parse(&body).into_owned().collect())
	}
}
impl TokenSource for OAuthHandshake {
	fn acquire(&self, keys: &ConsumerKeys) -> Result<AccessToken> {
		let request_token = self.request_token(keys)?;

		tracing::debug!(token = %request_token.token, "Obtained a request token.");

		self.access_token(keys, &request_token)
	}
}

fn required_token_fields(fields: &[(String, String)]) -> Result<(String, TokenSecret)> {
	let token = token_field(fields, "oauth_token")?;
	let secret = token_field(fields, "oauth_token_secret")?;

	Ok((token, TokenSecret::new(secret)))
}

fn token_field(fields: &[(String, String)], field: &'static str) -> Result<String> {
	fields
		.iter()
		.find(|(key, _)| key == field)
		.map(|(_, value)| value.clone())
		.ok_or_else(|| HandshakeError::MissingTokenField { field }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_fields_are_extracted_or_reported_missing() {
		let fields = vec![
			("oauth_token".to_owned(), "token".to_owned()),
			("oauth_token_secret".to_owned(), "secret".to_owned()),
		];
		let (token, secret) =
			required_token_fields(&fields).expect("Complete responses should parse.");

		assert_eq!(token, "token");
		assert_eq!(secret.expose(), "secret");

		let incomplete = vec![("oauth_token".to_owned(), "token".to_owned())];
		let err = required_token_fields(&incomplete)
			.expect_err("Responses without a secret should fail.");

		assert!(matches!(
			err,
			Error::Handshake(HandshakeError::MissingTokenField { field: "oauth_token_secret" })
		));
	}

	#[test]
	fn authorize_url_carries_the_request_token_and_scope() {
		let transport = SignedTransport::new(Duration::from_secs(1))
			.expect("Transport construction should succeed.");
		let handshake = OAuthHandshake::new(HandshakeEndpoints::default(), transport);
		let request_token =
			RequestToken { token: "req-token".to_owned(), secret: TokenSecret::new("req-secret") };
		let url = handshake
			.authorize_url(&request_token)
			.expect("Authorize URL construction should succeed.");

		assert_eq!(
			url.as_str(),
			"https://trello.com/1/OAuthAuthorizeToken?oauth_token=req-token&scope=read%2Cwrite",
		);
	}
}
