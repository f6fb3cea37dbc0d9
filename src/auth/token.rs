//! Token material: the redacting secret wrapper, consumer keys, and handshake tokens.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping key material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the wrapped value is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Registered application credentials; the identity every OAuth request is signed under.
///
/// Distinct from any end-user credential. Immutable once snapshotted for a handshake.
#[derive(Clone, Debug)]
pub struct ConsumerKeys {
	/// Public application key (the `oauth_consumer_key` protocol parameter).
	pub public_key: String,
	/// Application secret forming the first half of every signing key.
	pub secret: TokenSecret,
}

/// Intermediate token returned by the request-token leg of the handshake.
///
/// Consumed by the access-token leg; never memoized.
#[derive(Clone, Debug)]
pub struct RequestToken {
	/// Opaque token identifier.
	pub token: String,
	/// Matching token secret.
	pub secret: TokenSecret,
}

/// Authorized signing credential, bound to the consumer keys that obtained it.
///
/// Held exclusively by the [`CredentialVault`](crate::auth::CredentialVault); the client API
/// never hands one to callers.
#[derive(Clone)]
pub struct AccessToken {
	keys: ConsumerKeys,
	token: String,
	secret: TokenSecret,
}
impl AccessToken {
	/// Assembles a credential from its handshake parts.
	pub fn new(keys: ConsumerKeys, token: impl Into<String>, secret: TokenSecret) -> Self {
		Self { keys, token: token.into(), secret }
	}

	/// Consumer keys the token was issued against.
	pub fn keys(&self) -> &ConsumerKeys {
		&self.keys
	}

	/// Opaque token identifier (the `oauth_token` protocol parameter).
	pub fn token(&self) -> &str {
		&self.token
	}

	/// Token secret forming the second half of the signing key.
	pub fn secret(&self) -> &TokenSecret {
		&self.secret
	}

	fn identity(&self) -> String {
		self.token.chars().take(8).collect()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("token", &format_args!("{}…", self.identity()))
			.field("secret", &self.secret)
			.finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "AccessToken({}…)", self.identity())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn access_token_formatters_truncate_and_redact() {
		let keys =
			ConsumerKeys { public_key: "public".into(), secret: TokenSecret::new("consumer") };
		let token = AccessToken::new(keys, "0123456789abcdef", TokenSecret::new("token-secret"));
		let rendered = format!("{token}");

		assert_eq!(rendered, "AccessToken(01234567…)");
		assert!(!format!("{token:?}").contains("token-secret"));
	}
}
