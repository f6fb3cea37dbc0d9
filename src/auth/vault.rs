//! Lazy credential storage with single-flight acquisition and idempotent invalidation.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ConsumerKeys, TokenSecret},
	error::ConfigError,
};

/// Produces an access token for validated consumer keys.
///
/// The vault owns *when* acquisition happens; implementations own *how*. The production
/// implementation is [`OAuthHandshake`](crate::oauth::OAuthHandshake).
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Performs the token handshake for the provided consumer keys.
	fn acquire(&self, keys: &ConsumerKeys) -> Result<AccessToken>;
}

#[derive(Default)]
struct IdentityState {
	public_key: Option<String>,
	secret: Option<TokenSecret>,
}

/// Process-wide holder of the consumer identity and the memoized access token.
///
/// The slot mutex is held across the handshake, so concurrent first callers funnel into a
/// single acquisition per epoch and all of them read the same memoized credential afterwards.
/// A failed handshake memoizes nothing; the next caller retries.
pub struct CredentialVault {
	identity: RwLock<IdentityState>,
	slot: Mutex<Option<Arc<AccessToken>>>,
}
impl CredentialVault {
	/// Creates a vault holding the provided identity halves and no credential.
	pub fn new(public_key: Option<String>, secret: Option<TokenSecret>) -> Self {
		Self {
			identity: RwLock::new(IdentityState { public_key, secret }),
			slot: Mutex::new(None),
		}
	}

	/// Replaces the consumer public key. Validation is deferred to first use.
	pub fn set_public_key(&self, key: impl Into<String>) {
		self.identity.write().public_key = Some(key.into());
	}

	/// Replaces the consumer secret. Validation is deferred to first use.
	pub fn set_secret(&self, secret: impl Into<String>) {
		self.identity.write().secret = Some(TokenSecret::new(secret));
	}

	/// Snapshots the consumer keys, rejecting empty or unset halves.
	pub fn consumer_keys(&self) -> Result<ConsumerKeys> {
		let identity = self.identity.read();
		let public_key = identity
			.public_key
			.as_ref()
			.filter(|key| !key.is_empty())
			.ok_or(ConfigError::MissingPublicKey)?
			.clone();
		let secret = identity
			.secret
			.as_ref()
			.filter(|secret| !secret.is_empty())
			.ok_or(ConfigError::MissingSecret)?
			.clone();

		Ok(ConsumerKeys { public_key, secret })
	}

	/// Returns the memoized credential, acquiring one through `source` when absent.
	///
	/// Identity validation happens before any network activity, so a misconfigured vault fails
	/// without a single round-trip.
	pub fn credential(&self, source: &dyn TokenSource) -> Result<Arc<AccessToken>> {
		let mut slot = self.slot.lock();

		if let Some(token) = slot.as_ref() {
			return Ok(Arc::clone(token));
		}

		let keys = self.consumer_keys()?;
		let token = Arc::new(source.acquire(&keys)?);

		*slot = Some(Arc::clone(&token));

		tracing::debug!(token = %token, "Memoized a freshly acquired access token.");

		Ok(token)
	}

	/// Clears the memoized credential. No-op when none is held; safe under concurrency.
	pub fn invalidate(&self) {
		self.slot.lock().take();
	}

	/// Whether a credential is currently memoized.
	pub fn has_credential(&self) -> bool {
		self.slot.lock().is_some()
	}
}
