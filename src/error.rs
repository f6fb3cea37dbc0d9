//! Client-level error types shared across the vault, the handshake, and the dispatcher.

// self
use crate::{_prelude::*, oauth::AuthorizationProblem};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token endpoint answered successfully but the response could not be interpreted.
	#[error(transparent)]
	Handshake(#[from] HandshakeError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The server rejected the signing credential at the protocol level.
	///
	/// Surfacing this variant is paired with disposal of the memoized access token, so the next
	/// call re-acquires one; the current call is never retried internally.
	#[error("Authorization was rejected: {0}.")]
	AuthorizationRejected(AuthorizationProblem),
	/// The server answered with a non-200 status outside the authorization-rejection signal.
	#[error("API request failed with status {status}: {message}.")]
	Api {
		/// HTTP status code returned by the server.
		status: u16,
		/// Server-provided message, verbatim.
		message: String,
	},
	/// The network call exceeded the configured deadline.
	#[error("Request timed out after {limit:?}.")]
	Timeout {
		/// Deadline the call was bounded by.
		limit: Duration,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Consumer public key is empty or unset.
	///
	/// Raised at first use rather than at assignment; no network call has happened yet.
	#[error("Consumer public key is empty; set it before issuing requests.")]
	MissingPublicKey,
	/// Consumer secret is empty or unset.
	#[error("Consumer secret is empty; set it before issuing requests.")]
	MissingSecret,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured endpoint or a built request URL is invalid.
	#[error("Endpoint `{endpoint}` is not a valid URL.")]
	InvalidEndpoint {
		/// Endpoint label.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Failures interpreting a 200 token-endpoint response.
#[derive(Debug, ThisError)]
pub enum HandshakeError {
	/// Token endpoint response omitted a required form field.
	#[error("Token endpoint response is missing `{field}`.")]
	MissingTokenField {
		/// Name of the absent field.
		field: &'static str,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while sending the request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while sending the request.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
