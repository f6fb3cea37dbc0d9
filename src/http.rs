//! Blocking transport primitives.
//!
//! [`SignedTransport`] is the crate’s only dependency on an HTTP stack: it executes one
//! round-trip with whatever headers the signing layer prepared and snapshots the outcome into a
//! [`WireResponse`] for classification. Transport failures are mapped here, where the configured
//! deadline is known, so a timeout surfaces as [`Error::Timeout`] rather than a generic network
//! error.

// crates.io
use reqwest::{blocking::Client as HttpClient, redirect::Policy};
// self
use crate::{
	_prelude::*,
	client::Verb,
	error::{ConfigError, TransportError},
};

/// Response snapshot handed to classification: status, headers, raw body.
#[derive(Clone, Debug)]
pub struct WireResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers as name/value pairs.
	pub headers: Vec<(String, String)>,
	/// Raw body bytes, unmodified.
	pub body: Vec<u8>,
}
impl WireResponse {
	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Thin wrapper around the blocking reqwest client so shared HTTP behavior lives in one place.
/// Requests never follow redirects; a signature binds the exact URL it was computed for.
#[derive(Clone, Debug)]
pub struct SignedTransport {
	http: HttpClient,
	timeout: Duration,
}
impl SignedTransport {
	/// Builds a transport bounding every round-trip by `timeout`.
	pub fn new(timeout: Duration) -> Result<Self> {
		let http = HttpClient::builder()
			.timeout(timeout)
			.redirect(Policy::none())
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self { http, timeout })
	}

	/// Executes `verb` against `url` with the prepared headers attached, blocking the calling
	/// thread for at most the configured deadline.
	pub fn execute(
		&self,
		verb: Verb,
		url: Url,
		headers: &[(String, String)],
	) -> Result<WireResponse> {
		let mut request = self.http.request(verb.as_method(), url);

		for (name, value) in headers {
			request = request.header(name.as_str(), value.as_str());
		}

		let response = request.send().map_err(|error| self.map_error(error))?;
		let status = response.status().as_u16();
		let headers = response
			.headers()
			.iter()
			.map(|(name, value)| {
				(name.as_str().to_owned(), String::from_utf8_lossy(value.as_bytes()).into_owned())
			})
			.collect();
		let body = response.bytes().map_err(|error| self.map_error(error))?.to_vec();

		Ok(WireResponse { status, headers, body })
	}

	fn map_error(&self, error: reqwest::Error) -> Error {
		if error.is_timeout() {
			Error::Timeout { limit: self.timeout }
		} else {
			TransportError::network(error).into()
		}
	}
}
