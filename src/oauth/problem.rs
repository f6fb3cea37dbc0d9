//! The protocol-level authorization-rejection signal and response classification.

// self
use crate::{_prelude::*, http::WireResponse};

const PROBLEM_PARAMETER: &str = "oauth_problem=";

/// Authorization rejection raised by the signing layer.
///
/// Distinct from a plain non-200 response: only a 401 carrying an `oauth_problem` advice
/// (Problem Reporting extension) marks the credential itself as refused. Carries the offending
/// request’s headers so the disposal diagnostic can name what was actually sent.
#[derive(Clone, Debug)]
pub struct AuthorizationProblem {
	/// Problem advice reported by the server.
	pub problem: String,
	/// Headers of the request the server rejected.
	pub request_headers: Vec<(String, String)>,
}
impl AuthorizationProblem {
	/// Extracts the problem signal from a wire response, if present.
	pub fn classify(
		response: &WireResponse,
		request_headers: &[(String, String)],
	) -> Option<Self> {
		if response.status != 401 {
			return None;
		}

		let problem = response
			.header("www-authenticate")
			.and_then(extract_problem)
			.or_else(|| extract_problem(&String::from_utf8_lossy(&response.body)))?;

		Some(Self { problem, request_headers: request_headers.to_vec() })
	}
}
impl Display for AuthorizationProblem {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.problem)
	}
}

/// Splits a wire response into its body bytes, an authorization rejection, or a plain API
/// failure carrying the server’s message verbatim.
pub fn classify_response(
	response: WireResponse,
	request_headers: &[(String, String)],
) -> Result<Vec<u8>> {
	if let Some(problem) = AuthorizationProblem::classify(&response, request_headers) {
		return Err(Error::AuthorizationRejected(problem));
	}
	if response.status != 200 {
		return Err(Error::Api {
			status: response.status,
			message: String::from_utf8_lossy(&response.body).trim().to_owned(),
		});
	}

	Ok(response.body)
}

fn extract_problem(text: &str) -> Option<String> {
	let start = text.find(PROBLEM_PARAMETER)? + PROBLEM_PARAMETER.len();
	let rest = text[start..].trim_start_matches('"');
	let problem: String = rest
		.chars()
		.take_while(|c| !matches!(c, '&' | ',' | '"') && !c.is_whitespace())
		.collect();

	(!problem.is_empty()).then_some(problem)
}
