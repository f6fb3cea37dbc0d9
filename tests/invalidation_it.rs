// std
use std::{collections::BTreeMap, time::Duration};
// crates.io
use httpmock::{Mock, prelude::*};
// self
use trello_client::{
	auth::TokenSecret,
	client::{Client, ClientConfig},
	error::Error,
	url::Url,
};

fn build_client(server: &MockServer) -> Client {
	let mut config = ClientConfig::default();

	config.public_key = Some("public-key".into());
	config.secret = Some(TokenSecret::new("consumer-secret"));
	config.timeout = Duration::from_secs(5);
	config.api_base = Url::parse(&server.base_url()).expect("Mock server URL should parse.");
	config.handshake.site = Url::parse(&server.base_url()).expect("Mock server URL should parse.");

	Client::new(config).expect("Client should build successfully.")
}

fn mock_handshake<'a>(server: &'a MockServer) -> (Mock<'a>, Mock<'a>) {
	let request_token = server.mock(|when, then| {
		when.method(GET).path("/1/OAuthGetRequestToken");
		then.status(200).body("oauth_token=req-token&oauth_token_secret=req-secret");
	});
	let access_token = server.mock(|when, then| {
		when.method(GET).path("/1/OAuthGetAccessToken");
		then.status(200).body("oauth_token=access-token&oauth_token_secret=access-secret");
	});

	(request_token, access_token)
}

#[test]
fn rejection_disposes_the_token_and_the_next_call_reacquires_once() {
	let server = MockServer::start();
	let (request_token, access_token) = mock_handshake(&server);
	let doomed = server.mock(|when, then| {
		when.method(GET).path("/1/boards/doomed");
		then.status(401).body("oauth_problem=token_rejected");
	});
	let alive = server.mock(|when, then| {
		when.method(GET).path("/1/boards/alive");
		then.status(200).body("board");
	});
	let client = build_client(&server);

	client.get("/boards/alive", &BTreeMap::new()).expect("The first request should succeed.");
	request_token.assert_calls(1);

	let err = client
		.get("/boards/doomed", &BTreeMap::new())
		.expect_err("The rejected request should fail.");

	match err {
		Error::AuthorizationRejected(problem) => {
			assert_eq!(problem.problem, "token_rejected");
			assert!(
				problem
					.request_headers
					.iter()
					.any(|(name, value)| name == "authorization" && value.starts_with("OAuth ")),
			);
		},
		other => panic!("Expected an authorization rejection, got {other:?}."),
	}

	// Disposal is lazy: no re-handshake happens until the next request needs a credential.
	request_token.assert_calls(1);

	client.get("/boards/alive", &BTreeMap::new()).expect("The follow-up request should succeed.");

	request_token.assert_calls(2);
	access_token.assert_calls(2);
	doomed.assert();
	alive.assert_calls(2);
}

#[test]
fn challenge_header_rejection_is_classified_too() {
	let server = MockServer::start();
	let (request_token, _access_token) = mock_handshake(&server);
	let doomed = server.mock(|when, then| {
		when.method(GET).path("/1/members/me");
		then.status(401)
			.header(
				"www-authenticate",
				"OAuth realm=\"https://trello.com\", oauth_problem=\"token_expired\"",
			)
			.body("");
	});
	let client = build_client(&server);
	let err = client
		.get("/members/me", &BTreeMap::new())
		.expect_err("The rejected request should fail.");

	assert!(matches!(
		err,
		Error::AuthorizationRejected(ref problem) if problem.problem == "token_expired"
	));

	doomed.assert();
	request_token.assert_calls(1);
}

#[test]
fn plain_unauthorized_is_not_a_rejection() {
	let server = MockServer::start();
	let (request_token, _access_token) = mock_handshake(&server);
	let denied = server.mock(|when, then| {
		when.method(GET).path("/1/boards/denied");
		then.status(401).body("invalid key");
	});
	let alive = server.mock(|when, then| {
		when.method(GET).path("/1/boards/alive");
		then.status(200).body("board");
	});
	let client = build_client(&server);
	let err = client
		.get("/boards/denied", &BTreeMap::new())
		.expect_err("A plain 401 should fail.");

	assert!(matches!(err, Error::Api { status: 401, .. }));

	client.get("/boards/alive", &BTreeMap::new()).expect("The credential should survive.");

	// Without the problem advice the credential stays; one handshake covers both calls.
	request_token.assert_calls(1);
	denied.assert();
	alive.assert();
}
