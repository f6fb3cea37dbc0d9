//! HMAC-SHA1 request signing (RFC 5849).
//!
//! Every outbound request carries an `Authorization: OAuth …` header built here:
//! 1. collect the protocol parameters plus the request URL’s query pairs,
//! 2. percent-encode with the RFC 3986 unreserved set, sort, and join into the
//!    signature base string `METHOD&url&parameters`,
//! 3. HMAC-SHA1 the base string under `consumer_secret&token_secret`,
//! 4. base64-encode the MAC into the `oauth_signature` parameter.
//!
//! Query-string parameters participate in the signature but stay on the URL; only protocol
//! parameters are rendered into the header.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use time::OffsetDateTime;
// self
use crate::{_prelude::*, auth::ConsumerKeys, client::Verb};

type HmacSha1 = Hmac<sha1::Sha1>;

/// RFC 3986 unreserved characters pass through untouched; everything else is escaped.
const STRICT_ENCODE: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');
const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// Percent-encodes `value` with the RFC 3986 unreserved set.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, STRICT_ENCODE).to_string()
}

/// Builds the `Authorization: OAuth …` header for one request.
///
/// `token` carries the token identifier + secret pair once a token exists (the access-token
/// leg and every API call); `extra` carries protocol parameters beyond the signing defaults
/// (e.g. `oauth_callback` on the request-token leg).
pub fn authorization_header(
	verb: Verb,
	url: &Url,
	keys: &ConsumerKeys,
	token: Option<(&str, &str)>,
	extra: &[(String, String)],
) -> String {
	let nonce = nonce();
	let timestamp = OffsetDateTime::now_utc().unix_timestamp().to_string();

	header_with_materials(verb, url, keys, token, extra, &nonce, &timestamp)
}

fn header_with_materials(
	verb: Verb,
	url: &Url,
	keys: &ConsumerKeys,
	token: Option<(&str, &str)>,
	extra: &[(String, String)],
	nonce: &str,
	timestamp: &str,
) -> String {
	let mut protocol = vec![
		("oauth_consumer_key".to_owned(), keys.public_key.clone()),
		("oauth_nonce".to_owned(), nonce.to_owned()),
		("oauth_signature_method".to_owned(), SIGNATURE_METHOD.to_owned()),
		("oauth_timestamp".to_owned(), timestamp.to_owned()),
		("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
	];

	if let Some((token_id, _)) = token {
		protocol.push(("oauth_token".to_owned(), token_id.to_owned()));
	}

	protocol.extend(extra.iter().cloned());

	let base = signature_base_string(verb, url, &protocol);
	let signature = sign(&base, &signing_key(keys, token));

	render_header(&protocol, &signature)
}

/// Assembles the signature base string from the verb, the query-less URL, and the normalized
/// parameter set (protocol parameters plus the URL’s own query pairs).
fn signature_base_string(verb: Verb, url: &Url, protocol: &[(String, String)]) -> String {
	let mut encoded: Vec<(String, String)> = protocol
		.iter()
		.map(|(key, value)| (percent_encode(key), percent_encode(value)))
		.chain(
			url.query_pairs().map(|(key, value)| (percent_encode(&key), percent_encode(&value))),
		)
		.collect();

	encoded.sort_unstable();

	let normalized = encoded
		.iter()
		.map(|(key, value)| format!("{key}={value}"))
		.collect::<Vec<_>>()
		.join("&");
	let mut base_url = url.clone();

	base_url.set_query(None);
	base_url.set_fragment(None);

	format!("{}&{}&{}", verb.as_str(), percent_encode(base_url.as_str()), percent_encode(&normalized))
}

fn signing_key(keys: &ConsumerKeys, token: Option<(&str, &str)>) -> String {
	format!(
		"{}&{}",
		percent_encode(keys.secret.expose()),
		percent_encode(token.map(|(_, secret)| secret).unwrap_or_default()),
	)
}

fn sign(base: &str, key: &str) -> String {
	// HMAC accepts keys of any size; `new_from_slice` cannot fail here.
	let mut mac =
		HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC should accept any key size.");

	mac.update(base.as_bytes());

	BASE64.encode(mac.finalize().into_bytes())
}

fn render_header(protocol: &[(String, String)], signature: &str) -> String {
	let rendered = protocol
		.iter()
		.map(|(key, value)| format!("{key}=\"{}\"", percent_encode(value)))
		.chain([format!("oauth_signature=\"{}\"", percent_encode(signature))])
		.collect::<Vec<_>>()
		.join(", ");

	format!("OAuth {rendered}")
}

fn nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}
