pub mod chat;
pub mod query_analysis;
pub mod source_filter;
pub mod time_filter;
pub mod usefulness;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::{Map, Value};

pub fn auth_headers(
	api_key: Option<&str>,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(api_key) = api_key {
		let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
			.map_err(|_| Error::InvalidHeader { name: AUTHORIZATION.as_str().to_string() })?;

		headers.insert(AUTHORIZATION, value);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: format!("Default header {key} must be a string."),
			});
		};
		let name = HeaderName::from_bytes(key.as_bytes())
			.map_err(|_| Error::InvalidHeader { name: key.clone() })?;
		let value =
			HeaderValue::from_str(raw).map_err(|_| Error::InvalidHeader { name: key.clone() })?;

		headers.insert(name, value);
	}

	Ok(headers)
}

pub(crate) struct Endpoint<'a> {
	pub(crate) api_base: &'a str,
	pub(crate) path: &'a str,
	pub(crate) timeout_ms: u64,
	pub(crate) headers: HeaderMap,
}

pub(crate) async fn post_json(endpoint: Endpoint<'_>, body: &Value) -> Result<Value> {
	let Endpoint { api_base, path, timeout_ms, headers } = endpoint;
	let url = format!("{api_base}{path}");
	let request_error = |source| Error::Request { endpoint: url.clone(), source };
	let client = Client::builder()
		.timeout(Duration::from_millis(timeout_ms))
		.build()
		.map_err(request_error)?;
	let res = client.post(&url).headers(headers).json(body).send().await.map_err(request_error)?;
	let json = res.error_for_status().map_err(request_error)?.json().await.map_err(request_error)?;

	Ok(json)
}
