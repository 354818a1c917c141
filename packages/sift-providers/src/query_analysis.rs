use serde::Deserialize;
use serde_json::Value;

use crate::{Endpoint, Error, Result};
use sift_config::ProviderConfig;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct QueryAnalysis {
	pub is_keyword: bool,
	/// Not reliable enough to drive retrieval; kept for highlighting.
	#[serde(default)]
	pub keywords: Vec<String>,
}

pub async fn analyze_query(cfg: &ProviderConfig, query: &str) -> Result<QueryAnalysis> {
	let endpoint = Endpoint {
		api_base: &cfg.api_base,
		path: &cfg.path,
		timeout_ms: cfg.timeout_ms,
		headers: crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?,
	};
	let json = crate::post_json(endpoint, &serde_json::json!({ "query": query })).await?;

	parse_query_analysis(json)
}

/// Accepts either `{"is_keyword": bool, "keywords": [...]}` or a `[bool, [...]]` pair.
fn parse_query_analysis(json: Value) -> Result<QueryAnalysis> {
	if let Value::Array(items) = &json
		&& let [Value::Bool(is_keyword), keywords] = items.as_slice()
	{
		let keywords: Vec<String> = serde_json::from_value(keywords.clone())?;

		return Ok(QueryAnalysis { is_keyword: *is_keyword, keywords });
	}
	if json.is_object() {
		return Ok(serde_json::from_value(json)?);
	}

	Err(Error::invalid_response("Query analysis response must be an object or a pair."))
}
