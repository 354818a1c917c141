use serde_json::Value;

use crate::{Error, Result, chat};
use sift_config::LlmProviderConfig;
use sift_domain::DocumentSource;

/// Predicts which connector sources a query is about. Only `available` sources can be returned;
/// with nothing available there is nothing to predict and no call is made.
pub async fn extract_source_filter(
	cfg: &LlmProviderConfig,
	query: &str,
	available: &[DocumentSource],
) -> Result<Option<Vec<DocumentSource>>> {
	if available.is_empty() {
		return Ok(None);
	}

	let json = chat::complete_json(cfg, &build_source_filter_messages(query, available)).await?;

	parse_source_filter(&json, available)
}

pub fn build_source_filter_messages(query: &str, available: &[DocumentSource]) -> Vec<Value> {
	let labels = available.iter().map(|source| source.as_str()).collect::<Vec<_>>().join(", ");
	let system_prompt = format!(
		"You pick which document sources a search query explicitly refers to. \
Valid sources: {labels}. Output valid JSON only: {{\"sources\": [string]}}. \
Return an empty list when the query does not name a source."
	);

	vec![chat::message("system", system_prompt), chat::message("user", query)]
}

fn parse_source_filter(
	json: &Value,
	available: &[DocumentSource],
) -> Result<Option<Vec<DocumentSource>>> {
	let labels = json
		.get("sources")
		.and_then(Value::as_array)
		.ok_or_else(|| Error::invalid_response("Source filter response is missing sources."))?;
	let mut out = Vec::new();

	for label in labels.iter().filter_map(Value::as_str) {
		match label.parse::<DocumentSource>() {
			Ok(source) if available.contains(&source) =>
				if !out.contains(&source) {
					out.push(source);
				},
			_ => tracing::debug!(label, "Dropping predicted source that has no connector."),
		}
	}

	Ok(if out.is_empty() { None } else { Some(out) })
}
