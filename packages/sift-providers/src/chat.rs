//! OpenAI-compatible chat completions. One attempt per call; retrying is left to the caller.

use serde_json::Value;

use crate::{Endpoint, Error, Result};
use sift_config::LlmProviderConfig;

pub async fn complete(cfg: &LlmProviderConfig, messages: &[Value]) -> Result<String> {
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
	});
	let endpoint = Endpoint {
		api_base: &cfg.api_base,
		path: &cfg.path,
		timeout_ms: cfg.timeout_ms,
		headers: crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?,
	};
	let json = crate::post_json(endpoint, &body).await?;

	parse_choice_content(&json)
}

pub async fn complete_json(cfg: &LlmProviderConfig, messages: &[Value]) -> Result<Value> {
	let content = complete(cfg, messages).await?;

	parse_json_content(&content)
}

pub fn message(role: &str, content: impl Into<String>) -> Value {
	serde_json::json!({ "role": role, "content": content.into() })
}

fn parse_choice_content(json: &Value) -> Result<String> {
	json.get("choices")
		.and_then(Value::as_array)
		.and_then(|choices| choices.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|message| message.get("content"))
		.and_then(Value::as_str)
		.map(str::to_string)
		.ok_or_else(|| Error::invalid_response("Chat response is missing choice content."))
}

/// Models often wrap JSON in a fenced code block.
pub(crate) fn parse_json_content(content: &str) -> Result<Value> {
	let trimmed = content.trim();
	let unfenced = trimmed
		.strip_prefix("```json")
		.or_else(|| trimmed.strip_prefix("```"))
		.and_then(|inner| inner.strip_suffix("```"))
		.unwrap_or(trimmed)
		.trim();
	let parsed: Value = serde_json::from_str(unfenced)?;

	if !parsed.is_object() {
		return Err(Error::invalid_response("Chat content must be a JSON object."));
	}

	Ok(parsed)
}
